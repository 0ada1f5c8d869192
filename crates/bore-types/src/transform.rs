use serde::{Deserialize, Serialize};

/// A 4x4 affine transformation matrix stored in column-major order.
///
/// Crosses the kernel boundary when placing cutter solids, so it lives in
/// the shared types crate rather than with the geometry operations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Column-major 4x4 matrix entries.
    pub m: [f64; 16],
}

impl Transform {
    pub fn identity() -> Self {
        #[rustfmt::skip]
        let m = [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ];
        Self { m }
    }

    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        #[rustfmt::skip]
        let m = [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            dx,  dy,  dz,  1.0,
        ];
        Self { m }
    }

    /// Rotation around the Y axis by `angle` radians.
    pub fn rotation_y(angle: f64) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        #[rustfmt::skip]
        let m = [
            c,   0.0, -s,  0.0,
            0.0, 1.0, 0.0, 0.0,
            s,   0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        ];
        Self { m }
    }

    /// Matrix element access (row, col), 0-indexed.
    fn at(&self, row: usize, col: usize) -> f64 {
        self.m[col * 4 + row]
    }

    /// Transform a point (applies translation).
    pub fn transform_point(&self, p: [f64; 3]) -> [f64; 3] {
        [
            self.at(0, 0) * p[0] + self.at(0, 1) * p[1] + self.at(0, 2) * p[2] + self.at(0, 3),
            self.at(1, 0) * p[0] + self.at(1, 1) * p[1] + self.at(1, 2) * p[2] + self.at(1, 3),
            self.at(2, 0) * p[0] + self.at(2, 1) * p[1] + self.at(2, 2) * p[2] + self.at(2, 3),
        ]
    }

    /// Transform a direction vector (no translation).
    pub fn transform_vector(&self, v: [f64; 3]) -> [f64; 3] {
        [
            self.at(0, 0) * v[0] + self.at(0, 1) * v[1] + self.at(0, 2) * v[2],
            self.at(1, 0) * v[0] + self.at(1, 1) * v[1] + self.at(1, 2) * v[2],
            self.at(2, 0) * v[0] + self.at(2, 1) * v[1] + self.at(2, 2) * v[2],
        ]
    }

    /// Compose two transforms: self * other. Applied to a point, `other`
    /// acts first and `self` acts last.
    pub fn then(&self, other: &Transform) -> Transform {
        let mut result = [0.0f64; 16];
        for col in 0..4 {
            for row in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.at(row, k) * other.at(k, col);
                }
                result[col * 4 + row] = sum;
            }
        }
        Transform { m: result }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
