pub mod errors;
pub mod record;

pub use errors::DecodeError;
pub use record::{decode_part, decode_part_records, parse_record, PartRecord};
