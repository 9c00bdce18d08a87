uniffi::setup_scaffolding!();

pub mod ffi;
pub mod header;
pub mod message;
pub mod ndef_type;
pub mod parser;
pub mod payload;
pub mod reader;
pub mod record;

pub use message::NdefMessage;
pub use record::NdefRecord;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, uniffi::Error)]
pub enum NdefError {
    #[error("not enough data to parse the NDEF message, needed: {needed:?}")]
    Incomplete { needed: Option<u32> },

    #[error("error parsing the NDEF message: {0}")]
    Parse(String),

    #[error("language code must be between 1 and 63 bytes, found {0}")]
    InvalidLanguageCode(u32),

    #[error("an NDEF message needs at least one record")]
    EmptyMessage,

    #[error("record {field} is {length} bytes, at most {max} can be encoded")]
    FieldTooLong { field: String, length: u64, max: u64 },
}
