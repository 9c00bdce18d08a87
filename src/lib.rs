pub mod config;
pub mod manager;
pub mod nfc_adapter;
pub mod tag;
pub mod tag_writer;

pub(crate) mod logging;

// Re-export the ndef crate
pub use suivi_ndef as ndef;

pub use manager::nfc_manager::RustNfcManager;
pub use tag::{NdefCapabilities, NdefTagAccess, TagIoError};
pub use tag_writer::{TagWriteDecider, WriteMode, WriteOutcome};

uniffi::setup_scaffolding!();
