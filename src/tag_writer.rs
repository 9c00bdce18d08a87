//! Deciding whether a message gets written to a discovered tag
//!
//! The probe, writability and capacity checks never touch the tag's contents, the tag is only
//! connected to once all of them pass.

use suivi_ndef::{NdefError, NdefMessage};
use tap::TapFallible as _;
use tracing::{debug, error, warn};

use crate::{
    config::{NfcConfig, NfcConfigError},
    tag::{NdefTagAccess, TagConnection, TagIoError},
};

pub const SUCCESS_MESSAGE: &str = "NFC Tag written/updated successfully!";
pub const NOT_WRITABLE_MESSAGE: &str = "NFC Tag is not writable";
pub const INSUFFICIENT_SPACE_MESSAGE: &str = "NFC Tag does not have enough space";
pub const NOT_NDEF_FORMATTED_MESSAGE: &str = "NFC Tag is not NDEF formatted or cannot be written to";

/// Result of a single write attempt
#[derive(Debug, Clone, PartialEq, Eq, Hash, uniffi::Enum)]
pub enum WriteOutcome {
    Success,
    NotWritable,
    InsufficientSpace { message_size: u32, max_size: u32 },
    NotNdefFormatted,
    IoFailure { detail: String },
}

/// Which flow started the attempt, writing a blank tag or updating one that already has a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, uniffi::Enum, derive_more::Display)]
pub enum WriteMode {
    #[display("write")]
    Write,
    #[display("update")]
    Update,
}

impl WriteOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Message shown to the user
    pub fn status_message(&self, mode: WriteMode) -> String {
        match self {
            Self::Success => SUCCESS_MESSAGE.to_string(),
            Self::NotWritable => NOT_WRITABLE_MESSAGE.to_string(),
            Self::InsufficientSpace { .. } => INSUFFICIENT_SPACE_MESSAGE.to_string(),
            Self::NotNdefFormatted => NOT_NDEF_FORMATTED_MESSAGE.to_string(),
            Self::IoFailure { detail } => match mode {
                WriteMode::Write => format!("Error writing to NFC tag: {detail}"),
                WriteMode::Update => format!("Error updating NFC tag: {detail}"),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Object)]
pub struct TagWriteDecider {
    language_code: String,
}

impl TagWriteDecider {
    pub fn try_new(config: &NfcConfig) -> Result<Self, NfcConfigError> {
        config.validate()?;
        Ok(Self { language_code: config.language_code.clone() })
    }

    /// Write `text` as a single text record, the caller makes sure `text` is not empty
    pub fn attempt_write(&self, tag: &dyn NdefTagAccess, text: &str) -> WriteOutcome {
        self.decide(tag, || NdefMessage::text(&self.language_code, text)?.to_bytes())
    }

    pub fn attempt_write_message(
        &self,
        tag: &dyn NdefTagAccess,
        message: &NdefMessage,
    ) -> WriteOutcome {
        self.decide(tag, || message.to_bytes())
    }

    /// Probe, writability, capacity then commit. Encoding only fails when a field is longer
    /// than its NDEF length field allows, such a message can't be stored on any tag so it is
    /// reported as `InsufficientSpace` with the size saturated at `u32::MAX`
    fn decide(
        &self,
        tag: &dyn NdefTagAccess,
        encode: impl FnOnce() -> Result<Vec<u8>, NdefError>,
    ) -> WriteOutcome {
        let Some(capabilities) = tag.probe() else {
            warn!("tag is not ndef formatted, not writing");
            return WriteOutcome::NotNdefFormatted;
        };

        debug!("tag capabilities: {capabilities:?}");

        if !capabilities.is_writable {
            warn!("tag is read only, not writing");
            return WriteOutcome::NotWritable;
        }

        let max_size = capabilities.max_size_bytes;
        let bytes = match encode() {
            Ok(bytes) => bytes,
            Err(error) => {
                warn!("message can't be encoded, not writing: {error}");
                return WriteOutcome::InsufficientSpace { message_size: u32::MAX, max_size };
            }
        };

        let message_size = u32::try_from(bytes.len()).unwrap_or(u32::MAX);
        if bytes.len() > max_size as usize {
            warn!("message is {message_size} bytes, tag only fits {max_size}");
            return WriteOutcome::InsufficientSpace { message_size, max_size };
        }

        match commit(tag, bytes) {
            Ok(()) => {
                debug!("wrote {message_size} byte message to tag");
                WriteOutcome::Success
            }
            Err(error) => WriteOutcome::IoFailure { detail: error.to_string() },
        }
    }
}

/// The connection is closed on every path out of here
fn commit(tag: &dyn NdefTagAccess, bytes: Vec<u8>) -> Result<(), TagIoError> {
    let connection = TagConnection::open(tag)
        .tap_err(|error| error!("unable to connect to tag: {error}"))?;

    connection.write(bytes).tap_err(|error| error!("unable to write to tag: {error}"))?;
    connection.close().tap_err(|error| error!("unable to close tag: {error}"))
}

#[uniffi::export]
impl TagWriteDecider {
    #[uniffi::constructor]
    pub fn new(config: NfcConfig) -> Result<Self, NfcConfigError> {
        Self::try_new(&config)
    }

    #[uniffi::method]
    pub fn write_text(&self, tag: Box<dyn NdefTagAccess>, text: String) -> WriteOutcome {
        self.attempt_write(tag.as_ref(), &text)
    }
}

mod ffi {
    use super::*;

    /// Write with the default config
    #[uniffi::export]
    fn attempt_write(tag: Box<dyn NdefTagAccess>, text: String) -> WriteOutcome {
        let decider = TagWriteDecider { language_code: crate::config::DEFAULT_LANGUAGE_CODE.into() };
        decider.attempt_write(tag.as_ref(), &text)
    }

    #[uniffi::export]
    fn write_outcome_status_message(outcome: WriteOutcome, mode: WriteMode) -> String {
        outcome.status_message(mode)
    }
}
