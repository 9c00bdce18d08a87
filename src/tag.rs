//! The tag handle the platform hands over for a single discovery event

#[cfg(test)]
pub mod fake;

use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, uniffi::Record)]
pub struct NdefCapabilities {
    pub is_writable: bool,
    pub max_size_bytes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error, uniffi::Error)]
pub enum TagIoError {
    /// I/O failure reported by the platform, the tag was removed or the transceive failed
    #[error("{0}")]
    Io(String),

    /// The platform rejected the message as malformed
    #[error("{0}")]
    Format(String),

    #[error("Tag was lost")]
    TagLost,

    #[error("unexpected platform error: {0}")]
    Unexpected(String),
}

impl From<uniffi::UnexpectedUniFFICallbackError> for TagIoError {
    fn from(error: uniffi::UnexpectedUniFFICallbackError) -> Self {
        Self::Unexpected(error.reason)
    }
}

/// Implemented by the platform, wraps the NDEF technology of a discovered tag
#[uniffi::export(callback_interface)]
pub trait NdefTagAccess: Send + Sync + std::fmt::Debug + 'static {
    /// NDEF capabilities of the tag, `None` when the tag is not NDEF formatted
    fn probe(&self) -> Option<NdefCapabilities>;

    fn connect(&self) -> Result<(), TagIoError>;

    /// Write a fully serialized NDEF message
    fn write_ndef_message(&self, message: Vec<u8>) -> Result<(), TagIoError>;

    fn close(&self) -> Result<(), TagIoError>;
}

/// An open connection to a tag, closed when dropped
///
/// Use [`TagConnection::close`] on the happy path so a failing close is reported
#[derive(Debug)]
pub struct TagConnection<'a> {
    tag: &'a dyn NdefTagAccess,
    open: bool,
}

impl<'a> TagConnection<'a> {
    pub fn open(tag: &'a dyn NdefTagAccess) -> Result<Self, TagIoError> {
        tag.connect()?;
        debug!("connected to tag");

        Ok(Self { tag, open: true })
    }

    pub fn write(&self, message: Vec<u8>) -> Result<(), TagIoError> {
        self.tag.write_ndef_message(message)
    }

    pub fn close(mut self) -> Result<(), TagIoError> {
        self.open = false;
        self.tag.close()
    }
}

impl Drop for TagConnection<'_> {
    fn drop(&mut self) {
        if !self.open {
            return;
        }

        if let Err(error) = self.tag.close() {
            warn!("unable to close tag connection: {error}");
        }
    }
}
