use parking_lot::Mutex;
use suivi_ndef::NdefMessage;

use super::{NdefCapabilities, NdefTagAccess, TagIoError};

/// In memory tag that records every call made to it
#[derive(Debug, Default)]
pub struct FakeTag(Mutex<FakeTagState>);

#[derive(Debug, Clone, Default)]
pub struct FakeTagState {
    pub capabilities: Option<NdefCapabilities>,
    pub stored: Option<Vec<u8>>,
    pub connected: bool,

    pub probes: u32,
    pub connects: u32,
    pub writes: u32,
    pub closes: u32,

    pub connect_error: Option<TagIoError>,
    pub write_error: Option<TagIoError>,
    pub close_error: Option<TagIoError>,
}

impl FakeTag {
    pub fn ndef(max_size_bytes: u32, is_writable: bool) -> Self {
        let state = FakeTagState {
            capabilities: Some(NdefCapabilities { is_writable, max_size_bytes }),
            ..FakeTagState::default()
        };

        Self(Mutex::new(state))
    }

    pub fn not_ndef() -> Self {
        Self::default()
    }

    pub fn with_stored(self, message: &NdefMessage) -> Self {
        self.0.lock().stored = message.to_bytes().ok();
        self
    }

    pub fn failing_connect(self, error: TagIoError) -> Self {
        self.0.lock().connect_error = Some(error);
        self
    }

    pub fn failing_write(self, error: TagIoError) -> Self {
        self.0.lock().write_error = Some(error);
        self
    }

    pub fn failing_close(self, error: TagIoError) -> Self {
        self.0.lock().close_error = Some(error);
        self
    }

    pub fn state(&self) -> FakeTagState {
        self.0.lock().clone()
    }

    pub fn stored_message(&self) -> Option<NdefMessage> {
        let stored = self.0.lock().stored.clone()?;
        NdefMessage::from_bytes(&stored).ok()
    }
}

impl NdefTagAccess for FakeTag {
    fn probe(&self) -> Option<NdefCapabilities> {
        let mut state = self.0.lock();
        state.probes += 1;
        state.capabilities
    }

    fn connect(&self) -> Result<(), TagIoError> {
        let mut state = self.0.lock();
        state.connects += 1;

        if let Some(error) = state.connect_error.clone() {
            return Err(error);
        }

        state.connected = true;
        Ok(())
    }

    fn write_ndef_message(&self, message: Vec<u8>) -> Result<(), TagIoError> {
        let mut state = self.0.lock();
        state.writes += 1;

        if !state.connected {
            return Err(TagIoError::Io("not connected".to_string()));
        }

        if let Some(error) = state.write_error.clone() {
            return Err(error);
        }

        state.stored = Some(message);
        Ok(())
    }

    fn close(&self) -> Result<(), TagIoError> {
        let mut state = self.0.lock();
        state.closes += 1;
        state.connected = false;

        match state.close_error.clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
