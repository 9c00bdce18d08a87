use std::sync::Arc;

/// Implemented by the platform, the device's NFC radio
#[uniffi::export(callback_interface)]
pub trait NfcAdapterAccess: Send + Sync + std::fmt::Debug + 'static {
    /// `false` when the device has no NFC radio
    fn is_available(&self) -> bool;

    /// Give the current screen priority for tag discovery events
    fn enable_foreground_dispatch(&self);

    fn disable_foreground_dispatch(&self);
}

/// Handle to the platform adapter, passed to whatever needs it instead of living in a global
#[derive(Debug, Clone)]
pub struct NfcAdapter(Arc<Box<dyn NfcAdapterAccess>>);

impl NfcAdapter {
    pub fn new(adapter: Box<dyn NfcAdapterAccess>) -> Self {
        Self(Arc::new(adapter))
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.0.is_available()
    }

    pub fn enable_foreground_dispatch(&self) {
        self.0.enable_foreground_dispatch()
    }

    pub fn disable_foreground_dispatch(&self) {
        self.0.disable_foreground_dispatch()
    }
}
