use std::sync::Arc;

use flume::{Receiver, Sender, TrySendError};
use parking_lot::RwLock;
use suivi_ndef::reader::{self, DisplayText};
use tracing::{debug, error, warn};

use crate::{
    config::{NfcConfig, NfcConfigError},
    nfc_adapter::{NfcAdapter, NfcAdapterAccess},
    tag::NdefTagAccess,
    tag_writer::{TagWriteDecider, WriteMode, WriteOutcome},
};

pub const NFC_UNAVAILABLE_MESSAGE: &str = "NFC is not available on this device.";
pub const EMPTY_TEXT_MESSAGE: &str = "Please enter text before attempting to write to a tag.";
pub const READY_TO_WRITE_MESSAGE: &str =
    "Ready to write. Please bring an NFC tag close to your device.";
pub const READY_TO_UPDATE_MESSAGE: &str =
    "Ready to update. Please bring an NFC tag close to your device.";

type Message = NfcManagerReconcileMessage;

#[derive(Debug, Clone, Hash, Eq, PartialEq, uniffi::Enum)]
pub enum NfcManagerReconcileMessage {
    /// New text for the scanned data view
    NfcData(String),

    TextToWrite(String),

    /// Short lived status shown to the user
    Status(String),
}

#[uniffi::export(callback_interface)]
pub trait NfcManagerReconciler: Send + Sync + std::fmt::Debug + 'static {
    /// Tells the frontend to reconcile the manager changes
    fn reconcile(&self, message: NfcManagerReconcileMessage);
}

#[derive(Debug, Clone, Hash, Eq, PartialEq, uniffi::Enum)]
pub enum NfcManagerAction {
    ScanTag,
    Reset,
    PrepareWrite,
    PrepareUpdate,
    UpdateTextToWrite(String),
}

/// The action of the platform event that reported a tag
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, uniffi::Enum, derive_more::Display)]
pub enum DiscoveryAction {
    TagDiscovered,
    NdefDiscovered,
    TechDiscovered,
    Other,
}

#[derive(Debug, Clone, Hash, Eq, PartialEq, uniffi::Record)]
pub struct NfcManagerState {
    pub nfc_data: String,
    pub text_to_write: String,
    pub dispatch_enabled: bool,
}

#[derive(Debug, Clone, Hash, Eq, PartialEq, uniffi::Error, thiserror::Error)]
pub enum NfcManagerError {
    #[error("NFC is not available on this device.")]
    NfcUnavailable,

    #[error(transparent)]
    Config(#[from] NfcConfigError),
}

type Error = NfcManagerError;

#[derive(Clone, Debug, uniffi::Object)]
pub struct RustNfcManager {
    state: Arc<RwLock<NfcManagerState>>,
    adapter: NfcAdapter,
    decider: TagWriteDecider,
    config: NfcConfig,
    reconciler: Sender<Message>,
    reconcile_receiver: Arc<Receiver<Message>>,
}

impl RustNfcManager {
    pub fn try_new(adapter: NfcAdapter, config: NfcConfig) -> Result<Self, Error> {
        if !adapter.is_available() {
            error!("{NFC_UNAVAILABLE_MESSAGE}");
            return Err(NfcManagerError::NfcUnavailable);
        }

        let decider = TagWriteDecider::try_new(&config)?;
        let (sender, receiver) = flume::bounded(1000);

        let state = NfcManagerState {
            nfc_data: config.placeholder_text.clone(),
            text_to_write: String::new(),
            dispatch_enabled: false,
        };

        Ok(Self {
            state: Arc::new(RwLock::new(state)),
            adapter,
            decider,
            config,
            reconciler: sender,
            reconcile_receiver: Arc::new(receiver),
        })
    }

    /// Handle a discovered tag, writes the entered text when there is some
    ///
    /// Returns `None` when nothing was attempted
    pub fn handle_new_intent(
        &self,
        action: DiscoveryAction,
        tag: &dyn NdefTagAccess,
    ) -> Option<WriteOutcome> {
        let mode = match action {
            DiscoveryAction::TagDiscovered => WriteMode::Write,
            DiscoveryAction::NdefDiscovered => WriteMode::Update,
            DiscoveryAction::TechDiscovered | DiscoveryAction::Other => {
                debug!("ignoring {action} event");
                return None;
            }
        };

        let text = self.state.read().text_to_write.clone();
        if text.is_empty() {
            warn!("tag discovered without any text to write");
            self.send(Message::Status(EMPTY_TEXT_MESSAGE.to_string()));
            return None;
        }

        debug!("tag discovered, starting {mode}");
        let outcome = self.decider.attempt_write(tag, &text);
        self.send(Message::Status(outcome.status_message(mode)));

        Some(outcome)
    }

    /// Show the contents of the messages that launched or resumed the screen
    pub fn handle_resume(&self, action: DiscoveryAction, raw_messages: &[Vec<u8>]) {
        if action != DiscoveryAction::NdefDiscovered {
            return;
        }

        let display = reader::display_text(raw_messages);
        if display == DisplayText::Unchanged {
            debug!("no text or uri records found, keeping current data");
            return;
        }

        let nfc_data = {
            let mut state = self.state.write();
            let nfc_data = display.resolve(&state.nfc_data);
            state.nfc_data = nfc_data.clone();
            nfc_data
        };

        self.send(Message::NfcData(nfc_data));
    }

    fn send(&self, message: Message) {
        match self.reconciler.try_send(message) {
            Ok(()) => {}
            Err(TrySendError::Full(message)) => {
                warn!("reconcile channel is full, dropping {message:?}")
            }
            Err(TrySendError::Disconnected(message)) => {
                error!("reconcile channel is disconnected, dropping {message:?}")
            }
        }
    }
}

#[uniffi::export]
impl RustNfcManager {
    #[uniffi::constructor]
    pub fn new(adapter: Box<dyn NfcAdapterAccess>, config: NfcConfig) -> Result<Self, Error> {
        crate::logging::init();
        Self::try_new(NfcAdapter::new(adapter), config)
    }

    #[uniffi::method]
    pub fn listen_for_updates(&self, reconciler: Box<dyn NfcManagerReconciler>) {
        let reconcile_receiver = self.reconcile_receiver.clone();

        std::thread::spawn(move || {
            while let Ok(field) = reconcile_receiver.recv() {
                // call the reconcile method on the frontend
                reconciler.reconcile(field);
            }
        });
    }

    #[uniffi::method]
    pub fn state(&self) -> NfcManagerState {
        self.state.read().clone()
    }

    #[uniffi::method]
    pub fn on_pause(&self) {
        self.adapter.disable_foreground_dispatch();
        self.state.write().dispatch_enabled = false;
    }

    #[uniffi::method]
    pub fn on_resume(&self, action: DiscoveryAction, messages: Vec<Vec<u8>>) {
        self.handle_resume(action, &messages)
    }

    #[uniffi::method]
    pub fn on_new_intent(
        &self,
        action: DiscoveryAction,
        tag: Box<dyn NdefTagAccess>,
    ) -> Option<WriteOutcome> {
        self.handle_new_intent(action, tag.as_ref())
    }

    /// Action from the frontend to change the state of the manager
    #[uniffi::method]
    pub fn dispatch(&self, action: NfcManagerAction) {
        debug!("dispatch: {action:?}");

        match action {
            NfcManagerAction::ScanTag => {
                self.adapter.enable_foreground_dispatch();
                self.state.write().dispatch_enabled = true;
            }

            NfcManagerAction::Reset => {
                let placeholder = self.config.placeholder_text.clone();
                self.state.write().nfc_data = placeholder.clone();
                self.send(Message::NfcData(placeholder));
            }

            NfcManagerAction::PrepareWrite => {
                self.send(Message::Status(READY_TO_WRITE_MESSAGE.to_string()))
            }

            NfcManagerAction::PrepareUpdate => {
                self.send(Message::Status(READY_TO_UPDATE_MESSAGE.to_string()))
            }

            NfcManagerAction::UpdateTextToWrite(text) => {
                self.state.write().text_to_write = text.clone();
                self.send(Message::TextToWrite(text));
            }
        }
    }
}
