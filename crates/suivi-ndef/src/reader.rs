//! Turning discovered NDEF messages into the text shown on screen

use tracing::{debug, warn};

use crate::message::NdefMessage;

pub const NO_MESSAGES_FOUND: &str = "No NDEF messages found.";

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum DisplayText {
    /// The discovery event carried no NDEF messages
    NoMessages,

    /// Text or uri found in the first message
    Text(String),

    /// The first message has no text or uri records or failed to decode, keep showing what was
    /// there
    Unchanged,
}

impl DisplayText {
    /// Only the first message is looked at, when it has several text or uri records the last
    /// one wins
    pub fn from_messages(messages: &[NdefMessage]) -> Self {
        let Some(message) = messages.first() else {
            return Self::NoMessages;
        };

        message
            .records
            .iter()
            .filter_map(|record| record.payload.as_display_string())
            .last()
            .map(Self::Text)
            .unwrap_or(Self::Unchanged)
    }

    /// Resolve against the text currently on screen
    pub fn resolve(self, current: &str) -> String {
        match self {
            Self::NoMessages => NO_MESSAGES_FOUND.to_string(),
            Self::Text(text) => text,
            Self::Unchanged => current.to_string(),
        }
    }
}

/// Display text for the raw messages handed over by the platform, only the first message is
/// decoded and if it doesn't parse the screen is left as is
pub fn display_text(raw_messages: &[Vec<u8>]) -> DisplayText {
    let Some(first) = raw_messages.first() else {
        return DisplayText::NoMessages;
    };

    if raw_messages.len() > 1 {
        debug!("ignoring {} ndef messages after the first", raw_messages.len() - 1);
    }

    match NdefMessage::from_bytes(first) {
        Ok(message) => {
            debug!("decoded first ndef message with {} records", message.records.len());
            DisplayText::from_messages(std::slice::from_ref(&message))
        }
        Err(error) => {
            warn!("unable to decode first ndef message: {error}");
            DisplayText::Unchanged
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{payload::NdefPayload, record::NdefRecord, ndef_type::NdefType};

    #[test]
    fn no_messages() {
        let display = DisplayText::from_messages(&[]);
        assert_eq!(display, DisplayText::NoMessages);
        assert_eq!(display.resolve("previous"), NO_MESSAGES_FOUND);
    }

    #[test]
    fn uri_record_is_displayed_expanded() {
        let record = NdefRecord::uri("https://www.example.com").unwrap();
        let message = NdefMessage::new(vec![record]).unwrap();
        let display = DisplayText::from_messages(&[message]);

        assert_eq!(display, DisplayText::Text("https://www.example.com".to_string()));
    }

    #[test]
    fn last_matching_record_of_first_message_wins() {
        let first = NdefMessage::new(vec![
            NdefRecord::text("en", "one").unwrap(),
            NdefRecord::uri("tel:123").unwrap(),
        ])
        .unwrap();
        let second = NdefMessage::text("en", "ignored").unwrap();

        let display = DisplayText::from_messages(&[first, second]);
        assert_eq!(display.resolve(""), "tel:123");
    }

    #[test]
    fn data_only_message_leaves_text_unchanged() {
        let record = NdefRecord::new(
            NdefType::Mime,
            b"application/json".to_vec(),
            None,
            NdefPayload::Data(b"{}".to_vec()),
        )
        .unwrap();
        let message = NdefMessage::new(vec![record]).unwrap();

        let display = DisplayText::from_messages(&[message]);
        assert_eq!(display, DisplayText::Unchanged);
        assert_eq!(display.resolve("NFC Data will appear here"), "NFC Data will appear here");
    }

    #[test]
    fn raw_messages_use_only_the_first() {
        let first = NdefMessage::text("en", "first message").unwrap().to_bytes().unwrap();
        let second = NdefMessage::text("en", "second message").unwrap().to_bytes().unwrap();

        let display = display_text(&[first, second]);
        assert_eq!(display, DisplayText::Text("first message".to_string()));
    }

    #[test]
    fn bad_first_message_leaves_text_unchanged() {
        let second = NdefMessage::text("en", "second message").unwrap().to_bytes().unwrap();
        let display = display_text(&[vec![0xD1, 0x01], second]);

        assert_eq!(display, DisplayText::Unchanged);
        assert_eq!(display.resolve("previous"), "previous");
    }

    #[test]
    fn no_raw_messages() {
        assert_eq!(display_text(&[]), DisplayText::NoMessages);
    }
}
