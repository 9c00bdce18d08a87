use crate::{NdefError, message::NdefMessage, record::NdefRecord};

#[uniffi::export]
fn ndef_message_from_bytes(data: Vec<u8>) -> Result<NdefMessage, NdefError> {
    NdefMessage::from_bytes(&data)
}

#[uniffi::export]
fn ndef_message_to_bytes(message: NdefMessage) -> Result<Vec<u8>, NdefError> {
    message.to_bytes()
}

#[uniffi::export]
fn ndef_text_message(language: String, text: String) -> Result<NdefMessage, NdefError> {
    NdefMessage::text(&language, &text)
}

#[uniffi::export]
fn ndef_record_string(record: NdefRecord) -> Option<String> {
    record.payload.as_display_string()
}
