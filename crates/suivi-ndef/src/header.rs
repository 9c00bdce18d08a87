use crate::ndef_type::NdefType;

const MESSAGE_BEGIN: u8 = 0x80;
const MESSAGE_END: u8 = 0x40;
const CHUNKED: u8 = 0x20;
const SHORT_RECORD: u8 = 0x10;
const ID_LENGTH_PRESENT: u8 = 0x08;

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct NdefHeader {
    pub message_begin: bool,
    pub message_end: bool,
    pub chunked: bool,
    pub short_record: bool,
    pub has_id_length: bool,
    pub type_name_format: NdefType,
    pub type_length: u8,
    pub payload_length: u32,
    pub id_length: Option<u8>,
}

impl NdefHeader {
    /// Header for a standalone, unchunked record, the message begin and end flags are set
    /// once the record is placed in a message
    pub fn new(
        type_name_format: NdefType,
        type_length: u8,
        payload_length: u32,
        id_length: Option<u8>,
    ) -> Self {
        Self {
            message_begin: false,
            message_end: false,
            chunked: false,
            short_record: payload_length < 256,
            has_id_length: id_length.is_some(),
            type_name_format,
            type_length,
            payload_length,
            id_length,
        }
    }

    /// The first byte of an encoded record
    pub fn flags_byte(&self) -> u8 {
        let mut byte = self.type_name_format.to_bits();

        for (is_set, flag) in [
            (self.message_begin, MESSAGE_BEGIN),
            (self.message_end, MESSAGE_END),
            (self.chunked, CHUNKED),
            (self.short_record, SHORT_RECORD),
            (self.has_id_length, ID_LENGTH_PRESENT),
        ] {
            if is_set {
                byte |= flag;
            }
        }

        byte
    }

    /// Number of bytes the header takes up once encoded
    pub fn encoded_len(&self) -> usize {
        let payload_length_len = if self.short_record { 1 } else { 4 };
        let id_length_len = if self.has_id_length { 1 } else { 0 };

        // flags + type length
        2 + payload_length_len + id_length_len
    }
}
