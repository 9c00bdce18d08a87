use crate::{
    NdefError,
    header::NdefHeader,
    ndef_type::NdefType,
    payload::{NdefPayload, TextPayload},
};

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct NdefRecord {
    pub header: NdefHeader,
    pub type_: Vec<u8>,
    pub id: Option<Vec<u8>>,
    pub payload: NdefPayload,
}

impl NdefRecord {
    /// Type and id longer than 255 bytes, or payloads longer than `u32::MAX`, can't be encoded
    pub fn new(
        type_name_format: NdefType,
        type_: Vec<u8>,
        id: Option<Vec<u8>>,
        payload: NdefPayload,
    ) -> Result<Self, NdefError> {
        let payload_length = payload.encode()?.len();
        let header = wire_header(type_name_format, &type_, id.as_deref(), payload_length)?;

        Ok(Self { header, type_, id, payload })
    }

    /// Well known UTF-8 text record
    pub fn text(language: &str, text: &str) -> Result<Self, NdefError> {
        let payload = TextPayload::utf8(language, text)?;
        Self::new(NdefType::WellKnown, b"T".to_vec(), None, NdefPayload::Text(payload))
    }

    /// Well known uri record, the uri prefix is abbreviated when encoded
    pub fn uri(uri: &str) -> Result<Self, NdefError> {
        Self::new(NdefType::WellKnown, b"U".to_vec(), None, NdefPayload::Uri(uri.to_string()))
    }

    pub fn is_well_known(&self, type_: &[u8]) -> bool {
        self.header.type_name_format == NdefType::WellKnown && self.type_ == type_
    }

    /// Append the encoded record, the message begin and end flags are passed in because they
    /// depend on where the record sits in the message
    pub(crate) fn encode_into(
        &self,
        bytes: &mut Vec<u8>,
        message_begin: bool,
        message_end: bool,
    ) -> Result<(), NdefError> {
        let payload = self.payload.encode()?;
        let mut header = self.current_header(payload.len())?;
        header.message_begin = message_begin;
        header.message_end = message_end;

        bytes.push(header.flags_byte());
        bytes.push(header.type_length);

        if header.short_record {
            bytes.push(header.payload_length as u8);
        } else {
            bytes.extend_from_slice(&header.payload_length.to_be_bytes());
        }

        if let Some(id_length) = header.id_length {
            bytes.push(id_length);
        }

        bytes.extend_from_slice(&self.type_);
        if let Some(id) = &self.id {
            bytes.extend_from_slice(id);
        }
        bytes.extend_from_slice(&payload);

        Ok(())
    }

    pub fn encoded_len(&self) -> Result<usize, NdefError> {
        let payload_length = self.payload.encode()?.len();
        let header = self.current_header(payload_length)?;

        Ok(header.encoded_len()
            + self.type_.len()
            + self.id.as_ref().map_or(0, Vec::len)
            + payload_length)
    }

    // fields are public, so the stored header can't be trusted for the lengths
    fn current_header(&self, payload_length: usize) -> Result<NdefHeader, NdefError> {
        let type_name_format = self.header.type_name_format;
        wire_header(type_name_format, &self.type_, self.id.as_deref(), payload_length)
    }
}

fn wire_header(
    type_name_format: NdefType,
    type_: &[u8],
    id: Option<&[u8]>,
    payload_length: usize,
) -> Result<NdefHeader, NdefError> {
    let type_length = u8::try_from(type_.len()).map_err(|_| too_long("type", type_.len(), 255))?;

    let id_length = id
        .map(|id| u8::try_from(id.len()).map_err(|_| too_long("id", id.len(), 255)))
        .transpose()?;

    let payload_length = u32::try_from(payload_length)
        .map_err(|_| too_long("payload", payload_length, u32::MAX.into()))?;

    Ok(NdefHeader::new(type_name_format, type_length, payload_length, id_length))
}

fn too_long(field: &str, length: usize, max: u64) -> NdefError {
    NdefError::FieldTooLong { field: field.to_string(), length: length as u64, max }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn text_record_header() {
        let record = NdefRecord::text("en", "hello world").unwrap();

        assert_eq!(record.header.type_name_format, NdefType::WellKnown);
        assert_eq!(record.header.type_length, 1);
        assert_eq!(record.header.payload_length, 14);
        assert!(record.header.short_record);
        assert!(record.is_well_known(b"T"));
    }

    #[test]
    fn long_payload_switches_to_four_byte_length() {
        let text = "a".repeat(300);
        let record = NdefRecord::text("en", &text).unwrap();

        let mut bytes = Vec::new();
        record.encode_into(&mut bytes, true, true).unwrap();

        assert!(!record.header.short_record);
        assert_eq!(bytes[0], 0xC1);
        assert_eq!(&bytes[2..6], &303_u32.to_be_bytes());
        assert_eq!(bytes.len(), record.encoded_len().unwrap());
    }

    #[test]
    fn record_with_id() {
        let record = NdefRecord::new(
            NdefType::Mime,
            b"text/plain".to_vec(),
            Some(b"a1".to_vec()),
            NdefPayload::Data(b"hi".to_vec()),
        )
        .unwrap();

        let mut bytes = Vec::new();
        record.encode_into(&mut bytes, true, true).unwrap();

        assert_eq!(hex::encode(&bytes), "da0a0202746578742f706c61696e61316869");
        assert_eq!(bytes.len(), record.encoded_len().unwrap());
    }

    #[test]
    fn type_longer_than_255_bytes_is_rejected() {
        let record = NdefRecord::new(
            NdefType::External,
            vec![b'a'; 256],
            None,
            NdefPayload::Data(b"hi".to_vec()),
        );

        assert_eq!(
            record,
            Err(NdefError::FieldTooLong { field: "type".to_string(), length: 256, max: 255 })
        );
    }

    #[test]
    fn id_longer_than_255_bytes_is_rejected() {
        let record = NdefRecord::new(
            NdefType::Mime,
            b"text/plain".to_vec(),
            Some(vec![b'i'; 300]),
            NdefPayload::Data(b"hi".to_vec()),
        );

        assert!(matches!(record, Err(NdefError::FieldTooLong { length: 300, .. })));
    }

    #[test]
    fn edited_record_is_checked_again_when_encoded() {
        let mut record = NdefRecord::new(
            NdefType::External,
            b"example.com:t".to_vec(),
            None,
            NdefPayload::Data(b"hi".to_vec()),
        )
        .unwrap();
        record.type_ = vec![b'a'; 256];

        let mut bytes = Vec::new();
        let result = record.encode_into(&mut bytes, true, true);

        assert!(matches!(result, Err(NdefError::FieldTooLong { .. })));
        assert!(matches!(record.encoded_len(), Err(NdefError::FieldTooLong { .. })));
    }
}
