use tracing::debug;
use winnow::error::{ErrMode, Needed};

use crate::{
    NdefError,
    ndef_type::NdefType,
    parser::{self, RawRecord},
    payload::NdefPayload,
    record::NdefRecord,
};

type Result<T, E = NdefError> = std::result::Result<T, E>;

/// An ordered sequence of NDEF records
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct NdefMessage {
    pub records: Vec<NdefRecord>,
}

impl NdefMessage {
    pub fn new(records: Vec<NdefRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(NdefError::EmptyMessage);
        }

        let last = records.len() - 1;
        let records = records
            .into_iter()
            .enumerate()
            .map(|(index, mut record)| {
                record.header.message_begin = index == 0;
                record.header.message_end = index == last;
                record
            })
            .collect();

        Ok(Self { records })
    }

    /// Message holding a single UTF-8 text record
    pub fn text(language: &str, text: &str) -> Result<Self> {
        let record = NdefRecord::text(language, text)?;
        Self::new(vec![record])
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut input = parser::stream::new(bytes);
        let raw_records = parser::parse_raw_records(&mut input).map_err(from_parse_error)?;

        if !input.is_empty() {
            debug!("ignoring {} bytes after the last ndef record", input.len());
        }

        let records = raw_records
            .into_iter()
            .enumerate()
            .map(|(index, raw)| decode_record(index, raw))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { records })
    }

    /// Fails when a record has a field too long for its length byte(s)
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(self.byte_len()?);
        let last = self.records.len().saturating_sub(1);

        for (index, record) in self.records.iter().enumerate() {
            record.encode_into(&mut bytes, index == 0, index == last)?;
        }

        Ok(bytes)
    }

    /// Size of the serialized message, this is what has to fit on the tag
    pub fn byte_len(&self) -> Result<usize> {
        self.records.iter().map(NdefRecord::encoded_len).sum()
    }

    /// Text of the first text record in the message
    pub fn first_text(&self) -> Option<&str> {
        self.records.iter().find_map(|record| match &record.payload {
            NdefPayload::Text(text) => Some(text.text.as_str()),
            _ => None,
        })
    }
}

fn decode_record(index: usize, raw: RawRecord<'_>) -> Result<NdefRecord> {
    let header = raw.header;

    if index == 0 && !header.message_begin {
        return Err(NdefError::Parse("first record is missing the message begin flag".into()));
    }

    if index > 0 && header.message_begin {
        return Err(NdefError::Parse(format!("record {index} has the message begin flag set")));
    }

    if header.chunked {
        return Err(NdefError::Parse("chunked records are not supported".into()));
    }

    let is_well_known = header.type_name_format == NdefType::WellKnown;
    let payload = NdefPayload::decode(is_well_known, raw.type_, raw.payload)?;

    Ok(NdefRecord {
        header,
        type_: raw.type_.to_vec(),
        id: raw.id.map(<[u8]>::to_vec),
        payload,
    })
}

fn from_parse_error(error: ErrMode<winnow::error::ContextError>) -> NdefError {
    match error {
        ErrMode::Incomplete(Needed::Size(needed)) => {
            NdefError::Incomplete { needed: Some(needed.get() as u32) }
        }
        ErrMode::Incomplete(Needed::Unknown) => NdefError::Incomplete { needed: None },
        error => NdefError::Parse(format!("error parsing message: {error}")),
    }
}
