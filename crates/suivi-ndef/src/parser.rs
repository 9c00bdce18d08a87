pub mod stream;

use stream::Stream;
use winnow::{
    ModalResult, Parser,
    binary::{
        Endianness,
        bits::{bits, bool as take_bool, take as take_bits},
    },
    error::{ContextError, ErrMode},
    token::{any, take},
};

use crate::{header::NdefHeader, ndef_type::NdefType};

/// A record as laid out on the wire, before its payload is decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord<'i> {
    pub header: NdefHeader,
    pub type_: &'i [u8],
    pub id: Option<&'i [u8]>,
    pub payload: &'i [u8],
}

/// Parse records until one has the message end flag set
pub fn parse_raw_records<'i>(input: &mut Stream<'i>) -> ModalResult<Vec<RawRecord<'i>>> {
    let mut records = Vec::new();

    loop {
        let record = parse_raw_record.parse_next(input)?;
        let is_last = record.header.message_end;
        records.push(record);

        if is_last {
            break;
        }
    }

    Ok(records)
}

pub fn parse_raw_record<'i>(input: &mut Stream<'i>) -> ModalResult<RawRecord<'i>> {
    let header = parse_header.parse_next(input)?;
    let type_ = take(header.type_length as usize).parse_next(input)?;
    let id = parse_id(input, header.id_length)?;
    let payload = take(header.payload_length as usize).parse_next(input)?;

    Ok(RawRecord { header, type_, id, payload })
}

// private
fn parse_header_byte(input: &mut Stream<'_>) -> ModalResult<(bool, bool, bool, bool, bool, u8)> {
    bits::<_, _, ErrMode<ContextError>, _, _>((
        take_bool,
        take_bool,
        take_bool,
        take_bool,
        take_bool,
        take_bits(3_u8),
    ))
    .parse_next(input)
}

fn parse_header(input: &mut Stream<'_>) -> ModalResult<NdefHeader> {
    let (message_begin, message_end, chunked, short_record, has_id_length, type_name_format) =
        parse_header_byte(input)?;

    let type_length = winnow::binary::u8.parse_next(input)?;

    let payload_length = if short_record {
        any.map(|x: u8| x as u32).parse_next(input)?
    } else {
        winnow::binary::u32(Endianness::Big).parse_next(input)?
    };

    let id_length = if has_id_length { Some(any.parse_next(input)?) } else { None };

    Ok(NdefHeader {
        message_begin,
        message_end,
        chunked,
        short_record,
        has_id_length,
        type_name_format: NdefType::from_bits(type_name_format),
        type_length,
        payload_length,
        id_length,
    })
}

fn parse_id<'i>(input: &mut Stream<'i>, id_length: Option<u8>) -> ModalResult<Option<&'i [u8]>> {
    match id_length {
        Some(id_len) => take(id_len as usize).map(Some).parse_next(input),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use winnow::error::Needed;

    use super::*;

    #[test]
    fn known_header_parse() {
        let mut header_bytes = stream::new(&[0xD1, 0x01, 0x0D, 0x55, 0x02]);
        let header: NdefHeader = parse_header(&mut header_bytes).unwrap();

        assert!(header.message_begin);
        assert!(header.message_end);
        assert!(!header.chunked);
        assert!(header.short_record);
        assert!(!header.has_id_length);
        assert_eq!(header.type_name_format, NdefType::WellKnown);
        assert_eq!(header.type_length, 1);
        assert_eq!(header.payload_length, 13);
    }

    #[test]
    fn long_header_parse() {
        let mut header_bytes = stream::new(&[0xC2, 0x10, 0x00, 0x00, 0x0B, 0xC1]);
        let header = parse_header(&mut header_bytes).unwrap();

        assert!(!header.short_record);
        assert_eq!(header.type_name_format, NdefType::Mime);
        assert_eq!(header.type_length, 16);
        assert_eq!(header.payload_length, 3009);
    }

    #[test]
    fn parses_uri_record() {
        let bytes = hex::decode("d1010c55026578616d706c652e636f6d").unwrap();
        let mut input = stream::new(&bytes);
        let records = parse_raw_records(&mut input).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].type_, b"U");
        assert_eq!(records[0].id, None);
        assert_eq!(records[0].payload, b"\x02example.com");
    }

    #[test]
    fn stops_after_message_end() {
        // two records, the second one ends the message, trailing terminator tlv is left alone
        let bytes = hex::decode("9101035502616251010354016561fe").unwrap();
        let mut input = stream::new(&bytes);
        let records = parse_raw_records(&mut input).unwrap();

        assert_eq!(records.len(), 2);
        assert!(records[0].header.message_begin);
        assert!(records[1].header.message_end);
        assert_eq!(input.len(), 1);
    }

    #[test]
    fn truncated_payload_reports_needed_bytes() {
        let bytes = hex::decode("d1010d55026578616d").unwrap();
        let mut input = stream::new(&bytes);
        let result = parse_raw_records(&mut input);

        assert!(matches!(result, Err(ErrMode::Incomplete(Needed::Size(_)))));
        if let Err(ErrMode::Incomplete(needed)) = result {
            assert_eq!(needed, Needed::new(8));
        }
    }
}
