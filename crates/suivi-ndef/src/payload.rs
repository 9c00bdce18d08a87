use crate::NdefError;

/// Status byte bit marking a UTF-16 encoded text record
const UTF16_FLAG: u8 = 0x80;

/// Lower 6 bits of the status byte hold the language code length
const LANGUAGE_LENGTH_MASK: u8 = 0x3F;

pub const MAX_LANGUAGE_CODE_LENGTH: usize = LANGUAGE_LENGTH_MASK as usize;

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum NdefPayload {
    Text(TextPayload),
    Uri(String),
    Data(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct TextPayload {
    pub format: TextPayloadFormat,
    pub language: String,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum TextPayloadFormat {
    Utf8,
    Utf16,
}

/// URI prefix codes as defined in NFC Forum RTD URI specification
pub const URI_PREFIXES: &[&str] = &[
    "",                           // 0x00 - no prepending
    "http://www.",                // 0x01
    "https://www.",               // 0x02
    "http://",                    // 0x03
    "https://",                   // 0x04
    "tel:",                       // 0x05
    "mailto:",                    // 0x06
    "ftp://anonymous:anonymous@", // 0x07
    "ftp://ftp.",                 // 0x08
    "ftps://",                    // 0x09
    "sftp://",                    // 0x0A
    "smb://",                     // 0x0B
    "nfs://",                     // 0x0C
    "ftp://",                     // 0x0D
    "dav://",                     // 0x0E
    "news:",                      // 0x0F
    "telnet://",                  // 0x10
    "imap:",                      // 0x11
    "rtsp://",                    // 0x12
    "urn:",                       // 0x13
    "pop:",                       // 0x14
    "sip:",                       // 0x15
    "sips:",                      // 0x16
    "tftp:",                      // 0x17
    "btspp://",                   // 0x18
    "btl2cap://",                 // 0x19
    "btgoep://",                  // 0x1A
    "tcpobex://",                 // 0x1B
    "irdaobex://",                // 0x1C
    "file://",                    // 0x1D
    "urn:epc:id:",                // 0x1E
    "urn:epc:tag:",               // 0x1F
    "urn:epc:pat:",               // 0x20
    "urn:epc:raw:",               // 0x21
    "urn:epc:",                   // 0x22
    "urn:nfc:",                   // 0x23
];

impl TextPayload {
    pub fn utf8(language: impl Into<String>, text: impl Into<String>) -> Result<Self, NdefError> {
        let language = language.into();
        if language.is_empty() || language.len() > MAX_LANGUAGE_CODE_LENGTH {
            return Err(NdefError::InvalidLanguageCode(language.len() as u32));
        }

        Ok(Self {
            format: TextPayloadFormat::Utf8,
            language,
            text: text.into(),
        })
    }

    fn decode(bytes: &[u8]) -> Result<Self, NdefError> {
        let (&status, rest) = bytes
            .split_first()
            .ok_or_else(|| NdefError::Parse("text record has an empty payload".to_string()))?;

        let language_length = (status & LANGUAGE_LENGTH_MASK) as usize;
        if rest.len() < language_length {
            return Err(NdefError::Parse(format!(
                "text record language code is {language_length} bytes, only {} available",
                rest.len()
            )));
        }

        let (language, text) = rest.split_at(language_length);
        let language = String::from_utf8_lossy(language).to_string();

        if status & UTF16_FLAG == 0 {
            let text = String::from_utf8_lossy(text).to_string();
            return Ok(Self { format: TextPayloadFormat::Utf8, language, text });
        }

        Ok(Self { format: TextPayloadFormat::Utf16, language, text: decode_utf16(text) })
    }

    fn encode(&self) -> Result<Vec<u8>, NdefError> {
        let language = self.language.as_bytes();
        if language.len() > MAX_LANGUAGE_CODE_LENGTH {
            return Err(NdefError::InvalidLanguageCode(language.len() as u32));
        }

        let mut status = language.len() as u8;
        let text = match self.format {
            TextPayloadFormat::Utf8 => self.text.as_bytes().to_vec(),
            TextPayloadFormat::Utf16 => {
                status |= UTF16_FLAG;
                self.text.encode_utf16().flat_map(u16::to_be_bytes).collect()
            }
        };

        let mut bytes = Vec::with_capacity(1 + language.len() + text.len());
        bytes.push(status);
        bytes.extend_from_slice(language);
        bytes.extend_from_slice(&text);
        Ok(bytes)
    }
}

/// UTF-16 text defaults to big endian unless a byte order mark says otherwise
fn decode_utf16(bytes: &[u8]) -> String {
    let (bytes, little_endian) = match bytes {
        [0xFE, 0xFF, rest @ ..] => (rest, false),
        [0xFF, 0xFE, rest @ ..] => (rest, true),
        _ => (bytes, false),
    };

    let units = bytes
        .chunks_exact(2)
        .map(|chunk| {
            let pair = [chunk[0], chunk[1]];
            if little_endian { u16::from_le_bytes(pair) } else { u16::from_be_bytes(pair) }
        })
        .collect::<Vec<u16>>();

    String::from_utf16_lossy(&units)
}

impl NdefPayload {
    /// Decode the raw payload of a record, only well known text and uri records get decoded
    pub fn decode(is_well_known: bool, type_: &[u8], bytes: &[u8]) -> Result<Self, NdefError> {
        match (is_well_known, type_) {
            (true, b"T") => TextPayload::decode(bytes).map(Self::Text),
            (true, b"U") => decode_uri(bytes).map(Self::Uri),
            _ => Ok(Self::Data(bytes.to_vec())),
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, NdefError> {
        match self {
            Self::Text(text) => text.encode(),
            Self::Uri(uri) => Ok(encode_uri(uri)),
            Self::Data(data) => Ok(data.clone()),
        }
    }

    /// The human readable string of the payload, if it has one
    pub fn as_display_string(&self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text.text.clone()),
            Self::Uri(uri) => Some(uri.clone()),
            Self::Data(_) => None,
        }
    }
}

fn decode_uri(bytes: &[u8]) -> Result<String, NdefError> {
    let (&code, rest) = bytes
        .split_first()
        .ok_or_else(|| NdefError::Parse("uri record has an empty payload".to_string()))?;

    let prefix = URI_PREFIXES
        .get(code as usize)
        .ok_or_else(|| NdefError::Parse(format!("unknown uri identifier code {code:#04x}")))?;

    let rest = String::from_utf8_lossy(rest);
    Ok(format!("{prefix}{rest}"))
}

/// Picks the longest matching prefix so `https://www.` wins over `https://`
fn encode_uri(uri: &str) -> Vec<u8> {
    let (code, prefix) = URI_PREFIXES
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, prefix)| uri.starts_with(*prefix))
        .max_by_key(|(_, prefix)| prefix.len())
        .unwrap_or((0, &""));

    let rest = &uri.as_bytes()[prefix.len()..];

    let mut bytes = Vec::with_capacity(1 + rest.len());
    bytes.push(code as u8);
    bytes.extend_from_slice(rest);
    bytes
}
