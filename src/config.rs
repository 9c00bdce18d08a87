use serde::{Deserialize, Serialize};
use suivi_macros::impl_default_for;
use suivi_ndef::payload::MAX_LANGUAGE_CODE_LENGTH;
use suivi_util::result_ext::ResultExt as _;

pub const DEFAULT_LANGUAGE_CODE: &str = "en";
pub const DEFAULT_PLACEHOLDER_TEXT: &str = "NFC Data will appear here";

#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error, uniffi::Error)]
pub enum NfcConfigError {
    #[error("unable to parse config: {0}")]
    Parse(String),

    #[error("invalid language code {0:?}, must be between 1 and 63 bytes")]
    InvalidLanguageCode(String),
}

type Error = NfcConfigError;
type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Record)]
#[serde(default)]
pub struct NfcConfig {
    /// Language code stored in the text records written to tags
    pub language_code: String,

    /// Text shown before anything was scanned, and after a reset
    pub placeholder_text: String,
}

impl_default_for!(NfcConfig);
impl NfcConfig {
    pub fn new() -> Self {
        Self {
            language_code: DEFAULT_LANGUAGE_CODE.to_string(),
            placeholder_text: DEFAULT_PLACEHOLDER_TEXT.to_string(),
        }
    }

    /// Parse a config, fields that are missing use their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err_str(NfcConfigError::Parse)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let language_length = self.language_code.len();
        if language_length == 0 || language_length > MAX_LANGUAGE_CODE_LENGTH {
            return Err(NfcConfigError::InvalidLanguageCode(self.language_code.clone()));
        }

        Ok(())
    }
}

mod ffi {
    use super::*;

    #[uniffi::export]
    fn default_nfc_config() -> NfcConfig {
        NfcConfig::new()
    }

    #[uniffi::export]
    fn nfc_config_from_json(json: String) -> Result<NfcConfig> {
        NfcConfig::from_json(&json)
    }
}
