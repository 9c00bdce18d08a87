use std::fmt::Display;

pub trait ResultExt<T, InitialError> {
    /// Map an error into an error variant that carries the original error's description
    ///
    /// Platform errors cross the FFI boundary as strings, this keeps the `map_err(|e| e.to_string())`
    /// noise out of the call sites.
    ///
    /// # Example
    /// ```rust
    /// use suivi_util::result_ext::ResultExt;
    ///
    /// #[derive(Debug, thiserror::Error)]
    /// enum TagError {
    ///     #[error("tag io error: {0}")]
    ///     Io(String),
    /// }
    ///
    /// fn read_dump() -> Result<String, TagError> {
    ///     std::fs::read_to_string("missing-tag-dump.bin").map_err_str(TagError::Io)
    /// }
    ///
    /// assert!(read_dump().is_err());
    /// ```
    fn map_err_str<FinalError, F>(self, f: F) -> Result<T, FinalError>
    where
        InitialError: Display,
        F: FnOnce(String) -> FinalError;
}

impl<Type, InitialError> ResultExt<Type, InitialError> for Result<Type, InitialError> {
    fn map_err_str<FinalError, F>(self, f: F) -> Result<Type, FinalError>
    where
        InitialError: Display,
        F: FnOnce(String) -> FinalError,
    {
        self.map_err(|e| f(e.to_string()))
    }
}
