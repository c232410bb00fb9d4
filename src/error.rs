/*
 * Error type shared by every fallible overlay operation.
 *
 * Only configuration problems surface as errors. Lookup misses, unsupported
 * properties and panicking user callbacks are handled where they occur (logged
 * and ignored), so they never appear here.
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OverlayError {
    /// A window, dialog, panel or component was declared without an id.
    #[error("{scope} id is required")]
    MissingId { scope: &'static str },

    /// The UI-owning thread could not be started or has already shut down.
    #[error("UI thread unavailable: {0}")]
    UiThreadGone(String),

    /// The native frame host reported a failure.
    #[error("frame host error: {0}")]
    Host(String),

    #[error("invalid layout document: {0}")]
    Layout(#[from] toml::de::Error),
}

#[cfg(target_os = "windows")]
impl From<windows::core::Error> for OverlayError {
    fn from(err: windows::core::Error) -> Self {
        OverlayError::Host(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OverlayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_id_names_the_scope() {
        let err = OverlayError::MissingId { scope: "window" };
        assert_eq!(err.to_string(), "window id is required");
    }

    #[test]
    fn toml_errors_convert_into_layout_errors() {
        let parse_err = toml::from_str::<toml::Value>("= nope").unwrap_err();
        let err: OverlayError = parse_err.into();
        assert!(matches!(err, OverlayError::Layout(_)));
    }
}
