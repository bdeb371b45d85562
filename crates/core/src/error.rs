//! Error types for the camo-engine core.

use thiserror::Error;

/// Errors produced by pattern evaluation and export operations.
#[derive(Debug, Error)]
pub enum CamoError {
    /// Width or height was zero when creating a surface.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A `PatternParams` field was outside its documented domain.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A palette could not be constructed from the given colors.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// A palette preset name was not recognized.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// A pattern kind name was not recognized.
    #[error("unknown pattern: {0}")]
    UnknownPattern(String),

    /// A sequence export was requested while another was in flight.
    #[error("a sequence export is already in progress")]
    ExportInProgress,

    /// The export's cancellation flag was raised between frames.
    #[error("sequence export cancelled")]
    ExportCancelled,

    /// A frame or the output container failed to encode. The partial
    /// output is discarded.
    #[error("encoding failed: {0}")]
    Encode(String),

    /// An I/O failure while writing exported bytes.
    #[error("i/o error: {0}")]
    Io(String),
}

impl CamoError {
    /// Convenience constructor for domain violations found by `validate()`.
    pub fn invalid_param(name: &str, reason: impl Into<String>) -> Self {
        CamoError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_displays_readable_message() {
        let err = CamoError::InvalidDimensions;
        let msg = format!("{err}");
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
    }

    #[test]
    fn invalid_parameter_includes_name_and_reason() {
        let err = CamoError::invalid_param("scale", "must be positive");
        let msg = format!("{err}");
        assert!(msg.contains("scale"), "missing name in: {msg}");
        assert!(msg.contains("must be positive"), "missing reason in: {msg}");
    }

    #[test]
    fn invalid_color_includes_message() {
        let err = CamoError::InvalidColor("bad hex".into());
        assert!(format!("{err}").contains("bad hex"));
    }

    #[test]
    fn unknown_preset_includes_name() {
        let err = CamoError::UnknownPreset("tundra".into());
        assert!(format!("{err}").contains("tundra"));
    }

    #[test]
    fn unknown_pattern_includes_name() {
        let err = CamoError::UnknownPattern("plaid".into());
        assert!(format!("{err}").contains("plaid"));
    }

    #[test]
    fn encode_error_includes_message() {
        let err = CamoError::Encode("frame 3 too large".into());
        assert!(format!("{err}").contains("frame 3"));
    }

    #[test]
    fn camo_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CamoError>();
    }

    #[test]
    fn camo_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<CamoError>();
    }
}
