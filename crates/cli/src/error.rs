//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: core error (bad params, kernel/export failure)
//! - 11: I/O error (file write)
//! - 12: input error (bad palette name, bad color list, bad pattern)
//! - 13: serialization error

use camo_core::CamoError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
pub enum CliError {
    /// A core-level error (invalid params, evaluation or export failure).
    Core(CamoError),
    /// An I/O error (file write).
    Io(String),
    /// A user input error (bad preset name, malformed color list).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Core(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Core(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<CamoError> for CliError {
    fn from(e: CamoError) -> Self {
        match e {
            CamoError::Io(msg) => CliError::Io(msg),
            CamoError::UnknownPreset(_)
            | CamoError::UnknownPattern(_)
            | CamoError::InvalidColor(_) => CliError::Input(e.to_string()),
            other => CliError::Core(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
