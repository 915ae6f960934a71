//! Exit codes for the CLI
//!
//! Usage errors are reported by clap, which exits with 2.

use tagship_core::error::{ConfigError, GitError, TagshipError};

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 3;

/// Git error
pub const GIT_ERROR: i32 = 4;

/// Version error
pub const VERSION_ERROR: i32 = 5;

/// Repository not ready for release
pub const PRECONDITION_FAILED: i32 = 6;

/// External command failed
pub const COMMAND_FAILED: i32 = 7;

/// Registry adapter or release workspace error
pub const PUBLISH_ERROR: i32 = 8;

/// User cancelled
pub const CANCELLED: i32 = 130;

/// Exit code for a release error
pub fn for_error(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<TagshipError>() {
            return for_tagship_error(e);
        }
        if cause.downcast_ref::<ConfigError>().is_some() {
            return CONFIG_ERROR;
        }
        if cause.downcast_ref::<GitError>().is_some() {
            return GIT_ERROR;
        }
    }
    ERROR
}

fn for_tagship_error(err: &TagshipError) -> i32 {
    match err {
        TagshipError::Config(_) => CONFIG_ERROR,
        TagshipError::Git(_) => GIT_ERROR,
        TagshipError::Version(_) => VERSION_ERROR,
        TagshipError::Precondition(_) => PRECONDITION_FAILED,
        TagshipError::Command(_) => COMMAND_FAILED,
        TagshipError::Adapter(_) => PUBLISH_ERROR,
        _ if err.is_cancelled() => CANCELLED,
        _ => ERROR,
    }
}
