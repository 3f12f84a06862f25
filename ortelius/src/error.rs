//! Error types used by the crate.

use thiserror::Error;

/// Ortelius error type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrteliusError {
    /// A base layer kind in the configuration is not one of the supported kinds.
    #[error("unknown base layer kind: {0}")]
    UnknownLayerKind(String),
    /// A control kind in the configuration is not one of the supported kinds.
    #[error("unknown control kind: {0}")]
    UnknownControlKind(String),
    /// The option bag of a control could not be interpreted for its kind.
    #[error("invalid options for control {kind}: {reason}")]
    InvalidControlOptions {
        /// Kind of the control the options were given for.
        kind: String,
        /// Why the options were rejected.
        reason: String,
    },
    /// The device does not support geolocation.
    #[error("the device does not support geolocation")]
    GeolocationUnsupported,
    /// The platform geolocation service reported a failure.
    #[error("failed to get position{}", format_failure(.code, .message))]
    GeolocationFailed {
        /// Numeric error code reported by the platform, if any.
        code: Option<i32>,
        /// Error message reported by the platform, if any.
        message: Option<String>,
    },
}

fn format_failure(code: &Option<i32>, message: &Option<String>) -> String {
    let mut out = String::new();
    if let Some(code) = code {
        out.push_str(&format!(" (code {code})"));
    }
    if let Some(message) = message {
        out.push_str(&format!(": {message}"));
    }
    out
}
