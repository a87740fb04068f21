//! Configuration error types for the Shopee SDK.
//!
//! All configuration constructors return `Result<T, ConfigError>` so invalid
//! values are rejected before any request is built.
//!
//! # Example
//!
//! ```rust
//! use shopee_sdk::{ConfigError, PartnerKey};
//!
//! let result = PartnerKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyPartnerKey)));
//! ```

use thiserror::Error;

/// Errors that can occur while building or mutating SDK configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Partner id must be a positive integer.
    #[error("Invalid partner id '{value}'. Expected a positive integer issued by the Shopee Open Platform.")]
    InvalidPartnerId {
        /// The rejected value.
        value: String,
    },

    /// Partner key cannot be empty.
    #[error("Partner key cannot be empty. Please provide the key issued with your partner id.")]
    EmptyPartnerKey,

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Expected an absolute http(s) URL such as 'https://partner.shopeemobile.com/api/v2'.")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
    },

    /// Region name is not recognized.
    #[error("Unknown region '{region}'. Expected one of: global, china, brazil, test_global, test_china.")]
    UnknownRegion {
        /// The rejected region name.
        region: String,
    },

    /// A numeric identifier could not be parsed.
    #[error("Invalid {field} '{value}'. Expected an unsigned integer.")]
    InvalidIdentifier {
        /// The name of the field being parsed.
        field: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The configuration lock was poisoned by a panicking writer.
    #[error("Configuration is unavailable because a previous update panicked.")]
    Poisoned,
}
