//! Validated newtype wrappers for configuration values.
//!
//! Each wrapper validates its contents on construction so the transport never
//! has to re-check partner credentials or endpoints.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// A validated Shopee partner id.
///
/// # Example
///
/// ```rust
/// use shopee_sdk::PartnerId;
///
/// let id = PartnerId::new(12345).unwrap();
/// assert_eq!(id.get(), 12345);
/// assert_eq!(id.to_string(), "12345");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PartnerId(u64);

impl PartnerId {
    /// Creates a new partner id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPartnerId`] if the id is zero.
    pub fn new(id: u64) -> Result<Self, ConfigError> {
        if id == 0 {
            return Err(ConfigError::InvalidPartnerId {
                value: id.to_string(),
            });
        }
        Ok(Self(id))
    }

    /// Returns the raw numeric id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PartnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PartnerId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidPartnerId {
                value: s.to_string(),
            })?;
        Self::new(id)
    }
}

/// The secret partner key used to sign every request.
///
/// # Security
///
/// The `Debug` implementation masks the value so the key cannot leak through
/// logs or error reports.
///
/// ```rust
/// use shopee_sdk::PartnerKey;
///
/// let key = PartnerKey::new("my-secret").unwrap();
/// assert_eq!(format!("{:?}", key), "PartnerKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PartnerKey(String);

impl PartnerKey {
    /// Creates a new partner key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyPartnerKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyPartnerKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for PartnerKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PartnerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PartnerKey(*****)")
    }
}

/// A validated API base URL, stored without a trailing slash.
///
/// ```rust
/// use shopee_sdk::BaseUrl;
///
/// let url = BaseUrl::new("https://partner.shopeemobile.com/api/v2/").unwrap();
/// assert_eq!(url.as_ref(), "https://partner.shopeemobile.com/api/v2");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Creates a new base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] unless the value is an absolute
    /// `http://` or `https://` URL with a host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/');

        let rest = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"));
        match rest {
            Some(rest) if !rest.is_empty() && !rest.starts_with('/') && !rest.contains(' ') => {
                Ok(Self(trimmed.to_string()))
            }
            _ => Err(ConfigError::InvalidBaseUrl { url }),
        }
    }

    // Static gateway roots only.
    pub(crate) fn new_unchecked(url: &str) -> Self {
        Self(url.to_string())
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partner_id_rejects_zero() {
        assert!(matches!(
            PartnerId::new(0),
            Err(ConfigError::InvalidPartnerId { .. })
        ));
    }

    #[test]
    fn test_partner_id_parses_from_string() {
        let id: PartnerId = " 2001887 ".parse().unwrap();
        assert_eq!(id.get(), 2_001_887);
        assert!("not-a-number".parse::<PartnerId>().is_err());
    }

    #[test]
    fn test_partner_key_debug_is_masked() {
        let key = PartnerKey::new("super-secret").unwrap();
        let debug = format!("{key:?}");
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_partner_key_rejects_empty() {
        assert_eq!(PartnerKey::new(""), Err(ConfigError::EmptyPartnerKey));
    }

    #[test]
    fn test_base_url_strips_trailing_slash() {
        let url = BaseUrl::new("http://127.0.0.1:8080/").unwrap();
        assert_eq!(url.as_ref(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_base_url_rejects_relative_and_schemeless() {
        assert!(BaseUrl::new("partner.shopeemobile.com").is_err());
        assert!(BaseUrl::new("/api/v2").is_err());
        assert!(BaseUrl::new("https://").is_err());
        assert!(BaseUrl::new("ftp://example.com").is_err());
    }
}
