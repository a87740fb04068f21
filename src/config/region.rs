//! Shopee Open Platform regions.
//!
//! Each region is served by its own gateway; [`Region::base_url`] returns the
//! `/api/v2` root used when no explicit base URL is configured.

use crate::config::BaseUrl;
use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// A Shopee Open Platform deployment.
///
/// # Example
///
/// ```rust
/// use shopee_sdk::Region;
///
/// let region: Region = "china".parse().unwrap();
/// assert_eq!(region, Region::China);
/// assert_eq!(region.base_url_str(), "https://openplatform.shopee.cn/api/v2");
/// assert!(!region.is_sandbox());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Region {
    /// Global live environment.
    #[default]
    Global,
    /// Mainland China live environment.
    China,
    /// Brazil live environment.
    Brazil,
    /// Global sandbox.
    TestGlobal,
    /// Mainland China sandbox.
    TestChina,
}

impl Region {
    /// Returns every known region.
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::Global,
            Self::China,
            Self::Brazil,
            Self::TestGlobal,
            Self::TestChina,
        ]
    }

    /// Returns the gateway root for this region as a string.
    #[must_use]
    pub const fn base_url_str(self) -> &'static str {
        match self {
            Self::Global => "https://partner.shopeemobile.com/api/v2",
            Self::China => "https://openplatform.shopee.cn/api/v2",
            Self::Brazil => "https://openplatform.shopee.com.br/api/v2",
            Self::TestGlobal => "https://partner.test-stable.shopeemobile.com/api/v2",
            Self::TestChina => "https://openplatform.test-stable.shopee.cn/api/v2",
        }
    }

    /// Returns the gateway root for this region.
    #[must_use]
    pub fn base_url(self) -> BaseUrl {
        BaseUrl::new_unchecked(self.base_url_str())
    }

    /// Returns `true` for sandbox environments.
    #[must_use]
    pub const fn is_sandbox(self) -> bool {
        matches!(self, Self::TestGlobal | Self::TestChina)
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::China => "china",
            Self::Brazil => "brazil",
            Self::TestGlobal => "test_global",
            Self::TestChina => "test_china",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::all()
            .into_iter()
            .find(|region| region.as_str() == normalized)
            .ok_or_else(|| ConfigError::UnknownRegion {
                region: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_round_trips_through_display() {
        for region in Region::all() {
            let parsed: Region = region.to_string().parse().unwrap();
            assert_eq!(parsed, region);
        }
    }

    #[test]
    fn test_region_parse_accepts_dashes_and_case() {
        assert_eq!("Test-Global".parse::<Region>().unwrap(), Region::TestGlobal);
    }

    #[test]
    fn test_unknown_region_is_rejected() {
        assert!(matches!(
            "mars".parse::<Region>(),
            Err(ConfigError::UnknownRegion { .. })
        ));
    }

    #[test]
    fn test_region_base_urls_are_valid() {
        for region in Region::all() {
            let checked = BaseUrl::new(region.base_url_str()).unwrap();
            assert_eq!(checked, region.base_url());
        }
    }

    #[test]
    fn test_default_region_is_global_live() {
        assert_eq!(Region::default(), Region::Global);
        assert!(!Region::default().is_sandbox());
        assert!(Region::TestChina.is_sandbox());
    }
}
