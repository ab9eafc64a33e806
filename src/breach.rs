//! Breach lookup collaborator
//!
//! The scorer only consumes a `breached` flag. This module is how a host
//! obtains it: a k-anonymity range lookup (only the first five hex chars of
//! the SHA-1 digest leave the process) wrapped in a soft-failing check.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use thiserror::Error;

/// Length of the hash prefix sent to the range endpoint.
pub const PREFIX_LEN: usize = 5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BreachError {
    #[error("Breach lookup failed: {0}")]
    Network(String),
    #[error("Breach lookup returned status {0}")]
    Status(u16),
}

/// What the host component learns from a breach lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BreachCheckResult {
    pub breached: bool,
    /// Approximate number of times the password appeared in breaches
    pub count: u64,
    /// Whether the lookup failed (and `breached` is only a fallback)
    pub error: bool,
}

impl BreachCheckResult {
    pub fn from_count(count: u64) -> Self {
        Self {
            breached: count > 0,
            count,
            error: false,
        }
    }

    pub fn failed() -> Self {
        Self {
            breached: false,
            count: 0,
            error: true,
        }
    }
}

/// Looks up how often a password appeared in known breaches.
#[async_trait]
pub trait BreachChecker: Send + Sync {
    /// Breach count for `password`; 0 when not found.
    async fn check(&self, password: &SecretString) -> Result<u64, BreachError>;
}

/// Fetches the raw `SUFFIX:COUNT` listing for a hash prefix.
#[async_trait]
pub trait RangeSource: Send + Sync {
    async fn fetch_range(&self, prefix: &str) -> Result<String, BreachError>;
}

/// SHA-1 digest of a password split for a range query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeQuery {
    pub prefix: String,
    pub suffix: String,
}

impl RangeQuery {
    pub fn for_password(password: &SecretString) -> Self {
        let digest = Sha1::digest(password.expose_secret().as_bytes());
        let mut hash = hex::encode_upper(digest);
        let suffix = hash.split_off(PREFIX_LEN);
        Self {
            prefix: hash,
            suffix,
        }
    }
}

/// Finds `suffix` in a range listing and returns its count.
///
/// Lines that are not `SUFFIX:COUNT` are skipped. A matching suffix whose
/// count cannot be read still counts as breached (count 1).
pub fn find_suffix_count(body: &str, suffix: &str) -> Option<u64> {
    for line in body.lines() {
        let Some((hash_suffix, count)) = line.trim().split_once(':') else {
            continue;
        };
        if !hash_suffix.trim().eq_ignore_ascii_case(suffix) {
            continue;
        }
        return match count.trim().parse::<u64>() {
            Ok(count) => Some(count),
            Err(_) => {
                #[cfg(feature = "tracing")]
                tracing::warn!("Unreadable breach count {:?}, assuming breached", count.trim());
                Some(1)
            }
        };
    }
    None
}

/// Breach checker built on any range source.
pub struct KAnonymityChecker<S> {
    source: S,
}

impl<S: RangeSource> KAnonymityChecker<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

#[async_trait]
impl<S: RangeSource> BreachChecker for KAnonymityChecker<S> {
    async fn check(&self, password: &SecretString) -> Result<u64, BreachError> {
        let query = RangeQuery::for_password(password);
        let body = self.source.fetch_range(&query.prefix).await?;
        Ok(find_suffix_count(&body, &query.suffix).unwrap_or(0))
    }
}

/// Runs a breach lookup that never fails and never blocks past `timeout`.
///
/// Any lookup error or timeout yields `breached = false` with `error` set.
#[cfg(feature = "async")]
pub async fn check_breach_soft(
    checker: &dyn BreachChecker,
    password: &SecretString,
    timeout: std::time::Duration,
) -> BreachCheckResult {
    match tokio::time::timeout(timeout, checker.check(password)).await {
        Ok(Ok(count)) => BreachCheckResult::from_count(count),
        Ok(Err(_e)) => {
            #[cfg(feature = "tracing")]
            tracing::warn!("Breach lookup failed, treating as not breached: {}", _e);
            BreachCheckResult::failed()
        }
        Err(_) => {
            #[cfg(feature = "tracing")]
            tracing::warn!("Breach lookup timed out after {:?}", timeout);
            BreachCheckResult::failed()
        }
    }
}

/// [`check_breach_soft`] bounded by the configured `ANES_BREACH_TIMEOUT_MS`.
#[cfg(feature = "async")]
pub async fn check_breach_with_config(
    checker: &dyn BreachChecker,
    password: &SecretString,
    config: &crate::config::Config,
) -> BreachCheckResult {
    check_breach_soft(checker, password, config.breach_timeout).await
}

/// Range source backed by the Have I Been Pwned passwords API.
#[cfg(feature = "http")]
pub struct HibpClient {
    client: reqwest::Client,
    base_url: String,
}

#[cfg(feature = "http")]
impl HibpClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.pwnedpasswords.com";

    pub fn new() -> Self {
        Self::with_base_url(Self::DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[cfg(feature = "http")]
impl Default for HibpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl RangeSource for HibpClient {
    async fn fetch_range(&self, prefix: &str) -> Result<String, BreachError> {
        let response = self
            .client
            .get(format!("{}/range/{prefix}", self.base_url))
            // padding hides the real response length
            .header("Add-Padding", "true")
            .send()
            .await
            .map_err(|e| BreachError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BreachError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| BreachError::Network(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    struct StaticRange(Result<String, BreachError>);

    #[async_trait]
    impl RangeSource for StaticRange {
        async fn fetch_range(&self, _prefix: &str) -> Result<String, BreachError> {
            self.0.clone()
        }
    }

    #[test]
    fn test_range_query_split() {
        // SHA-1("password") = 5BAA61E4C9B93F3F0682250B6CF8331B7EE68FD8
        let query = RangeQuery::for_password(&secret("password"));
        assert_eq!(query.prefix, "5BAA6");
        assert_eq!(query.suffix, "1E4C9B93F3F0682250B6CF8331B7EE68FD8");
    }

    #[test]
    fn test_find_suffix_count() {
        let body = "0018A45C4D1DEF81644B54AB7F969B88D65:1\r\n\
                    1E4C9B93F3F0682250B6CF8331B7EE68FD8:9545824\r\n\
                    011053FD0102E94D6AE2F8B83D76FAF94F6:0\r\n";
        assert_eq!(
            find_suffix_count(body, "1E4C9B93F3F0682250B6CF8331B7EE68FD8"),
            Some(9545824)
        );
        assert_eq!(find_suffix_count(body, "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"), None);
    }

    #[test]
    fn test_find_suffix_count_skips_unparseable_lines() {
        let body = "garbage-line-without-colon\r\n\
                    \r\n\
                    1E4C9B93F3F0682250B6CF8331B7EE68FD8:9545824\r\n";
        assert_eq!(
            find_suffix_count(body, "1E4C9B93F3F0682250B6CF8331B7EE68FD8"),
            Some(9545824)
        );
        assert_eq!(find_suffix_count("not a range line", "ABC"), None);
    }

    #[test]
    fn test_find_suffix_count_unreadable_count_is_breached() {
        let body = "1E4C9B93F3F0682250B6CF8331B7EE68FD8:lots\n";
        assert_eq!(find_suffix_count(body, "1E4C9B93F3F0682250B6CF8331B7EE68FD8"), Some(1));
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_soft_check_finds_breach_after_garbage_line() {
        let checker = KAnonymityChecker::new(StaticRange(Ok(
            "garbage-line-without-colon\r\n1E4C9B93F3F0682250B6CF8331B7EE68FD8:12\r\n".to_string(),
        )));
        let result =
            check_breach_soft(&checker, &secret("password"), std::time::Duration::from_secs(1)).await;
        assert!(result.breached);
        assert_eq!(result.count, 12);
    }

    #[tokio::test]
    async fn test_k_anonymity_checker_found() {
        let checker = KAnonymityChecker::new(StaticRange(Ok(
            "1E4C9B93F3F0682250B6CF8331B7EE68FD8:42\n".to_string(),
        )));
        assert_eq!(checker.check(&secret("password")).await, Ok(42));
    }

    #[tokio::test]
    async fn test_k_anonymity_checker_not_found() {
        let checker = KAnonymityChecker::new(StaticRange(Ok(
            "0018A45C4D1DEF81644B54AB7F969B88D65:3\n".to_string(),
        )));
        assert_eq!(checker.check(&secret("password")).await, Ok(0));
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_soft_check_reports_breach() {
        let checker = KAnonymityChecker::new(StaticRange(Ok(
            "1E4C9B93F3F0682250B6CF8331B7EE68FD8:7\n".to_string(),
        )));
        let result =
            check_breach_soft(&checker, &secret("password"), std::time::Duration::from_secs(1)).await;
        assert_eq!(result, BreachCheckResult::from_count(7));
        assert!(result.breached);
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_soft_check_swallows_errors() {
        let checker = KAnonymityChecker::new(StaticRange(Err(BreachError::Status(503))));
        let result =
            check_breach_soft(&checker, &secret("password"), std::time::Duration::from_secs(1)).await;
        assert_eq!(result, BreachCheckResult::failed());
    }

    #[cfg(feature = "async")]
    #[tokio::test(start_paused = true)]
    async fn test_soft_check_times_out() {
        struct Stalled;

        #[async_trait]
        impl BreachChecker for Stalled {
            async fn check(&self, _password: &SecretString) -> Result<u64, BreachError> {
                tokio::time::sleep(std::time::Duration::from_secs(60)).await;
                Ok(1)
            }
        }

        let result =
            check_breach_soft(&Stalled, &secret("password"), std::time::Duration::from_millis(50)).await;
        assert!(!result.breached);
        assert!(result.error);

        let config = crate::config::Config {
            breach_timeout: std::time::Duration::from_millis(200),
            ..Default::default()
        };
        let result = check_breach_with_config(&Stalled, &secret("password"), &config).await;
        assert_eq!(result, BreachCheckResult::failed());
    }
}
