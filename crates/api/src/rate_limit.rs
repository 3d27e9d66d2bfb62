//! Rate Limiting for the Classify Endpoint
//!
//! Per-IP limiting using the Generic Cell Rate Algorithm (GCRA). The
//! quota depends on how the classifier is deployed: with an oracle
//! configured every classify call may spend a paid model request, so
//! the budget is tight; keyword-only classification is pure CPU and
//! gets a generous one.

use governor::middleware::StateInformationMiddleware;
use std::sync::Arc;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;

/// Governor config keyed on peer IP, with X-RateLimit-* headers
pub type ClassifyGovernorConfig =
    tower_governor::governor::GovernorConfig<PeerIpKeyExtractor, StateInformationMiddleware>;

/// Rate limiting configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Seconds until one request is replenished
    pub replenish_secs: u64,
    /// Burst size (max requests that can be made immediately)
    pub burst_size: u32,
}

impl RateLimitConfig {
    /// Quota when an oracle is configured: classify fans out to a
    /// paid model call
    pub fn oracle_backed() -> Self {
        Self {
            replenish_secs: 5,
            burst_size: 3,
        }
    }

    /// Quota for keyword-only deployments: classification is local
    /// regex evaluation
    pub fn keyword_only() -> Self {
        Self {
            replenish_secs: 1,
            burst_size: 20,
        }
    }

    /// Pick the quota matching the classifier deployment
    pub fn for_classifier(oracle_configured: bool) -> Self {
        if oracle_configured {
            Self::oracle_backed()
        } else {
            Self::keyword_only()
        }
    }
}

/// Create the governor config for the classify route.
///
/// Uses PeerIpKeyExtractor, so the service must be served via
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn create_governor_config(config: &RateLimitConfig) -> Arc<ClassifyGovernorConfig> {
    Arc::new(
        GovernorConfigBuilder::default()
            .per_second(config.replenish_secs)
            .burst_size(config.burst_size)
            .use_headers() // X-RateLimit-After, X-RateLimit-Limit, X-RateLimit-Remaining
            .finish()
            .unwrap(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_follows_oracle_presence() {
        assert_eq!(
            RateLimitConfig::for_classifier(true),
            RateLimitConfig::oracle_backed()
        );
        assert_eq!(
            RateLimitConfig::for_classifier(false),
            RateLimitConfig::keyword_only()
        );
    }

    #[test]
    fn test_oracle_quota_is_tighter() {
        let oracle = RateLimitConfig::oracle_backed();
        let keyword = RateLimitConfig::keyword_only();
        assert!(oracle.replenish_secs > keyword.replenish_secs);
        assert!(oracle.burst_size < keyword.burst_size);
    }

    #[test]
    fn test_create_governor_config() {
        let governor = create_governor_config(&RateLimitConfig::oracle_backed());
        assert!(Arc::strong_count(&governor) > 0);
    }
}
