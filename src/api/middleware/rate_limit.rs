//! Rate limiting middleware using token bucket algorithm.
//!
//! Buckets are keyed per client IP. Behind a trusted reverse proxy the key
//! comes from `X-Forwarded-For` / `X-Real-IP` / `Forwarded`; otherwise from
//! the socket peer address, so the server must be started with
//! `into_make_service_with_connect_info::<SocketAddr>()`.

use std::sync::Arc;

use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Quota presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Redirects and tracking calls from landing pages.
    ///
    /// One token every 2 seconds, burst of 100.
    Public,
    /// Authenticated dashboard API.
    ///
    /// One token per second, burst of 30.
    Api,
}

impl Tier {
    /// `(seconds per replenished token, burst size)`
    fn quota(self) -> (u64, u32) {
        match self {
            Tier::Public => (2, 100),
            Tier::Api => (1, 30),
        }
    }
}

/// Wraps `router` in a per-IP rate limiter.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Example
///
/// ```rust,ignore
/// let public = rate_limit::apply(public_routes(), Tier::Public, config.behind_proxy);
/// ```
pub fn apply<S>(router: Router<S>, tier: Tier, behind_proxy: bool) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    if behind_proxy {
        match layer(tier, SmartIpKeyExtractor) {
            Some(layer) => router.layer(layer),
            None => router,
        }
    } else {
        match layer(tier, PeerIpKeyExtractor) {
            Some(layer) => router.layer(layer),
            None => router,
        }
    }
}

fn layer<K>(
    tier: Tier,
    extractor: K,
) -> Option<GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>>
where
    K: KeyExtractor,
{
    let (per_second, burst) = tier.quota();

    let Some(conf) = GovernorConfigBuilder::default()
        .per_second(per_second)
        .burst_size(burst)
        .key_extractor(extractor)
        .finish()
    else {
        tracing::error!(?tier, "Invalid rate limit quota, limiter disabled");
        return None;
    };

    Some(GovernorLayer::new(Arc::new(conf)))
}
