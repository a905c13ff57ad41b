//! Rate limiting middleware using governor and `tower_governor`.
//!
//! Limits are applied per client IP to the `/api` routes. Rejections are
//! rewritten into the service's JSON error shape by [`rate_limit_response`].

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::extract::ConnectInfo;
use axum::http::header::RETRY_AFTER;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use tower_governor::{GovernorError, GovernorLayer, governor::GovernorConfigBuilder};

use crate::config::RateLimitConfig;
use crate::error::AppError;

// =============================================================================
// Client IP Key Extractor
// =============================================================================

/// Key extractor that prefers proxy headers and falls back to the socket peer.
///
/// Order: `X-Forwarded-For` (first IP in the chain), `X-Real-IP`, then the
/// `ConnectInfo<SocketAddr>` set by `into_make_service_with_connect_info`.
/// Requests with none of these (router served without connect info, or
/// driven in-process) share the [`UNKNOWN_CLIENT`] bucket.
#[derive(Clone, Copy)]
pub struct ClientIpKeyExtractor;

/// Key for requests whose client address cannot be determined.
pub const UNKNOWN_CLIENT: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

impl tower_governor::key_extractor::KeyExtractor for ClientIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        let headers = req.headers();

        if let Some(ip) = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.split(',').next())
            .and_then(|s| s.trim().parse::<IpAddr>().ok())
        {
            return Ok(ip);
        }

        if let Some(ip) = headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<IpAddr>().ok())
        {
            return Ok(ip);
        }

        Ok(req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map_or(UNKNOWN_CLIENT, |ConnectInfo(addr)| addr.ip()))
    }
}

// =============================================================================
// Rate Limiter Configuration
// =============================================================================

/// Rate limiter layer type for Axum.
pub type RateLimiterLayer =
    GovernorLayer<ClientIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Create the per-IP rate limiter for the `/api` routes.
///
/// Returns `None` when rate limiting is disabled or the settings are
/// rejected by `GovernorConfigBuilder` (zero period or burst).
#[must_use]
pub fn api_rate_limiter(config: &RateLimitConfig) -> Option<RateLimiterLayer> {
    if !config.enabled {
        return None;
    }

    let governor = GovernorConfigBuilder::default()
        .key_extractor(ClientIpKeyExtractor)
        .per_second(config.per_second)
        .burst_size(config.burst_size)
        .finish()?;

    Some(GovernorLayer::new(Arc::new(governor)))
}

/// Rewrite a rate limiter rejection as an [`AppError::RateLimited`] response.
///
/// Keeps `Retry-After` and `x-ratelimit-*` headers from the original
/// rejection. Any other response passes through untouched.
pub async fn rate_limit_response(response: Response) -> Response {
    if response.status() != StatusCode::TOO_MANY_REQUESTS {
        return response;
    }

    let carried: Vec<_> = response
        .headers()
        .iter()
        .filter(|(name, _)| **name == RETRY_AFTER || name.as_str().starts_with("x-ratelimit"))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();

    let mut rewritten = AppError::RateLimited.into_response();
    rewritten.headers_mut().extend(carried);
    rewritten
}
