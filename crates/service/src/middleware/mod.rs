//! HTTP middleware stack for the customer service.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (`http_request` span per request)
//! 3. Request ID (add unique ID to each request, record it on the span)
//! 4. Security headers
//! 5. Rate limiting (governor), `/api` routes only

pub mod rate_limit;
pub mod request_id;
pub mod security_headers;

pub use rate_limit::{api_rate_limiter, rate_limit_response};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use security_headers::security_headers_middleware;
