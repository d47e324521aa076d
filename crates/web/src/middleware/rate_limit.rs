use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::WebError;

/// Fixed-window in-memory request counter, keyed by client IP.
///
/// State lives in this process only: counters reset on restart and are not
/// shared across instances. This gates the public certificate search, not
/// anything security-sensitive.
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    windows: Mutex<HashMap<String, Window>>,
}

struct Window {
    started: Instant,
    count: u32,
}

pub enum Decision {
    Allowed,
    Limited { retry_after: u64 },
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    pub fn check(&self, key: &str) -> Decision {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: &str, now: Instant) -> Decision {
        let mut windows = self.windows.lock().expect("rate limiter lock poisoned");

        let window = windows.entry(key.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.duration_since(window.started) >= self.window {
            window.started = now;
            window.count = 0;
        }

        if window.count < self.max_requests {
            window.count += 1;
            Decision::Allowed
        } else {
            let elapsed = now.duration_since(window.started);
            let remaining = self.window.saturating_sub(elapsed);
            Decision::Limited {
                retry_after: remaining.as_secs().max(1),
            }
        }
    }
}

/// First hop of `x-forwarded-for`, or a shared bucket when absent.
fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

pub async fn enforce(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let key = client_key(request.headers());

    match limiter.check(&key) {
        Decision::Allowed => next.run(request).await,
        Decision::Limited { retry_after } => {
            tracing::warn!(client = %key, "certificate search rate limit hit");
            WebError::RateLimited { retry_after }.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_up_to_max_requests_in_window() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        let now = Instant::now();

        for _ in 0..3 {
            assert!(matches!(limiter.check_at("1.2.3.4", now), Decision::Allowed));
        }
        assert!(matches!(
            limiter.check_at("1.2.3.4", now),
            Decision::Limited { .. }
        ));
    }

    #[test]
    fn test_limited_reports_positive_retry_after() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        let now = Instant::now();

        limiter.check_at("1.2.3.4", now);
        match limiter.check_at("1.2.3.4", now + Duration::from_secs(10)) {
            Decision::Limited { retry_after } => assert!((1..=60).contains(&retry_after)),
            Decision::Allowed => panic!("expected limit"),
        }
    }

    #[test]
    fn test_window_resets_after_expiry() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        let now = Instant::now();

        limiter.check_at("1.2.3.4", now);
        assert!(matches!(
            limiter.check_at("1.2.3.4", now),
            Decision::Limited { .. }
        ));
        assert!(matches!(
            limiter.check_at("1.2.3.4", now + Duration::from_secs(61)),
            Decision::Allowed
        ));
    }

    #[test]
    fn test_keys_are_counted_independently() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        let now = Instant::now();

        limiter.check_at("1.2.3.4", now);
        assert!(matches!(limiter.check_at("5.6.7.8", now), Decision::Allowed));
    }

    #[test]
    fn test_client_key_takes_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "203.0.113.9, 10.0.0.1".parse().unwrap());
        assert_eq!(client_key(&headers), "203.0.113.9");

        assert_eq!(client_key(&HeaderMap::new()), "unknown");
    }
}
