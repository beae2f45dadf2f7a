use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, SystemTime};

pub const MIN_PASSWORD_LEN: usize = 3;

/// Simple in-memory rate limiter keyed by caller-chosen strings
/// ("login:<ip>").
pub struct RateLimiter {
    requests: Mutex<HashMap<String, Vec<SystemTime>>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(HashMap::new()),
        }
    }

    /// Returns true while the caller stays under `max_requests` within
    /// the sliding `window`.
    pub fn check_rate_limit(&self, key: &str, max_requests: usize, window: Duration) -> bool {
        let now = SystemTime::now();
        let mut requests = self
            .requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let entry = requests.entry(key.to_string()).or_default();

        entry.retain(|&time| {
            now.duration_since(time).unwrap_or(Duration::from_secs(0)) < window
        });

        if entry.len() >= max_requests {
            return false;
        }

        entry.push(now);

        // Drop empty entries so the map cannot grow without bound.
        requests.retain(|_, times| !times.is_empty());

        true
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

/// Shape check only: something@something.tld, within sane lengths. Real
/// deliverability is not this layer's problem.
pub fn validate_email(email: &str) -> bool {
    let email = email.trim();

    if email.is_empty() || email.len() > 254 {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || local.len() > 64 || domain.is_empty() {
        return false;
    }
    if local.contains(char::is_whitespace) || domain.contains(char::is_whitespace) {
        return false;
    }

    domain.contains('.') && !domain.contains('@')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(validate_email("admin@polleria-uripa.pe"));
        assert!(validate_email("  user@example.com  "));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!validate_email(""));
        assert!(!validate_email("no-at-sign.com"));
        assert!(!validate_email("@example.com"));
        assert!(!validate_email("user@"));
        assert!(!validate_email("user@nodot"));
        assert!(!validate_email("two@at@example.com"));
        assert!(!validate_email("spaced user@example.com"));
    }

    #[test]
    fn rate_limiter_blocks_after_the_cap() {
        let limiter = RateLimiter::new();
        let window = Duration::from_secs(60);

        for _ in 0..3 {
            assert!(limiter.check_rate_limit("login:1.2.3.4", 3, window));
        }
        assert!(!limiter.check_rate_limit("login:1.2.3.4", 3, window));
        // Other keys are unaffected.
        assert!(limiter.check_rate_limit("login:5.6.7.8", 3, window));
    }
}
