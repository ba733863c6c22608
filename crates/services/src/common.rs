//! Sources of per-response values that are not derived from the request.
//!
//! Synthesized responses need a fresh identifier and the current time. Both are
//! behind traits so callers can inject fixed values.

use uuid::Uuid;

#[cfg(any(test, feature = "test-mocks"))]
use mockall::automock;

/// Supplies the `created` timestamp of a response
#[cfg_attr(any(test, feature = "test-mocks"), automock)]
pub trait Clock: Send + Sync {
    /// Current wall-clock time as integer seconds since the Unix epoch
    fn now_unix_seconds(&self) -> i64;
}

/// Supplies unique response identifiers
#[cfg_attr(any(test, feature = "test-mocks"), automock)]
pub trait IdGenerator: Send + Sync {
    fn generate_id(&self) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix_seconds(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Random (v4) UUIDs in hyphenated form
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
