//! Outbound ports the core depends on. Adapters provide the implementations.

use chrono::{DateTime, Utc};

/// Source of the current instant.
///
/// Every core operation takes an explicit instant; callers obtain it from a
/// `Clock` once per tick so that all views rendered for that tick agree.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
