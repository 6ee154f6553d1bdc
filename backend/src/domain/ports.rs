//! Domain ports implemented by outbound adapters.
//!
//! The only external collaborator of the validation layer is a DNS
//! resolver used to check that an email domain can receive mail. Handlers
//! depend on the trait so tests can substitute fixtures or mocks.

use async_trait::async_trait;

/// Failure while querying DNS for MX records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("MX lookup for {domain} failed: {message}")]
pub struct MxLookupError {
    /// Domain the lookup was issued for.
    pub domain: String,
    /// Resolver-reported reason.
    pub message: String,
}

impl MxLookupError {
    /// Create a lookup error for `domain`.
    pub fn new(domain: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            message: message.into(),
        }
    }
}

/// Port for MX-record reachability checks on email domains.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MxResolver: Send + Sync {
    /// Report whether `domain` publishes at least one MX record.
    ///
    /// An authoritative empty answer is `Ok(false)`; resolver faults are
    /// `Err`.
    async fn has_mx_records(&self, domain: &str) -> Result<bool, MxLookupError>;
}

/// Canned resolver for tests and offline development.
#[derive(Debug, Clone, Copy)]
pub struct FixtureMxResolver {
    resolvable: bool,
}

impl FixtureMxResolver {
    /// Resolver that reports every domain as deliverable.
    #[must_use]
    pub fn resolvable() -> Self {
        Self { resolvable: true }
    }

    /// Resolver that reports every domain as lacking MX records.
    #[must_use]
    pub fn unresolvable() -> Self {
        Self { resolvable: false }
    }
}

#[async_trait]
impl MxResolver for FixtureMxResolver {
    async fn has_mx_records(&self, _domain: &str) -> Result<bool, MxLookupError> {
        Ok(self.resolvable)
    }
}
