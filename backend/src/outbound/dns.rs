//! Hickory-backed implementation of the [`MxResolver`] port.

use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::ResolveErrorKind;
use tracing::{debug, warn};

use crate::domain::ports::{MxLookupError, MxResolver};

/// MX-record resolver backed by the Hickory DNS stub resolver.
#[derive(Clone)]
pub struct HickoryMxResolver {
    inner: TokioAsyncResolver,
}

impl HickoryMxResolver {
    /// Build a resolver from the host's DNS configuration, falling back
    /// to the library defaults (Google public DNS) when none is readable.
    #[must_use]
    pub fn from_system() -> Self {
        let inner = match TokioAsyncResolver::tokio_from_system_conf() {
            Ok(resolver) => resolver,
            Err(err) => {
                warn!(error = %err, "system DNS configuration unavailable, using defaults");
                TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
            }
        };
        Self { inner }
    }
}

#[async_trait]
impl MxResolver for HickoryMxResolver {
    async fn has_mx_records(&self, domain: &str) -> Result<bool, MxLookupError> {
        match self.inner.mx_lookup(domain).await {
            Ok(lookup) => Ok(lookup.iter().next().is_some()),
            Err(err) => {
                if matches!(err.kind(), ResolveErrorKind::NoRecordsFound { .. }) {
                    debug!(domain, "no MX records for domain");
                    return Ok(false);
                }
                Err(MxLookupError::new(domain, err.to_string()))
            }
        }
    }
}
