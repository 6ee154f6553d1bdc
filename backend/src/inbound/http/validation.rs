//! Request-level validation helpers shared by the entity handlers.

use serde::{Deserialize, Deserializer};
use serde_json::json;
use tracing::warn;

use crate::domain::DomainError;
use crate::domain::ports::MxResolver;
use crate::domain::validation::Email;

/// Deserialize a doubly-optional field: an absent field stays `None`
/// (untouched), an explicit `null` becomes `Some(None)` (cleared).
///
/// Use together with `#[serde(default)]` on the field.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Check that the email's domain can receive mail before persisting it.
///
/// An authoritative empty answer and a resolver fault are both rejected
/// as validation errors; the distinction is only logged.
pub async fn ensure_email_deliverable(
    resolver: &dyn MxResolver,
    email: &Email,
) -> Result<(), DomainError> {
    match resolver.has_mx_records(email.domain()).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(DomainError::invalid_request(
            "email domain has no MX records",
        )
        .with_details(json!({ "field": "email", "domain": email.domain() }))),
        Err(err) => {
            warn!(error = %err, domain = email.domain(), "MX lookup failed");
            Err(
                DomainError::invalid_request("email domain could not be verified")
                    .with_details(json!({ "field": "email", "domain": email.domain() })),
            )
        }
    }
}
