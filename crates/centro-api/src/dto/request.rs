//! Request DTOs.

use serde::{Deserialize, Serialize};

/// Token mint request.
///
/// The body is optional end to end; a bare `POST /token` mints for the
/// default identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenRequest {
    /// Identity to scope the token to.
    #[serde(default)]
    pub identity: Option<String>,
}
