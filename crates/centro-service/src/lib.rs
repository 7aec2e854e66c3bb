//! # centro-service
//!
//! Business logic for Centro: access-token issuance for softphone
//! identities and call routing for voice webhooks. Routing is a pure
//! decision over webhook parameters so it can be tested without HTTP;
//! the API layer renders decisions and owns HTTP status mapping.

pub mod token;
pub mod voice;

pub use token::{IssuedToken, TokenService};
pub use voice::{RouteDecision, apology_document, render_decision, route_call};
