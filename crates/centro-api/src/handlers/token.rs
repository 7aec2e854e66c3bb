//! Token minting handler.

use axum::Json;
use axum::extract::State;

use crate::dto::request::TokenRequest;
use crate::dto::response::TokenResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /token
///
/// Mints a voice access token. The JSON body is optional; a missing or
/// empty identity resolves to the default agent identity. Missing
/// platform credentials are a 500 here, never a startup failure.
pub async fn mint_token(
    State(state): State<AppState>,
    body: Option<Json<TokenRequest>>,
) -> Result<Json<TokenResponse>, ApiError> {
    let identity = body.and_then(|Json(req)| req.identity);

    let issued = state.token_service.issue(identity.as_deref())?;

    Ok(Json(TokenResponse {
        token: issued.token,
        identity: issued.identity,
    }))
}
