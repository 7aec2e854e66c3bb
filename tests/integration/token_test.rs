//! Integration tests for the token-minting endpoint.

mod helpers;

use axum::http::StatusCode;
use jsonwebtoken::decode_header;

use centro_twilio::token::AccessTokenClaims;

#[tokio::test]
async fn test_mint_token_without_body_defaults_identity() {
    let app = helpers::TestApp::new();

    let response = app.post_json("/token", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body.get("identity").unwrap().as_str().unwrap(),
        "agent"
    );

    let token = response.body.get("token").unwrap().as_str().unwrap();
    let claims = AccessTokenClaims::peek(token).unwrap();
    assert_eq!(claims.identity(), Some("agent"));
    assert_eq!(claims.iss, app.config.twilio.api_key);
    assert_eq!(claims.sub, app.config.twilio.account_sid);
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[tokio::test]
async fn test_mint_token_with_explicit_identity() {
    let app = helpers::TestApp::new();

    let response = app
        .post_json("/token", Some(serde_json::json!({ "identity": "maria" })))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body.get("identity").unwrap().as_str().unwrap(),
        "maria"
    );

    let token = response.body.get("token").unwrap().as_str().unwrap();
    let claims = AccessTokenClaims::peek(token).unwrap();
    assert_eq!(claims.identity(), Some("maria"));

    let voice = claims.grants.voice.unwrap();
    assert!(voice.incoming.unwrap().allow);
    assert_eq!(
        voice.outgoing.unwrap().application_sid,
        app.config.twilio.twiml_app_sid
    );
}

#[tokio::test]
async fn test_mint_token_empty_identity_defaults() {
    let app = helpers::TestApp::new();

    let response = app
        .post_json("/token", Some(serde_json::json!({ "identity": "" })))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body.get("identity").unwrap().as_str().unwrap(),
        "agent"
    );
}

#[tokio::test]
async fn test_mint_token_empty_object_defaults() {
    let app = helpers::TestApp::new();

    let response = app.post_json("/token", Some(serde_json::json!({}))).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body.get("identity").unwrap().as_str().unwrap(),
        "agent"
    );
}

#[tokio::test]
async fn test_mint_token_header_marks_platform_format() {
    let app = helpers::TestApp::new();

    let response = app.post_json("/token", None).await;
    let token = response.body.get("token").unwrap().as_str().unwrap();

    let header = decode_header(token).unwrap();
    assert_eq!(header.cty.as_deref(), Some("twilio-fpa;v=1"));
}

#[tokio::test]
async fn test_mint_token_without_credentials_is_an_error() {
    let app = helpers::TestApp::unconfigured();

    let response = app.post_json("/token", None).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.body.get("error").unwrap().as_str().unwrap(),
        "Missing Twilio credentials in environment variables"
    );
    assert!(response.body.get("token").is_none());
}
