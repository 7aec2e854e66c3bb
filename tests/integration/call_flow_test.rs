//! End-to-end tests: token endpoint, webhook, softphone session and
//! console views working together.

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use tokio::sync::watch;
use tokio::time::timeout;

use centro_client::session::{SessionFailure, SessionSnapshot, SessionState};
use centro_client::{CallController, HttpTokenSource, SimulatedDevice};
use centro_console::CallCenterView;
use centro_core::config::{AppConfig, ClientConfig};
use centro_twilio::token::AccessTokenClaims;

/// Wait until the session publishes a snapshot matching the predicate.
async fn wait_for(
    rx: &mut watch::Receiver<SessionSnapshot>,
    predicate: impl Fn(&SessionSnapshot) -> bool,
) -> SessionSnapshot {
    timeout(Duration::from_secs(5), async {
        loop {
            if predicate(&rx.borrow()) {
                return rx.borrow().clone();
            }
            rx.changed().await.expect("session loop stopped");
        }
    })
    .await
    .expect("timed out waiting for session state")
}

#[tokio::test]
async fn test_session_boots_against_live_token_endpoint() {
    let config = helpers::TestApp::new().config;
    let base_url = helpers::spawn_server(config.clone()).await;

    let mut client_config = ClientConfig::default();
    client_config.token_url = format!("{}/token", base_url);

    let (device, events) = SimulatedDevice::new();
    let source = Arc::new(HttpTokenSource::from_config(&client_config));
    let handle = CallController::spawn(device.clone(), events, source, client_config);

    let mut rx = handle.subscribe();
    let snapshot = wait_for(&mut rx, |s| matches!(s.state, SessionState::Ready)).await;

    assert_eq!(snapshot.identity.as_deref(), Some("agent"));
    assert!(snapshot.error.is_none());
    assert!(device.is_registered());

    let token = device.token().expect("device got no token");
    let claims = AccessTokenClaims::peek(&token).unwrap();
    assert_eq!(claims.identity(), Some("agent"));
    assert_eq!(claims.sub, config.twilio.account_sid);

    handle.shutdown().await;
}

#[tokio::test]
async fn test_session_surfaces_missing_server_credentials() {
    let base_url = helpers::spawn_server(AppConfig::default()).await;

    let mut client_config = ClientConfig::default();
    client_config.token_url = format!("{}/token", base_url);

    let (device, events) = SimulatedDevice::new();
    let source = Arc::new(HttpTokenSource::from_config(&client_config));
    let handle = CallController::spawn(device.clone(), events, source, client_config);

    let mut rx = handle.subscribe();
    let snapshot = wait_for(&mut rx, |s| matches!(s.state, SessionState::Failed { .. })).await;

    assert!(matches!(
        snapshot.state,
        SessionState::Failed {
            failure: SessionFailure::TokenFetch
        }
    ));
    assert_eq!(
        snapshot.error.as_deref(),
        Some("Missing Twilio credentials in environment variables")
    );
    assert!(!device.is_registered());

    let view = CallCenterView::from_snapshot(&snapshot);
    assert_eq!(view.status, "Error: Configuración de Twilio requerida");
    assert_eq!(view.presence.label, "Desconectado");
    assert!(view.controls.show_setup_panel);

    handle.shutdown().await;
}

#[tokio::test]
async fn test_console_view_tracks_live_call() {
    let config = helpers::TestApp::new().config;
    let base_url = helpers::spawn_server(config).await;

    let mut client_config = ClientConfig::default();
    client_config.token_url = format!("{}/token", base_url);
    client_config.answer_delay_ms = 50;

    let (device, events) = SimulatedDevice::new();
    let source = Arc::new(HttpTokenSource::from_config(&client_config));
    let handle = CallController::spawn(device.clone(), events, source, client_config);

    let mut rx = handle.subscribe();
    wait_for(&mut rx, |s| matches!(s.state, SessionState::Ready)).await;

    let view = CallCenterView::from_snapshot(&handle.snapshot());
    assert_eq!(view.status, "Listo para recibir llamadas");
    assert_eq!(view.stage, "READY");
    assert_eq!(view.presence.label, "Disponible");
    assert_eq!(view.presence.color, "#10b981");
    assert!(view.controls.can_dial);
    assert!(view.history.is_empty());

    let call = device.push_incoming("+15551230004").await;
    let snapshot = wait_for(&mut rx, |s| matches!(s.state, SessionState::InCall { .. })).await;
    assert!(call.is_accepted());

    let view = CallCenterView::from_snapshot(&snapshot);
    assert_eq!(view.status, "EN LLAMADA");
    assert_eq!(view.stage, "CALL");
    assert_eq!(view.presence.label, "En llamada");
    assert!(view.controls.can_hang_up);
    assert!(!view.controls.can_dial);

    handle.hang_up().await.unwrap();
    let snapshot = wait_for(&mut rx, |s| matches!(s.state, SessionState::CallEnded)).await;

    let view = CallCenterView::from_snapshot(&snapshot);
    assert_eq!(view.status, "Llamada finalizada");
    assert_eq!(view.history.len(), 1);
    assert_eq!(view.history[0].direction, "Entrante");
    assert_eq!(view.history[0].counterpart, "+15551230004");
    assert_eq!(view.history[0].status, "Completada");
    assert!(view.history[0].duration.is_some());

    handle.shutdown().await;
}

#[tokio::test]
async fn test_token_then_inbound_webhook_over_the_wire() {
    let config = helpers::TestApp::new().config;
    let base_url = helpers::spawn_server(config).await;
    let http = reqwest::Client::new();

    // An agent fetches a token first, like the browser console does.
    let minted: serde_json::Value = http
        .post(format!("{}/token", base_url))
        .json(&serde_json::json!({ "identity": "agent" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(minted["identity"], "agent");
    let claims = AccessTokenClaims::peek(minted["token"].as_str().unwrap()).unwrap();
    assert_eq!(claims.identity(), Some("agent"));

    // Then the platform reports an inbound call with no destination.
    let response = http
        .post(format!("{}/voice", base_url))
        .form(&[("CallSid", "CA300"), ("From", "+15551230005")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "text/xml");

    let body = response.text().await.unwrap();
    assert!(body.contains("Bienvenido al centro de llamadas"));
    assert!(body.contains("<Dial><Client>agent</Client></Dial>"));
    assert!(!body.contains("callerId"));
}

#[tokio::test]
async fn test_pages_and_health_are_served() {
    let app = helpers::TestApp::new();

    let home = app.get("/").await;
    assert_eq!(home.status, StatusCode::OK);
    assert!(home.content_type.starts_with("text/html"));
    assert!(home.text.contains("Abrir consola de llamadas"));

    let screener = app.get("/screener/calls").await;
    assert_eq!(screener.status, StatusCode::OK);
    assert!(screener.text.contains("Centro de Llamadas"));
    assert!(screener.text.contains("id=\"dial-input\""));
    assert!(screener.text.contains("id=\"history\""));

    let about = app.get("/about").await;
    assert_eq!(about.status, StatusCode::OK);

    let health = app.get("/health").await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body.get("status").unwrap().as_str().unwrap(), "ok");
    assert!(health.body.get("version").is_some());
}
