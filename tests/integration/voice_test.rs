//! Integration tests for the voice webhook.

mod helpers;

use axum::http::StatusCode;

#[tokio::test]
async fn test_voice_routes_client_destination() {
    let app = helpers::TestApp::new();

    let response = app
        .post_form("/voice", "CallSid=CA100&From=%2B15551230001&To=client%3Amaria")
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.content_type, "text/xml");
    assert!(
        response
            .text
            .starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>")
    );
    assert!(
        response
            .text
            .contains("<Dial callerId=\"+15017122661\"><Client>maria</Client></Dial>")
    );
}

#[tokio::test]
async fn test_voice_routes_number_destination() {
    let app = helpers::TestApp::new();

    let response = app
        .post_form("/voice", "CallSid=CA101&To=%2B15557654321")
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(
        response
            .text
            .contains("<Dial callerId=\"+15017122661\"><Number>+15557654321</Number></Dial>")
    );
}

#[tokio::test]
async fn test_voice_without_destination_greets_and_rings_agent() {
    let app = helpers::TestApp::new();

    let response = app
        .post_form("/voice", "CallSid=CA102&From=%2B15551230002")
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(
        response
            .text
            .contains("<Say>Bienvenido al centro de llamadas.")
    );
    assert!(response.text.contains("<Dial><Client>agent</Client></Dial>"));
    assert!(!response.text.contains("callerId"));
}

#[tokio::test]
async fn test_voice_empty_destination_greets() {
    let app = helpers::TestApp::new();

    let response = app.post_form("/voice", "To=&CallSid=CA103").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text.contains("<Say>"));
    assert!(response.text.contains("<Client>agent</Client>"));
}

#[tokio::test]
async fn test_voice_tolerates_full_platform_payload() {
    let app = helpers::TestApp::new();

    let body = "AccountSid=AC00000000000000000000000000000000\
        &ApiVersion=2010-04-01\
        &CallSid=CA200\
        &CallStatus=ringing\
        &Called=%2B15017122661\
        &Caller=%2B15551230003\
        &Direction=inbound\
        &From=%2B15551230003\
        &To=";

    let response = app.post_form("/voice", body).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text.contains("<Client>agent</Client>"));
}

#[tokio::test]
async fn test_voice_unreadable_body_answers_with_apology() {
    let app = helpers::TestApp::new();

    let response = app
        .post_raw("/voice", "application/json", "{\"To\": \"client:maria\"}")
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.content_type, "text/xml");
    assert!(
        response
            .text
            .contains("<Say>Lo sentimos, ha ocurrido un error.")
    );
}

#[tokio::test]
async fn test_voice_escapes_markup_in_destination() {
    let app = helpers::TestApp::new();

    let response = app
        .post_form("/voice", "To=client%3Ax%3C%2FClient%3E%3CNumber%3Eevil")
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text.contains("x&lt;/Client&gt;&lt;Number&gt;evil"));
    assert!(!response.text.contains("<Number>evil"));
}
