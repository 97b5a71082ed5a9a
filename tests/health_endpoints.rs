use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use tower::ServiceExt; // for `oneshot`

mod common;

use common::{StubClassifier, body_json, canned_qa, disabled_qa, get_request, test_app};

#[tokio::test]
async fn test_root_reports_service_banner() {
    let app = test_app(StubClassifier::predicting(0, 0.9), disabled_qa());

    let response = app.oneshot(get_request("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Athar Backend API is running");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app(StubClassifier::predicting(0, 0.9), disabled_qa());

    let response = app.oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, json!({"status": "healthy", "service": "athar-backend"}));
}

#[tokio::test]
async fn test_upload_health_endpoint() {
    let app = test_app(StubClassifier::predicting(0, 0.9), disabled_qa());

    let response = app.oneshot(get_request("/api/v1/upload/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({
            "status": "healthy",
            "service": "upload",
            "model_available": true,
            "translator_available": true
        })
    );
}

#[tokio::test]
async fn test_question_health_when_configured() {
    let app = test_app(StubClassifier::predicting(0, 0.9), canned_qa("Answer."));

    let response = app
        .oneshot(get_request("/api/v1/question/health"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({
            "status": "healthy",
            "service": "question_answering",
            "openai_available": true,
            "message": "Service is ready"
        })
    );
}

#[tokio::test]
async fn test_question_health_when_unconfigured() {
    let app = test_app(StubClassifier::predicting(0, 0.9), disabled_qa());

    let response = app
        .oneshot(get_request("/api/v1/question/health"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["openai_available"], false);
    assert_eq!(body["message"], "OpenAI API not configured");
}

#[tokio::test]
async fn test_question_example_endpoint() {
    let app = test_app(StubClassifier::predicting(0, 0.9), disabled_qa());

    let response = app
        .oneshot(get_request("/api/v1/question/example"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({
            "question": "What does this hieroglyph represent and what was its significance in ancient Egypt?",
            "glyph_translation": "sun",
            "context": "This is the G17 hieroglyph, commonly found in royal names and religious texts."
        })
    );
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = test_app(StubClassifier::predicting(0, 0.9), disabled_qa());

    let response = app.oneshot(get_request("/api/v1/nope")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_predict_rejects_get() {
    let app = test_app(StubClassifier::predicting(0, 0.9), disabled_qa());

    let response = app.oneshot(get_request("/predict")).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
