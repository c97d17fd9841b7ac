//! Contract and determinism tests for the API surface.
//!
//! Contract: every response object uses camelCase keys, money fields are
//! JSON integers (cents), and required fields are always present.
//! Determinism: the same request twice yields byte-identical bodies.

use axum::http::StatusCode;
use pestquote::api::{self, AppState};
use pestquote::db::init_db;
use pestquote::pricebook::{builtin_catalog, PriceBook};
use pestquote::Repository;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestApp {
    app: axum::Router,
    _temp: TempDir,
}

async fn setup_test_app() -> TestApp {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir
        .path()
        .join("test.db")
        .to_string_lossy()
        .to_string();
    let pool = init_db(&db_path).await.expect("init_db failed");

    let repo = Arc::new(Repository::new(pool));
    let state = AppState::new(repo, PriceBook::builtin(), builtin_catalog());
    let app = api::create_router(state);

    TestApp {
        app,
        _temp: temp_dir,
    }
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let req = axum::http::Request::builder()
        .method("GET")
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    (status, body)
}

async fn post_json(app: axum::Router, uri: &str, body: &Value) -> (StatusCode, Vec<u8>) {
    let req = axum::http::Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(axum::body::Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    (status, body)
}

fn loaded_factors() -> Value {
    json!({
        "propertyType": "multi_family",
        "squareFootage": 3200,
        "pestType": "rodents",
        "severity": "severe",
        "frequency": "monthly",
        "accessDifficulty": "difficult",
        "distanceFromBranch": 22.5,
        "isRush": true,
        "isAfterHours": true,
        "isWeekend": true,
        "contractLengthMonths": 24,
        "numberOfUnits": 4
    })
}

/// Assert all keys in a JSON object are camelCase
fn assert_all_keys_camel_case(value: &Value, path: &str) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                // camelCase: starts with lowercase, no underscores
                assert!(
                    key.chars().next().map_or(true, |c| c.is_lowercase()),
                    "Key '{}' at path '{}' should start with lowercase (camelCase)",
                    key,
                    path
                );
                assert!(
                    !key.contains('_'),
                    "Key '{}' at path '{}' should not contain underscores (camelCase)",
                    key,
                    path
                );
                assert_all_keys_camel_case(val, &format!("{}.{}", path, key));
            }
        }
        Value::Array(arr) => {
            for (i, val) in arr.iter().enumerate() {
                assert_all_keys_camel_case(val, &format!("{}[{}]", path, i));
            }
        }
        _ => {}
    }
}

// =============================================================================
// Contract Tests
// =============================================================================

#[tokio::test]
async fn test_contract_quote_field_names_camel_case() {
    let test_app = setup_test_app().await;

    let (status, body) = post_json(
        test_app.app,
        "/v1/quote",
        &json!({ "factors": loaded_factors() }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_all_keys_camel_case(&json, "root");
}

#[tokio::test]
async fn test_contract_quote_required_fields_present() {
    let test_app = setup_test_app().await;

    let (status, body) = post_json(
        test_app.app,
        "/v1/quote",
        &json!({ "factors": loaded_factors() }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    for field in [
        "basePrice",
        "subtotal",
        "adjustments",
        "suggestedPrice",
        "annualValue",
        "visitsPerYear",
    ] {
        assert!(json.get(field).is_some(), "missing field {}", field);
    }
    for adjustment in json["adjustments"].as_array().unwrap() {
        assert!(adjustment["name"].is_string());
        assert!(adjustment["impact"].is_i64(), "impact must be integer cents");
    }
}

#[tokio::test]
async fn test_contract_money_fields_are_integers() {
    let test_app = setup_test_app().await;

    let (status, body) = post_json(
        test_app.app,
        "/v1/quote",
        &json!({ "factors": loaded_factors() }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    for field in ["basePrice", "subtotal", "suggestedPrice", "annualValue"] {
        assert!(
            json[field].is_i64(),
            "{} must be an integer cent count, got {}",
            field,
            json[field]
        );
    }
}

#[tokio::test]
async fn test_contract_tiers_field_names_camel_case() {
    let test_app = setup_test_app().await;

    let (status, body) = post_json(
        test_app.app,
        "/v1/quote/tiers",
        &json!({ "factors": loaded_factors() }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_all_keys_camel_case(&json, "root");
}

#[tokio::test]
async fn test_contract_packages_field_names_camel_case() {
    let test_app = setup_test_app().await;

    let (status, body) = get(test_app.app, "/v1/packages").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_all_keys_camel_case(&json, "root");
}

#[tokio::test]
async fn test_contract_stored_quote_field_names_camel_case() {
    let test_app = setup_test_app().await;

    let (status, body) = post_json(
        test_app.app.clone(),
        "/v1/quotes",
        &json!({ "factors": loaded_factors(), "tier": "premium" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let created: Value = serde_json::from_slice(&body).unwrap();
    assert_all_keys_camel_case(&created, "root");

    let (status, body) = get(test_app.app, "/v1/quotes").await;
    assert_eq!(status, StatusCode::OK);
    let listed: Value = serde_json::from_slice(&body).unwrap();
    assert_all_keys_camel_case(&listed, "root");
}

#[tokio::test]
async fn test_contract_error_shape() {
    let test_app = setup_test_app().await;

    let mut factors = loaded_factors();
    factors["squareFootage"] = json!(0);
    let (status, body) = post_json(test_app.app, "/v1/quote", &json!({ "factors": factors })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].is_string());
    assert_eq!(json.as_object().unwrap().len(), 1);
}

// =============================================================================
// Determinism Tests
// =============================================================================

#[tokio::test]
async fn test_determinism_quote_identical_bytes() {
    let test_app = setup_test_app().await;
    let request_body = json!({ "factors": loaded_factors() });

    let (status, first) = post_json(test_app.app.clone(), "/v1/quote", &request_body).await;
    assert_eq!(status, StatusCode::OK);

    for _ in 0..5 {
        let (status, next) = post_json(test_app.app.clone(), "/v1/quote", &request_body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first, next, "quote response must be byte-identical");
    }
}

#[tokio::test]
async fn test_determinism_tiers_identical_bytes() {
    let test_app = setup_test_app().await;
    let request_body = json!({ "factors": loaded_factors() });

    let (status, first) = post_json(test_app.app.clone(), "/v1/quote/tiers", &request_body).await;
    assert_eq!(status, StatusCode::OK);

    for _ in 0..5 {
        let (status, next) =
            post_json(test_app.app.clone(), "/v1/quote/tiers", &request_body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first, next, "tiers response must be byte-identical");
    }
}

#[tokio::test]
async fn test_determinism_packages_identical_bytes() {
    let test_app = setup_test_app().await;

    let (status, first) = get(test_app.app.clone(), "/v1/packages").await;
    assert_eq!(status, StatusCode::OK);

    let (status, next) = get(test_app.app, "/v1/packages").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, next);
}
