//! Integration tests for the `/api/v1/clusters` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json};
use serde_json::{json, Map, Value};

const DOB_URI: &str = "/api/v1/clusters/date_of_birth/validate";

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_clusters_returns_definitions() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/clusters").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let clusters = json["data"].as_array().unwrap();
    assert_eq!(clusters.len(), 4);

    let dob = clusters
        .iter()
        .find(|c| c["name"] == "date_of_birth")
        .expect("date_of_birth is registered");
    assert_eq!(dob["anchor"], "date-of-birth");
    let fields: Vec<&str> = dob["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["day", "month", "year"]);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn valid_submission_is_not_invalid() {
    let app = common::build_test_app();
    let body = json!({ "submitted": { "day": "15", "month": "3", "year": "1987" } });

    let response = post_json(app, DOB_URI, body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    assert_eq!(data["formIsInvalid"], false);
    assert_eq!(data["errorSummaryList"], json!([]));
    assert_eq!(data["inputErrors"], json!({}));
    assert!(data.get("clusterError").is_none());
}

#[tokio::test]
async fn all_missing_returns_single_cluster_error() {
    let app = common::build_test_app();
    let body = json!({ "submitted": { "day": "", "month": " ", "year": "" } });

    let response = post_json(app, DOB_URI, body).await;
    let data = &body_json(response).await["data"];

    assert_eq!(data["formIsInvalid"], true);
    let summary = data["errorSummaryList"].as_array().unwrap();
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0]["href"], "#date-of-birth");
    assert_eq!(summary[0]["text"], "Enter your date of birth");
    assert_eq!(
        data["inputErrors"],
        json!({ "day": "", "month": "", "year": "" })
    );
    assert_eq!(data["clusterError"], "Enter your date of birth");
}

#[tokio::test]
async fn missing_month_and_year_are_consolidated() {
    let app = common::build_test_app();
    let body = json!({ "submitted": { "day": "15" } });

    let response = post_json(app, DOB_URI, body).await;
    let data = &body_json(response).await["data"];

    let summary = data["errorSummaryList"].as_array().unwrap();
    assert_eq!(summary.len(), 1);
    assert_eq!(
        summary[0]["text"],
        "Date of birth must include a month and year"
    );
    assert_eq!(summary[0]["href"], "#month");
    let highlighted: Vec<&String> = data["inputErrors"].as_object().unwrap().keys().collect();
    assert_eq!(highlighted, vec!["month", "year"]);
}

#[tokio::test]
async fn invalid_month_is_field_specific() {
    let app = common::build_test_app();
    let body = json!({ "submitted": { "day": "15", "month": "13", "year": "1990" } });

    let response = post_json(app, DOB_URI, body).await;
    let data = &body_json(response).await["data"];

    assert_eq!(data["errorSummaryList"][0]["href"], "#month");
    let input_errors = data["inputErrors"].as_object().unwrap();
    assert_eq!(input_errors.len(), 1);
    assert!(!input_errors["month"].as_str().unwrap().is_empty());
    assert!(data.get("clusterError").is_none());
}

#[tokio::test]
async fn unreal_date_wins_over_future_and_unchanged() {
    let app = common::build_test_app();
    let values = json!({ "day": "31", "month": "4", "year": "2990" });
    let body = json!({ "submitted": values.clone(), "baseline": values });

    let response = post_json(app, DOB_URI, body).await;
    let data = &body_json(response).await["data"];

    let summary = data["errorSummaryList"].as_array().unwrap();
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0]["text"], "Date of birth must be a real date");
}

#[tokio::test]
async fn unchanged_submission_is_rejected() {
    let app = common::build_test_app();
    let body = json!({
        "submitted": { "day": "15", "month": "3", "year": "1987" },
        "baseline": { "day": " 15", "month": "3 ", "year": "1987" },
    });

    let response = post_json(app, DOB_URI, body).await;
    let data = &body_json(response).await["data"];

    assert_eq!(data["formIsInvalid"], true);
    assert_eq!(
        data["errorSummaryList"][0]["text"],
        "The date of birth has not changed"
    );
}

#[tokio::test]
async fn other_clusters_are_served() {
    let app = common::build_test_app();
    let body = json!({
        "submitted": { "phone_number": "07700 900982", "safe_to_call": "yes" }
    });

    let response = post_json(app, "/api/v1/clusters/phone_number/validate", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["formIsInvalid"], false);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_cluster_returns_404() {
    let app = common::build_test_app();
    let response = post_json(
        app,
        "/api/v1/clusters/nickname/validate",
        json!({ "submitted": {} }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Cluster 'nickname' not found");
}

#[tokio::test]
async fn too_many_fields_returns_400() {
    let app = common::build_test_app();
    let submitted: Map<String, Value> = (0..51)
        .map(|i| (format!("field_{i}"), Value::String("x".into())))
        .collect();

    let response = post_json(app, DOB_URI, json!({ "submitted": submitted })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn overlong_value_returns_400() {
    let app = common::build_test_app();
    let body = json!({ "submitted": { "day": "1".repeat(1_001) } });

    let response = post_json(app, DOB_URI, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
