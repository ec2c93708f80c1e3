//! HTTP surface: status codes, response bodies, and header-carried identity
//! across every route.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use lran_api::state::{AppConfig, AppState};

fn test_app() -> axum::Router {
    lran_api::app(AppState::new(&AppConfig::default()))
}

/// (msp, issuer, subject) for each role in the default table.
const CITIZEN: (&str, &str, &str) = ("CitizenMSP", "ca.citizen.lran.com", "C1");
const LAWYER: (&str, &str, &str) = ("LawyerMSP", "ca.lawyer.lran.com", "LW1");
const OFFICER: (&str, &str, &str) = ("RegistryOfficeMSP", "ca.registryoffice.lran.com", "RO1");
const AUTHORITY: (&str, &str, &str) = ("BLROMSP", "ca.blro.lran.com", "BL1");

async fn body_json(response: axum::http::Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_as(who: (&str, &str, &str), uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-lran-msp", who.0)
        .header("x-lran-issuer", who.1)
        .header("x-lran-subject", who.2)
        .body(Body::from(json!({ "payload": payload }).to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &axum::Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    (status, body_json(resp).await)
}

async fn seed_parties(app: &axum::Router) {
    for (who, uri, payload) in [
        (LAWYER, "/api/main/lawyer/createLawyer", json!({"ID": "LW1", "Name": "Ada", "CitizenID": "CIT-1"})),
        (
            OFFICER,
            "/api/main/registryoffice/createRegistryOfficer",
            json!({"ID": "RO1", "Name": "Rui", "CitizenID": "CIT-2"}),
        ),
        (AUTHORITY, "/api/main/blro/createBLRO", json!({"ID": "BL1", "Name": "North", "Description": "North office"})),
    ] {
        let (status, body) = send(app, post_as(who, uri, payload)).await;
        assert_eq!(status, StatusCode::OK, "{uri}: {body}");
    }
}

#[tokio::test]
async fn health_probes_need_no_identity() {
    let app = test_app();
    let resp = app.clone().oneshot(get("/health/liveness")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = app.oneshot(get("/health/readiness")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn land_create_read_and_search() {
    let app = test_app();
    let (status, body) = send(
        &app,
        post_as(
            AUTHORITY,
            "/api/main/land/createLand",
            json!({"ID": "L1", "Address": "1 High St", "Owner": "Jane Smith", "Date": 20230101}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "L1");
    assert!(body["message"].as_str().unwrap().contains("added"));

    let (status, land) = send(&app, get("/api/main/land/get/L1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(land["Owner"], "Jane Smith");
    assert_eq!(land["History"][0]["PreviousOwner"], "Authority");
    assert_eq!(land["History"][0]["RecordedBy"], "BL1");

    let (status, hits) = send(&app, get("/api/main/land/queryOwner/SMITH")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hits.as_array().unwrap().len(), 1);
    assert_eq!(hits[0]["Key"], "land-L1");
}

#[tokio::test]
async fn wrong_role_is_forbidden_with_actual_credentials() {
    let app = test_app();
    let (status, body) = send(
        &app,
        post_as(
            CITIZEN,
            "/api/main/land/createLand",
            json!({"ID": "L1", "Address": "a", "Owner": "o", "Date": "1"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "ACCESS_DENIED");
    assert!(body["error"]["message"].as_str().unwrap().contains("CitizenMSP"));

    let (status, _) = send(&app, get("/api/main/land/get/L1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_identity_is_unauthorized() {
    let app = test_app();
    let req = Request::builder()
        .method("POST")
        .uri("/api/main/land/createLand")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"payload": {"ID": "L1", "Address": "a", "Owner": "o", "Date": 1}}).to_string(),
        ))
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "IDENTITY_ERROR");
}

#[tokio::test]
async fn malformed_payload_is_bad_request() {
    let app = test_app();
    let (status, body) = send(
        &app,
        post_as(AUTHORITY, "/api/main/land/createLand", json!({"ID": "L1"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn non_integer_date_is_rejected() {
    let app = test_app();
    let (status, body) = send(
        &app,
        post_as(
            AUTHORITY,
            "/api/main/land/createLand",
            json!({"ID": "L1", "Address": "a", "Owner": "o", "Date": "Jan 1"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "DATE_FORMAT_ERROR");
}

#[tokio::test]
async fn duplicate_party_conflicts() {
    let app = test_app();
    seed_parties(&app).await;
    let (status, body) = send(
        &app,
        post_as(
            LAWYER,
            "/api/main/lawyer/createLawyer",
            json!({"ID": "LW1", "Name": "Other", "CitizenID": "X"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "ALREADY_EXISTS");

    let (_, lawyer) = send(&app, get("/api/main/lawyer/get/LW1")).await;
    assert_eq!(lawyer["Name"], "Ada");
    let (_, blro) = send(&app, get("/api/main/blro/get/BL1")).await;
    assert_eq!(blro["SecondaryID"], "North office");
}

#[tokio::test]
async fn full_transfer_workflow_over_http() {
    let app = test_app();
    seed_parties(&app).await;

    let steps = [
        (
            CITIZEN,
            "/api/main/transfer/createTransferRequest",
            json!({"ID": "T1", "LandID": "L1", "Lawyer": "LW1", "Date": 20230105}),
        ),
        (
            LAWYER,
            "/api/main/transfer/transfer2RegistryOfficer",
            json!({"ID": "T1", "RegistryOfficer": "RO1", "Date": 20230110}),
        ),
        (
            OFFICER,
            "/api/main/transfer/transfer2BLRO",
            json!({"ID": "T1", "BLRO": "BL1", "Date": 20230115}),
        ),
        (
            AUTHORITY,
            "/api/main/transfer/approveTransferRequest",
            json!({"ID": "T1", "Date": 20230120}),
        ),
    ];
    for (who, uri, payload) in steps {
        let (status, body) = send(&app, post_as(who, uri, payload)).await;
        assert_eq!(status, StatusCode::OK, "{uri}: {body}");
        assert_eq!(body["id"], "T1");
    }

    let (status, request) = send(&app, get("/api/main/transfer/get/T1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(request["Complete"], true);
    assert_eq!(request["Stage"], "blro");
    assert_eq!(request["StatusHistory"].as_array().unwrap().len(), 4);

    for uri in [
        "/api/main/lawyer/get/LW1",
        "/api/main/registryoffice/get/RO1",
        "/api/main/blro/get/BL1",
    ] {
        let (_, party) = send(&app, get(uri)).await;
        assert_eq!(party["ActiveCases"], json!([]), "{uri}");
        assert_eq!(party["CompletedCases"], json!(["T1"]), "{uri}");
    }
}

#[tokio::test]
async fn failed_chained_call_is_bad_gateway_and_leaves_nothing() {
    let app = test_app();
    seed_parties(&app).await;
    let (status, body) = send(
        &app,
        post_as(
            CITIZEN,
            "/api/main/transfer/createTransferRequest",
            json!({"ID": "T1", "LandID": "L1", "Lawyer": "LW404", "Date": 20230105}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "DOWNSTREAM_FAILURE");
    assert!(body["error"]["message"].as_str().unwrap().starts_with("lawyer.addCase"));

    let (status, _) = send(&app, get("/api/main/transfer/get/T1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
