use actix_web::{App, test, web};
use remit_api::application::auth_service::AuthService;
use remit_api::application::friend_service::FriendService;
use remit_api::application::gateway::AccessGateway;
use remit_api::application::leave_service::LeaveService;
use remit_api::application::transfer_service::TransferService;
use remit_api::data::Repositories;
use remit_api::infrastructure::notify::BusinessNotifier;
use remit_api::presentation::handlers::{
    AppState, leave_stats, list_leave_requests, submit_leave_request, update_leave_request,
};
use std::sync::Arc;

const TOKEN: &str = "mock-token-test-session";

macro_rules! setup_leave_test {
    () => {{
        let repositories = Repositories::in_memory();
        let state = web::Data::new(AppState {
            gateway: Arc::new(AccessGateway::new(Vec::new())),
            auth_service: Arc::new(AuthService::new(
                repositories.users.clone(),
                Arc::new(BusinessNotifier::new("http://localhost:59999")),
            )),
            transfer_service: Arc::new(TransferService::new(repositories.transactions.clone())),
            friend_service: Arc::new(FriendService::new(
                repositories.users.clone(),
                repositories.friends.clone(),
            )),
            leave_service: Arc::new(LeaveService::new(repositories.leave_requests.clone())),
        });

        test::init_service(
            App::new()
                .app_data(state.clone())
                .route("/leave-requests", web::get().to(list_leave_requests))
                .route("/leave-requests", web::post().to(submit_leave_request))
                .route("/leave-requests/{id}", web::put().to(update_leave_request))
                .route("/stats", web::get().to(leave_stats)),
        )
        .await
    }};
}

macro_rules! submit_request {
    ($app:expr, $employee:expr) => {{
        let req = test::TestRequest::post()
            .uri("/leave-requests")
            .set_json(serde_json::json!({
                "employeeName": $employee,
                "startDate": "2025-03-01",
                "endDate": "2025-03-05",
                "reason": "vacation",
                "token": TOKEN
            }))
            .to_request();
        let resp = test::call_service($app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        body
    }};
}

#[actix_web::test]
async fn test_submit_defaults_to_pending_and_assigns_ids() {
    let app = setup_leave_test!();

    let first = submit_request!(&app, "Alice");
    assert_eq!(first["id"], 1);
    assert_eq!(first["status"], "pending");
    assert_eq!(first["employeeName"], "Alice");

    let second = submit_request!(&app, "Bob");
    assert_eq!(second["id"], 2);
}

#[actix_web::test]
async fn test_submit_rejects_missing_fields() {
    let app = setup_leave_test!();

    let req = test::TestRequest::post()
        .uri("/leave-requests")
        .set_json(serde_json::json!({
            "employeeName": "Alice",
            "startDate": "2025-03-01",
            "token": TOKEN
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Missing required fields");
}

#[actix_web::test]
async fn test_submit_rejects_malformed_token() {
    let app = setup_leave_test!();

    let req = test::TestRequest::post()
        .uri("/leave-requests")
        .set_json(serde_json::json!({
            "employeeName": "Alice",
            "startDate": "2025-03-01",
            "endDate": "2025-03-05",
            "reason": "vacation",
            "token": "jwt-style-token"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Unauthorized");
}

#[actix_web::test]
async fn test_list_requires_session_token() {
    let app = setup_leave_test!();

    let req = test::TestRequest::get().uri("/leave-requests").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri(&format!("/leave-requests?token={TOKEN}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_approve_and_freeze_scenario() {
    let app = setup_leave_test!();
    let submitted = submit_request!(&app, "Alice");
    let id = submitted["id"].as_u64().unwrap();

    // pending -> approved
    let req = test::TestRequest::put()
        .uri(&format!("/leave-requests/{id}"))
        .set_json(serde_json::json!({ "status": "approved", "token": TOKEN }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "approved");

    // approved -> pending is invalid input
    let req = test::TestRequest::put()
        .uri(&format!("/leave-requests/{id}"))
        .set_json(serde_json::json!({ "status": "pending", "token": TOKEN }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid status");

    // approved is terminal, even toward rejected
    let req = test::TestRequest::put()
        .uri(&format!("/leave-requests/{id}"))
        .set_json(serde_json::json!({ "status": "rejected", "token": TOKEN }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);

    // And the stored record is unchanged
    let req = test::TestRequest::get()
        .uri(&format!("/leave-requests?token={TOKEN}"))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body[0]["status"], "approved");
}

#[actix_web::test]
async fn test_update_rejects_arbitrary_status_values() {
    let app = setup_leave_test!();
    let submitted = submit_request!(&app, "Alice");
    let id = submitted["id"].as_u64().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/leave-requests/{id}"))
        .set_json(serde_json::json!({ "status": "on-hold", "token": TOKEN }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid status");
}

#[actix_web::test]
async fn test_update_unknown_id_is_not_found() {
    let app = setup_leave_test!();

    let req = test::TestRequest::put()
        .uri("/leave-requests/99")
        .set_json(serde_json::json!({ "status": "approved", "token": TOKEN }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Leave request not found");
}

#[actix_web::test]
async fn test_update_requires_session_token() {
    let app = setup_leave_test!();
    let submitted = submit_request!(&app, "Alice");
    let id = submitted["id"].as_u64().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/leave-requests/{id}"))
        .set_json(serde_json::json!({ "status": "approved", "token": "bad" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_stats_count_by_status() {
    let app = setup_leave_test!();

    let a = submit_request!(&app, "Alice");
    let b = submit_request!(&app, "Bob");
    submit_request!(&app, "Carol");

    for (id, status) in [(a["id"].as_u64().unwrap(), "approved"), (b["id"].as_u64().unwrap(), "rejected")] {
        let req = test::TestRequest::put()
            .uri(&format!("/leave-requests/{id}"))
            .set_json(serde_json::json!({ "status": status, "token": TOKEN }))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());
    }

    let req = test::TestRequest::get()
        .uri(&format!("/stats?token={TOKEN}"))
        .to_request();
    let stats: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stats["total"], 3);
    assert_eq!(stats["approved"], 1);
    assert_eq!(stats["pending"], 1);
    assert_eq!(stats["rejected"], 1);
}

#[actix_web::test]
async fn test_stats_requires_session_token() {
    let app = setup_leave_test!();

    let req = test::TestRequest::get()
        .uri("/stats?token=forged")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
}
