use crate::application::auth_service::AuthService;
use crate::application::friend_service::FriendService;
use crate::application::gateway::AccessGateway;
use crate::application::leave_service::LeaveService;
use crate::application::transfer_service::TransferService;
use crate::domain::error::DomainError;
use crate::domain::models::{
    AddFriendRequest, RemoveFriendRequest, SubmitLeaveRequest, TransferRequest,
    UpdateLeaveRequest,
};
use crate::domain::user::{UpdateProfileRequest, UpdateSettingsRequest};
use actix_web::{HttpResponse, ResponseError, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

pub struct AppState {
    pub gateway: Arc<AccessGateway>,
    pub auth_service: Arc<AuthService>,
    pub transfer_service: Arc<TransferService>,
    pub friend_service: Arc<FriendService>,
    pub leave_service: Arc<LeaveService>,
}

// Uniform error body: {"error": message}
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;
        match self {
            ApiError::Validation(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = self.to_string();

        match self {
            ApiError::Internal(_) => error!(error = %message, status = %status, "Internal error"),
            _ => warn!(error = %message, status = %status, "Request rejected"),
        }

        HttpResponse::build(status).json(ErrorResponse { error: message })
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => ApiError::Validation(msg),
            DomainError::Conflict(msg) => ApiError::Conflict(msg),
            DomainError::Unauthorized(msg) => ApiError::Unauthorized(msg),
            DomainError::Forbidden(msg) => ApiError::Forbidden(msg),
            DomainError::NotFound(msg) => ApiError::NotFound(msg),
            DomainError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<DomainError>() {
            Ok(domain) => domain.into(),
            Err(other) => ApiError::Internal(other.to_string()),
        }
    }
}

// Query payloads. Every field defaults so a missing parameter reaches the
// handler's own check instead of failing extraction.

#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct EmailTokenQuery {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub token: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    timestamp: String,
}

pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

// Leave management

#[instrument(skip(state, query))]
pub async fn list_leave_requests(
    state: web::Data<AppState>,
    query: web::Query<TokenQuery>,
) -> Result<HttpResponse, ApiError> {
    state.gateway.require_session(&query.token)?;
    let requests = state.leave_service.list().await?;
    Ok(HttpResponse::Ok().json(requests))
}

#[instrument(skip(state, query))]
pub async fn leave_stats(
    state: web::Data<AppState>,
    query: web::Query<TokenQuery>,
) -> Result<HttpResponse, ApiError> {
    state.gateway.require_session(&query.token)?;
    let stats = state.leave_service.stats().await?;
    Ok(HttpResponse::Ok().json(stats))
}

#[instrument(skip(state, req), fields(employee = %req.employee_name))]
pub async fn submit_leave_request(
    state: web::Data<AppState>,
    req: web::Json<SubmitLeaveRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = req.into_inner();
    if req.employee_name.is_empty()
        || req.start_date.is_empty()
        || req.end_date.is_empty()
        || req.reason.is_empty()
        || req.token.is_empty()
    {
        return Err(ApiError::Validation("Missing required fields".to_string()));
    }
    state.gateway.require_session(&req.token)?;
    let request = state.leave_service.submit(req).await?;
    Ok(HttpResponse::Created().json(request))
}

#[instrument(skip(state, req), fields(id = %*path))]
pub async fn update_leave_request(
    state: web::Data<AppState>,
    path: web::Path<u32>,
    req: web::Json<UpdateLeaveRequest>,
) -> Result<HttpResponse, ApiError> {
    state.gateway.require_session(&req.token)?;
    let updated = state
        .leave_service
        .set_status(path.into_inner(), &req.status)
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}

// Users and friends

#[instrument(skip(state, query))]
pub async fn search_user(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, ApiError> {
    if query.q.is_empty() || !state.gateway.session_token_is_valid(&query.token) {
        return Err(ApiError::Validation("Invalid query or token".to_string()));
    }
    let user = state.friend_service.search(&query.q).await?;
    // A miss is a 200 with a JSON null body
    Ok(HttpResponse::Ok().json(user))
}

#[instrument(skip(state, query))]
pub async fn list_friends(
    state: web::Data<AppState>,
    query: web::Query<EmailTokenQuery>,
) -> Result<HttpResponse, ApiError> {
    if query.email.is_empty() || !state.gateway.session_token_is_valid(&query.token) {
        return Err(ApiError::Validation("Invalid email or token".to_string()));
    }
    let friends = state.friend_service.friends_of(&query.email).await?;
    Ok(HttpResponse::Ok().json(friends))
}

#[instrument(skip(state, req), fields(owner = %req.user_email))]
pub async fn add_friend(
    state: web::Data<AppState>,
    req: web::Json<AddFriendRequest>,
) -> Result<HttpResponse, ApiError> {
    if req.user_email.is_empty()
        || req.search_query.is_empty()
        || !state.gateway.session_token_is_valid(&req.token)
    {
        return Err(ApiError::Validation("Invalid input".to_string()));
    }
    let friend = state
        .friend_service
        .add_friend(&req.user_email, &req.search_query)
        .await?;
    Ok(HttpResponse::Ok().json(friend))
}

#[instrument(skip(state, req), fields(owner = %req.user_email))]
pub async fn remove_friend(
    state: web::Data<AppState>,
    req: web::Json<RemoveFriendRequest>,
) -> Result<HttpResponse, ApiError> {
    if req.user_email.is_empty()
        || req.friend_email.is_empty()
        || !state.gateway.session_token_is_valid(&req.token)
    {
        return Err(ApiError::Validation("Invalid input".to_string()));
    }
    state
        .friend_service
        .remove_friend(&req.user_email, &req.friend_email)
        .await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}

#[instrument(skip(state, req), fields(email = %req.email))]
pub async fn update_settings(
    state: web::Data<AppState>,
    req: web::Json<UpdateSettingsRequest>,
) -> Result<HttpResponse, ApiError> {
    if req.email.is_empty() || !state.gateway.session_token_is_valid(&req.token) {
        return Err(ApiError::Validation("Invalid input".to_string()));
    }
    let user = state.auth_service.update_settings(req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[instrument(skip(state, req), fields(email = %req.email))]
pub async fn update_profile(
    state: web::Data<AppState>,
    req: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, ApiError> {
    if req.email.is_empty() || !state.gateway.session_token_is_valid(&req.token) {
        return Err(ApiError::Validation("Invalid input".to_string()));
    }
    let user = state.auth_service.update_profile(req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

// Transfers

#[instrument(skip(state, req), fields(sender = %req.sender_email))]
pub async fn transfer(
    state: web::Data<AppState>,
    req: web::Json<TransferRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = req.into_inner();
    let amount_missing = req.amount.is_none_or(|a| a == 0.0);
    if amount_missing
        || req.recipient.is_empty()
        || req.sender_email.is_empty()
        || !state.gateway.session_token_is_valid(&req.token)
    {
        return Err(ApiError::Validation("Missing required fields".to_string()));
    }
    let receipt = state.transfer_service.record_transfer(req).await?;
    Ok(HttpResponse::Ok().json(receipt))
}

#[instrument(skip(state, query))]
pub async fn list_transactions(
    state: web::Data<AppState>,
    query: web::Query<EmailTokenQuery>,
) -> Result<HttpResponse, ApiError> {
    if query.email.is_empty() || !state.gateway.session_token_is_valid(&query.token) {
        return Err(ApiError::Validation("Invalid email or token".to_string()));
    }
    let transactions = state
        .transfer_service
        .transactions_for(&query.email)
        .await?;
    Ok(HttpResponse::Ok().json(transactions))
}

/// Always reports completion; the id is never looked up.
#[instrument(skip(state, query))]
pub async fn transaction_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<TokenQuery>,
) -> Result<HttpResponse, ApiError> {
    state.gateway.require_session(&query.token)?;
    let _ = path.into_inner();
    Ok(HttpResponse::Ok().json(serde_json::json!({ "status": "Completed" })))
}

#[instrument(skip(state, query))]
pub async fn admin_fees(
    state: web::Data<AppState>,
    query: web::Query<TokenQuery>,
) -> Result<HttpResponse, ApiError> {
    state.gateway.check_admin_token(&query.token)?;
    info!("Fee schedule requested");
    Ok(HttpResponse::Ok().json(state.transfer_service.fee_schedule()))
}
