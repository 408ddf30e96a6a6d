use actix_cors::Cors;
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, HttpServer, web};
use remit_api::application::auth_service::AuthService;
use remit_api::application::friend_service::FriendService;
use remit_api::application::gateway::AccessGateway;
use remit_api::application::leave_service::LeaveService;
use remit_api::application::transfer_service::TransferService;
use remit_api::data::Repositories;
use remit_api::data::admins::load_admins;
use remit_api::infrastructure::config::{AppConfig, StoreBackend};
use remit_api::infrastructure::logging::init_logging;
use remit_api::infrastructure::notify::BusinessNotifier;
use remit_api::presentation::auth::{admin_login, login, register};
use remit_api::presentation::handlers::{
    AppState, add_friend, admin_fees, health_check, leave_stats, list_friends,
    list_leave_requests, list_transactions, remove_friend, search_user, submit_leave_request,
    transaction_status, transfer, update_leave_request, update_profile, update_settings,
};
use remit_api::presentation::middleware::RequestTraceMiddleware;
use std::sync::Arc;
use tracing::info;

const JSON_PAYLOAD_LIMIT: usize = 10 * 1024 * 1024; // 10 MB

fn json_payload_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_PAYLOAD_LIMIT)
        .error_handler(|err, _req| {
            let (status, message) = match &err {
                actix_web::error::JsonPayloadError::Overflow { .. }
                | actix_web::error::JsonPayloadError::OverflowKnownLength { .. } => (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    "Request entity too large. Please upload a smaller file (max 10MB)."
                        .to_string(),
                ),
                other => (StatusCode::BAD_REQUEST, other.to_string()),
            };
            let response =
                HttpResponse::build(status).json(serde_json::json!({ "error": message }));
            actix_web::error::InternalError::from_response(err, response).into()
        })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_logging();

    let config = AppConfig::from_env()?;
    info!(backend = ?config.store_backend, "Initializing entity store");

    let repositories = match config.store_backend {
        StoreBackend::Json => Repositories::json_backed(&config.data_dir),
        StoreBackend::Mongodb => {
            Repositories::mongodb(&config.mongo_uri, &config.mongo_db).await?
        }
    };

    let admins = load_admins(config.admins_json.as_deref(), &config.admin_file);
    let gateway = Arc::new(AccessGateway::new(admins));
    let notifier = Arc::new(BusinessNotifier::new(&config.business_server_url));

    let state = web::Data::new(AppState {
        gateway,
        auth_service: Arc::new(AuthService::new(repositories.users.clone(), notifier)),
        transfer_service: Arc::new(TransferService::new(repositories.transactions.clone())),
        friend_service: Arc::new(FriendService::new(
            repositories.users.clone(),
            repositories.friends.clone(),
        )),
        leave_service: Arc::new(LeaveService::new(repositories.leave_requests.clone())),
    });

    let cors_origin = config.cors_origin.clone();
    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&cors_origin)
            .allow_any_method()
            .allow_any_header();
        App::new()
            .app_data(state.clone())
            .app_data(json_payload_config())
            .wrap(cors)
            .wrap(RequestTraceMiddleware)
            .route("/health", web::get().to(health_check))
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/admin-login", web::post().to(admin_login))
            .route("/leave-requests", web::get().to(list_leave_requests))
            .route("/leave-requests", web::post().to(submit_leave_request))
            .route("/leave-requests/{id}", web::put().to(update_leave_request))
            .route("/stats", web::get().to(leave_stats))
            .route("/search-user", web::get().to(search_user))
            .route("/transfer", web::post().to(transfer))
            .route("/transactions", web::get().to(list_transactions))
            .route("/transaction-status/{id}", web::get().to(transaction_status))
            .route("/friends", web::get().to(list_friends))
            .route("/add-friend", web::post().to(add_friend))
            .route("/remove-friend", web::post().to(remove_friend))
            .route("/update-settings", web::post().to(update_settings))
            .route("/update-profile", web::post().to(update_profile))
            .route("/admin/fees", web::get().to(admin_fees))
    });

    let server = server.bind(&config.bind_addr)?;
    info!(address = %config.bind_addr, "Main server running");
    server.run().await?;
    Ok(())
}
