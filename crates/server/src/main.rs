// Copyright (C) 2026 Nobet Market Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use clap::Parser;
use nobet_api::{
    AdminDeleteShiftRequest, ApiError, ConversationSummary, ConversationView, CreateShiftRequest,
    DeletedShiftView, MessageView, ProfileView, SendMessageRequest, ShiftView, SignInRequest,
    SignInResponse, SignUpRequest, SignUpResponse, UpdateProfileRequest, UpdateShiftRequest,
};
use nobet_persistence::{PersistenceError, SqlitePersistence};
use nobet_roster::StudentRoster;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info};

mod session;

use session::{SessionToken, SessionUser};

/// Nobet Market Server - HTTP server for the duty-shift marketplace
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Require accounts to verify their email before signing in
    #[arg(long, default_value_t = false)]
    require_email_verification: bool,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer wrapped for safe concurrent access.
    persistence: Arc<Mutex<SqlitePersistence>>,
    /// The student roster gating registration.
    roster: Arc<StudentRoster>,
    /// Whether sign-in requires a verified email.
    require_email_verification: bool,
}

/// Query parameters for the marketplace listing.
#[derive(Debug, Deserialize)]
struct ListShiftsQuery {
    /// Optional medical specialty filter.
    medical_field: Option<String>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// API response for operations with no payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SuccessResponse {
    /// Success indicator.
    success: bool,
}

/// API response for administrator deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AdminDeleteResponse {
    /// Success indicator.
    success: bool,
    /// The snapshot's ID in the deleted-listing log.
    deleted_shift_id: i64,
}

/// API response for the unread message badge.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UnreadCountResponse {
    /// Unread messages across all conversations.
    unread: i64,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } | ApiError::RegistrationRejected { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        error!(error = %err, "Persistence error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Persistence error: {err}"),
        }
    }
}

// ============================================================================
// Auth handlers
// ============================================================================

/// Handler for POST `/auth/signup`.
async fn handle_sign_up(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<SignUpRequest>,
) -> Result<Json<SignUpResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response = nobet_api::sign_up(
        &mut persistence,
        &state.roster,
        &request,
        state.require_email_verification,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(response))
}

/// Handler for POST `/auth/login`.
async fn handle_sign_in(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<SignInResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let response = nobet_api::sign_in(
        &mut persistence,
        &request,
        state.require_email_verification,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(response))
}

/// Handler for POST `/auth/logout`.
async fn handle_sign_out(
    SessionToken(token): SessionToken,
    AxumState(state): AxumState<AppState>,
) -> Result<Json<SuccessResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    nobet_api::sign_out(&mut persistence, &token)?;
    Ok(Json(SuccessResponse { success: true }))
}

/// Handler for GET `/me`.
async fn handle_me(
    SessionUser(user): SessionUser,
    AxumState(state): AxumState<AppState>,
) -> Result<Json<ProfileView>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let profile = nobet_api::get_profile(&mut persistence, user.account_id)?;
    Ok(Json(profile))
}

/// Handler for PUT `/profile`.
async fn handle_update_profile(
    SessionUser(user): SessionUser,
    AxumState(state): AxumState<AppState>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileView>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let profile = nobet_api::update_profile(
        &mut persistence,
        user.account_id,
        &request,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(profile))
}

// ============================================================================
// Listing handlers
// ============================================================================

/// Handler for GET `/shifts`.
async fn handle_list_shifts(
    SessionUser(_user): SessionUser,
    AxumState(state): AxumState<AppState>,
    Query(query): Query<ListShiftsQuery>,
) -> Result<Json<Vec<ShiftView>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let shifts = nobet_api::list_available_shifts(
        &mut persistence,
        query.medical_field.as_deref(),
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(shifts))
}

/// Handler for POST `/shifts`.
async fn handle_create_shift(
    SessionUser(user): SessionUser,
    AxumState(state): AxumState<AppState>,
    Json(request): Json<CreateShiftRequest>,
) -> Result<Json<ShiftView>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let shift = nobet_api::create_shift(
        &mut persistence,
        user.account_id,
        &request,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(shift))
}

/// Handler for GET `/shifts/{shift_id}`.
async fn handle_get_shift(
    SessionUser(_user): SessionUser,
    AxumState(state): AxumState<AppState>,
    Path(shift_id): Path<i64>,
) -> Result<Json<ShiftView>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let shift = nobet_api::get_shift(&mut persistence, shift_id, OffsetDateTime::now_utc())?;
    Ok(Json(shift))
}

/// Handler for PUT `/shifts/{shift_id}`.
async fn handle_update_shift(
    SessionUser(user): SessionUser,
    AxumState(state): AxumState<AppState>,
    Path(shift_id): Path<i64>,
    Json(request): Json<UpdateShiftRequest>,
) -> Result<Json<ShiftView>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let shift = nobet_api::update_shift(
        &mut persistence,
        user.account_id,
        shift_id,
        &request,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(shift))
}

/// Handler for DELETE `/shifts/{shift_id}`.
async fn handle_delete_shift(
    SessionUser(user): SessionUser,
    AxumState(state): AxumState<AppState>,
    Path(shift_id): Path<i64>,
) -> Result<Json<SuccessResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    nobet_api::delete_shift(&mut persistence, user.account_id, shift_id)?;
    Ok(Json(SuccessResponse { success: true }))
}

// ============================================================================
// Transaction handlers
// ============================================================================

/// Handler for POST `/shifts/{shift_id}/purchase`.
async fn handle_purchase_shift(
    SessionUser(user): SessionUser,
    AxumState(state): AxumState<AppState>,
    Path(shift_id): Path<i64>,
) -> Result<Json<ShiftView>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let shift = nobet_api::purchase_shift(
        &mut persistence,
        user.account_id,
        shift_id,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(shift))
}

/// Handler for POST `/shifts/{shift_id}/complete`.
async fn handle_complete_shift(
    SessionUser(user): SessionUser,
    AxumState(state): AxumState<AppState>,
    Path(shift_id): Path<i64>,
) -> Result<Json<ShiftView>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let shift = nobet_api::complete_shift(
        &mut persistence,
        user.account_id,
        shift_id,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(shift))
}

/// Handler for POST `/shifts/{shift_id}/cancel`.
async fn handle_cancel_shift(
    SessionUser(user): SessionUser,
    AxumState(state): AxumState<AppState>,
    Path(shift_id): Path<i64>,
) -> Result<Json<ShiftView>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let shift = nobet_api::cancel_shift(
        &mut persistence,
        user.account_id,
        shift_id,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(shift))
}

// ============================================================================
// History handlers
// ============================================================================

/// Handler for GET `/my/shifts`.
async fn handle_my_shifts(
    SessionUser(user): SessionUser,
    AxumState(state): AxumState<AppState>,
) -> Result<Json<Vec<ShiftView>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let shifts =
        nobet_api::list_my_shifts(&mut persistence, user.account_id, OffsetDateTime::now_utc())?;
    Ok(Json(shifts))
}

/// Handler for GET `/my/purchases`.
async fn handle_my_purchases(
    SessionUser(user): SessionUser,
    AxumState(state): AxumState<AppState>,
) -> Result<Json<Vec<ShiftView>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let shifts =
        nobet_api::list_my_purchases(&mut persistence, user.account_id, OffsetDateTime::now_utc())?;
    Ok(Json(shifts))
}

/// Handler for GET `/my/history`.
async fn handle_sales_history(
    SessionUser(user): SessionUser,
    AxumState(state): AxumState<AppState>,
) -> Result<Json<Vec<ShiftView>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let shifts = nobet_api::list_sales_history(
        &mut persistence,
        user.account_id,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(shifts))
}

// ============================================================================
// Administration handlers
// ============================================================================

/// Handler for POST `/shifts/{shift_id}/admin-delete`.
async fn handle_admin_delete_shift(
    SessionUser(user): SessionUser,
    AxumState(state): AxumState<AppState>,
    Path(shift_id): Path<i64>,
    Json(request): Json<AdminDeleteShiftRequest>,
) -> Result<Json<AdminDeleteResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let deleted_shift_id = nobet_api::admin_delete_shift(
        &mut persistence,
        &user.profile,
        shift_id,
        &request,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(AdminDeleteResponse {
        success: true,
        deleted_shift_id,
    }))
}

/// Handler for GET `/admin/deleted-shifts`.
async fn handle_list_deleted_shifts(
    SessionUser(user): SessionUser,
    AxumState(state): AxumState<AppState>,
) -> Result<Json<Vec<DeletedShiftView>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let log = nobet_api::list_deleted_shifts(&mut persistence, &user.profile)?;
    Ok(Json(log))
}

/// Handler for DELETE `/admin/deleted-shifts/{deleted_shift_id}`.
async fn handle_purge_deleted_shift(
    SessionUser(user): SessionUser,
    AxumState(state): AxumState<AppState>,
    Path(deleted_shift_id): Path<i64>,
) -> Result<Json<SuccessResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    nobet_api::purge_deleted_shift(&mut persistence, &user.profile, deleted_shift_id)?;
    Ok(Json(SuccessResponse { success: true }))
}

// ============================================================================
// Messaging handlers
// ============================================================================

/// Handler for GET `/shifts/{shift_id}/messages`.
async fn handle_get_conversation(
    SessionUser(user): SessionUser,
    AxumState(state): AxumState<AppState>,
    Path(shift_id): Path<i64>,
) -> Result<Json<ConversationView>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let conversation = nobet_api::get_conversation(
        &mut persistence,
        user.account_id,
        shift_id,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(conversation))
}

/// Handler for POST `/shifts/{shift_id}/messages`.
async fn handle_send_message(
    SessionUser(user): SessionUser,
    AxumState(state): AxumState<AppState>,
    Path(shift_id): Path<i64>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<MessageView>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let message = nobet_api::send_message(
        &mut persistence,
        user.account_id,
        shift_id,
        &request,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(message))
}

/// Handler for GET `/conversations`.
async fn handle_list_conversations(
    SessionUser(user): SessionUser,
    AxumState(state): AxumState<AppState>,
) -> Result<Json<Vec<ConversationSummary>>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let inbox = nobet_api::list_conversations(&mut persistence, user.account_id)?;
    Ok(Json(inbox))
}

/// Handler for GET `/messages/unread`.
async fn handle_unread_count(
    SessionUser(user): SessionUser,
    AxumState(state): AxumState<AppState>,
) -> Result<Json<UnreadCountResponse>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let unread = nobet_api::unread_message_total(&mut persistence, user.account_id)?;
    Ok(Json(UnreadCountResponse { unread }))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/auth/signup", post(handle_sign_up))
        .route("/auth/login", post(handle_sign_in))
        .route("/auth/logout", post(handle_sign_out))
        .route("/me", get(handle_me))
        .route("/profile", put(handle_update_profile))
        .route("/shifts", get(handle_list_shifts))
        .route("/shifts", post(handle_create_shift))
        .route("/shifts/{shift_id}", get(handle_get_shift))
        .route("/shifts/{shift_id}", put(handle_update_shift))
        .route("/shifts/{shift_id}", delete(handle_delete_shift))
        .route("/shifts/{shift_id}/purchase", post(handle_purchase_shift))
        .route("/shifts/{shift_id}/complete", post(handle_complete_shift))
        .route("/shifts/{shift_id}/cancel", post(handle_cancel_shift))
        .route(
            "/shifts/{shift_id}/admin-delete",
            post(handle_admin_delete_shift),
        )
        .route("/shifts/{shift_id}/messages", get(handle_get_conversation))
        .route("/shifts/{shift_id}/messages", post(handle_send_message))
        .route("/my/shifts", get(handle_my_shifts))
        .route("/my/purchases", get(handle_my_purchases))
        .route("/my/history", get(handle_sales_history))
        .route("/conversations", get(handle_list_conversations))
        .route("/messages/unread", get(handle_unread_count))
        .route("/admin/deleted-shifts", get(handle_list_deleted_shifts))
        .route(
            "/admin/deleted-shifts/{deleted_shift_id}",
            delete(handle_purge_deleted_shift),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Nobet Market Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: SqlitePersistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqlitePersistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqlitePersistence::new_in_memory()?
    };

    let roster: StudentRoster = StudentRoster::embedded()?;
    let counts = roster.counts();
    info!(
        "Loaded student roster: {} tr, {} en",
        counts.turkish, counts.english
    );

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        roster: Arc::new(roster),
        require_email_verification: args.require_email_verification,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
