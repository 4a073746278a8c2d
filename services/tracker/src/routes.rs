//! Tracker service routes

use axum::{
    Form, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    error::{TrackerError, is_unique_violation},
    guard::require_active_session,
    models::{Item, NewItem, NewSession, NewUser},
    state::AppState,
    summary::summarize,
    token::extract_token,
};

/// Request for user login
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Response for a successful login
#[derive(Serialize)]
pub struct LoginResponse {
    pub username: String,
    pub token: String,
}

/// Request for user logout
#[derive(Deserialize)]
pub struct LogoutForm {
    pub token: String,
}

/// Request for user registration
#[derive(Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
}

/// Response for a successful registration
#[derive(Serialize)]
pub struct RegisterResponse {
    pub username: String,
}

/// Request for adding an item
#[derive(Deserialize)]
pub struct AddItemForm {
    pub item_name: String,
    pub value_amount: Decimal,
    pub token: String,
}

/// Request for the summary of a token's items
#[derive(Deserialize)]
pub struct SummaryForm {
    pub token: String,
}

/// Response for the display view
#[derive(Serialize)]
pub struct DisplayResponse {
    pub token: String,
    pub items: Vec<Item>,
}

/// Create the router for the tracker service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/", get(index))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/signup", get(signup))
        .route("/register", post(register))
        .route("/display/:token", get(display))
        .route("/add", post(add))
        .route("/delete/:item_id/:token", get(delete))
        .route("/summary", post(summary))
        .route("/result/:total/:number_of_items/:token", get(result))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "tracker"
    }))
}

/// Login form descriptor (HTML rendering happens elsewhere)
pub async fn index() -> impl IntoResponse {
    Json(serde_json::json!({
        "view": "login",
        "fields": ["username", "password"]
    }))
}

/// Signup form descriptor
pub async fn signup() -> impl IntoResponse {
    Json(serde_json::json!({
        "view": "signup",
        "fields": ["username", "password"]
    }))
}

/// User login endpoint
///
/// Unknown usernames and wrong passwords produce the same Unauthorized
/// response, so a caller cannot probe which accounts exist.
pub async fn login(
    State(state): State<AppState>,
    Form(payload): Form<LoginForm>,
) -> Result<impl IntoResponse, TrackerError> {
    info!("Login attempt for user: {}", payload.username);

    let user = state
        .user_repository
        .find_by_username(&payload.username)
        .await
        .map_err(|e| {
            error!("Failed to look up user: {}", e);
            TrackerError::InternalServerError
        })?
        .ok_or(TrackerError::Unauthorized)?;

    let password_ok = state
        .user_repository
        .verify_password(&user, &payload.password)
        .await
        .map_err(|e| {
            error!("Failed to verify password: {}", e);
            TrackerError::InternalServerError
        })?;

    if !password_ok {
        return Err(TrackerError::Unauthorized);
    }

    // Every login gets a fresh token; earlier sessions stay active
    let new_session = NewSession {
        user_id: user.id,
        token: Uuid::new_v4().to_string(),
    };

    let session = state
        .session_repository
        .create(&new_session)
        .await
        .map_err(|e| {
            error!("Failed to create session: {}", e);
            TrackerError::InternalServerError
        })?;

    let response = LoginResponse {
        username: user.username,
        token: session.token,
    };

    Ok((StatusCode::OK, Json(response)))
}

/// User logout endpoint
///
/// Idempotent: an unknown or already-inactive token is a silent no-op.
pub async fn logout(
    State(state): State<AppState>,
    Form(payload): Form<LogoutForm>,
) -> Result<impl IntoResponse, TrackerError> {
    info!("Logout request");

    state
        .session_repository
        .deactivate(&payload.token)
        .await
        .map_err(|e| {
            error!("Failed to deactivate session: {}", e);
            TrackerError::InternalServerError
        })?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({"message": "Logged out successfully"})),
    ))
}

/// User registration endpoint
pub async fn register(
    State(state): State<AppState>,
    Form(payload): Form<RegisterForm>,
) -> Result<impl IntoResponse, TrackerError> {
    info!("Registration attempt for user: {}", payload.username);

    let new_user = NewUser {
        username: payload.username,
        password: payload.password,
    };

    let user = match state.user_repository.create(&new_user).await {
        Ok(user) => user,
        Err(e) if is_unique_violation(&e) => return Err(TrackerError::Conflict),
        Err(e) => {
            error!("Failed to create user: {}", e);
            return Err(TrackerError::InternalServerError);
        }
    };

    let response = RegisterResponse {
        username: user.username,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Display endpoint: the full item list for an authenticated caller
pub async fn display(
    State(state): State<AppState>,
    Path(raw_token): Path<String>,
) -> Result<impl IntoResponse, TrackerError> {
    let token = extract_token(&raw_token);
    require_active_session(&state.session_repository, token).await?;

    let items = state.item_repository.list_all().await.map_err(|e| {
        error!("Failed to list items: {}", e);
        TrackerError::InternalServerError
    })?;

    let response = DisplayResponse {
        token: token.to_string(),
        items,
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Add-item endpoint; redirects to the display view
pub async fn add(
    State(state): State<AppState>,
    Form(payload): Form<AddItemForm>,
) -> Result<impl IntoResponse, TrackerError> {
    let token = extract_token(&payload.token).to_string();
    require_active_session(&state.session_repository, &token).await?;

    let new_item = NewItem {
        name: payload.item_name,
        value: payload.value_amount,
        token: token.clone(),
    };

    state.item_repository.add(&new_item).await.map_err(|e| {
        error!("Failed to add item: {}", e);
        TrackerError::InternalServerError
    })?;

    Ok(Redirect::to(&format!("/display/{}", token)))
}

/// Delete-item endpoint; redirects to the display view
///
/// Deletion is scoped to the caller's token. A miss is a 404, never a
/// crash.
pub async fn delete(
    State(state): State<AppState>,
    Path((item_id, raw_token)): Path<(Uuid, String)>,
) -> Result<impl IntoResponse, TrackerError> {
    let token = extract_token(&raw_token);
    require_active_session(&state.session_repository, token).await?;

    let deleted = state
        .item_repository
        .delete(item_id, token)
        .await
        .map_err(|e| {
            error!("Failed to delete item: {}", e);
            TrackerError::InternalServerError
        })?;

    if !deleted {
        return Err(TrackerError::NotFound);
    }

    Ok(Redirect::to(&format!("/display/{}", token)))
}

/// Summary endpoint; redirects to the result view
pub async fn summary(
    State(state): State<AppState>,
    Form(payload): Form<SummaryForm>,
) -> Result<impl IntoResponse, TrackerError> {
    let token = extract_token(&payload.token);
    require_active_session(&state.session_repository, token).await?;

    let summary = summarize(&state.item_repository, token)
        .await
        .map_err(|e| {
            error!("Failed to summarize items: {}", e);
            TrackerError::InternalServerError
        })?;

    Ok(Redirect::to(&format!(
        "/result/{}/{}/{}",
        summary.total, summary.count, token
    )))
}

/// Result view: totals computed by the summary endpoint
pub async fn result(
    Path((total, number_of_items, raw_token)): Path<(Decimal, i64, String)>,
) -> impl IntoResponse {
    let token = extract_token(&raw_token).to_string();

    Json(serde_json::json!({
        "total": total,
        "number_of_items": number_of_items,
        "token": token,
    }))
}
