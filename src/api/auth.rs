use axum::{
    Json,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, ApiResponse, types::AccountDto, types::SessionStateDto};
use crate::db::Account;
use crate::services::AuthenticatedIdentity;
use crate::state::AppState;

/// Session key holding the authenticated account id.
const SESSION_ACCOUNT_KEY: &str = "account_id";

// ============================================================================
// Request Types
// ============================================================================

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Gate for protected routes: rehydrates the session account before the
/// handler runs and stashes it in request extensions. Anonymous callers are
/// redirected to the login page instead of reaching the handler.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(account) = load_session_account(&state, &session).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    tracing::Span::current().record("account_id", account.id());
    request.extensions_mut().insert(account);

    Ok(next.run(request).await)
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /login and GET /register
/// Current session state; the form pages use it to redirect callers that are
/// already signed in.
pub async fn session_state(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<SessionStateDto>>, ApiError> {
    let account = load_session_account(&state, &session).await?;

    Ok(Json(ApiResponse::success(SessionStateDto {
        authenticated: account.is_some(),
        account: account.map(AccountDto::from),
    })))
}

/// POST /login
/// Authenticate with username and password and bind the session
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AccountDto>>, ApiError> {
    if payload.username.is_empty() {
        return Err(ApiError::validation("Username is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let account = state
        .auth
        .login(&payload.username, &payload.password)
        .await?;

    bind_session(&session, &account).await?;

    tracing::info!(account_id = account.id, username = %account.username, "Login");

    Ok(Json(ApiResponse::success(AccountDto::from(account))))
}

/// POST /register
/// Create an account and bind the session to it
pub async fn register(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<AccountDto>>, ApiError> {
    let account = state
        .auth
        .register(
            &payload.username,
            &payload.password,
            &payload.confirm_password,
        )
        .await?;

    bind_session(&session, &account).await?;

    tracing::info!(account_id = account.id, username = %account.username, "Account registered");

    Ok(Json(ApiResponse::success(AccountDto::from(account))))
}

/// POST /logout
/// Invalidate the session and send the caller back to the login page
pub async fn logout(session: Session) -> Result<Redirect, ApiError> {
    let account_id: Option<i32> = session.get(SESSION_ACCOUNT_KEY).await.unwrap_or_default();

    session
        .flush()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to end session: {e}")))?;

    if let Some(id) = account_id {
        tracing::info!(account_id = id, "Logout");
    }

    Ok(Redirect::to("/login"))
}

// ============================================================================
// Helpers
// ============================================================================

/// Bind a session to an authenticated identity.
async fn bind_session(
    session: &Session,
    identity: &impl AuthenticatedIdentity,
) -> Result<(), ApiError> {
    session
        .insert(SESSION_ACCOUNT_KEY, identity.id())
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))
}

/// Rehydrate the account referenced by the session, if any. A session whose
/// account no longer exists reads as anonymous.
pub(crate) async fn load_session_account(
    state: &AppState,
    session: &Session,
) -> Result<Option<Account>, ApiError> {
    let account_id = session
        .get::<i32>(SESSION_ACCOUNT_KEY)
        .await
        .map_err(|e| ApiError::internal(format!("Session error: {e}")))?;

    let Some(account_id) = account_id else {
        return Ok(None);
    };

    let account = state.auth.account_by_id(account_id).await?;
    Ok(account)
}
