//! Session handlers
//!
//! Username/password login issuing a bearer token.

use axum::{extract::State, Json};
use meetup_service::dto::{CreateSessionRequest, SessionResponse};
use meetup_service::SessionService;

use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Create a session (login)
///
/// POST /session
pub async fn create_session(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> ApiResult<Created<Json<SessionResponse>>> {
    let service = SessionService::new(state.service_context());
    let response = service.create_session(request).await?;
    Ok(Created(Json(response)))
}
