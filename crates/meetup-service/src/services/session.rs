//! Session service - username/password login issuing a bearer token

use tracing::instrument;
use validator::Validate;

use meetup_core::DomainError;

use crate::dto::requests::CreateSessionRequest;
use crate::dto::responses::SessionResponse;
use crate::services::context::ServiceContext;
use crate::services::error::{ServiceError, ServiceResult};

/// Service for session creation
pub struct SessionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SessionService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Authenticate a user and issue an access token
    ///
    /// An unknown username and a wrong password are indistinguishable to
    /// the caller.
    #[instrument(skip(self, request))]
    pub async fn create_session(
        &self,
        request: CreateSessionRequest,
    ) -> ServiceResult<SessionResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let user = self
            .ctx
            .user_repo()
            .get_by_username(&request.username)
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        if !user.password_matches(&request.password) {
            return Err(DomainError::InvalidCredentials.into());
        }

        let token = self.ctx.jwt_service().issue_token(user.id)?;

        Ok(SessionResponse {
            access_token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
        })
    }
}
