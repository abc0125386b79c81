use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::request::Parts,
    Json, RequestPartsExt,
};
use axum_extra::{
    headers::{authorization::Basic, Authorization},
    TypedHeader,
};

use service::auth::domain::{Account, AccountView, Credential};

use crate::errors::ApiError;
use crate::state::ServerState;

/// Account resolved from an `Authorization: Basic` header.
///
/// A missing or undecodable header is rejected exactly like bad credentials.
pub struct AuthenticatedAccount(pub Account);

#[async_trait]
impl FromRequestParts<ServerState> for AuthenticatedAccount {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &ServerState) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(basic)) = parts
            .extract::<TypedHeader<Authorization<Basic>>>()
            .await
            .map_err(|e| {
                tracing::debug!(reason = %e, "missing or malformed basic credentials");
                ApiError::Unauthorized
            })?;
        let account = state.auth.authenticate(basic.username(), basic.password()).await?;
        Ok(Self(account))
    }
}

#[utoipa::path(post, path = "/auth/register", tag = "auth", request_body = crate::openapi::RegisterRequest, responses((status = 200, description = "Registered", body = crate::openapi::AccountResponse), (status = 422, description = "Registration failed")))]
pub async fn register(State(state): State<ServerState>, Json(input): Json<Credential>) -> Result<Json<AccountView>, ApiError> {
    let account = state.auth.register(&input.username, &input.secret).await?;
    Ok(Json(account.into()))
}

#[utoipa::path(get, path = "/auth/get-user-info", tag = "auth", responses((status = 200, description = "Authenticated account", body = crate::openapi::AccountResponse), (status = 401, description = "Unauthorized")))]
pub async fn get_user_info(AuthenticatedAccount(account): AuthenticatedAccount) -> Json<AccountView> {
    Json(account.into())
}
