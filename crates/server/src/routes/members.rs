//! `/members` controller: request shape validation, existence checks and
//! status mapping in front of `MembersService`.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use models::errors::ModelError;
use models::member::{validate_name, validate_role};
use service::member::{Member, MemberPatch, NewMember};

use crate::{errors::ApiError, state::ServerState};

#[derive(Debug, Serialize)]
pub struct MembersResponse {
    pub members: Vec<Member>,
}

#[derive(Debug, Serialize)]
pub struct MemberResponse {
    pub member: Member,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateMemberInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateMemberInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl CreateMemberInput {
    /// Both fields are required and must be non-empty. All violations are
    /// reported together.
    fn validate(self) -> Result<NewMember, ApiError> {
        let name = self.name.unwrap_or_default();
        let role = self.role.unwrap_or_default();
        let problems: Vec<String> = [validate_name(&name), validate_role(&role)]
            .into_iter()
            .filter_map(Result::err)
            .map(|ModelError::Validation(m)| m)
            .collect();
        if !problems.is_empty() {
            return Err(ApiError::BadRequest(problems.join(", ")));
        }
        Ok(NewMember { name, role })
    }
}

impl UpdateMemberInput {
    /// Omitted fields stay untouched; provided ones must be non-empty.
    fn validate(self) -> Result<MemberPatch, ApiError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(role) = &self.role {
            validate_role(role)?;
        }
        Ok(MemberPatch { name: self.name, role: self.role })
    }
}

/// Path ids must be UUIDs; anything else is a 400 before storage is touched.
pub fn parse_member_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest("Validation failed (uuid is expected)".into()))
}

async fn require_member(state: &ServerState, id: Uuid) -> Result<Member, ApiError> {
    state.members.find_by_id(id).await?.ok_or_else(ApiError::member_not_found)
}

#[utoipa::path(
    get, path = "/members", tag = "members",
    responses(
        (status = 200, description = "All members", body = crate::openapi::MembersResponseDoc),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn list_members(State(state): State<ServerState>) -> Result<Json<MembersResponse>, ApiError> {
    let members = state.members.find_all().await?;
    info!(count = members.len(), "list members");
    Ok(Json(MembersResponse { members }))
}

#[utoipa::path(
    get, path = "/members/{id}", tag = "members",
    params(("id" = Uuid, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Member found", body = crate::openapi::MemberResponseDoc),
        (status = 400, description = "Malformed id", body = crate::openapi::ErrorResponseDoc),
        (status = 404, description = "Member not found", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn get_member(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<MemberResponse>, ApiError> {
    let id = parse_member_id(&id)?;
    let member = require_member(&state, id).await?;
    Ok(Json(MemberResponse { member }))
}

#[utoipa::path(
    post, path = "/members", tag = "members",
    request_body = crate::openapi::CreateMemberRequestDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::MemberResponseDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn create_member(
    State(state): State<ServerState>,
    payload: Result<Json<CreateMemberInput>, JsonRejection>,
) -> Result<(StatusCode, Json<MemberResponse>), ApiError> {
    let Json(input) = payload?;
    let member = state.members.create(input.validate()?).await?;
    info!(id = %member.id, "created member");
    Ok((StatusCode::CREATED, Json(MemberResponse { member })))
}

#[utoipa::path(
    put, path = "/members/{id}", tag = "members",
    params(("id" = Uuid, Path, description = "Member ID")),
    request_body = crate::openapi::UpdateMemberRequestDoc,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponseDoc),
        (status = 404, description = "Member not found", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn update_member(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateMemberInput>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = parse_member_id(&id)?;
    let Json(input) = payload?;
    let patch = input.validate()?;
    require_member(&state, id).await?;
    state.members.update(id, patch).await?;
    info!(%id, "updated member");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete, path = "/members/{id}", tag = "members",
    params(("id" = Uuid, Path, description = "Member ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Malformed id", body = crate::openapi::ErrorResponseDoc),
        (status = 404, description = "Member not found", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn delete_member(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_member_id(&id)?;
    require_member(&state, id).await?;
    state.members.delete(id).await?;
    info!(%id, "deleted member");
    Ok(StatusCode::NO_CONTENT)
}
