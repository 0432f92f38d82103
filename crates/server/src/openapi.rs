//! OpenAPI document for the HTTP surface, served at `/api-docs/openapi.json`.
//! The `*Doc` types mirror the wire shapes for schema generation only.

use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MemberDoc { pub id: Uuid, pub name: String, pub role: String }

#[derive(ToSchema)]
pub struct MembersResponseDoc { pub members: Vec<MemberDoc> }

#[derive(ToSchema)]
pub struct MemberResponseDoc { pub member: MemberDoc }

#[derive(ToSchema)]
pub struct CreateMemberRequestDoc { pub name: String, pub role: String }

#[derive(ToSchema)]
pub struct UpdateMemberRequestDoc { pub name: Option<String>, pub role: Option<String> }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponseDoc { pub status_code: u16, pub message: String, pub error: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::members::list_members,
        crate::routes::members::get_member,
        crate::routes::members::create_member,
        crate::routes::members::update_member,
        crate::routes::members::delete_member,
    ),
    components(
        schemas(
            HealthResponse,
            MemberDoc,
            MembersResponseDoc,
            MemberResponseDoc,
            CreateMemberRequestDoc,
            UpdateMemberRequestDoc,
            ErrorResponseDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "members", description = "Team member records"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_member_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.as_str() == "/members"));
        assert!(paths.iter().any(|p| p.as_str() == "/members/{id}"));
        assert!(paths.iter().any(|p| p.as_str() == "/health"));
    }
}
