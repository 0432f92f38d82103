use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use super::domain::{Member, MemberPatch, NewMember};
use super::repository::MemberRepository;
use crate::errors::ServiceError;

/// Member-records service. Forwards each call to the repository unchanged;
/// lookups report absence as `None` instead of an error.
pub struct MembersService<R: MemberRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: MemberRepository + ?Sized> MembersService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn find_all(&self) -> Result<Vec<Member>, ServiceError> {
        self.repo.find_all().await
    }

    /// Look up a member by id.
    ///
    /// # Examples
    /// ```
    /// use service::member::{repository::mock::MockMemberRepository, MembersService};
    /// use std::sync::Arc;
    /// let svc = MembersService::new(Arc::new(MockMemberRepository::default()));
    /// let found = tokio_test::block_on(svc.find_by_id(uuid::Uuid::new_v4())).unwrap();
    /// assert!(found.is_none());
    /// ```
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Member>, ServiceError> {
        self.repo.find_by_id(id).await
    }

    /// Create a member; the repository assigns the id.
    ///
    /// # Examples
    /// ```
    /// use service::member::{repository::mock::MockMemberRepository, MembersService, NewMember};
    /// use std::sync::Arc;
    /// let svc = MembersService::new(Arc::new(MockMemberRepository::default()));
    /// let input = NewMember { name: "Tom Delvalle".into(), role: "CEO".into() };
    /// let member = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(member.name, "Tom Delvalle");
    /// ```
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: NewMember) -> Result<Member, ServiceError> {
        let member = self.repo.create(input).await?;
        info!(id = %member.id, "member_created");
        Ok(member)
    }

    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: Uuid, patch: MemberPatch) -> Result<(), ServiceError> {
        self.repo.update(id, patch).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        self.repo.delete(id).await
    }
}
