use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
};
use tracing::debug;
use uuid::Uuid;

use models::member;

use super::domain::{Member, MemberPatch, NewMember};
use crate::errors::ServiceError;

/// Persistence operations for members, one method per storage call.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Member>, ServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Member>, ServiceError>;
    async fn create(&self, input: NewMember) -> Result<Member, ServiceError>;
    async fn update(&self, id: Uuid, patch: MemberPatch) -> Result<(), ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<(), ServiceError>;
}

/// SeaORM-backed repository implementation. `update` and `delete` fail when
/// no row matched the id, like a `where: {id}` write against a missing record.
pub struct SeaOrmMemberRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmMemberRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl MemberRepository for SeaOrmMemberRepository {
    async fn find_all(&self) -> Result<Vec<Member>, ServiceError> {
        member::Entity::find().all(&self.db).await.map_err(ServiceError::db)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Member>, ServiceError> {
        member::Entity::find_by_id(id).one(&self.db).await.map_err(ServiceError::db)
    }

    async fn create(&self, input: NewMember) -> Result<Member, ServiceError> {
        let am = member::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            role: Set(input.role),
        };
        am.insert(&self.db).await.map_err(ServiceError::db)
    }

    async fn update(&self, id: Uuid, patch: MemberPatch) -> Result<(), ServiceError> {
        if patch.is_empty() {
            debug!(%id, "empty member patch; nothing to write");
            return Ok(());
        }
        let am = member::ActiveModel {
            id: NotSet,
            name: patch.name.map_or(NotSet, Set),
            role: patch.role.map_or(NotSet, Set),
        };
        let res = member::Entity::update_many()
            .set(am)
            .filter(member::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(ServiceError::db)?;
        if res.rows_affected == 0 {
            return Err(ServiceError::db(DbErr::RecordNotUpdated));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let res = member::Entity::delete_by_id(id).exec(&self.db).await.map_err(ServiceError::db)?;
        if res.rows_affected == 0 {
            return Err(ServiceError::db(DbErr::RecordNotFound(format!("member {id}"))));
        }
        Ok(())
    }
}

/// In-memory repository that records every call, for tests and doc examples.
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// One recorded repository invocation with its arguments.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum RepoCall {
        FindAll,
        FindById(Uuid),
        Create(NewMember),
        Update(Uuid, MemberPatch),
        Delete(Uuid),
    }

    #[derive(Default)]
    pub struct MockMemberRepository {
        members: Mutex<Vec<Member>>,
        calls: Mutex<Vec<RepoCall>>,
        failure: Mutex<Option<String>>,
    }

    impl MockMemberRepository {
        pub fn with_members(members: Vec<Member>) -> Self {
            Self { members: Mutex::new(members), ..Default::default() }
        }

        /// Make every subsequent call fail with `ServiceError::Db(msg)`.
        pub fn fail_with(&self, msg: &str) {
            *self.failure.lock().unwrap() = Some(msg.to_string());
        }

        pub fn calls(&self) -> Vec<RepoCall> {
            self.calls.lock().unwrap().clone()
        }

        pub fn count_calls(&self, pred: impl Fn(&RepoCall) -> bool) -> usize {
            self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
        }

        pub fn members(&self) -> Vec<Member> {
            self.members.lock().unwrap().clone()
        }

        fn record(&self, call: RepoCall) -> Result<(), ServiceError> {
            self.calls.lock().unwrap().push(call);
            match self.failure.lock().unwrap().as_ref() {
                Some(msg) => Err(ServiceError::Db(msg.clone())),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl MemberRepository for MockMemberRepository {
        async fn find_all(&self) -> Result<Vec<Member>, ServiceError> {
            self.record(RepoCall::FindAll)?;
            Ok(self.members())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Member>, ServiceError> {
            self.record(RepoCall::FindById(id))?;
            Ok(self.members.lock().unwrap().iter().find(|m| m.id == id).cloned())
        }

        async fn create(&self, input: NewMember) -> Result<Member, ServiceError> {
            self.record(RepoCall::Create(input.clone()))?;
            let m = Member { id: Uuid::new_v4(), name: input.name, role: input.role };
            self.members.lock().unwrap().push(m.clone());
            Ok(m)
        }

        async fn update(&self, id: Uuid, patch: MemberPatch) -> Result<(), ServiceError> {
            self.record(RepoCall::Update(id, patch.clone()))?;
            if patch.is_empty() {
                return Ok(());
            }
            let mut members = self.members.lock().unwrap();
            let m = members
                .iter_mut()
                .find(|m| m.id == id)
                .ok_or_else(|| ServiceError::db(DbErr::RecordNotUpdated))?;
            if let Some(name) = patch.name {
                m.name = name;
            }
            if let Some(role) = patch.role {
                m.role = role;
            }
            Ok(())
        }

        async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
            self.record(RepoCall::Delete(id))?;
            let mut members = self.members.lock().unwrap();
            let before = members.len();
            members.retain(|m| m.id != id);
            if members.len() == before {
                return Err(ServiceError::db(DbErr::RecordNotFound(format!("member {id}"))));
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn john(id: Uuid) -> Member {
        Member { id, name: "John Doe".into(), role: "CTO".into() }
    }

    #[tokio::test]
    async fn find_all_returns_rows_verbatim() -> anyhow::Result<()> {
        let rows = vec![john(Uuid::new_v4()), john(Uuid::new_v4())];
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([rows.clone()])
            .into_connection();
        let repo = SeaOrmMemberRepository::new(db);

        assert_eq!(repo.find_all().await?, rows);
        Ok(())
    }

    #[tokio::test]
    async fn find_all_empty_table() -> anyhow::Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<Member>::new()])
            .into_connection();
        let repo = SeaOrmMemberRepository::new(db);

        assert!(repo.find_all().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn find_by_id_absent_is_none() -> anyhow::Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<Member>::new()])
            .into_connection();
        let repo = SeaOrmMemberRepository::new(db);

        assert_eq!(repo.find_by_id(Uuid::new_v4()).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn create_returns_inserted_row() -> anyhow::Result<()> {
        let id = Uuid::new_v4();
        let inserted = Member { id, name: "Tom Delvalle".into(), role: "CEO".into() };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![inserted.clone()]])
            .into_connection();
        let repo = SeaOrmMemberRepository::new(db);

        let created = repo
            .create(NewMember { name: "Tom Delvalle".into(), role: "CEO".into() })
            .await?;
        assert_eq!(created, inserted);
        Ok(())
    }

    #[tokio::test]
    async fn update_and_delete_issue_one_statement_each() -> anyhow::Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult { last_insert_id: 0, rows_affected: 1 },
                MockExecResult { last_insert_id: 0, rows_affected: 1 },
            ])
            .into_connection();
        let repo = SeaOrmMemberRepository::new(db);
        let id = Uuid::new_v4();

        repo.update(id, MemberPatch { name: Some("George Rivera".into()), role: None }).await?;
        repo.delete(id).await?;

        assert_eq!(repo.db.into_transaction_log().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn update_and_delete_of_vanished_row_fail() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult { last_insert_id: 0, rows_affected: 0 },
                MockExecResult { last_insert_id: 0, rows_affected: 0 },
            ])
            .into_connection();
        let repo = SeaOrmMemberRepository::new(db);
        let id = Uuid::new_v4();

        let updated = repo.update(id, MemberPatch { name: Some("x".into()), role: None }).await;
        let deleted = repo.delete(id).await;

        assert!(matches!(updated, Err(ServiceError::Db(_))));
        assert!(matches!(deleted, Err(ServiceError::Db(_))));
    }

    #[tokio::test]
    async fn mock_rejects_writes_to_missing_row() {
        let repo = mock::MockMemberRepository::default();
        let id = Uuid::new_v4();

        assert!(repo.update(id, MemberPatch { name: Some("x".into()), role: None }).await.is_err());
        assert!(repo.delete(id).await.is_err());
    }

    #[tokio::test]
    async fn empty_patch_writes_nothing() -> anyhow::Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let repo = SeaOrmMemberRepository::new(db);

        repo.update(Uuid::new_v4(), MemberPatch::default()).await?;

        assert!(repo.db.into_transaction_log().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn storage_errors_surface_as_db() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([sea_orm::DbErr::Custom("connection reset".into())])
            .into_connection();
        let repo = SeaOrmMemberRepository::new(db);

        let err = repo.find_all().await.unwrap_err();
        assert!(matches!(err, ServiceError::Db(msg) if msg.contains("connection reset")));
    }

    #[tokio::test]
    async fn mock_applies_partial_patch() -> anyhow::Result<()> {
        let id = Uuid::new_v4();
        let repo = mock::MockMemberRepository::with_members(vec![john(id)]);

        repo.update(id, MemberPatch { name: None, role: Some("CEO".into()) }).await?;

        let stored = repo.find_by_id(id).await?.unwrap();
        assert_eq!(stored.name, "John Doe");
        assert_eq!(stored.role, "CEO");
        Ok(())
    }
}
