//! `member` table: a single `{id, name, role}` record per team member.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "member")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub role: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match *self {}
    }
}

impl ActiveModelBehavior for ActiveModel {}

fn require_non_empty(field: &str, value: &str) -> Result<(), errors::ModelError> {
    if value.is_empty() {
        return Err(errors::ModelError::Validation(format!("{field} should not be empty")));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    require_non_empty("name", name)
}

pub fn validate_role(role: &str) -> Result<(), errors::ModelError> {
    require_non_empty("role", role)
}
