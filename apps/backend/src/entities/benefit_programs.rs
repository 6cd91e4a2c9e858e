use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "benefit_programs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub code: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_name = "program_type")]
    pub program_type: String,
    /// Structured predicate, e.g. `{"min_age": 60, "resident": true}`
    #[sea_orm(column_name = "eligibility_criteria", column_type = "Json")]
    pub eligibility_criteria: Json,
    #[sea_orm(column_name = "required_documents", column_type = "Json")]
    pub required_documents: Json,
    #[sea_orm(column_name = "is_active", default_value = true)]
    pub is_active: bool,
    #[sea_orm(column_name = "is_accepting_applications", default_value = true)]
    pub is_accepting_applications: bool,
    #[sea_orm(column_name = "image_path", column_type = "String(StringLen::N(255))", nullable)]
    pub image_path: Option<String>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
