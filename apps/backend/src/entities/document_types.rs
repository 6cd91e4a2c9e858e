use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "document_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// `barangay` or `municipal`
    #[sea_orm(column_name = "authority_level")]
    pub authority_level: String,
    #[sea_orm(column_type = "Json")]
    pub requirements: Json,
    #[sea_orm(column_type = "Double", default_value = 0.0)]
    pub fee: f64,
    #[sea_orm(column_name = "processing_days", default_value = 3)]
    pub processing_days: i32,
    #[sea_orm(column_name = "supports_physical", default_value = true)]
    pub supports_physical: bool,
    #[sea_orm(column_name = "supports_digital", default_value = false)]
    pub supports_digital: bool,
    #[sea_orm(column_name = "is_active", default_value = true)]
    pub is_active: bool,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
