use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "municipalities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "province_id")]
    pub province_id: i32,
    pub name: String,
    pub slug: String,
    #[sea_orm(column_name = "is_active", default_value = true)]
    pub is_active: bool,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::provinces::Entity",
        from = "Column::ProvinceId",
        to = "super::provinces::Column::Id",
        on_delete = "Cascade"
    )]
    Province,
    #[sea_orm(has_many = "super::barangays::Entity")]
    Barangays,
}

impl Related<super::provinces::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Province.def()
    }
}

impl Related<super::barangays::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Barangays.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
