//! Municipality repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Select, Set,
};

use super::Repo;
use crate::entities::municipalities;
use crate::errors::domain::DomainError;

/// Municipality domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Municipality {
    pub id: i32,
    pub province_id: i32,
    pub name: String,
    pub slug: String,
    pub is_active: bool,
    pub created_at: time::OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct MunicipalityDraft {
    pub province_id: i32,
    pub name: String,
    pub slug: String,
}

/// Slugs are unique within a province only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MunicipalityKey {
    pub province_id: i32,
    pub slug: String,
}

#[derive(Debug, Clone, Default)]
pub struct MunicipalityFilter {
    pub province_id: Option<i32>,
    pub active_only: bool,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MunicipalityRepo;

fn filtered(filter: &MunicipalityFilter) -> Select<municipalities::Entity> {
    let mut query = municipalities::Entity::find();
    if let Some(province_id) = filter.province_id {
        query = query.filter(municipalities::Column::ProvinceId.eq(province_id));
    }
    if filter.active_only {
        query = query.filter(municipalities::Column::IsActive.eq(true));
    }
    query
}

#[async_trait]
impl Repo for MunicipalityRepo {
    type Record = Municipality;
    type Draft = MunicipalityDraft;
    type Key = MunicipalityKey;
    type Filter = MunicipalityFilter;

    async fn create<C>(&self, conn: &C, draft: MunicipalityDraft) -> Result<Municipality, DomainError>
    where
        C: ConnectionTrait,
    {
        let model = municipalities::ActiveModel {
            id: NotSet,
            province_id: Set(draft.province_id),
            name: Set(draft.name),
            slug: Set(draft.slug),
            is_active: Set(true),
            created_at: Set(time::OffsetDateTime::now_utc()),
        }
        .insert(conn)
        .await?;
        Ok(model.into())
    }

    async fn find_by_id<C>(&self, conn: &C, id: i32) -> Result<Option<Municipality>, DomainError>
    where
        C: ConnectionTrait,
    {
        let model = municipalities::Entity::find_by_id(id).one(conn).await?;
        Ok(model.map(Municipality::from))
    }

    async fn find_by_key<C>(
        &self,
        conn: &C,
        key: &MunicipalityKey,
    ) -> Result<Option<Municipality>, DomainError>
    where
        C: ConnectionTrait,
    {
        let model = municipalities::Entity::find()
            .filter(municipalities::Column::ProvinceId.eq(key.province_id))
            .filter(municipalities::Column::Slug.eq(key.slug.as_str()))
            .one(conn)
            .await?;
        Ok(model.map(Municipality::from))
    }

    async fn count<C>(&self, conn: &C, filter: &MunicipalityFilter) -> Result<u64, DomainError>
    where
        C: ConnectionTrait,
    {
        Ok(filtered(filter).count(conn).await?)
    }

    async fn list<C>(
        &self,
        conn: &C,
        filter: &MunicipalityFilter,
    ) -> Result<Vec<Municipality>, DomainError>
    where
        C: ConnectionTrait,
    {
        let models = filtered(filter)
            .order_by_asc(municipalities::Column::Id)
            .all(conn)
            .await?;
        Ok(models.into_iter().map(Municipality::from).collect())
    }
}

impl From<municipalities::Model> for Municipality {
    fn from(model: municipalities::Model) -> Self {
        Self {
            id: model.id,
            province_id: model.province_id,
            name: model.name,
            slug: model.slug,
            is_active: model.is_active,
            created_at: model.created_at,
        }
    }
}
