//! Province repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Select, Set,
};

use super::Repo;
use crate::entities::provinces;
use crate::errors::domain::DomainError;

/// Province domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Province {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub region_name: String,
    pub is_active: bool,
    pub created_at: time::OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct ProvinceDraft {
    pub name: String,
    pub slug: String,
    pub region_name: String,
}

#[derive(Debug, Clone, Default)]
pub struct ProvinceFilter {
    pub active_only: bool,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ProvinceRepo;

fn filtered(filter: &ProvinceFilter) -> Select<provinces::Entity> {
    let mut query = provinces::Entity::find();
    if filter.active_only {
        query = query.filter(provinces::Column::IsActive.eq(true));
    }
    query
}

#[async_trait]
impl Repo for ProvinceRepo {
    type Record = Province;
    type Draft = ProvinceDraft;
    type Key = String;
    type Filter = ProvinceFilter;

    async fn create<C>(&self, conn: &C, draft: ProvinceDraft) -> Result<Province, DomainError>
    where
        C: ConnectionTrait,
    {
        let model = provinces::ActiveModel {
            id: NotSet,
            name: Set(draft.name),
            slug: Set(draft.slug),
            region_name: Set(draft.region_name),
            is_active: Set(true),
            created_at: Set(time::OffsetDateTime::now_utc()),
        }
        .insert(conn)
        .await?;
        Ok(model.into())
    }

    async fn find_by_id<C>(&self, conn: &C, id: i32) -> Result<Option<Province>, DomainError>
    where
        C: ConnectionTrait,
    {
        let model = provinces::Entity::find_by_id(id).one(conn).await?;
        Ok(model.map(Province::from))
    }

    async fn find_by_key<C>(&self, conn: &C, slug: &String) -> Result<Option<Province>, DomainError>
    where
        C: ConnectionTrait,
    {
        let model = provinces::Entity::find()
            .filter(provinces::Column::Slug.eq(slug.as_str()))
            .one(conn)
            .await?;
        Ok(model.map(Province::from))
    }

    async fn count<C>(&self, conn: &C, filter: &ProvinceFilter) -> Result<u64, DomainError>
    where
        C: ConnectionTrait,
    {
        Ok(filtered(filter).count(conn).await?)
    }

    async fn list<C>(&self, conn: &C, filter: &ProvinceFilter) -> Result<Vec<Province>, DomainError>
    where
        C: ConnectionTrait,
    {
        let models = filtered(filter)
            .order_by_asc(provinces::Column::Id)
            .all(conn)
            .await?;
        Ok(models.into_iter().map(Province::from).collect())
    }
}

impl From<provinces::Model> for Province {
    fn from(model: provinces::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
            region_name: model.region_name,
            is_active: model.is_active,
            created_at: model.created_at,
        }
    }
}
