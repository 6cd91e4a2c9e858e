//! Barangay repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Select, Set,
};

use super::Repo;
use crate::entities::barangays;
use crate::errors::domain::DomainError;

/// Rows per multi-row INSERT; stays well under SQLite's bind limit.
const INSERT_CHUNK: usize = 500;

/// Barangay domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Barangay {
    pub id: i32,
    pub municipality_id: i32,
    pub name: String,
    pub slug: String,
    pub created_at: time::OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct BarangayDraft {
    pub municipality_id: i32,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarangayKey {
    pub municipality_id: i32,
    pub slug: String,
}

#[derive(Debug, Clone, Default)]
pub struct BarangayFilter {
    pub municipality_id: Option<i32>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BarangayRepo;

fn filtered(filter: &BarangayFilter) -> Select<barangays::Entity> {
    let mut query = barangays::Entity::find();
    if let Some(municipality_id) = filter.municipality_id {
        query = query.filter(barangays::Column::MunicipalityId.eq(municipality_id));
    }
    query
}

fn active_model(draft: BarangayDraft, now: time::OffsetDateTime) -> barangays::ActiveModel {
    barangays::ActiveModel {
        id: NotSet,
        municipality_id: Set(draft.municipality_id),
        name: Set(draft.name),
        slug: Set(draft.slug),
        created_at: Set(now),
    }
}

impl BarangayRepo {
    /// Insert many barangays in chunked multi-row statements.
    ///
    /// Returns the number of rows written.
    pub async fn create_many<C>(&self, conn: &C, drafts: Vec<BarangayDraft>) -> Result<usize, DomainError>
    where
        C: ConnectionTrait,
    {
        let now = time::OffsetDateTime::now_utc();
        let total = drafts.len();
        let mut pending = drafts.into_iter().peekable();

        while pending.peek().is_some() {
            let chunk: Vec<_> = pending
                .by_ref()
                .take(INSERT_CHUNK)
                .map(|draft| active_model(draft, now))
                .collect();
            barangays::Entity::insert_many(chunk)
                .exec_without_returning(conn)
                .await?;
        }

        Ok(total)
    }
}

#[async_trait]
impl Repo for BarangayRepo {
    type Record = Barangay;
    type Draft = BarangayDraft;
    type Key = BarangayKey;
    type Filter = BarangayFilter;

    async fn create<C>(&self, conn: &C, draft: BarangayDraft) -> Result<Barangay, DomainError>
    where
        C: ConnectionTrait,
    {
        let model = active_model(draft, time::OffsetDateTime::now_utc())
            .insert(conn)
            .await?;
        Ok(model.into())
    }

    async fn find_by_id<C>(&self, conn: &C, id: i32) -> Result<Option<Barangay>, DomainError>
    where
        C: ConnectionTrait,
    {
        let model = barangays::Entity::find_by_id(id).one(conn).await?;
        Ok(model.map(Barangay::from))
    }

    async fn find_by_key<C>(&self, conn: &C, key: &BarangayKey) -> Result<Option<Barangay>, DomainError>
    where
        C: ConnectionTrait,
    {
        let model = barangays::Entity::find()
            .filter(barangays::Column::MunicipalityId.eq(key.municipality_id))
            .filter(barangays::Column::Slug.eq(key.slug.as_str()))
            .one(conn)
            .await?;
        Ok(model.map(Barangay::from))
    }

    async fn count<C>(&self, conn: &C, filter: &BarangayFilter) -> Result<u64, DomainError>
    where
        C: ConnectionTrait,
    {
        Ok(filtered(filter).count(conn).await?)
    }

    async fn list<C>(&self, conn: &C, filter: &BarangayFilter) -> Result<Vec<Barangay>, DomainError>
    where
        C: ConnectionTrait,
    {
        let models = filtered(filter)
            .order_by_asc(barangays::Column::Id)
            .all(conn)
            .await?;
        Ok(models.into_iter().map(Barangay::from).collect())
    }
}

impl From<barangays::Model> for Barangay {
    fn from(model: barangays::Model) -> Self {
        Self {
            id: model.id,
            municipality_id: model.municipality_id,
            name: model.name,
            slug: model.slug,
            created_at: model.created_at,
        }
    }
}
