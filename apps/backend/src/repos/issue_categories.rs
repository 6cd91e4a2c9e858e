//! Issue category repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Select, Set,
};

use super::Repo;
use crate::entities::issue_categories;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueCategory {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct IssueCategoryDraft {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct IssueCategoryFilter {
    pub active_only: bool,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct IssueCategoryRepo;

fn filtered(filter: &IssueCategoryFilter) -> Select<issue_categories::Entity> {
    let mut query = issue_categories::Entity::find();
    if filter.active_only {
        query = query.filter(issue_categories::Column::IsActive.eq(true));
    }
    query
}

#[async_trait]
impl Repo for IssueCategoryRepo {
    type Record = IssueCategory;
    type Draft = IssueCategoryDraft;
    type Key = String;
    type Filter = IssueCategoryFilter;

    async fn create<C>(&self, conn: &C, draft: IssueCategoryDraft) -> Result<IssueCategory, DomainError>
    where
        C: ConnectionTrait,
    {
        let model = issue_categories::ActiveModel {
            id: NotSet,
            name: Set(draft.name),
            slug: Set(draft.slug),
            description: Set(draft.description),
            icon: Set(draft.icon),
            is_active: Set(true),
            created_at: Set(time::OffsetDateTime::now_utc()),
        }
        .insert(conn)
        .await?;
        Ok(model.into())
    }

    async fn find_by_id<C>(&self, conn: &C, id: i32) -> Result<Option<IssueCategory>, DomainError>
    where
        C: ConnectionTrait,
    {
        let model = issue_categories::Entity::find_by_id(id).one(conn).await?;
        Ok(model.map(IssueCategory::from))
    }

    async fn find_by_key<C>(&self, conn: &C, slug: &String) -> Result<Option<IssueCategory>, DomainError>
    where
        C: ConnectionTrait,
    {
        let model = issue_categories::Entity::find()
            .filter(issue_categories::Column::Slug.eq(slug.as_str()))
            .one(conn)
            .await?;
        Ok(model.map(IssueCategory::from))
    }

    async fn count<C>(&self, conn: &C, filter: &IssueCategoryFilter) -> Result<u64, DomainError>
    where
        C: ConnectionTrait,
    {
        Ok(filtered(filter).count(conn).await?)
    }

    async fn list<C>(
        &self,
        conn: &C,
        filter: &IssueCategoryFilter,
    ) -> Result<Vec<IssueCategory>, DomainError>
    where
        C: ConnectionTrait,
    {
        let models = filtered(filter)
            .order_by_asc(issue_categories::Column::Id)
            .all(conn)
            .await?;
        Ok(models.into_iter().map(IssueCategory::from).collect())
    }
}

impl From<issue_categories::Model> for IssueCategory {
    fn from(model: issue_categories::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
            description: model.description,
            icon: model.icon,
            is_active: model.is_active,
        }
    }
}
