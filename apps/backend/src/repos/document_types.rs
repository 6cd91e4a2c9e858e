//! Document type repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Select, Set,
};

use super::Repo;
use crate::entities::document_types;
use crate::errors::domain::DomainError;

/// Document type domain model
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentType {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub authority_level: String,
    pub requirements: Vec<String>,
    pub fee: f64,
    pub processing_days: i32,
    pub supports_physical: bool,
    pub supports_digital: bool,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct DocumentTypeDraft {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub authority_level: String,
    pub requirements: Vec<String>,
    pub fee: f64,
    pub processing_days: i32,
    pub supports_physical: bool,
    pub supports_digital: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DocumentTypeFilter {
    pub active_only: bool,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentTypeRepo;

fn filtered(filter: &DocumentTypeFilter) -> Select<document_types::Entity> {
    let mut query = document_types::Entity::find();
    if filter.active_only {
        query = query.filter(document_types::Column::IsActive.eq(true));
    }
    query
}

#[async_trait]
impl Repo for DocumentTypeRepo {
    type Record = DocumentType;
    type Draft = DocumentTypeDraft;
    type Key = String;
    type Filter = DocumentTypeFilter;

    async fn create<C>(&self, conn: &C, draft: DocumentTypeDraft) -> Result<DocumentType, DomainError>
    where
        C: ConnectionTrait,
    {
        let model = document_types::ActiveModel {
            id: NotSet,
            code: Set(draft.code),
            name: Set(draft.name),
            description: Set(draft.description),
            authority_level: Set(draft.authority_level),
            requirements: Set(serde_json::json!(draft.requirements)),
            fee: Set(draft.fee),
            processing_days: Set(draft.processing_days),
            supports_physical: Set(draft.supports_physical),
            supports_digital: Set(draft.supports_digital),
            is_active: Set(true),
            created_at: Set(time::OffsetDateTime::now_utc()),
        }
        .insert(conn)
        .await?;
        Ok(model.into())
    }

    async fn find_by_id<C>(&self, conn: &C, id: i32) -> Result<Option<DocumentType>, DomainError>
    where
        C: ConnectionTrait,
    {
        let model = document_types::Entity::find_by_id(id).one(conn).await?;
        Ok(model.map(DocumentType::from))
    }

    async fn find_by_key<C>(&self, conn: &C, code: &String) -> Result<Option<DocumentType>, DomainError>
    where
        C: ConnectionTrait,
    {
        let model = document_types::Entity::find()
            .filter(document_types::Column::Code.eq(code.as_str()))
            .one(conn)
            .await?;
        Ok(model.map(DocumentType::from))
    }

    async fn count<C>(&self, conn: &C, filter: &DocumentTypeFilter) -> Result<u64, DomainError>
    where
        C: ConnectionTrait,
    {
        Ok(filtered(filter).count(conn).await?)
    }

    async fn list<C>(
        &self,
        conn: &C,
        filter: &DocumentTypeFilter,
    ) -> Result<Vec<DocumentType>, DomainError>
    where
        C: ConnectionTrait,
    {
        let models = filtered(filter)
            .order_by_asc(document_types::Column::Id)
            .all(conn)
            .await?;
        Ok(models.into_iter().map(DocumentType::from).collect())
    }
}

impl From<document_types::Model> for DocumentType {
    fn from(model: document_types::Model) -> Self {
        Self {
            id: model.id,
            code: model.code,
            name: model.name,
            description: model.description,
            authority_level: model.authority_level,
            requirements: serde_json::from_value(model.requirements).unwrap_or_default(),
            fee: model.fee,
            processing_days: model.processing_days,
            supports_physical: model.supports_physical,
            supports_digital: model.supports_digital,
            is_active: model.is_active,
        }
    }
}
