//! Benefit program repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Select, Set,
};
use serde_json::Value;

use super::Repo;
use crate::entities::benefit_programs;
use crate::errors::domain::DomainError;

/// Benefit program domain model
#[derive(Debug, Clone, PartialEq)]
pub struct BenefitProgram {
    pub id: i32,
    pub name: String,
    pub code: String,
    pub description: String,
    pub program_type: String,
    pub eligibility_criteria: Value,
    pub required_documents: Vec<String>,
    pub is_active: bool,
    pub is_accepting_applications: bool,
    pub image_path: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BenefitProgramDraft {
    pub name: String,
    pub code: String,
    pub description: String,
    pub program_type: String,
    pub eligibility_criteria: Value,
    pub required_documents: Vec<String>,
    pub is_active: bool,
    pub is_accepting_applications: bool,
}

#[derive(Debug, Clone, Default)]
pub struct BenefitProgramFilter {
    pub active_only: bool,
    pub accepting_only: bool,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BenefitProgramRepo;

fn filtered(filter: &BenefitProgramFilter) -> Select<benefit_programs::Entity> {
    let mut query = benefit_programs::Entity::find();
    if filter.active_only {
        query = query.filter(benefit_programs::Column::IsActive.eq(true));
    }
    if filter.accepting_only {
        query = query.filter(benefit_programs::Column::IsAcceptingApplications.eq(true));
    }
    query
}

#[async_trait]
impl Repo for BenefitProgramRepo {
    type Record = BenefitProgram;
    type Draft = BenefitProgramDraft;
    type Key = String;
    type Filter = BenefitProgramFilter;

    async fn create<C>(&self, conn: &C, draft: BenefitProgramDraft) -> Result<BenefitProgram, DomainError>
    where
        C: ConnectionTrait,
    {
        let model = benefit_programs::ActiveModel {
            id: NotSet,
            name: Set(draft.name),
            code: Set(draft.code),
            description: Set(draft.description),
            program_type: Set(draft.program_type),
            eligibility_criteria: Set(draft.eligibility_criteria),
            required_documents: Set(serde_json::json!(draft.required_documents)),
            is_active: Set(draft.is_active),
            is_accepting_applications: Set(draft.is_accepting_applications),
            image_path: Set(None),
            created_at: Set(time::OffsetDateTime::now_utc()),
        }
        .insert(conn)
        .await?;
        Ok(model.into())
    }

    async fn find_by_id<C>(&self, conn: &C, id: i32) -> Result<Option<BenefitProgram>, DomainError>
    where
        C: ConnectionTrait,
    {
        let model = benefit_programs::Entity::find_by_id(id).one(conn).await?;
        Ok(model.map(BenefitProgram::from))
    }

    async fn find_by_key<C>(&self, conn: &C, code: &String) -> Result<Option<BenefitProgram>, DomainError>
    where
        C: ConnectionTrait,
    {
        let model = benefit_programs::Entity::find()
            .filter(benefit_programs::Column::Code.eq(code.as_str()))
            .one(conn)
            .await?;
        Ok(model.map(BenefitProgram::from))
    }

    async fn count<C>(&self, conn: &C, filter: &BenefitProgramFilter) -> Result<u64, DomainError>
    where
        C: ConnectionTrait,
    {
        Ok(filtered(filter).count(conn).await?)
    }

    async fn list<C>(
        &self,
        conn: &C,
        filter: &BenefitProgramFilter,
    ) -> Result<Vec<BenefitProgram>, DomainError>
    where
        C: ConnectionTrait,
    {
        let models = filtered(filter)
            .order_by_asc(benefit_programs::Column::Id)
            .all(conn)
            .await?;
        Ok(models.into_iter().map(BenefitProgram::from).collect())
    }
}

impl From<benefit_programs::Model> for BenefitProgram {
    fn from(model: benefit_programs::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            code: model.code,
            description: model.description,
            program_type: model.program_type,
            eligibility_criteria: model.eligibility_criteria,
            required_documents: serde_json::from_value(model.required_documents).unwrap_or_default(),
            is_active: model.is_active,
            is_accepting_applications: model.is_accepting_applications,
            image_path: model.image_path,
        }
    }
}
