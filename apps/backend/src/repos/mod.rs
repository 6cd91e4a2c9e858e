//! Repository interface shared by every reference-data entity.
//!
//! Seeding and the routes depend on [`Repo`] only; the SeaORM queries live
//! in the per-entity implementations.

use async_trait::async_trait;
use sea_orm::ConnectionTrait;

use crate::errors::domain::DomainError;

pub mod barangays;
pub mod benefit_programs;
pub mod document_types;
pub mod issue_categories;
pub mod municipalities;
pub mod provinces;

pub use barangays::{Barangay, BarangayDraft, BarangayFilter, BarangayKey, BarangayRepo};
pub use benefit_programs::{
    BenefitProgram, BenefitProgramDraft, BenefitProgramFilter, BenefitProgramRepo,
};
pub use document_types::{DocumentType, DocumentTypeDraft, DocumentTypeFilter, DocumentTypeRepo};
pub use issue_categories::{
    IssueCategory, IssueCategoryDraft, IssueCategoryFilter, IssueCategoryRepo,
};
pub use municipalities::{
    Municipality, MunicipalityDraft, MunicipalityFilter, MunicipalityKey, MunicipalityRepo,
};
pub use provinces::{Province, ProvinceDraft, ProvinceFilter, ProvinceRepo};

/// Create, look up, count and list one kind of record.
#[async_trait]
pub trait Repo: Send + Sync {
    /// Domain view of a stored row
    type Record: Send;
    /// Everything needed to insert a new row
    type Draft: Send;
    /// Natural unique key (slug, code, or parent id plus slug)
    type Key: Send + Sync;
    type Filter: Default + Send + Sync;

    async fn create<C>(&self, conn: &C, draft: Self::Draft) -> Result<Self::Record, DomainError>
    where
        C: ConnectionTrait;

    async fn find_by_id<C>(&self, conn: &C, id: i32) -> Result<Option<Self::Record>, DomainError>
    where
        C: ConnectionTrait;

    async fn find_by_key<C>(
        &self,
        conn: &C,
        key: &Self::Key,
    ) -> Result<Option<Self::Record>, DomainError>
    where
        C: ConnectionTrait;

    async fn count<C>(&self, conn: &C, filter: &Self::Filter) -> Result<u64, DomainError>
    where
        C: ConnectionTrait;

    async fn list<C>(&self, conn: &C, filter: &Self::Filter) -> Result<Vec<Self::Record>, DomainError>
    where
        C: ConnectionTrait;
}
