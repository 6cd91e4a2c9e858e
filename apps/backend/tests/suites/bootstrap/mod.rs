use munlink_backend::repos::{
    BarangayFilter, BarangayRepo, BenefitProgramFilter, BenefitProgramRepo, DocumentTypeFilter,
    DocumentTypeRepo, IssueCategoryFilter, IssueCategoryRepo, MunicipalityFilter,
    MunicipalityRepo, ProvinceFilter, ProvinceRepo, Repo,
};
use sea_orm::DatabaseConnection;

pub mod idempotence;
pub mod partial_failure;
pub mod schema;
pub mod seeding;

/// Row counts of every reference table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub provinces: u64,
    pub municipalities: u64,
    pub barangays: u64,
    pub document_types: u64,
    pub issue_categories: u64,
    pub benefit_programs: u64,
}

pub async fn counts(db: &DatabaseConnection) -> Counts {
    Counts {
        provinces: ProvinceRepo.count(db, &ProvinceFilter::default()).await.unwrap(),
        municipalities: MunicipalityRepo
            .count(db, &MunicipalityFilter::default())
            .await
            .unwrap(),
        barangays: BarangayRepo.count(db, &BarangayFilter::default()).await.unwrap(),
        document_types: DocumentTypeRepo
            .count(db, &DocumentTypeFilter::default())
            .await
            .unwrap(),
        issue_categories: IssueCategoryRepo
            .count(db, &IssueCategoryFilter::default())
            .await
            .unwrap(),
        benefit_programs: BenefitProgramRepo
            .count(db, &BenefitProgramFilter::default())
            .await
            .unwrap(),
    }
}
