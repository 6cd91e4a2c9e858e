use munlink_backend::infra::db::ensure_schema;
use munlink_backend::repos::{BenefitProgramDraft, BenefitProgramRepo, Repo};
use munlink_backend::seed::{ensure_seeded, seed_reference_data, LocationSource, SeedGroup, SeedOutcome};
use serde_json::json;

use super::{counts, Counts};
use crate::support::memory_db;

fn conflicting_program() -> BenefitProgramDraft {
    BenefitProgramDraft {
        name: "Pre-existing senior program".into(),
        code: "SENIOR_ASSIST".into(),
        description: "Created before the first start".into(),
        program_type: "financial".into(),
        eligibility_criteria: json!({}),
        required_documents: vec![],
        is_active: true,
        is_accepting_applications: false,
    }
}

#[tokio::test]
async fn failed_group_does_not_undo_the_others() {
    let db = memory_db().await;
    ensure_schema(&db).await.unwrap();
    BenefitProgramRepo.create(&db, conflicting_program()).await.unwrap();

    let outcome = ensure_seeded(&db, &LocationSource::BuiltIn).await.unwrap();
    let SeedOutcome::Seeded(report) = outcome else {
        panic!("expected seeding");
    };
    assert_eq!(report.failed(), vec![SeedGroup::BenefitPrograms]);

    assert_eq!(
        counts(&db).await,
        Counts {
            provinces: 7,
            municipalities: 130,
            barangays: 0,
            document_types: 5,
            issue_categories: 6,
            // the whole group rolled back; only the pre-existing row remains
            benefit_programs: 1,
        }
    );
}

#[tokio::test]
async fn duplicate_seeding_is_reported_not_raised() {
    let db = memory_db().await;
    ensure_schema(&db).await.unwrap();
    seed_reference_data(&db, &LocationSource::BuiltIn).await;
    let before = counts(&db).await;

    // A second process that missed the province guard
    let report = seed_reference_data(&db, &LocationSource::BuiltIn).await;
    assert_eq!(
        report.failed(),
        vec![
            SeedGroup::Provinces,
            SeedGroup::Municipalities,
            SeedGroup::DocumentTypes,
            SeedGroup::IssueCategories,
            SeedGroup::BenefitPrograms,
        ]
    );
    assert_eq!(counts(&db).await, before);
}
