use munlink_backend::repos::{
    BenefitProgramDraft, BenefitProgramRepo, DocumentTypeDraft, DocumentTypeFilter,
    DocumentTypeRepo, IssueCategoryDraft, IssueCategoryRepo, Repo,
};
use serde_json::json;

use super::empty_schema;

#[tokio::test]
async fn document_requirements_survive_storage() {
    let db = empty_schema().await;
    let created = DocumentTypeRepo
        .create(
            &db,
            DocumentTypeDraft {
                code: "BRGY_CLEARANCE".into(),
                name: "Barangay Clearance".into(),
                description: None,
                authority_level: "barangay".into(),
                requirements: vec!["Valid ID".into(), "Proof of residency".into()],
                fee: 50.0,
                processing_days: 1,
                supports_physical: true,
                supports_digital: true,
            },
        )
        .await
        .unwrap();

    let found = DocumentTypeRepo
        .find_by_key(&db, &"BRGY_CLEARANCE".to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found, created);
    assert_eq!(found.requirements, ["Valid ID", "Proof of residency"]);

    let active = DocumentTypeFilter { active_only: true };
    assert_eq!(DocumentTypeRepo.list(&db, &active).await.unwrap().len(), 1);
}

#[tokio::test]
async fn benefit_program_keeps_eligibility_predicate() {
    let db = empty_schema().await;
    let predicate = json!({ "min_age": 60, "resident": true });
    BenefitProgramRepo
        .create(
            &db,
            BenefitProgramDraft {
                name: "Senior Citizen Financial Assistance".into(),
                code: "SENIOR_ASSIST".into(),
                description: "Quarterly cash assistance".into(),
                program_type: "financial".into(),
                eligibility_criteria: predicate.clone(),
                required_documents: vec!["Senior Citizen ID".into()],
                is_active: true,
                is_accepting_applications: true,
            },
        )
        .await
        .unwrap();

    let program = BenefitProgramRepo
        .find_by_key(&db, &"SENIOR_ASSIST".to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(program.eligibility_criteria, predicate);
    assert_eq!(program.required_documents, ["Senior Citizen ID"]);
    assert_eq!(program.image_path, None);
}

#[tokio::test]
async fn issue_categories_list_in_insertion_order() {
    let db = empty_schema().await;
    for (name, slug) in [("Health", "health"), ("Utilities", "utilities")] {
        IssueCategoryRepo
            .create(
                &db,
                IssueCategoryDraft {
                    name: name.into(),
                    slug: slug.into(),
                    description: None,
                    icon: None,
                },
            )
            .await
            .unwrap();
    }

    let slugs: Vec<String> = IssueCategoryRepo
        .list(&db, &Default::default())
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.slug)
        .collect();
    assert_eq!(slugs, ["health", "utilities"]);
}
