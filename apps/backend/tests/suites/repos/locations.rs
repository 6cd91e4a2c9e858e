use munlink_backend::errors::domain::{ConflictKind, DomainError};
use munlink_backend::repos::{
    MunicipalityDraft, MunicipalityFilter, MunicipalityKey, MunicipalityRepo, ProvinceDraft,
    ProvinceFilter, ProvinceRepo, Repo,
};

use super::empty_schema;

fn province(name: &str, slug: &str) -> ProvinceDraft {
    ProvinceDraft {
        name: name.into(),
        slug: slug.into(),
        region_name: "Central Luzon".into(),
    }
}

#[tokio::test]
async fn province_round_trips_by_id_and_slug() {
    let db = empty_schema().await;
    let created = ProvinceRepo.create(&db, province("Tarlac", "tarlac")).await.unwrap();
    assert!(created.is_active);

    let by_id = ProvinceRepo.find_by_id(&db, created.id).await.unwrap();
    assert_eq!(by_id.as_ref(), Some(&created));

    let by_slug = ProvinceRepo.find_by_key(&db, &"tarlac".to_string()).await.unwrap();
    assert_eq!(by_slug, Some(created));

    assert_eq!(ProvinceRepo.find_by_id(&db, 999).await.unwrap(), None);
}

#[tokio::test]
async fn duplicate_province_slug_is_a_conflict() {
    let db = empty_schema().await;
    ProvinceRepo.create(&db, province("Bataan", "bataan")).await.unwrap();

    let err = ProvinceRepo
        .create(&db, province("Bataan Again", "bataan"))
        .await
        .unwrap_err();
    assert!(
        matches!(err, DomainError::Conflict(ConflictKind::DuplicateKey, _)),
        "{err}"
    );
    assert_eq!(ProvinceRepo.count(&db, &ProvinceFilter::default()).await.unwrap(), 1);
}

#[tokio::test]
async fn municipality_slugs_are_unique_per_province_only() {
    let db = empty_schema().await;
    let aurora = ProvinceRepo.create(&db, province("Aurora", "aurora")).await.unwrap();
    let pampanga = ProvinceRepo.create(&db, province("Pampanga", "pampanga")).await.unwrap();

    for province_id in [aurora.id, pampanga.id] {
        MunicipalityRepo
            .create(
                &db,
                MunicipalityDraft {
                    province_id,
                    name: "San Luis".into(),
                    slug: "san-luis".into(),
                },
            )
            .await
            .unwrap();
    }

    let again = MunicipalityRepo
        .create(
            &db,
            MunicipalityDraft {
                province_id: aurora.id,
                name: "San Luis".into(),
                slug: "san-luis".into(),
            },
        )
        .await;
    assert!(matches!(again, Err(DomainError::Conflict(..))));

    let key = MunicipalityKey {
        province_id: pampanga.id,
        slug: "san-luis".into(),
    };
    let found = MunicipalityRepo.find_by_key(&db, &key).await.unwrap().unwrap();
    assert_eq!(found.province_id, pampanga.id);

    let in_aurora = MunicipalityFilter {
        province_id: Some(aurora.id),
        active_only: false,
    };
    assert_eq!(MunicipalityRepo.count(&db, &in_aurora).await.unwrap(), 1);
    assert_eq!(
        MunicipalityRepo
            .count(&db, &MunicipalityFilter::default())
            .await
            .unwrap(),
        2
    );
}

#[tokio::test]
async fn municipality_needs_an_existing_province() {
    let db = empty_schema().await;
    let err = MunicipalityRepo
        .create(
            &db,
            MunicipalityDraft {
                province_id: 42,
                name: "Nowhere".into(),
                slug: "nowhere".into(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)), "{err}");
}
