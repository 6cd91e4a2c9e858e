use munlink_backend::repos::{
    BarangayDraft, BarangayFilter, BarangayKey, BarangayRepo, MunicipalityDraft,
    MunicipalityRepo, ProvinceDraft, ProvinceRepo, Repo,
};

use super::empty_schema;

async fn municipality_id(db: &sea_orm::DatabaseConnection) -> i32 {
    let province = ProvinceRepo
        .create(
            db,
            ProvinceDraft {
                name: "Bulacan".into(),
                slug: "bulacan".into(),
                region_name: "Central Luzon".into(),
            },
        )
        .await
        .unwrap();
    MunicipalityRepo
        .create(
            db,
            MunicipalityDraft {
                province_id: province.id,
                name: "City of Malolos".into(),
                slug: "city-of-malolos".into(),
            },
        )
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn bulk_insert_spans_several_chunks() {
    let db = empty_schema().await;
    let municipality_id = municipality_id(&db).await;

    let drafts: Vec<BarangayDraft> = (0..1_203)
        .map(|n| BarangayDraft {
            municipality_id,
            name: format!("Barangay {n}"),
            slug: format!("barangay-{n}"),
        })
        .collect();
    assert_eq!(BarangayRepo.create_many(&db, drafts).await.unwrap(), 1_203);

    let filter = BarangayFilter {
        municipality_id: Some(municipality_id),
    };
    assert_eq!(BarangayRepo.count(&db, &filter).await.unwrap(), 1_203);

    let key = BarangayKey {
        municipality_id,
        slug: "barangay-1202".into(),
    };
    let last = BarangayRepo.find_by_key(&db, &key).await.unwrap().unwrap();
    assert_eq!(last.name, "Barangay 1202");
}

#[tokio::test]
async fn empty_bulk_insert_is_a_no_op() {
    let db = empty_schema().await;
    assert_eq!(BarangayRepo.create_many(&db, Vec::new()).await.unwrap(), 0);
    assert_eq!(
        BarangayRepo.count(&db, &BarangayFilter::default()).await.unwrap(),
        0
    );
}
