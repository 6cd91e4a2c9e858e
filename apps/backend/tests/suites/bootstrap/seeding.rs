use std::fs;

use munlink_backend::infra::db::{prepare_database, SchemaOutcome};
use munlink_backend::repos::{
    BarangayFilter, BarangayRepo, BenefitProgramFilter, BenefitProgramRepo, MunicipalityFilter,
    MunicipalityKey, MunicipalityRepo, ProvinceRepo, Repo,
};
use munlink_backend::seed::locations::BUILTIN_MUNICIPALITIES;
use munlink_backend::seed::{GroupResult, LocationSource, SeedGroup, SeedOutcome};
use serde_json::json;

use super::{counts, Counts};
use crate::support::memory_db;

fn builtin_count_excluding(provinces: &[&str]) -> usize {
    BUILTIN_MUNICIPALITIES
        .iter()
        .filter(|(province, _)| !provinces.contains(province))
        .map(|(_, list)| list.len())
        .sum()
}

async fn municipality_count(db: &sea_orm::DatabaseConnection, province_slug: &str) -> u64 {
    let province = ProvinceRepo
        .find_by_key(db, &province_slug.to_string())
        .await
        .unwrap()
        .expect("seeded province");
    let filter = MunicipalityFilter {
        province_id: Some(province.id),
        active_only: false,
    };
    MunicipalityRepo.count(db, &filter).await.unwrap()
}

#[tokio::test]
async fn empty_database_is_seeded_with_builtin_locations() {
    let db = memory_db().await;

    let report = prepare_database(&db, &LocationSource::BuiltIn).await.unwrap();
    assert_eq!(report.schema, SchemaOutcome::Created);
    let SeedOutcome::Seeded(seed) = report.seed else {
        panic!("expected seeding, got {:?}", report.seed);
    };
    assert!(seed.is_complete());
    assert!(matches!(seed.result(SeedGroup::Barangays), Some(GroupResult::Skipped(_))));

    assert_eq!(
        counts(&db).await,
        Counts {
            provinces: 7,
            municipalities: 130,
            barangays: 0,
            document_types: 5,
            issue_categories: 6,
            benefit_programs: 5,
        }
    );
}

#[tokio::test]
async fn provinces_carry_region_and_slug() {
    let db = memory_db().await;
    prepare_database(&db, &LocationSource::BuiltIn).await.unwrap();

    let nueva_ecija = ProvinceRepo
        .find_by_key(&db, &"nueva-ecija".to_string())
        .await
        .unwrap()
        .expect("seeded province");
    assert_eq!(nueva_ecija.name, "Nueva Ecija");
    assert_eq!(nueva_ecija.region_name, "Central Luzon");

    let filter = MunicipalityFilter {
        province_id: Some(nueva_ecija.id),
        active_only: true,
    };
    assert_eq!(MunicipalityRepo.count(&db, &filter).await.unwrap(), 32);
}

#[tokio::test]
async fn accepting_filter_excludes_closed_programs() {
    let db = memory_db().await;
    prepare_database(&db, &LocationSource::BuiltIn).await.unwrap();

    let filter = BenefitProgramFilter {
        active_only: true,
        accepting_only: true,
    };
    assert_eq!(BenefitProgramRepo.count(&db, &filter).await.unwrap(), 4);
}

#[tokio::test]
async fn dataset_supplies_municipalities_and_barangays() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("region3_locations.json");
    let dataset = json!({
        "Aurora": {
            "Baler": ["Barangay I (Pob.)", "Buhangin", "Buhangin"],
            "Dingalan": ["Aplaya"]
        },
        "Pampanga": {
            "City of San Fernando": ["Del Pilar", "Sindalan"]
        }
    });
    fs::write(&path, serde_json::to_vec_pretty(&dataset).unwrap()).unwrap();

    let source = LocationSource::load(&path);
    assert!(matches!(source, LocationSource::Dataset(_)));

    let db = memory_db().await;
    let report = prepare_database(&db, &source).await.unwrap();
    let SeedOutcome::Seeded(seed) = report.seed else {
        panic!("expected seeding");
    };
    // the five provinces absent from the file come from the built-in list
    assert_eq!(
        seed.inserted(SeedGroup::Municipalities),
        3 + builtin_count_excluding(&["Aurora", "Pampanga"])
    );
    assert_eq!(seed.inserted(SeedGroup::Barangays), 5);
    assert_eq!(municipality_count(&db, "pampanga").await, 1);

    let aurora = ProvinceRepo
        .find_by_key(&db, &"aurora".to_string())
        .await
        .unwrap()
        .unwrap();
    let baler = MunicipalityRepo
        .find_by_key(
            &db,
            &MunicipalityKey {
                province_id: aurora.id,
                slug: "baler".into(),
            },
        )
        .await
        .unwrap()
        .expect("baler seeded from dataset");

    let filter = BarangayFilter {
        municipality_id: Some(baler.id),
    };
    let names: Vec<String> = BarangayRepo
        .list(&db, &filter)
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.name)
        .collect();
    assert_eq!(names, ["Barangay I (Pob.)", "Buhangin"]);
}

#[tokio::test]
async fn province_absent_from_dataset_still_gets_municipalities() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("region3_locations.json");
    let mut dataset = serde_json::Map::new();
    for (province, list) in BUILTIN_MUNICIPALITIES.iter().filter(|(p, _)| *p != "Zambales") {
        let mut municipalities = serde_json::Map::new();
        municipalities.insert(list[0].0.to_string(), json!(["Poblacion"]));
        dataset.insert(province.to_string(), serde_json::Value::Object(municipalities));
    }
    fs::write(&path, serde_json::to_vec_pretty(&dataset).unwrap()).unwrap();

    let db = memory_db().await;
    let report = prepare_database(&db, &LocationSource::load(&path)).await.unwrap();
    let SeedOutcome::Seeded(seed) = report.seed else {
        panic!("expected seeding");
    };
    assert!(seed.is_complete());

    let zambales_builtin = BUILTIN_MUNICIPALITIES
        .iter()
        .find(|(province, _)| *province == "Zambales")
        .map(|(_, list)| list.len())
        .unwrap();
    assert_eq!(seed.inserted(SeedGroup::Municipalities), 6 + zambales_builtin);
    assert_eq!(municipality_count(&db, "zambales").await, zambales_builtin as u64);
    assert_eq!(municipality_count(&db, "bataan").await, 1);
    assert_eq!(seed.inserted(SeedGroup::Barangays), 6);
}
