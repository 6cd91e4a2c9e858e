use backend_test_support::sqlite::TempSqlite;
use munlink_backend::infra::db::{bootstrap_db, SchemaOutcome};
use munlink_backend::seed::SeedOutcome;

use super::counts;
use crate::support::config_for;

#[tokio::test]
async fn second_start_changes_nothing() {
    let file = TempSqlite::new().unwrap();
    let config = config_for(&file);

    let (db, first) = bootstrap_db(&config).await.unwrap();
    assert_eq!(first.schema, SchemaOutcome::Created);
    assert!(matches!(first.seed, SeedOutcome::Seeded(_)));
    let after_first = counts(&db).await;
    db.close().await.unwrap();

    // New pool on the same file, as after a process restart
    let (db, second) = bootstrap_db(&config).await.unwrap();
    assert_eq!(second.schema, SchemaOutcome::Present);
    assert_eq!(second.seed, SeedOutcome::AlreadySeeded { provinces: 7 });
    assert_eq!(counts(&db).await, after_first);
}
