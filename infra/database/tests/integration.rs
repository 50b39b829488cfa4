use trek_database::{Database, DatabaseError};

#[tokio::test]
async fn in_memory_engine_connects() {
    let db = Database::builder()
        .url("mem://")
        .session("trek_test", "catalog")
        .init()
        .await
        .expect("connect to mem://");

    assert_eq!(db.namespace(), "trek_test");
    assert_eq!(db.database(), "catalog");
    db.health().await.expect("health check");
}

#[tokio::test]
async fn define_table_is_idempotent() {
    let db = Database::builder().url("mem://").session("trek_test", "catalog").init().await.unwrap();

    db.define_table("destination").await.expect("first definition");
    db.define_table("destination").await.expect("second definition");
}

#[tokio::test]
async fn define_table_rejects_injection() {
    let db = Database::builder().url("mem://").session("trek_test", "catalog").init().await.unwrap();

    let err = db.define_table("destination; REMOVE TABLE x").await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));
}

#[tokio::test]
async fn missing_parameters_fail_validation() {
    let err = Database::builder().init().await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));

    let err = Database::builder().url("mem://").init().await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));
}
