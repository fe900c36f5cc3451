//! Integration tests against a live MongoDB server.
//!
//! Run with `cargo test --features mongo-tests` and a server listening on
//! localhost:27017. These tests touch only documents they create.

use bson::oid::ObjectId;

use super::MongoDatabase;
use crate::db::{Database, DbError, NewTodo, TodoPatch};

const TEST_URI: &str = "mongodb://localhost:27017";

async fn test_db() -> MongoDatabase {
    MongoDatabase::connect(TEST_URI)
        .await
        .expect("mongo-tests require a MongoDB server on localhost:27017")
}

#[tokio::test]
async fn crud_round_trip() {
    let db = test_db().await;

    let id = db
        .todos()
        .create(NewTodo {
            task: "mongo round trip".to_string(),
            description: None,
        })
        .await
        .unwrap();

    let todo = db.todos().get(id).await.unwrap();
    assert_eq!(todo.id, id);
    assert_eq!(todo.task, "mongo round trip");
    assert_eq!(todo.description, None);
    assert!(!todo.is_completed);
    assert_eq!(todo.created_at, todo.updated_at);

    db.todos()
        .update(
            id,
            TodoPatch {
                is_completed: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let updated = db.todos().get(id).await.unwrap();
    assert!(updated.is_completed);
    assert_eq!(updated.task, "mongo round trip");
    assert!(updated.updated_at >= updated.created_at);

    db.todos().delete(id).await.unwrap();
    let err = db.todos().get(id).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { .. }));
}

#[tokio::test]
async fn unknown_id_maps_to_not_found() {
    let db = test_db().await;

    let err = db.todos().get(ObjectId::new()).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { .. }));

    let err = db.todos().delete(ObjectId::new()).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { .. }));

    let err = db
        .todos()
        .update(
            ObjectId::new(),
            TodoPatch {
                task: Some("never lands".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::NotFound { .. }));
}
