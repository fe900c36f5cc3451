//! Todo repository backed by a MongoDB collection.

use std::future::IntoFuture;
use std::time::Duration;

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{Bson, Document, doc};
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::Collection;
use serde::{Deserialize, Serialize};

use crate::db::{
    DbError, DbResult, ListResult, NewTodo, PageQuery, Todo, TodoId, TodoPatch, TodoRepository,
};

/// Collection holding todo documents.
pub const COLLECTION_NAME: &str = "todo";

/// Per-operation deadline. An expired call is abandoned and surfaces as a
/// storage error.
const OP_TIMEOUT: Duration = Duration::from_secs(100);

/// Wire shape of a todo document in the collection.
#[derive(Debug, Serialize, Deserialize)]
struct TodoDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    task: String,
    description: Option<String>,
    #[serde(rename = "isCompleted")]
    is_completed: bool,
    #[serde(rename = "createdAt")]
    created_at: bson::DateTime,
    #[serde(rename = "updatedAt")]
    updated_at: bson::DateTime,
}

impl From<TodoDocument> for Todo {
    fn from(doc: TodoDocument) -> Self {
        Self {
            id: doc.id,
            task: doc.task,
            description: doc.description,
            is_completed: doc.is_completed,
            created_at: from_bson_datetime(doc.created_at),
            updated_at: from_bson_datetime(doc.updated_at),
        }
    }
}

// BSON datetimes carry millisecond precision; both conversions go through
// the millisecond representation.

fn to_bson_datetime(dt: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(dt.timestamp_millis())
}

fn from_bson_datetime(dt: bson::DateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(dt.timestamp_millis()).unwrap_or_default()
}

/// Clamp a driver call to the per-operation deadline.
async fn with_deadline<T, F>(fut: F) -> DbResult<T>
where
    F: IntoFuture<Output = Result<T, mongodb::error::Error>>,
{
    match tokio::time::timeout(OP_TIMEOUT, fut.into_future()).await {
        Ok(result) => result.map_err(|e| DbError::Database {
            message: e.to_string(),
        }),
        Err(_) => Err(DbError::Timeout {
            seconds: OP_TIMEOUT.as_secs(),
        }),
    }
}

/// Todo repository over the `todo` collection.
pub struct MongoTodoRepository {
    collection: Collection<TodoDocument>,
}

impl MongoTodoRepository {
    pub(super) fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_NAME),
        }
    }
}

#[async_trait]
impl TodoRepository for MongoTodoRepository {
    async fn create(&self, new: NewTodo) -> DbResult<TodoId> {
        let now = Utc::now();
        let document = TodoDocument {
            id: ObjectId::new(),
            task: new.task,
            description: new.description,
            is_completed: false,
            created_at: to_bson_datetime(now),
            updated_at: to_bson_datetime(now),
        };

        let result = with_deadline(self.collection.insert_one(&document)).await?;

        match result.inserted_id {
            Bson::ObjectId(oid) => Ok(oid),
            other => Err(DbError::Database {
                message: format!("unexpected inserted id: {other}"),
            }),
        }
    }

    async fn list(&self, page: PageQuery) -> DbResult<ListResult<Todo>> {
        let cursor = with_deadline(
            self.collection
                .find(doc! {})
                .skip(page.skip)
                .limit(page.limit),
        )
        .await?;
        let documents: Vec<TodoDocument> = with_deadline(cursor.try_collect()).await?;

        let total = with_deadline(self.collection.count_documents(doc! {})).await?;

        Ok(ListResult {
            items: documents.into_iter().map(Todo::from).collect(),
            total,
        })
    }

    async fn get(&self, id: TodoId) -> DbResult<Todo> {
        let found = with_deadline(self.collection.find_one(doc! { "_id": id })).await?;

        found
            .map(Todo::from)
            .ok_or_else(|| DbError::NotFound { id: id.to_hex() })
    }

    async fn update(&self, id: TodoId, patch: TodoPatch) -> DbResult<()> {
        let mut set = Document::new();
        if let Some(task) = patch.task {
            set.insert("task", task);
        }
        if let Some(description) = patch.description {
            set.insert("description", description);
        }
        if let Some(is_completed) = patch.is_completed {
            set.insert("isCompleted", is_completed);
        }
        // Refreshed on every update, including field-identical patches.
        set.insert("updatedAt", to_bson_datetime(Utc::now()));

        let result = with_deadline(
            self.collection
                .update_one(doc! { "_id": id }, doc! { "$set": set }),
        )
        .await?;

        if result.matched_count == 0 {
            return Err(DbError::NotFound { id: id.to_hex() });
        }
        Ok(())
    }

    async fn delete(&self, id: TodoId) -> DbResult<()> {
        let result = with_deadline(self.collection.delete_one(doc! { "_id": id })).await?;

        if result.deleted_count == 0 {
            return Err(DbError::NotFound { id: id.to_hex() });
        }
        Ok(())
    }
}
