use async_trait::async_trait;
use serde_json::Value;

use crate::StoreResult;

/// Core data store operations over JSON rows.
///
/// `create` assigns the row id; `update` replaces the whole row. Both
/// enforce the table's foreign keys and unique fields.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// All rows of `table` matching `filter`, in insertion order.
    async fn find_many(&self, table: &str, filter: &Filter) -> StoreResult<Vec<Value>>;

    /// `None` when no row has this id.
    async fn find_unique(&self, table: &str, id: &str) -> StoreResult<Option<Value>>;

    async fn create(&self, table: &str, data: Value) -> StoreResult<Value>;

    async fn update(&self, table: &str, id: &str, data: Value) -> StoreResult<Value>;

    /// Removes the row and returns it.
    async fn delete(&self, table: &str, id: &str) -> StoreResult<Value>;
}

/// Equality conditions on top-level fields, all of which must hold.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((field.into(), value.into()));
        self
    }

    pub fn matches(&self, row: &Value) -> bool {
        self.conditions
            .iter()
            .all(|(field, expected)| row.get(field) == Some(expected))
    }
}
