use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{DataStore, Filter, RelationKind, StoreError, StoreResult, TableSchema};

struct Row {
    seq: u64,
    value: Value,
}

struct Table {
    schema: TableSchema,
    rows: HashMap<String, Row>,
    next_seq: u64,
}

impl Table {
    fn new(schema: TableSchema) -> Self {
        Self {
            schema,
            rows: HashMap::new(),
            next_seq: 0,
        }
    }

    fn ordered(&self) -> Vec<&Row> {
        let mut rows: Vec<&Row> = self.rows.values().collect();
        rows.sort_by_key(|r| r.seq);
        rows
    }
}

/// An in-memory relational store.
///
/// Writers are serialized by one `RwLock` over all tables, so every
/// integrity check sees a consistent view.
pub struct MemoryStore {
    tables: RwLock<HashMap<&'static str, Table>>,
}

impl MemoryStore {
    pub fn new<I>(schemas: I) -> Self
    where
        I: IntoIterator<Item = TableSchema>,
    {
        let tables = schemas
            .into_iter()
            .map(|schema| (schema.name, Table::new(schema)))
            .collect();

        Self {
            tables: RwLock::new(tables),
        }
    }
}

fn table<'a>(tables: &'a HashMap<&'static str, Table>, name: &str) -> StoreResult<&'a Table> {
    tables.get(name).ok_or_else(|| StoreError::unknown_table(name))
}

fn table_mut<'a>(tables: &'a mut HashMap<&'static str, Table>, name: &str) -> StoreResult<&'a mut Table> {
    tables.get_mut(name).ok_or_else(|| StoreError::unknown_table(name))
}

fn into_object(table: &str, data: Value) -> StoreResult<Map<String, Value>> {
    match data {
        Value::Object(mut obj) => {
            obj.remove("id");
            Ok(obj)
        }
        _ => Err(StoreError::invalid(table, "row must be a JSON object")),
    }
}

fn exists(tables: &HashMap<&'static str, Table>, table: &str, id: &Value) -> bool {
    id.as_str()
        .and_then(|id| tables.get(table).map(|t| t.rows.contains_key(id)))
        .unwrap_or(false)
}

/// Every foreign key on `row` must point at an existing row. Absent or
/// null scalar keys are allowed.
fn check_foreign_keys(
    tables: &HashMap<&'static str, Table>,
    schema: &TableSchema,
    row: &Map<String, Value>,
) -> StoreResult<()> {
    for fk in schema.foreign_keys {
        let violation = || StoreError::foreign_key(schema.name, fk.field);

        match (fk.kind, row.get(fk.field)) {
            (_, None) | (_, Some(Value::Null)) => {}
            (RelationKind::Scalar, Some(id)) => {
                if !exists(tables, fk.references, id) {
                    return Err(violation());
                }
            }
            (RelationKind::List, Some(Value::Array(ids))) => {
                if !ids.iter().all(|id| exists(tables, fk.references, id)) {
                    return Err(violation());
                }
            }
            (RelationKind::List, Some(_)) => {
                return Err(StoreError::invalid(schema.name, format!("`{}` must be an array of ids", fk.field)));
            }
        }
    }

    Ok(())
}

fn check_unique(table: &Table, row: &Map<String, Value>, own_id: Option<&str>) -> StoreResult<()> {
    for field in table.schema.unique {
        let Some(value) = row.get(*field).filter(|v| !v.is_null()) else {
            continue;
        };

        let taken = table
            .rows
            .iter()
            .filter(|(id, _)| Some(id.as_str()) != own_id)
            .any(|(_, r)| r.value.get(*field) == Some(value));

        if taken {
            return Err(StoreError::unique(table.schema.name, *field));
        }
    }

    Ok(())
}

/// Refuses the delete while a scalar foreign key still points at the row.
fn check_not_referenced(tables: &HashMap<&'static str, Table>, name: &str, id: &str) -> StoreResult<()> {
    for other in tables.values() {
        for fk in other.schema.foreign_keys {
            if fk.references != name || fk.kind != RelationKind::Scalar {
                continue;
            }

            let used = other
                .rows
                .values()
                .any(|r| r.value.get(fk.field).and_then(Value::as_str) == Some(id));

            if used {
                return Err(StoreError::foreign_key(other.schema.name, fk.field));
            }
        }
    }

    Ok(())
}

/// Removes `id` from every list foreign key pointing at `name`.
fn disconnect(tables: &mut HashMap<&'static str, Table>, name: &str, id: &str) {
    for other in tables.values_mut() {
        let fields: Vec<&'static str> = other
            .schema
            .foreign_keys
            .iter()
            .filter(|fk| fk.references == name && fk.kind == RelationKind::List)
            .map(|fk| fk.field)
            .collect();

        for field in fields {
            for row in other.rows.values_mut() {
                if let Some(Value::Array(ids)) = row.value.get_mut(field) {
                    ids.retain(|v| v.as_str() != Some(id));
                }
            }
        }
    }
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn find_many(&self, table_name: &str, filter: &Filter) -> StoreResult<Vec<Value>> {
        let tables = self.tables.read().await;
        let table = table(&tables, table_name)?;

        Ok(table
            .ordered()
            .into_iter()
            .filter(|r| filter.matches(&r.value))
            .map(|r| r.value.clone())
            .collect())
    }

    async fn find_unique(&self, table_name: &str, id: &str) -> StoreResult<Option<Value>> {
        let tables = self.tables.read().await;
        let table = table(&tables, table_name)?;
        Ok(table.rows.get(id).map(|r| r.value.clone()))
    }

    async fn create(&self, table_name: &str, data: Value) -> StoreResult<Value> {
        let mut tables = self.tables.write().await;

        let mut obj = into_object(table_name, data)?;
        {
            let table = table(&tables, table_name)?;
            check_foreign_keys(&tables, &table.schema, &obj)?;
            check_unique(table, &obj, None)?;
        }

        let id = Uuid::new_v4().to_string();
        obj.insert("id".to_string(), Value::String(id.clone()));
        let value = Value::Object(obj);

        let table = table_mut(&mut tables, table_name)?;
        let seq = table.next_seq;
        table.next_seq += 1;
        table.rows.insert(id.clone(), Row { seq, value: value.clone() });

        tracing::debug!(table = table_name, %id, "row created");
        Ok(value)
    }

    async fn update(&self, table_name: &str, id: &str, data: Value) -> StoreResult<Value> {
        let mut tables = self.tables.write().await;

        let mut obj = into_object(table_name, data)?;
        {
            let table = table(&tables, table_name)?;
            if !table.rows.contains_key(id) {
                return Err(StoreError::not_found("update", table_name, id));
            }
            check_foreign_keys(&tables, &table.schema, &obj)?;
            check_unique(table, &obj, Some(id))?;
        }

        obj.insert("id".to_string(), Value::String(id.to_string()));
        let value = Value::Object(obj);

        let table = table_mut(&mut tables, table_name)?;
        if let Some(row) = table.rows.get_mut(id) {
            row.value = value.clone();
        }

        tracing::debug!(table = table_name, %id, "row replaced");
        Ok(value)
    }

    async fn delete(&self, table_name: &str, id: &str) -> StoreResult<Value> {
        let mut tables = self.tables.write().await;

        if !table(&tables, table_name)?.rows.contains_key(id) {
            return Err(StoreError::not_found("delete", table_name, id));
        }
        check_not_referenced(&tables, table_name, id)?;

        disconnect(&mut tables, table_name, id);

        let removed = table_mut(&mut tables, table_name)?
            .rows
            .remove(id)
            .map(|r| r.value)
            .ok_or_else(|| StoreError::not_found("delete", table_name, id))?;

        tracing::debug!(table = table_name, %id, "row deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ForeignKey;

    const ROOM_KEYS: &[ForeignKey] = &[ForeignKey::scalar("roomTypeId", "roomType")];
    const DEAL_KEYS: &[ForeignKey] = &[ForeignKey::list("roomTypeIds", "roomType")];

    fn store() -> MemoryStore {
        MemoryStore::new([
            TableSchema::new("roomType"),
            TableSchema::new("room")
                .with_foreign_keys(ROOM_KEYS)
                .with_unique(&["roomNumber"]),
            TableSchema::new("deal").with_foreign_keys(DEAL_KEYS),
        ])
    }

    async fn room_type(store: &MemoryStore) -> String {
        let rt = store
            .create("roomType", json!({"type": "Deluxe", "description": "Sea view"}))
            .await
            .unwrap();
        rt["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn create_assigns_ids_and_keeps_insertion_order() {
        let store = store();
        let a = store.create("roomType", json!({"type": "A", "id": "ignored"})).await.unwrap();
        let b = store.create("roomType", json!({"type": "B"})).await.unwrap();

        assert_ne!(a["id"], "ignored");
        assert_ne!(a["id"], b["id"]);

        let all = store.find_many("roomType", &Filter::new()).await.unwrap();
        let types: Vec<&str> = all.iter().map(|r| r["type"].as_str().unwrap()).collect();
        assert_eq!(types, vec!["A", "B"]);

        let id = a["id"].as_str().unwrap();
        assert_eq!(store.find_unique("roomType", id).await.unwrap(), Some(a.clone()));
        assert_eq!(store.find_unique("roomType", "nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn scalar_foreign_keys_are_enforced_both_ways() {
        let store = store();

        let err = store
            .create("room", json!({"roomNumber": 101, "roomTypeId": "missing"}))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Foreign key constraint failed on the field: `room.roomTypeId`");

        let rt = room_type(&store).await;
        store
            .create("room", json!({"roomNumber": 101, "roomTypeId": rt}))
            .await
            .unwrap();

        let err = store.delete("roomType", &rt).await.unwrap_err();
        assert!(matches!(err, StoreError::ForeignKey { ref field, .. } if field == "roomTypeId"));
        assert!(store.find_unique("roomType", &rt).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn unique_fields_reject_duplicates_but_allow_self_update() {
        let store = store();
        let rt = room_type(&store).await;

        let first = store
            .create("room", json!({"roomNumber": 7, "roomTypeId": rt}))
            .await
            .unwrap();
        let err = store
            .create("room", json!({"roomNumber": 7, "roomTypeId": rt}))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UniqueConstraint { .. }));

        let id = first["id"].as_str().unwrap();
        let updated = store
            .update("room", id, json!({"roomNumber": 7, "roomTypeId": rt, "floor": 1}))
            .await
            .unwrap();
        assert_eq!(updated["floor"], 1);
        assert_eq!(updated["id"], id);
    }

    #[tokio::test]
    async fn deleting_a_listed_row_disconnects_it() {
        let store = store();
        let rt = room_type(&store).await;

        let deal = store
            .create("deal", json!({"dealName": "Summer", "roomTypeIds": [rt]}))
            .await
            .unwrap();

        store.delete("roomType", &rt).await.unwrap();

        let deal = store
            .find_unique("deal", deal["id"].as_str().unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(deal["roomTypeIds"], json!([]));

        let err = store
            .create("deal", json!({"dealName": "Winter", "roomTypeIds": [rt]}))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ForeignKey { .. }));
    }

    #[tokio::test]
    async fn missing_rows_and_tables_are_errors() {
        let store = store();

        let err = store.delete("room", "x").await.unwrap_err();
        assert!(matches!(err, StoreError::RecordNotFound { action: "delete", .. }));

        let err = store.update("room", "x", json!({})).await.unwrap_err();
        assert!(matches!(err, StoreError::RecordNotFound { action: "update", .. }));

        let err = store.find_many("guest", &Filter::new()).await.unwrap_err();
        assert!(matches!(err, StoreError::UnknownTable { .. }));
    }
}
