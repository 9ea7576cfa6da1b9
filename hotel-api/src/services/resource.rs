use std::marker::PhantomData;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use hotel_core::{HotelApp, HotelError, HotelService};
use hotel_schema::ValidateSchema;
use hotel_store::{DataStore, Filter, TableSchema};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use validator::Validate;

use crate::services::HotelParams;

/// One CRUD resource: its name, request schema and table.
pub trait Resource: Send + Sync + 'static {
    /// Request body accepted by POST and PUT.
    type Input: DeserializeOwned + Serialize + Validate + 'static;

    /// Service, route and table name (`room` → `/api/room`).
    const NAME: &'static str;

    /// Used in messages: "Error Creating Room", "Room deleted successfully".
    const LABEL: &'static str;

    const TABLE: TableSchema;

    /// Narrow `find` by request params.
    fn filter(_params: &HotelParams) -> Filter {
        Filter::new()
    }
}

/// Generic `HotelService` over a [`DataStore`] table.
pub struct ResourceService<T> {
    store: Arc<dyn DataStore>,
    _resource: PhantomData<fn() -> T>,
}

impl<T: Resource> ResourceService<T> {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self {
            store,
            _resource: PhantomData,
        }
    }

    fn require_id<'a>(id: Option<&'a str>, msg: &'static str) -> Result<&'a str> {
        id.filter(|s| !s.trim().is_empty())
            .ok_or_else(|| HotelError::bad_request(msg).into_anyhow())
    }
}

#[async_trait]
impl<T: Resource> HotelService<Value, HotelParams> for ResourceService<T> {
    fn label(&self) -> &'static str {
        T::LABEL
    }

    async fn find(&self, params: HotelParams) -> Result<Vec<Value>> {
        let filter = T::filter(&params);
        Ok(self.store.find_many(T::NAME, &filter).await?)
    }

    async fn get(&self, id: &str, _params: HotelParams) -> Result<Option<Value>> {
        Ok(self.store.find_unique(T::NAME, id).await?)
    }

    async fn create(&self, data: Value, _params: HotelParams) -> Result<Value> {
        Ok(self.store.create(T::NAME, data).await?)
    }

    async fn update(&self, id: Option<&str>, data: Value, _params: HotelParams) -> Result<Value> {
        let id = Self::require_id(id, "ID is required for updating")?;
        Ok(self.store.update(T::NAME, id, data).await?)
    }

    async fn remove(&self, id: Option<&str>, _params: HotelParams) -> Result<Value> {
        let id = Self::require_id(id, "ID is required for deletion")?;
        Ok(self.store.delete(T::NAME, id).await?)
    }
}

/// Register the service for `T` and its schema hooks.
pub fn register<T: Resource>(
    app: &HotelApp<Value, HotelParams>,
    store: Arc<dyn DataStore>,
) -> Result<Arc<dyn HotelService<Value, HotelParams>>> {
    let service: Arc<dyn HotelService<Value, HotelParams>> = Arc::new(ResourceService::<T>::new(store));
    app.register_service(T::NAME, Arc::clone(&service));

    app.service(T::NAME)?.hooks(|h| {
        h.before_create(Arc::new(ValidateSchema::<T::Input>::new()));
        h.before_update(Arc::new(ValidateSchema::<T::Input>::new()));
    });

    Ok(service)
}
