use anyhow::{anyhow, Result};
use async_trait::async_trait;

/// The service methods a resource can expose:
/// find, get, create, update, remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceMethodKind {
    Find,
    Get,
    Create,
    Update,
    Remove,
}

impl ServiceMethodKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceMethodKind::Find => "find",
            ServiceMethodKind::Get => "get",
            ServiceMethodKind::Create => "create",
            ServiceMethodKind::Update => "update",
            ServiceMethodKind::Remove => "remove",
        }
    }

    /// Verb used in error summaries, e.g. "Error Creating Room".
    pub fn verb(&self) -> &'static str {
        match self {
            ServiceMethodKind::Find | ServiceMethodKind::Get => "Fetching",
            ServiceMethodKind::Create => "Creating",
            ServiceMethodKind::Update => "Updating",
            ServiceMethodKind::Remove => "Deleting",
        }
    }
}

/// Capabilities describe which methods a service exposes
/// to the outside world.
///
/// Adapters (like hotel-axum) use this to mount only allowed routes.
#[derive(Debug, Clone)]
pub struct ServiceCapabilities {
    pub allowed_methods: Vec<ServiceMethodKind>,
}

impl ServiceCapabilities {
    /// Full CRUD: find, get, create, update, remove.
    pub fn standard_crud() -> Self {
        use ServiceMethodKind::*;
        Self {
            allowed_methods: vec![Find, Get, Create, Update, Remove],
        }
    }

    pub fn from_methods(methods: Vec<ServiceMethodKind>) -> Self {
        Self {
            allowed_methods: methods,
        }
    }

    pub fn allows(&self, method: ServiceMethodKind) -> bool {
        self.allowed_methods.contains(&method)
    }
}

/// Core service trait:
///
/// - `find`   → list many
/// - `get`    → fetch one by id (`None` when it does not exist)
/// - `create` → create one
/// - `update` → full replace, id required
/// - `remove` → delete one, id required
///
/// `update` and `remove` take `Option<&str>` so that a missing id can be
/// reported by the service itself as a client error.
///
/// All methods default to "Method not implemented", so a service
/// overrides only what it supports.
#[async_trait]
pub trait HotelService<R, P = ()>: Send + Sync
where
    R: Send + 'static,
    P: Send + 'static,
{
    fn capabilities(&self) -> ServiceCapabilities {
        ServiceCapabilities::standard_crud()
    }

    /// Human readable resource name, used in error summaries.
    fn label(&self) -> &'static str {
        "Record"
    }

    async fn find(&self, _params: P) -> Result<Vec<R>> {
        Err(anyhow!("Method not implemented: find"))
    }

    async fn get(&self, _id: &str, _params: P) -> Result<Option<R>> {
        Err(anyhow!("Method not implemented: get"))
    }

    async fn create(&self, _data: R, _params: P) -> Result<R> {
        Err(anyhow!("Method not implemented: create"))
    }

    async fn update(&self, _id: Option<&str>, _data: R, _params: P) -> Result<R> {
        Err(anyhow!("Method not implemented: update"))
    }

    async fn remove(&self, _id: Option<&str>, _params: P) -> Result<R> {
        Err(anyhow!("Method not implemented: remove"))
    }
}
