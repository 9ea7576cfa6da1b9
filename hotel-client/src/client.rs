use std::marker::PhantomData;
use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::models::{BedType, Booking, Customer, Deal, Payment, Room, RoomStatus, RoomType};
use crate::{ClientError, ClientResult, QueryCache, QueryKey};

/// Entry point: one HTTP client, one base URL, one shared cache.
#[derive(Clone)]
pub struct HotelClient {
    http: Client,
    base_url: String,
    cache: Arc<QueryCache>,
}

impl HotelClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache: Arc::new(QueryCache::new()),
        }
    }

    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    /// A client for `/api/<name>` decoding records as `T`.
    pub fn resource<T>(&self, name: &'static str) -> ResourceClient<T>
    where
        T: DeserializeOwned,
    {
        ResourceClient {
            http: self.http.clone(),
            url: format!("{}/api/{name}", self.base_url),
            name,
            cache: Arc::clone(&self.cache),
            _record: PhantomData,
        }
    }

    pub fn bed_types(&self) -> ResourceClient<BedType> {
        self.resource("bedType")
    }

    pub fn bookings(&self) -> ResourceClient<Booking> {
        self.resource("booking")
    }

    pub fn customers(&self) -> ResourceClient<Customer> {
        self.resource("customer")
    }

    pub fn deals(&self) -> ResourceClient<Deal> {
        self.resource("deal")
    }

    pub fn payments(&self) -> ResourceClient<Payment> {
        self.resource("payment")
    }

    pub fn rooms(&self) -> ResourceClient<Room> {
        self.resource("room")
    }

    pub fn room_statuses(&self) -> ResourceClient<RoomStatus> {
        self.resource("roomStatus")
    }

    pub fn room_types(&self) -> ResourceClient<RoomType> {
        self.resource("roomType")
    }
}

/// `{ message, id }` returned by DELETE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
    pub id: String,
}

pub struct ResourceClient<T> {
    http: Client,
    url: String,
    name: &'static str,
    cache: Arc<QueryCache>,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            url: self.url.clone(),
            name: self.name,
            cache: Arc::clone(&self.cache),
            _record: PhantomData,
        }
    }
}

/// Non-2xx responses become `ClientError::Status`.
async fn check(response: Response) -> ClientResult<Value> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<Value>().await?);
    }

    let body: Value = response.json().await.unwrap_or(Value::Null);
    let field = |key: &str| {
        body.get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_default()
    };

    Err(ClientError::Status {
        status: status.as_u16(),
        error: field("error"),
        message: field("message"),
    })
}

impl<T> ResourceClient<T>
where
    T: DeserializeOwned,
{
    pub fn name(&self) -> &'static str {
        self.name
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.http.request(method, &self.url)
    }

    async fn cached(&self, key: QueryKey, request: RequestBuilder) -> ClientResult<Value> {
        if let Some(hit) = self.cache.get(&key).await {
            tracing::debug!(key = ?key.segments(), "query cache hit");
            return Ok(hit);
        }

        let generation = self.cache.generation(self.name).await;
        let value = check(request.send().await?).await?;
        if !self.cache.insert_if_current(key, value.clone(), generation).await {
            tracing::debug!(resource = self.name, "stale response not cached");
        }
        Ok(value)
    }

    async fn mutate(&self, request: RequestBuilder) -> ClientResult<Value> {
        let value = check(request.send().await?).await?;
        let dropped = self.cache.invalidate(self.name).await;
        tracing::debug!(resource = self.name, dropped, "query cache invalidated");
        Ok(value)
    }

    /// `GET /api/<name>`
    pub async fn list(&self) -> ClientResult<Vec<T>> {
        let value = self
            .cached(QueryKey::list(self.name), self.request(Method::GET))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// `GET /api/<name>?<field>=<value>`
    pub async fn list_where(&self, field: &str, value: &str) -> ClientResult<Vec<T>> {
        let request = self.request(Method::GET).query(&[(field, value)]);
        let value = self
            .cached(QueryKey::filtered(self.name, field, value), request)
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// `GET /api/<name>?id=<id>`; `None` when the record does not exist.
    pub async fn get(&self, id: &str) -> ClientResult<Option<T>> {
        let request = self.request(Method::GET).query(&[("id", id)]);
        let value = self.cached(QueryKey::one(self.name, id), request).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// `POST /api/<name>`
    pub async fn create<D>(&self, data: &D) -> ClientResult<T>
    where
        D: Serialize + ?Sized,
    {
        let value = self.mutate(self.request(Method::POST).json(data)).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// `PUT /api/<name>` with `{ id, ...data }`.
    pub async fn update<D>(&self, id: &str, data: &D) -> ClientResult<T>
    where
        D: Serialize + ?Sized,
    {
        let mut body = serde_json::to_value(data)?;
        if let Some(obj) = body.as_object_mut() {
            obj.insert("id".to_string(), Value::String(id.to_string()));
        }

        let value = self.mutate(self.request(Method::PUT).json(&body)).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// `DELETE /api/<name>` with `{ id }`.
    pub async fn delete(&self, id: &str) -> ClientResult<DeleteResponse> {
        let value = self
            .mutate(self.request(Method::DELETE).json(&json!({ "id": id })))
            .await?;
        Ok(serde_json::from_value(value)?)
    }
}
