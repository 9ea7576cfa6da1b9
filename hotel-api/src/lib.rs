mod app;
pub mod config;
mod hooks;
pub mod services;

use std::sync::Arc;

use anyhow::Result;
use hotel_axum::AxumApp;
use hotel_store::{DataStore, MemoryStore};
use serde_json::Value;

use crate::services::HotelParams;

/// The API backed by a fresh in-memory store.
pub fn build() -> Result<AxumApp<Value, HotelParams>> {
    let store: Arc<dyn DataStore> = Arc::new(MemoryStore::new(services::tables()));
    build_with_store(store)
}

pub fn build_with_store(store: Arc<dyn DataStore>) -> Result<AxumApp<Value, HotelParams>> {
    let ax = app::hotel_app()?;

    let svcs = services::configure(&ax.app, store)?;

    let ax = ax
        .use_service("/api/bedType", svcs.bed_types)
        .use_service("/api/booking", svcs.bookings)
        .use_service("/api/customer", svcs.customers)
        .use_service("/api/deal", svcs.deals)
        .use_service("/api/payment", svcs.payments)
        .use_service("/api/room", svcs.rooms)
        .use_service("/api/roomStatus", svcs.room_statuses)
        .use_service("/api/roomType", svcs.room_types)
        .service("/health", || async { "ok" });

    Ok(ax)
}
