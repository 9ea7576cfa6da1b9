use anyhow::Result;
use hotel_axum::{axum, AxumApp};
use hotel_core::HotelApp;
use serde_json::Value;

use crate::services::HotelParams;

pub fn hotel_app() -> Result<AxumApp<Value, HotelParams>> {
    let hotel_app: HotelApp<Value, HotelParams> = HotelApp::new();

    crate::config::config(&hotel_app);
    crate::hooks::global_hooks(&hotel_app);

    Ok(axum(hotel_app))
}
