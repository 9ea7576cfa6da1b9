//! hotel-axum: Axum adapter for the hotel back office.
//!
//! Mounts `HotelService`s as `/api/<resource>` REST endpoints and turns
//! pipeline errors into `{ error, message }` JSON responses.

pub mod app;
pub mod params;
pub mod rest;
pub mod state;
mod error;
pub use error::HotelAxumError;
pub use state::HotelAxumState;

pub use app::{axum, AxumApp};
