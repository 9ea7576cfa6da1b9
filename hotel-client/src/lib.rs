//! # hotel-client
//!
//! A typed client for the `/api/<resource>` endpoints. Reads go through a
//! [`QueryCache`] keyed like `["room"]` and `["room", id]`; every
//! successful mutation invalidates all keys of its resource, so the next
//! read fetches fresh data.
//!
//! ```rust,no_run
//! # async fn run() -> hotel_client::ClientResult<()> {
//! use hotel_client::{models::RoomType, HotelClient};
//!
//! let client = HotelClient::new("http://127.0.0.1:3000");
//! let created: RoomType = client
//!     .room_types()
//!     .create(&serde_json::json!({"type": "Deluxe", "description": "Sea view"}))
//!     .await?;
//! let all = client.room_types().list().await?;
//! assert!(all.iter().any(|rt| rt.id == created.id));
//! # Ok(())
//! # }
//! ```

mod cache;
mod client;
mod error;
pub mod models;

pub use cache::{QueryCache, QueryKey};
pub use client::{DeleteResponse, HotelClient, ResourceClient};
pub use error::{ClientError, ClientResult};
