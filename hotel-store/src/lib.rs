//! # hotel-store
//!
//! The persistence seam for the hotel back office. Services talk to a
//! [`DataStore`] trait object; the store owns identifier generation,
//! uniqueness and referential integrity.
//!
//! Rows are JSON objects. Each table is described by a [`TableSchema`]
//! listing its foreign keys and unique fields:
//!
//! ```rust
//! use hotel_store::{ForeignKey, TableSchema};
//!
//! const ROOM_KEYS: &[ForeignKey] = &[ForeignKey::scalar("roomTypeId", "roomType")];
//!
//! const ROOM: TableSchema = TableSchema::new("room")
//!     .with_foreign_keys(ROOM_KEYS)
//!     .with_unique(&["roomNumber"]);
//!
//! assert_eq!(ROOM.foreign_keys[0].references, "roomType");
//! ```
//!
//! [`MemoryStore`] is the bundled implementation.

mod error;
mod memory;
mod schema;
mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use schema::{ForeignKey, RelationKind, TableSchema};
pub use store::{DataStore, Filter};
