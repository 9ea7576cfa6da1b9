use std::sync::Arc;

use hotel_core::{HotelApp, HotelService};
use hotel_store::{DataStore, TableSchema};
use serde_json::Value;

pub mod resource;
pub use resource::{Resource, ResourceService};

pub mod bed_types;
pub mod bookings;
pub mod customers;
pub mod deals;
pub mod payments;
pub mod room_statuses;
pub mod room_types;
pub mod rooms;

pub type HotelParams = hotel_axum::params::RestParams;

type Svc = Arc<dyn HotelService<Value, HotelParams>>;

pub struct HotelServices {
    pub bed_types: Svc,
    pub bookings: Svc,
    pub customers: Svc,
    pub deals: Svc,
    pub payments: Svc,
    pub rooms: Svc,
    pub room_statuses: Svc,
    pub room_types: Svc,
}

/// Every table the services need, for building a store.
pub fn tables() -> Vec<TableSchema> {
    vec![
        bed_types::BedTypes::TABLE,
        room_statuses::RoomStatuses::TABLE,
        room_types::RoomTypes::TABLE,
        customers::Customers::TABLE,
        deals::Deals::TABLE,
        rooms::Rooms::TABLE,
        bookings::Bookings::TABLE,
        payments::Payments::TABLE,
    ]
}

pub fn configure(
    app: &HotelApp<Value, HotelParams>,
    store: Arc<dyn DataStore>,
) -> anyhow::Result<HotelServices> {
    Ok(HotelServices {
        bed_types: resource::register::<bed_types::BedTypes>(app, Arc::clone(&store))?,
        bookings: resource::register::<bookings::Bookings>(app, Arc::clone(&store))?,
        customers: resource::register::<customers::Customers>(app, Arc::clone(&store))?,
        deals: resource::register::<deals::Deals>(app, Arc::clone(&store))?,
        payments: resource::register::<payments::Payments>(app, Arc::clone(&store))?,
        rooms: resource::register::<rooms::Rooms>(app, Arc::clone(&store))?,
        room_statuses: resource::register::<room_statuses::RoomStatuses>(app, Arc::clone(&store))?,
        room_types: resource::register::<room_types::RoomTypes>(app, store)?,
    })
}
