pub mod bookings_schema;

use hotel_store::{ForeignKey, TableSchema};

use crate::services::Resource;

pub use bookings_schema::BookingInput;

const BOOKING_KEYS: &[ForeignKey] = &[
    ForeignKey::scalar("customerId", "customer"),
    ForeignKey::scalar("roomId", "room"),
];

pub struct Bookings;

impl Resource for Bookings {
    type Input = BookingInput;

    const NAME: &'static str = "booking";
    const LABEL: &'static str = "Booking";
    const TABLE: TableSchema = TableSchema::new("booking").with_foreign_keys(BOOKING_KEYS);
}
