pub mod room_statuses_schema;

use hotel_store::TableSchema;

use crate::services::Resource;

pub use room_statuses_schema::RoomStatusInput;

pub struct RoomStatuses;

impl Resource for RoomStatuses {
    type Input = RoomStatusInput;

    const NAME: &'static str = "roomStatus";
    const LABEL: &'static str = "RoomStatus";
    const TABLE: TableSchema = TableSchema::new("roomStatus");
}
