pub mod room_types_schema;

use hotel_store::TableSchema;

use crate::services::Resource;

pub use room_types_schema::RoomTypeInput;

pub struct RoomTypes;

impl Resource for RoomTypes {
    type Input = RoomTypeInput;

    const NAME: &'static str = "roomType";
    const LABEL: &'static str = "RoomType";
    const TABLE: TableSchema = TableSchema::new("roomType");
}
