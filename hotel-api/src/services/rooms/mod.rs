pub mod rooms_params;
pub mod rooms_schema;

use hotel_store::{Filter, ForeignKey, TableSchema};

use crate::services::{HotelParams, Resource};

pub use rooms_params::RoomParams;
pub use rooms_schema::RoomInput;

const ROOM_KEYS: &[ForeignKey] = &[
    ForeignKey::scalar("roomTypeId", "roomType"),
    ForeignKey::scalar("bedTypeId", "bedType"),
    ForeignKey::scalar("statusId", "roomStatus"),
];

pub struct Rooms;

impl Resource for Rooms {
    type Input = RoomInput;

    const NAME: &'static str = "room";
    const LABEL: &'static str = "Room";
    const TABLE: TableSchema = TableSchema::new("room")
        .with_foreign_keys(ROOM_KEYS)
        .with_unique(&["roomNumber"]);

    /// `GET /api/room?roomTypeId=...` lists the rooms of one type.
    fn filter(params: &HotelParams) -> Filter {
        let room_params = RoomParams::from(params);

        match room_params.room_type_id {
            Some(room_type_id) => Filter::new().eq("roomTypeId", room_type_id),
            None => Filter::new(),
        }
    }
}
