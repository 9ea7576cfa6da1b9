use crate::services::HotelParams;

#[derive(Clone)]
pub struct RoomParams {
    pub room_type_id: Option<String>,
}

impl From<&HotelParams> for RoomParams {
    fn from(params: &HotelParams) -> Self {
        Self {
            room_type_id: params.query_param("roomTypeId").map(str::to_string),
        }
    }
}
