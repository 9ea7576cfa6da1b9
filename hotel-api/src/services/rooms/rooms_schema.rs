use serde::{Deserialize, Serialize};
use validator::Validate;

fn available_by_default() -> bool {
    true
}

#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoomInput {
    #[validate(required(message = "roomNumber is required"))]
    pub room_number: Option<i32>,

    #[validate(required(message = "floor is required"))]
    pub floor: Option<i32>,

    #[validate(required(message = "price is required"))]
    pub price: Option<f64>,

    #[serde(default = "available_by_default")]
    pub is_available: bool,

    #[validate(
        required(message = "roomTypeId is required"),
        length(min = 1, message = "roomTypeId must not be empty")
    )]
    pub room_type_id: Option<String>,

    #[validate(
        required(message = "bedTypeId is required"),
        length(min = 1, message = "bedTypeId must not be empty")
    )]
    pub bed_type_id: Option<String>,

    #[validate(
        required(message = "statusId is required"),
        length(min = 1, message = "statusId must not be empty")
    )]
    pub status_id: Option<String>,
}
