use serde::{Deserialize, Serialize};
use validator::Validate;

/// Housekeeping state of a room, e.g. "Clean", "Occupied", "Maintenance".
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct RoomStatusInput {
    #[validate(required(message = "status is required"), length(min = 1, message = "status must not be empty"))]
    pub status: Option<String>,
}
