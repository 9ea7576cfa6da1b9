use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct BedTypeInput {
    #[serde(rename = "type")]
    #[validate(required(message = "type is required"), length(min = 1, message = "type must not be empty"))]
    pub kind: Option<String>,

    #[validate(
        required(message = "description is required"),
        length(min = 1, message = "description must not be empty")
    )]
    pub description: Option<String>,
}
