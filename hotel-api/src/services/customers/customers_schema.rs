use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    #[validate(
        required(message = "firstName is required"),
        length(min = 1, message = "firstName must not be empty")
    )]
    pub first_name: Option<String>,

    #[validate(
        required(message = "lastName is required"),
        length(min = 1, message = "lastName must not be empty")
    )]
    pub last_name: Option<String>,

    #[validate(required(message = "email is required"), email(message = "email must be a valid email"))]
    pub email: Option<String>,

    #[validate(required(message = "phone is required"), length(min = 1, message = "phone must not be empty"))]
    pub phone: Option<String>,
}
