use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookingInput {
    #[validate(
        required(message = "customerId is required"),
        length(min = 1, message = "customerId must not be empty")
    )]
    pub customer_id: Option<String>,

    #[validate(required(message = "roomId is required"), length(min = 1, message = "roomId must not be empty"))]
    pub room_id: Option<String>,

    #[validate(required(message = "checkInDate is required"))]
    pub check_in_date: Option<DateTime<Utc>>,

    #[validate(required(message = "checkOutDate is required"))]
    pub check_out_date: Option<DateTime<Utc>>,

    #[validate(required(message = "totalPrice is required"))]
    pub total_price: Option<f64>,
}
