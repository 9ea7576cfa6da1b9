use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInput {
    #[validate(required(message = "amount is required"))]
    pub amount: Option<f64>,

    #[validate(required(message = "paymentDate is required"))]
    pub payment_date: Option<DateTime<Utc>>,

    /// Free-form, e.g. "Pending", "Completed", "Refunded".
    #[validate(required(message = "status is required"), length(min = 1, message = "status must not be empty"))]
    pub status: Option<String>,

    #[validate(
        required(message = "bookingId is required"),
        length(min = 1, message = "bookingId must not be empty")
    )]
    pub booking_id: Option<String>,
}
