use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DealInput {
    #[validate(
        required(message = "dealName is required"),
        length(min = 1, message = "dealName must not be empty")
    )]
    pub deal_name: Option<String>,

    #[validate(required(message = "price is required"))]
    pub price: Option<f64>,

    #[validate(required(message = "startDate is required"))]
    pub start_date: Option<DateTime<Utc>>,

    #[validate(required(message = "endDate is required"))]
    pub end_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub discount: Option<f64>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub room_type_ids: Vec<String>,
}
