//! Records as the API returns them.
//!
//! `id` is skipped when empty, so the same struct can be sent to `create`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn is_empty(id: &str) -> bool {
    id.is_empty()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BedType {
    #[serde(default, skip_serializing_if = "is_empty")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomStatus {
    #[serde(default, skip_serializing_if = "is_empty")]
    pub id: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomType {
    #[serde(default, skip_serializing_if = "is_empty")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    #[serde(default, skip_serializing_if = "is_empty")]
    pub id: String,
    pub deal_name: String,
    pub price: f64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub room_type_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default, skip_serializing_if = "is_empty")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    #[serde(default, skip_serializing_if = "is_empty")]
    pub id: String,
    pub room_number: i32,
    pub floor: i32,
    pub price: f64,
    pub is_available: bool,
    pub room_type_id: String,
    pub bed_type_id: String,
    pub status_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(default, skip_serializing_if = "is_empty")]
    pub id: String,
    pub customer_id: String,
    pub room_id: String,
    pub check_in_date: DateTime<Utc>,
    pub check_out_date: DateTime<Utc>,
    pub total_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(default, skip_serializing_if = "is_empty")]
    pub id: String,
    pub amount: f64,
    pub payment_date: DateTime<Utc>,
    pub status: String,
    pub booking_id: String,
}
