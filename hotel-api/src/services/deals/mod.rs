pub mod deals_schema;

use hotel_store::{ForeignKey, TableSchema};

use crate::services::Resource;

pub use deals_schema::DealInput;

/// Deals apply to many room types and a room type can have many deals.
const DEAL_KEYS: &[ForeignKey] = &[ForeignKey::list("roomTypeIds", "roomType")];

pub struct Deals;

impl Resource for Deals {
    type Input = DealInput;

    const NAME: &'static str = "deal";
    const LABEL: &'static str = "Deal";
    const TABLE: TableSchema = TableSchema::new("deal").with_foreign_keys(DEAL_KEYS);
}
