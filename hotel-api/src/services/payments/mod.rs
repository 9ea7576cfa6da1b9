pub mod payments_schema;

use hotel_store::{ForeignKey, TableSchema};

use crate::services::Resource;

pub use payments_schema::PaymentInput;

const PAYMENT_KEYS: &[ForeignKey] = &[ForeignKey::scalar("bookingId", "booking")];

pub struct Payments;

impl Resource for Payments {
    type Input = PaymentInput;

    const NAME: &'static str = "payment";
    const LABEL: &'static str = "Payment";
    const TABLE: TableSchema = TableSchema::new("payment").with_foreign_keys(PAYMENT_KEYS);
}
