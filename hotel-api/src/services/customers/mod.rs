pub mod customers_schema;

use hotel_store::TableSchema;

use crate::services::Resource;

pub use customers_schema::CustomerInput;

pub struct Customers;

impl Resource for Customers {
    type Input = CustomerInput;

    const NAME: &'static str = "customer";
    const LABEL: &'static str = "Customer";
    const TABLE: TableSchema = TableSchema::new("customer").with_unique(&["email"]);
}
