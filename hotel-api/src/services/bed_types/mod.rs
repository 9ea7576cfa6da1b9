pub mod bed_types_schema;

use hotel_store::TableSchema;

use crate::services::Resource;

pub use bed_types_schema::BedTypeInput;

pub struct BedTypes;

impl Resource for BedTypes {
    type Input = BedTypeInput;

    const NAME: &'static str = "bedType";
    const LABEL: &'static str = "BedType";
    const TABLE: TableSchema = TableSchema::new("bedType");
}
