pub mod schema;
pub mod value;

pub use schema::{ConfigSnapshot, DataType, FieldSchema};
pub use value::{FieldShape, FieldValue};
