pub mod dates;
pub mod error;
pub mod types;
pub mod value;

pub use error::{Result, ViewError};
pub use types::{FieldPath, Record};
pub use value::Value;
