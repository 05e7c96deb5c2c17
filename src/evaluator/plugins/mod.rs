pub mod contains;
pub mod date_range;
pub mod equality;
pub mod like;
pub mod range;
