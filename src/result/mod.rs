mod result;

pub use result::{PageInfo, ViewOutcome, ViewPage};
