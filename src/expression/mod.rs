pub mod extract;
pub mod pattern;

pub use extract::{extract, extract_number, extract_text, resolve};
