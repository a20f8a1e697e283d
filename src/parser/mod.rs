pub mod address;
pub mod scores;

pub use address::{parse, process_content};
