pub mod index;
pub mod interfaces;

pub use interfaces::config;
