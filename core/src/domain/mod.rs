pub mod analysis;
pub mod common;
