pub mod fold;
pub mod types;
