pub mod distribution;
pub mod records;
pub mod summary;
