pub mod cafe;
pub mod cafes;
pub mod errors;
pub mod runtime;
pub mod storage;
