//! Storage abstractions for service layer
//!
//! Contains the reusable file-backed array store that persists a whole
//! collection as one JSON document.

pub mod json_array_store;
