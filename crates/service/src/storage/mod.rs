//! Storage helpers for the service layer
//!
//! The backing document is a single JSON array rewritten as a whole on every save.

pub mod json_array_file;
