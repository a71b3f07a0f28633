//! Service layer for the guitar inventory.
//! - Owns the in-memory collection and its JSON file persistence.
//! - Keeps validation next to the record model so the HTTP layer only maps errors.

pub mod errors;
pub mod guitars;
pub mod runtime;
pub mod storage;
