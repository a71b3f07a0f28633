//! Guitar inventory: record model, validation and the file-backed store.

pub mod domain;
pub mod repository;
pub mod store;

pub use domain::{Guitar, GuitarInput};
pub use repository::GuitarRepository;
pub use store::GuitarStore;
