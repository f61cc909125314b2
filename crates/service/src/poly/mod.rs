//! Poly-data objects: an ordered list of typed key/value entries under a
//! server-generated id.

pub mod domain;
pub mod repository;
pub mod store;

pub use repository::PolyRepository;
pub use store::InMemoryPolyStore;
