// Bulk data movement out of the store.

pub mod export;

pub use export::*;
