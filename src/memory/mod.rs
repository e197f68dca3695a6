//! Memory retrieval: vector index, lexical ranking, entity stores, and recall.

pub mod context;
pub mod index;
pub mod lexical;
pub mod ranking;
pub mod recall;
pub mod store;
pub mod types;
