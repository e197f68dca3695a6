//! Memory retrieval for character chat.
//!
//! Characters and universes each own a list of short textual memories. Before a
//! prompt is built, those memories have to be narrowed down to the handful that
//! matter for the current conversation. This crate is the engine that does it.
//!
//! Two retrieval paths solve the same problem with different tradeoffs:
//!
//! | Path | Input | Scoring | Cost |
//! |------|-------|---------|------|
//! | **Lexical** | In-memory memory list + query fragments | `0.7 * tf-cosine + 0.3 * salience`, ties by recency | No embedding call |
//! | **Semantic** | Entity id + query text | Cosine similarity of embeddings | One embedding call per query |
//!
//! # Architecture
//!
//! - **Vector index**: in-process, exact linear-scan cosine search over named
//!   partitions (`"character:<id>"`, `"universe:<id>"`). Process-lifetime only.
//! - **Embeddings**: pluggable HTTP providers (Ollama, OpenAI-compatible)
//! - **Lexical ranking**: bag-of-words term-frequency cosine blended with salience
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files and environment variables
//! - [`embedding`] - Text-to-vector embedding providers
//! - [`memory`] - Vector index, lexical ranking, entity memory stores, and recall

pub mod config;
pub mod embedding;
pub mod memory;
