//! docbay-llm - External service clients for the conversion pipeline.
//!
//! Implements the `Refine` and `Index` trait seams from docbay-core:
//!
//! - [`TextRefiner`] sends extracted text to an OpenAI-compatible
//!   chat-completions endpoint with a fixed formatting prompt.
//! - [`ArtifactIndexer`] uploads produced markdown to an external indexing
//!   service and triggers chunking, best-effort.

mod indexer;
mod prompt;
mod refiner;

pub use indexer::ArtifactIndexer;
pub use prompt::build_prompt;
pub use refiner::TextRefiner;
