//! Skell library crate
//!
//! Client for the SKELL (Sketch Engine for Language Learning) corpus service:
//! example sentences, word sketches, collocation concordances and thesaurus
//! lookups, returned as typed values.

pub mod cli;
pub mod client;
pub mod models;

// Re-export commonly used types
pub use client::{ClientConfig, HttpTransport, SkellClient, SkellError, Transport};
pub use models::{
    Collocation, CollocationRef, GrammaticalRelation, Language, RelationRef, Sentence,
    WordSketch, WordSketchKind,
};
