//! AI orchestration core for a mental-health support backend.
//!
//! Four public operations -- therapeutic chat replies, emotion analysis,
//! coping-suggestion generation, and weekly summaries -- composed from a
//! prompt builder, a narrow model gateway, a strict structured-response
//! extractor, and a deterministic fallback policy. Analytics operations
//! never fail: anything the model layer cannot produce trustworthily is
//! replaced by a safe pre-authored default. Only the conversational path
//! fails loudly.

pub mod api;
pub mod config;
pub mod error;
pub mod llm;
pub mod support;
