//! Core data models for Prism.
//!
//! This crate provides the fundamental data types shared across the Prism
//! client: analysis kinds and requests, result value objects, transcripts,
//! and the library projection of ingested content.

pub mod ids;
pub mod kind;
pub mod library;
pub mod request;
pub mod result;
pub mod transcript;

pub use ids::{ContentId, RunId};
pub use kind::AnalysisKind;
pub use library::{LibraryItem, SourceType};
pub use request::{
    AnalysisMode, AnalysisSource, DiscoveryOptions, DiscoveryRequest, ManipulationOptions,
    ManipulationRequest, PromptOptions, PromptRequest, RhetoricalOptions, RhetoricalRequest,
    SummaryLength, SummaryOptions, SummaryRequest,
};
pub use result::{
    AnalysisResult, ClaimCheck, DiscoveryReport, DomainInsight, GeneratedPrompt,
    ManipulationReport, ManipulationTactic, PromptSet, RhetoricalReport, RhetoricalTechnique,
    Severity, Summary,
};
pub use transcript::{Transcript, TranscriptSegment};
