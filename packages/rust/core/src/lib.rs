//! Core pipeline orchestration for LeadGen.
//!
//! This crate ties the directory search, website summarizer, outreach
//! composer, and CSV exporter into a single run (`LeadPipeline::run`).

pub mod outreach;
pub mod pipeline;

pub use outreach::OutreachComposer;
pub use pipeline::{ExportStatus, LeadPipeline, PartialFailure, RunReport, Stage, StageFailure};
