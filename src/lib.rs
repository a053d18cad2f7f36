//! Parse ping output into structured entries and score the connection.
//!
//! The core is the pure [`parser`] + [`analysis`] pipeline: a transcript of
//! ping stdout goes in, an immutable [`model::AnalysisReport`] comes out.
//! Everything else (the [`probe`] subprocess runner, [`cli`], [`storage`]
//! export, [`text_summary`]) is thin glue around that pipeline.

pub mod analysis;
pub mod cli;
pub mod humanize;
pub mod model;
pub mod parser;
pub mod probe;
pub mod storage;
pub mod text_summary;
