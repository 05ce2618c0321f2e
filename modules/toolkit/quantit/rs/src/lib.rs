pub use aggregator::Aggregator;
pub use classify::{Classifier, EditEvent, EditKind, Label, ReadOutcome};
pub use config::Config;
pub use error::{Error, Result};
pub use parallel::{Engine, EngineBuilder, Quantification};
pub use pipeline::Pipeline;
pub use reference::{Reference, ReferenceSet};
pub use select::{Selection, Selector};
pub use table::{AggregateTable, Counters, ReferenceCounts};

mod aggregator;
mod classify;
mod config;
mod error;
mod parallel;
mod pipeline;
mod reference;
mod select;
mod table;

/// Alignment score type used across the toolkit
pub type Score = i32;
