//! # Docbench Runner
//!
//! Runs a document-conversion tool once per named configuration against a
//! single input document and summarises the outcomes.
//!
//! The pieces line up as a pipeline: the [`Registry`] supplies ordered
//! [`ConfigurationRecord`]s, the [`CommandBuilder`] turns each into a
//! converter invocation, the [`ConversionExecutor`] runs it, and the
//! [`BatchRunner`] tallies results and hands them to the [`ReportGenerator`].

pub mod command;
pub mod driver;
pub mod error;
pub mod executor;
pub mod models;
pub mod progress;
pub mod registry;
pub mod report;
pub mod tally;

pub use command::{CommandBuilder, CommandLine};
pub use driver::{BatchOutcome, BatchRunner};
pub use error::RunnerError;
pub use executor::{ConversionExecutor, ExecutorError};
pub use models::{ConfigurationRecord, ConversionOptions, ImageMode, OcrEngine, RunResult};
pub use registry::Registry;
pub use report::{REPORT_FILE_NAME, ReportGenerator};
pub use tally::RunTally;
