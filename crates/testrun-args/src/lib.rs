//! Command-line parsing for the testrun test runner.
//!
//! Turns an invocation such as
//!
//! ```text
//! tests.dll tests.json -parallel collections -maxthreads 2x -trait category=fast -xml out.xml
//! ```
//!
//! into a validated [`Project`], or rejects it with an [`ArgumentError`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use testrun_args::{
//!     ArgumentError, CommandLine, RealFileSystem, ReporterRegistry, RunnerReporter,
//!     TransformRegistry,
//! };
//!
//! #[derive(Debug)]
//! struct Console;
//!
//! impl RunnerReporter for Console {
//!     fn switch_name(&self) -> Option<&str> {
//!         None
//!     }
//!     fn description(&self) -> &str {
//!         "plain console output"
//!     }
//!     fn is_environmentally_enabled(&self) -> bool {
//!         false
//!     }
//! }
//!
//! let reporters = ReporterRegistry::new(Arc::new(Console));
//! let transforms = TransformRegistry::builtin();
//! let command_line = CommandLine::new(&RealFileSystem, &reporters, &transforms);
//!
//! let err = command_line.parse(&["missing.dll", "-nologo"]).unwrap_err();
//! assert_eq!(err, ArgumentError::FileNotFound("missing.dll".to_string()));
//! ```

pub mod configuration;
pub mod error;
pub mod fs;
pub mod parser;
pub mod project;
pub mod reporter;
pub mod switches;
pub mod transform;
pub mod values;

pub use configuration::{Configuration, Filters, TraitMap};
pub use error::{ArgumentError, Result};
pub use fs::{FileSystem, RealFileSystem};
pub use parser::CommandLine;
pub use project::{AssemblyConfig, Project};
pub use reporter::{select_reporter, ReporterRegistry, RunnerReporter};
pub use switches::usage;
pub use transform::{Transform, TransformDescriptor, TransformRegistry};
