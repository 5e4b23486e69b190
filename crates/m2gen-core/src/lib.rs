pub mod error;
pub mod input;
pub mod merge;
pub mod report;
pub mod settings;
pub mod state;
pub mod template;
pub mod xml;

pub use error::{M2genError, Result};
pub use input::Inputs;
pub use merge::{build_settings, MergeSummary, MergedSettings};
pub use report::{ActionsReporter, ConsoleReporter, MemoryReporter, Reporter};
pub use settings::{
    cleanup, generate, CleanupOutcome, GenerateOptions, GeneratedSettings, WriteOutcome,
};
pub use state::{ActionsState, FileState, MemoryState, RunState};
pub use template::TemplateLibrary;
