//! Command dispatch pipeline
//!
//! Classified Intent -> CommandDispatcher (+ ParamSource answers) -> Outcome

pub mod dispatcher;
pub mod outcome;
pub mod params;

pub use dispatcher::CommandDispatcher;
pub use outcome::{Diagnostic, DiagnosticKind, Level, Outcome};
pub use params::{ParamKey, ParamKind, ParamRequest, ParamSource, SuppliedParams};
