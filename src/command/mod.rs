//! Command parsing and dispatch pipeline
//!
//! Classified intents become executable commands here:
//! intent string/tokens -> CommandInput -> (verb_tag, target) ->
//! resolved handler -> concurrent execution -> ordered DispatchReport

pub mod dispatcher;
pub mod parser;

pub use dispatcher::{
    BatchStatus, CommandStatus, DispatchReport, Dispatcher, ExecutionResult, SkipReason,
    SkippedIntent,
};
pub use parser::{parse, CommandInput};
