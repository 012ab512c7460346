//! Binary-side orchestration: input loading, command routing, progress, exit codes.

pub(crate) mod command_dispatcher;
pub(crate) mod exit_handler;
pub(crate) mod input_processor;
pub(crate) mod progress_manager;
pub(crate) mod terminal;
