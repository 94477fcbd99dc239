//! Analyzer module for ns-2 style trace files.
//!
//! Provides functionality for:
//! - Reading a trace line by line
//! - Parsing send, receive and drop events
//! - Matching receives to sends to collect per-packet latency and delivery statistics

pub mod task;
pub mod trace_loader;
pub mod trace_parser;
pub mod types;

pub use task::process_trace;
