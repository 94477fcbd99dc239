//! Trace analysis: accumulate send/receive/drop events into a `TraceSummary`.
//!
//! The whole trace is processed in one pass:
//! - `+` stores (or overwrites) the send time of a packet id
//! - `r` yields a latency if a send time for the id is known
//! - `d` counts a loss
//! - any other event code is ignored

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use super::trace_loader::TraceLoader;
use super::trace_parser::parse_trace_line;
use super::types::{TraceError, TraceEvent, TraceRecord, TraceSummary};

/// Running state for a single trace.
#[derive(Debug, Default)]
pub struct TraceAnalyzer {
    /// Most recent send time per packet id. Entries are never removed.
    send_times: HashMap<String, f64>,
    summary: TraceSummary,
    unmatched_receives: u64,
    ignored_events: u64,
}

impl TraceAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one record.
    pub fn record(&mut self, record: &TraceRecord) {
        match &record.event {
            TraceEvent::Send => {
                self.send_times.insert(record.packet_id.clone(), record.time);
                self.summary.sent_packets += 1;
            }
            TraceEvent::Receive => match self.send_times.get(&record.packet_id) {
                // A second receive for the same id matches the same send again.
                Some(send_time) => {
                    self.summary.latencies.push(record.time - send_time);
                    self.summary.received_packets += 1;
                }
                None => {
                    log::debug!("Receive without send for packet {} at {}", record.packet_id, record.time);
                    self.unmatched_receives += 1;
                }
            },
            TraceEvent::Drop => {
                self.summary.lost_packets += 1;
            }
            TraceEvent::Other(code) => {
                log::trace!("Ignoring event '{}' at {}", code, record.time);
                self.ignored_events += 1;
            }
        }
    }

    /// Consume the analyzer and return the collected statistics.
    pub fn finish(self) -> TraceSummary {
        if self.unmatched_receives > 0 || self.ignored_events > 0 {
            log::debug!(
                "{} unmatched receives and {} events with other codes ignored",
                self.unmatched_receives,
                self.ignored_events
            );
        }
        self.summary
    }
}

/// Analyze a trace from any buffered source.
///
/// Stops at the first unreadable or malformed line; nothing is returned for
/// the lines processed before it.
pub fn analyze_reader<R: BufRead>(reader: R) -> Result<TraceSummary, TraceError> {
    analyze_lines(TraceLoader::new(reader))
}

/// Analyze a trace file without printing anything.
pub fn analyze_trace(path: &Path) -> Result<TraceSummary, TraceError> {
    let loader = TraceLoader::open(path).map_err(|e| TraceError::FileReadError(format!("{}: {}", path.display(), e)))?;
    analyze_lines(loader)
}

fn analyze_lines<R: BufRead>(mut loader: TraceLoader<R>) -> Result<TraceSummary, TraceError> {
    let mut analyzer = TraceAnalyzer::new();

    while let Some((line_number, line)) = loader.next_line().map_err(|e| TraceError::FileReadError(e.to_string()))? {
        let record = parse_trace_line(line).map_err(|message| TraceError::ParseError {
            line: line_number,
            message,
        })?;
        if let Some(record) = record {
            analyzer.record(&record);
        }
    }

    log::debug!("Processed {} trace lines", loader.lines_read());
    Ok(analyzer.finish())
}

/// Analyze a trace file, print the summary to stdout, and return the latencies
/// in the order their receive events appear in the file.
pub fn process_trace(path: &Path) -> Result<Vec<f64>, TraceError> {
    log::info!("Processing trace {}", path.display());

    let summary = analyze_trace(path)?;
    println!("{}", summary);

    log::info!("Trace processed: {} latencies collected", summary.latencies.len());
    Ok(summary.latencies)
}
