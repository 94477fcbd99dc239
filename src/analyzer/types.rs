//! Type definitions specific to the analyzer module.

use std::fmt;

/// Event code of a trace line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    /// `+` - packet enqueued for sending.
    Send,
    /// `r` - packet received.
    Receive,
    /// `d` - packet dropped.
    Drop,
    /// Any other code (`-`, etc.), carried along but not interpreted.
    Other(String),
}

impl TraceEvent {
    pub fn from_code(code: &str) -> Self {
        match code {
            "+" => TraceEvent::Send,
            "r" => TraceEvent::Receive,
            "d" => TraceEvent::Drop,
            other => TraceEvent::Other(other.to_string()),
        }
    }
}

/// One parsed trace line.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceRecord {
    pub event: TraceEvent,
    /// Event time in seconds.
    pub time: f64,
    /// Last field of the line, used as an opaque key.
    pub packet_id: String,
}

/// Delivery statistics collected over a whole trace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraceSummary {
    pub sent_packets: u64,
    pub received_packets: u64,
    pub lost_packets: u64,
    /// Latency of every matched receive, in file order.
    pub latencies: Vec<f64>,
}

impl TraceSummary {
    /// Mean latency in seconds, 0 when nothing was matched.
    pub fn average_latency(&self) -> f64 {
        if self.latencies.is_empty() {
            0.0
        } else {
            self.latencies.iter().sum::<f64>() / self.latencies.len() as f64
        }
    }

    /// Received over sent, as a percentage. 0 when nothing was sent.
    pub fn delivery_rate(&self) -> f64 {
        if self.sent_packets == 0 {
            0.0
        } else {
            (self.received_packets as f64 / self.sent_packets as f64) * 100.0
        }
    }
}

impl fmt::Display for TraceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Paquetes enviados: {}", self.sent_packets)?;
        writeln!(f, "Paquetes recibidos: {}", self.received_packets)?;
        writeln!(f, "Paquetes perdidos: {}", self.lost_packets)?;
        writeln!(f, "Latencia promedio: {:.4} s", self.average_latency())?;
        write!(f, "Tasa de entrega: {:.2}%", self.delivery_rate())
    }
}

/// Errors that abort trace processing.
#[derive(Debug)]
pub enum TraceError {
    FileReadError(String),
    ParseError { line: usize, message: String },
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceError::FileReadError(msg) => write!(f, "Failed to read trace: {}", msg),
            TraceError::ParseError { line, message } => write!(f, "Invalid trace line {}: {}", line, message),
        }
    }
}

impl std::error::Error for TraceError {}
