//! Parse individual trace lines into `TraceRecord`s.
//!
//! Lines follow the ns-2 trace layout, whitespace separated:
//!
//! ```text
//! <event> <time> <from> <to> <type> <size> <flags> <fid> <src> <dst> <seq> <pkt id>
//! + 1.0 1 2 udp 1024 ------- 1 1.0 2.0 0 0
//! r 1.0126 1 2 udp 1024 ------- 1 1.0 2.0 0 0
//! ```
//!
//! Only the first two fields and the last one are interpreted. Anything in
//! between is tolerated and ignored.

use super::types::{TraceEvent, TraceRecord};

/// Parse one trace line.
///
/// # Returns
///
/// * `Ok(None)` for lines with fewer than two fields (blank lines included)
/// * `Ok(Some(record))` otherwise
/// * `Err(message)` if the time field is not a number
pub fn parse_trace_line(line: &str) -> Result<Option<TraceRecord>, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 2 {
        return Ok(None);
    }

    let time = parse_time(fields[1])?;

    // fields is non-empty here
    let packet_id = fields[fields.len() - 1].to_string();

    Ok(Some(TraceRecord {
        event: TraceEvent::from_code(fields[0]),
        time,
        packet_id,
    }))
}

/// Parse the time field as a float.
///
/// Digit-grouping underscores (`1_000.5`) are accepted when each one sits
/// between two digits.
fn parse_time(field: &str) -> Result<f64, String> {
    let invalid = |reason: String| format!("time field '{}' is not a number: {}", field, reason);

    if !field.contains('_') {
        return field.parse().map_err(|e: std::num::ParseFloatError| invalid(e.to_string()));
    }

    let bytes = field.as_bytes();
    let well_placed = bytes.iter().enumerate().all(|(i, &b)| {
        b != b'_' || (i > 0 && i + 1 < bytes.len() && bytes[i - 1].is_ascii_digit() && bytes[i + 1].is_ascii_digit())
    });
    if !well_placed {
        return Err(invalid("misplaced '_'".to_string()));
    }

    field
        .replace('_', "")
        .parse()
        .map_err(|e: std::num::ParseFloatError| invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_send_line() {
        let line = "+ 1.0 1 2 udp 1024 ------- 1 1.0 2.0 0 17";
        let record = parse_trace_line(line).unwrap().unwrap();
        assert_eq!(record.event, TraceEvent::Send);
        assert_eq!(record.time, 1.0);
        assert_eq!(record.packet_id, "17");
    }

    #[test]
    fn test_parse_receive_with_tabs() {
        let line = "r\t2.5\tnode1\tnode2\tpkt-A";
        let record = parse_trace_line(line).unwrap().unwrap();
        assert_eq!(record.event, TraceEvent::Receive);
        assert_eq!(record.time, 2.5);
        assert_eq!(record.packet_id, "pkt-A");
    }

    #[test]
    fn test_two_field_line_uses_time_as_id() {
        let record = parse_trace_line("d 3.25").unwrap().unwrap();
        assert_eq!(record.event, TraceEvent::Drop);
        assert_eq!(record.packet_id, "3.25");
    }

    #[test]
    fn test_short_lines_are_skipped() {
        assert!(parse_trace_line("").unwrap().is_none());
        assert!(parse_trace_line("   ").unwrap().is_none());
        assert!(parse_trace_line("+").unwrap().is_none());
    }

    #[test]
    fn test_unknown_event_code_is_kept() {
        let record = parse_trace_line("- 0.5 1 2 A").unwrap().unwrap();
        assert_eq!(record.event, TraceEvent::Other("-".to_string()));
    }

    #[test]
    fn test_non_numeric_time_is_error() {
        let err = parse_trace_line("+ abc 1 2 A").unwrap_err();
        assert!(err.contains("abc"));
    }

    #[test]
    fn test_time_accepts_digit_grouping() {
        let record = parse_trace_line("+ 1_0.2_5 A").unwrap().unwrap();
        assert_eq!(record.time, 10.25);
        let record = parse_trace_line("r 1_000e-3 A").unwrap().unwrap();
        assert_eq!(record.time, 1.0);
    }

    #[test]
    fn test_time_rejects_misplaced_underscores() {
        assert!(parse_trace_line("+ _1.0 A").is_err());
        assert!(parse_trace_line("+ 1_.0 A").is_err());
        assert!(parse_trace_line("+ 1__0 A").is_err());
        assert!(parse_trace_line("+ 1.0_ A").is_err());
    }

    #[test]
    fn test_time_is_validated_for_ignored_events() {
        assert!(parse_trace_line("h x.y 1 2 A").is_err());
    }
}
