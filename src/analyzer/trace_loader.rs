//! Buffered, line-at-a-time access to a trace source.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Buffer size for reading trace files (8KB).
const BUFFER_SIZE: usize = 8 * 1024;

/// Sequential reader over a trace.
///
/// `\n`, `\r\n` and a lone `\r` all end a line. The loader owns its source;
/// a file handle is closed when the loader is dropped, whether reading
/// finished or failed.
pub struct TraceLoader<R> {
    reader: R,
    line_number: usize,
    line_buffer: String,
    /// Lines split off a `\r`-separated chunk, not handed out yet.
    pending: VecDeque<String>,
    current: String,
}

impl TraceLoader<BufReader<File>> {
    /// Open a trace file.
    ///
    /// # Returns
    ///
    /// `Ok(TraceLoader)` if the file opens successfully, `Err` otherwise.
    pub fn open(path: &Path) -> Result<Self, io::Error> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::with_capacity(BUFFER_SIZE, file)))
    }
}

impl<R: BufRead> TraceLoader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            line_buffer: String::with_capacity(256),
            pending: VecDeque::new(),
            current: String::new(),
        }
    }

    /// Read the next line.
    ///
    /// # Returns
    ///
    /// * `Ok(Some((line_number, line)))` with a 1-based line number
    /// * `Ok(None)` at EOF
    /// * `Err` on any read failure, including invalid UTF-8
    pub fn next_line(&mut self) -> Result<Option<(usize, &str)>, io::Error> {
        if self.pending.is_empty() {
            self.line_buffer.clear();
            if self.reader.read_line(&mut self.line_buffer)? == 0 {
                return Ok(None);
            }

            let chunk = self.line_buffer.as_str();
            let chunk = chunk.strip_suffix('\n').unwrap_or(chunk);
            let chunk = chunk.strip_suffix('\r').unwrap_or(chunk);
            self.pending.extend(chunk.split('\r').map(str::to_string));
        }

        // split() always yields at least one piece
        self.current = self.pending.pop_front().unwrap_or_default();
        self.line_number += 1;
        Ok(Some((self.line_number, self.current.trim_end())))
    }

    /// Number of lines handed out so far.
    pub fn lines_read(&self) -> usize {
        self.line_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn loader_numbers_lines_including_blank_ones() {
        let mut loader = TraceLoader::new(Cursor::new("+ 1.0 A\n\nr 2.0 A\r\n"));

        assert_eq!(loader.next_line().unwrap(), Some((1, "+ 1.0 A")));
        assert_eq!(loader.next_line().unwrap(), Some((2, "")));
        assert_eq!(loader.next_line().unwrap(), Some((3, "r 2.0 A")));
        assert_eq!(loader.next_line().unwrap(), None);
        assert_eq!(loader.lines_read(), 3);
    }

    #[test]
    fn loader_handles_missing_trailing_newline() {
        let mut loader = TraceLoader::new(Cursor::new("d 0.1 X"));
        assert_eq!(loader.next_line().unwrap(), Some((1, "d 0.1 X")));
        assert_eq!(loader.next_line().unwrap(), None);
    }

    #[test]
    fn loader_splits_on_lone_carriage_return() {
        let mut loader = TraceLoader::new(Cursor::new("+ 1.0 A\r+ 2.0 B\rr 2.5 B"));

        assert_eq!(loader.next_line().unwrap(), Some((1, "+ 1.0 A")));
        assert_eq!(loader.next_line().unwrap(), Some((2, "+ 2.0 B")));
        assert_eq!(loader.next_line().unwrap(), Some((3, "r 2.5 B")));
        assert_eq!(loader.next_line().unwrap(), None);
    }

    #[test]
    fn loader_mixes_line_endings() {
        let mut loader = TraceLoader::new(Cursor::new("a\r\r\nb\rc\n"));

        assert_eq!(loader.next_line().unwrap(), Some((1, "a")));
        assert_eq!(loader.next_line().unwrap(), Some((2, "")));
        assert_eq!(loader.next_line().unwrap(), Some((3, "b")));
        assert_eq!(loader.next_line().unwrap(), Some((4, "c")));
        assert_eq!(loader.next_line().unwrap(), None);
    }

    #[test]
    fn loader_reports_invalid_utf8() {
        let mut loader = TraceLoader::new(Cursor::new(vec![b'+', b' ', 0xff, b'\n']));
        assert!(loader.next_line().is_err());
    }

    #[test]
    fn open_missing_file_fails() {
        let path = std::env::temp_dir().join("cran-trace-analyzer-does-not-exist.tr");
        assert!(TraceLoader::open(&path).is_err());
    }
}
