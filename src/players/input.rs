//! Sources of raw move entries for human participants.
//!
//! A `MoveInput` only moves text around. Parsing, validation, help and
//! AI assistance are handled by the participant.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::error::{Error, Result};

/// Line-oriented channel to a human.
pub trait MoveInput {
    /// Show `prompt` and read one entry; `Ok(None)` once input is closed.
    fn request(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Show an informational message.
    fn notify(&mut self, message: &str) -> Result<()>;
}

/// Anything a `ConsoleInput` can pull lines from.
pub trait LineReader {
    /// Append one line to `buf`; `Ok(0)` at end of input.
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize>;
}

impl<R: BufRead> LineReader for R {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

/// Process stdin, locked for one line at a time.
///
/// Several consoles (one per human, plus the play-again prompt) can share
/// stdin this way; none of them holds the lock between reads.
#[derive(Clone, Copy, Debug, Default)]
pub struct SharedStdin;

impl LineReader for SharedStdin {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        // `Stdin::read_line` takes and releases the lock itself.
        io::stdin().read_line(buf)
    }
}

/// `MoveInput` over a line reader and a writer.
pub struct ConsoleInput<R, W> {
    reader: R,
    writer: W,
}

impl ConsoleInput<SharedStdin, io::Stdout> {
    /// Console bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(SharedStdin, io::stdout())
    }
}

impl<R: LineReader, W: Write> ConsoleInput<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Release the underlying reader and writer.
    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl<R: LineReader, W: Write> MoveInput for ConsoleInput<R, W> {
    fn request(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.writer, "{prompt}").map_err(|e| Error::io("write prompt", e))?;
        self.writer
            .flush()
            .map_err(|e| Error::io("flush prompt", e))?;

        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .map_err(|e| Error::io("read move", e))?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn notify(&mut self, message: &str) -> Result<()> {
        writeln!(self.writer, "{message}").map_err(|e| Error::io("write message", e))
    }
}

/// Pre-recorded entries, for tests and scripted play.
///
/// Everything shown to the "human" is kept in `transcript`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    entries: VecDeque<String>,
    pub transcript: Vec<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// Entries not consumed yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.entries.len()
    }
}

impl MoveInput for ScriptedInput {
    fn request(&mut self, prompt: &str) -> Result<Option<String>> {
        self.transcript.push(prompt.to_string());
        Ok(self.entries.pop_front())
    }

    fn notify(&mut self, message: &str) -> Result<()> {
        self.transcript.push(message.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_console_reads_lines() {
        let mut console = ConsoleInput::new(Cursor::new("4\r\n\n"), Vec::new());
        assert_eq!(console.request("> ").unwrap(), Some("4".to_string()));
        assert_eq!(console.request("> ").unwrap(), Some(String::new()));
        assert_eq!(console.request("> ").unwrap(), None);
        console.notify("done").unwrap();

        let (_, out) = console.into_inner();
        assert_eq!(String::from_utf8(out).unwrap(), "> > > done\n");
    }

    #[test]
    fn test_scripted_input_records_transcript() {
        let mut input = ScriptedInput::new(["1", "2"]);
        assert_eq!(input.request("first").unwrap().as_deref(), Some("1"));
        input.notify("note").unwrap();
        assert_eq!(input.remaining(), 1);
        assert_eq!(input.transcript, vec!["first", "note"]);
    }

    #[test]
    fn test_stdio_consoles_do_not_hold_stdin() {
        let _first = ConsoleInput::stdio();
        let _second = ConsoleInput::stdio();
        // Would block forever if either console kept stdin locked.
        let guard = io::stdin().lock();
        drop(guard);
        let _third = ConsoleInput::stdio();
        drop(io::stdin().lock());
    }
}
