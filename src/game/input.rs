//! Line-oriented input sources for interactive play
//!
//! The interactive controller never touches stdin directly; it goes through
//! a [`LineReader`] so tests can drive the exact same code path with a
//! scripted queue of lines. Prompt feedback flows through the match logger
//! like every other line of output.

use crate::game::GameLogger;
use std::collections::VecDeque;
use std::io::{self, Write};

/// A blocking source of input lines
pub trait LineReader {
    /// Show `prompt` (no trailing newline) and block for one line
    ///
    /// The returned line is trimmed. An exhausted source reports an
    /// `UnexpectedEof` error rather than blocking forever.
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;
}

/// Reads from process stdin, prompting on stdout
#[derive(Debug, Default)]
pub struct StdinReader;

impl StdinReader {
    pub fn new() -> Self {
        StdinReader
    }
}

impl LineReader for StdinReader {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        print!("{}", prompt);
        io::stdout().flush()?;

        let mut input = String::new();
        let bytes = io::stdin().read_line(&mut input)?;
        if bytes == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stdin closed",
            ));
        }
        Ok(input.trim().to_string())
    }
}

/// Pops queued lines, for driving the interactive path in tests
#[derive(Debug, Default)]
pub struct ScriptedReader {
    lines: VecDeque<String>,
}

impl ScriptedReader {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedReader {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.lines.is_empty()
    }
}

impl LineReader for ScriptedReader {
    fn read_line(&mut self, _prompt: &str) -> io::Result<String> {
        self.lines.pop_front().map(|l| l.trim().to_string()).ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "scripted input exhausted")
        })
    }
}

/// Read an integer in `[min, max]`, re-prompting until one arrives
///
/// Malformed or out-of-range lines produce a feedback line through the
/// logger and another prompt; only a real I/O failure escapes.
pub fn read_int_in_range(
    reader: &mut dyn LineReader,
    logger: &GameLogger,
    prompt: &str,
    min: u32,
    max: u32,
) -> io::Result<u32> {
    loop {
        let line = reader.read_line(prompt)?;
        match line.parse::<i64>() {
            Ok(v) if v >= min as i64 && v <= max as i64 => return Ok(v as u32),
            Ok(_) => logger.normal(&format!("Enter a number in [{}..{}].", min, max)),
            Err(_) => logger.normal("Not a number."),
        }
    }
}
