//! I/O boundary traits for testability
//!
//! The explorer talks to the player only through [`Console`], so sessions can
//! be driven from scripted input in tests.

use std::io::{self, BufRead, Write};

/// Line-oriented player console.
pub trait Console {
    /// Write one line of output.
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Write a prompt and leave the cursor on the same line.
    fn prompt(&mut self, msg: &str) -> io::Result<()>;

    /// Read the next line of input, `None` once input is exhausted.
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

/// Console over any buffered reader and writer.
pub struct TerminalConsole<R, W> {
    input: R,
    output: W,
}

impl TerminalConsole<io::StdinLock<'static>, io::Stdout> {
    /// Console bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the writer, e.g. to inspect captured output.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Console for TerminalConsole<R, W> {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{}", line)
    }

    fn prompt(&mut self, msg: &str) -> io::Result<()> {
        write!(self.output, "{} ", msg)?;
        self.output.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        // Undecodable bytes become U+FFFD and fail to parse as a command
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }
}
