//! Interactive query shell
//!
//! A blocking read-evaluate-print loop over any `BufRead` / `Write` pair.
//! Each line is parsed, evaluated against the sealed index and answered in
//! full before the next line is read.

use crate::query::{parse_command, Command, QueryExecutor};
use std::io::{self, BufRead, Write};

const PROMPT: &str = "> ";
const GOODBYE: &str = "Exiting tool..";

/// What the shell does after one line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Nothing to print (blank line)
    Silent,
    /// Print a response and keep going
    Reply(String),
    /// Stop the loop
    Exit,
}

pub struct Shell<'a> {
    executor: QueryExecutor<'a>,
}

impl<'a> Shell<'a> {
    pub fn new(executor: QueryExecutor<'a>) -> Self {
        Self { executor }
    }

    /// Evaluate one line of input
    pub fn handle(&self, line: &str) -> Step {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(e) => return Step::Reply(e.to_string()),
        };

        match command {
            Command::Empty => Step::Silent,
            Command::Exit => Step::Exit,
            Command::Query(query) => match self.executor.execute(&query) {
                Ok(output) => Step::Reply(output.to_string()),
                Err(e) => Step::Reply(e.to_string()),
            },
        }
    }

    /// Run until EXIT or end of input
    ///
    /// Input bytes that are not UTF-8 are replaced, so a garbled line is
    /// answered like any other unknown command.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, output: &mut W) -> io::Result<()> {
        let mut buf = Vec::new();

        loop {
            write!(output, "{}", PROMPT)?;
            output.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                writeln!(output)?;
                return Ok(());
            }

            let line = String::from_utf8_lossy(&buf);
            match self.handle(&line) {
                Step::Silent => {}
                Step::Reply(text) => writeln!(output, "{}", text)?,
                Step::Exit => {
                    writeln!(output, "{}", GOODBYE)?;
                    return Ok(());
                }
            }
        }
    }
}
