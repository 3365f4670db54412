//! Validated console input.
//!
//! Prompts re-ask until the operator enters a value that parses and lies in
//! the inclusive range; there is no attempt limit. Every function returns
//! `Ok(None)` when input ends, so callers can wind down cleanly on a closed
//! stdin instead of spinning.

use std::io::{self, BufRead, Write};
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Numbers the prompts know how to ask for.
pub trait PromptNumber: FromStr + PartialOrd + Copy {
    /// Message printed when the input does not parse.
    const INVALID: &'static str;

    /// Bound formatting used in range messages.
    fn show(self) -> String;
}

impl PromptNumber for i32 {
    const INVALID: &'static str = "Invalid input. Please enter an integer.";

    fn show(self) -> String {
        self.to_string()
    }
}

impl PromptNumber for f32 {
    const INVALID: &'static str = "Invalid input. Please enter a number.";

    fn show(self) -> String {
        format!("{self:?}")
    }
}

/// Read one line, without its line terminator. `None` at end of input.
pub fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}

/// Print `prompt` (no newline) and read the reply.
pub fn ask(
    input: &mut impl BufRead,
    output: &mut impl Write,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(output, "{prompt}")?;
    output.flush()?;
    read_line(input)
}

/// Ask for a number in `range`, re-prompting until one is given.
pub fn ask_number<T: PromptNumber>(
    input: &mut impl BufRead,
    output: &mut impl Write,
    prompt: &str,
    range: RangeInclusive<T>,
) -> io::Result<Option<T>> {
    loop {
        let Some(reply) = ask(input, output, prompt)? else {
            return Ok(None);
        };
        match reply.trim().parse::<T>() {
            Ok(value) if range.contains(&value) => return Ok(Some(value)),
            Ok(_) => writeln!(
                output,
                "Please enter a value between {} and {}.",
                range.start().show(),
                range.end().show()
            )?,
            Err(_) => writeln!(output, "{}", T::INVALID)?,
        }
    }
}
