// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Interactive source-folder prompt. Generic over the reader and writer so the
// loop can be driven from tests.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Ask for the folder to process until an existing path is given.
///
/// Returns `None` when the user declines to retry or input ends.
pub fn prompt_for_source<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<PathBuf>> {
    loop {
        write!(output, "\nPaste the path of the folder with the documents: ")?;
        output.flush()?;

        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        let path = strip_quotes(&line);

        if path.is_empty() {
            writeln!(output, "Empty path!")?;
            continue;
        }

        let path = PathBuf::from(path);
        if path.is_dir() {
            return Ok(Some(path));
        }

        writeln!(output, "The path '{}' does not exist!", path.display())?;
        write!(output, "Try again? (y/n): ")?;
        output.flush()?;
        match read_line(input)? {
            Some(answer) if wants_retry(&answer) => continue,
            _ => return Ok(None),
        }
    }
}

/// Block until the user presses Enter.
pub fn wait_for_enter<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<()> {
    write!(output, "\nPress Enter to close...")?;
    output.flush()?;
    read_line(input)?;
    Ok(())
}

/// One line without its terminator, or `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Paths dragged into a terminal often arrive quoted.
fn strip_quotes(raw: &str) -> &str {
    raw.trim().trim_matches(|c| c == '"' || c == '\'').trim()
}

/// Accepts the Italian `s` as well as `y`.
fn wants_retry(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "s" | "si" | "sì")
}
