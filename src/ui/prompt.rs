//! Interactive answers for parameter requests
//!
//! Generic over reader and writer so the prompt loop can be driven from
//! stdin in the REPL and from byte buffers in tests.

use crate::command::{ParamKind, ParamRequest, SuppliedParams};
use std::io::{self, BufRead, Write};

/// Ask for each request until it gets an acceptable answer
///
/// Choices may be answered by name or by 1-based number; an exact name wins
/// over a number. An empty answer to a flag takes its default. Returns
/// Ok(false) if input ended first.
pub fn collect_answers<R: BufRead, W: Write>(
    requests: &[ParamRequest],
    input: &mut R,
    out: &mut W,
    supplied: &mut SuppliedParams,
) -> io::Result<bool> {
    for request in requests {
        loop {
            write_prompt(request, out)?;
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(false);
            }
            let raw = line.trim_end_matches(['\r', '\n']);

            match resolve(request, raw) {
                Some(value) => {
                    supplied.set(request.key, value);
                    break;
                }
                None => writeln!(out, "  '{}' is not a valid answer, try again.", raw)?,
            }
        }
    }
    Ok(true)
}

fn write_prompt<W: Write>(request: &ParamRequest, out: &mut W) -> io::Result<()> {
    if let Some(choices) = request.choices() {
        writeln!(out, "{}:", request.prompt)?;
        for (i, choice) in choices.iter().enumerate() {
            writeln!(out, "  {}) {}", i + 1, choice)?;
        }
        write!(out, "> ")?;
    } else if let ParamKind::Flag { default } = request.kind {
        write!(out, "{} [{}] ", request.prompt, if default { "Y/n" } else { "y/N" })?;
    } else {
        write!(out, "{}: ", request.prompt)?;
    }
    out.flush()
}

fn resolve(request: &ParamRequest, raw: &str) -> Option<String> {
    match &request.kind {
        ParamKind::Flag { default } if raw.trim().is_empty() => Some(default.to_string()),
        ParamKind::Column { choices } | ParamKind::Operator { choices } => {
            request.accept(raw).or_else(|| {
                raw.trim()
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| choices.get(i))
                    .cloned()
            })
        }
        _ => request.accept(raw),
    }
}
