//! Subcommand handlers

pub mod member;
pub mod session;

use std::io::{BufRead, Write};

/// Ask a yes/no question on stdout and read the answer from stdin
///
/// Only `y` (any case, surrounding whitespace ignored) counts as yes; end of
/// input counts as no.
pub(crate) fn confirm(prompt: &str) -> std::io::Result<bool> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    confirm_with(prompt, &mut stdin.lock(), &mut stdout)
}

fn confirm_with(prompt: &str, input: &mut impl BufRead, output: &mut impl Write) -> std::io::Result<bool> {
    write!(output, "{} (y/n): ", prompt)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}
