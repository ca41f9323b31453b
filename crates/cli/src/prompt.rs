//! Overwrite confirmation.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const QUESTION: &str = "Proceed anyway and overwrite the files? [Y/n] ";

/// List `existing` on `output` and ask before they are overwritten.
/// An empty answer counts as yes.
pub fn confirm_overwrite<R: BufRead, W: Write>(
    existing: &[PathBuf],
    mut input: R,
    mut output: W,
) -> io::Result<bool> {
    writeln!(output, "Tests already exist for this class:")?;
    for path in existing {
        writeln!(output, "  {}", path.display())?;
    }
    write!(output, "{QUESTION}")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "" | "y" | "yes")
}
