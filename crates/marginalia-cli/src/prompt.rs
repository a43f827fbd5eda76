//! Interactive confirmation prompt

use std::io::{self, Write};

use anyhow::Result;

/// Ask a yes/no question on stdin; anything but "y"/"yes" is no
pub fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes"
    ))
}
