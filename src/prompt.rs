//! Operator confirmation.
//!
//! Asks a yes/no question on the terminal, re-prompting on anything that is
//! not an accepted answer. In auto mode the preset answer is `yes` and the
//! question is only echoed at debug level; there is no way to cancel.

use crate::output::OutputFormatter;
use colored::*;
use std::io::{self, BufRead, Write};

/// The operator's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Yes,
    No,
}

/// Obtains a yes/no decision, either interactively or pre-answered.
pub fn confirm(question: &str, auto: bool, out: &OutputFormatter) -> io::Result<Decision> {
    if auto {
        out.debug(&format!("{question} yes"));
        return Ok(Decision::Yes);
    }
    let stdin = io::stdin();
    let mut input = stdin.lock();
    ask(&mut input, question)
}

fn ask(input: &mut impl BufRead, question: &str) -> io::Result<Decision> {
    loop {
        print!("{} ", question.yellow().bold());
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "no answer on standard input",
            ));
        }

        match line.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(Decision::Yes),
            "n" | "no" => return Ok(Decision::No),
            _ => println!("Invalid input, please try again"),
        }
    }
}
