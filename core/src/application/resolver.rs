//! Resolving a namespace lookup to a single location.

use std::io::{BufRead, Write};

use crossterm::style::Stylize;

use crate::domain::NamespaceLocation;
use crate::error::{Error, Result};
use crate::ports::LocationChooser;

/// Outcome of looking at the candidate list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No candidate; the inventory may be stale.
    NotFound,
    /// Exactly one candidate.
    Resolved(NamespaceLocation),
    /// More than one candidate; the operator has to pick.
    Ambiguous(Vec<NamespaceLocation>),
}

/// Classify a candidate list.
pub fn resolve(mut candidates: Vec<NamespaceLocation>) -> Resolution {
    match candidates.len() {
        0 => Resolution::NotFound,
        1 => Resolution::Resolved(candidates.remove(0)),
        _ => Resolution::Ambiguous(candidates),
    }
}

/// Parse a zero-based choice out of one line of input.
pub fn parse_choice(line: &str, count: usize) -> Result<usize> {
    let trimmed = line.trim();
    let index: usize = trimmed
        .parse()
        .map_err(|_| Error::InvalidChoice(format!("'{}' is not an option number", trimmed)))?;

    if index >= count {
        return Err(Error::InvalidChoice(format!(
            "{} is out of range (0-{})",
            index,
            count.saturating_sub(1)
        )));
    }
    Ok(index)
}

/// Interactive chooser: prints an indexed table and reads the operator's pick.
///
/// Bad input re-prompts until `max_attempts` answers were given.
pub struct Disambiguator<R, W> {
    input: R,
    output: W,
    max_attempts: u32,
    color: bool,
}

impl Disambiguator<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Disambiguator reading stdin and writing stdout.
    pub fn stdio(max_attempts: u32, color: bool) -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout(), max_attempts).with_color(color)
    }
}

impl<R: BufRead, W: Write> Disambiguator<R, W> {
    pub fn new(input: R, output: W, max_attempts: u32) -> Self {
        Self {
            input,
            output,
            max_attempts: max_attempts.max(1),
            color: false,
        }
    }

    /// Enable/disable ANSI colours.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Consume the disambiguator, returning its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    fn render(&mut self, candidates: &[NamespaceLocation]) -> Result<()> {
        let header = "This namespace exists in multiple locations:";
        if self.color {
            writeln!(self.output, "{}", header.green())?;
        } else {
            writeln!(self.output, "{}", header)?;
        }

        for (i, location) in candidates.iter().enumerate() {
            let row = format!(
                "{:<2}\tcluster: {:<25}\tproject: {:<25}\tlocation: {}",
                i, location.cluster, location.project_id, location.location
            );
            // Odd rows in cyan.
            if self.color && i % 2 == 1 {
                writeln!(self.output, "{}", row.cyan())?;
            } else {
                writeln!(self.output, "{}", row)?;
            }
        }
        Ok(())
    }

    fn prompt(&mut self) -> Result<()> {
        let prompt = "where do you want to connect (pick option number):";
        if self.color {
            write!(self.output, "{} ", prompt.green())?;
        } else {
            write!(self.output, "{} ", prompt)?;
        }
        self.output.flush()?;
        Ok(())
    }
}

impl<R: BufRead, W: Write> LocationChooser for Disambiguator<R, W> {
    fn choose(&mut self, candidates: &[NamespaceLocation]) -> Result<NamespaceLocation> {
        if candidates.is_empty() {
            return Err(Error::NoSelection);
        }

        self.render(candidates)?;

        let mut attempt = 1;
        loop {
            self.prompt()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(Error::NoSelection);
            }

            match parse_choice(&line, candidates.len()) {
                Ok(index) => return Ok(candidates[index].clone()),
                Err(e) if attempt < self.max_attempts => {
                    tracing::debug!(attempt, error = %e, "rejected location choice");
                    writeln!(self.output, "{}, try again", e)?;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
