use std::io::{BufRead, BufReader, Read};

use crate::error::{MeshError, Result};

/// Line-oriented consumer over the mesh-exchange byte stream.
///
/// Reads one logical line at a time and trims trailing whitespace; never
/// looks ahead past the line currently being read. The stream is consumed
/// strictly forward — nothing here ever seeks.
pub(crate) struct SectionReader<R> {
    lines: std::io::Lines<BufReader<R>>,
}

impl<R: Read> SectionReader<R> {
    pub(crate) fn new(reader: R) -> Self {
        SectionReader {
            lines: BufReader::new(reader).lines(),
        }
    }

    /// The next line, trimmed of trailing whitespace, or `None` at EOF.
    pub(crate) fn next_line(&mut self) -> Result<Option<String>> {
        match self.lines.next() {
            Some(line) => Ok(Some(line?.trim_end().to_string())),
            None => Ok(None),
        }
    }

    /// A line that must be present; EOF here is an unexpected-end-of-input
    /// I/O error rather than a clean `None`.
    pub(crate) fn require_line(&mut self, context: &str) -> Result<String> {
        self.next_line()?.ok_or_else(|| {
            MeshError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("{context}: unexpected end of input"),
            ))
        })
    }

    /// A required line, split into whitespace-separated tokens.
    pub(crate) fn require_tokens(&mut self, context: &str) -> Result<Vec<String>> {
        let line = self.require_line(context)?;
        Ok(line.split_whitespace().map(str::to_string).collect())
    }

    /// Reads and checks the mandatory `$End<name>` marker.
    pub(crate) fn expect_end(&mut self, name: &str) -> Result<()> {
        let expected = format!("$End{name}");
        let line = self.require_line(&expected)?;
        if line != expected {
            return Err(MeshError::MalformedMesh(format!(
                "expected `{expected}`, found `{line}`"
            )));
        }
        Ok(())
    }
}

/// Fetches token `i`, producing a contextual error if it's absent.
pub(crate) fn token<'a>(tokens: &'a [String], i: usize, context: &str) -> Result<&'a str> {
    tokens
        .get(i)
        .map(String::as_str)
        .ok_or_else(|| MeshError::MalformedMesh(format!("{context}: missing token at position {i}")))
}

pub(crate) fn parse_i64(value: &str, context: &str) -> Result<i64> {
    value
        .parse::<i64>()
        .map_err(|_| MeshError::MalformedMesh(format!("{context}: expected integer, found `{value}`")))
}

pub(crate) fn parse_f64(value: &str, context: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .map_err(|_| MeshError::MalformedMesh(format!("{context}: expected number, found `{value}`")))
}
