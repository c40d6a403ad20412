//! Ordered metric label → value mapping produced by a finished run.

use std::fmt;
use std::io::{self, Write};

use serde::{Serialize, Serializer};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BenchResult {
    entries: Vec<(String, i64)>,
}

impl BenchResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `label`, or overwrite its value in place if it is already present.
    pub fn put(&mut self, label: impl Into<String>, value: i64) {
        let label = label.into();
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((label, value)),
        }
    }

    pub fn get(&self, label: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), *v))
    }

    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (label, value) in self.iter() {
            writeln!(out, "{label}: {value}")?;
        }
        Ok(())
    }

    pub fn print(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.render(&mut lock)
    }
}

impl fmt::Display for BenchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in self.iter() {
            writeln!(f, "{label}: {value}")?;
        }
        Ok(())
    }
}

impl Serialize for BenchResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Clamp a nanosecond count into the signed range used by result values.
pub fn to_metric(ns: u64) -> i64 {
    i64::try_from(ns).unwrap_or(i64::MAX)
}
