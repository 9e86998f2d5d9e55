use std::error::Error;
use std::fmt;

/// Tracing target every narrated step is mirrored to.
pub const STEP_TARGET: &str = "algolab::steps";

/// Ordered explanation log produced by a single engine call.
///
/// The log is append-only while the call runs and is handed back to the
/// caller by value afterwards, so engines keep no narration state between
/// calls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepLog {
    steps: Vec<String>,
    rejection: Option<String>,
}

impl StepLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one explanation line.
    pub fn push(&mut self, step: impl Into<String>) {
        let step = step.into();
        tracing::trace!(target: STEP_TARGET, "{step}");
        self.steps.push(step);
    }

    pub fn extend<I, S>(&mut self, steps: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for step in steps {
            self.push(step);
        }
    }

    /// Moves every step of `other` to the end of this log.
    ///
    /// A rejection recorded in `other` carries over.
    pub fn append(&mut self, other: StepLog) {
        self.steps.extend(other.steps);
        if other.rejection.is_some() {
            self.rejection = other.rejection;
        }
    }

    /// Records why the call left the structure unchanged.
    ///
    /// The reason's `Display` text becomes the final narrated step.
    pub fn reject<E: Error>(&mut self, reason: E) {
        let text = reason.to_string();
        tracing::debug!(target: STEP_TARGET, rejection = %text, "call rejected");
        self.steps.push(text.clone());
        self.rejection = Some(text);
    }

    pub fn is_rejected(&self) -> bool {
        self.rejection.is_some()
    }

    pub fn rejection(&self) -> Option<&str> {
        self.rejection.as_deref()
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.steps.last().map(String::as_str)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.steps.iter()
    }

    /// True when any step contains `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.steps.iter().any(|s| s.contains(needle))
    }

    pub fn into_steps(self) -> Vec<String> {
        self.steps
    }
}

impl fmt::Display for StepLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(step)?;
        }
        Ok(())
    }
}

impl IntoIterator for StepLog {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

impl<'a> IntoIterator for &'a StepLog {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl From<StepLog> for Vec<String> {
    fn from(log: StepLog) -> Self {
        log.steps
    }
}
