use crate::StepLog;

/// Step-by-step cursor over a finished trace.
///
/// Works for plain explanation strings as well as structured step records.
/// Moving past either end leaves the cursor where it is.
#[derive(Clone, Debug)]
pub struct Replay<T> {
    steps: Vec<T>,
    index: usize,
}

impl<T> Replay<T> {
    pub fn new(steps: Vec<T>) -> Self {
        Self { steps, index: 0 }
    }

    pub fn current(&self) -> Option<&T> {
        self.steps.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[T] {
        &self.steps
    }

    pub fn is_at_end(&self) -> bool {
        self.steps.is_empty() || self.index + 1 == self.steps.len()
    }

    /// Advances one step and returns the new current step.
    pub fn next_step(&mut self) -> Option<&T> {
        if self.index + 1 < self.steps.len() {
            self.index += 1;
        }
        self.current()
    }

    pub fn previous_step(&mut self) -> Option<&T> {
        self.index = self.index.saturating_sub(1);
        self.current()
    }

    /// Jumps to `index`; out-of-range targets are ignored.
    pub fn go_to_step(&mut self, index: usize) -> Option<&T> {
        if index < self.steps.len() {
            self.index = index;
        }
        self.current()
    }

    pub fn rewind(&mut self) {
        self.index = 0;
    }
}

impl From<StepLog> for Replay<String> {
    fn from(log: StepLog) -> Self {
        Self::new(log.into_steps())
    }
}

impl<T> From<Vec<T>> for Replay<T> {
    fn from(steps: Vec<T>) -> Self {
        Self::new(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_stays_inside_bounds() {
        let mut replay = Replay::new(vec!["a", "b", "c"]);
        assert_eq!(replay.current(), Some(&"a"));
        assert_eq!(replay.previous_step(), Some(&"a"));
        assert_eq!(replay.next_step(), Some(&"b"));
        assert_eq!(replay.next_step(), Some(&"c"));
        assert!(replay.is_at_end());
        assert_eq!(replay.next_step(), Some(&"c"));
        assert_eq!(replay.go_to_step(7), Some(&"c"));
        assert_eq!(replay.go_to_step(0), Some(&"a"));
        assert_eq!(replay.index(), 0);
    }

    #[test]
    fn empty_trace_has_no_current_step() {
        let mut replay: Replay<String> = Replay::new(Vec::new());
        assert!(replay.is_empty());
        assert!(replay.is_at_end());
        assert_eq!(replay.next_step(), None);
        assert_eq!(replay.previous_step(), None);
    }

    #[test]
    fn builds_from_step_log() {
        let mut log = StepLog::new();
        log.push("one");
        log.push("two");
        let mut replay = Replay::from(log);
        assert_eq!(replay.len(), 2);
        assert_eq!(replay.next_step().map(String::as_str), Some("two"));
    }
}
