//! Step records and the traces built from them.
//!
//! A [`Step`] is a full snapshot of the working array plus the positions the
//! algorithm touched. Snapshots are stored whole rather than as diffs so any
//! step can be rendered without replaying its predecessors.

/// Classification of a step, derived from its flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepKind {
    /// Two (or three, for binary search) positions were compared.
    Comparison,
    /// A swap, shift, or placement wrote into the array.
    Swap,
    /// A search located its target.
    Found,
    /// A search exhausted its input without a match.
    NotFound,
    /// Final snapshot or a binary-search bounds update.
    Neutral,
}

/// One atomic algorithm action.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    /// Snapshot of the working array at this instant.
    pub array: Vec<i64>,
    /// Positions relevant to this step.
    pub indices: Vec<usize>,
    /// True if the step is a comparison.
    pub comparison: bool,
    /// True if the step wrote into the array.
    pub swap: bool,
    /// Present only on the terminal step of a search.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub found: Option<bool>,
}

impl Step {
    /// A comparison over `indices`.
    pub fn compare(array: &[i64], indices: impl Into<Vec<usize>>) -> Self {
        Self {
            array: array.to_vec(),
            indices: indices.into(),
            comparison: true,
            swap: false,
            found: None,
        }
    }

    /// A swap, shift or placement touching `indices`.
    pub fn write(array: &[i64], indices: impl Into<Vec<usize>>) -> Self {
        Self {
            array: array.to_vec(),
            indices: indices.into(),
            comparison: false,
            swap: true,
            found: None,
        }
    }

    /// A snapshot that is neither a comparison nor a write.
    pub fn neutral(array: &[i64], indices: impl Into<Vec<usize>>) -> Self {
        Self {
            array: array.to_vec(),
            indices: indices.into(),
            comparison: false,
            swap: false,
            found: None,
        }
    }

    /// Terminal search step: target located at `index`.
    pub fn found_at(array: &[i64], index: usize) -> Self {
        Self {
            found: Some(true),
            ..Self::neutral(array, [index])
        }
    }

    /// Terminal search step: target absent.
    pub fn not_found(array: &[i64]) -> Self {
        Self {
            found: Some(false),
            ..Self::neutral(array, Vec::new())
        }
    }

    /// Classify this step.
    pub fn kind(&self) -> StepKind {
        match (self.found, self.comparison, self.swap) {
            (Some(true), _, _) => StepKind::Found,
            (Some(false), _, _) => StepKind::NotFound,
            (None, true, _) => StepKind::Comparison,
            (None, false, true) => StepKind::Swap,
            (None, false, false) => StepKind::Neutral,
        }
    }

    /// True for found / not-found search terminals.
    pub fn is_terminal_search(&self) -> bool {
        self.found.is_some()
    }
}

/// Ordered, immutable sequence of steps from one algorithm invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trace {
    steps: Vec<Step>,
}

impl Trace {
    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True if the trace holds no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// All steps in order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Step at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// The terminal step.
    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    /// Array carried by the terminal step.
    pub fn final_array(&self) -> Option<&[i64]> {
        self.steps.last().map(|s| s.array.as_slice())
    }

    /// Number of comparison steps.
    pub fn comparison_count(&self) -> usize {
        self.steps.iter().filter(|s| s.comparison).count()
    }

    /// Number of write steps.
    pub fn swap_count(&self) -> usize {
        self.steps.iter().filter(|s| s.swap).count()
    }

    /// For search traces, whether the target was found.
    pub fn outcome(&self) -> Option<bool> {
        self.steps.last().and_then(|s| s.found)
    }

    /// Iterate over the steps.
    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// Consume the trace, returning its steps.
    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Accumulates steps while an algorithm runs.
#[derive(Debug, Default)]
pub(crate) struct Recorder {
    steps: Vec<Step>,
}

impl Recorder {
    pub(crate) fn compare(&mut self, array: &[i64], indices: impl Into<Vec<usize>>) {
        self.steps.push(Step::compare(array, indices));
    }

    pub(crate) fn write(&mut self, array: &[i64], indices: impl Into<Vec<usize>>) {
        self.steps.push(Step::write(array, indices));
    }

    pub(crate) fn neutral(&mut self, array: &[i64], indices: impl Into<Vec<usize>>) {
        self.steps.push(Step::neutral(array, indices));
    }

    /// Close a sort trace with the final neutral snapshot.
    pub(crate) fn finish(mut self, array: &[i64]) -> Trace {
        self.steps.push(Step::neutral(array, Vec::new()));
        Trace { steps: self.steps }
    }

    /// Close a search trace with its found / not-found terminal.
    pub(crate) fn finish_search(mut self, array: &[i64], found: Option<usize>) -> Trace {
        let terminal = match found {
            Some(index) => Step::found_at(array, index),
            None => Step::not_found(array),
        };
        self.steps.push(terminal);
        Trace { steps: self.steps }
    }
}
