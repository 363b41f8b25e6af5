//! Index-aligned batches of per-input results.

use wyvern_diagnostics::{DiagnosticStore, Result};

/// True when `inputs` holds exactly one element.
///
/// A lone input is translated as the program's entry unit; inputs that are
/// part of a larger batch are translated as library units.
pub fn is_single_element_batch<T>(inputs: &[T]) -> bool {
    inputs.len() == 1
}

/// The results of one stage for every input of an operation.
///
/// Slot `i` always belongs to input `i`. An empty slot means the input failed
/// in this stage or an earlier one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch<T> {
    slots: Vec<Option<T>>,
}

impl<T> Batch<T> {
    /// A batch where every input succeeded.
    pub fn from_values(values: Vec<T>) -> Self {
        Self {
            slots: values.into_iter().map(Some).collect(),
        }
    }

    /// Number of inputs, failed ones included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The result for input `index`, if it succeeded.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Every slot, in input order.
    pub fn iter(&self) -> impl Iterator<Item = Option<&T>> {
        self.slots.iter().map(Option::as_ref)
    }

    /// Successful results in input order.
    pub fn successes(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().flatten()
    }

    /// Indices of the inputs that failed.
    pub fn failed_indices(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_none())
            .map(|(index, _)| index)
            .collect()
    }

    /// Consume the batch, keeping only the successful results.
    pub fn into_successes(self) -> Vec<T> {
        self.slots.into_iter().flatten().collect()
    }

    pub fn into_slots(self) -> Vec<Option<T>> {
        self.slots
    }

    /// Run `stage` on every successful element.
    ///
    /// A failure is handed to `diagnostics`: under stop-at-first-error it is
    /// returned at once and the rest of the batch is skipped; otherwise it is
    /// recorded and that input's slot is left empty.
    pub fn try_map<U>(
        self,
        diagnostics: &mut DiagnosticStore,
        mut stage: impl FnMut(T, &mut DiagnosticStore) -> Result<U>,
    ) -> Result<Batch<U>> {
        let mut slots = Vec::with_capacity(self.slots.len());
        for (index, slot) in self.slots.into_iter().enumerate() {
            let Some(value) = slot else {
                slots.push(None);
                continue;
            };
            match stage(value, diagnostics) {
                Ok(output) => slots.push(Some(output)),
                Err(error) => {
                    tracing::debug!(index, "batch element failed");
                    diagnostics.record_error(error)?;
                    slots.push(None);
                }
            }
        }
        Ok(Batch { slots })
    }
}

impl<T> From<Vec<T>> for Batch<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_values(values)
    }
}
