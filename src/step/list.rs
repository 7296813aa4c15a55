//! Flat and nested step lists for bulk declaration.

use super::StepRef;

/// A single step reference or an arbitrarily nested list of them.
///
/// Absent entries (`None`) are carried through flattening so the sequence
/// can drop them in one place.
pub enum StepList<C> {
    /// One step reference, possibly absent.
    Single(Option<StepRef<C>>),
    /// A nested list of step lists.
    Nested(Vec<StepList<C>>),
}

impl<C> StepList<C> {
    /// An empty list.
    #[must_use]
    pub const fn empty() -> Self {
        Self::Nested(Vec::new())
    }

    /// Flattens the list depth-first, preserving declaration order.
    #[must_use]
    pub fn flatten(self) -> Vec<Option<StepRef<C>>> {
        let mut flat = Vec::new();
        self.flatten_into(&mut flat);
        flat
    }

    fn flatten_into(self, flat: &mut Vec<Option<StepRef<C>>>) {
        match self {
            Self::Single(step) => flat.push(step),
            Self::Nested(lists) => {
                for list in lists {
                    list.flatten_into(flat);
                }
            }
        }
    }
}

impl<C> Default for StepList<C> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<C> From<StepRef<C>> for StepList<C> {
    fn from(step: StepRef<C>) -> Self {
        Self::Single(Some(step))
    }
}

impl<C> From<Option<StepRef<C>>> for StepList<C> {
    fn from(step: Option<StepRef<C>>) -> Self {
        Self::Single(step)
    }
}

impl<C, T> From<Vec<T>> for StepList<C>
where
    T: Into<Self>,
{
    fn from(items: Vec<T>) -> Self {
        Self::Nested(items.into_iter().map(Into::into).collect())
    }
}

impl<C, T, const N: usize> From<[T; N]> for StepList<C>
where
    T: Into<Self>,
{
    fn from(items: [T; N]) -> Self {
        Self::Nested(items.into_iter().map(Into::into).collect())
    }
}
