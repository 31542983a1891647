use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// A host-owned value shared with mounted indicators.
///
/// The host keeps one clone and writes to it; the indicator's timer reads the
/// current value on every tick.
#[derive(Clone, Default)]
pub struct Binding<T: Copy> {
    value: Rc<Cell<T>>,
}

impl<T: Copy> Binding<T> {
    pub fn new(value: T) -> Self {
        Self { value: Rc::new(Cell::new(value)) }
    }

    /// A binding nobody else holds, so it never changes.
    pub fn constant(value: T) -> Self {
        Self::new(value)
    }

    pub fn get(&self) -> T {
        self.value.get()
    }

    pub fn set(&self, value: T) {
        self.value.set(value);
    }

    /// Applies `update` to the current value and stores the result.
    pub fn update(&self, update: impl FnOnce(T) -> T) {
        self.value.set(update(self.value.get()));
    }
}

impl<T: Copy + fmt::Debug> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Binding").field(&self.get()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_value() {
        let host = Binding::new(true);
        let indicator = host.clone();
        host.set(false);
        assert!(!indicator.get());
        indicator.update(|value| !value);
        assert!(host.get());
    }
}
