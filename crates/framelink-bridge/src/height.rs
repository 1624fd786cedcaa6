//! Rendered content height, used when a height report carries no value.

/// Source of the component's current rendered content height, in CSS pixels.
pub trait ContentHeight {
    fn content_height(&self) -> f64;
}

/// A constant height. Used by native hosts that have no document to measure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedHeight(pub f64);

impl ContentHeight for FixedHeight {
    fn content_height(&self) -> f64 {
        self.0
    }
}

impl<F> ContentHeight for F
where
    F: Fn() -> f64,
{
    fn content_height(&self) -> f64 {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn fixed_height() {
        assert_eq!(FixedHeight(240.0).content_height(), 240.0);
    }

    #[test]
    fn closure_is_read_at_call_time() {
        let current = Cell::new(100.0);
        let source = || current.get();
        assert_eq!(source.content_height(), 100.0);
        current.set(380.0);
        assert_eq!(source.content_height(), 380.0);
    }
}
