use std::{fmt, rc::Rc};

/// A value the engine re-reads on every refresh: a constant, a closure, or a
/// handle onto some externally-owned object (wrapped in a closure).
pub struct Live<T>(Rc<dyn Fn() -> T>);

impl<T: Clone + 'static> Live<T> {
    pub fn constant(v: T) -> Self {
        Live(Rc::new(move || v.clone()))
    }
}

impl<T> Live<T> {
    pub fn from_fn(f: impl Fn() -> T + 'static) -> Self {
        Live(Rc::new(f))
    }
    pub fn get(&self) -> T {
        (self.0)()
    }
}

impl<T> Clone for Live<T> {
    fn clone(&self) -> Self {
        Live(self.0.clone())
    }
}

impl<T: Clone + 'static> From<T> for Live<T> {
    fn from(v: T) -> Self {
        Live::constant(v)
    }
}

impl<T: fmt::Debug> fmt::Debug for Live<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Live({:?})", self.get())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn rereads() {
        let cell = Rc::new(Cell::new(1.));
        let live = {
            let cell = cell.clone();
            Live::from_fn(move || cell.get())
        };
        assert_eq!(live.get(), 1.);
        cell.set(2.);
        assert_eq!(live.get(), 2.);
        assert_eq!(live.clone().get(), 2.);
    }

    #[test]
    fn constant() {
        let live: Live<f64> = 3.5.into();
        assert_eq!(live.get(), 3.5);
    }
}
