//! Explicit, scoped timing of pipeline stages.

use std::time::{Duration, Instant};

/// A value paired with the wall-clock time it took to produce.
#[derive(Debug, Clone, PartialEq)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed: Duration,
}

impl<T> Timed<T> {
    pub fn into_inner(self) -> T {
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Timed<U> {
        Timed {
            value: f(self.value),
            elapsed: self.elapsed,
        }
    }
}

impl<T, E> Timed<Result<T, E>> {
    /// Move the timing inside a `Result`.
    pub fn transpose(self) -> Result<Timed<T>, E> {
        let elapsed = self.elapsed;
        self.value.map(|value| Timed { value, elapsed })
    }
}

/// Run `f` and measure how long it took.
pub fn measure<T>(f: impl FnOnce() -> T) -> Timed<T> {
    let start = Instant::now();
    let value = f();
    Timed {
        value,
        elapsed: start.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_and_maps() {
        let t = measure(|| 21).map(|v| v * 2);
        assert_eq!(t.value, 42);
        assert_eq!(t.clone().into_inner(), 42);
    }

    #[test]
    fn transpose_keeps_elapsed() {
        let ok: Timed<Result<u8, &str>> = Timed {
            value: Ok(1),
            elapsed: Duration::from_millis(3),
        };
        assert_eq!(ok.transpose().unwrap().elapsed, Duration::from_millis(3));
        let err: Timed<Result<u8, &str>> = measure(|| Err("no"));
        assert_eq!(err.transpose(), Err("no"));
    }
}
