use std::fmt::{Display, LowerExp};

/// Progress of one power iteration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationEvent<T> {
    /// Zero-based iteration index.
    pub iteration: usize,
    /// Rayleigh quotient computed at this iteration.
    pub estimate: T,
    /// Relative change `|1 - estimate / previous_estimate|`.
    pub rate: T,
}

/// Receives the progress of an iterative solver.
pub trait IterationObserver<T> {
    /// Called once per completed iteration.
    fn on_iteration(&mut self, event: &IterationEvent<T>);
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl<T> IterationObserver<T> for NoopObserver {
    fn on_iteration(&mut self, _event: &IterationEvent<T>) {}
}

/// Observer that reports every iteration through the `log` facade at info level.
///
/// Lines look like `03: estimate: 4.99812345 rate: 1.52e-3`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl<T: Display + LowerExp> IterationObserver<T> for LogObserver {
    fn on_iteration(&mut self, event: &IterationEvent<T>) {
        log::info!("{}", event);
    }
}

impl<T: Display + LowerExp> Display for IterationEvent<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}: estimate: {:.8} rate: {:.2e}",
            self.iteration, self.estimate, self.rate
        )
    }
}

/// Adapter turning a closure into an [`IterationObserver`].
///
/// # Example
///
/// ```
/// use powiter_eigen::{FnObserver, IterationEvent, IterationObserver};
///
/// let mut count = 0;
/// let mut observer = FnObserver(|_: &IterationEvent<f64>| count += 1);
/// observer.on_iteration(&IterationEvent { iteration: 0, estimate: 1.0, rate: 0.5 });
/// drop(observer);
/// assert_eq!(count, 1);
/// ```
pub struct FnObserver<F>(pub F);

impl<T, F: FnMut(&IterationEvent<T>)> IterationObserver<T> for FnObserver<F> {
    fn on_iteration(&mut self, event: &IterationEvent<T>) {
        (self.0)(event)
    }
}

/// Records the full history of events.
impl<T: Copy> IterationObserver<T> for Vec<IterationEvent<T>> {
    fn on_iteration(&mut self, event: &IterationEvent<T>) {
        self.push(*event);
    }
}
