// ABOUTME: Progress spinner shown while remote calls are pending
// ABOUTME: The spinner is released by a drop guard on success, failure and cancellation

use crate::constants::timeouts::PROGRESS_BAR_TICK_MS;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;

/// Something visible that must be taken down once the wrapped work ends
pub trait Indicator {
    fn stop(&mut self);
}

/// Terminal spinner on stderr. Draws nothing when stderr is not a terminal.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn start(label: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(label.to_string());
        bar.enable_steady_tick(Duration::from_millis(PROGRESS_BAR_TICK_MS));
        Self { bar }
    }
}

impl Indicator for Spinner {
    fn stop(&mut self) {
        self.bar.finish_and_clear();
    }
}

struct StopOnDrop<I: Indicator>(I);

impl<I: Indicator> Drop for StopOnDrop<I> {
    fn drop(&mut self) {
        self.0.stop();
    }
}

/// Run `operation` while `indicator` is shown.
///
/// The indicator is stopped exactly once when the returned future completes
/// or is dropped. The operation's output is returned untouched.
pub fn spin_with<I, F>(indicator: I, operation: F) -> impl Future<Output = F::Output>
where
    I: Indicator,
    F: Future,
{
    let guard = StopOnDrop(indicator);
    async move {
        let _guard = guard;
        operation.await
    }
}

/// Run `operation` behind a terminal spinner labelled `label`
pub fn spin<F: Future>(label: &str, operation: F) -> impl Future<Output = F::Output> {
    spin_with(Spinner::start(label), operation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingIndicator(Rc<Cell<u32>>);

    impl Indicator for CountingIndicator {
        fn stop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[derive(Debug, PartialEq)]
    struct Failure(&'static str);

    #[tokio::test]
    async fn test_stops_once_on_success() {
        let stops = Rc::new(Cell::new(0));
        let result: Result<i32, Failure> =
            spin_with(CountingIndicator(stops.clone()), async { Ok(42) }).await;

        assert_eq!(result, Ok(42));
        assert_eq!(stops.get(), 1);
    }

    #[tokio::test]
    async fn test_stops_once_on_failure_and_keeps_error() {
        let stops = Rc::new(Cell::new(0));
        let result: Result<i32, Failure> = spin_with(CountingIndicator(stops.clone()), async {
            Err(Failure("remote exploded"))
        })
        .await;

        assert_eq!(result, Err(Failure("remote exploded")));
        assert_eq!(stops.get(), 1);
    }

    #[tokio::test]
    async fn test_not_stopped_while_pending() {
        let stops = Rc::new(Cell::new(0));
        let observed = stops.clone();
        let result = spin_with(CountingIndicator(stops.clone()), async move {
            tokio::task::yield_now().await;
            observed.get()
        })
        .await;

        assert_eq!(result, 0);
        assert_eq!(stops.get(), 1);
    }

    #[tokio::test]
    async fn test_stops_once_when_cancelled() {
        let stops = Rc::new(Cell::new(0));
        let pending = spin_with(
            CountingIndicator(stops.clone()),
            std::future::pending::<()>(),
        );

        let timed_out = tokio::time::timeout(Duration::from_millis(10), pending).await;

        assert!(timed_out.is_err());
        assert_eq!(stops.get(), 1);
    }

    #[test]
    fn test_stops_when_never_polled() {
        let stops = Rc::new(Cell::new(0));
        let future = spin_with(CountingIndicator(stops.clone()), async { 1 });
        drop(future);
        assert_eq!(stops.get(), 1);
    }

    #[tokio::test]
    async fn test_terminal_spinner_is_finished_after_completion() {
        let spinner = Spinner::start("Working...");
        let bar = spinner.bar.clone();

        let value = spin_with(spinner, async { "done" }).await;

        assert_eq!(value, "done");
        assert!(bar.is_finished());
    }
}
