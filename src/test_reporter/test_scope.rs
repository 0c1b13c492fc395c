use std::{
    mem,
    sync::{Arc, Mutex},
    thread,
};

use tracing::{error, warn};

use crate::{
    lock::lock_unpoisoned,
    stub_http_client::stub_failure::StubFailure,
    test_reporter::test_reporter::{Cleanup, TestReporter},
};

struct ScopeState {
    name: String,
    failures: Mutex<Vec<StubFailure>>,
    cleanups: Mutex<Vec<Cleanup>>,
}

impl ScopeState {
    fn run_cleanups(&self) {
        // The lock is released before each cleanup runs; cleanups may register more.
        loop {
            let next = lock_unpoisoned(&self.cleanups).pop();
            match next {
                Some(cleanup) => cleanup(),
                None => break,
            }
        }
    }

    fn discard_cleanups(&self) {
        let cleanups = mem::take(&mut *lock_unpoisoned(&self.cleanups));
        drop(cleanups);
    }

    fn take_failures(&self) -> Vec<StubFailure> {
        mem::take(&mut *lock_unpoisoned(&self.failures))
    }
}

impl TestReporter for ScopeState {
    fn report(&self, failure: &StubFailure) {
        warn!(scope = %self.name, %failure, "Test failure reported");
        lock_unpoisoned(&self.failures).push(failure.clone());
    }

    fn report_fatal(&self, failure: &StubFailure) {
        error!(scope = %self.name, %failure, "Fatal test failure reported");
        lock_unpoisoned(&self.failures).push(failure.clone());
        panic!("{}: {}", self.name, failure);
    }

    fn register_cleanup(&self, cleanup: Cleanup) {
        lock_unpoisoned(&self.cleanups).push(cleanup);
    }
}

/// One test case. Fatal reports panic out of the test body; dropping the
/// scope runs the registered cleanups, last registered first, and then
/// panics if any failure was collected.
///
/// A scope dropped while its thread is already panicking discards its
/// cleanups without running them, since a cleanup reporting a fatal failure
/// there would abort the process.
///
/// Cleanups usually hold the stubs that registered them, and those stubs
/// hold this scope's reporter, so the scope must be dropped or finished for
/// either to be released.
pub struct TestScope {
    state: Arc<ScopeState>,
    finished: bool,
}

impl TestScope {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            state: Arc::new(ScopeState {
                name: name.into(),
                failures: Mutex::new(Vec::new()),
                cleanups: Mutex::new(Vec::new()),
            }),
            finished: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.state.name
    }

    pub fn reporter(&self) -> Arc<dyn TestReporter> {
        self.state.clone()
    }

    /// Failures collected so far, cleanups not yet run.
    pub fn failures(&self) -> Vec<StubFailure> {
        lock_unpoisoned(&self.state.failures).clone()
    }

    /// Ends the scope like a drop would, but hands the failures back instead
    /// of panicking.
    pub fn finish(mut self) -> Vec<StubFailure> {
        self.finished = true;
        self.state.run_cleanups();
        self.state.take_failures()
    }
}

impl Drop for TestScope {
    fn drop(&mut self) {
        if self.finished {
            return;
        }

        if thread::panicking() {
            self.state.discard_cleanups();
            for failure in self.state.take_failures() {
                error!(scope = %self.state.name, %failure, "Failure while unwinding");
            }
            return;
        }

        self.state.run_cleanups();
        let failures = self.state.take_failures();

        if failures.is_empty() {
            return;
        }

        let report = failures
            .iter()
            .map(|failure| format!("  - {}", failure))
            .collect::<Vec<_>>()
            .join("\n");

        panic!("test scope {} failed:\n{}", self.state.name, report);
    }
}
