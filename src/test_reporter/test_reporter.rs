use crate::stub_http_client::stub_failure::StubFailure;

pub type Cleanup = Box<dyn FnOnce() + Send>;

/// The running test case as seen by a stub: somewhere to send failures and
/// to hang work that must run after the test body.
#[cfg_attr(test, mockall::automock)]
pub trait TestReporter: Send + Sync {
    /// Records a failure and lets the test continue.
    fn report(&self, failure: &StubFailure);

    /// Records a failure that ends the test body.
    fn report_fatal(&self, failure: &StubFailure);

    fn register_cleanup(&self, cleanup: Cleanup);
}
