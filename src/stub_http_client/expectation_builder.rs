use std::sync::Arc;

use crate::{
    http_client::{error::Error, request::Request, response::Response},
    stub_http_client::{
        expectation::{CallHook, Expectation, Reply, Times},
        request_matcher::RequestMatcher,
        stub_http_client::StubHttpClient,
    },
};

/// Fluent registration of one expectation. Nothing is registered until one
/// of the `return_*`/`returning` methods is called.
#[must_use = "an expectation is only registered once a reply is set"]
pub struct ExpectationBuilder<'a> {
    stub: &'a StubHttpClient,
    matcher: RequestMatcher,
    times: Times,
    on_call: Option<CallHook>,
}

impl<'a> ExpectationBuilder<'a> {
    pub(crate) fn new(stub: &'a StubHttpClient) -> Self {
        Self {
            stub,
            matcher: RequestMatcher::Any,
            times: Times::AtLeastOnce,
            on_call: None,
        }
    }

    pub fn with(mut self, matcher: impl Into<RequestMatcher>) -> Self {
        self.matcher = matcher.into();
        self
    }

    pub fn withf<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Request) -> bool + Send + Sync + 'static,
    {
        self.matcher = RequestMatcher::matched_by(predicate);
        self
    }

    pub fn times(mut self, n: usize) -> Self {
        self.times = Times::Exactly(n);
        self
    }

    pub fn once(self) -> Self {
        self.times(1)
    }

    /// Forbids the matching calls: one arriving fails the test at once,
    /// whatever else is registered.
    pub fn never(self) -> Self {
        self.times(0)
    }

    /// Marks the expectation optional: it is never reported as unmet.
    pub fn maybe(mut self) -> Self {
        self.times = Times::AnyNumber;
        self
    }

    /// Side effect invoked with each matched request before the reply is produced.
    pub fn run<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Request) + Send + Sync + 'static,
    {
        self.on_call = Some(Arc::new(hook));
        self
    }

    pub fn return_result(self, result: Result<Response, Error>) {
        self.register(Reply::Static(result));
    }

    pub fn return_ok(self, response: Response) {
        self.return_result(Ok(response));
    }

    pub fn return_err(self, error: Error) {
        self.return_result(Err(error));
    }

    pub fn returning<F>(self, reply_fn: F)
    where
        F: Fn(&Request) -> Result<Response, Error> + Send + Sync + 'static,
    {
        self.register(Reply::Dynamic(Arc::new(reply_fn)));
    }

    fn register(self, reply: Reply) {
        self.stub
            .register(Expectation::new(self.matcher, reply, self.times, self.on_call));
    }
}
