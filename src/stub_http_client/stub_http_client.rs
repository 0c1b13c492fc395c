use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::{debug, error, warn};

use crate::{
    http_client::{error::Error, http_client::HttpClient, request::Request, response::Response},
    lock::lock_unpoisoned,
    stub_http_client::{
        expectation::Expectation, expectation_builder::ExpectationBuilder,
        request_matcher::RequestMatcher, stub_failure::StubFailure,
    },
    test_reporter::test_reporter::TestReporter,
};

#[derive(Default)]
struct StubState {
    expectations: Vec<Expectation>,
    calls: Vec<Request>,
}

/// A stand-in [`HttpClient`] that records every call and answers from
/// expectations registered by the test.
///
/// Expectations are tried in registration order and the first eligible one
/// that accepts the request wins. A call nothing accepts is reported to the
/// test as fatal. When the test ends, the cleanup registered at construction
/// reports every required expectation that was not satisfied.
pub struct StubHttpClient {
    reporter: Arc<dyn TestReporter>,
    state: Mutex<StubState>,
}

impl StubHttpClient {
    pub fn new(reporter: Arc<dyn TestReporter>) -> Arc<Self> {
        let stub = Arc::new(Self {
            reporter: reporter.clone(),
            state: Mutex::new(StubState::default()),
        });

        let verifier = Arc::clone(&stub);
        reporter.register_cleanup(Box::new(move || {
            verifier.assert_expectations_met();
        }));

        stub
    }

    pub fn expect_execute(&self) -> ExpectationBuilder<'_> {
        ExpectationBuilder::new(self)
    }

    pub fn configure_result(
        &self,
        matcher: impl Into<RequestMatcher>,
        result: Result<Response, Error>,
    ) {
        self.expect_execute().with(matcher).return_result(result);
    }

    pub fn configure_result_fn<F>(&self, matcher: impl Into<RequestMatcher>, reply_fn: F)
    where
        F: Fn(&Request) -> Result<Response, Error> + Send + Sync + 'static,
    {
        self.expect_execute().with(matcher).returning(reply_fn);
    }

    pub(crate) fn register(&self, expectation: Expectation) {
        let mut state = lock_unpoisoned(&self.state);
        debug!(
            index = state.expectations.len(),
            matcher = %expectation.matcher(),
            times = %expectation.times(),
            "Registered expectation"
        );
        state.expectations.push(expectation);
    }

    /// Records the call, then answers from the first eligible expectation.
    ///
    /// A `never()` expectation accepting the request wins over every other
    /// expectation and fails the test. Recording and consuming the
    /// expectation happen under one lock; the reply function, the on-call
    /// hook and the reporter run after it is released.
    pub fn perform(&self, request: Request) -> Result<Response, Error> {
        let outcome = {
            let mut state = lock_unpoisoned(&self.state);
            state.calls.push(request.clone());

            let forbidden = state
                .expectations
                .iter()
                .enumerate()
                .find(|(_, expectation)| expectation.forbids(&request))
                .map(|(index, expectation)| StubFailure::ForbiddenCall {
                    index,
                    request: request.to_string(),
                    matcher: expectation.matcher().to_string(),
                });

            match forbidden {
                Some(failure) => Err(failure),
                None => {
                    let registered = state.expectations.len();
                    state
                        .expectations
                        .iter_mut()
                        .enumerate()
                        .find(|(_, expectation)| expectation.accepts(&request))
                        .map(|(index, expectation)| (index, expectation.consume()))
                        .ok_or_else(|| StubFailure::UnexpectedInvocation {
                            request: request.to_string(),
                            registered,
                        })
                }
            }
        };

        match outcome {
            Ok((index, (reply, on_call))) => {
                debug!(request = %request, expectation = index, "Matched expectation");

                if let Some(hook) = on_call {
                    hook(&request);
                }

                reply.produce(&request)
            }
            Err(failure) => {
                error!(request = ?request, "{}", failure);
                self.reporter.report_fatal(&failure);

                // A reporter that lets the test continue still must not hand
                // the caller an invented result.
                panic!("{}", failure);
            }
        }
    }

    /// Every request received so far, in arrival order.
    pub fn calls(&self) -> Vec<Request> {
        lock_unpoisoned(&self.state).calls.clone()
    }

    pub fn assert_expectations_met(&self) -> bool {
        let unmet: Vec<StubFailure> = {
            let state = lock_unpoisoned(&self.state);
            state
                .expectations
                .iter()
                .enumerate()
                .filter(|(_, expectation)| !expectation.is_satisfied())
                .map(|(index, expectation)| StubFailure::UnmetExpectation {
                    index,
                    matcher: expectation.matcher().to_string(),
                    expected: expectation.times(),
                    actual: expectation.matched(),
                })
                .collect()
        };

        for failure in &unmet {
            warn!("{}", failure);
            self.reporter.report(failure);
        }

        unmet.is_empty()
    }

    pub fn assert_called_with(&self, matcher: impl Into<RequestMatcher>) -> bool {
        let matcher = matcher.into();

        if self.count_calls_matching(&matcher) > 0 {
            return true;
        }

        self.report(StubFailure::MissingCall {
            matcher: matcher.to_string(),
        })
    }

    pub fn assert_not_called_with(&self, matcher: impl Into<RequestMatcher>) -> bool {
        let matcher = matcher.into();
        let count = self.count_calls_matching(&matcher);

        if count == 0 {
            return true;
        }

        self.report(StubFailure::UnwantedCall {
            matcher: matcher.to_string(),
            count,
        })
    }

    pub fn assert_number_of_calls(&self, expected: usize) -> bool {
        let actual = lock_unpoisoned(&self.state).calls.len();

        if actual == expected {
            return true;
        }

        self.report(StubFailure::CallCountMismatch { expected, actual })
    }

    fn count_calls_matching(&self, matcher: &RequestMatcher) -> usize {
        let calls = self.calls();
        calls.iter().filter(|call| matcher.matches(call)).count()
    }

    fn report(&self, failure: StubFailure) -> bool {
        warn!("{}", failure);
        self.reporter.report(&failure);
        false
    }
}

#[async_trait]
impl HttpClient for StubHttpClient {
    async fn execute(&self, request: Request) -> Result<Response, Error> {
        self.perform(request)
    }
}
