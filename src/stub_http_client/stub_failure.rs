use crate::stub_http_client::expectation::Times;

/// A test-assertion failure raised by the stub. These never travel through
/// the capability's own error channel; they go to the test reporter.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StubFailure {
    #[error("unexpected call to execute({request}): none of the {registered} registered expectation(s) matched")]
    UnexpectedInvocation { request: String, registered: usize },

    #[error("call to execute({request}) hit never() expectation #{index} for {matcher}")]
    ForbiddenCall {
        index: usize,
        request: String,
        matcher: String,
    },

    #[error("unmet expectation #{index} for {matcher}: expected {expected}, matched {actual} time(s)")]
    UnmetExpectation {
        index: usize,
        matcher: String,
        expected: Times,
        actual: usize,
    },

    #[error("expected execute to have been called with {matcher}, but it was not")]
    MissingCall { matcher: String },

    #[error("expected execute not to be called with {matcher}, but it was called {count} time(s)")]
    UnwantedCall { matcher: String, count: usize },

    #[error("expected execute to be called {expected} time(s), but it was called {actual} time(s)")]
    CallCountMismatch { expected: usize, actual: usize },
}

#[cfg(test)]
mod tests {
    use crate::stub_http_client::{expectation::Times, stub_failure::StubFailure};

    #[test]
    fn describes_unexpected_invocation() {
        let failure = StubFailure::UnexpectedInvocation {
            request: "GET http://bridge/b".to_string(),
            registered: 1,
        };

        assert_eq!(
            failure.to_string(),
            "unexpected call to execute(GET http://bridge/b): none of the 1 registered expectation(s) matched"
        );
    }

    #[test]
    fn describes_forbidden_call() {
        let failure = StubFailure::ForbiddenCall {
            index: 2,
            request: "DELETE http://bridge/jobs/1".to_string(),
            matcher: "any request".to_string(),
        };

        assert_eq!(
            failure.to_string(),
            "call to execute(DELETE http://bridge/jobs/1) hit never() expectation #2 for any request"
        );
    }

    #[test]
    fn describes_unmet_expectation() {
        let failure = StubFailure::UnmetExpectation {
            index: 0,
            matcher: "any request".to_string(),
            expected: Times::Exactly(2),
            actual: 1,
        };

        assert_eq!(
            failure.to_string(),
            "unmet expectation #0 for any request: expected exactly 2 time(s), matched 1 time(s)"
        );
    }
}
