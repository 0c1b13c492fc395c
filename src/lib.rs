//! A call-recording stand-in for an HTTP client, for unit tests.
//!
//! Code under test depends on [`HttpClient`]. Tests hand it a
//! [`StubHttpClient`] built around a [`TestScope`], script replies with
//! expectations, and let the scope fail the test on unexpected calls or
//! unmet expectations.
//!
//! ```ignore
//! let scope = TestScope::new("fetches_job_status");
//! let stub = StubHttpClient::new(scope.reporter());
//! stub.expect_execute()
//!     .with(Request::new(RequestMethod::Get, "http://bridge/status"))
//!     .once()
//!     .return_ok(ok_response);
//! ```

mod lock;

pub mod http_client;
pub mod stub_http_client;
pub mod test_reporter;

pub use http_client::{
    error::Error,
    http_client::HttpClient,
    request::{Request, RequestHeaders, RequestMethod},
    response::Response,
};
pub use stub_http_client::{
    expectation::Times, request_matcher::RequestMatcher, stub_failure::StubFailure,
    stub_http_client::StubHttpClient,
};
pub use test_reporter::{test_reporter::TestReporter, test_scope::TestScope};
