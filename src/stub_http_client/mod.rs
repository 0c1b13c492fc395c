pub mod expectation;
pub mod expectation_builder;
pub mod request_matcher;
pub mod stub_failure;
pub mod stub_http_client;
