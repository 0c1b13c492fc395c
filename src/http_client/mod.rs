pub mod error;
pub mod http_client;
pub mod http_conversions;
pub mod request;
pub mod response;
