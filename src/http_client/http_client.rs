use async_trait::async_trait;

use crate::http_client::{error::Error, request::Request, response::Response};

/// The single capability code under test depends on to reach the network.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, request: Request) -> Result<Response, Error>;
}
