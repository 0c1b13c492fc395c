use std::{
    fmt::{self, Debug, Display},
    sync::Arc,
};

use crate::http_client::request::Request;

pub type RequestPredicate = Arc<dyn Fn(&Request) -> bool + Send + Sync>;

/// Decides whether an expectation applies to an incoming request.
#[derive(Clone, Default)]
pub enum RequestMatcher {
    #[default]
    Any,
    Exact(Request),
    Predicate {
        predicate: RequestPredicate,
        description: String,
    },
}

impl RequestMatcher {
    pub fn any() -> Self {
        RequestMatcher::Any
    }

    pub fn exact(request: Request) -> Self {
        RequestMatcher::Exact(request)
    }

    pub fn matched_by<F>(predicate: F) -> Self
    where
        F: Fn(&Request) -> bool + Send + Sync + 'static,
    {
        Self::described("request matching predicate", predicate)
    }

    pub fn described<F>(description: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Request) -> bool + Send + Sync + 'static,
    {
        RequestMatcher::Predicate {
            predicate: Arc::new(predicate),
            description: description.into(),
        }
    }

    pub fn matches(&self, request: &Request) -> bool {
        match self {
            RequestMatcher::Any => true,
            RequestMatcher::Exact(expected) => expected == request,
            RequestMatcher::Predicate { predicate, .. } => predicate(request),
        }
    }
}

impl From<Request> for RequestMatcher {
    fn from(request: Request) -> Self {
        RequestMatcher::Exact(request)
    }
}

impl Display for RequestMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestMatcher::Any => write!(f, "any request"),
            RequestMatcher::Exact(request) => write!(f, "request equal to {}", request),
            RequestMatcher::Predicate { description, .. } => write!(f, "{}", description),
        }
    }
}

impl Debug for RequestMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestMatcher::Any => f.write_str("Any"),
            RequestMatcher::Exact(request) => f.debug_tuple("Exact").field(request).finish(),
            RequestMatcher::Predicate { description, .. } => f
                .debug_struct("Predicate")
                .field("description", description)
                .finish_non_exhaustive(),
        }
    }
}
