use std::{
    fmt::{self, Debug, Display},
    sync::Arc,
};

use crate::{
    http_client::{error::Error, request::Request, response::Response},
    stub_http_client::request_matcher::RequestMatcher,
};

pub type ReplyFn = Arc<dyn Fn(&Request) -> Result<Response, Error> + Send + Sync>;
pub type CallHook = Arc<dyn Fn(&Request) + Send + Sync>;

/// What a matched expectation hands back to the caller.
#[derive(Clone)]
pub enum Reply {
    /// Replayed verbatim on every match, error included.
    Static(Result<Response, Error>),
    /// Recomputed from the actual request on every match.
    Dynamic(ReplyFn),
}

impl Reply {
    pub fn produce(&self, request: &Request) -> Result<Response, Error> {
        match self {
            Reply::Static(result) => result.clone(),
            Reply::Dynamic(reply_fn) => reply_fn(request),
        }
    }
}

impl Debug for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Static(result) => f.debug_tuple("Static").field(result).finish(),
            Reply::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// How many matches an expectation needs and accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Times {
    #[default]
    AtLeastOnce,
    Exactly(usize),
    AnyNumber,
}

impl Times {
    pub fn accepts_another(&self, matched: usize) -> bool {
        match self {
            Times::Exactly(n) => matched < *n,
            Times::AtLeastOnce | Times::AnyNumber => true,
        }
    }

    pub fn is_satisfied_by(&self, matched: usize) -> bool {
        match self {
            Times::AtLeastOnce => matched > 0,
            Times::Exactly(n) => matched == *n,
            Times::AnyNumber => true,
        }
    }
}

impl Display for Times {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Times::AtLeastOnce => write!(f, "at least once"),
            Times::Exactly(n) => write!(f, "exactly {} time(s)", n),
            Times::AnyNumber => write!(f, "any number of times"),
        }
    }
}

pub struct Expectation {
    matcher: RequestMatcher,
    reply: Reply,
    times: Times,
    on_call: Option<CallHook>,
    matched: usize,
}

impl Expectation {
    pub(crate) fn new(
        matcher: RequestMatcher,
        reply: Reply,
        times: Times,
        on_call: Option<CallHook>,
    ) -> Self {
        Self {
            matcher,
            reply,
            times,
            on_call,
            matched: 0,
        }
    }

    pub fn matcher(&self) -> &RequestMatcher {
        &self.matcher
    }

    pub fn times(&self) -> Times {
        self.times
    }

    pub fn matched(&self) -> usize {
        self.matched
    }

    pub fn is_satisfied(&self) -> bool {
        self.times.is_satisfied_by(self.matched)
    }

    /// A `never()` expectation whose matcher accepts the request.
    pub(crate) fn forbids(&self, request: &Request) -> bool {
        self.times == Times::Exactly(0) && self.matcher.matches(request)
    }

    pub(crate) fn accepts(&self, request: &Request) -> bool {
        self.times.accepts_another(self.matched) && self.matcher.matches(request)
    }

    /// Counts the match and returns what the caller needs once the lock is gone.
    pub(crate) fn consume(&mut self) -> (Reply, Option<CallHook>) {
        self.matched += 1;
        (self.reply.clone(), self.on_call.clone())
    }
}
