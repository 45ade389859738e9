//! Scripted [`HttpClient`] double shared by the unit tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::time::{Duration, sleep};

use crate::core::error::HttpError;
use crate::validation::http::{HttpClient, HttpRequest, Method};

/// What a route answers. The outcomes are played in order; the last one
/// repeats once the list is exhausted.
#[derive(Debug, Clone)]
pub struct Reply {
    outcomes: Vec<Result<u16, HttpError>>,
    delay: Duration,
}

impl Reply {
    pub fn ok(code: u16) -> Self {
        Self::sequence(vec![Ok(code)])
    }

    pub fn status(code: u16) -> Self {
        Self::sequence(vec![Err(HttpError::Status(code))])
    }

    pub fn transport(message: &str) -> Self {
        Self::sequence(vec![Err(HttpError::Transport(message.to_string()))])
    }

    pub fn sequence(outcomes: Vec<Result<u16, HttpError>>) -> Self {
        assert!(!outcomes.is_empty(), "a reply needs at least one outcome");
        Self {
            outcomes,
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Default)]
pub struct FakeHttpClient {
    routes: HashMap<(Option<Method>, String), Reply>,
    served: Mutex<HashMap<(Method, String), usize>>,
    requests: Mutex<Vec<HttpRequest>>,
    in_flight: AtomicUsize,
    high_water: AtomicUsize,
}

impl FakeHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer both HEAD and GET for `url`.
    pub fn route(mut self, url: &str, reply: Reply) -> Self {
        self.routes.insert((None, url.to_string()), reply);
        self
    }

    pub fn route_method(mut self, method: Method, url: &str, reply: Reply) -> Self {
        self.routes.insert((Some(method), url.to_string()), reply);
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn total_calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn calls_for(&self, method: Method, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.url == url)
            .count()
    }

    /// Most requests that were ever running at the same time.
    pub fn high_water_mark(&self) -> usize {
        self.high_water.load(Ordering::SeqCst)
    }

    fn reply_for(&self, method: Method, url: &str) -> Option<&Reply> {
        self.routes
            .get(&(Some(method), url.to_string()))
            .or_else(|| self.routes.get(&(None, url.to_string())))
    }
}

#[async_trait]
impl HttpClient for FakeHttpClient {
    async fn send(&self, request: HttpRequest) -> Result<u16, HttpError> {
        let method = request.method;
        let url = request.url.clone();
        self.requests.lock().unwrap().push(request);

        let Some(reply) = self.reply_for(method, &url) else {
            return Err(HttpError::Transport(format!("no route for {method} {url}")));
        };

        let served = {
            let mut served = self.served.lock().unwrap();
            let count = served.entry((method, url)).or_insert(0);
            *count += 1;
            *count - 1
        };

        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.high_water.fetch_max(running, Ordering::SeqCst);
        if !reply.delay.is_zero() {
            sleep(reply.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        reply.outcomes[served.min(reply.outcomes.len() - 1)].clone()
    }
}
