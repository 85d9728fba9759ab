use http::Extensions;
use reqwest::{Method, Request, Response, Url};
use reqwest_transaction::{Context, Executor, Result};
use reqwest_transaction_retry::{get_state, AttemptState};
use std::sync::{Arc, Mutex};

pub fn request() -> Request {
    Request::new(Method::GET, Url::parse("http://localhost/foo").unwrap())
}

/// What an executor saw on one attempt.
#[derive(Debug, Clone)]
pub struct Seen {
    pub state: Option<AttemptState>,
    pub body: Option<Vec<u8>>,
    pub context: Option<Context>,
}

/// Answers attempt `n` with the `n`-th status of its script, repeating the last one.
pub struct ScriptedExecutor {
    script: Vec<u16>,
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl ScriptedExecutor {
    pub fn new(script: &[u16]) -> (Self, Arc<Mutex<Vec<Seen>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let executor = Self {
            script: script.to_vec(),
            seen: seen.clone(),
        };
        (executor, seen)
    }
}

#[async_trait::async_trait]
impl Executor for ScriptedExecutor {
    async fn execute(&self, req: Request, extensions: &mut Extensions) -> Result<Response> {
        let status = {
            let mut seen = self.seen.lock().unwrap();
            seen.push(Seen {
                state: get_state(extensions).cloned(),
                body: req
                    .body()
                    .and_then(|body| body.as_bytes())
                    .map(<[u8]>::to_vec),
                context: extensions.get::<Context>().cloned(),
            });
            self.script[(seen.len() - 1).min(self.script.len() - 1)]
        };
        Ok(Response::from(
            http::Response::builder()
                .status(status)
                .body(format!("attempt with status {}", status))
                .unwrap(),
        ))
    }
}
