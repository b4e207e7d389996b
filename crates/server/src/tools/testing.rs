//! Shared fixtures for tool tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use precache_client::{Network, Worker};
use precache_core::{CacheDb, Error, MANIFEST, Request, Response};
use rmcp::model::CallToolResult;
use url::Url;

pub(crate) const ORIGIN: &str = "http://localhost:8080";

/// Network double: 200 with the path as body for known paths, refused otherwise.
#[derive(Default)]
pub(crate) struct StubNetwork {
    bodies: Mutex<HashMap<String, String>>,
    pub(crate) calls: Mutex<usize>,
}

impl StubNetwork {
    pub(crate) fn serve(&self, path: &str, body: &str) {
        let url = Url::parse(ORIGIN).unwrap().join(path).unwrap().to_string();
        self.bodies.lock().unwrap().insert(url, body.to_string());
    }

    pub(crate) fn serve_manifest(&self) {
        for path in MANIFEST {
            self.serve(path, path);
        }
    }
}

#[async_trait::async_trait]
impl Network for StubNetwork {
    async fn fetch(&self, request: &Request) -> Result<Response, Error> {
        *self.calls.lock().unwrap() += 1;
        let url = request.url.to_string();
        match self.bodies.lock().unwrap().get(&url) {
            Some(body) => Ok(Response {
                url,
                status: 200,
                headers: vec![("content-type".into(), "text/plain".into())],
                body: body.clone().into_bytes(),
            }),
            None => Err(Error::Network(format!("{url}: connection refused"))),
        }
    }
}

pub(crate) async fn worker() -> (Worker, Arc<StubNetwork>) {
    let db = CacheDb::open_in_memory().await.unwrap();
    let network = Arc::new(StubNetwork::default());
    let worker = Worker::new(db, network.clone(), Url::parse(ORIGIN).unwrap());
    (worker, network)
}

/// Parse the JSON text content of a tool result.
pub(crate) fn output_json(result: &CallToolResult) -> serde_json::Value {
    let content = serde_json::to_value(&result.content[0]).unwrap();
    let text = content
        .get("text")
        .and_then(|v| v.as_str())
        .expect("Expected text field in content");
    serde_json::from_str(text).unwrap()
}
