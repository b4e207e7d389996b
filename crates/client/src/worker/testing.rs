//! In-process network double for worker tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use precache_core::{CacheDb, Error, MANIFEST, Request, Response};
use url::Url;

use super::Worker;
use crate::network::Network;

pub(crate) const ORIGIN: &str = "http://localhost:8080";

enum Route {
    Respond(Response),
    Fail,
}

/// Serves canned responses by URL and records every call.
#[derive(Default)]
pub(crate) struct ScriptedNetwork {
    routes: Mutex<HashMap<String, Route>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedNetwork {
    /// Worker over an in-memory store and an empty network.
    pub(crate) async fn worker() -> (Worker, Arc<ScriptedNetwork>) {
        let db = CacheDb::open_in_memory().await.unwrap();
        let network = Arc::new(ScriptedNetwork::default());
        let worker = Worker::new(db, network.clone(), Url::parse(ORIGIN).unwrap());
        (worker, network)
    }

    fn url(path: &str) -> String {
        Url::parse(ORIGIN).unwrap().join(path).unwrap().to_string()
    }

    pub(crate) fn respond(&self, path: &str, status: u16, body: &str) {
        let url = Self::url(path);
        let response = Response {
            url: url.clone(),
            status,
            headers: vec![("content-type".into(), "text/plain".into())],
            body: body.as_bytes().to_vec(),
        };
        self.routes.lock().unwrap().insert(url, Route::Respond(response));
    }

    pub(crate) fn fail(&self, path: &str) {
        self.routes.lock().unwrap().insert(Self::url(path), Route::Fail);
    }

    /// Route every manifest path to a 200 whose body is the path.
    pub(crate) fn serve_manifest(&self) {
        for path in MANIFEST {
            self.respond(path, 200, path);
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn calls_to(&self, path: &str) -> usize {
        let url = Self::url(path);
        self.calls.lock().unwrap().iter().filter(|c| **c == url).count()
    }
}

#[async_trait::async_trait]
impl Network for ScriptedNetwork {
    async fn fetch(&self, request: &Request) -> Result<Response, Error> {
        let url = request.url.to_string();
        self.calls.lock().unwrap().push(url.clone());
        match self.routes.lock().unwrap().get(&url) {
            Some(Route::Respond(response)) => Ok(response.clone()),
            Some(Route::Fail) => Err(Error::Network(format!("{url}: connection refused"))),
            None => Err(Error::Network(format!("{url}: no route"))),
        }
    }
}
