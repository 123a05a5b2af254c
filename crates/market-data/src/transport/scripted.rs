//! Test backend that replays canned replies and records every request.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;

use super::{BackendError, HttpBackend, HttpReply};

type Scripted = Result<HttpReply, BackendError>;

pub(crate) struct ScriptedBackend {
    replies: Mutex<VecDeque<Scripted>>,
    fallback: Option<Scripted>,
    urls: Mutex<Vec<Url>>,
    calls: AtomicUsize,
}

impl ScriptedBackend {
    /// Replays `replies` in order; panics if asked for more.
    pub(crate) fn new(replies: Vec<Scripted>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            fallback: None,
            urls: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Answers every request with the same reply.
    pub(crate) fn repeating(reply: Scripted) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            fallback: Some(reply),
            urls: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// One 200 reply per JSON body.
    pub(crate) fn bodies(bodies: &[&str]) -> Self {
        Self::new(bodies.iter().map(|b| Ok(HttpReply::ok(*b))).collect())
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn urls(&self) -> Vec<Url> {
        self.urls.lock().unwrap().clone()
    }

    /// Value of `name` in the query string of every recorded request.
    pub(crate) fn query_values(&self, name: &str) -> Vec<String> {
        self.urls()
            .iter()
            .filter_map(|url| {
                url.query_pairs()
                    .find(|(k, _)| k == name)
                    .map(|(_, v)| v.into_owned())
            })
            .collect()
    }
}

#[async_trait]
impl HttpBackend for ScriptedBackend {
    async fn get(&self, url: Url, _timeout: Duration) -> Result<HttpReply, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().unwrap().push(url);

        let next = self.replies.lock().unwrap().pop_front();
        match (next, &self.fallback) {
            (Some(reply), _) => reply,
            (None, Some(fallback)) => fallback.clone(),
            (None, None) => panic!("scripted backend ran out of replies"),
        }
    }
}
