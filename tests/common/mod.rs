//! Shared utilities for integration testing.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use declarest::{Headers, Request, Response, Result, Transport};

/// Scripted transport: records every issued request and replays queued
/// responses (defaulting to `200 OK` when the queue is empty).
pub struct MockTransport {
    requests: Mutex<Vec<Request>>,
    responses: Mutex<VecDeque<Response>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            responses: Mutex::new(VecDeque::new()),
        })
    }

    /// Queue a canned response for a later dispatch.
    #[allow(dead_code)]
    pub fn queue(&self, status: u16, body: &str) {
        self.responses.lock().unwrap().push_back(Response {
            status,
            url: String::new(),
            headers: Headers::new(),
            body: body.as_bytes().to_vec(),
        });
    }

    /// Every request issued so far, in order.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Request {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was issued")
    }
}

impl Transport for MockTransport {
    fn issue(&self, request: Request) -> Result<Response> {
        let url = request.url.clone();
        self.requests.lock().unwrap().push(request);

        let canned = self.responses.lock().unwrap().pop_front();
        Ok(match canned {
            Some(mut response) => {
                response.url = url;
                response
            }
            None => Response {
                status: 200,
                url,
                headers: Headers::new(),
                body: b"OK".to_vec(),
            },
        })
    }
}
