#![allow(dead_code)]

use std::{cell::RefCell, collections::VecDeque, io::Cursor, rc::Rc};

use helpdesk_cli::{
    api::{ApiClient, ApiError, ApiService, RawResponse, Transport},
    menu::{MenuContext, Prompt},
};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};

pub const BASE_URL: &str = "http://helpdesk.test";

/// Transport answering requests from a queue, in order, recording every URL.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    responses: Rc<RefCell<VecDeque<Result<RawResponse, ApiError>>>>,
    calls: Rc<RefCell<Vec<String>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.responses.borrow_mut().push_back(Ok(raw(status, body)));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.responses
            .borrow_mut()
            .push_back(Err(ApiError::Network {
                message: message.to_string(),
                source: None,
            }));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Transport for ScriptedTransport {
    fn get(&self, url: &str) -> Result<RawResponse, ApiError> {
        self.calls.borrow_mut().push(url.to_string());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(raw(404, "no scripted response")))
    }
}

pub fn raw(status: u16, body: &str) -> RawResponse {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    RawResponse {
        status,
        headers,
        body: body.to_string(),
    }
}

pub fn service(transport: &ScriptedTransport) -> ApiService {
    ApiService::new(ApiClient::with_transport(BASE_URL, transport.clone()))
}

/// Menu context over a scripted transport and a fixed block of input lines.
pub fn context(transport: &ScriptedTransport, input: &str) -> MenuContext {
    MenuContext::new(service(transport), Prompt::new(Cursor::new(input.to_string())))
}
