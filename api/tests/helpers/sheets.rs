use async_trait::async_trait;
use attendance::error::SubmitError;
use attendance::sheets::{Transport, TransportResponse};
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub enum SheetsMode {
    /// Every request is recorded and answered with this message.
    Accept(&'static str),
    /// Every request gets a non-success envelope.
    Reject(&'static str),
    /// Every request fails before reaching the endpoint.
    Down,
}

/// Scripted stand-in for the Apps Script endpoint. Records every request line.
#[derive(Debug)]
pub struct FakeSheets {
    mode: SheetsMode,
    calls: Mutex<Vec<String>>,
}

impl FakeSheets {
    pub fn new(mode: SheetsMode) -> Self {
        Self {
            mode,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn answer(&self, call: String) -> Result<TransportResponse, SubmitError> {
        self.calls.lock().unwrap().push(call);
        let body = match &self.mode {
            SheetsMode::Accept(message) => {
                format!(r#"{{"status":"success","message":"{message}"}}"#)
            }
            SheetsMode::Reject(message) => {
                format!(r#"{{"status":"error","message":"{message}"}}"#)
            }
            SheetsMode::Down => {
                return Err(SubmitError::Transport("connection refused".into()));
            }
        };
        Ok(TransportResponse { status: 200, body })
    }
}

#[async_trait]
impl Transport for FakeSheets {
    async fn post_form(&self, url: &str, body: String) -> Result<TransportResponse, SubmitError> {
        self.answer(format!("POST {url} {body}"))
    }

    async fn get(&self, url: &str) -> Result<TransportResponse, SubmitError> {
        self.answer(format!("GET {url}"))
    }
}
