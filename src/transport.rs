use crate::error::TransportError;

use std::time::Duration;

/// Delivers one encoded payload to a collector URL.
///
/// Implementations are shared across dispatch threads, so they must be
/// safe to call concurrently.
pub trait Transport: Send + Sync {
    fn send(&self, url: &str, body: &str) -> Result<(), TransportError>;
}

/// Blocking HTTP transport backed by a shared `ureq` agent.
pub struct UreqTransport {
    agent: ureq::Agent,
    content_type: Option<String>,
}

impl UreqTransport {
    pub fn new(timeout: Duration, content_type: Option<String>) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            content_type,
        }
    }
}

impl Transport for UreqTransport {
    fn send(&self, url: &str, body: &str) -> Result<(), TransportError> {
        let mut request = self.agent.post(url).set(
            "x-measurement-sdk",
            &format!("rust/{}", env!("CARGO_PKG_VERSION")),
        );
        if let Some(ref ct) = self.content_type {
            request = request.set("Content-Type", ct);
        }

        match request.send_bytes(body.as_bytes()) {
            Ok(resp) => {
                let status = resp.status();
                if !(200..300).contains(&status) {
                    return Err(TransportError::Status(status));
                }
                Ok(())
            }
            Err(ureq::Error::Status(status, _resp)) => Err(TransportError::Status(status)),
            Err(ureq::Error::Transport(e)) => Err(TransportError::Transport(e.to_string())),
        }
    }
}
