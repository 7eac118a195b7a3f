//! Clipboard adapter
//!
//! Writes happen on a dedicated worker thread so a slow or hung clipboard
//! never blocks the UI. Requests carry an id; the browse state uses it to
//! ignore resolutions that a newer copy has superseded.

use crate::error::ClipboardError;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

/// Anything that can place text on a clipboard
pub trait ClipboardWriter {
    fn write(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// System clipboard backed by `arboard`.
///
/// The handle is opened lazily and kept for the worker's lifetime; on X11
/// the copied text only stays available while the owning handle is alive.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    fn ensure(&mut self) -> Result<&mut arboard::Clipboard, ClipboardError> {
        if self.inner.is_none() {
            let clipboard = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            self.inner = Some(clipboard);
        }
        self.inner
            .as_mut()
            .ok_or_else(|| ClipboardError::Unavailable("clipboard not initialised".to_string()))
    }
}

impl ClipboardWriter for SystemClipboard {
    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        let clipboard = self.ensure()?;
        if let Err(e) = clipboard.set_text(text.to_owned()) {
            // Drop the handle so the next copy retries from scratch
            self.inner = None;
            return Err(ClipboardError::Write(e.to_string()));
        }
        Ok(())
    }
}

/// A copy request sent to the worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyRequest {
    pub id: u64,
    pub code: String,
}

/// The worker's answer to one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyOutcome {
    pub id: u64,
    pub code: String,
    pub result: Result<(), ClipboardError>,
}

/// Handle to the clipboard worker thread
pub struct ClipboardService {
    requests: Sender<CopyRequest>,
    outcomes: Receiver<CopyOutcome>,
}

impl ClipboardService {
    /// Start a worker whose writer is built by `make` on the worker thread.
    ///
    /// Platform clipboard handles are not `Send` everywhere, so the writer
    /// never crosses threads. The worker exits once this handle is dropped.
    pub fn spawn<F, W>(make: F) -> Self
    where
        F: FnOnce() -> W + Send + 'static,
        W: ClipboardWriter,
    {
        let (request_tx, request_rx) = mpsc::channel::<CopyRequest>();
        let (outcome_tx, outcome_rx) = mpsc::channel();

        thread::spawn(move || {
            let mut writer = make();
            for request in request_rx {
                let result = writer.write(&request.code);
                let outcome = CopyOutcome {
                    id: request.id,
                    code: request.code,
                    result,
                };
                if outcome_tx.send(outcome).is_err() {
                    break;
                }
            }
        });

        Self {
            requests: request_tx,
            outcomes: outcome_rx,
        }
    }

    /// Queue a write
    pub fn submit(&self, request: CopyRequest) -> Result<(), ClipboardError> {
        self.requests
            .send(request)
            .map_err(|_| ClipboardError::Disconnected)
    }

    /// Drain every outcome that has arrived so far
    pub fn poll(&self) -> Vec<CopyOutcome> {
        let mut outcomes = Vec::new();
        loop {
            match self.outcomes.try_recv() {
                Ok(outcome) => outcomes.push(outcome),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::warn!("clipboard worker stopped");
                    break;
                }
            }
        }
        outcomes
    }

    #[cfg(test)]
    pub fn recv_timeout(&self, timeout: std::time::Duration) -> Option<CopyOutcome> {
        self.outcomes.recv_timeout(timeout).ok()
    }
}


#[cfg(test)]
mod tests {
    use super::fake::FakeClipboard;
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_worker_writes_text_verbatim() {
        let fake = FakeClipboard::default();
        let written = fake.written.clone();
        let service = ClipboardService::spawn(move || fake);

        service
            .submit(CopyRequest {
                id: 1,
                code: "3199463349".into(),
            })
            .unwrap();

        let outcome = service.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(outcome.id, 1);
        assert_eq!(outcome.code, "3199463349");
        assert_eq!(outcome.result, Ok(()));
        assert_eq!(*written.lock().unwrap(), vec!["3199463349".to_string()]);
    }

    #[test]
    fn test_failed_write_is_reported_not_panicked() {
        let service = ClipboardService::spawn(|| FakeClipboard {
            fail: true,
            ..Default::default()
        });

        service
            .submit(CopyRequest {
                id: 9,
                code: "42".into(),
            })
            .unwrap();

        let outcome = service.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(outcome.id, 9);
        assert!(matches!(outcome.result, Err(ClipboardError::Write(_))));
    }

    #[test]
    fn test_outcomes_arrive_in_request_order() {
        let service = ClipboardService::spawn(FakeClipboard::default);
        for id in 1..=3 {
            service
                .submit(CopyRequest {
                    id,
                    code: format!("code-{}", id),
                })
                .unwrap();
        }

        let ids: Vec<u64> = (0..3)
            .filter_map(|_| service.recv_timeout(Duration::from_secs(5)))
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(service.poll().is_empty());
    }
}
