//! HTTP 日志客户端
//!
//! POSTs each event as JSON from a background worker thread. The caller only
//! pushes onto a channel, so `log_event` never waits on the network.

use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;
use tracing::{debug, trace, warn};
use ureq::Agent;

use super::{LogEvent, LogSink};
use crate::config::RemoteLogConfig;
use crate::errors::{LinkpadError, Result};

pub struct RemoteLogClient {
    endpoint: String,
    sender: Mutex<Option<Sender<LogEvent>>>,
    done: Receiver<()>,
}

impl RemoteLogClient {
    pub fn new(config: &RemoteLogConfig) -> Result<Self> {
        Self::with_endpoint(
            &config.endpoint,
            Duration::from_millis(config.timeout_ms),
            config.auth_token.clone(),
        )
    }

    pub fn with_endpoint(
        endpoint: &str,
        timeout: Duration,
        auth_token: Option<String>,
    ) -> Result<Self> {
        url::Url::parse(endpoint).map_err(|e| {
            LinkpadError::config(format!("Invalid remote log endpoint '{}': {}", endpoint, e))
        })?;

        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();

        let (tx, rx) = crossbeam_channel::unbounded::<LogEvent>();
        let (done_tx, done_rx) = crossbeam_channel::bounded::<()>(1);
        let worker_endpoint = endpoint.to_string();

        thread::Builder::new()
            .name("remote-log".to_string())
            .spawn(move || {
                for event in rx {
                    Self::post_event(&agent, &worker_endpoint, auth_token.as_deref(), &event);
                }
                let _ = done_tx.send(());
            })
            .map_err(|e| {
                LinkpadError::config(format!("Failed to start remote log worker: {}", e))
            })?;

        debug!("Remote logging to {}", endpoint);
        Ok(Self {
            endpoint: endpoint.to_string(),
            sender: Mutex::new(Some(tx)),
            done: done_rx,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn post_event(agent: &Agent, endpoint: &str, auth_token: Option<&str>, event: &LogEvent) {
        let mut request = agent.post(endpoint);
        if let Some(token) = auth_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        match request.send_json(event) {
            Ok(resp) => trace!(
                "Log event delivered to {} (status {})",
                endpoint,
                resp.status().as_u16()
            ),
            // 失败只写本地诊断日志，不重试
            Err(e) => warn!("Remote logging to \"{}\" failed: {}", endpoint, e),
        }
    }

    /// Stop accepting events and give the worker up to `timeout` to drain.
    ///
    /// Returns `true` when every queued event was attempted in time.
    pub fn close(&self, timeout: Duration) -> bool {
        let Some(sender) = self.sender.lock().take() else {
            return true;
        };
        let pending = sender.len();
        drop(sender);

        match self.done.recv_timeout(timeout) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => true,
            Err(RecvTimeoutError::Timeout) => {
                warn!(
                    "Remote log worker did not drain within {:?} ({} event(s) were queued)",
                    timeout, pending
                );
                false
            }
        }
    }
}

impl LogSink for RemoteLogClient {
    fn log_event(&self, event: LogEvent) {
        match self.sender.lock().as_ref() {
            Some(sender) => {
                if sender.send(event).is_err() {
                    warn!("Remote log worker has stopped; event dropped");
                }
            }
            None => trace!("Remote log client closed; event dropped"),
        }
    }
}
