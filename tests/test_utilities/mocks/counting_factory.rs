use asset_sidecar::prelude::*;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// ClientFactory counting constructions; the client is "<tenant>#<n>"
#[derive(Default)]
pub struct CountingFactory {
    pub delay: Duration,
    pub fail_first: bool,
    created: AtomicUsize,
    attempts: AtomicUsize,
}

impl CountingFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn failing_first(mut self) -> Self {
        self.fail_first = true;
        self
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClientFactory for CountingFactory {
    type Client = String;

    async fn create(&self, _ctx: &RequestContext, tenant: &TenantContext) -> AssetResult<String> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail_first && attempt == 0 {
            return Err(AssetError::backend(
                Collaborator::SearchBackend,
                BackendError::Transport("connect timeout".to_string()),
            ));
        }
        let n = self.created.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("{}#{}", tenant.tenant_id, n))
    }
}
