use async_trait::async_trait;
use tracing::info;

/// A source of the signal that ends an interactive loop or stops the dashboard server.
#[async_trait]
pub trait Shutdown: Send + Sync {
    /// This future resolves when a shutdown signal is received.
    async fn wait_for_signal(&mut self);
}

/// Resolves on Ctrl-C.
#[derive(Debug, Default)]
pub struct CtrlCShutdown;

impl CtrlCShutdown {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Shutdown for CtrlCShutdown {
    async fn wait_for_signal(&mut self) {
        // An error installing the handler is treated like a received signal.
        let _ = tokio::signal::ctrl_c().await;
        info!("Ctrl-C received, shutting down");
    }
}

/// Waits on any [`Shutdown`] source; handy as axum's graceful-shutdown future.
pub async fn wait_for(mut handler: impl Shutdown) {
    handler.wait_for_signal().await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    struct ChannelShutdown(Option<oneshot::Receiver<()>>);

    #[async_trait]
    impl Shutdown for ChannelShutdown {
        async fn wait_for_signal(&mut self) {
            if let Some(rx) = self.0.take() {
                let _ = rx.await;
            }
        }
    }

    #[tokio::test]
    async fn wait_for_resolves_on_signal() {
        let (tx, rx) = oneshot::channel();
        let waiter = tokio::spawn(wait_for(ChannelShutdown(Some(rx))));
        tx.send(()).unwrap();
        waiter.await.unwrap();
    }
}
