use tokio::sync::watch;

/// Process-wide stop signal fanned out over a watch channel.
#[derive(Clone)]
pub struct Shutdown {
    sender: watch::Sender<bool>,
}

#[derive(Clone)]
pub struct ShutdownListener {
    receiver: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn new() -> (Self, ShutdownListener) {
        let (sender, receiver) = watch::channel(false);
        (Self { sender }, ShutdownListener { receiver })
    }

    pub fn subscribe(&self) -> ShutdownListener {
        ShutdownListener {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn trigger(&self) {
        let _ = self.sender.send(true);
    }
}

impl ShutdownListener {
    pub async fn notified(&mut self) {
        if *self.receiver.borrow() {
            return;
        }
        let _ = self.receiver.changed().await;
    }

    /// Consumes the listener; suitable for `with_graceful_shutdown`.
    pub async fn wait(mut self) {
        self.notified().await;
    }
}

pub fn install_signal_handlers(shutdown: Shutdown) {
    let ctrlc = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!(target: "app", "received CTRL+C");
            ctrlc.trigger();
        }
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let term = shutdown.clone();
        tokio::spawn(async move {
            if let Ok(mut sig) = signal(SignalKind::terminate()) {
                sig.recv().await;
                tracing::info!(target: "app", "received SIGTERM");
                term.trigger();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::timeout;

    use super::*;

    #[tokio::test]
    async fn listeners_observe_trigger() {
        let (shutdown, listener) = Shutdown::new();
        let late = shutdown.subscribe();
        shutdown.trigger();

        timeout(Duration::from_secs(1), listener.wait())
            .await
            .expect("initial listener released");
        timeout(Duration::from_secs(1), late.wait())
            .await
            .expect("subscribed listener released");
    }

    #[tokio::test]
    async fn listener_blocks_until_triggered() {
        let (_shutdown, listener) = Shutdown::new();
        assert!(timeout(Duration::from_millis(50), listener.wait())
            .await
            .is_err());
    }
}
