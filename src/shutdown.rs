//! Stops a run on termination signals

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::warn;

#[cfg(unix)]
use tokio::signal::unix::{signal, Signal, SignalKind};

/// Cancel `cancel` on SIGINT, SIGTERM or SIGQUIT.
///
/// Handlers are installed before this returns, so a signal that arrives
/// while the run is starting up is not lost. The task ends on its own once
/// `cancel` is cancelled by someone else.
pub fn spawn_signal_closer(cancel: CancellationToken) -> JoinHandle<()> {
    let mut listeners = SignalListeners::register();

    tokio::spawn(async move {
        let received = tokio::select! {
            _ = cancel.cancelled() => return,
            name = listeners.recv() => name,
        };

        warn!("stop by {}", received);
        cancel.cancel();
    })
}

#[cfg(unix)]
struct SignalListeners {
    interrupt: Option<Signal>,
    terminate: Option<Signal>,
    quit: Option<Signal>,
}

#[cfg(unix)]
impl SignalListeners {
    fn register() -> Self {
        Self {
            interrupt: register(SignalKind::interrupt(), "SIGINT"),
            terminate: register(SignalKind::terminate(), "SIGTERM"),
            quit: register(SignalKind::quit(), "SIGQUIT"),
        }
    }

    async fn recv(&mut self) -> &'static str {
        tokio::select! {
            () = recv_or_pending(&mut self.interrupt) => "SIGINT",
            () = recv_or_pending(&mut self.terminate) => "SIGTERM",
            () = recv_or_pending(&mut self.quit) => "SIGQUIT",
        }
    }
}

#[cfg(unix)]
fn register(kind: SignalKind, name: &str) -> Option<Signal> {
    match signal(kind) {
        Ok(signal) => Some(signal),
        Err(err) => {
            warn!("Failed to register {} handler: {}", name, err);
            None
        }
    }
}

#[cfg(unix)]
async fn recv_or_pending(signal: &mut Option<Signal>) {
    match signal.as_mut() {
        Some(signal) => {
            signal.recv().await;
        }
        None => std::future::pending::<()>().await,
    }
}

#[cfg(windows)]
struct SignalListeners {
    ctrl_c: Option<tokio::signal::windows::CtrlC>,
}

#[cfg(windows)]
impl SignalListeners {
    fn register() -> Self {
        let ctrl_c = match tokio::signal::windows::ctrl_c() {
            Ok(ctrl_c) => Some(ctrl_c),
            Err(err) => {
                warn!("Failed to register ctrl-c handler: {}", err);
                None
            }
        };
        Self { ctrl_c }
    }

    async fn recv(&mut self) -> &'static str {
        match self.ctrl_c.as_mut() {
            Some(ctrl_c) => {
                ctrl_c.recv().await;
            }
            None => std::future::pending::<()>().await,
        }
        "SIGINT"
    }
}
