use log::{debug, error};
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};

use super::SelectionEvent;
use crate::ui::{ClickSource, ItemId};

/// The running click relays and the signal that stops them.
pub struct RelayGroup {
    shutdown: watch::Sender<bool>,
    handles: Vec<JoinHandle<ItemId>>,
}

/// Spawns one relay per click source, all publishing into `events`.
pub fn spawn_relays(
    sources: Vec<ClickSource>,
    events: mpsc::UnboundedSender<SelectionEvent>,
) -> RelayGroup {
    let (shutdown, _) = watch::channel(false);

    let handles = sources
        .into_iter()
        .map(|source| tokio::spawn(relay(source, events.clone(), shutdown.subscribe())))
        .collect();

    RelayGroup { shutdown, handles }
}

async fn relay(
    mut source: ClickSource,
    events: mpsc::UnboundedSender<SelectionEvent>,
    mut shutdown: watch::Receiver<bool>,
) -> ItemId {
    loop {
        tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            click = source.clicks.recv() => match click {
                Some(()) => {
                    let event = SelectionEvent {
                        ticker: source.ticker.clone(),
                        item: source.item,
                    };
                    if events.send(event).is_err() {
                        error!("Selection channel closed, dropping click on {}", source.ticker);
                    }
                }
                None => {
                    // click source gone; park until told to stop
                    let _ = shutdown.changed().await;
                    break;
                }
            },
        }
    }
    debug!("Click relay for {} stopped", source.ticker);
    source.item
}

impl RelayGroup {
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Signals every relay to stop and waits until each one has exited.
    /// Returns the items whose relays confirmed.
    pub async fn shutdown(self) -> Vec<ItemId> {
        let _ = self.shutdown.send(true);

        let mut stopped = Vec::with_capacity(self.handles.len());
        for handle in self.handles {
            match handle.await {
                Ok(item) => stopped.push(item),
                Err(e) => error!("Click relay failed: {e}"),
            }
        }
        stopped
    }
}
