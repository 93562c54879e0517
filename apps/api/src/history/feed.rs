use futures::stream::{self, Stream};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::debug;
use uuid::Uuid;

const FEED_CAPACITY: usize = 64;

/// In-process notification channel: carries the id of a user whose history changed.
#[derive(Clone)]
pub struct HistoryFeed {
    tx: broadcast::Sender<Uuid>,
}

impl HistoryFeed {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(FEED_CAPACITY);
        Self { tx }
    }

    pub fn notify(&self, user_id: Uuid) {
        // No subscribers is fine.
        let _ = self.tx.send(user_id);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Uuid> {
        self.tx.subscribe()
    }
}

impl Default for HistoryFeed {
    fn default() -> Self {
        Self::new()
    }
}

/// Yields once right away, then once per change to `user_id`'s history.
///
/// Notifications for other users are skipped. A lagged receiver yields, since
/// a change for this user may have been dropped. Ends when the feed closes.
pub fn refresh_ticks(rx: broadcast::Receiver<Uuid>, user_id: Uuid) -> impl Stream<Item = ()> {
    stream::unfold((rx, true), move |(mut rx, first)| async move {
        if !first {
            loop {
                match rx.recv().await {
                    Ok(changed) if changed == user_id => break,
                    Ok(_) => continue,
                    Err(RecvError::Lagged(missed)) => {
                        debug!(%user_id, missed, "History feed lagged");
                        break;
                    }
                    Err(RecvError::Closed) => return None,
                }
            }
        }
        Some(((), (rx, false)))
    })
}
