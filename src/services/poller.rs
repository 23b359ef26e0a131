use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::services::store::ChatStore;

/// Repeating background refresh tied to an active session.
///
/// One poller exists per session: started on login, stopped on logout.
/// Each tick refreshes the conversation list and, when a conversation is
/// open, re-fetches it to pull new messages. Tick failures are absorbed by
/// the store and never stop the schedule.
pub struct Poller {
    token: CancellationToken,
}

impl Poller {
    /// Spawn the polling task. The first tick fires one full period after
    /// start; the initial list load is session setup's job, not the
    /// poller's.
    ///
    /// The task holds only a weak reference to the store. The store owns
    /// the poller handle, so a strong reference here would keep both alive
    /// forever; this way dropping the last store handle cancels the timer
    /// through [`Drop`], and the task also exits on its own if a tick finds
    /// the store gone.
    pub fn start(store: Arc<ChatStore>, period: Duration) -> Self {
        let token = CancellationToken::new();
        let task_token = token.clone();
        let task_store: Weak<ChatStore> = Arc::downgrade(&store);
        drop(store);

        tokio::spawn(async move {
            let first = tokio::time::Instant::now() + period;
            let mut ticks = tokio::time::interval_at(first, period);
            loop {
                tokio::select! {
                    _ = task_token.cancelled() => {
                        tracing::debug!("poller stopped");
                        return;
                    }
                    _ = ticks.tick() => {
                        let Some(store) = task_store.upgrade() else {
                            tracing::debug!("store gone, poller exiting");
                            return;
                        };
                        store.refresh_list().await;
                        let open_id = store.state().open_conversation.map(|c| c.id);
                        if let Some(id) = open_id {
                            store.open_conversation(&id).await;
                        }
                    }
                }
            }
        });

        Self { token }
    }

    /// Cancel the schedule. A fetch already in flight is allowed to finish
    /// and apply its result; only the timer stops.
    pub fn stop(&self) {
        self.token.cancel();
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
