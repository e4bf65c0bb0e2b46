use crate::session::{SessionManager, SessionSnapshot};
use crate::store::StoreKey;

use log::warn;

impl SessionManager {
    /// Return to the unauthenticated baseline after a failed login or a
    /// rejected stored session.
    pub(crate) fn rollback(&self) {
        warn!("Rolling back session state");
        self.clear();
    }

    /// Remove every durable key, drop the bearer credential and publish the
    /// empty snapshot as a single change.
    ///
    /// A key that fails to delete does not stop the others.
    pub(crate) fn clear(&self) {
        for key in StoreKey::ALL {
            if let Err(e) = self.store.remove(key) {
                warn!("Failed to remove {key} from the session store: {e}");
            }
        }

        self.identity.set_bearer_token(None);

        let baseline = SessionSnapshot::default();
        self.state_tx.send_if_modified(|snapshot| {
            if *snapshot == baseline {
                return false;
            }
            *snapshot = baseline;
            true
        });
    }
}
