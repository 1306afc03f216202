//! Session gate over the identity channel.

use pulse_core::entities::SessionState;
use tokio::sync::watch;

/// Read side of the session channel.
///
/// Obtained from [`crate::AuthClient::subscribe`]. Every method observes the
/// latest whole [`SessionState`] value; the presentation layer consults
/// [`Self::is_authenticated`] to decide whether task operations are
/// available, and [`Self::owner_id`] to scope them.
#[derive(Debug, Clone)]
pub struct SessionGate {
    rx: watch::Receiver<SessionState>,
}

impl SessionGate {
    pub(crate) const fn new(rx: watch::Receiver<SessionState>) -> Self {
        Self { rx }
    }

    /// Current session snapshot.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.rx.borrow().clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.rx.borrow().is_authenticated
    }

    /// Owner key for task storage. The email of the signed-in user, `None`
    /// when anonymous.
    #[must_use]
    pub fn owner_id(&self) -> Option<String> {
        let state = self.rx.borrow();
        if state.is_authenticated {
            state.email.clone()
        } else {
            None
        }
    }

    /// Wait for the next published state change.
    ///
    /// # Errors
    ///
    /// Returns an error when the publishing client has been dropped.
    pub async fn changed(&mut self) -> Result<(), watch::error::RecvError> {
        self.rx.changed().await
    }
}
