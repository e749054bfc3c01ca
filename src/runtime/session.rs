//! Anonymous session bootstrap.

use uuid::Uuid;

/// An authenticated session.
///
/// The hosted store requires a signed-in context before it accepts writes;
/// this application only ever signs in anonymously, so a session is nothing
/// more than a fresh random uid. Write operations on the engine are gated
/// on one being present.
#[derive(Debug, Clone)]
pub struct Session {
    uid: Uuid,
}

impl Session {
    /// Signs in anonymously: a fresh random uid, no credentials.
    pub fn anonymous() -> Self {
        Self { uid: Uuid::new_v4() }
    }

    pub fn uid(&self) -> Uuid {
        self.uid
    }
}
