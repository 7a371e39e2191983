//! Handle for the watches one section registered.

use parking_lot::Mutex;
use std::sync::Weak;

use crate::error::RevealError;
use crate::orchestrator::Inner;
use crate::types::SessionId;

/// Releases a section's registrations on [`dispose`](Self::dispose) or drop.
///
/// The handle holds a weak reference to the orchestrator, so it never keeps
/// the facility alive. Once a newer session replaces it for the same
/// section, or the orchestrator shuts down, the handle is inert.
#[derive(Debug)]
pub struct OrchestratorSession {
    id: SessionId,
    section: String,
    skipped: Vec<RevealError>,
    owner: Weak<Mutex<Inner>>,
    disposed: bool,
}

static_assertions::assert_impl_all!(OrchestratorSession: Send);

impl OrchestratorSession {
    pub(crate) fn new(
        id: SessionId,
        section: String,
        skipped: Vec<RevealError>,
        owner: Weak<Mutex<Inner>>,
    ) -> Self {
        Self {
            id,
            section,
            skipped,
            owner,
            disposed: false,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    /// Entries dropped at registration.
    pub fn skipped(&self) -> &[RevealError] {
        &self.skipped
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Still registered with its orchestrator.
    pub fn is_active(&self) -> bool {
        if self.disposed {
            return false;
        }
        match self.owner.upgrade() {
            Some(inner) => {
                let active = inner.lock().has_session(self.id);
                active
            }
            None => false,
        }
    }

    /// Detach every watch of this session and cancel in-flight tweens.
    ///
    /// Elements keep whatever values they had. Calling this again is a no-op.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        if let Some(inner) = self.owner.upgrade() {
            inner.lock().release(self.id);
        }
    }
}

impl Drop for OrchestratorSession {
    fn drop(&mut self) {
        self.dispose();
    }
}
