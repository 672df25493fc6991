//! Session liveness and visibility

/// Whether a wallet session is active and the panel is on screen.
///
/// Background refreshes only run when both hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSignal {
    pub active: bool,
    pub visible: bool,
}

impl SessionSignal {
    pub fn new(active: bool, visible: bool) -> Self {
        Self { active, visible }
    }

    /// Active and visible
    pub fn live() -> Self {
        Self::new(true, true)
    }

    pub fn allows_refresh(&self) -> bool {
        self.active && self.visible
    }
}
