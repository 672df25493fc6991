//! Skills panel controller
//!
//! Drives the allocation engine from session events: gated refreshes,
//! stale-result rejection, commit and level-up transactions.

pub mod controller;
pub mod detail;
pub mod session;

pub use controller::{
    fetch_snapshot, CommitTicket, FetchTicket, PanelError, RefreshOutcome, SkillsPanel, Snapshot,
};
pub use detail::SkillDetail;
pub use session::SessionSignal;
