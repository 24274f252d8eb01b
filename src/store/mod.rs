//! Recognition aggregate store.
//!
//! ```text
//! ┌────────────┐  create_recognition  ┌────────────┐
//! │  AppState  │ ───────────────────► │  AppState' │
//! │  (current) │  actions::*          │   (next)   │
//! └────────────┘                      └────────────┘
//!       │                                   │
//!       ▼                                   ▼
//!   selectors::*                     SnapshotStore (JSON)
//! ```
//!
//! State is a plain value. Transitions are functions from the current
//! state to the next one, and read views are derived on demand.

pub mod actions;
mod orchestrator;
pub mod selectors;
mod snapshot;
mod state;

pub use orchestrator::{create_recognition, RecipientCredit, RecognitionReceipt};
pub use selectors::{Analytics, LeaderboardEntry, LeaderboardPeriod};
pub use snapshot::{decode_snapshot, encode_snapshot, SnapshotStore, SNAPSHOT_VERSION};
pub use state::AppState;
