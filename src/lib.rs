//! Toast X Recognition Core
//!
//! Peer-recognition engine: anti-gaming gate, credit calculation and the
//! recognition aggregate store behind an async manager.
//!
//! ## Module Structure
//!
//! ```text
//! src/
//! ├── lib.rs         - Crate root with re-exports
//! ├── main.rs        - Demo entrypoint
//! ├── config.rs      - Configuration management
//! ├── error.rs       - Domain error type
//! ├── manager.rs     - Async shared-state facade
//! ├── seed.rs        - Demo data set
//! ├── util/          - Clock, calendar and id helpers
//! ├── model/         - Users, recognitions, notifications
//! ├── gate/          - Anti-gaming rules
//! │   ├── check.rs     - Gate results
//! │   ├── limits.rs    - Limits & rule bundle
//! │   └── validator.rs - Daily limit, cooldown, monthly cap, recipients
//! ├── credits/       - Credit pricing
//! │   ├── calculator.rs  - Base, boosts, award, reciprocal discount
//! │   └── monthly_cap.rs - Per-giver monthly clamp
//! ├── badges/        - Badge catalog & milestones
//! └── store/         - Recognition aggregate
//!     ├── orchestrator.rs - create_recognition transaction
//!     ├── actions.rs      - Reactions, comments, notifications
//!     ├── selectors.rs    - Feed, leaderboard, analytics
//!     └── snapshot.rs     - JSON snapshot persistence
//! ```

pub mod badges;
pub mod config;
pub mod credits;
pub mod error;
pub mod gate;
pub mod manager;
pub mod model;
pub mod seed;
pub mod store;
pub mod util;

// Re-export main types for convenience
pub use config::ToastConfig;
pub use error::RecognitionError;
pub use manager::RecognitionManager;

pub use badges::{BadgeCatalog, BadgeDefinition};
pub use credits::{
    calculate_credits, is_reciprocal, CreditBreakdown, CreditTable, MonthlyCapPolicy,
};
pub use gate::{
    can_recognize, can_recognize_multiple, check_daily_limit, check_monthly_cap,
    check_recipient_cooldown, validate_recipient_ids, AntiGamingLimits, GateCheck, GateRule,
    GateRules,
};
pub use model::{
    Award, CompanyValue, ExpertAreaTag, NewRecognition, Notification, Recognition,
    RecognitionType, User, Visibility,
};
pub use store::{
    create_recognition, AppState, LeaderboardPeriod, RecognitionReceipt, SnapshotStore,
};
pub use util::{Clock, ManualClock, SystemClock};
