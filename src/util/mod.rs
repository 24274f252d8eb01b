//! Time and id helpers shared by the gate, the calculator and the store.

mod id;
mod time;

pub use id::new_id;
pub use time::{
    hours_since, is_same_month, is_today, month_start, Clock, ManualClock, SystemClock,
};
