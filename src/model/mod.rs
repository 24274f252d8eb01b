//! Domain entities: users, recognitions and notifications.

mod notification;
mod recognition;
mod types;
mod user;

pub use notification::{Notification, NotificationKind, Priority};
pub use recognition::{
    Award, Comment, GiverInfo, NewRecognition, Reaction, Recognition, RecipientInfo,
};
pub use types::{CompanyValue, ExpertArea, ExpertAreaTag, RecognitionType, Visibility};
pub use user::{EarnedAward, EarnedBadge, RecentGiver, RecentRecipient, User};
