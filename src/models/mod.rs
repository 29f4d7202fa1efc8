pub mod avatars;
pub mod events;
pub mod locations;
pub mod mitid_accounts;
pub mod owned_items;
pub mod user_stats;
pub mod users;

pub use avatars::AvatarRow;
pub use events::StoredEventRow;
pub use locations::LocationRow;
pub use mitid_accounts::MitidAccountRow;
pub use owned_items::OwnedItemRow;
pub use user_stats::UserStatsRow;
pub use users::{UserRow, UserSummary};
