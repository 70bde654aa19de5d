pub use super::event_consents::Entity as EventConsents;
pub use super::events::Entity as Events;
pub use super::players::Entity as Players;
pub use super::prompts::Entity as Prompts;
pub use super::scores::Entity as Scores;
