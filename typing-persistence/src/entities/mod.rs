pub mod prelude;

pub mod event_consents;
pub mod events;
pub mod players;
pub mod prompts;
pub mod scores;
