pub mod admin;
pub mod ai;
pub mod email;
pub mod errors;
pub mod event;
pub mod leaderboard;
pub mod player;
pub mod prompt;
pub mod score;

// Re-export all types
pub use admin::*;
pub use ai::*;
pub use email::*;
pub use errors::*;
pub use event::*;
pub use leaderboard::*;
pub use player::*;
pub use prompt::*;
pub use score::*;
