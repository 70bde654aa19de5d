pub mod email_classifier;
pub mod leaderboard;
pub mod performance;
pub mod scoring;
pub mod stats;

// Re-export main components
pub use email_classifier::*;
pub use leaderboard::*;
pub use performance::*;
pub use scoring::*;
pub use stats::*;
