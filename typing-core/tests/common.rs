use chrono::{DateTime, Duration, TimeZone, Utc};
use typing_core::{RankedScore, ScoringEngine};
use uuid::Uuid;

/// Fixed reference instant so ordering by time is predictable.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 4, 9, 30, 0).unwrap()
}

/// A test player identity
pub struct TestPlayer {
    pub id: Uuid,
    pub nickname: String,
}

pub fn create_test_player(nickname: &str) -> TestPlayer {
    TestPlayer {
        id: Uuid::new_v4(),
        nickname: nickname.to_string(),
    }
}

/// Builds a score the way the server does, from client-reported figures
pub fn run_for(player: &TestPlayer, wpm: f64, accuracy: f64, minutes_after: i64) -> RankedScore {
    RankedScore {
        player_id: player.id,
        nickname: player.nickname.clone(),
        wpm,
        accuracy,
        score: ScoringEngine::points_for(wpm, accuracy),
        created_at: base_time() + Duration::minutes(minutes_after),
    }
}
