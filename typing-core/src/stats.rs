use std::collections::HashMap;

use typing_types::{AdminStats, Player, PlayerSummary};
use uuid::Uuid;

use crate::email_classifier::EmailClassifier;
use crate::scoring::round_one_decimal;

/// Which side of the team-domain split the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamFilter {
    All,
    Only,
    Exclude,
}

impl TeamFilter {
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw.map(str::trim).unwrap_or("") {
            "" | "all" => Some(TeamFilter::All),
            "only" => Some(TeamFilter::Only),
            "exclude" => Some(TeamFilter::Exclude),
            _ => None,
        }
    }

    pub fn admits(&self, classifier: &EmailClassifier, email: &str) -> bool {
        match self {
            TeamFilter::All => true,
            TeamFilter::Only => classifier.is_team_email(email),
            TeamFilter::Exclude => !classifier.is_team_email(email),
        }
    }
}

/// Comma-separated list of addresses or `@domain` suffixes.
///
/// An empty filter admits everything; otherwise any matching term admits.
#[derive(Debug, Clone, Default)]
pub struct EmailFilter {
    terms: Vec<String>,
}

impl EmailFilter {
    pub fn parse(raw: &str) -> Self {
        Self {
            terms: raw
                .split(',')
                .map(|term| term.trim().to_lowercase())
                .filter(|term| !term.is_empty())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn admits(&self, email: &str) -> bool {
        if self.terms.is_empty() {
            return true;
        }
        let email = email.to_lowercase();
        self.terms.iter().any(|term| {
            if term.starts_with('@') {
                email.ends_with(term.as_str())
            } else {
                email.contains(term.as_str())
            }
        })
    }
}

/// The figures of one score that feed the dashboard aggregates.
#[derive(Debug, Clone)]
pub struct ScoreFigures {
    pub player_id: Uuid,
    pub wpm: f64,
    pub accuracy: f64,
    pub score: i32,
}

#[derive(Default)]
struct Totals {
    games: u32,
    best: i32,
    wpm_sum: f64,
    accuracy_sum: f64,
}

/// Per-player aggregates ordered by games played, most active first.
pub fn summarize(players: Vec<Player>, scores: &[ScoreFigures]) -> AdminStats {
    let mut totals: HashMap<Uuid, Totals> = HashMap::new();
    for score in scores {
        let entry = totals.entry(score.player_id).or_default();
        entry.best = if entry.games == 0 {
            score.score
        } else {
            entry.best.max(score.score)
        };
        entry.games += 1;
        entry.wpm_sum += score.wpm;
        entry.accuracy_sum += score.accuracy * 100.0;
    }

    let mut summaries: Vec<PlayerSummary> = players
        .into_iter()
        .map(|player| {
            let figures = totals.remove(&player.id).unwrap_or_default();
            let (avg_wpm, avg_accuracy) = if figures.games == 0 {
                (0.0, 0.0)
            } else {
                let games = f64::from(figures.games);
                (
                    round_one_decimal(figures.wpm_sum / games),
                    round_one_decimal(figures.accuracy_sum / games),
                )
            };

            PlayerSummary {
                id: player.id,
                email: player.email,
                nickname: player.nickname,
                email_type: player.email_type,
                games_played: figures.games,
                best_score: figures.best,
                avg_wpm,
                avg_accuracy,
                created_at: player.created_at,
            }
        })
        .collect();

    summaries.sort_by(|a, b| b.games_played.cmp(&a.games_played));

    AdminStats {
        total_players: summaries.len() as u32,
        total_games: summaries.iter().map(|p| p.games_played).sum(),
        players_with_games: summaries.iter().filter(|p| p.games_played > 0).count() as u32,
        players: summaries,
    }
}
