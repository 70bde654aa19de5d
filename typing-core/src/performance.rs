use typing_types::PerformanceTier;

/// Longest flavor line returned to the client.
pub const MAX_MESSAGE_CHARS: usize = 150;
/// Longest generated typing prompt kept.
pub const MAX_PROMPT_CHARS: usize = 400;

/// System and user messages for one chat-completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// Accepts accuracy either as a fraction or as a percentage.
pub fn normalize_accuracy(accuracy: f64) -> f64 {
    if accuracy > 1.0 {
        accuracy / 100.0
    } else {
        accuracy
    }
}

/// Whole-number percentage shown to the model.
pub fn whole_percent(accuracy: f64) -> i64 {
    if accuracy <= 1.0 {
        (accuracy * 100.0) as i64
    } else {
        accuracy as i64
    }
}

pub fn tier_for(wpm: f64, accuracy: f64) -> PerformanceTier {
    if wpm >= 80.0 && accuracy >= 0.95 {
        PerformanceTier::Legendary
    } else if wpm >= 60.0 && accuracy >= 0.90 {
        PerformanceTier::Excellent
    } else if wpm >= 40.0 && accuracy >= 0.80 {
        PerformanceTier::Great
    } else if wpm >= 20.0 {
        PerformanceTier::Good
    } else {
        PerformanceTier::NeedsPractice
    }
}

pub fn fallback_message(tier: PerformanceTier) -> &'static str {
    match tier {
        PerformanceTier::Legendary => "LEGENDARY!",
        PerformanceTier::Excellent => "EXCELLENT!",
        PerformanceTier::Great => "GREAT JOB!",
        PerformanceTier::Good => "GOOD EFFORT!",
        PerformanceTier::NeedsPractice => "KEEP PRACTICING!",
    }
}

pub fn performance_prompts(
    tier: PerformanceTier,
    nickname: &str,
    wpm: f64,
    accuracy_percent: i64,
) -> PromptPair {
    let nickname = nickname.to_uppercase();
    let (system, user) = match tier {
        PerformanceTier::Legendary => (
            "You are an epic 80s arcade game announcer. Respond with a single victory \
             message in ALL CAPS. Be dramatic and over-the-top. Max 100 characters. No quotes.",
            format!(
                "Player {} just achieved LEGENDARY status: {} WPM with {}% accuracy \
                 in a typing game! Announce their glory!",
                nickname, wpm, accuracy_percent
            ),
        ),
        PerformanceTier::Excellent => (
            "You are a cloud computing enthusiast who loves DigitalOcean puns. Give a \
             celebratory message with a cloud/server/deployment joke. Max 100 characters. No quotes.",
            format!(
                "Player {} scored {} WPM with {}% accuracy. Celebrate with a cloud computing pun!",
                nickname, wpm, accuracy_percent
            ),
        ),
        PerformanceTier::Great => (
            "You are an encouraging tech mentor who uses cloud computing metaphors. \
             Be positive and motivating. Max 100 characters. No quotes.",
            format!(
                "Player {} scored {} WPM with {}% accuracy. Encourage them with a cloud/tech reference!",
                nickname, wpm, accuracy_percent
            ),
        ),
        PerformanceTier::Good => (
            "You are a friendly coach who gently teases but stays encouraging. \
             Use a cloud/tech pun. Max 100 characters. No quotes.",
            format!(
                "Player {} scored {} WPM with {}% accuracy. Give them a light-hearted nudge to improve!",
                nickname, wpm, accuracy_percent
            ),
        ),
        PerformanceTier::NeedsPractice => (
            "You are a snarky but lovable robot who roasts bad performance with tech puns. \
             Keep it playful, not mean. Encourage retry. Max 100 characters. No quotes.",
            format!(
                "Player {} scored {} WPM with {}% accuracy. \
                 Give them a playful roast that makes them want to try again!",
                nickname, wpm, accuracy_percent
            ),
        ),
    };

    PromptPair {
        system: system.to_string(),
        user,
    }
}

pub fn prompt_generation_prompts(category: &str, difficulty: &str) -> PromptPair {
    let vocabulary = match difficulty {
        "easy" => "short, common words and simple sentences",
        "hard" => "longer technical terms, numbers and varied punctuation",
        _ => "everyday technical vocabulary",
    };

    PromptPair {
        system: format!(
            "You write passages for a typing speed game. Reply with exactly two sentences, \
             20 to 35 words in total, using {}. Plain ASCII punctuation only. \
             No quotes, no lists, no markdown.",
            vocabulary
        ),
        user: format!(
            "Write a {} typing passage about {} in cloud computing.",
            difficulty, category
        ),
    }
}

/// Trims whitespace and wrapping quotes, then caps the length at `max_chars`.
pub fn clean_model_output(raw: &str, max_chars: usize) -> String {
    let cleaned = raw
        .trim()
        .trim_matches(|c: char| c == '"' || c == '\'')
        .trim();

    if cleaned.chars().count() <= max_chars {
        return cleaned.to_string();
    }

    let kept: String = cleaned.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(tier_for(80.0, 0.95), PerformanceTier::Legendary);
        assert_eq!(tier_for(95.0, 0.94), PerformanceTier::Excellent);
        assert_eq!(tier_for(60.0, 0.90), PerformanceTier::Excellent);
        assert_eq!(tier_for(59.0, 0.99), PerformanceTier::Great);
        assert_eq!(tier_for(40.0, 0.80), PerformanceTier::Great);
        assert_eq!(tier_for(70.0, 0.50), PerformanceTier::Good);
        assert_eq!(tier_for(20.0, 0.0), PerformanceTier::Good);
        assert_eq!(tier_for(19.9, 1.0), PerformanceTier::NeedsPractice);
    }

    #[test]
    fn test_accuracy_accepts_fraction_or_percent() {
        assert_eq!(normalize_accuracy(0.97), 0.97);
        assert_eq!(normalize_accuracy(97.0), 0.97);
        assert_eq!(whole_percent(0.973), 97);
        assert_eq!(whole_percent(97.6), 97);
    }

    #[test]
    fn test_performance_prompts_shout_the_nickname() {
        let prompts = performance_prompts(PerformanceTier::Legendary, "ada", 91.0, 98);
        assert!(prompts.user.contains("Player ADA"));
        assert!(prompts.user.contains("91 WPM with 98% accuracy"));
        assert!(prompts.system.contains("ALL CAPS"));
    }

    #[test]
    fn test_prompt_generation_mentions_category() {
        let prompts = prompt_generation_prompts("kubernetes", "hard");
        assert!(prompts.user.contains("kubernetes"));
        assert!(prompts.system.contains("longer technical terms"));
    }

    #[test]
    fn test_clean_model_output_strips_quotes() {
        assert_eq!(clean_model_output("  \"DEPLOYED!\"\n", 150), "DEPLOYED!");
        assert_eq!(clean_model_output("'nice'", 150), "nice");
    }

    #[test]
    fn test_clean_model_output_truncates() {
        let long = "a".repeat(200);
        let cleaned = clean_model_output(&long, MAX_MESSAGE_CHARS);
        assert_eq!(cleaned.chars().count(), MAX_MESSAGE_CHARS);
        assert!(cleaned.ends_with("..."));
    }
}
