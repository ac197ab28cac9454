use serde::Serialize;

use crate::catalog;

pub const MAX_SCORE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Positive,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackItem {
    pub kind: FeedbackKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub score: u32,
    pub max_score: u32,
    pub feedback: Vec<FeedbackItem>,
    pub suggestions: Vec<String>,
}

impl AnalysisResult {
    pub fn band(&self) -> ScoreBand {
        ScoreBand::for_score(self.score)
    }
}

/// Three-tier presentation band for a score. Carries the hex color that
/// presentation layers render; no logic beyond the thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    pub fn for_score(score: u32) -> Self {
        if score >= 8 {
            ScoreBand::High
        } else if score >= 6 {
            ScoreBand::Medium
        } else {
            ScoreBand::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::High => "high",
            ScoreBand::Medium => "medium",
            ScoreBand::Low => "low",
        }
    }

    pub fn hex_color(self) -> &'static str {
        match self {
            ScoreBand::High => "#10b981",
            ScoreBand::Medium => "#f59e0b",
            ScoreBand::Low => "#ef4444",
        }
    }
}

/// Heuristic quality score for an assembled prompt. Pure function of the
/// text; prompts under ten characters take the early-exit path and score 0.
pub fn analyze(prompt: &str) -> AnalysisResult {
    let mut result = AnalysisResult {
        score: 0,
        max_score: MAX_SCORE,
        feedback: Vec::new(),
        suggestions: Vec::new(),
    };

    let length = prompt.chars().count();
    if length < 10 {
        result.feedback.push(warning("Prompt too short"));
        return result;
    }

    let lowered = prompt.to_lowercase();

    if length < 50 {
        result.score += 2;
        result
            .feedback
            .push(warning("Prompt is short, add more detail"));
    } else if length > 500 {
        result.score += 3;
        result.feedback.push(warning(
            "Prompt may be too long, some models ignore trailing text",
        ));
    } else {
        result.score += 4;
        result.feedback.push(positive("Prompt length is optimal"));
    }

    let element_count = catalog::ESSENTIAL_ELEMENTS
        .iter()
        .filter(|element| lowered.contains(**element))
        .count() as u32;
    result.score += element_count.min(3);
    if element_count >= 3 {
        result
            .feedback
            .push(positive("Prompt covers the essential elements"));
    } else {
        result.suggestions.push(
            "Add more descriptive elements such as visual style and lighting".to_string(),
        );
    }

    if contains_any(&lowered, catalog::SENSORY_WORDS) {
        result.score += 2;
        result
            .feedback
            .push(positive("Prompt includes strong sensory detail"));
    } else {
        result.score += 1;
        result.suggestions.push(
            "Add sensory details such as texture, material, and expression".to_string(),
        );
    }

    if contains_any(&lowered, catalog::QUALITY_WORDS) {
        result.score += 1;
        result
            .feedback
            .push(positive("Prompt includes quality keywords"));
    } else {
        result.suggestions.push(
            "Consider adding quality keywords such as \"high quality\" or \"detailed\""
                .to_string(),
        );
    }

    result.score = result.score.min(result.max_score);
    result
}

fn contains_any(lowered: &str, words: &[&str]) -> bool {
    words.iter().any(|word| lowered.contains(word))
}

fn positive(message: &str) -> FeedbackItem {
    FeedbackItem {
        kind: FeedbackKind::Positive,
        message: message.to_string(),
    }
}

fn warning(message: &str) -> FeedbackItem {
    FeedbackItem {
        kind: FeedbackKind::Warning,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{analyze, FeedbackKind, ScoreBand};

    #[test]
    fn short_prompt_scores_zero_with_single_warning() {
        for prompt in ["", "tiny", "under ten"] {
            let result = analyze(prompt);
            assert_eq!(result.score, 0);
            assert_eq!(result.feedback.len(), 1);
            assert_eq!(result.feedback[0].kind, FeedbackKind::Warning);
            assert!(result.suggestions.is_empty());
        }
    }

    #[test]
    fn rich_prompt_reaches_full_score() {
        let prompt = "subject: a lighthouse, style: cinematic, lighting: dramatic, \
                      composition: wide shot, detailed texture, high quality";
        let result = analyze(prompt);
        assert_eq!(result.score, 10);
        assert_eq!(result.band(), ScoreBand::High);
        assert_eq!(result.band().hex_color(), "#10b981");
        assert!(result.suggestions.is_empty());
        assert!(result
            .feedback
            .iter()
            .all(|item| item.kind == FeedbackKind::Positive));
    }

    #[test]
    fn sparse_prompt_collects_suggestions() {
        let result = analyze("a scenic view of misty hills");
        assert_eq!(result.score, 3);
        assert_eq!(result.feedback.len(), 1);
        assert_eq!(result.feedback[0].kind, FeedbackKind::Warning);
        assert_eq!(result.suggestions.len(), 3);
        assert_eq!(result.band(), ScoreBand::Low);
    }

    #[test]
    fn overlong_prompt_is_flagged_but_still_scored() {
        let prompt = "lighting, shadow and texture study, ".repeat(20);
        let result = analyze(&prompt);
        assert_eq!(result.score, 6);
        assert_eq!(result.band(), ScoreBand::Medium);
        assert_eq!(result.band().hex_color(), "#f59e0b");
        assert_eq!(result.feedback[0].kind, FeedbackKind::Warning);
        assert_eq!(result.suggestions.len(), 2);
    }

    #[test]
    fn band_thresholds() {
        assert_eq!(ScoreBand::for_score(10), ScoreBand::High);
        assert_eq!(ScoreBand::for_score(8), ScoreBand::High);
        assert_eq!(ScoreBand::for_score(7), ScoreBand::Medium);
        assert_eq!(ScoreBand::for_score(6), ScoreBand::Medium);
        assert_eq!(ScoreBand::for_score(5), ScoreBand::Low);
        assert_eq!(ScoreBand::for_score(0), ScoreBand::Low);
        assert_eq!(ScoreBand::Low.hex_color(), "#ef4444");
    }

    #[test]
    fn feedback_kind_serializes_lowercase() -> anyhow::Result<()> {
        let value = serde_json::to_value(analyze("tiny"))?;
        assert_eq!(value["score"], json!(0));
        assert_eq!(value["max_score"], json!(10));
        assert_eq!(value["feedback"][0]["kind"], json!("warning"));
        Ok(())
    }
}
