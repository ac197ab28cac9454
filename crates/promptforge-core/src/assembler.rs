use crate::brief::BriefInput;
use crate::catalog;
use crate::platform::{AssemblyStyle, PlatformProfile, PlatformRegistry, WeightStyle};

const NEUTRAL_CFG_SCALE: f64 = 7.0;

/// Turns a [`BriefInput`] into a prompt string tuned to one platform's
/// conventions. Field weighting and final layout follow the platform
/// profile; the assembler itself carries no per-platform branches.
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    registry: PlatformRegistry,
}

impl PromptAssembler {
    pub fn new(registry: Option<PlatformRegistry>) -> Self {
        Self {
            registry: registry.unwrap_or_else(|| PlatformRegistry::new(None)),
        }
    }

    pub fn assemble(
        &self,
        brief: &BriefInput,
        platform_id: &str,
        weighting_enabled: bool,
    ) -> String {
        let profile = self.registry.resolve(platform_id);
        let parts = weighted_parts(brief, &profile, weighting_enabled);
        let technical = technical_terms(brief.quality);

        if !brief.negative_prompt.is_empty() && !profile.supports_negative_prompt {
            tracing::debug!(platform = %profile.id, "platform ignores negative prompt");
        }

        let prompt = match profile.assembly {
            AssemblyStyle::CommaList => comma_list(&parts, technical),
            AssemblyStyle::FlagTokens => flag_tokens(&parts, technical, brief),
            AssemblyStyle::ParameterBlock => parameter_block(&parts, technical, brief),
            AssemblyStyle::Sentences => sentences(&parts, technical),
        };
        let prompt = prompt.trim().to_string();
        tracing::debug!(
            platform = %profile.id,
            parts = parts.len(),
            chars = prompt.chars().count(),
            "assembled prompt"
        );
        prompt
    }
}

fn weighted_parts(
    brief: &BriefInput,
    profile: &PlatformProfile,
    weighting_enabled: bool,
) -> Vec<String> {
    let weights = profile.weights;
    let mut parts = Vec::new();

    if !brief.main_subject.is_empty() {
        let enhanced = enhance_subject(&brief.main_subject);
        parts.push(apply_weighting(
            &enhanced,
            weights.subject,
            profile,
            weighting_enabled,
        ));
    }
    if !brief.visual_style.is_empty() {
        let style = catalog::style_descriptor(&brief.visual_style).unwrap_or(&brief.visual_style);
        parts.push(apply_weighting(
            style,
            weights.style,
            profile,
            weighting_enabled,
        ));
    }
    if let Some(palette) = catalog::color_palette(&brief.color_palette) {
        parts.push(apply_weighting(
            palette,
            weights.color,
            profile,
            weighting_enabled,
        ));
    }
    let composition = composition_text(brief);
    if !composition.is_empty() {
        parts.push(apply_weighting(
            &composition,
            weights.composition,
            profile,
            weighting_enabled,
        ));
    }
    if !brief.lighting.is_empty() {
        let lighting = catalog::lighting_descriptor(&brief.lighting).unwrap_or(&brief.lighting);
        parts.push(apply_weighting(
            lighting,
            weights.lighting,
            profile,
            weighting_enabled,
        ));
    }
    if !brief.moods.is_empty() {
        parts.push(apply_weighting(
            &brief.moods.join(", "),
            weights.mood,
            profile,
            weighting_enabled,
        ));
    }

    parts
}

/// Appends the fixed detail clause for every vocabulary keyword found in the
/// subject, in vocabulary order. Matches are substring matches, so multiple
/// clauses can stack.
fn enhance_subject(subject: &str) -> String {
    let lowered = subject.to_lowercase();
    let mut enhanced = subject.to_string();
    for (keyword, detail) in catalog::SUBJECT_ENHANCEMENTS {
        if lowered.contains(keyword) {
            enhanced.push_str(", ");
            enhanced.push_str(detail);
        }
    }
    enhanced
}

fn composition_text(brief: &BriefInput) -> String {
    let mut text = brief.compositions.join(", ");
    if !brief.custom_composition.is_empty() {
        if !text.is_empty() {
            text.push_str(", ");
        }
        text.push_str(&brief.custom_composition);
    }
    text
}

fn apply_weighting(text: &str, weight: f64, profile: &PlatformProfile, enabled: bool) -> String {
    if !enabled {
        return text.to_string();
    }
    match profile.weighting {
        WeightStyle::Parenthesized if weight != 1.0 => format!("({text}:{weight:.1})"),
        WeightStyle::EmphasisFlag if weight > 1.0 => {
            format!("{text} --iw {}", (weight * 2.0).round() as i64)
        }
        _ => text.to_string(),
    }
}

fn technical_terms(quality: f64) -> &'static [&'static str] {
    if quality > 1.0 {
        catalog::HIGH_QUALITY_TERMS
    } else if quality < 1.0 {
        catalog::SKETCH_TERMS
    } else {
        &[]
    }
}

fn comma_list(parts: &[String], technical: &[&str]) -> String {
    let mut prompt = parts.join(", ");
    append_comma_separated(&mut prompt, technical);
    prompt
}

fn flag_tokens(parts: &[String], technical: &[&str], brief: &BriefInput) -> String {
    let mut prompt = parts.join(", ");
    append_comma_separated(&mut prompt, technical);
    if !brief.aspect_ratio.is_empty() {
        prompt.push_str(&format!(" --ar {}", brief.aspect_ratio));
    }
    if !brief.model_version.is_empty() {
        prompt.push_str(&format!(" --v {}", brief.model_version));
    }
    if brief.cfg_scale != NEUTRAL_CFG_SCALE {
        prompt.push_str(&format!(" --cfg {}", brief.cfg_scale));
    }
    prompt
}

fn parameter_block(parts: &[String], technical: &[&str], brief: &BriefInput) -> String {
    let mut prompt = parts.join(", ");
    append_comma_separated(&mut prompt, technical);
    if !brief.negative_prompt.is_empty() {
        prompt.push_str(&format!("\n\nNegative prompt: {}", brief.negative_prompt));
    }
    if brief.cfg_scale != NEUTRAL_CFG_SCALE {
        prompt.push_str(&format!("\nCFG scale: {}", brief.cfg_scale));
    }
    if !brief.aspect_ratio.is_empty() {
        prompt.push_str(&format!(
            "\nSize: {}",
            catalog::aspect_dimensions(&brief.aspect_ratio)
        ));
    }
    prompt
}

fn sentences(parts: &[String], technical: &[&str]) -> String {
    let mut groups = Vec::new();
    if !parts.is_empty() {
        groups.push(format!("{}.", parts.join(". ")));
    }
    if !technical.is_empty() {
        groups.push(format!("{}.", technical.join(". ")));
    }
    groups.join(" ")
}

fn append_comma_separated(prompt: &mut String, technical: &[&str]) {
    if technical.is_empty() {
        return;
    }
    if !prompt.is_empty() {
        prompt.push_str(", ");
    }
    prompt.push_str(&technical.join(", "));
}
