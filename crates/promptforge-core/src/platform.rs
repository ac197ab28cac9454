use indexmap::IndexMap;

/// How a platform marks relative emphasis on one prompt segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightStyle {
    None,
    Parenthesized,
    EmphasisFlag,
}

/// How a platform joins prompt segments into final output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyStyle {
    CommaList,
    FlagTokens,
    ParameterBlock,
    Sentences,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldWeights {
    pub subject: f64,
    pub style: f64,
    pub composition: f64,
    pub lighting: f64,
    pub color: f64,
    pub mood: f64,
}

impl FieldWeights {
    pub const NEUTRAL: FieldWeights = FieldWeights {
        subject: 1.0,
        style: 1.0,
        composition: 1.0,
        lighting: 1.0,
        color: 1.0,
        mood: 1.0,
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlatformProfile {
    pub id: String,
    pub display_name: String,
    pub supports_negative_prompt: bool,
    pub supports_parameters: bool,
    pub weights: FieldWeights,
    pub weighting: WeightStyle,
    pub assembly: AssemblyStyle,
}

impl PlatformProfile {
    /// Neutral profile used for platform ids the registry does not know.
    pub fn fallback(id: &str) -> Self {
        Self {
            id: id.to_string(),
            display_name: id.to_string(),
            supports_negative_prompt: false,
            supports_parameters: false,
            weights: FieldWeights::NEUTRAL,
            weighting: WeightStyle::None,
            assembly: AssemblyStyle::CommaList,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlatformRegistry {
    platforms: IndexMap<String, PlatformProfile>,
}

impl PlatformRegistry {
    pub fn new(platforms: Option<IndexMap<String, PlatformProfile>>) -> Self {
        Self {
            platforms: platforms.unwrap_or_else(default_platforms),
        }
    }

    pub fn get(&self, id: &str) -> Option<&PlatformProfile> {
        self.platforms.get(id)
    }

    /// Unknown ids degrade to a neutral fallback profile, never an error.
    pub fn resolve(&self, id: &str) -> PlatformProfile {
        self.platforms
            .get(id)
            .cloned()
            .unwrap_or_else(|| PlatformProfile::fallback(id))
    }

    pub fn list(&self) -> impl Iterator<Item = &PlatformProfile> {
        self.platforms.values()
    }
}

fn default_platforms() -> IndexMap<String, PlatformProfile> {
    let mut map = IndexMap::new();

    let mut insert = |id: &str,
                      display_name: &str,
                      supports_negative_prompt: bool,
                      supports_parameters: bool,
                      weights: FieldWeights,
                      weighting: WeightStyle,
                      assembly: AssemblyStyle| {
        map.insert(
            id.to_string(),
            PlatformProfile {
                id: id.to_string(),
                display_name: display_name.to_string(),
                supports_negative_prompt,
                supports_parameters,
                weights,
                weighting,
                assembly,
            },
        );
    };

    insert(
        "universal",
        "Universal",
        false,
        false,
        FieldWeights {
            subject: 1.2,
            style: 1.1,
            composition: 1.0,
            lighting: 1.0,
            color: 0.8,
            mood: 1.0,
        },
        WeightStyle::None,
        AssemblyStyle::CommaList,
    );
    insert(
        "dalle",
        "DALL·E",
        false,
        false,
        FieldWeights {
            subject: 1.5,
            style: 1.3,
            composition: 0.9,
            lighting: 1.1,
            color: 0.7,
            mood: 1.0,
        },
        WeightStyle::None,
        AssemblyStyle::Sentences,
    );
    insert(
        "midjourney",
        "Midjourney",
        false,
        true,
        FieldWeights {
            subject: 1.3,
            style: 1.2,
            composition: 1.1,
            lighting: 1.0,
            color: 0.8,
            mood: 0.9,
        },
        WeightStyle::EmphasisFlag,
        AssemblyStyle::FlagTokens,
    );
    insert(
        "stable-diffusion",
        "Stable Diffusion",
        true,
        true,
        FieldWeights {
            subject: 1.4,
            style: 1.1,
            composition: 1.0,
            lighting: 1.2,
            color: 0.9,
            mood: 0.8,
        },
        WeightStyle::Parenthesized,
        AssemblyStyle::ParameterBlock,
    );
    insert(
        "gemini",
        "Gemini",
        false,
        false,
        FieldWeights::NEUTRAL,
        WeightStyle::None,
        AssemblyStyle::CommaList,
    );
    insert(
        "qwen",
        "Qwen",
        false,
        false,
        FieldWeights::NEUTRAL,
        WeightStyle::None,
        AssemblyStyle::CommaList,
    );

    map
}

#[cfg(test)]
mod tests {
    use super::{AssemblyStyle, FieldWeights, PlatformRegistry, WeightStyle};

    #[test]
    fn resolve_known_platform_returns_profile() {
        let registry = PlatformRegistry::new(None);
        let profile = registry.resolve("midjourney");
        assert_eq!(profile.display_name, "Midjourney");
        assert_eq!(profile.weights.subject, 1.3);
        assert_eq!(profile.weighting, WeightStyle::EmphasisFlag);
        assert_eq!(profile.assembly, AssemblyStyle::FlagTokens);
        assert!(profile.supports_parameters);
        assert!(!profile.supports_negative_prompt);
    }

    #[test]
    fn resolve_unknown_platform_falls_back_to_neutral() {
        let registry = PlatformRegistry::new(None);
        let profile = registry.resolve("flux");
        assert_eq!(profile.id, "flux");
        assert_eq!(profile.weights, FieldWeights::NEUTRAL);
        assert_eq!(profile.weighting, WeightStyle::None);
        assert_eq!(profile.assembly, AssemblyStyle::CommaList);
        assert!(!profile.supports_negative_prompt);
        assert!(!profile.supports_parameters);
        assert!(registry.get("flux").is_none());
    }

    #[test]
    fn default_registry_lists_platforms_in_declaration_order() {
        let registry = PlatformRegistry::new(None);
        let ids: Vec<&str> = registry.list().map(|profile| profile.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "universal",
                "dalle",
                "midjourney",
                "stable-diffusion",
                "gemini",
                "qwen"
            ]
        );
    }

    #[test]
    fn capability_flags_agree_with_assembly_style() {
        let registry = PlatformRegistry::new(None);
        for profile in registry.list() {
            let emits_parameters = matches!(
                profile.assembly,
                AssemblyStyle::FlagTokens | AssemblyStyle::ParameterBlock
            );
            assert_eq!(profile.supports_parameters, emits_parameters);
            let emits_negative = matches!(profile.assembly, AssemblyStyle::ParameterBlock);
            assert_eq!(profile.supports_negative_prompt, emits_negative);
        }
    }
}
