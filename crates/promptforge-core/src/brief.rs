use serde::{Deserialize, Serialize};

/// Creative brief supplied by the caller. Every field is optional; an empty
/// field contributes nothing to the assembled prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BriefInput {
    #[serde(default)]
    pub main_subject: String,
    #[serde(default)]
    pub visual_style: String,
    #[serde(default)]
    pub color_palette: String,
    #[serde(default)]
    pub compositions: Vec<String>,
    #[serde(default)]
    pub custom_composition: String,
    #[serde(default)]
    pub lighting: String,
    #[serde(default)]
    pub moods: Vec<String>,
    #[serde(default)]
    pub aspect_ratio: String,
    #[serde(default)]
    pub model_version: String,
    #[serde(default)]
    pub negative_prompt: String,
    #[serde(default = "default_cfg_scale")]
    pub cfg_scale: f64,
    #[serde(default = "default_quality")]
    pub quality: f64,
}

impl Default for BriefInput {
    fn default() -> Self {
        Self {
            main_subject: String::new(),
            visual_style: String::new(),
            color_palette: String::new(),
            compositions: Vec::new(),
            custom_composition: String::new(),
            lighting: String::new(),
            moods: Vec::new(),
            aspect_ratio: String::new(),
            model_version: String::new(),
            negative_prompt: String::new(),
            cfg_scale: default_cfg_scale(),
            quality: default_quality(),
        }
    }
}

fn default_cfg_scale() -> f64 {
    7.0
}

fn default_quality() -> f64 {
    1.0
}
