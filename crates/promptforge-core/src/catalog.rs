pub(crate) const COLOR_PALETTES: &[(&str, &str)] = &[
    (
        "warm",
        "warm colors, golden tones, amber, orange, warm atmosphere, sunset palette",
    ),
    (
        "cool",
        "cool colors, blue tones, silver, cool atmosphere, icy, twilight palette",
    ),
    (
        "vibrant",
        "vibrant colors, saturated, bold colors, colorful, high contrast",
    ),
    (
        "pastel",
        "pastel colors, soft tones, gentle colors, delicate, muted palette",
    ),
    (
        "monochrome",
        "monochromatic, black and white, grayscale, tonal values",
    ),
    (
        "earthy",
        "earth tones, brown, green, natural colors, organic, terracotta, olive",
    ),
];

pub(crate) const STYLE_DESCRIPTORS: &[(&str, &str)] = &[
    (
        "studio ghibli",
        "by Hayao Miyazaki, Makoto Shinkai, Ghibli style, anime aesthetic",
    ),
    (
        "realistis",
        "hyperrealistic, photorealistic, by Greg Rutkowski, realistic detail, 8K resolution",
    ),
    (
        "cyberpunk",
        "neon noir, blade runner aesthetic, by Syd Mead, futuristic, sci-fi",
    ),
    (
        "sinematik",
        "cinematic, film still, movie shot, dramatic composition, anamorphic lens",
    ),
    (
        "batik",
        "traditional Indonesian batik patterns, wayang style, cultural art, heritage",
    ),
    (
        "buku-anak-90an",
        "90s Indonesian children book illustration, nostalgic, vibrant colors, retro style",
    ),
    (
        "minimalis",
        "minimalist, clean lines, simple composition, modern aesthetic",
    ),
];

pub(crate) const LIGHTING_DESCRIPTORS: &[(&str, &str)] = &[
    (
        "golden-hour",
        "golden hour lighting, warm sunset glow, long shadows, golden rays, magical hour",
    ),
    (
        "blue-hour",
        "blue hour, twilight, cool tones, magical hour, serene atmosphere, dusk",
    ),
    (
        "neon",
        "neon lighting, vibrant colors, cyberpunk glow, artificial lighting, urban night",
    ),
    (
        "chiaroscuro",
        "chiaroscuro lighting, strong contrasts, dramatic shadows, baroque style, Rembrandt lighting",
    ),
    (
        "overcast",
        "soft overcast lighting, even tones, cloudy day, gentle shadows, diffused light",
    ),
    (
        "soft-box",
        "soft box lighting, professional studio, even illumination, clean lighting",
    ),
    (
        "dramatic",
        "dramatic lighting, high contrast, theatrical, spotlight, intense shadows",
    ),
];

pub(crate) const SUBJECT_ENHANCEMENTS: &[(&str, &str)] = &[
    (
        "man",
        "detailed face, expressive eyes, authentic emotion, natural pose",
    ),
    (
        "woman",
        "elegant features, natural expression, emotional depth, graceful posture",
    ),
    (
        "child",
        "innocent expression, playful energy, authentic childhood, curious gaze",
    ),
    (
        "animal",
        "detailed fur/feathers, natural pose, environmental integration, wildlife",
    ),
    (
        "building",
        "architectural details, texture, environmental context, structural integrity",
    ),
    (
        "nature",
        "organic forms, natural textures, environmental harmony, ecological balance",
    ),
];

pub(crate) const ASPECT_DIMENSIONS: &[(&str, &str)] = &[
    ("1:1", "1024x1024"),
    ("16:9", "1280x720"),
    ("9:16", "720x1280"),
    ("4:3", "1024x768"),
    ("3:2", "1152x768"),
];

pub(crate) const DEFAULT_DIMENSIONS: &str = "1024x1024";

pub(crate) const HIGH_QUALITY_TERMS: &[&str] =
    &["high quality", "detailed", "sharp focus", "masterpiece"];

pub(crate) const SKETCH_TERMS: &[&str] = &["sketch", "concept art", "rough"];

pub(crate) const VARIATION_STYLES: &[&str] = &[
    "cinematic, film still, dramatic lighting, anamorphic lens",
    "painterly style, brush strokes, oil painting, artistic",
    "digital illustration, concept art, vibrant colors",
    "minimalist, clean composition, simple background",
];

pub(crate) const VARIATION_LIGHTINGS: &[&str] = &[
    "dramatic lighting, high contrast, cinematic shadows",
    "soft lighting, gentle shadows, even illumination",
    "moody lighting, atmospheric, emotional lighting",
    "natural lighting, sunlight, outdoor illumination",
];

pub(crate) const VARIATION_DESCRIPTORS: &[&str] =
    &["highly detailed", "intricate", "professional", "award winning"];

pub(crate) const ESSENTIAL_ELEMENTS: &[&str] = &["subject", "style", "lighting", "composition"];

pub(crate) const SENSORY_WORDS: &[&str] = &[
    "texture",
    "light",
    "shadow",
    "color",
    "material",
    "atmosphere",
    "detailed",
    "expression",
];

pub(crate) const QUALITY_WORDS: &[&str] = &[
    "high quality",
    "detailed",
    "sharp",
    "masterpiece",
    "best quality",
];

pub(crate) fn color_palette(key: &str) -> Option<&'static str> {
    find_entry(COLOR_PALETTES, key)
}

pub(crate) fn style_descriptor(key: &str) -> Option<&'static str> {
    find_entry(STYLE_DESCRIPTORS, key)
}

pub(crate) fn lighting_descriptor(key: &str) -> Option<&'static str> {
    find_entry(LIGHTING_DESCRIPTORS, key)
}

pub(crate) fn aspect_dimensions(ratio: &str) -> &'static str {
    find_entry(ASPECT_DIMENSIONS, ratio).unwrap_or(DEFAULT_DIMENSIONS)
}

fn find_entry(table: &'static [(&str, &str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, text)| *text)
}
