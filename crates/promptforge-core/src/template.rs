use serde::Serialize;

use crate::brief::BriefInput;

/// Curated starting brief shipped with the toolkit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    pub id: u32,
    pub name: String,
    pub platform: String,
    pub description: String,
    pub brief: BriefInput,
}

pub fn templates() -> Vec<Template> {
    vec![
        Template {
            id: 1,
            name: "Warung Kopi Filosofis".to_string(),
            platform: "universal".to_string(),
            description: "Potret melankolis kehidupan urban tradisional".to_string(),
            brief: BriefInput {
                main_subject: "Seorang kakek tua duduk sendirian di warung kopi sederhana di Tangerang, memandang jauh ke jalanan yang sepi".to_string(),
                visual_style: "sinematik".to_string(),
                compositions: vec!["close-up".to_string(), "medium-shot".to_string()],
                lighting: "golden-hour".to_string(),
                moods: vec!["melankolis".to_string(), "nostalgia".to_string()],
                aspect_ratio: "16:9".to_string(),
                ..BriefInput::default()
            },
        },
        Template {
            id: 2,
            name: "Transformasi Sosial - Cyberpunk".to_string(),
            platform: "midjourney".to_string(),
            description: "Kontras antara modernitas dan tradisi".to_string(),
            brief: BriefInput {
                main_subject: "Pemuda dari komunitas marginal berdiri di antara gedung pencakar langit dan pemukiman kumuh, memegang buku dan smartphone".to_string(),
                visual_style: "cyberpunk".to_string(),
                compositions: vec!["wide-shot".to_string(), "dutch-angle".to_string()],
                lighting: "neon".to_string(),
                moods: vec!["penuh-harap".to_string(), "absurd".to_string()],
                aspect_ratio: "16:9".to_string(),
                negative_prompt: "wajah blur, kualitas rendah, wajah cacat".to_string(),
                ..BriefInput::default()
            },
        },
        Template {
            id: 3,
            name: "Nostalgia Buku Anak 90an".to_string(),
            platform: "dalle".to_string(),
            description: "Imaji masa kecil Indonesia era 90-an".to_string(),
            brief: BriefInput {
                main_subject: "Anak-anak bermain layangan di sawah dengan latar gunung, ilustrasi warna-warni cerah".to_string(),
                visual_style: "buku-anak-90an".to_string(),
                compositions: vec!["wide-shot".to_string()],
                lighting: "soft-box".to_string(),
                moods: vec!["nostalgia".to_string(), "sunyi".to_string()],
                aspect_ratio: "4:3".to_string(),
                ..BriefInput::default()
            },
        },
    ]
}

pub fn find(id: u32) -> Option<Template> {
    templates().into_iter().find(|template| template.id == id)
}

#[cfg(test)]
mod tests {
    use super::{find, templates};

    #[test]
    fn templates_are_listed_in_id_order() {
        let all = templates();
        let ids: Vec<u32> = all.iter().map(|template| template.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(all.iter().all(|template| !template.brief.main_subject.is_empty()));
    }

    #[test]
    fn find_returns_the_matching_template() {
        let template = find(2).unwrap();
        assert_eq!(template.name, "Transformasi Sosial - Cyberpunk");
        assert_eq!(template.platform, "midjourney");
        assert_eq!(
            template.brief.negative_prompt,
            "wajah blur, kualitas rendah, wajah cacat"
        );
    }

    #[test]
    fn find_returns_none_for_unknown_id() {
        assert!(find(99).is_none());
    }
}
