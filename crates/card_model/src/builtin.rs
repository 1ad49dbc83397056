//! Built-in template registry
//!
//! These templates ship with the application. Their ids are stable slugs and
//! their timestamps are fixed so registration is deterministic.

use crate::{
    CardElement, CardSide, CardTemplate, ElementKind, ElementStyles, FontWeight, Geometry,
    ObjectFit, TemplateCategory, TemplateId, TextAlign, WritingMode,
};
use chrono::{DateTime, Utc};

/// Template the editor falls back to when a requested id does not exist
pub const DEFAULT_TEMPLATE_ID: &str = "classic";

fn el(id: &str, kind: ElementKind, x: f64, y: f64, width: f64, height: f64, z: i32) -> CardElement {
    CardElement::new(id, kind, Geometry::clamped(x, y, width, height)).with_z_index(z)
}

fn built_in(id: &str, name: &str, description: &str, category: TemplateCategory) -> CardTemplate {
    let epoch = DateTime::<Utc>::default();
    CardTemplate {
        id: TemplateId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        is_built_in: true,
        category,
        front: CardSide::default(),
        back: CardSide::default(),
        created_at: epoch,
        updated_at: epoch,
    }
}

fn classic() -> CardTemplate {
    let front = CardSide::new("#f7f4ef")
        .with_element(
            el("portrait", ElementKind::Image, 50.0, 0.0, 50.0, 85.0, 0)
                .with_binding("{{profileImage}}")
                .with_styles(ElementStyles::new().with_object_fit(ObjectFit::Cover)),
        )
        .with_element(
            el("name", ElementKind::Text, 6.0, 60.0, 42.0, 10.0, 2)
                .with_binding("{{fullName}}")
                .with_styles(
                    ElementStyles::new()
                        .with_color("#1c1c1c")
                        .with_font_size(22.0)
                        .with_font_weight(FontWeight::Bold)
                        .with_font_family("Georgia"),
                ),
        )
        .with_element(
            el("role", ElementKind::Text, 6.0, 71.0, 42.0, 6.0, 2)
                .with_binding("{{role}}")
                .with_styles(ElementStyles::new().with_color("#5b5b5b").with_font_size(13.0)),
        )
        .with_element(
            el("footer-band", ElementKind::Shape, 0.0, 85.0, 100.0, 15.0, 1)
                .with_styles(ElementStyles::new().with_background_color("#1c1c1c")),
        )
        .with_element(
            el("company", ElementKind::Text, 6.0, 89.0, 88.0, 7.0, 3)
                .with_binding("{{companyName}}")
                .with_styles(
                    ElementStyles::new()
                        .with_color("#ffffff")
                        .with_font_size(12.0)
                        .with_font_weight(FontWeight::Medium)
                        .with_letter_spacing(1.5),
                ),
        );

    let back = CardSide::new("#1c1c1c")
        .with_element(
            el("tagline", ElementKind::Text, 10.0, 12.0, 80.0, 14.0, 0)
                .with_binding("{{tagline}}")
                .with_styles(
                    ElementStyles::new()
                        .with_color("#f7f4ef")
                        .with_font_size(18.0)
                        .with_text_align(TextAlign::Center),
                ),
        )
        .with_element(
            el("email", ElementKind::Text, 10.0, 40.0, 80.0, 6.0, 0)
                .with_binding("{{email}}")
                .with_styles(ElementStyles::new().with_color("#f7f4ef").with_font_size(12.0)),
        )
        .with_element(
            el("phone", ElementKind::Text, 10.0, 48.0, 80.0, 6.0, 0)
                .with_binding("{{phone}}")
                .with_styles(ElementStyles::new().with_color("#f7f4ef").with_font_size(12.0)),
        )
        .with_element(
            el("website-qr", ElementKind::Qr, 35.0, 62.0, 30.0, 20.0, 1)
                .with_binding("{{companyWebsite}}")
                .with_styles(
                    ElementStyles::new()
                        .with_color("#1c1c1c")
                        .with_background_color("#f7f4ef"),
                ),
        );

    built_in(
        DEFAULT_TEMPLATE_ID,
        "Classic",
        "Portrait on the right, name and role over a dark footer band",
        TemplateCategory::Professional,
    )
    .with_front(front)
    .with_back(back)
}

fn minimal() -> CardTemplate {
    let front = CardSide::new("#ffffff")
        .with_element(
            el("name", ElementKind::Text, 10.0, 40.0, 80.0, 10.0, 0)
                .with_binding("{{fullName}}")
                .with_styles(
                    ElementStyles::new()
                        .with_color("#111111")
                        .with_font_size(24.0)
                        .with_font_weight(FontWeight::Semibold)
                        .with_text_align(TextAlign::Center),
                ),
        )
        .with_element(
            el("rule", ElementKind::Shape, 40.0, 52.0, 20.0, 0.5, 0)
                .with_styles(ElementStyles::new().with_background_color("#111111")),
        )
        .with_element(
            el("role", ElementKind::Text, 10.0, 55.0, 80.0, 6.0, 0)
                .with_binding("{{role}}")
                .with_styles(
                    ElementStyles::new()
                        .with_color("#666666")
                        .with_font_size(12.0)
                        .with_text_align(TextAlign::Center),
                ),
        );

    let back = CardSide::new("#ffffff")
        .with_element(
            el("interests", ElementKind::Text, 10.0, 30.0, 80.0, 10.0, 0)
                .with_binding("{{interests}}")
                .with_styles(
                    ElementStyles::new()
                        .with_color("#333333")
                        .with_font_size(12.0)
                        .with_text_align(TextAlign::Center),
                ),
        )
        .with_element(
            el("links", ElementKind::Text, 10.0, 60.0, 80.0, 10.0, 0)
                .with_binding("{{quickLinks}}")
                .with_styles(
                    ElementStyles::new()
                        .with_color("#333333")
                        .with_font_size(11.0)
                        .with_text_align(TextAlign::Center),
                ),
        );

    built_in(
        "minimal",
        "Minimal",
        "Centered name and role on white",
        TemplateCategory::Minimal,
    )
    .with_front(front)
    .with_back(back)
}

fn spotlight() -> CardTemplate {
    let front = CardSide::new("#20124d")
        .with_element(
            el("backdrop", ElementKind::Image, 0.0, 0.0, 100.0, 100.0, 0)
                .with_binding("{{profileImage}}")
                .with_styles(
                    ElementStyles::new()
                        .with_object_fit(ObjectFit::Cover)
                        .with_grayscale(true)
                        .with_opacity(0.4),
                ),
        )
        .with_element(
            el("logo", ElementKind::Image, 8.0, 6.0, 18.0, 10.0, 2)
                .with_binding("{{companyLogo}}")
                .with_styles(ElementStyles::new().with_object_fit(ObjectFit::Contain)),
        )
        .with_element(
            el("side-name", ElementKind::Text, 84.0, 10.0, 10.0, 80.0, 2)
                .with_binding("{{fullName}}")
                .with_styles(
                    ElementStyles::new()
                        .with_color("#ffd966")
                        .with_font_size(26.0)
                        .with_font_weight(FontWeight::Bold)
                        .with_writing_mode(WritingMode::VerticalRl),
                ),
        )
        .with_element(
            el("cta-pill", ElementKind::Shape, 8.0, 82.0, 50.0, 9.0, 1).with_styles(
                ElementStyles::new()
                    .with_background_color("#ffd966")
                    .with_border_radius(18.0),
            ),
        )
        .with_element(
            el("cta", ElementKind::Text, 8.0, 84.0, 50.0, 5.0, 2)
                .with_binding("{{ctaText}}")
                .with_styles(
                    ElementStyles::new()
                        .with_color("#20124d")
                        .with_font_size(13.0)
                        .with_font_weight(FontWeight::Semibold)
                        .with_text_align(TextAlign::Center),
                ),
        );

    let back = CardSide::new("#ffd966")
        .with_element(
            el("bio", ElementKind::Text, 10.0, 10.0, 80.0, 50.0, 0)
                .with_binding("{{bio}}")
                .with_styles(ElementStyles::new().with_color("#20124d").with_font_size(13.0)),
        )
        .with_element(
            el("mail-icon", ElementKind::Icon, 10.0, 70.0, 8.0, 5.0, 0)
                .with_content("mail")
                .with_styles(ElementStyles::new().with_color("#20124d").with_font_size(16.0)),
        )
        .with_element(
            el("email", ElementKind::Text, 20.0, 70.0, 70.0, 5.0, 0)
                .with_binding("{{email}}")
                .with_styles(ElementStyles::new().with_color("#20124d").with_font_size(12.0)),
        );

    built_in(
        "spotlight",
        "Spotlight",
        "Full-bleed portrait with vertical name and call to action",
        TemplateCategory::Creative,
    )
    .with_front(front)
    .with_back(back)
}

/// All built-in templates, default first
pub fn builtin_templates() -> Vec<CardTemplate> {
    vec![classic(), minimal(), spotlight()]
}

/// The template used when nothing else can be loaded
pub fn default_template() -> CardTemplate {
    classic()
}

/// Check whether an id belongs to a built-in template
pub fn is_builtin_id(id: &TemplateId) -> bool {
    builtin_templates().iter().any(|t| &t.id == id)
}
