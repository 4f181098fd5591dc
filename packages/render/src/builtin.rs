//! # Built-in Component Catalog
//!
//! The block vocabulary Blockwork ships with. Every type is a data entry
//! (per-variant schema + defaults) plus a small renderer that reads merged
//! settings and theme tokens. Theme tokens consumed here: `primaryColor`,
//! `textColor`, `fontFamily`.

use crate::{
    BlockRenderer, CatalogSource, ComponentSpec, FieldSpec, RenderContext, RenderNode, SettingKind,
    SettingsSchema, VariantSpec,
};
use blockwork_document::Settings;
use serde_json::{json, Value};

/// Catalog source for the shipped block library.
#[derive(Debug, Default)]
pub struct BuiltinCatalog;

impl CatalogSource for BuiltinCatalog {
    fn list_types(&self) -> Vec<ComponentSpec> {
        vec![
            hero(),
            text_section(),
            image_gallery(),
            services_list(),
            contact_cta(),
            footer(),
        ]
    }
}

fn defaults(value: Value) -> Settings {
    match value {
        Value::Object(map) => map,
        _ => Settings::new(),
    }
}

fn str_setting<'a>(ctx: &'a RenderContext<'_>, key: &str) -> &'a str {
    ctx.settings.get(key).and_then(Value::as_str).unwrap_or("")
}

fn list_setting<'a>(ctx: &'a RenderContext<'_>, key: &str) -> Vec<&'a str> {
    ctx.settings
        .get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

fn block_root(ctx: &RenderContext<'_>, class: &str) -> RenderNode {
    let mut node = RenderNode::element("section")
        .with_attr("class", format!("{class} {class}--{}", ctx.variant))
        .with_entry_id(ctx.entry_id.as_str());
    if let Some(font) = ctx.theme.get_str("fontFamily") {
        node = node.with_style("font-family", font);
    }
    if let Some(color) = ctx.theme.get_str("textColor") {
        node = node.with_style("color", color);
    }
    node
}

fn cta_link(ctx: &RenderContext<'_>, label_key: &str, url_key: &str) -> Option<RenderNode> {
    let label = str_setting(ctx, label_key);
    let url = str_setting(ctx, url_key);
    if label.is_empty() || url.is_empty() {
        return None;
    }
    let mut link = RenderNode::element("a")
        .with_attr("class", "bw-cta")
        .with_attr("href", url)
        .with_child(RenderNode::text(label));
    if let Some(color) = ctx.theme.get_str("primaryColor") {
        link = link.with_style("background-color", color);
    }
    Some(link)
}

// ---------------------------------------------------------------------------
// hero
// ---------------------------------------------------------------------------

fn hero_base_schema() -> SettingsSchema {
    SettingsSchema::new()
        .field("headline", FieldSpec::required(SettingKind::Text))
        .field("subheadline", FieldSpec::optional(SettingKind::Text))
        .field("ctaLabel", FieldSpec::optional(SettingKind::Text))
        .field("ctaUrl", FieldSpec::optional(SettingKind::Url))
        .field(
            "alignment",
            FieldSpec::optional(SettingKind::Select {
                options: vec!["left".into(), "center".into(), "right".into()],
            }),
        )
}

fn hero_base_defaults() -> Value {
    // No ctaUrl default: an optional Url field may be absent, but an empty
    // string would not validate.
    json!({
        "headline": "Welcome",
        "subheadline": "",
        "ctaLabel": "",
        "alignment": "center"
    })
}

fn hero() -> ComponentSpec {
    let plain = VariantSpec::new("plain", hero_base_schema(), defaults(hero_base_defaults()));

    let mut image_defaults = hero_base_defaults();
    image_defaults["imageUrl"] = json!("/assets/hero.jpg");
    image_defaults["overlayOpacity"] = json!(0.4);
    let image = VariantSpec::new(
        "image-background",
        hero_base_schema()
            .field("imageUrl", FieldSpec::required(SettingKind::Url))
            .field(
                "overlayOpacity",
                FieldSpec::optional(SettingKind::Number {
                    min: Some(0.0),
                    max: Some(1.0),
                }),
            ),
        defaults(image_defaults),
    );

    let mut video_defaults = hero_base_defaults();
    video_defaults["videoUrl"] = json!("/assets/hero.mp4");
    video_defaults["autoplay"] = json!(true);
    let video = VariantSpec::new(
        "video-background",
        hero_base_schema()
            .field("videoUrl", FieldSpec::required(SettingKind::Url))
            .field("autoplay", FieldSpec::optional(SettingKind::Toggle)),
        defaults(video_defaults),
    );

    ComponentSpec {
        type_id: "hero".to_string(),
        category: "Headers".to_string(),
        variants: vec![plain, image, video],
        default_variant: "plain".to_string(),
        renderer: Box::new(HeroRenderer),
    }
}

struct HeroRenderer;

impl BlockRenderer for HeroRenderer {
    fn render(&self, ctx: &RenderContext<'_>) -> RenderNode {
        let mut root =
            block_root(ctx, "bw-hero").with_style("text-align", str_setting(ctx, "alignment"));

        match ctx.variant {
            "image-background" => {
                root = root.with_style(
                    "background-image",
                    format!("url({})", str_setting(ctx, "imageUrl")),
                );
            }
            "video-background" => {
                let mut video = RenderNode::element("video")
                    .with_attr("class", "bw-hero__video")
                    .with_attr("src", str_setting(ctx, "videoUrl"))
                    .with_attr("muted", "muted")
                    .with_attr("loop", "loop");
                if ctx
                    .settings
                    .get("autoplay")
                    .and_then(Value::as_bool)
                    .unwrap_or(false)
                {
                    video = video.with_attr("autoplay", "autoplay");
                }
                root = root.with_child(video);
            }
            _ => {}
        }

        root = root.with_child(
            RenderNode::element("h1").with_child(RenderNode::text(str_setting(ctx, "headline"))),
        );

        let sub = str_setting(ctx, "subheadline");
        if !sub.is_empty() {
            root = root.with_child(RenderNode::element("p").with_child(RenderNode::text(sub)));
        }
        if let Some(link) = cta_link(ctx, "ctaLabel", "ctaUrl") {
            root = root.with_child(link);
        }
        root
    }
}

// ---------------------------------------------------------------------------
// text-section
// ---------------------------------------------------------------------------

fn text_section() -> ComponentSpec {
    let schema = SettingsSchema::new()
        .field("title", FieldSpec::optional(SettingKind::Text))
        .field("body", FieldSpec::required(SettingKind::RichText));
    let base = json!({ "title": "", "body": "Write something here." });

    ComponentSpec {
        type_id: "text-section".to_string(),
        category: "Content".to_string(),
        variants: vec![
            VariantSpec::new("default", schema.clone(), defaults(base.clone())),
            VariantSpec::new("two-column", schema, defaults(base)),
        ],
        default_variant: "default".to_string(),
        renderer: Box::new(TextSectionRenderer),
    }
}

struct TextSectionRenderer;

impl BlockRenderer for TextSectionRenderer {
    fn render(&self, ctx: &RenderContext<'_>) -> RenderNode {
        let mut root = block_root(ctx, "bw-text");
        let title = str_setting(ctx, "title");
        if !title.is_empty() {
            root = root
                .with_child(RenderNode::element("h2").with_child(RenderNode::text(title)));
        }
        // Paragraph per blank-line-separated chunk.
        let body = str_setting(ctx, "body");
        let paragraphs = body
            .split("\n\n")
            .filter(|p| !p.trim().is_empty())
            .map(|p| RenderNode::element("p").with_child(RenderNode::text(p.trim())))
            .collect();
        root.with_child(
            RenderNode::element("div")
                .with_attr("class", "bw-text__body")
                .with_children(paragraphs),
        )
    }
}

// ---------------------------------------------------------------------------
// image-gallery
// ---------------------------------------------------------------------------

fn image_gallery() -> ComponentSpec {
    let grid = VariantSpec::new(
        "grid",
        SettingsSchema::new()
            .field("images", FieldSpec::required(SettingKind::StringList))
            .field(
                "columns",
                FieldSpec::optional(SettingKind::Number {
                    min: Some(1.0),
                    max: Some(6.0),
                }),
            ),
        defaults(json!({ "images": [], "columns": 3 })),
    );
    let carousel = VariantSpec::new(
        "carousel",
        SettingsSchema::new()
            .field("images", FieldSpec::required(SettingKind::StringList))
            .field("autoAdvance", FieldSpec::optional(SettingKind::Toggle)),
        defaults(json!({ "images": [], "autoAdvance": false })),
    );

    ComponentSpec {
        type_id: "image-gallery".to_string(),
        category: "Media".to_string(),
        variants: vec![grid, carousel],
        default_variant: "grid".to_string(),
        renderer: Box::new(GalleryRenderer),
    }
}

struct GalleryRenderer;

impl BlockRenderer for GalleryRenderer {
    fn render(&self, ctx: &RenderContext<'_>) -> RenderNode {
        let mut root = block_root(ctx, "bw-gallery");
        if ctx.variant == "grid" {
            let columns = ctx
                .settings
                .get("columns")
                .and_then(Value::as_f64)
                .unwrap_or(3.0);
            root = root.with_style(
                "grid-template-columns",
                format!("repeat({}, 1fr)", columns as u32),
            );
        }
        let images = list_setting(ctx, "images")
            .into_iter()
            .map(|src| {
                RenderNode::element("img")
                    .with_attr("class", "bw-gallery__item")
                    .with_attr("src", src)
                    .with_attr("alt", "")
            })
            .collect();
        root.with_children(images)
    }
}

// ---------------------------------------------------------------------------
// services-list
// ---------------------------------------------------------------------------

fn services_list() -> ComponentSpec {
    let schema = SettingsSchema::new()
        .field("title", FieldSpec::optional(SettingKind::Text))
        .field("items", FieldSpec::required(SettingKind::StringList));

    ComponentSpec {
        type_id: "services-list".to_string(),
        category: "Content".to_string(),
        variants: vec![VariantSpec::new(
            "default",
            schema,
            defaults(json!({ "title": "What we do", "items": [] })),
        )],
        default_variant: "default".to_string(),
        renderer: Box::new(ServicesListRenderer),
    }
}

struct ServicesListRenderer;

impl BlockRenderer for ServicesListRenderer {
    fn render(&self, ctx: &RenderContext<'_>) -> RenderNode {
        let mut root = block_root(ctx, "bw-services");
        let title = str_setting(ctx, "title");
        if !title.is_empty() {
            root = root
                .with_child(RenderNode::element("h2").with_child(RenderNode::text(title)));
        }
        let items = list_setting(ctx, "items")
            .into_iter()
            .map(|item| RenderNode::element("li").with_child(RenderNode::text(item)))
            .collect();
        root.with_child(RenderNode::element("ul").with_children(items))
    }
}

// ---------------------------------------------------------------------------
// contact-cta
// ---------------------------------------------------------------------------

fn contact_cta() -> ComponentSpec {
    let schema = SettingsSchema::new()
        .field("headline", FieldSpec::required(SettingKind::Text))
        .field("buttonLabel", FieldSpec::required(SettingKind::Text))
        .field("buttonUrl", FieldSpec::required(SettingKind::Url));

    ComponentSpec {
        type_id: "contact-cta".to_string(),
        category: "Calls to action".to_string(),
        variants: vec![VariantSpec::new(
            "default",
            schema,
            defaults(json!({
                "headline": "Ready to get started?",
                "buttonLabel": "Contact us",
                "buttonUrl": "/contact"
            })),
        )],
        default_variant: "default".to_string(),
        renderer: Box::new(ContactCtaRenderer),
    }
}

struct ContactCtaRenderer;

impl BlockRenderer for ContactCtaRenderer {
    fn render(&self, ctx: &RenderContext<'_>) -> RenderNode {
        let mut root = block_root(ctx, "bw-contact-cta").with_child(
            RenderNode::element("h2").with_child(RenderNode::text(str_setting(ctx, "headline"))),
        );
        if let Some(link) = cta_link(ctx, "buttonLabel", "buttonUrl") {
            root = root.with_child(link);
        }
        root
    }
}

// ---------------------------------------------------------------------------
// footer
// ---------------------------------------------------------------------------

fn footer() -> ComponentSpec {
    let simple = VariantSpec::new(
        "simple",
        SettingsSchema::new().field("copyright", FieldSpec::required(SettingKind::Text)),
        defaults(json!({ "copyright": "© Blockwork" })),
    );
    let detailed = VariantSpec::new(
        "detailed",
        SettingsSchema::new()
            .field("copyright", FieldSpec::required(SettingKind::Text))
            .field("links", FieldSpec::optional(SettingKind::StringList)),
        defaults(json!({ "copyright": "© Blockwork", "links": [] })),
    );

    ComponentSpec {
        type_id: "footer".to_string(),
        category: "Footers".to_string(),
        variants: vec![simple, detailed],
        default_variant: "simple".to_string(),
        renderer: Box::new(FooterRenderer),
    }
}

struct FooterRenderer;

impl BlockRenderer for FooterRenderer {
    fn render(&self, ctx: &RenderContext<'_>) -> RenderNode {
        let mut root = block_root(ctx, "bw-footer");
        if ctx.variant == "detailed" {
            let links = list_setting(ctx, "links")
                .into_iter()
                .map(|label| RenderNode::element("li").with_child(RenderNode::text(label)))
                .collect();
            root = root.with_child(
                RenderNode::element("ul")
                    .with_attr("class", "bw-footer__links")
                    .with_children(links),
            );
        }
        root.with_child(
            RenderNode::element("small")
                .with_child(RenderNode::text(str_setting(ctx, "copyright"))),
        )
    }
}
