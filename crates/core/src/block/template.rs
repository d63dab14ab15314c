//! Static catalog of block types and their starting payloads.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::content::*;

/// The closed set of block types a page can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Hero,
    Text,
    Image,
    Video,
    Gallery,
    Cta,
    Features,
    Testimonials,
    Pricing,
    Faq,
    Contact,
    Code,
    Columns,
    Divider,
    Spacer,
    Html,
}

impl BlockType {
    /// Every block type, in block-picker order.
    pub const ALL: [BlockType; 16] = [
        BlockType::Hero,
        BlockType::Text,
        BlockType::Image,
        BlockType::Video,
        BlockType::Gallery,
        BlockType::Cta,
        BlockType::Features,
        BlockType::Testimonials,
        BlockType::Pricing,
        BlockType::Faq,
        BlockType::Contact,
        BlockType::Code,
        BlockType::Columns,
        BlockType::Divider,
        BlockType::Spacer,
        BlockType::Html,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Hero => "hero",
            BlockType::Text => "text",
            BlockType::Image => "image",
            BlockType::Video => "video",
            BlockType::Gallery => "gallery",
            BlockType::Cta => "cta",
            BlockType::Features => "features",
            BlockType::Testimonials => "testimonials",
            BlockType::Pricing => "pricing",
            BlockType::Faq => "faq",
            BlockType::Contact => "contact",
            BlockType::Code => "code",
            BlockType::Columns => "columns",
            BlockType::Divider => "divider",
            BlockType::Spacer => "spacer",
            BlockType::Html => "html",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display metadata for one block type. Immutable for the life of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockTemplate {
    pub block_type: BlockType,
    pub name: &'static str,
    /// Icon reference understood by the picker UI.
    pub icon: &'static str,
}

static TEMPLATES: [BlockTemplate; 16] = [
    BlockTemplate { block_type: BlockType::Hero, name: "Hero Section", icon: "layout" },
    BlockTemplate { block_type: BlockType::Text, name: "Text Block", icon: "type" },
    BlockTemplate { block_type: BlockType::Image, name: "Image", icon: "image" },
    BlockTemplate { block_type: BlockType::Video, name: "Video", icon: "video" },
    BlockTemplate { block_type: BlockType::Gallery, name: "Gallery", icon: "columns" },
    BlockTemplate { block_type: BlockType::Cta, name: "Call to Action", icon: "link" },
    BlockTemplate { block_type: BlockType::Features, name: "Features", icon: "list" },
    BlockTemplate { block_type: BlockType::Testimonials, name: "Testimonials", icon: "quote" },
    BlockTemplate { block_type: BlockType::Pricing, name: "Pricing", icon: "table" },
    BlockTemplate { block_type: BlockType::Faq, name: "FAQ", icon: "list" },
    BlockTemplate { block_type: BlockType::Contact, name: "Contact Form", icon: "layout" },
    BlockTemplate { block_type: BlockType::Code, name: "Code Block", icon: "code" },
    BlockTemplate { block_type: BlockType::Columns, name: "Columns", icon: "columns" },
    BlockTemplate { block_type: BlockType::Divider, name: "Divider", icon: "layout" },
    BlockTemplate { block_type: BlockType::Spacer, name: "Spacer", icon: "layout" },
    BlockTemplate { block_type: BlockType::Html, name: "Custom HTML", icon: "code" },
];

/// Look up the template of a block type. Total over [`BlockType`].
pub fn template_for(block_type: BlockType) -> &'static BlockTemplate {
    // TEMPLATES is declared in `BlockType` discriminant order.
    &TEMPLATES[block_type as usize]
}

impl BlockTemplate {
    /// The payload a freshly added block of this type starts with.
    pub fn default_content(&self) -> BlockContent {
        match self.block_type {
            BlockType::Hero => BlockContent::Hero(HeroContent {
                title: "Welcome to Our Site".into(),
                subtitle: "Discover amazing features".into(),
                button_text: "Get Started".into(),
                button_link: "#".into(),
                background_image: String::new(),
                alignment: "center".into(),
            }),
            BlockType::Text => BlockContent::Text(TextContent {
                content: "<p>Enter your text here...</p>".into(),
                alignment: "left".into(),
            }),
            BlockType::Image => BlockContent::Image(ImageContent {
                src: String::new(),
                alt: String::new(),
                caption: String::new(),
                size: "full".into(),
            }),
            BlockType::Video => BlockContent::Video(VideoContent {
                url: String::new(),
                provider: "youtube".into(),
                autoplay: false,
                muted: false,
            }),
            BlockType::Gallery => BlockContent::Gallery(GalleryContent {
                images: Vec::new(),
                columns: 3,
                gap: "md".into(),
                lightbox: true,
            }),
            BlockType::Cta => BlockContent::Cta(CtaContent {
                title: "Ready to get started?".into(),
                description: "Join thousands of satisfied customers".into(),
                button_text: "Sign Up Now".into(),
                button_link: "/register".into(),
                style: "primary".into(),
            }),
            BlockType::Features => BlockContent::Features(FeaturesContent {
                title: "Our Features".into(),
                items: vec![
                    feature("star", "Feature 1", "Description 1"),
                    feature("shield", "Feature 2", "Description 2"),
                    feature("zap", "Feature 3", "Description 3"),
                ],
                columns: 3,
            }),
            BlockType::Testimonials => BlockContent::Testimonials(TestimonialsContent {
                title: "What Our Customers Say".into(),
                items: vec![Testimonial {
                    name: "John Doe".into(),
                    role: "CEO".into(),
                    quote: "Amazing service!".into(),
                    avatar: String::new(),
                }],
                style: "cards".into(),
            }),
            BlockType::Pricing => BlockContent::Pricing(PricingContent {
                title: "Choose Your Plan".into(),
                plans: vec![
                    PricingPlan {
                        name: "Basic".into(),
                        price: "$9/mo".into(),
                        features: vec!["Feature 1".into(), "Feature 2".into()],
                        cta: "Get Started".into(),
                        highlighted: false,
                    },
                    PricingPlan {
                        name: "Pro".into(),
                        price: "$29/mo".into(),
                        features: vec!["Feature 1".into(), "Feature 2".into(), "Feature 3".into()],
                        cta: "Get Started".into(),
                        highlighted: true,
                    },
                ],
            }),
            BlockType::Faq => BlockContent::Faq(FaqContent {
                title: "Frequently Asked Questions".into(),
                items: vec![
                    FaqItem { question: "Question 1?".into(), answer: "Answer 1".into() },
                    FaqItem { question: "Question 2?".into(), answer: "Answer 2".into() },
                ],
            }),
            BlockType::Contact => BlockContent::Contact(ContactContent {
                title: "Contact Us".into(),
                fields: vec!["name".into(), "email".into(), "message".into()],
                submit_text: "Send Message".into(),
                recipient_email: String::new(),
            }),
            BlockType::Code => BlockContent::Code(CodeContent {
                code: String::new(),
                language: "javascript".into(),
                show_line_numbers: true,
            }),
            BlockType::Columns => BlockContent::Columns(ColumnsContent {
                columns: 2,
                gap: "md".into(),
                content: vec![Vec::<Value>::new(), Vec::new()],
            }),
            BlockType::Divider => BlockContent::Divider(DividerContent {
                style: "line".into(),
                color: "#e5e7eb".into(),
            }),
            BlockType::Spacer => BlockContent::Spacer(SpacerContent { height: "40px".into() }),
            BlockType::Html => BlockContent::Html(HtmlContent { html: String::new() }),
        }
    }
}

fn feature(icon: &str, title: &str, description: &str) -> FeatureItem {
    FeatureItem {
        icon: icon.into(),
        title: title.into(),
        description: description.into(),
    }
}

/// One entry of the "add block" picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockTypeInfo {
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub display_name: String,
    pub icon_ref: String,
}

/// The block picker catalog, in display order.
pub fn list_block_types() -> Vec<BlockTypeInfo> {
    BlockType::ALL
        .iter()
        .map(|&block_type| {
            let template = template_for(block_type);
            BlockTypeInfo {
                block_type,
                display_name: template.name.to_string(),
                icon_ref: template.icon.to_string(),
            }
        })
        .collect()
}
