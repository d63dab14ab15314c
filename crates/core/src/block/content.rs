//! Typed block payloads.
//!
//! Each block type owns one payload struct; the JSON shape is camelCase and
//! rejects unknown keys, so a payload can never drift away from its type.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::template::BlockType;
use crate::document::id::BlockId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HeroContent {
    pub title: String,
    pub subtitle: String,
    pub button_text: String,
    pub button_link: String,
    pub background_image: String,
    pub alignment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TextContent {
    /// Raw HTML body, opaque to the builder.
    pub content: String,
    pub alignment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ImageContent {
    pub src: String,
    pub alt: String,
    pub caption: String,
    pub size: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VideoContent {
    pub url: String,
    /// Hosting provider, e.g. `youtube` or `vimeo`.
    #[serde(rename = "type")]
    pub provider: String,
    pub autoplay: bool,
    pub muted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GalleryImage {
    pub src: String,
    #[serde(default)]
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GalleryContent {
    pub images: Vec<GalleryImage>,
    pub columns: u32,
    pub gap: String,
    pub lightbox: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CtaContent {
    pub title: String,
    pub description: String,
    pub button_text: String,
    pub button_link: String,
    pub style: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FeatureItem {
    pub icon: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FeaturesContent {
    pub title: String,
    pub items: Vec<FeatureItem>,
    pub columns: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Testimonial {
    pub name: String,
    pub role: String,
    pub quote: String,
    #[serde(default)]
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TestimonialsContent {
    pub title: String,
    pub items: Vec<Testimonial>,
    pub style: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PricingPlan {
    pub name: String,
    pub price: String,
    pub features: Vec<String>,
    pub cta: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PricingContent {
    pub title: String,
    pub plans: Vec<PricingPlan>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FaqContent {
    pub title: String,
    pub items: Vec<FaqItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ContactContent {
    pub title: String,
    pub fields: Vec<String>,
    pub submit_text: String,
    pub recipient_email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CodeContent {
    pub code: String,
    pub language: String,
    pub show_line_numbers: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ColumnsContent {
    pub columns: u32,
    pub gap: String,
    /// One opaque payload list per column.
    pub content: Vec<Vec<Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DividerContent {
    pub style: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SpacerContent {
    pub height: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HtmlContent {
    pub html: String,
}

/// Payload of a content block, one variant per [`BlockType`].
#[derive(Debug, Clone, PartialEq)]
pub enum BlockContent {
    Hero(HeroContent),
    Text(TextContent),
    Image(ImageContent),
    Video(VideoContent),
    Gallery(GalleryContent),
    Cta(CtaContent),
    Features(FeaturesContent),
    Testimonials(TestimonialsContent),
    Pricing(PricingContent),
    Faq(FaqContent),
    Contact(ContactContent),
    Code(CodeContent),
    Columns(ColumnsContent),
    Divider(DividerContent),
    Spacer(SpacerContent),
    Html(HtmlContent),
}

/// A payload that does not match the shape of its block type.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid {block_type} content: {reason}")]
pub struct ContentShapeError {
    pub block_type: BlockType,
    pub reason: String,
}

impl BlockContent {
    pub fn block_type(&self) -> BlockType {
        match self {
            BlockContent::Hero(_) => BlockType::Hero,
            BlockContent::Text(_) => BlockType::Text,
            BlockContent::Image(_) => BlockType::Image,
            BlockContent::Video(_) => BlockType::Video,
            BlockContent::Gallery(_) => BlockType::Gallery,
            BlockContent::Cta(_) => BlockType::Cta,
            BlockContent::Features(_) => BlockType::Features,
            BlockContent::Testimonials(_) => BlockType::Testimonials,
            BlockContent::Pricing(_) => BlockType::Pricing,
            BlockContent::Faq(_) => BlockType::Faq,
            BlockContent::Contact(_) => BlockType::Contact,
            BlockContent::Code(_) => BlockType::Code,
            BlockContent::Columns(_) => BlockType::Columns,
            BlockContent::Divider(_) => BlockType::Divider,
            BlockContent::Spacer(_) => BlockType::Spacer,
            BlockContent::Html(_) => BlockType::Html,
        }
    }

    /// Parse a JSON payload as the content of `block_type`.
    pub fn from_value(block_type: BlockType, value: Value) -> Result<Self, ContentShapeError> {
        fn parse<T: serde::de::DeserializeOwned>(
            block_type: BlockType,
            value: Value,
        ) -> Result<T, ContentShapeError> {
            serde_json::from_value(value).map_err(|e| ContentShapeError {
                block_type,
                reason: e.to_string(),
            })
        }

        Ok(match block_type {
            BlockType::Hero => BlockContent::Hero(parse(block_type, value)?),
            BlockType::Text => BlockContent::Text(parse(block_type, value)?),
            BlockType::Image => BlockContent::Image(parse(block_type, value)?),
            BlockType::Video => BlockContent::Video(parse(block_type, value)?),
            BlockType::Gallery => BlockContent::Gallery(parse(block_type, value)?),
            BlockType::Cta => BlockContent::Cta(parse(block_type, value)?),
            BlockType::Features => BlockContent::Features(parse(block_type, value)?),
            BlockType::Testimonials => BlockContent::Testimonials(parse(block_type, value)?),
            BlockType::Pricing => BlockContent::Pricing(parse(block_type, value)?),
            BlockType::Faq => BlockContent::Faq(parse(block_type, value)?),
            BlockType::Contact => BlockContent::Contact(parse(block_type, value)?),
            BlockType::Code => BlockContent::Code(parse(block_type, value)?),
            BlockType::Columns => BlockContent::Columns(parse(block_type, value)?),
            BlockType::Divider => BlockContent::Divider(parse(block_type, value)?),
            BlockType::Spacer => BlockContent::Spacer(parse(block_type, value)?),
            BlockType::Html => BlockContent::Html(parse(block_type, value)?),
        })
    }

    /// The payload as a JSON object.
    pub fn to_value(&self) -> Value {
        let value = match self {
            BlockContent::Hero(c) => serde_json::to_value(c),
            BlockContent::Text(c) => serde_json::to_value(c),
            BlockContent::Image(c) => serde_json::to_value(c),
            BlockContent::Video(c) => serde_json::to_value(c),
            BlockContent::Gallery(c) => serde_json::to_value(c),
            BlockContent::Cta(c) => serde_json::to_value(c),
            BlockContent::Features(c) => serde_json::to_value(c),
            BlockContent::Testimonials(c) => serde_json::to_value(c),
            BlockContent::Pricing(c) => serde_json::to_value(c),
            BlockContent::Faq(c) => serde_json::to_value(c),
            BlockContent::Contact(c) => serde_json::to_value(c),
            BlockContent::Code(c) => serde_json::to_value(c),
            BlockContent::Columns(c) => serde_json::to_value(c),
            BlockContent::Divider(c) => serde_json::to_value(c),
            BlockContent::Spacer(c) => serde_json::to_value(c),
            BlockContent::Html(c) => serde_json::to_value(c),
        };
        // Plain structs of strings, numbers and vectors always serialize.
        value.unwrap_or_else(|_| Value::Object(Map::new()))
    }

    /// Shallow-merge `patch` keys over this payload, re-validating the result.
    pub fn merged(&self, patch: &Map<String, Value>) -> Result<Self, ContentShapeError> {
        let mut value = self.to_value();
        if let Value::Object(fields) = &mut value {
            for (key, v) in patch {
                fields.insert(key.clone(), v.clone());
            }
        }
        Self::from_value(self.block_type(), value)
    }
}

/// Display settings shared by every block type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSettings {
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<String>,
}

impl Default for BlockSettings {
    fn default() -> Self {
        Self {
            visible: true,
            class_name: None,
            padding: Some("medium".to_string()),
            margin: None,
            background_color: None,
            animation: None,
        }
    }
}

/// One addressable unit of page content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBlock", into = "RawBlock")]
pub struct ContentBlock {
    pub id: BlockId,
    pub content: BlockContent,
    pub settings: BlockSettings,
}

impl ContentBlock {
    pub fn block_type(&self) -> BlockType {
        self.content.block_type()
    }
}

/// Wire shape of a block: `type` and `content` as sibling keys.
#[derive(Serialize, Deserialize)]
struct RawBlock {
    id: BlockId,
    #[serde(rename = "type")]
    block_type: BlockType,
    content: Value,
    settings: BlockSettings,
}

impl TryFrom<RawBlock> for ContentBlock {
    type Error = ContentShapeError;

    fn try_from(raw: RawBlock) -> Result<Self, Self::Error> {
        Ok(Self {
            id: raw.id,
            content: BlockContent::from_value(raw.block_type, raw.content)?,
            settings: raw.settings,
        })
    }
}

impl From<ContentBlock> for RawBlock {
    fn from(block: ContentBlock) -> Self {
        Self {
            id: block.id,
            block_type: block.content.block_type(),
            content: block.content.to_value(),
            settings: block.settings,
        }
    }
}
