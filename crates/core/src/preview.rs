//! HTML preview of a page as the builder canvas shows it.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::block::{BlockContent, ContentBlock};
use crate::document::PageDocument;

/// Canvas width presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewport {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl Viewport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Viewport::Desktop => "desktop",
            Viewport::Tablet => "tablet",
            Viewport::Mobile => "mobile",
        }
    }

    pub fn width(&self) -> &'static str {
        match self {
            Viewport::Desktop => "100%",
            Viewport::Tablet => "768px",
            Viewport::Mobile => "375px",
        }
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render one block to an HTML fragment.
///
/// Text and HTML blocks carry author-supplied markup and are emitted as is;
/// every other string is escaped.
pub fn render_block(block: &ContentBlock) -> String {
    let mut html = String::new();
    let inner = render_content(&block.content);

    let mut class = format!("block block-{}", block.block_type());
    for extra in [&block.settings.padding, &block.settings.margin, &block.settings.class_name]
        .into_iter()
        .flatten()
    {
        class.push(' ');
        class.push_str(extra);
    }
    let _ = write!(
        html,
        "<section id=\"{}\" class=\"{}\"",
        escape(block.id.as_str()),
        escape(&class)
    );
    if let Some(color) = &block.settings.background_color {
        let _ = write!(html, " style=\"background-color: {}\"", escape(color));
    }
    if let Some(animation) = &block.settings.animation {
        let _ = write!(html, " data-animation=\"{}\"", escape(animation));
    }
    let _ = write!(html, ">{inner}</section>");
    html
}

fn render_content(content: &BlockContent) -> String {
    match content {
        BlockContent::Hero(c) => format!(
            "<h1>{}</h1><p>{}</p><a class=\"button\" href=\"{}\">{}</a>",
            escape(&c.title),
            escape(&c.subtitle),
            escape(&c.button_link),
            escape(&c.button_text)
        ),
        BlockContent::Text(c) => format!(
            "<div style=\"text-align: {}\">{}</div>",
            escape(&c.alignment),
            c.content
        ),
        BlockContent::Image(c) if c.src.is_empty() => {
            "<div class=\"placeholder\">No image selected</div>".to_string()
        }
        BlockContent::Image(c) => {
            let mut out = format!(
                "<figure><img src=\"{}\" alt=\"{}\">",
                escape(&c.src),
                escape(&c.alt)
            );
            if !c.caption.is_empty() {
                let _ = write!(out, "<figcaption>{}</figcaption>", escape(&c.caption));
            }
            out.push_str("</figure>");
            out
        }
        BlockContent::Video(c) => format!(
            "<div class=\"video\" data-provider=\"{}\" data-src=\"{}\"{}{}></div>",
            escape(&c.provider),
            escape(&c.url),
            if c.autoplay { " data-autoplay" } else { "" },
            if c.muted { " data-muted" } else { "" }
        ),
        BlockContent::Gallery(c) => {
            let images: String = c
                .images
                .iter()
                .map(|img| {
                    format!("<img src=\"{}\" alt=\"{}\">", escape(&img.src), escape(&img.alt))
                })
                .collect();
            format!("<div class=\"gallery cols-{}\">{images}</div>", c.columns)
        }
        BlockContent::Cta(c) => format!(
            "<h2>{}</h2><p>{}</p><a class=\"button {}\" href=\"{}\">{}</a>",
            escape(&c.title),
            escape(&c.description),
            escape(&c.style),
            escape(&c.button_link),
            escape(&c.button_text)
        ),
        BlockContent::Features(c) => {
            let items: String = c
                .items
                .iter()
                .map(|i| {
                    format!(
                        "<li><h3>{}</h3><p>{}</p></li>",
                        escape(&i.title),
                        escape(&i.description)
                    )
                })
                .collect();
            format!("<h2>{}</h2><ul class=\"cols-{}\">{items}</ul>", escape(&c.title), c.columns)
        }
        BlockContent::Testimonials(c) => {
            let items: String = c
                .items
                .iter()
                .map(|t| {
                    format!(
                        "<blockquote>{}<cite>{}, {}</cite></blockquote>",
                        escape(&t.quote),
                        escape(&t.name),
                        escape(&t.role)
                    )
                })
                .collect();
            format!("<h2>{}</h2>{items}", escape(&c.title))
        }
        BlockContent::Pricing(c) => {
            let plans: String = c
                .plans
                .iter()
                .map(|p| {
                    let features: String =
                        p.features.iter().map(|f| format!("<li>{}</li>", escape(f))).collect();
                    format!(
                        "<div class=\"plan{}\"><h3>{}</h3><p>{}</p><ul>{features}</ul><a class=\"button\">{}</a></div>",
                        if p.highlighted { " highlighted" } else { "" },
                        escape(&p.name),
                        escape(&p.price),
                        escape(&p.cta)
                    )
                })
                .collect();
            format!("<h2>{}</h2>{plans}", escape(&c.title))
        }
        BlockContent::Faq(c) => {
            let items: String = c
                .items
                .iter()
                .map(|i| {
                    format!(
                        "<details><summary>{}</summary><p>{}</p></details>",
                        escape(&i.question),
                        escape(&i.answer)
                    )
                })
                .collect();
            format!("<h2>{}</h2>{items}", escape(&c.title))
        }
        BlockContent::Contact(c) => {
            let fields: String = c
                .fields
                .iter()
                .map(|f| format!("<label>{0}<input name=\"{0}\"></label>", escape(f)))
                .collect();
            format!(
                "<h2>{}</h2><form>{fields}<button>{}</button></form>",
                escape(&c.title),
                escape(&c.submit_text)
            )
        }
        BlockContent::Code(c) => format!(
            "<pre class=\"language-{}{}\"><code>{}</code></pre>",
            escape(&c.language),
            if c.show_line_numbers { " line-numbers" } else { "" },
            escape(&c.code)
        ),
        BlockContent::Columns(c) => {
            let columns: String = c
                .content
                .iter()
                .map(|col| format!("<div class=\"column\" data-items=\"{}\"></div>", col.len()))
                .collect();
            format!(
                "<div class=\"columns cols-{} gap-{}\">{columns}</div>",
                c.columns,
                escape(&c.gap)
            )
        }
        BlockContent::Divider(c) => format!(
            "<hr class=\"{}\" style=\"border-color: {}\">",
            escape(&c.style),
            escape(&c.color)
        ),
        BlockContent::Spacer(c) => format!("<div style=\"height: {}\"></div>", escape(&c.height)),
        BlockContent::Html(c) => c.html.clone(),
    }
}

/// Render the visible blocks of a page in order.
pub fn render_page(doc: &PageDocument) -> String {
    doc.visible_blocks().map(render_block).collect()
}

/// The page inside a canvas frame sized for `viewport`.
pub fn render_canvas(doc: &PageDocument, viewport: Viewport) -> String {
    format!(
        "<div class=\"canvas canvas-{}\" style=\"width: {}; margin: 0 auto\">{}</div>",
        viewport.as_str(),
        viewport.width(),
        render_page(doc)
    )
}
