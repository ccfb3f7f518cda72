//! Fallback tree-to-HTML rendering
//!
//! Projects a content-node tree into an HTML fragment string plus the
//! plain-text concatenation of its leaves. This is the degraded path
//! used when the host editor's native exporter does not recognize the
//! custom leaf kinds; it deliberately drops nested formatting
//! combinations instead of attempting recursive format stacking.

use crate::ast::{ContentNode, ListItem, TextFormat};
use crate::options::RenderOptions;

/// Output of [`render`]: the same content as markup and as plain text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rendered {
    pub html: String,
    pub text: String,
}

/// Render a document tree to HTML and plain text.
///
/// Pure and infallible: unrecognized block kinds degrade to a plain
/// paragraph (or nothing when their text is empty), and an empty tree
/// yields empty strings. Output contains no generated ids or
/// timestamps, so rendering the same tree twice is byte-identical.
pub fn render(root: &ContentNode, options: &RenderOptions) -> Rendered {
    let text = root.text_content();

    let mut html = String::with_capacity(256);
    match root {
        ContentNode::Root { children } => {
            for child in children {
                render_block(child, options, &mut html);
            }
        }
        // A bare block is treated as a one-child document.
        other => render_block(other, options, &mut html),
    }

    Rendered { html, text }
}

fn render_block(node: &ContentNode, options: &RenderOptions, out: &mut String) {
    match node {
        ContentNode::Image {
            src,
            alt,
            width,
            height,
        } => push_image(src, alt, width, height, out),

        ContentNode::LinkPreview { url, image, .. } => {
            push_preview_card(url, image, options, out)
        }

        ContentNode::Paragraph { children } => {
            let mut inner = String::new();
            for child in children {
                render_inline(child, options, &mut inner);
            }
            if !inner.is_empty() {
                out.push_str("<p>");
                out.push_str(&inner);
                out.push_str("</p>");
            }
        }

        ContentNode::Heading { level, text } => {
            out.push_str(&format!("<h{level}>{text}</h{level}>"));
        }

        ContentNode::Quote { text } => {
            out.push_str("<blockquote>");
            out.push_str(text);
            out.push_str("</blockquote>");
        }

        ContentNode::List { ordered, items } => render_list(*ordered, items, out),

        // Anything else is projected to a plain paragraph, or dropped
        // when it carries no text.
        other => {
            let text = other.text_content();
            if !text.is_empty() {
                out.push_str("<p>");
                out.push_str(&text);
                out.push_str("</p>");
            }
        }
    }
}

fn render_inline(node: &ContentNode, options: &RenderOptions, out: &mut String) {
    match node {
        ContentNode::Image {
            src,
            alt,
            width,
            height,
        } => push_image(src, alt, width, height, out),

        ContentNode::Link { url, text, target } => {
            let target = target.as_deref().unwrap_or("_blank");
            let rel = if target == "_blank" {
                "noopener noreferrer"
            } else {
                ""
            };
            out.push_str(&format!(
                "<a href=\"{url}\" target=\"{target}\" rel=\"{rel}\" class=\"{}\">{text}</a>",
                options.link_class
            ));
        }

        other => {
            let text = other.text_content();
            let format = match other {
                ContentNode::Text { format, .. } => *format,
                _ => TextFormat::default(),
            };
            push_formatted_text(&text, format, options, out);
        }
    }
}

/// Wrap text in at most one format tag, chosen by fixed precedence.
/// A node carrying several flags renders with the first match only;
/// the fallback path does not combine formats.
fn push_formatted_text(text: &str, format: TextFormat, options: &RenderOptions, out: &mut String) {
    if format.bold {
        out.push_str(&format!("<strong>{text}</strong>"));
    } else if format.italic {
        out.push_str(&format!("<em>{text}</em>"));
    } else if format.underline {
        out.push_str(&format!("<u>{text}</u>"));
    } else if format.strikethrough {
        out.push_str(&format!("<del>{text}</del>"));
    } else if format.code {
        out.push_str(&format!("<code class=\"{}\">{text}</code>", options.code_class));
    } else {
        out.push_str(text);
    }
}

fn render_list(ordered: bool, items: &[ListItem], out: &mut String) {
    let tag = if ordered { "ol" } else { "ul" };
    out.push('<');
    out.push_str(tag);
    out.push('>');
    for item in items {
        out.push_str("<li>");
        out.push_str(&item.text);
        out.push_str("</li>");
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn push_image(src: &str, alt: &str, width: &str, height: &str, out: &mut String) {
    out.push_str(&format!(
        "<img src=\"{src}\" alt=\"{alt}\" style=\"width:{width};height:{height};max-width:100%;\" />"
    ));
}

fn push_preview_card(url: &str, image: &str, options: &RenderOptions, out: &mut String) {
    let thumb = options.preview_thumb;
    out.push_str(&format!(
        "<div class=\"{card}\"><a href=\"{url}\" target=\"_blank\" rel=\"noopener noreferrer\">\
<img src=\"{image}\" alt=\"preview\" style=\"width:{thumb}px;height:{thumb}px;margin-right:8px;\" />\
{url}</a></div>",
        card = options.preview_card_class
    ));
}
