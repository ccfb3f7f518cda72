//! HTML import support.
//!
//! Parses stored post HTML back into a content-node tree so a
//! published post can be re-opened for editing when its serialized
//! tree is missing. The mapping covers the markup this crate itself
//! generates; foreign elements degrade to unknown blocks.

use scraper::{ElementRef, Html, Node as ScraperNode};

use postup_core::{ContentNode, ListItem, PreviewKind, TextFormat};

/// Parse an HTML fragment into a content-node tree.
///
/// # Example
///
/// ```rust
/// use postup::parse_html;
///
/// let tree = parse_html("<p>Hello <strong>World</strong></p>");
/// assert_eq!(tree.text_content(), "Hello World");
/// ```
pub fn parse_html(html: &str) -> ContentNode {
    let document = Html::parse_fragment(html);
    let mut blocks = Vec::new();

    for child in document.root_element().children() {
        match child.value() {
            ScraperNode::Text(text) => {
                let trimmed = text.text.trim();
                if !trimmed.is_empty() {
                    blocks.push(ContentNode::paragraph(vec![ContentNode::plain_text(
                        trimmed,
                    )]));
                }
            }
            ScraperNode::Element(_) => {
                if let Some(element) = ElementRef::wrap(child) {
                    if let Some(block) = element_to_block(element) {
                        blocks.push(block);
                    }
                }
            }
            _ => {}
        }
    }

    ContentNode::root(blocks)
}

fn element_to_block(element: ElementRef) -> Option<ContentNode> {
    let tag = element.value().name();
    match tag {
        "p" => Some(ContentNode::paragraph(inline_children(element))),

        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level: u8 = tag[1..].parse().unwrap_or(1);
            Some(ContentNode::heading(level, collect_text(element)))
        }

        "blockquote" => Some(ContentNode::quote(collect_text(element))),

        "ul" => Some(list_block(element, false)),
        "ol" => Some(list_block(element, true)),

        "img" => Some(image_node(element)),

        "div"
            if element
                .value()
                .attr("class")
                .is_some_and(|c| c.contains("link-preview-card")) =>
        {
            Some(preview_block(element))
        }

        // Stray inline content at the top level gets wrapped in a
        // paragraph, matching the tree invariant.
        "a" | "strong" | "b" | "em" | "i" | "u" | "del" | "s" | "code" => {
            Some(ContentNode::paragraph(vec![inline_element(element)]))
        }

        _ => {
            let text = collect_text(element);
            if text.trim().is_empty() {
                None
            } else {
                Some(ContentNode::Unknown { text })
            }
        }
    }
}

fn inline_children(element: ElementRef) -> Vec<ContentNode> {
    let mut children = Vec::new();

    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                if !text.text.is_empty() {
                    children.push(ContentNode::plain_text(&*text.text));
                }
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    children.push(inline_element(child_element));
                }
            }
            _ => {}
        }
    }

    children
}

fn inline_element(element: ElementRef) -> ContentNode {
    let text = collect_text(element);
    match element.value().name() {
        "strong" | "b" => ContentNode::formatted_text(text, TextFormat::bold()),
        "em" | "i" => ContentNode::formatted_text(text, TextFormat::italic()),
        "u" => ContentNode::formatted_text(text, TextFormat::underline()),
        "del" | "s" => ContentNode::formatted_text(text, TextFormat::strikethrough()),
        "code" => ContentNode::formatted_text(text, TextFormat::code()),
        "a" => {
            let url = element.value().attr("href").unwrap_or_default();
            match element.value().attr("target") {
                Some(target) => ContentNode::link_with_target(url, text, target),
                None => ContentNode::link(url, text),
            }
        }
        "img" => image_node(element),
        _ => ContentNode::plain_text(text),
    }
}

fn list_block(element: ElementRef, ordered: bool) -> ContentNode {
    let items = element
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|e| e.value().name() == "li")
        .map(|e| ListItem::new(collect_text(e)))
        .collect();
    ContentNode::list(ordered, items)
}

fn image_node(element: ElementRef) -> ContentNode {
    let style = element.value().attr("style").unwrap_or_default();
    let src = element.value().attr("src").unwrap_or_default();
    let alt = element.value().attr("alt").unwrap_or_default();
    let width = style_dimension(style, "width")
        .or_else(|| element.value().attr("width").map(str::to_string))
        .unwrap_or_else(|| "auto".to_string());
    let height = style_dimension(style, "height")
        .or_else(|| element.value().attr("height").map(str::to_string))
        .unwrap_or_else(|| "auto".to_string());
    ContentNode::sized_image(src, alt, width, height)
}

fn preview_block(element: ElementRef) -> ContentNode {
    let url = find_descendant(element, "a")
        .and_then(|a| a.value().attr("href").map(str::to_string))
        .unwrap_or_default();
    let image = find_descendant(element, "img")
        .and_then(|img| img.value().attr("src").map(str::to_string))
        .unwrap_or_default();
    ContentNode::link_preview(url, image, PreviewKind::Text)
}

fn find_descendant<'a>(element: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    element
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == tag)
}

/// Extract a single property value from an inline style string.
fn style_dimension(style: &str, property: &str) -> Option<String> {
    style.split(';').find_map(|declaration| {
        let (name, value) = declaration.split_once(':')?;
        if name.trim() == property {
            Some(value.trim().to_string())
        } else {
            None
        }
    })
}

fn collect_text(element: ElementRef) -> String {
    element.text().collect()
}
