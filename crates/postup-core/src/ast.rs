//! Content-node tree
//!
//! This module defines the node kinds a rich-text editing session can
//! produce. The tree is the common intermediate format between the
//! editing surface, the HTML renderer and the persisted feed record.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Character-level formatting flags carried by a [`ContentNode::Text`] leaf.
///
/// Flags are not exclusive in the model; the fallback renderer applies
/// at most one of them (see `render`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextFormat {
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub strikethrough: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub code: bool,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

impl TextFormat {
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }

    pub fn italic() -> Self {
        Self {
            italic: true,
            ..Self::default()
        }
    }

    pub fn underline() -> Self {
        Self {
            underline: true,
            ..Self::default()
        }
    }

    pub fn strikethrough() -> Self {
        Self {
            strikethrough: true,
            ..Self::default()
        }
    }

    pub fn code() -> Self {
        Self {
            code: true,
            ..Self::default()
        }
    }

    /// True when no formatting flag is set.
    pub fn is_plain(&self) -> bool {
        !(self.bold || self.italic || self.underline || self.strikethrough || self.code)
    }
}

/// Visual treatment of a link preview card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewKind {
    #[default]
    Text,
    Image,
    Embed,
}

impl PreviewKind {
    fn from_str(s: &str) -> Self {
        match s {
            "image" => PreviewKind::Image,
            "embed" => PreviewKind::Embed,
            _ => PreviewKind::Text,
        }
    }
}

/// A single list entry. List items carry plain text only; nested rich
/// formatting is not supported by the fallback path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub text: String,
}

impl ListItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A node in the document tree.
///
/// The tree has exactly one [`ContentNode::Root`]; its direct children
/// are block-level nodes (Paragraph, Heading, Quote, List, Image,
/// LinkPreview). Text, Link and Image may appear inside a Paragraph.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ContentNode {
    /// Root document container
    Root { children: Vec<ContentNode> },

    /// Paragraph containing inline children
    Paragraph { children: Vec<ContentNode> },

    /// Heading with level (1-3) and plain text content
    Heading { level: u8, text: String },

    /// Block quote with plain text content
    Quote { text: String },

    /// List (ordered or unordered) of plain-text items
    List { ordered: bool, items: Vec<ListItem> },

    /// Text leaf with optional formatting flags
    Text {
        text: String,
        #[serde(skip_serializing_if = "TextFormat::is_plain")]
        format: TextFormat,
    },

    /// Hyperlink leaf; target defaults to `_blank` at render time
    Link {
        url: String,
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        target: Option<String>,
    },

    /// Image leaf; width/height are CSS dimension strings
    Image {
        src: String,
        alt: String,
        width: String,
        height: String,
    },

    /// Link preview card leaf
    LinkPreview {
        url: String,
        image: String,
        kind: PreviewKind,
    },

    /// Catch-all for node kinds this model does not recognize.
    /// Carries whatever plain text could be recovered.
    Unknown { text: String },
}

fn auto_dimension() -> String {
    "auto".to_string()
}

impl ContentNode {
    pub fn root(children: Vec<ContentNode>) -> Self {
        ContentNode::Root { children }
    }

    pub fn paragraph(children: Vec<ContentNode>) -> Self {
        ContentNode::Paragraph { children }
    }

    /// Create a heading; levels outside 1-3 are clamped.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        ContentNode::Heading {
            level: level.clamp(1, 3),
            text: text.into(),
        }
    }

    pub fn quote(text: impl Into<String>) -> Self {
        ContentNode::Quote { text: text.into() }
    }

    pub fn list(ordered: bool, items: Vec<ListItem>) -> Self {
        ContentNode::List { ordered, items }
    }

    pub fn plain_text(text: impl Into<String>) -> Self {
        ContentNode::Text {
            text: text.into(),
            format: TextFormat::default(),
        }
    }

    pub fn formatted_text(text: impl Into<String>, format: TextFormat) -> Self {
        ContentNode::Text {
            text: text.into(),
            format,
        }
    }

    pub fn link(url: impl Into<String>, text: impl Into<String>) -> Self {
        ContentNode::Link {
            url: url.into(),
            text: text.into(),
            target: None,
        }
    }

    pub fn link_with_target(
        url: impl Into<String>,
        text: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        ContentNode::Link {
            url: url.into(),
            text: text.into(),
            target: Some(target.into()),
        }
    }

    /// Create an image with default alt text and auto dimensions.
    pub fn image(src: impl Into<String>) -> Self {
        ContentNode::Image {
            src: src.into(),
            alt: String::new(),
            width: auto_dimension(),
            height: auto_dimension(),
        }
    }

    pub fn sized_image(
        src: impl Into<String>,
        alt: impl Into<String>,
        width: impl Into<String>,
        height: impl Into<String>,
    ) -> Self {
        ContentNode::Image {
            src: src.into(),
            alt: alt.into(),
            width: width.into(),
            height: height.into(),
        }
    }

    pub fn link_preview(
        url: impl Into<String>,
        image: impl Into<String>,
        kind: PreviewKind,
    ) -> Self {
        ContentNode::LinkPreview {
            url: url.into(),
            image: image.into(),
            kind,
        }
    }

    /// Full plain-text content of this node and its descendants,
    /// depth-first, with no injected separators.
    pub fn text_content(&self) -> String {
        match self {
            ContentNode::Root { children } | ContentNode::Paragraph { children } => {
                children.iter().map(|c| c.text_content()).collect()
            }
            ContentNode::Heading { text, .. }
            | ContentNode::Quote { text }
            | ContentNode::Text { text, .. }
            | ContentNode::Link { text, .. }
            | ContentNode::Unknown { text } => text.clone(),
            ContentNode::List { items, .. } => {
                items.iter().map(|i| i.text.as_str()).collect()
            }
            ContentNode::Image { .. } | ContentNode::LinkPreview { .. } => String::new(),
        }
    }

    /// Check if this node carries no visible content. Images and link
    /// previews are never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            ContentNode::Image { .. } | ContentNode::LinkPreview { .. } => false,
            ContentNode::Root { children } | ContentNode::Paragraph { children } => {
                children.iter().all(|c| c.is_empty())
            }
            _ => self.text_content().trim().is_empty(),
        }
    }

    /// Rebuild a node from its serialized JSON form.
    ///
    /// Lenient by contract: unrecognized node kinds become
    /// [`ContentNode::Unknown`] and missing optional fields take their
    /// defaults. Never fails.
    pub fn from_value(value: &Value) -> ContentNode {
        let kind = value.get("type").and_then(Value::as_str).unwrap_or("");

        match kind {
            "root" => ContentNode::Root {
                children: child_nodes(value, "children"),
            },
            "paragraph" => ContentNode::Paragraph {
                children: child_nodes(value, "children"),
            },
            "heading" => ContentNode::Heading {
                level: value
                    .get("level")
                    .and_then(Value::as_u64)
                    .map(|l| (l as u8).clamp(1, 3))
                    .unwrap_or(1),
                text: str_field(value, "text"),
            },
            "quote" => ContentNode::Quote {
                text: str_field(value, "text"),
            },
            "list" => ContentNode::List {
                ordered: value
                    .get("ordered")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
                items: value
                    .get("items")
                    .and_then(Value::as_array)
                    .map(|items| {
                        items
                            .iter()
                            .map(|item| match item {
                                Value::String(s) => ListItem::new(s.clone()),
                                other => ListItem::new(str_field(other, "text")),
                            })
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            "text" => ContentNode::Text {
                text: str_field(value, "text"),
                format: value
                    .get("format")
                    .cloned()
                    .and_then(|f| serde_json::from_value(f).ok())
                    .unwrap_or_default(),
            },
            "link" => ContentNode::Link {
                url: str_field(value, "url"),
                text: str_field(value, "text"),
                target: value
                    .get("target")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            },
            "image" => ContentNode::Image {
                src: str_field(value, "src"),
                alt: str_field(value, "alt"),
                width: str_field_or(value, "width", "auto"),
                height: str_field_or(value, "height", "auto"),
            },
            "link-preview" => ContentNode::LinkPreview {
                url: str_field(value, "url"),
                image: str_field(value, "image"),
                kind: value
                    .get("kind")
                    .and_then(Value::as_str)
                    .map(PreviewKind::from_str)
                    .unwrap_or_default(),
            },
            _ => ContentNode::Unknown {
                text: str_field(value, "text"),
            },
        }
    }
}

fn child_nodes(value: &Value, field: &str) -> Vec<ContentNode> {
    value
        .get(field)
        .and_then(Value::as_array)
        .map(|children| children.iter().map(ContentNode::from_value).collect())
        .unwrap_or_default()
}

fn str_field(value: &Value, field: &str) -> String {
    value
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn str_field_or(value: &Value, field: &str, default: &str) -> String {
    value
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

impl<'de> Deserialize<'de> for ContentNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(ContentNode::from_value(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_content_concatenates_depth_first() {
        let tree = ContentNode::root(vec![
            ContentNode::heading(2, "Title"),
            ContentNode::paragraph(vec![
                ContentNode::plain_text("Hello "),
                ContentNode::formatted_text("World", TextFormat::bold()),
            ]),
        ]);
        assert_eq!(tree.text_content(), "TitleHello World");
    }

    #[test]
    fn test_image_has_no_text_but_is_not_empty() {
        let image = ContentNode::image("photo.png");
        assert_eq!(image.text_content(), "");
        assert!(!image.is_empty());
    }

    #[test]
    fn test_empty_paragraph_is_empty() {
        let tree = ContentNode::root(vec![ContentNode::paragraph(vec![])]);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_json_round_trip() {
        let tree = ContentNode::root(vec![
            ContentNode::paragraph(vec![
                ContentNode::plain_text("see "),
                ContentNode::link("https://example.com", "here"),
            ]),
            ContentNode::list(true, vec![ListItem::new("a"), ListItem::new("b")]),
            ContentNode::link_preview("https://example.com", "thumb.png", PreviewKind::Image),
        ]);
        let json = serde_json::to_string(&tree).unwrap();
        let parsed: ContentNode = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, tree);
    }

    #[test]
    fn test_unknown_type_degrades() {
        let json = r#"{"type":"poll","text":"hello","choices":["a","b"]}"#;
        let parsed: ContentNode = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed,
            ContentNode::Unknown {
                text: "hello".to_string()
            }
        );
    }

    #[test]
    fn test_image_defaults_applied_on_parse() {
        let json = r#"{"type":"image","src":"photo.png"}"#;
        let parsed: ContentNode = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed,
            ContentNode::Image {
                src: "photo.png".to_string(),
                alt: String::new(),
                width: "auto".to_string(),
                height: "auto".to_string(),
            }
        );
    }

    #[test]
    fn test_heading_level_clamped() {
        let json = r#"{"type":"heading","level":6,"text":"Deep"}"#;
        let parsed: ContentNode = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, ContentNode::heading(3, "Deep"));
    }

    #[test]
    fn test_list_items_accept_bare_strings() {
        let json = r#"{"type":"list","ordered":false,"items":["a",{"text":"b"}]}"#;
        let parsed: ContentNode = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed,
            ContentNode::list(false, vec![ListItem::new("a"), ListItem::new("b")])
        );
    }
}
