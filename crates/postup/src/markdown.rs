//! Markdown conversions
//!
//! Two independent, stateless conversions between the content-node
//! tree and markdown text. Neither keeps hidden state: a caller that
//! wants to round-trip an edit session keeps the serialized tree and
//! reparses it, rather than relying on markdown as the source of
//! truth. Both directions are lossy at the edges (underline has no
//! markdown form, preview cards flatten to links).

use once_cell::sync::Lazy;
use regex::Regex;

use postup_core::{ContentNode, ListItem, TextFormat};

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.*)$").unwrap());
static QUOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^>\s?(.*)$").unwrap());
static BULLET_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[-*+]\s+(.*)$").unwrap());
static ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\d+[.)]\s+(.*)$").unwrap());
static IMAGE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^!\[([^\]]*)\]\(([^)\s]+)\)\s*$").unwrap());

static INLINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
          (?P<img>   !\[(?P<img_alt>[^\]]*)\]\((?P<img_src>[^)\s]+)\) )
        | (?P<link>  \[(?P<link_text>[^\]]+)\]\((?P<link_url>[^)\s]+)\) )
        | (?P<bold>  \*\*(?P<bold_text>[^*]+)\*\* )
        | (?P<strike> ~~(?P<strike_text>[^~]+)~~ )
        | (?P<em>    _(?P<em_text>[^_]+)_ )
        | (?P<code>  `(?P<code_text>[^`]+)` )
        ",
    )
    .unwrap()
});

/// Serialize a tree to markdown text.
pub fn to_markdown(root: &ContentNode) -> String {
    let mut out = String::with_capacity(256);

    let children: &[ContentNode] = match root {
        ContentNode::Root { children } => children,
        other => std::slice::from_ref(other),
    };

    for child in children {
        write_block(child, &mut out);
    }

    // Trim the trailing block separator.
    while out.ends_with('\n') {
        out.pop();
    }
    out
}

fn write_block(node: &ContentNode, out: &mut String) {
    match node {
        ContentNode::Heading { level, text } => {
            for _ in 0..*level {
                out.push('#');
            }
            out.push(' ');
            out.push_str(text);
            out.push_str("\n\n");
        }

        ContentNode::Quote { text } => {
            for line in text.lines() {
                out.push_str("> ");
                out.push_str(line);
                out.push('\n');
            }
            if text.is_empty() {
                out.push_str(">\n");
            }
            out.push('\n');
        }

        ContentNode::List { ordered, items } => {
            for (i, item) in items.iter().enumerate() {
                if *ordered {
                    out.push_str(&(i + 1).to_string());
                    out.push_str(". ");
                } else {
                    out.push_str("- ");
                }
                out.push_str(&item.text);
                out.push('\n');
            }
            out.push('\n');
        }

        ContentNode::Paragraph { children } => {
            let start_len = out.len();
            for child in children {
                write_inline(child, out);
            }
            if out.len() == start_len {
                return;
            }
            out.push_str("\n\n");
        }

        ContentNode::Image { src, alt, .. } => {
            out.push_str(&format!("![{alt}]({src})\n\n"));
        }

        ContentNode::LinkPreview { url, .. } => {
            // Preview cards flatten to a bare link line.
            out.push_str(&format!("[{url}]({url})\n\n"));
        }

        other => {
            let text = other.text_content();
            if !text.is_empty() {
                out.push_str(&text);
                out.push_str("\n\n");
            }
        }
    }
}

fn write_inline(node: &ContentNode, out: &mut String) {
    match node {
        ContentNode::Text { text, format } => write_formatted(text, *format, out),

        ContentNode::Link { url, text, .. } => {
            out.push_str(&format!("[{text}]({url})"));
        }

        ContentNode::Image { src, alt, .. } => {
            out.push_str(&format!("![{alt}]({src})"));
        }

        other => out.push_str(&other.text_content()),
    }
}

/// Single-wrapper formatting, matching the HTML fallback's precedence.
/// Underline has no markdown form and is written as plain text.
fn write_formatted(text: &str, format: TextFormat, out: &mut String) {
    if format.bold {
        out.push_str(&format!("**{text}**"));
    } else if format.italic {
        out.push_str(&format!("_{text}_"));
    } else if format.underline {
        out.push_str(text);
    } else if format.strikethrough {
        out.push_str(&format!("~~{text}~~"));
    } else if format.code {
        out.push_str(&format!("`{text}`"));
    } else {
        out.push_str(text);
    }
}

/// Parse markdown text into a tree.
///
/// Block structure covers what the composer can represent: headings,
/// quotes, flat list runs, standalone images and paragraphs. Anything
/// else stays paragraph text.
pub fn from_markdown(input: &str) -> ContentNode {
    let mut builder = TreeBuilder::default();

    for line in input.lines() {
        if line.trim().is_empty() {
            builder.flush();
        } else if let Some(caps) = HEADING.captures(line) {
            builder.flush();
            let level = caps[1].len() as u8;
            builder.blocks.push(ContentNode::heading(level, &caps[2]));
        } else if let Some(caps) = IMAGE_LINE.captures(line) {
            builder.flush();
            builder
                .blocks
                .push(ContentNode::sized_image(&caps[2], &caps[1], "auto", "auto"));
        } else if let Some(caps) = QUOTE.captures(line) {
            builder.flush_except_quote();
            builder.quote_lines.push(caps[1].to_string());
        } else if let Some(caps) = BULLET_ITEM.captures(line) {
            builder.push_list_item(false, &caps[1]);
        } else if let Some(caps) = ORDERED_ITEM.captures(line) {
            builder.push_list_item(true, &caps[1]);
        } else {
            builder.flush_except_paragraph();
            builder.paragraph_lines.push(line.to_string());
        }
    }
    builder.flush();

    ContentNode::root(builder.blocks)
}

#[derive(Default)]
struct TreeBuilder {
    blocks: Vec<ContentNode>,
    paragraph_lines: Vec<String>,
    quote_lines: Vec<String>,
    list_items: Vec<ListItem>,
    list_ordered: bool,
}

impl TreeBuilder {
    fn push_list_item(&mut self, ordered: bool, text: &str) {
        if !self.list_items.is_empty() && self.list_ordered != ordered {
            self.flush_list();
        }
        self.flush_paragraph();
        self.flush_quote();
        self.list_ordered = ordered;
        self.list_items.push(ListItem::new(text));
    }

    fn flush(&mut self) {
        self.flush_paragraph();
        self.flush_quote();
        self.flush_list();
    }

    fn flush_except_quote(&mut self) {
        self.flush_paragraph();
        self.flush_list();
    }

    fn flush_except_paragraph(&mut self) {
        self.flush_quote();
        self.flush_list();
    }

    fn flush_paragraph(&mut self) {
        if self.paragraph_lines.is_empty() {
            return;
        }
        let text = self.paragraph_lines.join(" ");
        self.paragraph_lines.clear();
        let children = parse_inlines(&text);
        if !children.is_empty() {
            self.blocks.push(ContentNode::paragraph(children));
        }
    }

    fn flush_quote(&mut self) {
        if self.quote_lines.is_empty() {
            return;
        }
        let text = self.quote_lines.join("\n");
        self.quote_lines.clear();
        self.blocks.push(ContentNode::quote(text));
    }

    fn flush_list(&mut self) {
        if self.list_items.is_empty() {
            return;
        }
        let items = std::mem::take(&mut self.list_items);
        self.blocks.push(ContentNode::list(self.list_ordered, items));
    }
}

fn parse_inlines(text: &str) -> Vec<ContentNode> {
    let mut children = Vec::new();
    let mut cursor = 0;

    for caps in INLINE.captures_iter(text) {
        let whole = caps.get(0).expect("alternation always matches something");
        if whole.start() > cursor {
            children.push(ContentNode::plain_text(&text[cursor..whole.start()]));
        }
        cursor = whole.end();

        if caps.name("img").is_some() {
            children.push(ContentNode::sized_image(
                &caps["img_src"],
                &caps["img_alt"],
                "auto",
                "auto",
            ));
        } else if caps.name("link").is_some() {
            children.push(ContentNode::link(&caps["link_url"], &caps["link_text"]));
        } else if caps.name("bold").is_some() {
            children.push(ContentNode::formatted_text(
                &caps["bold_text"],
                TextFormat::bold(),
            ));
        } else if caps.name("strike").is_some() {
            children.push(ContentNode::formatted_text(
                &caps["strike_text"],
                TextFormat::strikethrough(),
            ));
        } else if caps.name("em").is_some() {
            children.push(ContentNode::formatted_text(
                &caps["em_text"],
                TextFormat::italic(),
            ));
        } else if caps.name("code").is_some() {
            children.push(ContentNode::formatted_text(
                &caps["code_text"],
                TextFormat::code(),
            ));
        }
    }

    if cursor < text.len() {
        children.push(ContentNode::plain_text(&text[cursor..]));
    }
    children
}

#[cfg(test)]
mod tests {
    use super::*;
    use postup_core::PreviewKind;

    #[test]
    fn test_heading_to_markdown() {
        let tree = ContentNode::root(vec![ContentNode::heading(2, "Section")]);
        assert_eq!(to_markdown(&tree), "## Section");
    }

    #[test]
    fn test_paragraph_with_formats_to_markdown() {
        let tree = ContentNode::root(vec![ContentNode::paragraph(vec![
            ContentNode::plain_text("a "),
            ContentNode::formatted_text("b", TextFormat::bold()),
            ContentNode::plain_text(" c "),
            ContentNode::formatted_text("d", TextFormat::italic()),
        ])]);
        assert_eq!(to_markdown(&tree), "a **b** c _d_");
    }

    #[test]
    fn test_list_to_markdown() {
        let tree = ContentNode::root(vec![ContentNode::list(
            true,
            vec![ListItem::new("first"), ListItem::new("second")],
        )]);
        assert_eq!(to_markdown(&tree), "1. first\n2. second");
    }

    #[test]
    fn test_quote_to_markdown() {
        let tree = ContentNode::root(vec![ContentNode::quote("wise\nwords")]);
        assert_eq!(to_markdown(&tree), "> wise\n> words");
    }

    #[test]
    fn test_preview_card_flattens_to_link() {
        let tree = ContentNode::root(vec![ContentNode::link_preview(
            "https://example.com",
            "thumb.png",
            PreviewKind::Text,
        )]);
        assert_eq!(
            to_markdown(&tree),
            "[https://example.com](https://example.com)"
        );
    }

    #[test]
    fn test_from_markdown_blocks() {
        let tree = from_markdown("# Title\n\nbody text\n\n- a\n- b\n\n> quoted");
        assert_eq!(
            tree,
            ContentNode::root(vec![
                ContentNode::heading(1, "Title"),
                ContentNode::paragraph(vec![ContentNode::plain_text("body text")]),
                ContentNode::list(false, vec![ListItem::new("a"), ListItem::new("b")]),
                ContentNode::quote("quoted"),
            ])
        );
    }

    #[test]
    fn test_from_markdown_inline_formats() {
        let tree = from_markdown("see **bold** and `code` and [a link](https://example.com)");
        let ContentNode::Root { children } = &tree else {
            panic!("expected root");
        };
        assert_eq!(
            children[0],
            ContentNode::paragraph(vec![
                ContentNode::plain_text("see "),
                ContentNode::formatted_text("bold", TextFormat::bold()),
                ContentNode::plain_text(" and "),
                ContentNode::formatted_text("code", TextFormat::code()),
                ContentNode::plain_text(" and "),
                ContentNode::link("https://example.com", "a link"),
            ])
        );
    }

    #[test]
    fn test_from_markdown_standalone_image() {
        let tree = from_markdown("![alt text](photo.png)");
        assert_eq!(
            tree,
            ContentNode::root(vec![ContentNode::sized_image(
                "photo.png",
                "alt text",
                "auto",
                "auto"
            )])
        );
    }

    #[test]
    fn test_adjacent_paragraph_lines_merge() {
        let tree = from_markdown("line one\nline two");
        assert_eq!(
            tree,
            ContentNode::root(vec![ContentNode::paragraph(vec![
                ContentNode::plain_text("line one line two"),
            ])])
        );
    }

    #[test]
    fn test_simple_document_survives_both_directions() {
        let original = ContentNode::root(vec![
            ContentNode::heading(1, "Title"),
            ContentNode::paragraph(vec![
                ContentNode::plain_text("plain "),
                ContentNode::formatted_text("bold", TextFormat::bold()),
            ]),
            ContentNode::list(false, vec![ListItem::new("item")]),
        ]);
        let reparsed = from_markdown(&to_markdown(&original));
        assert_eq!(reparsed, original);
    }

    #[test]
    fn test_heading_levels_deeper_than_three_clamp() {
        let tree = from_markdown("##### Deep");
        assert_eq!(tree, ContentNode::root(vec![ContentNode::heading(3, "Deep")]));
    }
}
