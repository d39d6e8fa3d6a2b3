use log::debug;

use crate::block::{BlockType, Span, SpanKind};
use crate::error::{RenderError, Result};
use crate::inline::tokenize;
use crate::node::Node;
use crate::parser::{classify, ordered_item, split_into_blocks};

/// Render a whole markdown document into a single `div`.
pub fn render_document(markdown: &str) -> Result<Node> {
    let markdown = markdown.replace("\r\n", "\n");
    let children = split_into_blocks(&markdown)
        .into_iter()
        .map(|block| {
            let block_type = classify(block);
            debug!("{block_type:?} block: {:?}", first_line(block));
            render_block(block, block_type)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Node::parent("div", children))
}

/// Pull the title out of the document's first line, which must be `# ...`.
pub fn extract_title(markdown: &str) -> Result<String> {
    first_line(markdown)
        .strip_prefix("# ")
        .map(|title| title.trim().to_string())
        .ok_or(RenderError::MissingTitle)
}

/// Convert one classified block into its HTML element.
pub fn render_block(block: &str, block_type: BlockType) -> Result<Node> {
    match block_type {
        BlockType::Heading => {
            let level = block.bytes().take_while(|&b| b == b'#').count().clamp(1, 6);
            let prefix = format!("{} ", "#".repeat(level));
            let text = block.strip_prefix(prefix.as_str()).unwrap_or(block);
            Ok(Node::parent(format!("h{level}"), inline_nodes(text)?))
        }
        BlockType::Code => {
            let code = block.replace("```", "");
            let code = code.strip_prefix('\n').unwrap_or(&code);
            Ok(Node::parent("pre", vec![Node::leaf("code", code)]))
        }
        BlockType::Quote => {
            let text = block
                .lines()
                .map(|line| {
                    let line = line.strip_prefix('>').unwrap_or(line);
                    line.strip_prefix(' ').unwrap_or(line)
                })
                .collect::<Vec<_>>()
                .join("\n");
            Ok(Node::parent("blockquote", inline_nodes(text.trim())?))
        }
        BlockType::UnorderedList => {
            let items = block
                .lines()
                .map(|line| list_item(line.strip_prefix("- ").unwrap_or(line)))
                .collect::<Result<Vec<_>>>()?;
            Ok(Node::parent("ul", items))
        }
        BlockType::OrderedList => {
            let items = block
                .lines()
                .map(|line| match ordered_item(line) {
                    Some((_, marker_len)) => list_item(&line[marker_len..]),
                    None => list_item(line),
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Node::parent("ol", items))
        }
        BlockType::Paragraph => {
            let text = block.lines().collect::<Vec<_>>().join(" ");
            Ok(Node::parent("p", inline_nodes(&text)?))
        }
    }
}

fn list_item(text: &str) -> Result<Node> {
    Ok(Node::parent("li", inline_nodes(text)?))
}

fn inline_nodes(text: &str) -> Result<Vec<Node>> {
    tokenize(text)?.into_iter().map(span_to_node).collect()
}

/// Map an inline span onto its HTML leaf.
pub fn span_to_node(span: Span) -> Result<Node> {
    let Span { content, kind, url } = span;
    match (kind, url) {
        (SpanKind::Plain, None) => Ok(Node::text(content)),
        (SpanKind::Bold, None) => Ok(Node::leaf("b", content)),
        (SpanKind::Italic, None) => Ok(Node::leaf("i", content)),
        (SpanKind::Code, None) => Ok(Node::leaf("code", content)),
        (SpanKind::Link, Some(url)) => Ok(Node::leaf("a", content).with_attr("href", url)),
        (SpanKind::Image, Some(url)) => Ok(Node::leaf("img", "")
            .with_attr("src", url)
            .with_attr("alt", content)),
        (kind, _) => Err(RenderError::InvalidSpan { kind, content }),
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}
