use crate::block::BlockType;

const FENCE: &str = "```";

/// Split a document into blocks separated by blank lines.
///
/// Each block is trimmed and empty blocks are dropped.
pub fn split_into_blocks(markdown: &str) -> Vec<&str> {
    markdown
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

/// Decide which kind of block a piece of text is.
pub fn classify(block: &str) -> BlockType {
    if heading_level(block).is_some() {
        BlockType::Heading
    } else if is_code(block) {
        BlockType::Code
    } else if block.lines().all(|line| line.starts_with('>')) {
        BlockType::Quote
    } else if block.lines().all(|line| line.starts_with("- ")) {
        BlockType::UnorderedList
    } else if is_ordered_list(block) {
        BlockType::OrderedList
    } else {
        BlockType::Paragraph
    }
}

/// Number of leading `#` when the block starts with a 1-6 level heading.
fn heading_level(block: &str) -> Option<usize> {
    let level = block.bytes().take_while(|&b| b == b'#').count();
    let valid = (1..=6).contains(&level) && block[level..].starts_with(' ');
    valid.then_some(level)
}

fn is_code(block: &str) -> bool {
    block.starts_with(FENCE) && block.ends_with(FENCE)
}

fn is_ordered_list(block: &str) -> bool {
    block.starts_with("1. ")
        && block
            .lines()
            .enumerate()
            .all(|(i, line)| ordered_item(line) == Some((i + 1, ordered_marker_len(i + 1))))
}

/// Parse a `{n}. ` list marker, returning the number and marker length.
pub(crate) fn ordered_item(line: &str) -> Option<(usize, usize)> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || !line[digits..].starts_with(". ") {
        return None;
    }
    let number = line[..digits].parse().ok()?;
    Some((number, digits + 2))
}

fn ordered_marker_len(number: usize) -> usize {
    number.to_string().len() + 2
}
