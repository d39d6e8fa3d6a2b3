use crate::block::{Span, SpanKind};
use crate::error::{RenderError, Result};

/// Split inline markdown into styled spans.
///
/// Images are extracted first, then links, then `**`, `_` and `` ` ``
/// delimiters. Each pass only looks at spans still marked plain, so link
/// text and image alt text are kept verbatim.
pub fn tokenize(text: &str) -> Result<Vec<Span>> {
    let spans = vec![Span::plain(text)];
    let spans = split_images(spans);
    let spans = split_links(spans);
    let spans = split_delimiter(spans, "**", SpanKind::Bold)?;
    let spans = split_delimiter(spans, "_", SpanKind::Italic)?;
    split_delimiter(spans, "`", SpanKind::Code)
}

/// A `[text](url)` match with byte offsets into the scanned string.
#[derive(Debug, PartialEq, Eq)]
struct LinkMatch<'a> {
    start: usize,
    end: usize,
    text: &'a str,
    url: &'a str,
}

/// Find `![alt](url)` patterns, left to right and non-overlapping.
fn find_images(text: &str) -> Vec<LinkMatch<'_>> {
    let bytes = text.as_bytes();
    let mut matches = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        if bytes[pos] == b'!' {
            if let Some(found) = match_bracketed(text, pos, pos + 1) {
                pos = found.end;
                matches.push(found);
                continue;
            }
        }
        pos += 1;
    }
    matches
}

/// Find `[text](url)` patterns not preceded by `!`.
fn find_links(text: &str) -> Vec<LinkMatch<'_>> {
    let bytes = text.as_bytes();
    let mut matches = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        let after_bang = pos > 0 && bytes[pos - 1] == b'!';
        if !after_bang {
            if let Some(found) = match_bracketed(text, pos, pos) {
                pos = found.end;
                matches.push(found);
                continue;
            }
        }
        pos += 1;
    }
    matches
}

/// Match `[label](target)` starting at byte `open`. The label may not
/// contain square brackets and the target may not contain parentheses.
fn match_bracketed(text: &str, start: usize, open: usize) -> Option<LinkMatch<'_>> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&b'[') {
        return None;
    }
    let label_start = open + 1;
    let label_len = bytes[label_start..]
        .iter()
        .position(|&b| b == b'[' || b == b']')?;
    let label_end = label_start + label_len;
    if bytes[label_end] != b']' || bytes.get(label_end + 1) != Some(&b'(') {
        return None;
    }
    let url_start = label_end + 2;
    let url_len = bytes[url_start..]
        .iter()
        .position(|&b| b == b'(' || b == b')')?;
    let url_end = url_start + url_len;
    if bytes[url_end] != b')' {
        return None;
    }
    Some(LinkMatch {
        start,
        end: url_end + 1,
        text: &text[label_start..label_end],
        url: &text[url_start..url_end],
    })
}

fn split_images(spans: Vec<Span>) -> Vec<Span> {
    split_matches(spans, find_images, |alt, url| Span::image(alt, url))
}

fn split_links(spans: Vec<Span>) -> Vec<Span> {
    split_matches(spans, find_links, |text, url| Span::link(text, url))
}

fn split_matches(
    spans: Vec<Span>,
    find: fn(&str) -> Vec<LinkMatch<'_>>,
    make: fn(&str, &str) -> Span,
) -> Vec<Span> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if !span.is_plain() {
            out.push(span);
            continue;
        }
        let found = find(&span.content);
        if found.is_empty() {
            out.push(span);
            continue;
        }
        let mut last = 0;
        for m in &found {
            if m.start > last {
                out.push(Span::plain(&span.content[last..m.start]));
            }
            out.push(make(m.text, m.url));
            last = m.end;
        }
        if last < span.content.len() {
            out.push(Span::plain(&span.content[last..]));
        }
    }
    out
}

/// Split plain spans on a paired delimiter, alternating plain and `kind`.
///
/// An odd number of delimiters in a plain span is an error. Empty segments
/// are dropped and non-plain spans pass through untouched.
pub fn split_delimiter(spans: Vec<Span>, delimiter: &str, kind: SpanKind) -> Result<Vec<Span>> {
    if delimiter.is_empty() {
        return Ok(spans);
    }
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if !span.is_plain() {
            out.push(span);
            continue;
        }
        let count = span.content.matches(delimiter).count();
        if count == 0 {
            out.push(span);
            continue;
        }
        if count % 2 != 0 {
            return Err(RenderError::UnbalancedDelimiter {
                delimiter: delimiter.to_string(),
                text: span.content,
            });
        }
        for (i, segment) in span.content.split(delimiter).enumerate() {
            if segment.is_empty() {
                continue;
            }
            let segment_kind = if i % 2 == 0 { SpanKind::Plain } else { kind };
            out.push(Span::new(segment, segment_kind));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_text_is_one_span() {
        assert_eq!(
            tokenize("This is just text").unwrap(),
            vec![Span::plain("This is just text")]
        );
    }

    #[test]
    fn bold_in_the_middle() {
        assert_eq!(
            tokenize("This is a **bold** text node").unwrap(),
            vec![
                Span::plain("This is a "),
                Span::new("bold", SpanKind::Bold),
                Span::plain(" text node"),
            ]
        );
    }

    #[test]
    fn only_bold() {
        assert_eq!(
            tokenize("**bold**").unwrap(),
            vec![Span::new("bold", SpanKind::Bold)]
        );
    }

    #[test]
    fn all_delimiters() {
        assert_eq!(
            tokenize("**b** and _i_ and `c`").unwrap(),
            vec![
                Span::new("b", SpanKind::Bold),
                Span::plain(" and "),
                Span::new("i", SpanKind::Italic),
                Span::plain(" and "),
                Span::new("c", SpanKind::Code),
            ]
        );
    }

    #[test]
    fn unbalanced_delimiters() {
        assert_eq!(
            tokenize("a**b"),
            Err(RenderError::UnbalancedDelimiter {
                delimiter: "**".to_string(),
                text: "a**b".to_string(),
            })
        );
        assert!(tokenize("A **bold** and _invalid italic**").is_err());
        assert!(tokenize("A **bold** and an incomplete _italic syntax").is_err());
    }

    #[test]
    fn delimiter_only_splits_plain_spans() {
        let spans = vec![
            Span::new("already **bold**", SpanKind::Bold),
            Span::plain("an _italic_ word"),
        ];
        assert_eq!(
            split_delimiter(spans, "_", SpanKind::Italic).unwrap(),
            vec![
                Span::new("already **bold**", SpanKind::Bold),
                Span::plain("an "),
                Span::new("italic", SpanKind::Italic),
                Span::plain(" word"),
            ]
        );
    }

    #[test]
    fn other_delimiter_is_left_alone() {
        let spans = vec![Span::plain("This is an _italic_ text node")];
        assert_eq!(
            split_delimiter(spans.clone(), "**", SpanKind::Bold).unwrap(),
            spans
        );
        assert_eq!(split_delimiter(spans.clone(), "", SpanKind::Bold).unwrap(), spans);
    }

    #[test]
    fn finds_images() {
        let text = "a ![rick roll](https://i.imgur.com/a.gif) and ![obi wan](https://i.imgur.com/b.jpeg)";
        let found: Vec<_> = find_images(text).iter().map(|m| (m.text, m.url)).collect();
        assert_eq!(
            found,
            vec![
                ("rick roll", "https://i.imgur.com/a.gif"),
                ("obi wan", "https://i.imgur.com/b.jpeg"),
            ]
        );
    }

    #[test]
    fn images_and_links_are_exclusive() {
        assert!(find_images("a [link](https://x.y)").is_empty());
        assert!(find_links("an ![image](https://x.y/i.png)").is_empty());
        assert!(find_links("invalid link(https://x.y)").is_empty());
        assert!(find_images("invalid image (https://x.y)").is_empty());
    }

    #[test]
    fn nested_brackets_do_not_match() {
        assert!(find_links("[a [b] c](url)").is_empty());
        assert!(find_links("[a](b (c) d)").is_empty());
        let found: Vec<_> = find_links("[[a](b)").iter().map(|m| (m.text, m.url)).collect();
        assert_eq!(found, vec![("a", "b")]);
    }

    #[test]
    fn label_may_span_parentheses() {
        let found: Vec<_> = find_links("[f(x)](y)").iter().map(|m| (m.text, m.url)).collect();
        assert_eq!(found, vec![("f(x)", "y")]);
    }

    #[test]
    fn images_split_surrounding_text() {
        assert_eq!(
            tokenize("![one](1.png) between ![two](2.png) after").unwrap(),
            vec![
                Span::image("one", "1.png"),
                Span::plain(" between "),
                Span::image("two", "2.png"),
                Span::plain(" after"),
            ]
        );
    }

    #[test]
    fn links_and_images_together() {
        assert_eq!(
            tokenize("See [docs](/docs) and ![logo](/logo.png)").unwrap(),
            vec![
                Span::plain("See "),
                Span::link("docs", "/docs"),
                Span::plain(" and "),
                Span::image("logo", "/logo.png"),
            ]
        );
    }

    #[test]
    fn markers_inside_link_text_are_kept() {
        assert_eq!(
            tokenize("This is a [link **bold**](http://x)").unwrap(),
            vec![
                Span::plain("This is a "),
                Span::link("link **bold**", "http://x"),
            ]
        );
    }

    #[test]
    fn nested_markers_stay_inside_bold() {
        assert_eq!(
            tokenize("This is **bold _inside_ bold** and a [link **inside**](https://x.y)")
                .unwrap(),
            vec![
                Span::plain("This is "),
                Span::new("bold _inside_ bold", SpanKind::Bold),
                Span::plain(" and a "),
                Span::link("link **inside**", "https://x.y"),
            ]
        );
    }

    #[test]
    fn multibyte_text_around_links() {
        assert_eq!(
            tokenize("héllo [wörld](/w) ✓").unwrap(),
            vec![
                Span::plain("héllo "),
                Span::link("wörld", "/w"),
                Span::plain(" ✓"),
            ]
        );
    }
}
