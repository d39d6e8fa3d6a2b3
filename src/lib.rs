//! Static site generation from markdown.
//!
//! The core is a small two-phase markdown parser: documents are split into
//! blank-line separated blocks, each block is classified and rendered into
//! an HTML node tree, and inline markup inside blocks is tokenized into
//! styled spans.
//!
//! ```
//! let html = mdsite::markdown_to_html("# Title\n\nHello **world**").unwrap();
//! assert_eq!(html, "<div><h1>Title</h1><p>Hello <b>world</b></p></div>");
//! assert_eq!(mdsite::extract_title("# Title\n\nHello").unwrap(), "Title");
//! ```

mod block;
mod config;
mod error;
mod generate;
mod html;
mod inline;
mod node;
mod parser;
mod template;

pub use block::{BlockType, Span, SpanKind};
pub use config::{Config, PathsConfig, SiteConfig};
pub use error::{RenderError, Result, SiteError};
pub use generate::{
    BuildSummary, build_site, copy_static, generate_page, generate_pages, prepare_output,
};
pub use html::{extract_title, render_block, render_document, span_to_node};
pub use inline::{split_delimiter, tokenize};
pub use node::Node;
pub use parser::{classify, split_into_blocks};
pub use template::{Template, rewrite_base_path};

/// Convert a markdown document into an HTML fragment wrapped in a `div`.
pub fn markdown_to_html(markdown: &str) -> Result<String> {
    render_document(markdown)?.to_html()
}
