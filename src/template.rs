use std::fs;
use std::path::Path;

use crate::error::SiteError;

pub const TITLE_PLACEHOLDER: &str = "{{ Title }}";
pub const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// A page layout with `{{ Title }}` and `{{ Content }}` placeholders.
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
}

impl Template {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Read a template file. It must contain a content placeholder.
    pub fn load(path: &Path) -> Result<Self, SiteError> {
        let source = fs::read_to_string(path).map_err(SiteError::io("read", path))?;
        if !source.contains(CONTENT_PLACEHOLDER) {
            return Err(SiteError::Template {
                path: path.to_path_buf(),
                reason: format!("missing {CONTENT_PLACEHOLDER} placeholder"),
            });
        }
        Ok(Self::new(source))
    }

    pub fn render(&self, title: &str, content: &str) -> String {
        self.source
            .replace(TITLE_PLACEHOLDER, title)
            .replace(CONTENT_PLACEHOLDER, content)
    }
}

/// Point root-relative `href="/` and `src="/` links at `base_path`.
pub fn rewrite_base_path(html: &str, base_path: &str) -> String {
    if base_path.is_empty() || base_path == "/" {
        return html.to_string();
    }
    let base = if base_path.ends_with('/') {
        base_path.to_string()
    } else {
        format!("{base_path}/")
    };
    html.replace("href=\"/", &format!("href=\"{base}"))
        .replace("src=\"/", &format!("src=\"{base}"))
}
