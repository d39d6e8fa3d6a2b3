use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::SiteError;
use crate::template::{Template, rewrite_base_path};

/// What a site build produced.
#[derive(Debug, Default)]
pub struct BuildSummary {
    pub assets: Vec<PathBuf>,
    pub pages: Vec<PathBuf>,
}

/// Build the whole site described by `config`.
pub fn build_site(config: &Config) -> Result<BuildSummary, SiteError> {
    let paths = &config.paths;
    let template = Template::load(&paths.template)?;

    prepare_output(&paths.output)?;
    let assets = copy_static(&paths.static_dir, &paths.output)?;
    let pages = generate_pages(
        &paths.content,
        &template,
        &paths.output,
        &config.site.base_path,
    )?;

    Ok(BuildSummary { assets, pages })
}

/// Start from an empty output directory.
pub fn prepare_output(dest: &Path) -> Result<(), SiteError> {
    if dest.exists() {
        info!("Removing {}", dest.display());
        fs::remove_dir_all(dest).map_err(SiteError::io("remove", dest))?;
    }
    fs::create_dir_all(dest).map_err(SiteError::io("create", dest))
}

/// Copy every file under `src` into `dest`, keeping the layout.
pub fn copy_static(src: &Path, dest: &Path) -> Result<Vec<PathBuf>, SiteError> {
    if !src.is_dir() {
        return Err(SiteError::Io {
            action: "read",
            path: src.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        });
    }

    let mut copied = Vec::new();
    for entry in sorted_walk(src) {
        let entry = entry.map_err(|source| SiteError::Walk {
            path: src.to_path_buf(),
            source,
        })?;
        let target = dest.join(relative_to(entry.path(), src));
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(SiteError::io("create", &target))?;
        } else {
            fs::copy(entry.path(), &target).map_err(SiteError::io("copy", entry.path()))?;
            info!("Copied {} -> {}", entry.path().display(), target.display());
            copied.push(target);
        }
    }
    Ok(copied)
}

/// Render every markdown file under `content_dir` into `output_dir`.
///
/// `a/b.md` becomes `a/b.html`. Other files are skipped.
pub fn generate_pages(
    content_dir: &Path,
    template: &Template,
    output_dir: &Path,
    base_path: &str,
) -> Result<Vec<PathBuf>, SiteError> {
    let mut pages = Vec::new();
    for entry in sorted_walk(content_dir) {
        let entry = entry.map_err(|source| SiteError::Walk {
            path: content_dir.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let source = entry.path();
        if source.extension().is_none_or(|ext| ext != "md") {
            warn!("Skipping non-markdown file {}", source.display());
            continue;
        }
        let dest = output_dir
            .join(relative_to(source, content_dir))
            .with_extension("html");
        generate_page(source, template, &dest, base_path)?;
        pages.push(dest);
    }
    Ok(pages)
}

/// Render one markdown file into a full HTML page.
pub fn generate_page(
    source: &Path,
    template: &Template,
    dest: &Path,
    base_path: &str,
) -> Result<(), SiteError> {
    info!("Generating {} -> {}", source.display(), dest.display());

    let markdown = fs::read_to_string(source).map_err(SiteError::io("read", source))?;
    let render_err = |source_err| SiteError::Render {
        path: source.to_path_buf(),
        source: source_err,
    };
    let title = crate::extract_title(&markdown).map_err(render_err)?;
    let content = crate::markdown_to_html(&markdown).map_err(render_err)?;

    let page = rewrite_base_path(&template.render(&title, &content), base_path);

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(SiteError::io("create", parent))?;
    }
    fs::write(dest, page).map_err(SiteError::io("write", dest))
}

fn sorted_walk(root: &Path) -> walkdir::IntoIter {
    WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
}

fn relative_to<'a>(path: &'a Path, root: &Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}
