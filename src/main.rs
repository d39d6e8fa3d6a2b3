use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use mdsite::Config;

#[derive(Parser)]
#[command(name = "mdsite")]
#[command(about = "Build a static HTML site from a directory of Markdown files")]
struct Cli {
    /// Prefix for root-relative links, e.g. /my-repo/
    base_path: Option<String>,

    /// Config file (defaults are used if it does not exist)
    #[arg(short, long, default_value = "mdsite.toml")]
    config: PathBuf,

    /// Directory of Markdown content
    #[arg(long)]
    content: Option<PathBuf>,

    /// Directory of assets copied as-is
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// HTML template with {{ Title }} and {{ Content }} placeholders
    #[arg(long)]
    template: Option<PathBuf>,

    /// Output directory, wiped on every build
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log every block as it is rendered
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Result<Config> {
        let mut config = Config::load(&self.config)
            .with_context(|| format!("loading {}", self.config.display()))?;
        if let Some(base_path) = self.base_path {
            config.site.base_path = base_path;
        }
        if let Some(content) = self.content {
            config.paths.content = content;
        }
        if let Some(static_dir) = self.static_dir {
            config.paths.static_dir = static_dir;
        }
        if let Some(template) = self.template {
            config.paths.template = template;
        }
        if let Some(output) = self.output {
            config.paths.output = output;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let config = cli.into_config()?;
    let summary = mdsite::build_site(&config)
        .with_context(|| format!("building site into {}", config.paths.output.display()))?;

    println!(
        "Built {} pages and {} assets into {}",
        summary.pages.len(),
        summary.assets.len(),
        config.paths.output.display()
    );
    Ok(())
}
