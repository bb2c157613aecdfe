//! treescroll - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use treescroll::model::error::AppError;
use treescroll::model::{TreeOptions, TreeState};
use treescroll::report::WindowReport;
use treescroll::virtual_scroll::{MemorySurface, VirtualScroll};

/// Print the slice of a tree that a virtually scrolled view would render
#[derive(Parser, Debug)]
#[command(name = "treescroll")]
#[command(version)]
#[command(about = "Compute the rendered window of a virtually scrolled tree")]
pub struct Args {
    /// Path to JSON tree description
    pub file: PathBuf,

    /// Scroll offset of the viewport in pixels
    #[arg(long, default_value_t = 0.0)]
    pub scroll_top: f64,

    /// Visible height of the viewport in pixels
    #[arg(long, default_value_t = 600.0)]
    pub viewport_height: f64,

    /// Scroll the named node into view before reporting
    #[arg(long)]
    pub reveal: Option<String>,

    /// Scroll to the revealed node even if it is already visible
    #[arg(long, requires = "reveal")]
    pub force: bool,

    /// Put the revealed node at the top instead of centering it
    #[arg(long, requires = "reveal")]
    pub flush_top: bool,

    /// Render every node
    #[arg(long)]
    pub no_virtual_scroll: bool,

    /// Buffer above and below the viewport in pixels
    #[arg(long)]
    pub buffer: Option<f64>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = treescroll::config::load_config_with_precedence(args.config.clone())?;
        let merged = treescroll::config::merge_config(config_file);
        let with_env = treescroll::config::apply_env_overrides(merged);

        // --no-virtual-scroll only overrides when set
        let virtual_scroll_override = if args.no_virtual_scroll {
            Some(false)
        } else {
            None
        };

        treescroll::config::apply_cli_overrides(with_env, virtual_scroll_override, args.buffer)
    };

    treescroll::logging::init(&config.log_file_path)?;

    for warning in &config.warnings {
        warn!(%warning, "Configuration value ignored");
    }

    info!(
        config = ?config,
        file = %args.file.display(),
        "Configuration loaded and resolved"
    );

    let mut tree = treescroll::source::load_tree(
        &args.file,
        config.default_node_height,
        TreeOptions {
            use_virtual_scroll: config.use_virtual_scroll,
        },
    )?;

    let mut scroll: VirtualScroll<MemorySurface> = VirtualScroll::new(config.tuning());
    scroll.init(&mut tree);

    let surface = MemorySurface::new(args.viewport_height, scroll.total_height(&tree))
        .with_scroll(args.scroll_top, 0.0);
    scroll.set_scroll(&tree, surface);

    if let Some(name) = &args.reveal {
        let id = tree
            .find_by_name(name)
            .ok_or_else(|| AppError::UnknownNode(name.clone()))?;
        if tree.node(id).is_some_and(|n| n.is_hidden()) {
            warn!(node = %name, "revealing a hidden node");
        }
        let scrolled = scroll.scroll_to_node(&tree, id, args.force, !args.flush_top);
        info!(node = %name, scrolled, "reveal");
    }

    let report = WindowReport::capture(&tree, &scroll);
    scroll.clear(&mut tree);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.json {
        report.write_json(&mut out)?;
    } else {
        report.write_text(&mut out)?;
    }

    Ok(())
}
