use anyhow::Result;
use cowtodo::cli::{Args, ConfigDiscovery, ExecutionMode, FileLoader, RenderConfig};
use cowtodo::env;
use cowtodo::render::Renderer;
use cowtodo::task::collect_tasks;
use cowtodo::watch::FileWatcher;
use std::io::{self, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_filter = if args.verbose {
        env::VERBOSE_LOG_FILTER
    } else {
        env::DEFAULT_LOG_FILTER
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();

    info!("Starting cowtodo");

    let config = ConfigDiscovery::load(args.config.as_deref())?;

    match args.mode(&config) {
        ExecutionMode::ShowConfig => {
            ConfigDiscovery::show_discovery_info();
            Ok(())
        }
        ExecutionMode::Welcome(render) => {
            let renderer = Renderer::new(render.options, render.cow);
            print!("{}", renderer.welcome());
            Ok(())
        }
        ExecutionMode::Render(render) => {
            let output = render_once(&render)?;
            print!("{output}");
            io::stdout().flush()?;
            Ok(())
        }
        ExecutionMode::Watch(render) => run_watch_mode(render).await,
    }
}

/// Load every file, aggregate and render
fn render_once(config: &RenderConfig) -> Result<String> {
    let report = FileLoader::load_all(&config.files);
    let order = FileLoader::file_order(&config.files);
    let collection = collect_tasks(&report.contents, Some(&order));

    info!(
        "Collected {} tasks from {} files",
        collection.summary.total_tasks, collection.summary.total_files
    );

    if config.json {
        let mut json = serde_json::to_string_pretty(&collection)?;
        json.push('\n');
        return Ok(json);
    }

    let renderer = Renderer::new(config.options.clone(), config.cow.clone());
    Ok(renderer.render(&report, &collection))
}

async fn run_watch_mode(config: RenderConfig) -> Result<()> {
    info!("Running in watch mode for {:?}", config.files);

    const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
    let renderer = Renderer::new(config.options.clone(), config.cow.clone());

    let watcher = FileWatcher::new(config.files.clone(), config.debounce)?;

    print!("{CLEAR_SCREEN}{}", render_once(&config)?);
    io::stdout().flush()?;

    watcher
        .run(|changed| {
            let output = render_once(&config)?;
            print!("{CLEAR_SCREEN}{}{output}", renderer.update_notice(changed));
            io::stdout().flush()?;
            Ok(())
        })
        .await
}
