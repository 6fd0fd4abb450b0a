use anyhow::Context;
use clap::Parser;
use depcollect_core::{Config, ExportFormat, Exporter};
use depcollect_deps::CollectOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "depcollect")]
#[command(version, long_about = None)]
#[command(about = "Collect the unique dependencies declared across a folder of projects")]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List the deduplicated dependencies of every project under ROOT
    Collect(CollectArgs),
    /// Show the effective configuration
    Config {
        /// Write the default configuration file instead of printing
        #[arg(long)]
        init: bool,
    },
}

#[derive(clap::Args, Default)]
struct CollectArgs {
    /// Folder containing one subdirectory per project
    root: Option<PathBuf>,

    /// Manifest file name looked up in each project
    #[arg(long)]
    manifest: Option<String>,

    /// Ignore lines starting with '#'
    #[arg(long)]
    skip_comments: bool,

    /// Keep lines starting with '#' even if the config skips them
    #[arg(long, conflicts_with = "skip_comments")]
    keep_comments: bool,

    /// Output format: text, json or markdown
    #[arg(long, short)]
    format: Option<ExportFormat>,

    /// Write to this file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Group dependencies by project instead of merging them
    #[arg(long)]
    per_project: bool,
}

/// Config file values with CLI flags applied on top
#[derive(Debug, PartialEq, Eq)]
struct CollectSettings {
    root: PathBuf,
    options: CollectOptions,
    format: ExportFormat,
    output: Option<PathBuf>,
    per_project: bool,
}

impl CollectSettings {
    fn resolve(config: &Config, args: CollectArgs) -> Self {
        let mut options = config.collect_options();
        if let Some(manifest) = args.manifest {
            options.manifest_name = manifest;
        }
        if args.skip_comments {
            options.skip_comments = true;
        } else if args.keep_comments {
            options.skip_comments = false;
        }

        // An explicit --format wins, then the output file extension, then config
        let format = args
            .format
            .or_else(|| {
                args.output
                    .as_deref()
                    .and_then(Path::extension)
                    .and_then(|e| e.to_str())
                    .and_then(ExportFormat::from_extension)
            })
            .unwrap_or(config.output.format);

        Self {
            root: args.root.unwrap_or_else(|| config.collect.root.clone()),
            options,
            format,
            output: args.output,
            per_project: args.per_project,
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(config)
}

fn collect_failed(root: &Path) -> String {
    format!("Failed to collect dependencies under {}", root.display())
}

/// Write the listing, treating a closed pipe (`depcollect | head`) as done
fn write_listing(out: &mut impl Write, content: &str) -> io::Result<()> {
    match out.write_all(content.as_bytes()).and_then(|()| out.flush()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        result => result,
    }
}

fn render(settings: &CollectSettings) -> anyhow::Result<String> {
    let rendered = if settings.per_project {
        let projects = depcollect_deps::scan_projects(&settings.root, &settings.options)
            .with_context(|| collect_failed(&settings.root))?;
        Exporter::render_projects(&projects, settings.format)?
    } else {
        let deps = depcollect_deps::collect_with(&settings.root, &settings.options)
            .with_context(|| collect_failed(&settings.root))?;
        Exporter::render(&deps, settings.format)?
    };

    Ok(rendered)
}

fn run_collect(config: &Config, args: CollectArgs) -> anyhow::Result<()> {
    let settings = CollectSettings::resolve(config, args);
    tracing::info!(
        "Collecting {} files under {}",
        settings.options.manifest_name,
        settings.root.display()
    );

    let rendered = render(&settings)?;

    match &settings.output {
        Some(path) => {
            Exporter::write_file(path, &rendered)?;
            tracing::info!("Wrote {} output to {}", settings.format, path.display());
        }
        None => write_listing(&mut io::stdout().lock(), &rendered)
            .context("Failed to write to stdout")?,
    }

    Ok(())
}

fn run_config(config_path: Option<&Path>, init: bool) -> anyhow::Result<()> {
    if init {
        let config = Config::default();
        let path = match config_path {
            Some(path) => {
                config.save_to(path)?;
                path.to_path_buf()
            }
            None => config.save()?,
        };
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    let config = load_config(config_path)?;
    write_listing(&mut io::stdout().lock(), &config.to_toml_string()?)
        .context("Failed to write to stdout")?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays a clean dependency listing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "depcollect=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Some(Commands::Collect(args)) => run_collect(&load_config(config_path)?, args),
        Some(Commands::Config { init }) => run_config(config_path, init),
        None => run_collect(&load_config(config_path)?, CollectArgs::default()),
    }
}
