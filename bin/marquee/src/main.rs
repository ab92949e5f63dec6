//! marquee command-line front end.
//!
//! Loads a catalog and UI options, then drives the staged cache, the search
//! ranker and a selection session from the terminal.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

mod commands;
mod table;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "marquee")]
#[command(about = "Browse, filter and search a system catalog")]
struct Args {
	/// Catalog TOML file
	#[arg(long, value_name = "PATH")]
	catalog: PathBuf,

	/// UI options file (defaults to the user config directory)
	#[arg(short, long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long)]
	verbose: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// List systems in display order
	List {
		/// Filter config string, e.g. "Clones" or "Manufacturer,Namco"
		#[arg(short, long)]
		filter: Option<String>,
	},
	/// Rank systems against a query
	Search {
		query: String,
		#[arg(short, long, default_value_t = 10)]
		limit: usize,
	},
	/// Select the best match for a query and remember it for the next session
	Select { query: String },
	/// Show stage publication while the cache builds
	Stages,
	/// Print the manufacturer and year indexes
	Filters,
	/// Determine which systems have their media
	Avail {
		/// Ignore the saved availability list
		#[arg(long)]
		rescan: bool,
	},
}

fn main() -> anyhow::Result<()> {
	let args = Args::parse();
	setup_tracing(args.verbose);

	let config_path = args.config.or_else(default_config_path);
	let options = match &config_path {
		Some(path) => marquee_config::UiOptions::load_or_default(path).with_context(|| format!("loading options from {}", path.display()))?,
		None => marquee_config::UiOptions::default(),
	};
	let catalog = marquee_catalog::Catalog::load(&args.catalog).with_context(|| format!("loading catalog {}", args.catalog.display()))?;
	tracing::info!(systems = catalog.len(), catalog = %args.catalog.display(), "marquee.start");

	let context = commands::Context::new(catalog, options, config_path);
	match args.command {
		Command::List { filter } => commands::list(&context, filter.as_deref()),
		Command::Search { query, limit } => commands::search(&context, &query, limit),
		Command::Select { query } => commands::select(&context, &query),
		Command::Stages => commands::stages(&context),
		Command::Filters => commands::filters(&context),
		Command::Avail { rescan } => commands::avail(&context, rescan),
	}
}

fn default_config_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("marquee").join("ui.toml"))
}

fn setup_tracing(verbose: bool) {
	use std::fs::OpenOptions;

	use tracing_subscriber::EnvFilter;
	use tracing_subscriber::prelude::*;

	let default_filter = || {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| {
			if verbose { EnvFilter::new("debug") } else { EnvFilter::new("warn") }
		})
	};

	if let Some(log_dir) = std::env::var("MARQUEE_LOG_DIR").ok().map(PathBuf::from)
		&& std::fs::create_dir_all(&log_dir).is_ok()
	{
		let log_path = log_dir.join(format!("marquee.{}.log", std::process::id()));
		if let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) {
			let file_layer = tracing_subscriber::fmt::layer().with_writer(file).with_ansi(false).with_target(true);
			tracing_subscriber::registry().with(default_filter()).with(file_layer).init();
			tracing::info!(path = ?log_path, "marquee.tracing.file");
			return;
		}
	}

	tracing_subscriber::fmt().with_env_filter(default_filter()).with_writer(std::io::stderr).init();
}
