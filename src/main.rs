//! prosody CLI: build bigram graphs from corpora and generate poems.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;

use prosody::config::{ProsodyConfig, parse_scheme};
use prosody::error::PoemError;
use prosody::graph::snapshot::graph_path;
use prosody::graph::{Graph, MeterScope};
use prosody::poem::{Poem, PoemOptions};
use prosody::tokenize::load_tokens_from_file;

#[derive(Parser)]
#[command(name = "prosody", version, about = "Bigram-graph poem generator")]
struct Cli {
    /// TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding graph files (overrides the config).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a bigram graph from one or more corpus files.
    Build {
        /// Plain-text corpus files.
        #[arg(long, required = true)]
        corpus: Vec<PathBuf>,

        /// Graph name; stored as `<data-dir>/<name>.json`.
        #[arg(long)]
        name: String,

        /// Extend an existing graph instead of replacing it.
        #[arg(long)]
        append: bool,
    },

    /// Generate a poem from a stored graph.
    Generate {
        /// Graph name.
        #[arg(long)]
        name: String,

        /// Bigrams per line.
        #[arg(long)]
        line_length: Option<usize>,

        /// Rhyme scheme, e.g. "ABAB" or "A,B,A,B".
        #[arg(long)]
        scheme: Option<String>,

        /// Target stress pattern, e.g. "01" for iambic.
        #[arg(long, conflicts_with = "no_meter")]
        meter: Option<String>,

        /// Disable the meter filter.
        #[arg(long)]
        no_meter: bool,

        /// Score meter on every bigram, not only on rhyming line ends.
        #[arg(long)]
        every_bigram_meter: bool,

        /// Seed for reproducible output.
        #[arg(long)]
        seed: Option<u64>,

        /// Give up after this many search steps.
        #[arg(long)]
        max_steps: Option<u64>,

        /// Suppress the step-by-step rendering of the search path on stderr.
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show statistics for a stored graph.
    Info {
        /// Graph name.
        #[arg(long)]
        name: String,
    },

    /// Manage the config file.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a config file with default values.
    Init {
        /// Destination path.
        #[arg(default_value = "prosody.toml")]
        path: PathBuf,
    },
    /// Print the effective configuration.
    Show,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok();

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = ProsodyConfig::load_or_default(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    match cli.command {
        Commands::Build {
            corpus,
            name,
            append,
        } => {
            let path = graph_path(&config.data_dir, &name);
            let mut graph = if append && path.exists() {
                Graph::load(&path)?
            } else {
                Graph::new()
            };
            for file in &corpus {
                let tokens = load_tokens_from_file(file)?;
                graph.extend_from_tokens(&tokens);
            }
            graph.save(&path)?;
            println!("Built graph \"{name}\" at {}", path.display());
            println!("{}", graph.stats());
        }

        Commands::Generate {
            name,
            line_length,
            scheme,
            meter,
            no_meter,
            every_bigram_meter,
            seed,
            max_steps,
            quiet,
        } => {
            let mut poem_config = config.poem.clone();
            if let Some(n) = line_length {
                poem_config.line_length = n;
            }
            if let Some(s) = scheme {
                poem_config.scheme = parse_scheme(&s);
            }
            if meter.is_some() {
                poem_config.meter = meter;
            }
            if no_meter {
                poem_config.meter = None;
            }
            if every_bigram_meter {
                poem_config.meter_scope = MeterScope::Every;
            }
            if seed.is_some() {
                poem_config.seed = seed;
            }
            if max_steps.is_some() {
                poem_config.max_steps = max_steps;
            }

            let graph = Graph::load(&graph_path(&config.data_dir, &name))?;
            let rng = match poem_config.seed {
                Some(s) => StdRng::seed_from_u64(s),
                None => StdRng::from_entropy(),
            };
            let mut poem = Poem::new(&graph, PoemOptions::from(&poem_config), rng)?;

            let result = if quiet {
                poem.generate()
            } else {
                poem.generate_traced(|rendered| eprintln!("{rendered}\n"))
            };
            match result {
                Ok(text) => println!("{text}"),
                Err(PoemError::ExhaustedStarts { .. }) => println!("Couldn't find a valid poem!"),
                Err(e) => return Err(e.into()),
            }
        }

        Commands::Info { name } => {
            let path = graph_path(&config.data_dir, &name);
            let graph = Graph::load(&path)?;
            println!("Graph \"{name}\" ({})", path.display());
            println!("{}", graph.stats());
        }

        Commands::Config { action } => match action {
            ConfigAction::Init { path } => {
                ProsodyConfig::default().save(&path)?;
                println!("Wrote default config to {}", path.display());
            }
            ConfigAction::Show => {
                let text = toml::to_string_pretty(&config).into_diagnostic()?;
                print!("{text}");
            }
        },
    }

    Ok(())
}
