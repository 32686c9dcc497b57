use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use fsearch::index::{EntryIndex, MemoryIndex};
use fsearch::output;
use fsearch::search::{EntryFilter, SearchCoordinator, SearchEngine, SearchRequest, SenderToken};
use fsearch::utils::{get_config_path, ProgressBar, ProgressStyle, SearchConfig};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "fsearch")]
#[command(about = "Fast concurrent file name search")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a path list
    Search {
        /// Search query (an empty query lists everything)
        #[arg(default_value = "")]
        query: String,

        /// Path list to search (one path per line, trailing '/' for folders)
        #[arg(short, long)]
        list: PathBuf,

        /// Treat the query as a regular expression
        #[arg(short, long)]
        regex: bool,

        /// Treat '*' and '?' as shell wildcards
        #[arg(short, long)]
        wildcards: bool,

        /// Case-sensitive matching
        #[arg(short = 'c', long)]
        match_case: bool,

        /// Always match against the full path
        #[arg(short, long)]
        path: bool,

        /// Never switch to full-path matching automatically
        #[arg(long)]
        no_auto_path: bool,

        /// Only return files or only folders
        #[arg(short, long, value_enum)]
        filter: Option<FilterArg>,

        /// Maximum number of results (0 = unlimited)
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Also match against transliterated names
        #[arg(short, long)]
        translit: bool,

        /// Split the query on whitespace, every term must match
        #[arg(short, long)]
        split: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Colorize output
        #[arg(long)]
        color: bool,

        /// Worker threads (0 = one per CPU)
        #[arg(short = 'j', long)]
        threads: Option<usize>,
    },
    /// Show the effective configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        save: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FilterArg {
    Files,
    Folders,
}

impl From<FilterArg> for EntryFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::Files => EntryFilter::FilesOnly,
            FilterArg::Folders => EntryFilter::FoldersOnly,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    let mut config = SearchConfig::load()?;

    match cli.command {
        Commands::Search {
            query,
            list,
            regex,
            wildcards,
            match_case,
            path,
            no_auto_path,
            filter,
            limit,
            translit,
            split,
            json,
            color,
            threads,
        } => {
            if let Some(threads) = threads {
                config.worker_threads = threads;
            }
            let options = &mut config.search;
            options.enable_regex |= regex;
            options.enable_wildcards |= wildcards;
            options.match_case |= match_case;
            options.force_search_in_path |= path;
            options.enable_transliteration |= translit;
            options.split_terms |= split;
            if no_auto_path {
                options.auto_search_in_path = false;
            }
            if let Some(filter) = filter {
                options.filter = filter.into();
            }
            if let Some(limit) = limit {
                options.limit = limit;
            }

            run_search(&config, &query, &list, json, color)?;
        }
        Commands::Config { save } => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            println!("# effective workers: {}", config.effective_worker_threads());
            if save {
                config.save()?;
                println!("# saved to {}", get_config_path()?.display());
            }
        }
    }

    Ok(())
}

fn run_search(config: &SearchConfig, query: &str, list: &Path, json: bool, color: bool) -> Result<()> {
    let index = Arc::new(load_index(list)?);

    let engine = SearchEngine::with_threads(config.effective_worker_threads())?;
    let mut coordinator = SearchCoordinator::new(engine)?;

    let (tx, rx) = mpsc::channel();
    let request = SearchRequest::new(index, query, move |outcome, sender: SenderToken| {
        let _ = tx.send((outcome, sender));
    })
    .with_options(config.search.clone())
    .with_sender(SenderToken(1));
    coordinator.submit(request);

    let (outcome, _) = rx.recv().context("search thread exited without a result")?;
    coordinator.shutdown();
    let result = outcome?;

    if json {
        output::print_json(&result)?;
    } else {
        output::print_results(&result, color)?;
    }
    Ok(())
}

fn load_index(list: &Path) -> Result<MemoryIndex> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .context("Invalid progress template")?,
    );
    pb.set_message(format!("Loading {}", list.display()));
    pb.enable_steady_tick(Duration::from_millis(100));

    let index = MemoryIndex::load(list)
        .with_context(|| format!("Failed to load path list {}", list.display()))?;

    pb.finish_and_clear();
    log::info!("loaded path list entries={} path={}", index.len(), list.display());
    Ok(index)
}
