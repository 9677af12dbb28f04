use anyhow::Result;
use bit_inspect::areas::config::RepositoryConfig;
use bit_inspect::areas::repository::Repository;
use bit_inspect::artifacts::core::Output;
use bit_inspect::commands::plumbing::cat_file::CatFileMode;
use bit_inspect::commands::plumbing::ls_files::LsFilesOptions;
use bit_inspect::commands::porcelain::inspect::InspectOptions;
use clap::{ArgGroup, Parser, Subcommand};
use is_terminal::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `BIT_LOG=debug`
const LOG_ENV: &str = "BIT_LOG";

#[derive(Parser)]
#[command(
    name = "bit-inspect",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Inspect the index and loose objects of a git repository",
    long_about = "This tool decodes the on-disk state of a git repository: \
    the staging index and the loose object store. \
    It never writes to the repository.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(long, global = true, help = "Path to the .git directory (defaults to ./.git)")]
    git_dir: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        help = "Longest index entry path to accept, in bytes (defaults to 4095)"
    )]
    max_path_len: Option<usize>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "ls-files",
        about = "Show the decoded index",
        long_about = "This command decodes .git/index and prints its header followed by \
        one line per entry, in file order."
    )]
    LsFiles {
        #[arg(long, help = "Also print the stat metadata of every entry")]
        debug: bool,
    },
    #[command(
        name = "cat-file",
        about = "Print the content, type or size of an object",
        long_about = "This command decodes a single loose object. \
        It requires the SHA of the object to be specified.",
        group(ArgGroup::new("mode").required(true).args(["pretty", "kind", "size"]))
    )]
    CatFile {
        #[arg(short = 'p', help = "Pretty-print the object content")]
        pretty: bool,
        #[arg(short = 't', help = "Print the object type")]
        kind: bool,
        #[arg(short = 's', help = "Print the declared object size")]
        size: bool,
        #[arg(index = 1, help = "The object SHA")]
        sha: String,
    },
    #[command(
        name = "ls-tree",
        about = "List the entries of a tree object",
        long_about = "This command lists the entries of one tree object in on-disk order. \
        Subtrees are not expanded."
    )]
    LsTree {
        #[arg(index = 1, help = "The tree SHA")]
        sha: String,
    },
    #[command(
        name = "inspect",
        about = "Decode every loose object in the store",
        long_about = "This command enumerates .git/objects, decodes every loose object \
        concurrently and prints a report for each. Objects that fail to decode are \
        reported and skipped."
    )]
    Inspect {
        #[arg(long, help = "Report objects whose declared size does not match their content")]
        verify: bool,
        #[arg(short, long, help = "Number of objects decoded at the same time")]
        jobs: Option<usize>,
    },
}

impl Commands {
    /// Object content may not be text, so it goes to stdout unpaged
    fn writes_raw_bytes(&self) -> bool {
        matches!(self, Commands::CatFile { .. })
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = RepositoryConfig::load(cli.git_dir, cli.max_path_len)?;
    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let output = Output::detect(config.no_pager() || cli.command.writes_raw_bytes());
    let repository = Repository::new(config, output.writer())?;

    match &cli.command {
        Commands::LsFiles { debug } => {
            repository.ls_files(&LsFilesOptions { debug: *debug })?;
        }
        Commands::CatFile {
            pretty,
            kind,
            size,
            sha,
        } => {
            let mode = match (pretty, kind, size) {
                (true, _, _) => CatFileMode::Pretty,
                (_, true, _) => CatFileMode::Kind,
                _ => CatFileMode::Size,
            };
            repository.cat_file(sha, mode)?;
        }
        Commands::LsTree { sha } => {
            repository.ls_tree(sha)?;
        }
        Commands::Inspect { verify, jobs } => {
            let defaults = InspectOptions::default();
            let opts = InspectOptions {
                verify: *verify,
                jobs: jobs.unwrap_or(defaults.jobs),
            };
            repository.inspect(&opts).await?;
        }
    }

    drop(repository);
    output.finish()
}
