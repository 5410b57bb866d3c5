use anyhow::Result;
use clap::{Parser, Subcommand};
use minigit::areas::repository::Repository;
use minigit::commands::Command;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter
const LOG_ENV: &str = "MINIGIT_LOG";

#[derive(Parser)]
#[command(
    name = "minigit",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A minimal version-control engine",
    long_about = "A content-addressed object store with per-branch staging areas, \
    a commit history DAG and three-way merges.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
        #[arg(long, help = "Author identity of the default branch")]
        author: Option<String>,
    },
    #[command(
        name = "add",
        about = "Stage files on the current HEAD",
        long_about = "This command stages the given files, walking directories recursively."
    )]
    Add {
        #[arg(index = 1, required = true, help = "Files or directories to stage")]
        paths: Vec<String>,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command records the staged files as a new commit on the current HEAD."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "log", about = "Show the commit history from HEAD")]
    Log,
    #[command(
        name = "branch",
        about = "Create a branch at HEAD",
        long_about = "This command creates a new branch pointing at the commit HEAD resolves to."
    )]
    Branch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
        #[arg(long, help = "Author identity of the new branch")]
        author: Option<String>,
    },
    #[command(
        name = "checkout",
        about = "Switch branches or detach HEAD at a commit",
        long_about = "This command moves HEAD to a branch or commit and restores its files."
    )]
    Checkout {
        #[arg(index = 1, help = "Branch name, commit id or revision")]
        target: String,
    },
    #[command(
        name = "merge",
        about = "Merge a branch into HEAD",
        long_about = "This command performs a three-way merge of the given branch into HEAD \
        and records a merge commit, even when some files conflict."
    )]
    Merge {
        #[arg(index = 1, help = "The branch to merge")]
        branch: String,
    },
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "This command prints a stored blob, snapshot or commit record."
    )]
    CatFile {
        #[arg(index = 1, help = "The object id to print")]
        object_id: String,
    },
    #[command(
        name = "hash-object",
        about = "Hash a file and optionally write it to the object store",
        long_about = "This command prints the blob id of a file and can store the blob."
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object store")]
        write: bool,
        #[arg(index = 1)]
        file: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let (path, command) = match cli.command {
        Commands::Init { path, author } => (path, Command::Init { author }),
        Commands::Add { paths } => (None, Command::Add { paths }),
        Commands::Commit { message } => (None, Command::Commit { message }),
        Commands::Log => (None, Command::Log),
        Commands::Branch { name, author } => (None, Command::Branch { name, author }),
        Commands::Checkout { target } => (None, Command::Checkout { target }),
        Commands::Merge { branch } => (None, Command::Merge { branch }),
        Commands::CatFile { object_id } => (None, Command::CatFile { object_id }),
        Commands::HashObject { write, file } => (None, Command::HashObject { file, write }),
    };

    let path = path.unwrap_or_else(|| ".".to_string());
    let mut repository = Repository::new(&path, Box::new(std::io::stdout()))?;

    let outcome = repository.execute(command).await;
    repository.writer().flush()?;

    std::process::exit(outcome.exit_code());
}
