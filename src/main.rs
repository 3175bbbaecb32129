#![allow(dead_code)]

use crate::areas::repository::Repository;
use anyhow::Result;
use clap::{Parser, Subcommand};

mod areas;
mod artifacts;
mod commands;
mod errors;

#[derive(Parser)]
#[command(
    name = "gogit",
    version = "0.1.0",
    about = "A minimal content-addressed version control system",
    long_about = "A minimal, local, distributed version control system: \
    files are staged into an index, committed into an immutable \
    content-addressed object graph, named through refs, and reconciled \
    through three-way merging and rebasing. Two repositories on the same \
    filesystem synchronize by copying missing objects and advancing refs."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Create an empty repository in the current directory")]
    Init,
    #[command(about = "Stage files or directories")]
    Add {
        #[arg(required = true, help = "Files or directories to stage")]
        paths: Vec<String>,
    },
    #[command(about = "Record the staged tree as a new commit")]
    Commit {
        #[arg(short, long, help = "The commit message (single line)")]
        message: String,
    },
    #[command(about = "Walk and print history from a commit (default HEAD)")]
    Log {
        #[arg(help = "Ref name or oid to start from")]
        oid: Option<String>,
    },
    #[command(about = "Switch branches, or detach at an oid")]
    Checkout {
        #[arg(help = "Branch name, ref, or oid")]
        name: Option<String>,
        #[arg(short = 'b', long = "branch", help = "Create and switch to a new branch")]
        branch: Option<String>,
    },
    #[command(about = "List branches, or create one at HEAD")]
    Branch {
        #[arg(help = "Name of the branch to create")]
        name: Option<String>,
    },
    #[command(about = "Create a tag pointing at an oid")]
    Tag {
        name: String,
        oid: String,
    },
    #[command(about = "Show the current branch and staged/unstaged changes")]
    Status,
    #[command(about = "Move HEAD to an oid")]
    Reset {
        oid: String,
    },
    #[command(about = "Print a commit and its diff against the first parent")]
    Show {
        oid: String,
    },
    #[command(about = "Diff working/index/commit tree combinations")]
    Diff {
        #[arg(help = "Commit supplying the \"from\" tree")]
        commit: Option<String>,
        #[arg(long, help = "Diff against the index instead of the working tree")]
        cached: bool,
    },
    #[command(about = "Merge a commit into HEAD (fast-forward or three-way)")]
    Merge {
        oid: String,
    },
    #[command(about = "Replay commits only HEAD can reach atop a new base")]
    Rebase {
        oid: String,
    },
    #[command(about = "Fetch branches and objects from a sibling repository")]
    Fetch {
        #[arg(help = "Path to the remote repository")]
        path: String,
    },
    #[command(about = "Push a branch ref to a sibling repository")]
    Push {
        #[arg(help = "Path to the remote repository")]
        path: String,
        #[arg(help = "Branch ref to push")]
        refname: String,
    },
    #[command(name = "cat-file", about = "Dump an object's payload")]
    CatFile {
        oid: String,
    },
    #[command(name = "read-index", about = "Pretty-print the staging index")]
    ReadIndex,
    #[command(about = "Delete objects unreachable from any ref")]
    Gc,
    #[command(about = "Emit a Graphviz digraph of the commit DAG")]
    K,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let pwd = std::env::current_dir()?;
    let mut repository = Repository::new(pwd, Box::new(std::io::stdout()))?;

    match &cli.command {
        Commands::Init => repository.init(),
        Commands::Add { paths } => repository.add(paths),
        Commands::Commit { message } => repository.commit(message),
        Commands::Log { oid } => repository.log(oid.as_deref()),
        Commands::Checkout { name, branch } => {
            repository.checkout(name.as_deref(), branch.as_deref())
        }
        Commands::Branch { name } => repository.branch(name.as_deref()),
        Commands::Tag { name, oid } => repository.tag(name, oid),
        Commands::Status => repository.status(),
        Commands::Reset { oid } => repository.reset(oid),
        Commands::Show { oid } => repository.show(oid),
        Commands::Diff { commit, cached } => repository.diff(commit.as_deref(), *cached),
        Commands::Merge { oid } => repository.merge(oid),
        Commands::Rebase { oid } => repository.rebase(oid),
        Commands::Fetch { path } => repository.fetch(path),
        Commands::Push { path, refname } => repository.push(path, refname),
        Commands::CatFile { oid } => repository.cat_file(oid),
        Commands::ReadIndex => repository.read_index(),
        Commands::Gc => repository.gc(),
        Commands::K => repository.k(),
    }
}
