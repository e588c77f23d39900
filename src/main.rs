use clap::{Parser, Subcommand};
use repo_render::commands::*;
use repo_render::core::{error::Result, pagination::PageSize, print_error};
use std::env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "repo-render")]
#[command(about = "Render a public GitHub repository as paginated text or a CXML export")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a repository and print a paginated view of its files
    Render {
        /// GitHub repository URL or owner/name
        repo: String,
        /// Branch, tag, or commit to render (default: the default branch)
        #[arg(long)]
        reference: Option<String>,
        /// GitHub token (falls back to GITHUB_TOKEN)
        #[arg(long)]
        token: Option<String>,
        /// Maximum number of files to render (1-2000)
        #[arg(long)]
        limit: Option<usize>,
        /// Page to display (1-indexed)
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Files per page, or 'all'
        #[arg(long)]
        page_size: Option<PageSize>,
    },
    /// Print the repository's directory tree
    Tree {
        /// GitHub repository URL or owner/name
        repo: String,
        /// Branch, tag, or commit to list (default: the default branch)
        #[arg(long)]
        reference: Option<String>,
        /// GitHub token (falls back to GITHUB_TOKEN)
        #[arg(long)]
        token: Option<String>,
    },
    /// Generate the CXML machine-consumption export
    Export {
        /// GitHub repository URL or owner/name
        repo: String,
        /// Branch, tag, or commit to export (default: the default branch)
        #[arg(long)]
        reference: Option<String>,
        /// GitHub token (falls back to GITHUB_TOKEN)
        #[arg(long)]
        token: Option<String>,
        /// Maximum number of files to include (1-2000)
        #[arg(long)]
        limit: Option<usize>,
        /// Write the document to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List branches and recent tags
    Branches {
        /// GitHub repository URL or owner/name
        repo: String,
        /// GitHub token (falls back to GITHUB_TOKEN)
        #[arg(long)]
        token: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else {
        env::set_var("RUST_LOG", "warn");
    }
    env_logger::init();

    let outcome = match cli.command {
        Commands::Render {
            repo,
            reference,
            token,
            limit,
            page,
            page_size,
        } => {
            execute_render(RenderOptions {
                repo,
                reference,
                token,
                limit,
                page,
                page_size,
            })
            .await
        }
        Commands::Tree {
            repo,
            reference,
            token,
        } => {
            execute_tree(TreeOptions {
                repo,
                reference,
                token,
            })
            .await
        }
        Commands::Export {
            repo,
            reference,
            token,
            limit,
            output,
        } => {
            execute_export(ExportOptions {
                repo,
                reference,
                token,
                limit,
                output,
            })
            .await
        }
        Commands::Branches { repo, token } => {
            execute_branches(BranchesOptions { repo, token }).await
        }
    };

    if let Err(e) = outcome {
        print_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}
