use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "linear-mcp")]
#[command(about = "An MCP server exposing Linear issue tracking as agent tools", version)]
#[command(after_help = "EXAMPLES:
    linear-mcp                        Serve tools over stdio
    linear-mcp init                   Store an API key in the config file
    LINEAR_API_KEY=lin_api_... linear-mcp serve")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// GraphQL endpoint (overrides LINEAR_API_URL and the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Log at debug level and print error causes
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Serve the Linear tools over stdio (default)
    Serve,
    /// Initialize configuration file interactively
    #[command(after_help = "EXAMPLES:
    linear-mcp init")]
    Init,
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    linear-mcp completions bash > ~/.bash_completion.d/linear-mcp
    linear-mcp completions zsh > ~/.zfunc/_linear-mcp
    linear-mcp completions fish > ~/.config/fish/completions/linear-mcp.fish")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

impl Cli {
    pub fn subcommand(&self) -> &Commands {
        self.command.as_ref().unwrap_or(&Commands::Serve)
    }
}
