use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tick", about = concat!("[/] tick v", env!("CARGO_PKG_VERSION"), " - your to-dos in one JSON file"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different data directory (default: $TICK_DIR or ~/.tick)
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks
    List(ListArgs),
    /// Add a new task
    Add(AddArgs),
    /// Edit a task's title or description
    Edit(EditArgs),
    /// Toggle a task's completion state
    Toggle(ToggleArgs),
    /// Delete a task
    Rm(RmArgs),
    /// Search tasks by substring (case-insensitive)
    Search(SearchArgs),
    /// Show or change the theme preference
    Theme(ThemeArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Show only completed tasks
    #[arg(long, conflicts_with = "pending")]
    pub completed: bool,
    /// Show only pending tasks
    #[arg(long)]
    pub pending: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// Optional description
    #[arg(long = "desc")]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task ID
    pub id: String,
    /// New title
    #[arg(long)]
    pub title: Option<String>,
    /// New description
    #[arg(long = "desc", conflicts_with = "clear_desc")]
    pub description: Option<String>,
    /// Remove the description
    #[arg(long)]
    pub clear_desc: bool,
}

#[derive(Args)]
pub struct ToggleArgs {
    /// Task ID
    pub id: String,
}

#[derive(Args)]
pub struct RmArgs {
    /// Task ID
    pub id: String,
    /// Skip confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Substring to search for in titles and descriptions
    pub query: String,
}

#[derive(Args)]
pub struct ThemeArgs {
    /// "light", "dark", "system", or "toggle" (omit to show the current theme)
    pub action: Option<String>,
}
