use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ideas")]
#[command(about = "Collect, search and refine ideas", version, disable_version_flag = true)]
pub(crate) struct Cli {
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    pub(crate) version: Option<bool>,

    #[command(subcommand)]
    pub(crate) command: Option<Command>,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Create an idea
    Add {
        #[arg(long, short)]
        title: String,
        #[arg(long, short)]
        description: String,
    },
    /// Print every idea
    #[command(alias = "ls")]
    List,
    /// Print ideas whose title or description contains KEYWORD
    Search { keyword: String },
    /// Change the title and/or description of an idea
    Edit {
        id: i64,
        #[arg(long, short)]
        title: Option<String>,
        #[arg(long, short)]
        description: Option<String>,
    },
    /// Delete an idea after confirmation
    #[command(alias = "rm")]
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    Version,
}
