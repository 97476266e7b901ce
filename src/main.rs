use clap::{
    ArgAction, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::EnvFilter;

use moodlist::{cli, config, error};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP synthesis server
    Serve,

    /// Synthesize a playlist for a mood
    Generate(GenerateOptions),

    /// Show a stored playlist with its songs
    Show(ShowOptions),

    /// List stored playlists
    List(ListOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateOptions {
    /// How the listener feels, e.g. "sunny afternoon"
    #[clap(long)]
    pub mood: String,

    /// Preferred genre; can be repeated
    #[clap(long = "genre", action = ArgAction::Append, num_args = 1)]
    pub genres: Vec<String>,

    /// Playlist name (defaults to the generated one)
    #[clap(long)]
    pub name: Option<String>,

    /// Owner recorded on the playlist
    #[clap(long)]
    pub owner: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ShowOptions {
    pub id: i64,
}

#[derive(Parser, Debug, Clone)]
pub struct ListOptions {
    #[clap(long)]
    pub owner: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("moodlist=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("{}", e),
    };

    match cli.command {
        Command::Serve => cli::serve(&config).await,
        Command::Generate(opt) => {
            cli::generate(&config, opt.mood, opt.genres, opt.name, opt.owner).await
        }
        Command::Show(opt) => cli::show_playlist(&config, opt.id).await,
        Command::List(opt) => cli::list_playlists(&config, opt.owner).await,
        Command::Completions(_) => {}
    }
}
