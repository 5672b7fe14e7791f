use clap::{
    Parser,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};

use spotistats::{cli, config, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightGreen.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about="SpotiStats: A CLI for your Spotify statistics.",
  styles=styles(),
)]
struct Cli {
    /// Show all-time statistics (default: last month)
    #[clap(long = "global")]
    global: bool,

    /// Run initial configuration setup
    #[clap(long)]
    setup: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.setup {
        cli::setup().await;
        return;
    }

    if let Err(e) = config::load_env() {
        warning!("Cannot load environment. Err: {}", e);
    }

    cli::stats(cli.global).await;
}
