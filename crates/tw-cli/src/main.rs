//! Console frontend for Textworld.

mod demo;

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use tw_fiction::world::OutputKind;
use tw_fiction::{GameConfig, GameSession, OutputLine, TurnOutcome};

#[derive(Parser)]
#[command(
    name = "textworld",
    about = "Textworld: a small text adventure",
    version
)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Player name (overrides the configuration file)
    #[arg(short, long)]
    player: Option<String>,

    /// Do not echo commands back
    #[arg(long)]
    no_echo: bool,

    /// Log engine activity to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}

fn run(cli: &Cli) -> Result<(), String> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_path(path).map_err(|e| e.to_string())?,
        None => GameConfig::default(),
    };
    if let Some(name) = &cli.player {
        config = config.with_player_name(name.clone());
    }
    if cli.no_echo {
        config = config.with_echo_commands(false);
    }

    let (world, actions, player) = demo::build(&config).map_err(|e| e.to_string())?;
    let mut session =
        GameSession::new(world, actions, player, config).map_err(|e| format!("failed to start session: {e}"))?;

    print_outcome(&session.start().map_err(|e| e.to_string())?);

    let interactive = io::stdin().is_terminal();
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    while !session.is_finished() {
        if interactive {
            print!("> ");
            io::stdout().flush().map_err(|e| e.to_string())?;
        }

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let outcome = session.submit(line.trim_end()).map_err(|e| e.to_string())?;
        print_outcome(&outcome);
    }

    Ok(())
}

fn print_outcome(outcome: &TurnOutcome) {
    for line in &outcome.lines {
        println!("{}", styled(line));
    }
}

fn styled(line: &OutputLine) -> String {
    match line.kind {
        OutputKind::MessageOfTheDay => line.text.bold().cyan().to_string(),
        OutputKind::Command => line.text.dimmed().to_string(),
        OutputKind::Separator | OutputKind::Regular => line.text.clone(),
    }
}
