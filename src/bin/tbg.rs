//! Command-line front end: play sessions and replay saved logs.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rust_tbg::games::tictactoe::Layout;
use rust_tbg::games::{Nim, TicTacToe};
use rust_tbg::session::{load_summary, render_replay, FileLogger, LogFormat, Session, SessionConfig};
use rust_tbg::{
    ConsoleInput, GameRng, GameRules, Marker, MoveInput, ParticipantSpec, Result, SearchConfig,
    SearchMode,
};

/// Turn-based games against humans, random bots and minimax bots
#[derive(Parser, Debug)]
#[command(name = "tbg")]
#[command(about = "Turn-based game framework with minimax bots", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a session of matches
    Play(PlayArgs),

    /// Replay a saved session log
    Replay {
        /// Log file written by `play --log-dir`
        path: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GameKind {
    #[value(name = "tictactoe")]
    TicTacToe,
    Nim,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Json,
    Bincode,
}

impl From<FormatArg> for LogFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Json => LogFormat::Json,
            FormatArg::Bincode => LogFormat::Bincode,
        }
    }
}

#[derive(Args, Debug)]
struct PlayArgs {
    /// Game to play
    #[arg(short, long, value_enum, default_value_t = GameKind::TicTacToe)]
    game: GameKind,

    /// Participants in turn order, as `kind` or `MARKER:kind`
    /// (kind: human, random, minimax)
    #[arg(short, long, value_delimiter = ',', default_values = ["human", "minimax"])]
    players: Vec<String>,

    /// Number of matches; asks to play again when omitted
    #[arg(short = 'n', long)]
    matches: Option<usize>,

    /// Search depth limit (exhaustive when omitted)
    #[arg(long)]
    max_depth: Option<u32>,

    /// Search semantics: adversarial (classic) or selfish (independent)
    #[arg(long, default_value = "adversarial")]
    mode: SearchMode,

    /// Fixed reference marker for one-vs-all adversarial search
    #[arg(long)]
    reference: Option<Marker>,

    /// Directory to save the session summary in
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Summary file format
    #[arg(long, value_enum, default_value_t = FormatArg::Json)]
    format: FormatArg,

    /// Seed for random bots
    #[arg(long)]
    seed: Option<u64>,

    /// Tic-tac-toe: type moves on the numeric keypad layout
    #[arg(long)]
    keypad: bool,

    /// Tic-tac-toe: prune once a win or loss in five plies is found
    #[arg(long)]
    fast_pruning: bool,

    /// Nim: starting pile sizes
    #[arg(long, value_delimiter = ',', default_values_t = [1, 3, 5])]
    piles: Vec<u32>,

    /// Nim: most stones removable per move
    #[arg(long)]
    max_take: Option<u32>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Play(args) => match args.game {
            GameKind::TicTacToe => {
                let mut game = TicTacToe::new();
                if args.keypad {
                    game = game.with_layout(Layout::Keypad);
                }
                if args.fast_pruning {
                    game = game.with_fast_pruning();
                }
                play(game, Default::default(), &args)
            }
            GameKind::Nim => {
                let mut game = Nim::new(args.piles.iter().copied());
                if let Some(max) = args.max_take {
                    game = game.with_max_take(max);
                }
                let initial = game.initial_state();
                play(game, initial, &args)
            }
        },
        Command::Replay { path } => replay(&path),
    }
}

fn play<G: GameRules>(rules: G, initial: G::State, args: &PlayArgs) -> Result<()> {
    println!("\nWelcome to {}!\n", rules.name());
    println!("{}\n", rules.help());

    let mut search = SearchConfig::new(args.mode);
    if let Some(depth) = args.max_depth {
        search = search.with_max_depth(depth);
    }
    let mut config = SessionConfig::new().with_search(search);
    if let Some(reference) = args.reference {
        config = config.with_reference(reference);
    }

    let mut rng = args.seed.map_or_else(GameRng::from_entropy, GameRng::new);
    let mut builder = Session::builder(rules, initial).config(config);
    for entry in &args.players {
        builder = builder.participant(parse_participant(entry, &mut rng)?);
    }
    if let Some(dir) = &args.log_dir {
        builder = builder.logger(FileLogger::new(dir, args.format.into()));
    }
    let mut session = builder.build()?;

    for p in session.participants() {
        println!("{p}");
    }

    let mut played = 0;
    loop {
        println!("\n=== Match #{} ({} starts) ===", played + 1, session.next_starting());
        let record = session.play_match_with(|rules, event, _| {
            println!("{} plays {}", event.marker, event.action);
            println!("{}", rules.display_snapshot(&event.snapshot));
        })?;
        played += 1;

        match record.winner {
            Some(winner) => println!("Winner: {winner}"),
            None => println!("Draw"),
        }
        println!("Scores: {}", session.scores());

        let more = match args.matches {
            Some(total) => played < total,
            None => play_again(&mut ConsoleInput::stdio())?,
        };
        if !more {
            break;
        }
    }

    let summary = session.finish();
    println!("\n{}", summary.final_winners);
    info!(matches = summary.total_matches, "session saved");
    Ok(())
}

/// Parse `kind` or `MARKER:kind`.
fn parse_participant(entry: &str, rng: &mut GameRng) -> Result<ParticipantSpec> {
    let (marker, kind) = match entry.split_once(':') {
        Some((marker, kind)) => (Some(marker.parse::<Marker>()?), kind),
        None => (None, entry),
    };
    let spec = match kind.trim().to_ascii_lowercase().as_str() {
        "human" => ParticipantSpec::human(ConsoleInput::stdio()),
        "random" => ParticipantSpec::random(rng.fork()),
        "minimax" | "search" | "bot" => ParticipantSpec::search(),
        _ => ParticipantSpec::new().named(entry),
    };
    Ok(match marker {
        Some(marker) => spec.with_marker(marker),
        None => spec,
    })
}

/// Ask whether to play another match; closed input means no.
fn play_again(input: &mut dyn MoveInput) -> Result<bool> {
    let answer = input.request("\nPress [Enter] to play again, or 'q' to quit > ")?;
    Ok(answer.is_some_and(|line| !matches!(line.trim(), "q" | "quit" | "n" | "no")))
}

fn replay(path: &std::path::Path) -> Result<()> {
    let summary = load_summary(path)?;
    let text = match summary.game.as_str() {
        "TicTacToe" => render_replay(&TicTacToe::new(), &summary),
        "Nim" => render_replay(&Nim::default(), &summary),
        _ => serde_json::to_string_pretty(&summary)?,
    };
    println!("{text}");
    Ok(())
}
