//! Twinboard: terminal driver for the two-board chess variant.
//!
//! ## Usage
//!
//! - `twinboard demo` - Scripted opening and capture-transfer walkthrough
//! - `twinboard play` - Interactive click loop, one command per line
//!   (`top e2`, `bottom a1`, `quit`)

use std::io::{self, BufRead, Write};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

use twinboard_core::{
    BoardId, ClickOutcome, Color, GameConfig, GameSession, IgnoreReason, PieceType,
    PlacementPolicy, ShakmatyRules, Square,
};

/// Twinboard: a two-board chess variant where captured pieces are
/// reborn onto the other board
#[derive(Parser)]
#[command(name = "twinboard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Piece a promoting pawn becomes (p, n, b, r, q, k)
    #[arg(long, default_value = "q")]
    promotion: String,

    /// Reserve placement policy: "overwrite" or "nearest-free"
    #[arg(long, default_value = "overwrite")]
    placement: String,

    /// Square where reserve pieces enter the other board
    #[arg(long, default_value = "a1")]
    entry: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scripted opening-and-capture walkthrough
    Demo,
    /// Play interactively: `<board> <square>` per line, `quit` to exit
    Play,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = parse_config(&cli)?;

    match cli.command {
        Some(Commands::Play) => play(config),
        Some(Commands::Demo) | None => {
            demo(config);
            Ok(())
        }
    }
}

fn parse_config(cli: &Cli) -> Result<GameConfig> {
    let promotion: PieceType = cli
        .promotion
        .parse()
        .with_context(|| format!("bad --promotion {:?}", cli.promotion))?;
    let placement = PlacementPolicy::from_code(&cli.placement).ok_or_else(|| {
        anyhow!(
            "bad --placement {:?} (expected \"overwrite\" or \"nearest-free\")",
            cli.placement
        )
    })?;
    let entry_square: Square = cli
        .entry
        .parse()
        .with_context(|| format!("bad --entry {:?}", cli.entry))?;
    Ok(GameConfig {
        promotion,
        entry_square,
        placement,
    })
}

fn demo(config: GameConfig) {
    println!("Twinboard: capture transfer demo\n");
    let mut session = GameSession::with_config(config);
    print_boards(&session);

    // 1. e4 d5 2. exd5: the captured pawn is reborn on the bottom board.
    let script = [
        (BoardId::Top, "e2"),
        (BoardId::Top, "e4"),
        (BoardId::Top, "d7"),
        (BoardId::Top, "d5"),
        (BoardId::Top, "e4"),
        (BoardId::Top, "d5"),
    ];
    for (board, square) in script {
        let square = Square::parse(square).expect("scripted square");
        let outcome = session.handle_square_click(board, square);
        println!("click {board} {square}: {}", describe(outcome));
        if !session.highlights().is_empty() {
            let highlighted: Vec<String> = session
                .highlights()
                .iter()
                .map(Square::to_string)
                .collect();
            println!("  highlights: {}", highlighted.join(" "));
        }
    }

    println!();
    print_boards(&session);
}

fn play(config: GameConfig) -> Result<()> {
    println!("Twinboard. Click with `<board> <square>` (e.g. `top e2`); `quit` exits.\n");
    let mut session = GameSession::with_config(config);
    print_boards(&session);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = stdin.lock().lines().next() else {
            break;
        };
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input, "quit" | "exit" | "q") {
            break;
        }

        match parse_click(input) {
            Ok((board, square)) => {
                let outcome = session.handle_square_click(board, square);
                println!("{}", describe(outcome));
                if let Some(selection) = session.selection() {
                    let highlighted: Vec<String> = session
                        .highlights()
                        .iter()
                        .map(Square::to_string)
                        .collect();
                    println!(
                        "selected {} on {}; destinations: {}",
                        selection.square,
                        selection.board,
                        if highlighted.is_empty() {
                            "none".to_string()
                        } else {
                            highlighted.join(" ")
                        }
                    );
                } else {
                    print_boards(&session);
                }
            }
            Err(err) => println!("{err}"),
        }
    }
    Ok(())
}

fn parse_click(input: &str) -> Result<(BoardId, Square)> {
    let (board, square) = input
        .split_once(char::is_whitespace)
        .ok_or_else(|| anyhow!("expected `<board> <square>`, got {input:?}"))?;
    let board: BoardId = board.trim().parse()?;
    let square: Square = square.trim().parse()?;
    Ok((board, square))
}

fn describe(outcome: ClickOutcome) -> String {
    match outcome {
        ClickOutcome::Selected => "selected".to_string(),
        ClickOutcome::Moved {
            captured: None, ..
        } => "moved".to_string(),
        ClickOutcome::Moved {
            captured: Some(piece),
            transfer: Some(square),
        } => format!("captured {}, reserve placed at {square}", piece.to_code()),
        ClickOutcome::Moved {
            captured: Some(piece),
            transfer: None,
        } => format!("captured {}, reserve lost (no free square)", piece.to_code()),
        ClickOutcome::Ignored(IgnoreReason::EmptySquare) => "ignored: empty square".to_string(),
        ClickOutcome::Ignored(IgnoreReason::OtherBoard) => {
            "ignored: selection is on the other board".to_string()
        }
        ClickOutcome::Ignored(IgnoreReason::IllegalMove) => "ignored: illegal move".to_string(),
    }
}

fn print_boards(session: &GameSession<ShakmatyRules>) {
    for id in [BoardId::Top, BoardId::Bottom] {
        let board = session.board(id);
        println!("{} board ({} to move):", id, board.rules().turn().to_code());
        for rank in (0..8u8).rev() {
            print!("  {} ", rank + 1);
            for file in 0..8u8 {
                let cell = board
                    .piece_at(Square::new_unchecked(file, rank))
                    .map_or('.', |piece| match piece.color {
                        Color::White => piece.piece_type.to_code().to_ascii_uppercase(),
                        Color::Black => piece.piece_type.to_code(),
                    });
                print!("{cell} ");
            }
            println!();
        }
        println!("    a b c d e f g h");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_click_accepts_board_and_square() {
        let (board, square) = parse_click("top e2").unwrap();
        assert_eq!(board, BoardId::Top);
        assert_eq!(square, Square::parse("e2").unwrap());

        let (board, square) = parse_click("bottom  a1").unwrap();
        assert_eq!(board, BoardId::Bottom);
        assert_eq!(square, Square::parse("a1").unwrap());
    }

    #[test]
    fn parse_click_rejects_malformed_input() {
        assert!(parse_click("top").is_err());
        assert!(parse_click("middle e2").is_err());
        assert!(parse_click("top e9").is_err());
    }

    #[test]
    fn default_config_parses() {
        let cli = Cli::parse_from(["twinboard", "demo"]);
        let config = parse_config(&cli).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn overridden_config_parses() {
        let cli = Cli::parse_from([
            "twinboard",
            "--promotion",
            "n",
            "--placement",
            "nearest-free",
            "--entry",
            "h8",
            "play",
        ]);
        let config = parse_config(&cli).unwrap();
        assert_eq!(config.promotion, PieceType::Knight);
        assert_eq!(config.placement, PlacementPolicy::NearestFree);
        assert_eq!(config.entry_square, Square::parse("h8").unwrap());
    }

    #[test]
    fn bad_config_is_rejected() {
        let cli = Cli::parse_from(["twinboard", "--promotion", "x", "demo"]);
        assert!(parse_config(&cli).is_err());

        let cli = Cli::parse_from(["twinboard", "--placement", "queue", "demo"]);
        assert!(parse_config(&cli).is_err());

        let cli = Cli::parse_from(["twinboard", "--entry", "j9", "demo"]);
        assert!(parse_config(&cli).is_err());
    }
}
