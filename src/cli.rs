/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::{fen_alias, init_attack_tables, perft, splitperft, Position, FEN_STARTPOS};

/// Legal move generation and perft for standard chess.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log filter, such as `debug` or `tadpole=trace`. Overrides `RUST_LOG`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

/// The position a command works on.
#[derive(Debug, Clone, Args)]
pub struct PositionArg {
    /// FEN string of the position, or one of `startpos` and `kiwipete`.
    #[arg(short, long, default_value = FEN_STARTPOS)]
    pub fen: String,
}

impl PositionArg {
    fn position(&self) -> Result<Position> {
        let fen = fen_alias(&self.fen);
        fen.parse::<Position>()
            .with_context(|| format!("Failed to parse position {fen:?}"))
    }
}

#[derive(Debug, Clone, Subcommand)]
#[command(rename_all = "lower")]
pub enum Command {
    /// Performs a perft on the position at the supplied depth, printing total node count.
    Perft {
        depth: usize,

        #[command(flatten)]
        position: PositionArg,
    },

    /// Performs a split perft on the position at the supplied depth.
    #[command(aliases = ["divide", "sperft"])]
    Splitperft {
        depth: usize,

        #[command(flatten)]
        position: PositionArg,
    },

    /// Shows all legal moves in the position.
    Moves {
        #[command(flatten)]
        position: PositionArg,

        /// If set, moves will be sorted in alphabetical order.
        ///
        /// By default, moves are generated in no particular order.
        #[arg(short, long, default_value = "false")]
        sort: bool,
    },

    /// Apply the provided moves to the position, in order, and print the resulting FEN.
    ///
    /// Every move must be legal in the position it is applied to.
    Apply {
        /// Moves in UCI notation, such as `e2e4` or `e7e8q`.
        #[arg(required = true)]
        moves: Vec<String>,

        #[command(flatten)]
        position: PositionArg,
    },

    /// Print a visual representation of the position.
    #[command(alias = "d")]
    Display {
        #[command(flatten)]
        position: PositionArg,
    },
}

impl Command {
    /// Executes this command, writing its results to stdout.
    pub fn run(&self) -> Result<()> {
        match self {
            Self::Perft { depth, position } => {
                let mut pos = position.position()?;
                init_attack_tables();
                tracing::info!(depth, fen = %pos, "starting perft");
                println!("{}", perft(&mut pos, *depth));
            }

            Self::Splitperft { depth, position } => {
                let mut pos = position.position()?;
                init_attack_tables();
                tracing::info!(depth, fen = %pos, "starting splitperft");
                let nodes = splitperft(&mut pos, *depth);
                println!("\n{nodes}");
            }

            Self::Moves { position, sort } => {
                let pos = position.position()?;
                let mut moves = pos.legal_moves();
                if *sort {
                    moves.sort_by_key(|mv| mv.to_string());
                }

                let moves = moves.iter().map(ToString::to_string).collect::<Vec<_>>();
                println!("{}", moves.join(" "));
            }

            Self::Apply { moves, position } => {
                let mut pos = position.position()?;
                for uci in moves {
                    let mv = pos.parse_move(uci)?;
                    tracing::debug!(%mv, "applying");
                    pos.apply(mv);
                }
                println!("{pos}");
            }

            Self::Display { position } => {
                println!("{:?}", position.position()?);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_commands() {
        let cli = Cli::try_parse_from(["tadpole", "perft", "3", "--fen", "kiwipete"]).unwrap();
        let Command::Perft { depth, position } = cli.command else {
            panic!("expected perft");
        };
        assert_eq!(depth, 3);
        assert_eq!(position.position().unwrap().to_fen(), crate::FEN_KIWIPETE);

        let cli = Cli::try_parse_from(["tadpole", "divide", "2"]).unwrap();
        assert!(matches!(cli.command, Command::Splitperft { depth: 2, .. }));

        let cli = Cli::try_parse_from(["tadpole", "--log-level", "debug", "d"]).unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(matches!(cli.command, Command::Display { .. }));

        // Global, so it may follow the subcommand
        let cli = Cli::try_parse_from(["tadpole", "moves", "--log-level", "trace"]).unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("trace"));
        assert!(Cli::try_parse_from(["tadpole", "--loglevel", "debug", "d"]).is_err());
    }

    #[test]
    fn test_apply_requires_moves() {
        assert!(Cli::try_parse_from(["tadpole", "apply"]).is_err());
        let cli = Cli::try_parse_from(["tadpole", "apply", "e2e4", "e7e5"]).unwrap();
        assert!(cli.command.run().is_ok());
    }

    #[test]
    fn test_bad_input_is_an_error() {
        let cli = Cli::try_parse_from(["tadpole", "moves", "--fen", "not a fen"]).unwrap();
        assert!(cli.command.run().is_err());

        let cli = Cli::try_parse_from(["tadpole", "apply", "e2e5"]).unwrap();
        assert!(cli.command.run().is_err());
    }
}
