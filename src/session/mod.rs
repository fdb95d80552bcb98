//! The session connects a [`Match`] to a text stream: a human (or a script)
//! types squares in algebraic notation and reads the board back.
//!
//! [`Session::run`] is the "main loop". Every action consists of two inputs:
//!
//! 1. The source square. The board is printed again with the squares the
//!    piece can reach marked by `*`.
//! 2. The target square. The move is performed and the new state is printed.
//!
//! Mistakes (an empty source square, an unreachable target, a move exposing
//! the king, malformed coordinates) are reported and the action starts over.
//! The loop ends on checkmate, on `quit` or at the end of the input.

use std::io::{BufRead, Write};

use anyhow::bail;

use crate::chess::core::Square;
use crate::chess::error::MatchError;
use crate::chess::game::Match;

pub mod render;

const QUIT: &str = "quit";

enum Flow {
    Continue,
    Quit,
}

/// Drives a match with the commands read from `input` and writes the board,
/// prompts and errors to `output`.
pub struct Session<'a, R: BufRead, W: Write> {
    game: Match,
    input: &'a mut R,
    output: &'a mut W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    /// Creates a session over the given match and I/O.
    #[must_use]
    pub fn new(game: Match, input: &'a mut R, output: &'a mut W) -> Self {
        Self {
            game,
            input,
            output,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn game(&self) -> &Match {
        &self.game
    }

    /// Reads and performs actions until the match is over or the input ends.
    ///
    /// # Errors
    ///
    /// Returns I/O failures and internal engine errors. The latter are also
    /// reported on the output as `info string <error>`.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            writeln!(self.output, "{}", render::summary(&self.game))?;
            if self.game.is_checkmate() {
                break;
            }
            writeln!(self.output)?;
            match self.play() {
                Ok(Flow::Continue) => {},
                Ok(Flow::Quit) => break,
                Err(e) => match e.downcast_ref::<MatchError>() {
                    Some(error) if error.is_recoverable() => {
                        writeln!(self.output, "{error}")?;
                    },
                    Some(error) => {
                        writeln!(self.output, "info string {error}")?;
                        bail!("match can not continue: {error}");
                    },
                    None => return Err(e),
                },
            }
        }
        self.output.flush()?;
        Ok(())
    }

    /// Performs a single action: source, highlighted board, target, move.
    fn play(&mut self) -> anyhow::Result<Flow> {
        let Some(source) = self.prompt("Source")? else {
            return Ok(Flow::Quit);
        };
        let destinations = self.game.possible_moves(source)?;
        writeln!(
            self.output,
            "{}",
            render::board(&self.game.board_snapshot(), Some(&destinations.to_matrix()))
        )?;
        writeln!(self.output)?;
        let Some(target) = self.prompt("Target")? else {
            return Ok(Flow::Quit);
        };
        if let Some(captured) = self.game.perform_move(source, target)? {
            writeln!(self.output, "Captured {captured} on {target}")?;
        }
        Ok(Flow::Continue)
    }

    /// Asks for a square. Returns `None` at the end of the input or when the
    /// player quits.
    fn prompt(&mut self, name: &str) -> anyhow::Result<Option<Square>> {
        write!(self.output, "{name}: ")?;
        self.output.flush()?;
        let mut buffer = Vec::new();
        if self.input.read_until(b'\n', &mut buffer)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        // Undecodable bytes end up in the coordinate and are rejected by the
        // parser like any other typo.
        let line = String::from_utf8_lossy(&buffer);
        let line = line.trim();
        if line == QUIT {
            return Ok(None);
        }
        Ok(Some(Square::try_from(line)?))
    }
}
