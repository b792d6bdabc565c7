//! One human-versus-engine game driven by text commands.

use std::io::Write;

use anyhow::{anyhow, bail, Context, Result};
use chess_core::{
    ChessError, Color, Coord, CurseEffect, CurseRules, GameStatus, MoveOutcome, PieceKind,
    RuleEngine,
};
use minimax_engine::{Difficulty, SearchEngine};
use tracing::info;

use crate::config::PlayConfig;

pub const HELP: &str = "\
commands:
  new [white|black] [1|2|3]   start a game as the given side and level
  legal <sq>                  legal destinations of the piece on <sq>
  move <from><to>[q|r|b|n]    play a move, the engine answers
  go                          engine moves for the side to move
  hint                        engine suggestion, not played
  curse <sq> [<target>]       activate a ready curse (knights swap with <target>)
  board                       show the board
  save | load <json>          export or import the game
  resign | quit";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    config: PlayConfig,
    game: RuleEngine,
    engine: SearchEngine,
    human: Color,
    resigned: Option<Color>,
}

impl Session {
    pub fn new(config: PlayConfig) -> Self {
        Self {
            game: RuleEngine::with_rules(config.engine.rules),
            engine: SearchEngine::new(config.engine),
            human: Color::White,
            resigned: None,
            config,
        }
    }

    pub fn game(&self) -> &RuleEngine {
        &self.game
    }

    pub fn human(&self) -> Color {
        self.human
    }

    pub fn resigned(&self) -> Option<Color> {
        self.resigned
    }

    pub fn difficulty(&self) -> Difficulty {
        self.engine.difficulty()
    }

    /// Runs one command line. Command failures come back as errors and leave
    /// the game as it was.
    pub fn handle<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let mut parts = line.split_whitespace();
        let Some(cmd) = parts.next() else {
            return Ok(Flow::Continue);
        };
        let args: Vec<&str> = parts.collect();

        match cmd {
            "new" => self.new_game(&args, out)?,
            "legal" => {
                let at = square_arg(&args, 0)?;
                let targets: Vec<String> =
                    self.game.legal_moves(at).iter().map(|c| c.label()).collect();
                writeln!(out, "{at}: {}", targets.join(" "))?;
            }
            "move" => {
                let text = args
                    .first()
                    .ok_or_else(|| anyhow!("usage: move <from><to>[q|r|b|n]"))?;
                self.human_move(text, out)?;
            }
            "go" => {
                self.ensure_playable()?;
                self.engine_move(out)?;
            }
            "hint" => {
                self.ensure_playable()?;
                let depth = self.engine.config().tier().depth;
                let result = self.engine.search(&self.game.position(), depth);
                match result.best_move {
                    Some(mv) => writeln!(out, "hint: {mv} (score {})", result.score)?,
                    None => writeln!(out, "hint: no legal moves")?,
                }
            }
            "curse" => self.curse(&args, out)?,
            "board" => self.print_board(out)?,
            "save" => writeln!(out, "{}", self.game.serialize()?)?,
            "load" => {
                let json = line
                    .trim_start()
                    .strip_prefix("load")
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .ok_or_else(|| anyhow!("usage: load <json>"))?;
                self.game.deserialize(json).context("load failed")?;
                self.resigned = None;
                writeln!(out, "game loaded, {} to move", self.game.turn())?;
            }
            "resign" => {
                self.ensure_playable()?;
                self.resigned = Some(self.human);
                info!(side = %self.human, "resigned");
                writeln!(out, "{} resigns, {} wins", self.human, self.human.other())?;
            }
            "help" => writeln!(out, "{HELP}")?,
            "quit" => return Ok(Flow::Quit),
            other => bail!("unknown command '{other}' (try 'help')"),
        }
        Ok(Flow::Continue)
    }

    fn new_game<W: Write>(&mut self, args: &[&str], out: &mut W) -> Result<()> {
        let mut human = Color::White;
        let mut difficulty = self.engine.difficulty();
        for arg in args {
            match *arg {
                "white" => human = Color::White,
                "black" => human = Color::Black,
                level => {
                    let level: u8 = level.parse().with_context(|| {
                        format!("expected white, black or a level, got '{level}'")
                    })?;
                    difficulty = Difficulty::from_level(level);
                }
            }
        }

        self.game = RuleEngine::with_rules(self.config.engine.rules);
        self.engine.set_difficulty(difficulty);
        self.human = human;
        self.resigned = None;
        info!(human = %human, %difficulty, "new game");
        writeln!(out, "new game: you play {human}, difficulty {difficulty}")?;

        if self.game.turn() != human {
            self.engine_move(out)?;
        }
        self.print_board(out)
    }

    fn ensure_playable(&self) -> Result<()> {
        if self.resigned.is_some() || self.game.status() != GameStatus::Active {
            return Err(ChessError::GameOver.into());
        }
        Ok(())
    }

    fn human_move<W: Write>(&mut self, text: &str, out: &mut W) -> Result<()> {
        self.ensure_playable()?;
        if self.game.turn() != self.human {
            bail!("it is {}'s turn; use 'go' to let the engine move", self.game.turn());
        }
        let (from, to, promotion) = parse_move(text)?;
        let outcome = self.game.make_move(from, to, promotion)?;
        self.after_move(to, &outcome, out)?;

        if self.game.status() == GameStatus::Active && self.game.turn() != self.human {
            self.engine_move(out)?;
        }
        Ok(())
    }

    fn engine_move<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let side = self.game.turn();
        let result = self.engine.play(&self.game.position());
        let Some(mv) = result.best_move else {
            writeln!(out, "{side} has no legal moves")?;
            return Ok(());
        };
        let outcome = self.game.make_move(mv.from, mv.to, mv.promotion)?;
        if result.randomized {
            writeln!(out, "{side} plays {mv}")?;
        } else {
            writeln!(out, "{side} plays {mv} (score {}, {} nodes)", result.score, result.nodes)?;
        }
        self.after_move(mv.to, &outcome, out)
    }

    /// Counts the capture toward the mover's curse and reports the new state.
    fn after_move<W: Write>(
        &mut self,
        to: Coord,
        outcome: &MoveOutcome,
        out: &mut W,
    ) -> Result<()> {
        if outcome.captured.is_some() {
            if let Some(piece) = self.game.piece_by_id_mut(outcome.piece_id) {
                if self.config.curse.register_capture(piece) {
                    let (color, kind) = (piece.color, piece.kind);
                    info!(%color, %kind, square = %to, "curse ready");
                    writeln!(out, "{color} {kind} on {to} is cursed (activate with 'curse {to}')")?;
                }
            }
        }

        if outcome.is_checkmate {
            let winner = self.game.winner().map_or("nobody".to_string(), |c| c.to_string());
            writeln!(out, "checkmate, {winner} wins")?;
        } else if outcome.is_stalemate {
            writeln!(out, "stalemate")?;
        } else if outcome.is_check {
            writeln!(out, "check")?;
        }
        Ok(())
    }

    fn curse<W: Write>(&mut self, args: &[&str], out: &mut W) -> Result<()> {
        self.ensure_playable()?;
        let at = square_arg(args, 0)?;
        let side = self.game.turn();
        if side != self.human {
            bail!("curses can only be used on your own turn");
        }
        let piece = self
            .game
            .board()
            .get(at)
            .copied()
            .filter(|pc| pc.color == side)
            .ok_or_else(|| anyhow!("no {side} piece on {at}"))?;

        // Work on a copy so a failed swap leaves the curse unspent.
        let mut staged = piece;
        match self.config.curse.activate(&mut staged)? {
            CurseEffect::KingStep => {
                self.store_flags(piece.id, staged)?;
                writeln!(out, "{} pawn on {at} now moves like a king", piece.color)?;
            }
            CurseEffect::SwapPending => {
                let target = square_arg(args, 1).context("a knight curse needs a target square")?;
                self.game.swap_pieces(at, target)?;
                CurseRules::consume(&mut staged);
                self.store_flags(piece.id, staged)?;
                writeln!(out, "{} knight swaps {at} and {target}", piece.color)?;
                if self.game.status() == GameStatus::Active && self.game.turn() != self.human {
                    self.engine_move(out)?;
                }
            }
            CurseEffect::NoAbility => {
                writeln!(out, "the {} curse has no ability yet", piece.kind)?;
            }
        }
        Ok(())
    }

    fn store_flags(&mut self, id: u32, staged: chess_core::Piece) -> Result<()> {
        let piece = self
            .game
            .piece_by_id_mut(id)
            .ok_or(ChessError::UnknownPiece(id))?;
        piece.special_ready = staged.special_ready;
        piece.special_used = staged.special_used;
        Ok(())
    }

    fn print_board<W: Write>(&self, out: &mut W) -> Result<()> {
        write!(out, "{}", self.game.board().to_text())?;
        match (self.resigned, self.game.status()) {
            (Some(side), _) => writeln!(out, "{side} resigned")?,
            (None, GameStatus::Active) => writeln!(out, "{} to move", self.game.turn())?,
            (None, GameStatus::Checkmate) => writeln!(out, "checkmate")?,
            (None, GameStatus::Stalemate) => writeln!(out, "stalemate")?,
        }
        Ok(())
    }
}

fn square_arg(args: &[&str], idx: usize) -> Result<Coord> {
    let text = args.get(idx).ok_or_else(|| anyhow!("missing square"))?;
    Ok(text.parse::<Coord>()?)
}

/// Coordinate notation: `e2e4`, `e7e8q`.
fn parse_move(text: &str) -> Result<(Coord, Coord, Option<PieceKind>)> {
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        bail!("expected a move like e2e4 or e7e8q, got '{text}'");
    }
    let from = text[0..2].parse::<Coord>()?;
    let to = text[2..4].parse::<Coord>()?;
    let promotion = match text[4..].chars().next() {
        None => None,
        Some(c) => Some(
            PieceKind::from_symbol(c)
                .ok_or_else(|| anyhow!("unknown promotion piece '{c}'"))?,
        ),
    };
    Ok((from, to, promotion))
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
