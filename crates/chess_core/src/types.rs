use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChessError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}
impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
    /// Row delta of a pawn step. Row 0 is rank 8, so white moves toward it.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }
    /// Row holding this side's king and rooks at the start.
    pub fn back_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
    pub fn pawn_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }
    pub fn promotion_row(self) -> u8 {
        self.other().back_row()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Promotion choices, best first.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    pub fn idx(self) -> usize {
        self as usize
    }

    /// Lowercase FEN letter.
    pub fn symbol(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_symbol(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        };
        f.write_str(name)
    }
}

/// A board square. Row 0 is rank 8, column 0 is file `a`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub fn try_new(row: i8, col: i8) -> Option<Coord> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Coord::new(row as u8, col as u8))
        } else {
            None
        }
    }

    pub fn offset(self, dr: i8, dc: i8) -> Option<Coord> {
        Coord::try_new(self.row as i8 + dr, self.col as i8 + dc)
    }

    pub fn is_valid(self) -> bool {
        self.row < 8 && self.col < 8
    }

    /// Every square in row-major order, a8 first.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Coord::new(row, col)))
    }

    pub fn label(self) -> String {
        let f = (b'a' + self.col) as char;
        let r = (b'0' + (8 - self.row)) as char;
        format!("{f}{r}")
    }

    pub fn from_label(label: &str) -> Option<Coord> {
        let b = label.as_bytes();
        if b.len() != 2 {
            return None;
        }
        let (f, r) = (b[0], b[1]);
        if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) {
            return None;
        }
        Some(Coord::new(8 - (r - b'0'), f - b'a'))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for Coord {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Coord::from_label(s).ok_or_else(|| ChessError::InvalidSquare(s.to_string()))
    }
}

/// How a cursed pawn may capture once it moves like a king.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursedPawnCapture {
    /// King-like steps onto empty squares; captures stay forward-diagonal.
    #[default]
    PawnDiagonal,
    /// Captures on any adjacent square, like a king.
    AnyAdjacent,
}

/// Game-wide variant switches consulted by move generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantRules {
    #[serde(default)]
    pub cursed_pawn_capture: CursedPawnCapture,
}

/// Movement shape of a piece, resolved from its kind and capability flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MovementProfile {
    Standard,
    Altered(AlteredMovement),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlteredMovement {
    KingStep { capture: CursedPawnCapture },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub id: u32,
    #[serde(default)]
    pub capture_count: u32,
    #[serde(default)]
    pub special_ready: bool,
    #[serde(default)]
    pub special_used: bool,
}

impl Piece {
    pub fn new(color: Color, kind: PieceKind, id: u32) -> Self {
        Self {
            kind,
            color,
            id,
            capture_count: 0,
            special_ready: false,
            special_used: false,
        }
    }

    pub fn movement(&self, rules: &VariantRules) -> MovementProfile {
        match self.kind {
            PieceKind::Pawn if self.special_used => {
                MovementProfile::Altered(AlteredMovement::KingStep {
                    capture: rules.cursed_pawn_capture,
                })
            }
            _ => MovementProfile::Standard,
        }
    }

    /// FEN-style letter: uppercase for white.
    pub fn symbol(&self) -> char {
        match self.color {
            Color::White => self.kind.symbol().to_ascii_uppercase(),
            Color::Black => self.kind.symbol(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    pub const ALL: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    pub fn king_to_col(self) -> u8 {
        match self {
            CastleSide::Kingside => 6,
            CastleSide::Queenside => 2,
        }
    }
    pub fn rook_from_col(self) -> u8 {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 0,
        }
    }
    pub fn rook_to_col(self) -> u8 {
        match self {
            CastleSide::Kingside => 5,
            CastleSide::Queenside => 3,
        }
    }
    /// Columns between king and rook that must be empty.
    pub fn between_cols(self) -> &'static [u8] {
        match self {
            CastleSide::Kingside => &[5, 6],
            CastleSide::Queenside => &[1, 2, 3],
        }
    }
    /// Columns the king stands on, crosses, or lands on.
    pub fn king_path_cols(self) -> &'static [u8] {
        match self {
            CastleSide::Kingside => &[4, 5, 6],
            CastleSide::Queenside => &[4, 3, 2],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideCastling {
    pub kingside: bool,
    pub queenside: bool,
}

impl SideCastling {
    pub fn get(self, side: CastleSide) -> bool {
        match side {
            CastleSide::Kingside => self.kingside,
            CastleSide::Queenside => self.queenside,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastlingRights {
    pub white: SideCastling,
    pub black: SideCastling,
}

impl CastlingRights {
    pub fn all() -> Self {
        let both = SideCastling {
            kingside: true,
            queenside: true,
        };
        Self {
            white: both,
            black: both,
        }
    }

    pub fn none() -> Self {
        let neither = SideCastling {
            kingside: false,
            queenside: false,
        };
        Self {
            white: neither,
            black: neither,
        }
    }

    pub fn for_color(&self, c: Color) -> SideCastling {
        match c {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    pub fn allows(&self, c: Color, side: CastleSide) -> bool {
        self.for_color(c).get(side)
    }

    pub fn revoke(&mut self, c: Color, side: CastleSide) {
        let rights = match c {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        };
        match side {
            CastleSide::Kingside => rights.kingside = false,
            CastleSide::Queenside => rights.queenside = false,
        }
    }

    pub fn revoke_all(&mut self, c: Color) {
        for side in CastleSide::ALL {
            self.revoke(c, side);
        }
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::all()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
    pub is_capture: bool,
    pub castle: Option<CastleSide>,
    pub is_en_passant: bool,
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub fn new(from: Coord, to: Coord) -> Self {
        Self {
            from,
            to,
            is_capture: false,
            castle: None,
            is_en_passant: false,
            promotion: None,
        }
    }

    pub fn capture(from: Coord, to: Coord) -> Self {
        Self {
            is_capture: true,
            ..Move::new(from, to)
        }
    }

    /// Coordinate notation, e.g. `e7e8q`.
    pub fn label(&self) -> String {
        let mut s = format!("{}{}", self.from, self.to);
        if let Some(p) = self.promotion {
            s.push(p.symbol());
        }
        s
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
