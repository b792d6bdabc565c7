//! Mailbox board and the read-only view the move generator works against.

use serde::{Deserialize, Serialize};

use crate::types::*;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Read access to piece placement.
///
/// Move generation and attack detection are written against this trait so the
/// same code runs on the live board, on search snapshots, and on a
/// [`BoardOverlay`] that previews a move without copying anything.
pub trait BoardReader {
    fn piece_at(&self, at: Coord) -> Option<Piece>;

    fn find_king(&self, c: Color) -> Option<Coord> {
        Coord::all().find(|&at| {
            self.piece_at(at)
                .is_some_and(|pc| pc.color == c && pc.kind == PieceKind::King)
        })
    }
}

/// 8x8 grid, `squares[row][col]`, row 0 = rank 8.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    pub fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    /// Standard starting array. Ids run 1..=32 in row-major order.
    pub fn standard() -> Self {
        let mut b = Board::empty();
        let mut next_id = 1;
        let mut place = |b: &mut Board, row: u8, col: u8, color: Color, kind: PieceKind| {
            b.set(Coord::new(row, col), Some(Piece::new(color, kind, next_id)));
            next_id += 1;
        };
        let rows = [
            (0u8, Color::Black),
            (1, Color::Black),
            (6, Color::White),
            (7, Color::White),
        ];
        for (row, color) in rows {
            for col in 0..8u8 {
                let kind = if row == 1 || row == 6 {
                    PieceKind::Pawn
                } else {
                    BACK_RANK[col as usize]
                };
                place(&mut b, row, col, color, kind);
            }
        }
        b
    }

    pub fn get(&self, at: Coord) -> Option<&Piece> {
        self.squares[at.row as usize][at.col as usize].as_ref()
    }

    pub fn get_mut(&mut self, at: Coord) -> Option<&mut Piece> {
        self.squares[at.row as usize][at.col as usize].as_mut()
    }

    pub fn set(&mut self, at: Coord, pc: Option<Piece>) {
        self.squares[at.row as usize][at.col as usize] = pc;
    }

    pub fn take(&mut self, at: Coord) -> Option<Piece> {
        self.squares[at.row as usize][at.col as usize].take()
    }

    /// Occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, &Piece)> + '_ {
        Coord::all().filter_map(move |at| self.get(at).map(|pc| (at, pc)))
    }

    pub fn find_by_id(&self, id: u32) -> Option<Coord> {
        self.pieces().find(|(_, pc)| pc.id == id).map(|(at, _)| at)
    }

    pub fn apply(&mut self, edits: &MoveEdits) {
        for &(at, pc) in edits.iter() {
            self.set(at, pc);
        }
    }

    /// Text diagram, rank 8 first, `.` for empty squares.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(8 * 20);
        for row in 0..8u8 {
            out.push((b'8' - row) as char);
            out.push(' ');
            for col in 0..8u8 {
                out.push(self.get(Coord::new(row, col)).map_or('.', |pc| pc.symbol()));
                out.push(' ');
            }
            out.push('\n');
        }
        out.push_str("  a b c d e f g h\n");
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::standard()
    }
}

impl BoardReader for Board {
    #[inline]
    fn piece_at(&self, at: Coord) -> Option<Piece> {
        self.squares[at.row as usize][at.col as usize]
    }
}

/// The square writes that carry out one move: at most the origin, the
/// destination, and either the en-passant victim or the castling rook's two
/// squares.
#[derive(Clone, Copy, Debug)]
pub struct MoveEdits {
    edits: [(Coord, Option<Piece>); 4],
    len: usize,
}

impl MoveEdits {
    pub fn plan<B: BoardReader + ?Sized>(board: &B, mv: &Move) -> Self {
        let mut e = MoveEdits {
            edits: [(mv.from, None); 4],
            len: 0,
        };
        let Some(piece) = board.piece_at(mv.from) else {
            return e;
        };

        e.push(mv.from, None);
        if mv.is_en_passant {
            e.push(Coord::new(mv.from.row, mv.to.col), None);
        }
        let landed = match mv.promotion {
            Some(kind) => Piece { kind, ..piece },
            None => piece,
        };
        e.push(mv.to, Some(landed));

        if let Some(side) = mv.castle {
            let row = mv.from.row;
            let rook_from = Coord::new(row, side.rook_from_col());
            let rook = board.piece_at(rook_from);
            e.push(rook_from, None);
            e.push(Coord::new(row, side.rook_to_col()), rook);
        }
        e
    }

    fn push(&mut self, at: Coord, pc: Option<Piece>) {
        self.edits[self.len] = (at, pc);
        self.len += 1;
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Coord, Option<Piece>)> {
        self.edits[..self.len].iter()
    }

    fn lookup(&self, at: Coord) -> Option<Option<Piece>> {
        self.edits[..self.len]
            .iter()
            .rev()
            .find(|(sq, _)| *sq == at)
            .map(|&(_, pc)| pc)
    }
}

/// A board with one move previewed on top of it.
pub struct BoardOverlay<'a, B: ?Sized> {
    base: &'a B,
    edits: MoveEdits,
}

impl<'a, B: BoardReader + ?Sized> BoardOverlay<'a, B> {
    pub fn new(base: &'a B, mv: &Move) -> Self {
        Self {
            base,
            edits: MoveEdits::plan(base, mv),
        }
    }
}

impl<B: BoardReader + ?Sized> BoardReader for BoardOverlay<'_, B> {
    fn piece_at(&self, at: Coord) -> Option<Piece> {
        match self.edits.lookup(at) {
            Some(pc) => pc,
            None => self.base.piece_at(at),
        }
    }
}
