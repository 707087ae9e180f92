//! Board and hands, without history.
//!
//! Pieces live in an arena indexed by [`PieceId`]; the board and the hands
//! store ids only. Cloning a `Position` is therefore a flat copy of the
//! arena, the id grid and two short id lists, which keeps the speculative
//! clone-mutate-discard checks used by the legality code cheap.

use crate::game_state::grid::Grid;
use crate::game_state::shogi_types::{Piece, PieceId, PieceType, PieceView, Point, Side};
use crate::move_generation::legal_move_checks::is_king_attacked;
use crate::shogi_errors::{ShogiError, ShogiResult};
use crate::utils::position_codec::decode_position;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pieces: Vec<Piece>,
    board: Grid<Option<PieceId>>,
    hands: [Vec<PieceId>; 2],
    side_to_move: Side,
}

impl Position {
    /// Standard opening position. Ids run `0..40` in row-major order, the
    /// same numbering `decode_position` gives the opening string.
    pub fn new_game() -> Self {
        let mut layout: Grid<Option<(PieceType, Side)>> = Grid::filled(None);
        place_home_ranks(&mut layout, Side::Black);
        layout.apply_mirrored(|grid| place_home_ranks(grid, Side::White));

        let mut position = Position::empty(Side::Black);
        for (p, cell) in layout.cells() {
            if let Some((kind, owner)) = cell {
                let id = position.pieces.len() as PieceId;
                position.pieces.push(Piece::new(id, kind, owner));
                position.board.assign(p, Some(id));
            }
        }
        position
    }

    fn empty(side_to_move: Side) -> Self {
        Position {
            pieces: Vec::with_capacity(40),
            board: Grid::filled(None),
            hands: [Vec::new(), Vec::new()],
            side_to_move,
        }
    }

    pub fn from_position_string(data: &str) -> ShogiResult<Self> {
        decode_position(data)
    }

    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    #[inline]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(usize::from(id))
    }

    #[inline]
    pub fn id_at(&self, p: Point) -> Option<PieceId> {
        self.board.at(p).flatten()
    }

    #[inline]
    pub fn piece_at(&self, p: Point) -> Option<&Piece> {
        self.id_at(p).and_then(|id| self.piece(id))
    }

    #[inline]
    pub fn is_occupied(&self, p: Point) -> bool {
        self.id_at(p).is_some()
    }

    pub fn board(&self) -> &Grid<Option<PieceId>> {
        &self.board
    }

    /// Every piece ever created for this position, on board or in hand.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn hand(&self, side: Side) -> &[PieceId] {
        &self.hands[side.index()]
    }

    pub fn hand_pieces(&self, side: Side) -> impl Iterator<Item = &Piece> + '_ {
        self.hand(side).iter().filter_map(|&id| self.piece(id))
    }

    /// Hand contents by kind, sorted. Hand pieces are interchangeable.
    pub fn hand_kinds(&self, side: Side) -> Vec<PieceType> {
        let mut kinds: Vec<PieceType> = self.hand_pieces(side).map(Piece::kind).collect();
        kinds.sort();
        kinds
    }

    pub fn hand_piece_of_kind(&self, side: Side, kind: PieceType) -> Option<PieceId> {
        self.hand_pieces(side)
            .find(|piece| piece.kind() == kind)
            .map(Piece::id)
    }

    /// On-board pieces of `side` in row-major order.
    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = (Point, &Piece)> + '_ {
        self.board
            .cells()
            .filter_map(move |(p, cell)| {
                let piece = self.piece(cell?)?;
                (piece.owner() == side).then_some((p, piece))
            })
    }

    pub fn king_square(&self, side: Side) -> Option<Point> {
        self.board.find_first(|_, cell| {
            cell.and_then(|id| self.piece(id))
                .is_some_and(|piece| piece.kind() == PieceType::King && piece.owner() == side)
        })
    }

    /// Board as identity-free piece descriptions.
    pub fn snapshot(&self) -> Grid<Option<PieceView>> {
        self.board
            .map(|_, cell| cell.and_then(|id| self.piece(id)).map(Piece::view))
    }

    /// Same board contents, hand contents and side to move, ignoring piece
    /// identities and hand order.
    pub fn same_position(&self, other: &Position) -> bool {
        self.side_to_move == other.side_to_move
            && self.snapshot() == other.snapshot()
            && Side::BOTH
                .iter()
                .all(|&side| self.hand_kinds(side) == other.hand_kinds(side))
    }

    /// Move the piece on `from` to `to`, capturing whatever stands there.
    /// Returns the captured id. Legality is the caller's concern.
    pub(crate) fn relocate(&mut self, from: Point, to: Point, promote: bool) -> Option<PieceId> {
        let moved = self.id_at(from)?;
        let mover = self.pieces[usize::from(moved)].owner();

        let captured = self.id_at(to);
        if let Some(taken) = captured {
            self.pieces[usize::from(taken)].capture_by(mover);
            self.hands[mover.index()].push(taken);
        }

        if promote {
            self.pieces[usize::from(moved)].promote();
        }
        self.board.assign(to, Some(moved));
        self.board.assign(from, None);
        captured
    }

    /// Move `id` from the side-to-move's hand onto `to`.
    pub(crate) fn place_from_hand(&mut self, id: PieceId, to: Point) -> bool {
        let hand = &mut self.hands[self.side_to_move.index()];
        let Some(slot) = hand.iter().position(|&held| held == id) else {
            return false;
        };
        hand.remove(slot);
        self.board.assign(to, Some(id))
    }

    pub(crate) fn pass_turn(&mut self) {
        self.side_to_move = self.side_to_move.opposite();
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new_game()
    }
}

/// Home ranks as seen from `side`'s seat; White's call runs on a rotated grid.
fn place_home_ranks(grid: &mut Grid<Option<(PieceType, Side)>>, side: Side) {
    const BACK_RANK: [PieceType; 9] = [
        PieceType::Lance,
        PieceType::Knight,
        PieceType::Silver,
        PieceType::Gold,
        PieceType::King,
        PieceType::Gold,
        PieceType::Silver,
        PieceType::Knight,
        PieceType::Lance,
    ];
    for (x, kind) in BACK_RANK.iter().enumerate() {
        grid.assign(Point::new(x as i8, 8), Some((*kind, side)));
        grid.assign(Point::new(x as i8, 6), Some((PieceType::Pawn, side)));
    }
    grid.assign(Point::new(1, 7), Some((PieceType::Bishop, side)));
    grid.assign(Point::new(7, 7), Some((PieceType::Rook, side)));
}

/// Builds arbitrary positions and validates them.
///
/// Piece ids are assigned in placement order, then Black's hand, then
/// White's hand.
#[derive(Debug, Clone, Default)]
pub struct PositionBuilder {
    placements: Vec<(Point, PieceView)>,
    hands: [Vec<PieceType>; 2],
    side_to_move: Side,
}

impl PositionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn place(mut self, p: Point, kind: PieceType, owner: Side) -> Self {
        self.placements.push((
            p,
            PieceView {
                kind,
                owner,
                promoted: false,
            },
        ));
        self
    }

    pub fn place_promoted(mut self, p: Point, kind: PieceType, owner: Side) -> Self {
        self.placements.push((
            p,
            PieceView {
                kind,
                owner,
                promoted: true,
            },
        ));
        self
    }

    pub fn hand(mut self, side: Side, kind: PieceType) -> Self {
        self.hands[side.index()].push(kind);
        self
    }

    pub fn side_to_move(mut self, side: Side) -> Self {
        self.side_to_move = side;
        self
    }

    /// Checks: squares on the board and unique, promotion only on
    /// promotable kinds, no king in hand, exactly one king per side, and
    /// the side not to move is not in check.
    pub fn build(self) -> ShogiResult<Position> {
        let position = self.assemble()?;
        let waiting = position.side_to_move.opposite();
        if is_king_attacked(&position, waiting)? {
            return Err(invalid(format!(
                "{waiting} is in check but it is {} to move",
                position.side_to_move
            )));
        }
        Ok(position)
    }

    /// `build` without the check test, for states no legal game reaches.
    #[cfg(test)]
    pub(crate) fn build_with_exposed_king(self) -> ShogiResult<Position> {
        self.assemble()
    }

    fn assemble(self) -> ShogiResult<Position> {
        let mut position = Position::empty(self.side_to_move);

        for (p, view) in self.placements {
            if !p.in_bounds() {
                return Err(invalid(format!("square ({}, {}) is off the board", p.x, p.y)));
            }
            if position.is_occupied(p) {
                return Err(invalid(format!("square ({}, {}) is occupied twice", p.x, p.y)));
            }
            let id = next_id(&position)?;
            let mut piece = Piece::new(id, view.kind, view.owner);
            if view.promoted && !piece.promote() {
                return Err(invalid(format!("{:?} cannot be promoted", view.kind)));
            }
            position.pieces.push(piece);
            position.board.assign(p, Some(id));
        }

        for side in Side::BOTH {
            for &kind in &self.hands[side.index()] {
                if kind == PieceType::King {
                    return Err(invalid("a king cannot be held in hand".to_owned()));
                }
                let id = next_id(&position)?;
                position.pieces.push(Piece::new(id, kind, side));
                position.hands[side.index()].push(id);
            }
        }

        for side in Side::BOTH {
            let kings = position
                .pieces_of(side)
                .filter(|(_, piece)| piece.kind() == PieceType::King)
                .count();
            if kings != 1 {
                return Err(invalid(format!("{side} has {kings} kings, expected 1")));
            }
        }

        Ok(position)
    }
}

fn next_id(position: &Position) -> ShogiResult<PieceId> {
    PieceId::try_from(position.pieces.len()).map_err(|_| invalid("too many pieces".to_owned()))
}

fn invalid(message: String) -> ShogiError {
    ShogiError::InvalidPosition(message)
}
