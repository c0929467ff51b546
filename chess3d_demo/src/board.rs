//! Chessboard state machine.
//!
//! The board owns the pieces, an 8x8 occupancy grid, the cemetery and the
//! move history. Piece transforms live in the engine's `Scene`, so every
//! operation that moves a piece takes the scene explicitly.
//!
//! Interaction commands (`move_*`, `confirm_movement`, `undo`, `redo`...)
//! never fail: unmet preconditions are logged at TRACE and ignored.

use chess3d_engine::chess3d::Result;
use chess3d_engine::chess3d::scene::{NodeKey, Scene};
use chess3d_engine::glam::{Mat4, Vec3};
use chess3d_engine::{engine_bail, engine_debug, engine_info, engine_trace};
use crate::cemetery::Cemetery;
use crate::layout::{parse_piece_name, Square, BOARD_SIZE};
use crate::moves::{Move, MoveHistory, MoveKind};
use crate::piece::{Piece, PieceId};

const SOURCE: &str = "chess3d::Board";

/// Board geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardDesc {
    /// Edge length of one cell in scene units
    pub block_size: f32,
    /// Distance between cemetery slots
    pub cemetery_spacing: f32,
    /// Slot 0 of the cemetery for captured white pieces
    pub white_cemetery: Mat4,
    /// Slot 0 of the cemetery for captured black pieces
    pub black_cemetery: Mat4,
}

impl Default for BoardDesc {
    fn default() -> Self {
        Self {
            block_size: 0.0835,
            cemetery_spacing: 0.09,
            white_cemetery: Mat4::from_translation(Vec3::new(0.3, 0.0, -0.42)),
            black_cemetery: Mat4::from_translation(Vec3::new(0.3, 0.0, 0.6)),
        }
    }
}

type Grid = [[Option<PieceId>; BOARD_SIZE as usize]; BOARD_SIZE as usize];

pub struct Board {
    desc: BoardDesc,
    table: Grid,
    pieces: Vec<Piece>,
    selected: Option<PieceId>,
    cemetery: Cemetery,
    history: MoveHistory,
}

impl Board {
    pub fn new(desc: BoardDesc) -> Self {
        let cemetery = Cemetery::new(desc.white_cemetery, desc.black_cemetery);
        Self {
            desc,
            table: Default::default(),
            pieces: Vec::new(),
            selected: None,
            cemetery,
            history: MoveHistory::new(),
        }
    }

    // ===== SETUP =====

    /// Create a piece for every node whose name encodes one
    /// (`p_<color>_<kind><n>`). Other nodes are skipped. Replaces any
    /// pieces already on the board. Returns the number of pieces placed.
    ///
    /// # Errors
    ///
    /// `Error::InvalidBoard` if two nodes claim the same starting square.
    pub fn fill_chessboard(&mut self, scene: &Scene, nodes: &[NodeKey]) -> Result<usize> {
        let mut table: Grid = Default::default();
        let mut pieces = Vec::new();

        for &key in nodes {
            let Some(node) = scene.node(key) else {
                continue;
            };
            let Some(parsed) = parse_piece_name(node.name()) else {
                continue;
            };
            let Some(start) = parsed.starting_square() else {
                engine_trace!(SOURCE, "'{}' has no starting square, skipped", node.name());
                continue;
            };

            let (row, col) = start.index();
            if let Some(PieceId(other)) = table[row][col] {
                let other: &Piece = &pieces[other];
                engine_bail!(
                    InvalidBoard, SOURCE,
                    "'{}' and '{}' both start on {}", other.name(), node.name(), start
                );
            }

            let id = PieceId(pieces.len());
            table[row][col] = Some(id);
            pieces.push(Piece::new(key, node.name(), parsed.color, parsed.kind, start, *node.transform()));
        }

        self.table = table;
        self.pieces = pieces;
        self.selected = None;
        self.cemetery.clear();
        self.history.clear();

        engine_info!(SOURCE, "Chessboard filled with {} pieces", self.pieces.len());
        Ok(self.pieces.len())
    }

    // ===== ACCESSORS =====

    pub fn desc(&self) -> &BoardDesc {
        &self.desc
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.0)
    }

    /// Piece committed on `square`
    pub fn piece_at(&self, square: Square) -> Option<PieceId> {
        let (row, col) = square.index();
        self.table[row][col]
    }

    /// Piece driven by the node named `name`
    pub fn find_piece(&self, name: &str) -> Option<PieceId> {
        self.pieces.iter().position(|p| p.name() == name).map(PieceId)
    }

    pub fn selected_piece(&self) -> Option<PieceId> {
        self.selected
    }

    pub fn cemetery(&self) -> &Cemetery {
        &self.cemetery
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    // ===== SELECTION =====

    /// Select the piece whose node is named `name`, searching the grid
    /// row by row and then the cemetery. Returns `false` (selection
    /// unchanged) when no piece matches.
    pub fn set_selected_piece(&mut self, name: &str) -> bool {
        let on_board = self.table.iter().flatten().flatten().copied();
        let in_cemetery = self.cemetery.deleted_pieces().iter().copied();

        let found = on_board
            .chain(in_cemetery)
            .find(|&id| self.pieces[id.0].name() == name);

        match found {
            Some(id) => {
                self.selected = Some(id);
                true
            }
            None => {
                engine_trace!(SOURCE, "no piece named '{}'", name);
                false
            }
        }
    }

    /// Select by scene node (e.g. a node picked by the grab controller)
    pub fn set_selected_node(&mut self, scene: &Scene, node: NodeKey) -> bool {
        match scene.node(node) {
            Some(node) => {
                let name = node.name().to_string();
                self.set_selected_piece(&name)
            }
            None => false,
        }
    }

    // ===== PENDING MOVES =====

    pub fn move_left(&mut self, scene: &mut Scene) {
        let block = self.desc.block_size;
        if let Some(piece) = self.selected_mut() {
            piece.move_left(scene, block);
        }
    }

    pub fn move_right(&mut self, scene: &mut Scene) {
        let block = self.desc.block_size;
        if let Some(piece) = self.selected_mut() {
            piece.move_right(scene, block);
        }
    }

    pub fn move_up(&mut self, scene: &mut Scene) {
        let block = self.desc.block_size;
        if let Some(piece) = self.selected_mut() {
            piece.move_up(scene, block);
        }
    }

    pub fn move_down(&mut self, scene: &mut Scene) {
        let block = self.desc.block_size;
        if let Some(piece) = self.selected_mut() {
            piece.move_down(scene, block);
        }
    }

    fn selected_mut(&mut self) -> Option<&mut Piece> {
        let id = self.selected?;
        self.pieces.get_mut(id.0)
    }

    /// Revert the selected piece's pending move without logging anything.
    pub fn cancel_movement(&mut self, scene: &mut Scene) {
        if let Some(piece) = self.selected_mut() {
            piece.reset_position(scene);
        }
    }

    // ===== CONFIRMATION =====

    /// Commit the selected piece's pending move. Ignored when nothing is
    /// selected, the piece is eliminated or it has not left its square.
    ///
    /// - empty destination: the piece moves, a `Relocation` is logged
    /// - own piece on the destination: a `Rejected` entry is logged and
    ///   the pending move is reverted
    /// - opponent on the destination: the mover's `Relocation` is logged,
    ///   the opponent goes to the cemetery with an `Elimination` entry,
    ///   then the mover takes the square
    pub fn confirm_movement(&mut self, scene: &mut Scene) {
        let Some(id) = self.selected else {
            engine_trace!(SOURCE, "confirm ignored: no piece selected");
            return;
        };
        let piece = &self.pieces[id.0];
        if piece.is_eliminated() {
            engine_trace!(SOURCE, "confirm ignored: '{}' is eliminated", piece.name());
            return;
        }
        let (Some(from), Some(to)) = (piece.square(), piece.temp_square()) else {
            return;
        };
        if from == to {
            engine_trace!(SOURCE, "confirm ignored: '{}' has no pending move", piece.name());
            return;
        }
        let color = piece.color();

        match self.piece_at(to) {
            None => {
                self.record(id, scene, MoveKind::Relocation);
                self.occupy(id, from, to, scene);
                engine_debug!(SOURCE, "'{}' moved {} -> {}", self.pieces[id.0].name(), from, to);
            }
            Some(occupant) if self.pieces[occupant.0].color() == color => {
                self.record(id, scene, MoveKind::Rejected);
                self.pieces[id.0].reset_position(scene);
                engine_debug!(SOURCE, "'{}' cannot land on own piece at {}", self.pieces[id.0].name(), to);
            }
            Some(occupant) => {
                self.record(id, scene, MoveKind::Relocation);

                let captured = Move::snapshot(occupant, &self.pieces[occupant.0], scene, MoveKind::Elimination);
                self.capture_piece(scene, occupant);
                if let Some(mut captured) = captured {
                    captured.set_eliminated(true);
                    captured.set_end_position(None);
                    self.add_move(captured);
                }

                self.occupy(id, from, to, scene);
                let taken = color.opponent();
                engine_debug!(
                    SOURCE, "'{}' captured '{}' on {} ({:?} captures: {})",
                    self.pieces[id.0].name(), self.pieces[occupant.0].name(), to,
                    taken, self.cemetery.eliminated(taken)
                );
            }
        }
    }

    fn record(&mut self, id: PieceId, scene: &Scene, kind: MoveKind) {
        if let Some(mv) = Move::snapshot(id, &self.pieces[id.0], scene, kind) {
            self.add_move(mv);
        }
    }

    /// Vacate `from`, put `id` on `to` and commit its position there.
    fn occupy(&mut self, id: PieceId, from: Square, to: Square, scene: &Scene) {
        self.set_cell(from, None);
        self.set_cell(to, Some(id));
        self.pieces[id.0].set_new_position(scene, Some(to));
    }

    fn set_cell(&mut self, square: Square, piece: Option<PieceId>) {
        let (row, col) = square.index();
        self.table[row][col] = piece;
    }

    /// Send `id` to its color's cemetery, in the slot given by that
    /// color's current count.
    pub fn capture_piece(&mut self, scene: &mut Scene, id: PieceId) {
        let Some(piece) = self.pieces.get_mut(id.0) else {
            return;
        };
        let color = piece.color();
        let slot = self.cemetery.eliminated(color);
        piece.remove(scene, self.cemetery.anchor(color), slot, self.desc.cemetery_spacing);
        self.cemetery.increment(color);
        self.cemetery.add_piece(id);
    }

    // ===== HISTORY =====

    /// Append to the history (see [`MoveHistory::push`]).
    pub fn add_move(&mut self, mv: Move) {
        self.history.push(mv);
    }

    /// Undo the last user action. A capture is undone together with the
    /// move that caused it.
    pub fn undo(&mut self, scene: &mut Scene) {
        if !self.history.can_undo() {
            engine_trace!(SOURCE, "undo ignored: nothing to undo");
            return;
        }

        while let Some(mv) = self.history.retreat() {
            let id = mv.piece();
            match mv.kind() {
                MoveKind::Elimination => {
                    self.restore(id, mv.start(), mv.start_transform(), scene);
                    let color = self.pieces[id.0].color();
                    self.pieces[id.0].replace();
                    self.cemetery.decrement(color);
                    self.cemetery.remove_piece(id);
                    engine_debug!(SOURCE, "undo: '{}' back on {}", self.pieces[id.0].name(), mv.start());
                }
                MoveKind::Relocation => {
                    if let Some(end) = mv.end() {
                        if self.piece_at(end) == Some(id) {
                            self.set_cell(end, None);
                        }
                    }
                    self.restore(id, mv.start(), mv.start_transform(), scene);
                    engine_debug!(SOURCE, "undo: '{}' back to {}", self.pieces[id.0].name(), mv.start());
                    break;
                }
                MoveKind::Rejected => break,
            }
        }
    }

    fn restore(&mut self, id: PieceId, square: Square, transform: &Mat4, scene: &mut Scene) {
        self.set_cell(square, Some(id));
        let piece = &mut self.pieces[id.0];
        piece.set_new_position(scene, Some(square));
        piece.set_new_transform(scene, *transform);
    }

    /// Reapply the next user action, re-capturing whatever sits on the
    /// destination.
    pub fn redo(&mut self, scene: &mut Scene) {
        let Some(mv) = self.history.advance() else {
            engine_trace!(SOURCE, "redo ignored: nothing to redo");
            return;
        };
        let id = mv.piece();

        match mv.kind() {
            MoveKind::Rejected => {}
            MoveKind::Elimination => self.capture_piece(scene, id),
            MoveKind::Relocation => {
                let Some(end) = mv.end() else {
                    return;
                };
                if let Some(occupant) = self.piece_at(end).filter(|&p| p != id) {
                    let paired = self.history.peek_next().is_some_and(|next| {
                        next.kind() == MoveKind::Elimination && next.piece() == occupant
                    });
                    if paired {
                        self.history.advance();
                    }
                    self.capture_piece(scene, occupant);
                }

                self.set_cell(end, Some(id));
                self.set_cell(mv.start(), None);
                let piece = &mut self.pieces[id.0];
                piece.set_new_position(scene, Some(end));
                piece.set_new_transform(scene, *mv.end_transform());
                engine_debug!(SOURCE, "redo: '{}' {} -> {}", piece.name(), mv.start(), end);
            }
        }
    }

    /// Put every piece back on its starting square, empty the cemetery
    /// and forget the history. The selection is kept.
    pub fn reset_board(&mut self, scene: &mut Scene) {
        self.table = Default::default();
        for (index, piece) in self.pieces.iter_mut().enumerate() {
            let (row, col) = piece.start_square().index();
            self.table[row][col] = Some(PieceId(index));
            piece.reset(scene);
        }
        self.cemetery.clear();
        self.history.clear();
        engine_debug!(SOURCE, "board reset");
    }

    // ===== DISPLAY =====

    /// Occupancy grid, one line per row (row 0 first), cells separated by
    /// tabs, `empty` for free cells.
    pub fn layout_string(&self) -> String {
        let mut out = String::new();
        for row in &self.table {
            let cells: Vec<&str> = row
                .iter()
                .map(|cell| match cell {
                    Some(id) => self.pieces[id.0].name(),
                    None => "empty",
                })
                .collect();
            out.push_str(&cells.join("\t"));
            out.push('\n');
        }
        out
    }

    /// Log the occupancy grid at INFO.
    pub fn print_chessboard(&self) {
        engine_info!(SOURCE, "\n{}", self.layout_string());
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod tests;
