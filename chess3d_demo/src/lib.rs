/*!
# Chess3D Demo - Chess Layer

Chess rules layer on top of `chess3d_engine`: a board whose pieces are
scene nodes, pending moves confirmed into an undoable history, and a
cemetery for captured pieces.

The layer never owns scene nodes. Piece nodes are found by name
(`p_<color>_<kind><n>`) when the board is filled, and every operation that
moves a piece takes the engine's `Scene`.

```no_run
use chess3d_demo::{Board, BoardDesc};
use chess3d_engine::chess3d::Engine;

# fn run(engine: &mut Engine) -> chess3d_engine::chess3d::Result<()> {
let mut board = Board::new(BoardDesc::default());
let nodes = engine.render_list().pickables().to_vec();
board.fill_chessboard(engine.scene(), &nodes)?;

board.set_selected_piece("p_white_pawn4");
board.move_up(engine.scene_mut());
board.move_up(engine.scene_mut());
board.confirm_movement(engine.scene_mut());
board.undo(engine.scene_mut());
# Ok(())
# }
```
*/

mod layout;
mod piece;
mod moves;
mod cemetery;
mod board;
pub mod chess_scene;

pub use layout::{Square, PieceColor, PieceKind, PieceName, BOARD_SIZE, parse_piece_name, starting_square};
pub use piece::{Piece, PieceId, cemetery_slot};
pub use moves::{Move, MoveKind, MoveHistory};
pub use cemetery::Cemetery;
pub use board::{Board, BoardDesc};
