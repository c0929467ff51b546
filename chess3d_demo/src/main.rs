//! Headless chess demo.
//!
//! Loads the procedural chess scene, renders one frame through a counting
//! render context, then plays a short scripted game with a capture, an
//! undo and a redo, printing the board after each step.

use chess3d_demo::chess_scene::ChessSceneLoader;
use chess3d_demo::{Board, BoardDesc};
use chess3d_engine::chess3d::scene::{Node, RenderContext, Scene};
use chess3d_engine::chess3d::{Camera, Engine, Result};
use chess3d_engine::glam::{Mat4, Vec3};
use chess3d_engine::{engine_error, engine_info, engine_trace};

const SOURCE: &str = "chess3d::Demo";

/// Render context that records draw calls instead of issuing them.
#[derive(Default)]
struct CountingContext {
    draws: usize,
    blending: bool,
}

impl RenderContext for CountingContext {
    fn render_node(&mut self, node: &Node, model_view: Mat4) -> bool {
        self.draws += 1;
        engine_trace!(
            SOURCE, "draw '{}' at {:?} (additive: {})",
            node.name(), model_view.w_axis.truncate(), self.blending
        );
        true
    }

    fn set_additive_blending(&mut self, enabled: bool) {
        self.blending = enabled;
    }
}

enum Step {
    Up(u32),
    Down(u32),
    Left(u32),
    Right(u32),
}

/// Select `name`, compose a pending move and confirm it.
fn play(board: &mut Board, scene: &mut Scene, name: &str, steps: &[Step]) {
    if !board.set_selected_piece(name) {
        return;
    }
    for step in steps {
        let (count, apply): (u32, fn(&mut Board, &mut Scene)) = match *step {
            Step::Up(n) => (n, Board::move_up),
            Step::Down(n) => (n, Board::move_down),
            Step::Left(n) => (n, Board::move_left),
            Step::Right(n) => (n, Board::move_right),
        };
        for _ in 0..count {
            apply(board, scene);
        }
    }
    board.confirm_movement(scene);
    board.print_chessboard();
}

fn run() -> Result<()> {
    let mut engine = Engine::new();
    let mut loader = ChessSceneLoader::default();
    engine.load_scene(&mut loader)?;

    let mut camera = Camera::perspective("overview", 45.0, 16.0 / 9.0, 0.01, 10.0);
    camera.set_view(Mat4::look_at_rh(Vec3::new(0.0, 0.6, 0.9), Vec3::ZERO, Vec3::Y));
    engine.add_camera(camera);

    let mut ctx = CountingContext::default();
    let stats = engine.frame(&mut ctx)?;
    engine_info!(
        SOURCE, "Frame: {} lights, {} drawn, {} culled, {} failed",
        stats.lights, stats.drawn, stats.culled, stats.failed
    );

    let mut board = Board::new(BoardDesc {
        block_size: loader.block_size,
        ..BoardDesc::default()
    });
    let pieces = engine.render_list().pickables().to_vec();
    board.fill_chessboard(engine.scene(), &pieces)?;
    board.print_chessboard();

    let scene = engine.scene_mut();
    play(&mut board, scene, "p_white_pawn4", &[Step::Up(2)]);
    play(&mut board, scene, "p_black_pawn5", &[Step::Down(2)]);
    // Diagonal capture composed as right then up
    play(&mut board, scene, "p_white_pawn4", &[Step::Right(1), Step::Up(1)]);
    // Lands on its own pawn and is rejected
    play(&mut board, scene, "p_black_queen", &[Step::Left(1)]);

    board.undo(scene);
    board.undo(scene);
    board.print_chessboard();
    board.redo(scene);
    board.print_chessboard();

    let stats = engine.frame(&mut ctx)?;
    engine_info!(
        SOURCE, "Frame: {} drawn, {} culled, {} draws total, {} moves logged",
        stats.drawn, stats.culled, ctx.draws, board.history().len()
    );
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        engine_error!(SOURCE, "demo failed: {}", err);
        std::process::exit(1);
    }
}
