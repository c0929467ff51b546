/// Procedural chess scene.
///
/// Builds the scene the board expects: two lights, a board mesh centered on
/// the origin and one grabbable mesh per piece, each resting on the center
/// of its starting cell. Row 0 lies toward -Z, column 0 toward -X.

use chess3d_engine::chess3d::Result;
use chess3d_engine::chess3d::scene::{LightDesc, LightType, NodeDesc, SceneLoader};
use chess3d_engine::glam::{Mat4, Vec3};
use crate::layout::{starting_square, Square, BOARD_SIZE};

const BACK_RANK: [&str; 8] = ["rook1", "horse1", "bishop1", "king", "queen", "bishop2", "horse2", "rook2"];

/// Node names of a full set, white first.
pub fn piece_names() -> Vec<String> {
    let mut names = Vec::with_capacity(32);
    for color in ["white", "black"] {
        names.extend(BACK_RANK.iter().map(|kind| format!("p_{}_{}", color, kind)));
        names.extend((1..=BOARD_SIZE).map(|n| format!("p_{}_pawn{}", color, n)));
    }
    names
}

#[derive(Debug, Clone)]
pub struct ChessSceneLoader {
    /// Edge length of one cell
    pub block_size: f32,
    /// Bounding radius of a piece mesh
    pub piece_radius: f32,
}

impl ChessSceneLoader {
    pub fn new(block_size: f32) -> Self {
        Self { block_size, piece_radius: 0.03 }
    }

    /// Local transform of a piece standing on `square`
    pub fn cell_transform(&self, square: Square) -> Mat4 {
        let half = (BOARD_SIZE as f32 - 1.0) * 0.5;
        Mat4::from_translation(Vec3::new(
            (square.col as f32 - half) * self.block_size,
            0.0,
            (square.row as f32 - half) * self.block_size,
        ))
    }

    /// Scene description, root first.
    pub fn describe(&self) -> NodeDesc {
        let key_light = NodeDesc::light("light_key", LightDesc::default())
            .with_translation(Vec3::new(0.0, 1.0, 0.3));
        let fill_light = NodeDesc::light(
            "light_fill",
            LightDesc {
                light_type: LightType::Directional,
                intensity: 2.0,
                ..LightDesc::default()
            },
        )
        .with_translation(Vec3::new(-0.5, 1.0, -0.5));

        let board_radius = self.block_size * BOARD_SIZE as f32 * std::f32::consts::FRAC_1_SQRT_2;
        let chessboard = NodeDesc::mesh("chessboard").with_bounding_radius(board_radius);

        let pieces = piece_names().into_iter().filter_map(|name| {
            let square = starting_square(&name)?;
            Some(
                NodeDesc::mesh(name)
                    .with_transform(self.cell_transform(square))
                    .with_bounding_radius(self.piece_radius)
                    .grabbable(),
            )
        });

        NodeDesc::group("chess_scene")
            .with_child(key_light)
            .with_child(fill_light)
            .with_child(chessboard)
            .with_children(pieces)
    }
}

impl Default for ChessSceneLoader {
    fn default() -> Self {
        Self::new(0.0835)
    }
}

impl SceneLoader for ChessSceneLoader {
    fn load(&mut self) -> Result<NodeDesc> {
        Ok(self.describe())
    }
}

#[cfg(test)]
#[path = "chess_scene_tests.rs"]
mod tests;
