//! Error types for the Chess3D engine
//!
//! Errors are only raised at wiring seams: scene instantiation, node
//! parenting, camera selection and board setup. Per-frame rendering and
//! board interaction never fail; they degrade to no-ops instead.

use std::fmt;

/// Result type for Chess3D operations
pub type Result<T> = std::result::Result<T, Error>;

/// Chess3D errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Node key does not exist, or the requested parenting is illegal
    InvalidNode(String),

    /// Scene description is malformed
    InvalidScene(String),

    /// Camera index out of range, or no camera registered
    InvalidCamera(String),

    /// External scene loader reported a failure
    LoadFailed(String),

    /// Board could not be populated from the scene
    InvalidBoard(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidNode(msg) => write!(f, "Invalid node: {}", msg),
            Error::InvalidScene(msg) => write!(f, "Invalid scene: {}", msg),
            Error::InvalidCamera(msg) => write!(f, "Invalid camera: {}", msg),
            Error::LoadFailed(msg) => write!(f, "Scene loading failed: {}", msg),
            Error::InvalidBoard(msg) => write!(f, "Invalid board: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Build an [`Error`] variant and log it at ERROR severity (with file:line).
///
/// ```ignore
/// let err = engine_err!(InvalidNode, "chess3d::Scene", "node {:?} not found", key);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($variant:ident, $source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::chess3d::Engine::log_detailed(
            $crate::chess3d::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!()
        );
        $crate::chess3d::Error::$variant(message)
    }};
}

/// Log an error and return it from the enclosing function.
///
/// ```ignore
/// engine_bail!(InvalidCamera, "chess3d::Engine", "index {} out of range", index);
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($variant:ident, $source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($variant, $source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
