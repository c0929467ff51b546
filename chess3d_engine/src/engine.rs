/// Chess3D Engine - scene, cameras and frame driver
///
/// The `Engine` owns the loaded scene, its render list, the registered
/// cameras and an optional device pose provider. `frame` runs one
/// iteration of the main loop: poll the device, apply hand grabs, render.
///
/// Logging goes through a process-wide logger stored behind a RwLock;
/// the associated functions `set_logger`, `reset_logger`, `log` and
/// `log_detailed` work without an engine instance.

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use glam::{Mat4, Vec3};
use crate::camera::{Camera, CameraRig};
use crate::error::{Error, Result};
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
use crate::scene::{
    DevicePose, FrameStats, GrabController, NodeDesc, NodeKey, PoseProvider,
    RenderContext, RenderList, Scene, SceneLoader,
};
use crate::{engine_bail, engine_info};

// ===== INTERNAL STATE =====

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

fn logger() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger::new())))
}

// ===== PUBLIC API =====

/// Scene, cameras and per-frame driver.
///
/// # Example
///
/// ```no_run
/// use chess3d_engine::chess3d::{Engine, Camera};
/// use chess3d_engine::chess3d::scene::{NodeDesc, LightDesc, RenderContext, Node};
/// use chess3d_engine::glam::{Mat4, Vec3};
///
/// struct Null;
/// impl RenderContext for Null {
///     fn render_node(&mut self, _: &Node, _: Mat4) -> bool { true }
///     fn set_additive_blending(&mut self, _: bool) {}
/// }
///
/// let mut engine = Engine::new();
/// engine.load_desc(&NodeDesc::group("[root]")
///     .with_child(NodeDesc::light("sun", LightDesc::default())));
/// engine.add_camera(Camera::perspective("main", 45.0, 16.0 / 9.0, 0.1, 100.0));
/// let stats = engine.frame(&mut Null)?;
/// # Ok::<(), chess3d_engine::chess3d::Error>(())
/// ```
pub struct Engine {
    scene: Scene,
    root: Option<NodeKey>,
    render_list: RenderList,
    cameras: Vec<Camera>,
    active_camera: usize,
    pose_provider: Option<Box<dyn PoseProvider>>,
    last_pose: Option<DevicePose>,
    grabs: GrabController,
    /// Set once the user moves the camera or switches side
    camera_rig: Option<CameraRig>,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            root: None,
            render_list: RenderList::new(),
            cameras: Vec::new(),
            active_camera: 0,
            pose_provider: None,
            last_pose: None,
            grabs: GrabController::default(),
            camera_rig: None,
        }
    }

    // ===== SCENE =====

    /// Replace the current scene with the one produced by `loader`.
    ///
    /// # Errors
    ///
    /// `Error::LoadFailed` if the loader fails, `Error::InvalidScene` if
    /// the description fails [`NodeDesc::validate`]. The previous scene
    /// is kept in both cases.
    pub fn load_scene(&mut self, loader: &mut dyn SceneLoader) -> Result<NodeKey> {
        let desc = match loader.load() {
            Ok(desc) => desc,
            Err(Error::LoadFailed(msg)) => {
                engine_bail!(LoadFailed, "chess3d::Engine", "{}", msg);
            }
            Err(other) => {
                engine_bail!(LoadFailed, "chess3d::Engine", "{}", other);
            }
        };
        desc.validate()?;
        Ok(self.load_desc(&desc))
    }

    /// Replace the current scene with an instantiated description.
    pub fn load_desc(&mut self, desc: &NodeDesc) -> NodeKey {
        self.scene.clear();
        self.render_list.clear();
        self.grabs.release_all();

        let root = self.scene.instantiate(desc);
        self.render_list.add_entry(&self.scene, root);
        self.root = Some(root);

        engine_info!(
            "chess3d::Engine",
            "Scene '{}' loaded: {} nodes, {} lights, {} renderables, {} pickables",
            desc.name,
            self.scene.len(),
            self.render_list.lights().len(),
            self.render_list.len(),
            self.render_list.pickables().len()
        );
        root
    }

    /// Root of the loaded scene
    pub fn root(&self) -> Option<NodeKey> {
        self.root
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn render_list(&self) -> &RenderList {
        &self.render_list
    }

    // ===== CAMERAS =====

    /// Register a camera and return its index. The first camera becomes active.
    pub fn add_camera(&mut self, camera: Camera) -> usize {
        self.cameras.push(camera);
        let index = self.cameras.len() - 1;
        engine_info!("chess3d::Engine", "Camera '{}' registered at index {}", self.cameras[index].name(), index);
        index
    }

    pub fn camera_count(&self) -> usize {
        self.cameras.len()
    }

    pub fn camera(&self, index: usize) -> Option<&Camera> {
        self.cameras.get(index)
    }

    /// # Errors
    ///
    /// `Error::InvalidCamera` if `index` is out of range.
    pub fn set_active_camera(&mut self, index: usize) -> Result<()> {
        if index >= self.cameras.len() {
            engine_bail!(
                InvalidCamera, "chess3d::Engine",
                "index {} out of range ({} cameras)", index, self.cameras.len()
            );
        }
        self.active_camera = index;
        Ok(())
    }

    pub fn active_camera_index(&self) -> usize {
        self.active_camera
    }

    pub fn active_camera(&self) -> Option<&Camera> {
        self.cameras.get(self.active_camera)
    }

    pub fn active_camera_mut(&mut self) -> Option<&mut Camera> {
        self.cameras.get_mut(self.active_camera)
    }

    /// Nudge the camera rig by `delta`. Engages the rig.
    pub fn move_camera(&mut self, delta: Vec3) {
        self.camera_rig.get_or_insert_with(CameraRig::new).move_by(delta);
    }

    /// Jump to the other side of the board. Engages the rig.
    pub fn switch_side(&mut self) {
        let rig = self.camera_rig.get_or_insert_with(CameraRig::new);
        rig.switch_side();
        engine_info!(
            "chess3d::Engine", "Camera switched to the {} side",
            if rig.is_white_side() { "white" } else { "black" }
        );
    }

    /// Camera rig, `None` until the camera was moved or switched
    pub fn camera_rig(&self) -> Option<&CameraRig> {
        self.camera_rig.as_ref()
    }

    // ===== DEVICE =====

    /// Install the device polled at the start of every frame.
    pub fn set_pose_provider(&mut self, provider: impl PoseProvider + 'static) {
        self.pose_provider = Some(Box::new(provider));
        self.last_pose = None;
    }

    /// Most recent pose reported by the provider
    pub fn last_pose(&self) -> Option<&DevicePose> {
        self.last_pose.as_ref()
    }

    pub fn grab_controller(&self) -> &GrabController {
        &self.grabs
    }

    pub fn grab_controller_mut(&mut self) -> &mut GrabController {
        &mut self.grabs
    }

    // ===== FRAME =====

    /// Run one frame.
    ///
    /// Polls the pose provider once (an empty poll reuses the previous
    /// pose), places the active camera (head pose composed with the camera
    /// rig once engaged), applies hand grabs to pickable nodes, then
    /// renders the list.
    ///
    /// # Errors
    ///
    /// `Error::InvalidCamera` if no camera is registered.
    pub fn frame(&mut self, ctx: &mut dyn RenderContext) -> Result<FrameStats> {
        if let Some(provider) = self.pose_provider.as_mut() {
            if let Some(pose) = provider.poll() {
                self.last_pose = Some(pose);
            }
        }

        let head = self.last_pose.as_ref().and_then(|pose| pose.head);
        if let (Some(world), Some(camera)) = (self.camera_world(head), self.cameras.get_mut(self.active_camera)) {
            camera.set_world_transform(world);
        }

        if let Some(pose) = &self.last_pose {
            self.grabs.update(&mut self.scene, self.render_list.pickables(), &pose.hands);
        }

        let Some(camera) = self.cameras.get(self.active_camera) else {
            engine_bail!(InvalidCamera, "chess3d::Engine", "no camera registered");
        };

        Ok(self.render_list.render(
            &self.scene,
            camera.view_matrix(),
            *camera.projection_matrix(),
            ctx,
        ))
    }

    /// Where the active camera goes this frame: the head behind the rig,
    /// the rig alone, or nowhere (camera left as the caller set it).
    fn camera_world(&self, head: Option<Mat4>) -> Option<Mat4> {
        match (&self.camera_rig, head) {
            (Some(rig), head) => Some(rig.world_transform(head)),
            (None, head) => head,
        }
    }

    // ===== LOGGING =====

    /// Set a custom logger
    ///
    /// Replaces the process-wide logger used by every engine_* macro.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use chess3d_engine::chess3d::Engine;
    /// use chess3d_engine::chess3d::log::{Logger, LogEntry};
    ///
    /// struct Silent;
    ///
    /// impl Logger for Silent {
    ///     fn log(&self, _entry: &LogEntry) {}
    /// }
    ///
    /// Engine::set_logger(Silent);
    /// ```
    pub fn set_logger<L: Logger + 'static>(logger_impl: L) {
        if let Ok(mut lock) = logger().write() {
            *lock = Box::new(logger_impl);
        }
    }

    /// Reset logger to default (DefaultLogger)
    pub fn reset_logger() {
        if let Ok(mut lock) = logger().write() {
            *lock = Box::new(DefaultLogger::new());
        }
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by macros like engine_info!, engine_warn!, etc.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        if let Ok(lock) = logger().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: None,
                line: None,
            });
        }
    }

    /// Internal logging method with file:line information (for ERROR logs)
    ///
    /// Used by engine_error! and engine_err! to include source location.
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        if let Ok(lock) = logger().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: Some(file),
                line: Some(line),
            });
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
