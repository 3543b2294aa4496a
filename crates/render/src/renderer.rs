use glam::Vec3;
use ironsight_common::Transform;
use ironsight_kernel::{Player, Projectile, Session, World};

/// Camera state for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// Eye position and orientation.
    pub eye: Transform,
    /// Unit look direction.
    pub forward: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            eye: Transform::default(),
            forward: Vec3::NEG_Z,
            fov_degrees: 75.0,
        }
    }
}

impl ViewState {
    pub fn from_player(player: &Player) -> Self {
        Self {
            eye: player.eye(),
            forward: player.view_direction(),
            ..Self::default()
        }
    }
}

/// Read-only view of everything a frame draws.
#[derive(Debug, Clone, Copy)]
pub struct RenderScene<'a> {
    pub world: &'a World,
    pub projectiles: &'a [Projectile],
    pub tick: u64,
}

impl<'a> RenderScene<'a> {
    pub fn from_session(session: &'a Session) -> Self {
        Self {
            world: session.world(),
            projectiles: session.projectiles(),
            tick: session.tick_count(),
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the scene and view, then produces output. It never
/// mutates session state.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&mut self, scene: &RenderScene<'_>, view: &ViewState) -> Self::Output;
}

/// Renderer that draws nothing. For headless runs that only need the simulation.
#[derive(Debug, Default)]
pub struct NullRenderer {
    frames: u64,
}

impl NullRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for NullRenderer {
    type Output = ();

    fn render(&mut self, _scene: &RenderScene<'_>, _view: &ViewState) {
        self.frames += 1;
    }
}

/// Debug text renderer.
///
/// Produces a human-readable dump of the scene: camera, enemies and
/// projectiles. Useful for CLI output, logging and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    /// Cap on projectile lines per frame.
    pub max_projectile_lines: usize,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self {
            max_projectile_lines: 8,
        }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&mut self, scene: &RenderScene<'_>, view: &ViewState) -> String {
        let mut out = String::new();
        let p = view.eye.position;
        let f = view.forward;
        out.push_str(&format!("=== Frame (tick={}) ===\n", scene.tick));
        out.push_str(&format!(
            "Camera: eye=({:.2}, {:.2}, {:.2}) look=({:.2}, {:.2}, {:.2}) fov={:.0}\n",
            p.x, p.y, p.z, f.x, f.y, f.z, view.fov_degrees
        ));
        out.push_str(&format!("Enemies: {}\n", scene.world.enemy_count()));
        for e in scene.world.enemies() {
            out.push_str(&format!(
                "  [{}] {:?} hp={} pos=({:.2}, {:.2}, {:.2}) dist={:.1}\n",
                e.id,
                e.variant,
                e.hp,
                e.position.x,
                e.position.y,
                e.position.z,
                World::distance(e.position, p)
            ));
        }
        out.push_str(&format!("Projectiles: {}\n", scene.projectiles.len()));
        for proj in scene.projectiles.iter().take(self.max_projectile_lines) {
            out.push_str(&format!(
                "  <{}> pos=({:.1}, {:.1}, {:.1}) traveled={:.1}\n",
                proj.id.0, proj.position.x, proj.position.y, proj.position.z, proj.traveled
            ));
        }
        out
    }
}
