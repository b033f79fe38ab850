//! Renderer: turns game state into a host-independent [`Frame`].
//!
//! The renderer projects the ground grid and enemy wireframes into the
//! [`SceneState`] draw list, then emits every buffered segment tinted by the
//! CRT glow, followed by the HUD. Hosts rasterize the resulting frame; see
//! `battlezone-term`'s `GameView`.

use arrayvec::ArrayVec;

use crate::controller::Controller;
use crate::projection::Camera;
use crate::scene::SceneState;
use crate::types::*;

/// Menu title color.
pub const TITLE_COLOR: Rgb = Rgb::new(0, 100, 0);

/// Menu and HUD text color.
pub const TEXT_COLOR: Rgb = Rgb::new(50, 50, 50);

pub const MENU_TITLE_POS: Point2D = Point2D::new(320.0, 150.0);

pub const MENU_LINES: [&str; 7] = [
    "Controls:",
    "W/S: Move Forward/Backward",
    "A/D: Rotate Left/Right",
    "Mouse: Aim",
    "Left Click: Shoot",
    "Q: Quit",
    "Space: Start Game",
];

pub const HUD_POS: Point2D = Point2D::new(10.0, 10.0);

/// Box edges as corner index pairs: bottom ring, top ring, verticals.
pub const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// A colored segment to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawLine {
    pub seg: LineSegment,
    pub color: Rgb,
    pub width: f64,
}

/// A text run anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawText {
    pub pos: Point2D,
    pub text: String,
    pub color: Rgb,
}

/// Everything a host needs to present one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub mode: GameMode,
    pub background: Rgb,
    pub lines: Vec<DrawLine>,
    pub texts: Vec<DrawText>,
}

impl Frame {
    pub fn new() -> Self {
        Self {
            mode: GameMode::Menu,
            background: Rgb::BLACK,
            lines: Vec::with_capacity(LINE_CAPACITY),
            texts: Vec::with_capacity(MENU_LINES.len() + 1),
        }
    }

    fn reset(&mut self, mode: GameMode) {
        self.mode = mode;
        self.background = Rgb::BLACK;
        self.lines.clear();
        self.texts.clear();
    }

    fn text(&mut self, pos: Point2D, text: impl Into<String>, color: Rgb) {
        self.texts.push(DrawText {
            pos,
            text: text.into(),
            color,
        });
    }

    /// All text concatenated, one run per line (useful in tests and logs).
    pub fn text_dump(&self) -> String {
        let mut out = String::new();
        for t in &self.texts {
            out.push_str(&t.text);
            out.push('\n');
        }
        out
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

/// Eight wireframe corners around an enemy ground position.
pub fn enemy_corners(pos: GroundPos) -> [Point3D; 8] {
    let h = ENEMY_HALF_WIDTH;
    let ring = [(-h, -h), (h, -h), (h, h), (-h, h)];
    let mut out = [Point3D::default(); 8];
    for (i, (ox, oz)) in ring.iter().enumerate() {
        out[i] = Point3D::new(pos.x + ox, 0.0, pos.z + oz);
        out[i + 4] = Point3D::new(pos.x + ox, ENEMY_HEIGHT, pos.z + oz);
    }
    out
}

/// Green phosphor color for a brightness in `[0, 1]`.
pub fn glow_color(brightness: f64) -> Rgb {
    Rgb::new(0, (255.0 * brightness) as u8, 0)
}

/// Produces frames; keeps one [`Frame`] allocation alive across calls.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    frame: Frame,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Black screen, title and the control list. No 3D content.
    pub fn render_menu(&mut self) -> &Frame {
        self.frame.reset(GameMode::Menu);
        for (i, line) in MENU_LINES.iter().enumerate() {
            let pos = Point2D::new(300.0, 200.0 + i as f64 * 20.0);
            self.frame.text(pos, *line, TEXT_COLOR);
        }
        self.frame.text(MENU_TITLE_POS, WINDOW_TITLE, TITLE_COLOR);
        &self.frame
    }

    /// Project grid and enemies into the scene, then emit the draw list and HUD.
    pub fn render_game(&mut self, controller: &Controller, scene: &mut SceneState) -> &Frame {
        let camera = controller.player().camera();
        project_grid(&camera, scene);
        for enemy in controller.enemies() {
            project_enemy(&camera, enemy.pos, scene);
        }

        self.frame.reset(GameMode::Playing);
        let color = glow_color(scene.glow().brightness());
        self.frame.lines.extend(scene.lines().map(|&seg| DrawLine {
            seg,
            color,
            width: LINE_WIDTH,
        }));

        let hud = format!(
            "Health: {}  Enemies: {}",
            controller.player().health,
            controller.enemies().len()
        );
        self.frame.text(HUD_POS, hud, TEXT_COLOR);
        &self.frame
    }
}

/// Ground grid over x in [-500, 500], z in [0, 1000).
pub fn project_grid(camera: &Camera, scene: &mut SceneState) {
    for z in (0..1000).step_by(GRID_SPACING as usize) {
        for x in (-500..=500).step_by(GRID_SPACING as usize) {
            let (x, z, step) = (f64::from(x), f64::from(z), f64::from(GRID_SPACING));
            let Some(p1) = camera.project(Point3D::new(x, 0.0, z)) else {
                continue;
            };
            if let Some(p2) = camera.project(Point3D::new(x + step, 0.0, z)) {
                scene.add_line(p1, p2);
            }
            if let Some(p3) = camera.project(Point3D::new(x, 0.0, z + step)) {
                scene.add_line(p1, p3);
            }
        }
    }
}

/// Box wireframe; drawn only when all eight corners are visible.
pub fn project_enemy(camera: &Camera, pos: GroundPos, scene: &mut SceneState) -> bool {
    let projected: Option<ArrayVec<Point2D, 8>> = enemy_corners(pos)
        .iter()
        .map(|&corner| camera.project(corner))
        .collect();
    let Some(projected) = projected else {
        return false;
    };
    for (i, j) in BOX_EDGES {
        scene.add_line(projected[i], projected[j]);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;

    #[test]
    fn menu_has_title_and_controls_only() {
        let mut r = Renderer::new();
        let frame = r.render_menu();
        assert_eq!(frame.mode, GameMode::Menu);
        assert!(frame.lines.is_empty());
        let dump = frame.text_dump();
        assert!(dump.contains("Battlezone: Vector CRT"));
        assert!(dump.contains("Space: Start Game"));
        assert_eq!(frame.texts.len(), 8);
        assert_eq!(frame.texts[0].pos, Point2D::new(300.0, 200.0));
        assert_eq!(frame.texts[6].pos, Point2D::new(300.0, 320.0));
    }

    #[test]
    fn corners_form_box() {
        let c = enemy_corners(GroundPos::new(100.0, 200.0));
        assert_eq!(c[0], Point3D::new(80.0, 0.0, 180.0));
        assert_eq!(c[2], Point3D::new(120.0, 0.0, 220.0));
        assert_eq!(c[6], Point3D::new(120.0, 40.0, 220.0));
    }

    #[test]
    fn visible_enemy_adds_twelve_edges() {
        let mut scene = SceneState::new();
        let cam = Camera::default();
        assert!(project_enemy(&cam, GroundPos::new(0.0, 300.0), &mut scene));
        assert_eq!(scene.len(), 12);
    }

    #[test]
    fn partially_visible_enemy_is_skipped() {
        let mut scene = SceneState::new();
        let cam = Camera::default();
        // Near corners fall inside the near plane.
        assert!(!project_enemy(&cam, GroundPos::new(0.0, 25.0), &mut scene));
        // Straddles the right screen edge.
        assert!(!project_enemy(&cam, GroundPos::new(200.0, 200.0), &mut scene));
        assert!(scene.is_empty());
    }

    #[test]
    fn grid_from_origin_fills_scene() {
        let mut scene = SceneState::with_capacity(1000);
        project_grid(&Camera::default(), &mut scene);
        assert!(!scene.is_empty());
        for seg in scene.lines() {
            for p in [seg.start, seg.end] {
                assert!((0.0..=SCREEN_WIDTH).contains(&p.x));
                assert!((0.0..=SCREEN_HEIGHT).contains(&p.y));
            }
        }
    }

    #[test]
    fn game_frame_uses_glow_and_hud() {
        let mut controller = Controller::default();
        controller.add_enemy(GroundPos::new(0.0, 300.0));
        let mut scene = SceneState::new();
        scene.update_glow(2.0, &mut ScriptedRng::constant(0.5));

        let mut r = Renderer::new();
        let frame = r.render_game(&controller, &mut scene);
        assert_eq!(frame.mode, GameMode::Playing);
        assert_eq!(frame.lines.len(), scene.len());
        // intensity 0.9, flicker 0 -> green 229.
        assert!(frame
            .lines
            .iter()
            .all(|l| l.color == Rgb::new(0, 229, 0) && l.width == LINE_WIDTH));
        assert_eq!(frame.texts.len(), 1);
        assert_eq!(frame.texts[0].text, "Health: 100  Enemies: 1");
        assert_eq!(frame.texts[0].pos, HUD_POS);
    }

    #[test]
    fn glow_color_scales_green() {
        assert_eq!(glow_color(1.0), Rgb::new(0, 255, 0));
        assert_eq!(glow_color(0.5), Rgb::new(0, 127, 0));
    }
}
