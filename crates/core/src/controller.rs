//! Controller module - player, enemies, projectiles and their rules
//!
//! The controller owns every gameplay entity and advances them once per
//! frame:
//!
//! - [`Controller::handle_input`]: mode transitions, aiming, shooting, driving
//! - [`Controller::update_enemies`]: spawn timer and enemy approach/fire AI
//! - [`Controller::handle_collisions`]: projectile hits and player death
//!
//! Nothing here touches the host. Pointer capture and cursor visibility
//! changes come back as [`HostCommand`]s inside a [`Transition`].
//!
//! Projectiles are instantaneous rays. They never travel and never expire;
//! they stay on screen until a collision consumes them.

use arrayvec::ArrayVec;
use log::{debug, info, trace};

use crate::config::GameConfig;
use crate::projection::Camera;
use crate::rng::RandomSource;
use crate::scene::SceneState;
use crate::types::*;

/// Monotonic id for spawned entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// The player tank.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: GroundPos,
    /// Yaw in radians; 0 faces +z.
    pub yaw: f64,
    pub health: i32,
    /// Game-clock time of the last accepted shot.
    pub last_shot: Option<f64>,
}

impl Player {
    pub fn new(health: i32) -> Self {
        Self {
            pos: GroundPos::default(),
            yaw: 0.0,
            health,
            last_shot: None,
        }
    }

    pub fn camera(&self) -> Camera {
        Camera::new(self.pos, self.yaw)
    }

    pub fn heading(&self) -> GroundPos {
        GroundPos::heading(self.yaw)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub id: EntityId,
    pub pos: GroundPos,
    /// Not used by the AI.
    pub yaw: f64,
    pub health: f64,
}

/// Who fired a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Owner {
    Player,
    Enemy,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub id: EntityId,
    pub start: GroundPos,
    pub end: GroundPos,
    pub owner: Owner,
}

impl Projectile {
    pub fn is_player(&self) -> bool {
        self.owner == Owner::Player
    }
}

/// Side-effect commands emitted by a single transition.
pub type Commands = ArrayVec<HostCommand, 4>;

/// A mode change plus the host commands that go with it.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub mode: GameMode,
    pub commands: Commands,
}

impl Transition {
    /// Menu -> game: hide the pointer and capture it.
    pub fn enter_game() -> Self {
        Self::with(GameMode::Playing, [HostCommand::HidePointer, HostCommand::CapturePointer])
    }

    /// Game -> menu: show the pointer and release it.
    pub fn enter_menu() -> Self {
        Self::with(GameMode::Menu, [HostCommand::ShowPointer, HostCommand::ReleasePointer])
    }

    fn with(mode: GameMode, commands: [HostCommand; 2]) -> Self {
        let mut out = Commands::new();
        out.extend(commands);
        Self {
            mode,
            commands: out,
        }
    }
}

/// What the loop should do after one input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFlow {
    Continue,
    /// Stop processing input for the rest of this frame.
    EndFrame,
    /// Terminate the loop.
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputResponse {
    pub flow: InputFlow,
    pub transition: Option<Transition>,
}

impl InputResponse {
    const CONTINUE: InputResponse = InputResponse {
        flow: InputFlow::Continue,
        transition: None,
    };
}

/// Owns and simulates every gameplay entity.
#[derive(Debug, Clone)]
pub struct Controller {
    config: GameConfig,
    player: Player,
    enemies: Vec<Enemy>,
    projectiles: Vec<Projectile>,
    spawn_timer: f64,
    next_id: u32,
}

impl Controller {
    pub fn new(config: GameConfig) -> Self {
        Self {
            player: Player::new(config.max_health),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            spawn_timer: 0.0,
            next_id: 0,
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn spawn_timer(&self) -> f64 {
        self.spawn_timer
    }

    fn alloc_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Place an enemy directly (used by scripted scenarios and tests).
    pub fn add_enemy(&mut self, pos: GroundPos) -> EntityId {
        let id = self.alloc_id();
        self.enemies.push(Enemy {
            id,
            pos,
            yaw: 0.0,
            health: 1.0,
        });
        id
    }

    /// Place a projectile directly (used by scripted scenarios and tests).
    pub fn add_projectile(&mut self, start: GroundPos, end: GroundPos, owner: Owner) -> EntityId {
        let id = self.alloc_id();
        self.projectiles.push(Projectile {
            id,
            start,
            end,
            owner,
        });
        id
    }

    /// Apply one input event.
    ///
    /// `held` is the continuous key state, sampled on every call in game mode.
    /// `now` is the game clock in seconds.
    pub fn handle_input(
        &mut self,
        mode: GameMode,
        event: &InputEvent,
        held: HeldKeys,
        dt: f64,
        now: f64,
        scene: &mut SceneState,
    ) -> InputResponse {
        match mode {
            GameMode::Menu => match event {
                InputEvent::KeyDown(Key::Start) => InputResponse {
                    flow: InputFlow::Continue,
                    transition: Some(Transition::enter_game()),
                },
                InputEvent::KeyDown(Key::Quit) => InputResponse {
                    flow: InputFlow::Quit,
                    transition: None,
                },
                _ => InputResponse::CONTINUE,
            },
            GameMode::Playing => {
                match *event {
                    InputEvent::KeyDown(Key::Quit) => {
                        return InputResponse {
                            flow: InputFlow::EndFrame,
                            transition: Some(Transition::enter_menu()),
                        };
                    }
                    InputEvent::PointerMotion { dx, dy } => {
                        trace!("pointer motion: rel=({:.1}, {:.1})", dx, dy);
                        self.player.yaw -= dx * self.config.pointer_sensitivity * dt;
                    }
                    InputEvent::PointerDown {
                        button: MouseButton::Primary,
                        pos,
                    } => {
                        trace!("primary click at ({:.0}, {:.0})", pos.x, pos.y);
                        self.fire(now, scene);
                    }
                    _ => {}
                }

                self.drive(held, dt);
                scene.reset_glow();
                InputResponse::CONTINUE
            }
        }
    }

    /// Fire from the player if the cooldown has elapsed. Returns whether a
    /// projectile was created.
    pub fn fire(&mut self, now: f64, scene: &mut SceneState) -> bool {
        if let Some(last) = self.player.last_shot {
            if now - last <= self.config.shot_cooldown {
                return false;
            }
        }
        self.player.last_shot = Some(now);
        let start = self.player.pos;
        let end = start.offset(self.player.heading(), self.config.shot_range);
        self.add_projectile(start, end, Owner::Player);
        scene.reset_glow();
        true
    }

    /// Continuous movement and rotation from held keys.
    pub fn drive(&mut self, held: HeldKeys, dt: f64) {
        let step = self.config.player_speed * dt;
        if held.advance {
            self.player.pos = self.player.pos.offset(self.player.heading(), step);
        }
        if held.retreat {
            self.player.pos = self.player.pos.offset(self.player.heading(), -step);
        }
        let turn = self.config.player_rotation_speed * dt;
        if held.rotate_left {
            self.player.yaw += turn;
        }
        if held.rotate_right {
            self.player.yaw -= turn;
        }
    }

    /// Advance the spawn timer and run the enemy AI for one tick.
    pub fn update_enemies(&mut self, dt: f64, rng: &mut impl RandomSource) {
        self.spawn_timer += dt;
        if self.spawn_timer > self.config.spawn_interval {
            self.spawn_timer = 0.0;
            self.spawn_enemy(rng);
        }

        let target = self.player.pos;
        let fire_chance = self.config.enemy_fire.chance(dt);
        let mut shots = Vec::new();

        for enemy in &mut self.enemies {
            let dx = target.x - enemy.pos.x;
            let dz = target.z - enemy.pos.z;
            let distance = dx.hypot(dz);
            if distance == 0.0 {
                // No direction to move or aim in.
                continue;
            }
            let dir = GroundPos::new(dx / distance, dz / distance);
            if distance > self.config.enemy_stop_radius {
                enemy.pos = enemy.pos.offset(dir, self.config.enemy_speed * dt);
            }
            if rng.chance(fire_chance) {
                shots.push((enemy.pos, enemy.pos.offset(dir, self.config.shot_range)));
            }
        }

        for (start, end) in shots {
            self.add_projectile(start, end, Owner::Enemy);
        }
    }

    fn spawn_enemy(&mut self, rng: &mut impl RandomSource) {
        let angle = rng.uniform(0.0, std::f64::consts::TAU);
        let distance = rng.uniform(self.config.spawn_min_distance, self.config.spawn_max_distance);
        let pos = self.player.pos.offset(GroundPos::heading(angle), distance);
        let id = self.add_enemy(pos);
        debug!(
            "spawned enemy {:?} at ({:.0}, {:.0}), {} alive",
            id,
            pos.x,
            pos.z,
            self.enemies.len()
        );
    }

    /// Resolve projectile hits, then queue every surviving projectile for drawing.
    ///
    /// Returns the menu transition when the player dies.
    pub fn handle_collisions(&mut self, scene: &mut SceneState) -> Option<Transition> {
        // Iterate a snapshot; remove from the live collections by id.
        let snapshot = self.projectiles.clone();
        for proj in &snapshot {
            match proj.owner {
                Owner::Player => {
                    let hit = self
                        .enemies
                        .iter()
                        .position(|e| e.pos.distance(proj.start) < self.config.hit_radius);
                    if let Some(idx) = hit {
                        let enemy = self.enemies.remove(idx);
                        self.remove_projectile(proj.id);
                        debug!("enemy {:?} destroyed by {:?}", enemy.id, proj.id);
                    }
                }
                Owner::Enemy => {
                    if self.player.pos.distance(proj.start) < self.config.hit_radius {
                        self.player.health = (self.player.health - self.config.hit_damage).max(0);
                        self.remove_projectile(proj.id);
                        debug!("player hit by {:?}, health {}", proj.id, self.player.health);
                        if self.player.health <= 0 {
                            self.reset_after_death(scene);
                            return Some(Transition::enter_menu());
                        }
                    }
                }
            }
        }

        let camera = self.player.camera();
        for proj in &self.projectiles {
            let seg = camera.project_segment(
                Point3D::on_ground(proj.start),
                Point3D::on_ground(proj.end),
            );
            if let Some(seg) = seg {
                scene.push(seg);
            }
        }
        None
    }

    fn remove_projectile(&mut self, id: EntityId) {
        if let Some(idx) = self.projectiles.iter().position(|p| p.id == id) {
            self.projectiles.remove(idx);
        }
    }

    fn reset_after_death(&mut self, scene: &mut SceneState) {
        info!("player destroyed, returning to menu");
        self.player.health = self.config.max_health;
        self.enemies.clear();
        self.projectiles.clear();
        scene.clear_lines();
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
