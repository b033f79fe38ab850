//! Game module - the top-level state machine and frame step
//!
//! [`Game`] owns the controller, the renderer and the scene, tracks the
//! menu/game mode and the game clock, and runs one loop iteration per
//! [`Game::step`]: input, update, render. Host side effects accumulate in a
//! command queue drained with [`Game::drain_commands`].

use log::info;

use crate::config::GameConfig;
use crate::controller::{Controller, InputFlow, Transition};
use crate::renderer::{Frame, Renderer};
use crate::rng::{RandomSource, SimpleRng};
use crate::scene::{GlowState, SceneState};
use crate::types::*;

/// Complete game: model, view and controller plus the loop state.
#[derive(Debug, Clone)]
pub struct Game<R = SimpleRng> {
    mode: GameMode,
    controller: Controller,
    renderer: Renderer,
    scene: SceneState,
    rng: R,
    /// Seconds of simulated time since start.
    clock: f64,
    running: bool,
    commands: Vec<HostCommand>,
}

impl<R: RandomSource> Game<R> {
    pub fn new(config: GameConfig, rng: R) -> Self {
        let glow = GlowState::new(config.glow_decay_rate, config.flicker_amplitude);
        let scene = SceneState::with_glow(config.line_capacity, glow);
        Self {
            mode: GameMode::Menu,
            controller: Controller::new(config),
            renderer: Renderer::new(),
            scene,
            rng,
            clock: 0.0,
            running: true,
            // The pointer starts visible and captured.
            commands: vec![
                HostCommand::SetTitle(WINDOW_TITLE),
                HostCommand::ShowPointer,
                HostCommand::CapturePointer,
            ],
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn frame(&self) -> &Frame {
        self.renderer.frame()
    }

    /// Take the host commands queued since the last call.
    pub fn drain_commands(&mut self) -> std::vec::Drain<'_, HostCommand> {
        self.commands.drain(..)
    }

    fn apply(&mut self, transition: Transition) {
        if self.mode != transition.mode {
            info!("mode: {} -> {}", self.mode, transition.mode);
        }
        self.mode = transition.mode;
        self.commands.extend(transition.commands);
    }

    /// Feed this frame's events to the controller.
    ///
    /// A quit request or `Quit` in the menu stops the loop. `Quit` in game
    /// mode returns to the menu and drops the rest of this frame's events.
    /// In game mode with no events, one [`InputEvent::Tick`] is delivered so
    /// held keys still drive the player.
    pub fn handle_events(&mut self, events: &[InputEvent], held: HeldKeys, dt: f64) {
        let tick = [InputEvent::Tick];
        let events = if events.is_empty() && self.mode == GameMode::Playing {
            &tick[..]
        } else {
            events
        };

        for event in events {
            if *event == InputEvent::QuitRequest {
                info!("quit requested");
                self.running = false;
                return;
            }
            let resp = self.controller.handle_input(
                self.mode,
                event,
                held,
                dt,
                self.clock,
                &mut self.scene,
            );
            if let Some(transition) = resp.transition {
                self.apply(transition);
            }
            match resp.flow {
                InputFlow::Continue => {}
                InputFlow::EndFrame => return,
                InputFlow::Quit => {
                    info!("quit from menu");
                    self.running = false;
                    return;
                }
            }
        }
    }

    /// Simulation update for one frame. Nothing happens in the menu.
    pub fn update(&mut self, dt: f64) {
        if self.mode != GameMode::Playing {
            return;
        }
        self.controller.update_enemies(dt, &mut self.rng);
        if let Some(transition) = self.controller.handle_collisions(&mut self.scene) {
            self.apply(transition);
        }
        self.scene.update_glow(dt, &mut self.rng);
    }

    /// Render the current mode.
    pub fn render(&mut self) -> &Frame {
        match self.mode {
            GameMode::Menu => self.renderer.render_menu(),
            GameMode::Playing => self.renderer.render_game(&self.controller, &mut self.scene),
        }
    }

    /// One loop iteration. Returns `None` once the loop should stop.
    ///
    /// `dt` is clamped to `0..=MAX_FRAME_DT` so a stalled host does not
    /// teleport enemies.
    pub fn step(&mut self, events: &[InputEvent], held: HeldKeys, dt: f64) -> Option<&Frame> {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.clock += dt;
        self.handle_events(events, held, dt);
        if !self.running {
            return None;
        }
        // Mode is read after input, so a transition this frame takes effect now.
        self.update(dt);
        Some(self.render())
    }
}

impl Default for Game<SimpleRng> {
    fn default() -> Self {
        Self::new(GameConfig::default(), SimpleRng::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;

    fn game() -> Game<ScriptedRng> {
        Game::new(GameConfig::default(), ScriptedRng::constant(0.5))
    }

    #[test]
    fn starts_in_menu_with_title_command() {
        let mut g = game();
        assert_eq!(g.mode(), GameMode::Menu);
        assert!(g.is_running());
        let cmds: Vec<_> = g.drain_commands().collect();
        assert_eq!(cmds[0], HostCommand::SetTitle("Battlezone: Vector CRT"));
        assert!(g.drain_commands().next().is_none());
    }

    #[test]
    fn start_enters_game_and_captures_pointer() {
        let mut g = game();
        g.drain_commands().for_each(drop);
        let frame = g
            .step(&[InputEvent::KeyDown(Key::Start)], HeldKeys::NONE, 0.016)
            .unwrap();
        assert_eq!(frame.mode, GameMode::Playing);
        assert_eq!(g.mode(), GameMode::Playing);
        let cmds: Vec<_> = g.drain_commands().collect();
        assert_eq!(cmds, vec![HostCommand::HidePointer, HostCommand::CapturePointer]);
    }

    #[test]
    fn quit_request_stops_loop() {
        let mut g = game();
        assert!(g
            .step(&[InputEvent::QuitRequest], HeldKeys::NONE, 0.016)
            .is_none());
        assert!(!g.is_running());
    }

    #[test]
    fn quit_in_game_drops_remaining_events() {
        let mut g = game();
        g.step(&[InputEvent::KeyDown(Key::Start)], HeldKeys::NONE, 1.0);
        let events = [
            InputEvent::KeyDown(Key::Quit),
            InputEvent::PointerDown {
                button: MouseButton::Primary,
                pos: Point2D::new(0.0, 0.0),
            },
        ];
        g.step(&events, HeldKeys::NONE, 1.0);
        assert_eq!(g.mode(), GameMode::Menu);
        assert!(g.is_running());
        assert!(g.controller().projectiles().is_empty());
    }

    #[test]
    fn idle_game_frames_still_apply_held_keys() {
        let mut g = game();
        g.step(&[InputEvent::KeyDown(Key::Start)], HeldKeys::NONE, 0.1);
        let held = HeldKeys {
            advance: true,
            ..HeldKeys::NONE
        };
        g.step(&[], held, 0.1);
        assert!(g.controller().player().pos.z > 0.0);
    }

    #[test]
    fn menu_does_not_simulate() {
        let mut g = game();
        for _ in 0..100 {
            g.step(&[], HeldKeys::NONE, 0.1);
        }
        assert!(g.controller().enemies().is_empty());
        assert!(g.scene().is_empty());
    }

    #[test]
    fn clock_accumulates_dt() {
        let mut g = game();
        g.step(&[], HeldKeys::NONE, 0.25);
        g.step(&[], HeldKeys::NONE, 0.25);
        assert_eq!(g.clock(), 0.5);
    }

    #[test]
    fn long_frames_are_clamped() {
        let mut g = game();
        g.step(&[InputEvent::KeyDown(Key::Start)], HeldKeys::NONE, 0.0);
        g.controller_mut().add_enemy(GroundPos::new(0.0, 800.0));

        g.step(&[], HeldKeys::NONE, 10.0);
        assert_eq!(g.clock(), MAX_FRAME_DT);
        assert_eq!(g.controller().spawn_timer(), MAX_FRAME_DT);
        let z = g.controller().enemies()[0].pos.z;
        assert!((z - (800.0 - ENEMY_SPEED * MAX_FRAME_DT)).abs() < 1e-9);

        g.step(&[], HeldKeys::NONE, -1.0);
        assert_eq!(g.clock(), MAX_FRAME_DT);
    }
}
