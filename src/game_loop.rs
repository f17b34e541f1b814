//! Frame driver
//!
//! The host scheduler calls [`GameLoop::tick`] with its monotonic frame
//! timestamp (milliseconds). The returned [`LoopControl`] says whether to
//! request another frame. Keyboard events go through [`GameLoop::key_down`]
//! and [`GameLoop::key_up`] between frames.

use crate::consts::UNSET_TIMESTAMP;
use crate::input::Key;
use crate::renderer::{Surface, render_frame, render_game_over};
use crate::settings::Settings;
use crate::sim::{GamePhase, GameSession, TickReport, tick};

/// Whether the host should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Halt,
}

pub struct GameLoop {
    session: GameSession,
    /// Timestamp of the previous tick, `UNSET_TIMESTAMP` right after (re)start
    last_timestamp: f64,
    /// Outcome of the most recent simulated tick
    last_report: TickReport,
}

impl GameLoop {
    pub fn new(settings: Settings) -> Self {
        Self::from_session(GameSession::new(settings))
    }

    pub fn from_session(session: GameSession) -> Self {
        Self {
            session,
            last_timestamp: UNSET_TIMESTAMP,
            last_report: TickReport::default(),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase()
    }

    pub fn last_timestamp(&self) -> f64 {
        self.last_timestamp
    }

    pub fn last_report(&self) -> TickReport {
        self.last_report
    }

    /// Run one frame.
    ///
    /// The first frame after a (re)start only latches the timestamp and
    /// simulates zero elapsed time.
    pub fn tick<S: Surface + ?Sized>(&mut self, timestamp: f64, surface: &mut S) -> LoopControl {
        if self.last_timestamp == UNSET_TIMESTAMP {
            self.last_timestamp = timestamp;
        }
        let dt_ms = timestamp - self.last_timestamp;
        self.last_timestamp = timestamp;

        match self.session.phase() {
            GamePhase::Running => {
                let report = tick(&mut self.session, dt_ms);
                if report.recycled > 0 {
                    log::trace!(
                        "{} block(s) recycled, score {}",
                        report.recycled,
                        self.session.player.score
                    );
                }
                if report.collided {
                    log::debug!("Collision after {:.1} ms frame", dt_ms);
                }
                self.last_report = report;
                render_frame(surface, &self.session);
                LoopControl::Continue
            }
            GamePhase::GameOver => {
                if self.session.take_game_over_render() {
                    render_game_over(surface, &self.session);
                    log::info!("Game over, score {}", self.session.player.score);
                }
                LoopControl::Halt
            }
        }
    }

    /// Returns true when the key is a control key whose default browser
    /// action should be suppressed.
    pub fn key_down(&mut self, key: Key) -> bool {
        self.session.input.press(key)
    }

    /// Returns true when the release restarted the game; the host must then
    /// resume scheduling frames.
    pub fn key_up(&mut self, key: Key) -> bool {
        self.session.input.release(key);
        key == Key::Restart && self.restart()
    }

    /// Restart after game over, resetting the frame clock as well
    pub fn restart(&mut self) -> bool {
        if !self.session.restart() {
            return false;
        }
        self.last_timestamp = UNSET_TIMESTAMP;
        self.last_report = TickReport::default();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingSurface;

    fn game() -> GameLoop {
        GameLoop::new(Settings::default().with_seed(77))
    }

    #[test]
    fn test_first_tick_has_zero_delta() {
        let mut game = game();
        let blocks = game.session().blocks.blocks.clone();
        let mut surface = RecordingSurface::new();

        assert_eq!(game.tick(123_456.0, &mut surface), LoopControl::Continue);
        assert_eq!(game.last_timestamp(), 123_456.0);
        assert_eq!(game.session().blocks.blocks, blocks);
    }

    #[test]
    fn test_second_tick_uses_elapsed_time() {
        let mut game = game();
        let mut surface = RecordingSurface::new();
        let speed = game.session().blocks.blocks[0].speed;

        game.tick(1_000.0, &mut surface);
        game.tick(1_010.0, &mut surface);
        let expected = speed * 10.0 / 1000.0;
        assert!((game.session().blocks.blocks[0].pos.y - expected).abs() < 1e-4);
    }

    #[test]
    fn test_collision_frame_is_reported() {
        let mut game = game();
        let mut surface = RecordingSurface::new();

        game.tick(1_000.0, &mut surface);
        assert!(!game.last_report().collided);

        let target = game.session().player.pos;
        game.session_mut().blocks.blocks[0].pos = target;
        game.tick(1_001.0, &mut surface);
        assert!(game.last_report().collided);

        // Halted frames do not simulate, so the report stays put
        game.tick(1_002.0, &mut surface);
        assert!(game.last_report().collided);

        assert!(game.restart());
        assert_eq!(game.last_report(), TickReport::default());
    }

    #[test]
    fn test_restart_key_ignored_while_running() {
        let mut game = game();
        assert!(!game.key_up(Key::Restart));
        assert_eq!(game.phase(), GamePhase::Running);
    }

    #[test]
    fn test_control_keys_suppress_default() {
        let mut game = game();
        assert!(game.key_down(Key::ArrowUp));
        assert!(game.key_down(Key::Space));
        assert!(!game.key_down(Key::Restart));
        assert!(game.session().input.is_pressed(Key::ArrowUp));
        game.key_up(Key::ArrowUp);
        assert!(!game.session().input.is_pressed(Key::ArrowUp));
    }
}
