//! Variable timestep simulation tick
//!
//! One tick moves the player, drops the blocks, then checks for a hit.

use super::collision;
use super::state::{GamePhase, GameSession};

/// What happened during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Blocks that fell past the bottom (one point each)
    pub recycled: u32,
    /// The player was hit this tick
    pub collided: bool,
}

/// Advance the session by `dt_ms` milliseconds. Does nothing after game over.
pub fn tick(session: &mut GameSession, dt_ms: f64) -> TickReport {
    let mut report = TickReport::default();
    if session.phase() == GamePhase::GameOver {
        return report;
    }

    let input = session.input.snapshot();
    let field = session.field();

    session.player.move_by(dt_ms, &input, field);

    report.recycled = session
        .blocks
        .advance_all(dt_ms, field.y, &mut session.spawner);
    for _ in 0..report.recycled {
        session.player.increment_score();
    }
    if report.recycled > 0 {
        log::debug!(
            "{} block(s) passed, score {}",
            report.recycled,
            session.player.score
        );
    }

    if let Some(idx) = collision::first_hit(&session.player, &session.blocks) {
        session.player.alive = false;
        report.collided = true;
        log::info!(
            "Player hit block {} at ({:.0}, {:.0}), final score {}",
            idx,
            session.player.pos.x,
            session.player.pos.y,
            session.player.score
        );
    }

    report
}
