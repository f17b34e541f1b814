//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only arrives as an explicit `dt` in milliseconds
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{check, first_hit, proximity_hit};
pub use spawner::Spawner;
pub use state::{FallingBlock, FallingBlocks, GamePhase, GameSession, Player};
pub use tick::{TickReport, tick};
