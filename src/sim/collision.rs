//! Player/block collision detection
//!
//! This is a corner-distance proximity test, not a rectangle intersection:
//! a hit needs the top-left corners to be closer than the *player's* width
//! and height on each axis. The block size plays no part, so a large block can
//! overlap the player from the left or above without counting as a hit.

use glam::Vec2;

use super::state::{FallingBlocks, Player};

/// Whether a block whose corner sits at `block_pos` hits the player
pub fn proximity_hit(player_pos: Vec2, player_size: Vec2, block_pos: Vec2) -> bool {
    let diff = (player_pos - block_pos).abs();
    diff.x < player_size.x && diff.y < player_size.y
}

/// Index of the first block touching the player, if any
pub fn first_hit(player: &Player, blocks: &FallingBlocks) -> Option<usize> {
    blocks
        .iter()
        .position(|block| proximity_hit(player.pos, player.size, block.pos))
}

/// Liveness after checking every block. A dead player stays dead.
pub fn check(player: &Player, blocks: &FallingBlocks) -> bool {
    player.alive && first_hit(player, blocks).is_none()
}
