// Property tests for the simulation invariants.

use falling_blocks::sim::{FallingBlock, GamePhase, GameSession, Player, Spawner, tick};
use falling_blocks::{Key, Settings, TickInput};
use glam::Vec2;
use proptest::prelude::*;

const SPEEDS: [f32; 4] = [660.0, 720.0, 780.0, 840.0];

fn tick_input() -> impl Strategy<Value = TickInput> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(left, right, up, down)| TickInput {
            left,
            right,
            up,
            down,
        },
    )
}

fn key() -> impl Strategy<Value = Key> {
    prop::sample::select(vec![
        Key::ArrowLeft,
        Key::ArrowRight,
        Key::ArrowUp,
        Key::ArrowDown,
        Key::A,
        Key::D,
        Key::W,
        Key::S,
    ])
}

proptest! {
    #[test]
    fn player_never_leaves_the_field(
        start in (0.0f32..=455.0, 0.0f32..=615.0),
        steps in prop::collection::vec((tick_input(), 0.0f64..5_000.0), 1..64),
    ) {
        let settings = Settings::default();
        let field = Vec2::new(settings.field_width, settings.field_height);
        let mut player = Player::new(&settings);
        player.pos = Vec2::new(start.0, start.1);

        for (input, dt) in steps {
            player.move_by(dt, &input, field);
            prop_assert!(player.pos.x >= 0.0 && player.pos.x <= 455.0, "x = {}", player.pos.x);
            prop_assert!(player.pos.y >= 0.0 && player.pos.y <= 615.0, "y = {}", player.pos.y);
        }
    }

    #[test]
    fn blocks_recycle_cleanly(
        seed in any::<u64>(),
        y in 0.0f32..=640.0,
        speed_idx in 0usize..4,
        dt in 0.0f64..2_000.0,
    ) {
        let mut spawner = Spawner::new(seed, 480.0, 35.0);
        let mut block = FallingBlock { pos: Vec2::new(100.0, y), speed: SPEEDS[speed_idx] };

        let recycled = block.advance(dt, 640.0, &mut spawner);
        if recycled {
            prop_assert_eq!(block.pos.y, 0.0);
            prop_assert!(block.pos.x >= 0.0 && block.pos.x < 445.0);
            prop_assert!(SPEEDS.contains(&block.speed));
        } else {
            prop_assert!(block.pos.y <= 640.0);
            prop_assert_eq!(block.speed, SPEEDS[speed_idx]);
        }
    }

    #[test]
    fn score_counts_recycles_and_never_drops(
        seed in any::<u64>(),
        steps in prop::collection::vec((prop::option::of(key()), 0.0f64..250.0), 1..200),
    ) {
        let mut session = GameSession::new(Settings::default().with_seed(seed));

        for (key, dt) in steps {
            if let Some(key) = key {
                session.input.press(key);
            }
            let before = session.player.score;
            let was_running = session.phase() == GamePhase::Running;

            let report = tick(&mut session, dt);

            prop_assert!(session.player.score >= before);
            if was_running {
                prop_assert_eq!(session.player.score, before + report.recycled);
            } else {
                prop_assert_eq!(session.player.score, before);
            }
            for block in session.blocks.iter() {
                prop_assert!(block.pos.y <= 640.0);
            }
        }
    }
}
