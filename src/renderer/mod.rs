//! 2D rendering module
//!
//! Everything is drawn through the [`Surface`] trait, a thin slice of the
//! Canvas2D API. The browser build implements it over
//! `CanvasRenderingContext2d`; headless runs record the calls instead.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCommand, RecordingSurface};

use crate::sim::GameSession;

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        }
    }
}

/// Vertical text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
}

impl TextBaseline {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextBaseline::Top => "top",
            TextBaseline::Middle => "middle",
        }
    }
}

/// Drawing primitives the game needs from the host
pub trait Surface {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
    fn set_fill_style(&mut self, color: &str);
    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);
}

/// Colors and fonts
pub mod palette {
    pub const BACKGROUND: &str = "#c3cdd6";
    pub const PLAYER: &str = "#bb333fff";
    pub const BLOCK: &str = "#4335c5ff";
    pub const SCORE: &str = "#d6045bff";
    pub const SCORE_FONT: &str = "25px Arial";
    pub const GAME_OVER: &str = "#b61500ff";
    pub const GAME_OVER_FONT: &str = "50px Impact";
    pub const RESTART_HINT: &str = "#0a6320ff";
    pub const RESTART_HINT_FONT: &str = "25px Impact";
}

/// Draw a full running frame: background, player, blocks, score
pub fn render_frame<S: Surface + ?Sized>(surface: &mut S, session: &GameSession) {
    let field = session.field();
    let (w, h) = (field.x as f64, field.y as f64);

    surface.clear_rect(0.0, 0.0, w, h);
    surface.set_fill_style(palette::BACKGROUND);
    surface.fill_rect(0.0, 0.0, w, h);

    let player = &session.player;
    surface.set_fill_style(palette::PLAYER);
    surface.fill_rect(
        player.pos.x as f64,
        player.pos.y as f64,
        player.size.x as f64,
        player.size.y as f64,
    );

    let size = session.blocks.size;
    surface.set_fill_style(palette::BLOCK);
    for block in session.blocks.iter() {
        surface.fill_rect(
            block.pos.x as f64,
            block.pos.y as f64,
            size.x as f64,
            size.y as f64,
        );
    }

    render_score(surface, player.score);
}

fn render_score<S: Surface + ?Sized>(surface: &mut S, score: u32) {
    surface.set_font(palette::SCORE_FONT);
    surface.set_fill_style(palette::SCORE);
    surface.set_text_align(TextAlign::Left);
    surface.set_text_baseline(TextBaseline::Top);
    surface.fill_text(&format!("SCORE: {}", score), 10.0, 10.0);
}

/// Draw the game over banner on top of the last frame
pub fn render_game_over<S: Surface + ?Sized>(surface: &mut S, session: &GameSession) {
    let field = session.field();
    let (cx, cy) = (field.x as f64 / 2.0, field.y as f64 / 2.0);

    surface.set_font(palette::GAME_OVER_FONT);
    surface.set_fill_style(palette::GAME_OVER);
    surface.set_text_baseline(TextBaseline::Middle);
    surface.set_text_align(TextAlign::Center);
    surface.fill_text("GAME OVER !", cx, cy);

    surface.set_font(palette::RESTART_HINT_FONT);
    surface.set_fill_style(palette::RESTART_HINT);
    surface.fill_text("Press \"R\" to restart", cx, cy + 100.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn test_frame_draws_every_entity() {
        let session = GameSession::new(Settings::default().with_seed(3));
        let mut surface = RecordingSurface::new();
        render_frame(&mut surface, &session);

        assert_eq!(
            surface.commands[0],
            DrawCommand::ClearRect {
                x: 0.0,
                y: 0.0,
                w: 480.0,
                h: 640.0
            }
        );
        // background + player + 8 blocks
        assert_eq!(surface.fill_rect_count(), 10);
        assert_eq!(surface.texts(), vec!["SCORE: 0"]);
    }

    #[test]
    fn test_game_over_banner() {
        let session = GameSession::new(Settings::default().with_seed(3));
        let mut surface = RecordingSurface::new();
        render_game_over(&mut surface, &session);

        assert_eq!(
            surface.texts(),
            vec!["GAME OVER !", "Press \"R\" to restart"]
        );
        assert!(surface.commands.contains(&DrawCommand::FillText {
            text: "GAME OVER !".to_string(),
            x: 240.0,
            y: 320.0,
        }));
        assert!(!surface
            .commands
            .iter()
            .any(|c| matches!(c, DrawCommand::ClearRect { .. })));
    }
}
