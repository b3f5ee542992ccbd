//! Per-frame draw list in playfield coordinates

use glam::Vec2;

use crate::sim::{Entity, GamePhase, Snapshot};

/// 8-bit RGB colour
pub type Rgb = [u8; 3];

pub const BACKGROUND: Rgb = [150, 200, 255];
pub const HIGHSCORE_COLOR: Rgb = [0, 150, 255];
pub const SCORE_COLOR: Rgb = [200, 0, 150];
pub const PROMPT_COLOR: Rgb = [0, 150, 0];
pub const GAME_OVER_COLOR: Rgb = [255, 0, 0];

/// Overlay font size in playfield units
pub const TEXT_SIZE: f32 = 24.0;

/// Which sprite to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Player,
    Obstacle,
}

impl SpriteKind {
    /// Flat colour used when no image is available
    pub fn color(&self) -> Rgb {
        match self {
            SpriteKind::Player => [255, 215, 0],
            SpriteKind::Obstacle => [110, 70, 40],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub sprite: SpriteKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

/// Text anchored at its centre
#[derive(Debug, Clone, PartialEq)]
pub struct TextOverlay {
    pub text: String,
    pub color: Rgb,
    pub center: Vec2,
    pub size: f32,
}

impl TextOverlay {
    fn new(text: impl Into<String>, color: Rgb, center: Vec2) -> Self {
        Self {
            text: text.into(),
            color,
            center,
            size: TEXT_SIZE,
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub playfield: Vec2,
    pub background: Rgb,
    /// Drawn in order: obstacles, then the player
    pub sprites: Vec<DrawCommand>,
    /// Drawn over the sprites
    pub texts: Vec<TextOverlay>,
}

impl Frame {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let playfield = snapshot.playfield;
        let center = playfield / 2.0;

        let mut sprites: Vec<DrawCommand> = snapshot
            .obstacles
            .iter()
            .map(|o| DrawCommand {
                sprite: SpriteKind::Obstacle,
                pos: o.position(),
                size: o.size(),
            })
            .collect();
        sprites.push(DrawCommand {
            sprite: SpriteKind::Player,
            pos: snapshot.body.position(),
            size: snapshot.body.size(),
        });

        let mut texts = vec![
            TextOverlay::new(
                format!("highscore: {}", snapshot.highest_score),
                HIGHSCORE_COLOR,
                Vec2::new(75.0, 15.0),
            ),
            TextOverlay::new(
                format!("score: {}", snapshot.score),
                SCORE_COLOR,
                Vec2::new(playfield.x - 50.0, 15.0),
            ),
        ];
        match snapshot.phase {
            GamePhase::NotStarted => {
                texts.push(TextOverlay::new("press SPACE to fly", PROMPT_COLOR, center));
            }
            GamePhase::Running => {}
            GamePhase::GameOver => {
                texts.push(TextOverlay::new("GAME OVER", GAME_OVER_COLOR, center));
                texts.push(TextOverlay::new(
                    "press R to retry",
                    PROMPT_COLOR,
                    center + Vec2::new(0.0, 20.0),
                ));
            }
        }

        Self {
            playfield,
            background: BACKGROUND,
            sprites,
            texts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{FallingBody, Obstacle};

    fn snapshot(phase: GamePhase) -> Snapshot {
        Snapshot {
            playfield: Vec2::new(348.0, 196.0),
            phase,
            body: FallingBody::new(Vec2::new(87.0, 98.0), Vec2::splat(12.0), -3.0),
            obstacles: vec![
                Obstacle::new(Vec2::new(200.0, 10.0), 24.0, 2.0),
                Obstacle::new(Vec2::new(300.0, 50.0), 24.0, 2.0),
            ],
            score: 2,
            highest_score: 7,
        }
    }

    #[test]
    fn test_obstacles_drawn_before_player() {
        let frame = Frame::from_snapshot(&snapshot(GamePhase::Running));
        let kinds: Vec<_> = frame.sprites.iter().map(|s| s.sprite).collect();
        assert_eq!(
            kinds,
            vec![SpriteKind::Obstacle, SpriteKind::Obstacle, SpriteKind::Player]
        );
        assert_eq!(frame.sprites[0].size, Vec2::splat(24.0));
    }

    #[test]
    fn test_score_readouts() {
        let frame = Frame::from_snapshot(&snapshot(GamePhase::Running));
        assert_eq!(frame.texts.len(), 2);
        assert_eq!(frame.texts[0].text, "highscore: 7");
        assert_eq!(frame.texts[0].center, Vec2::new(75.0, 15.0));
        assert_eq!(frame.texts[1].text, "score: 2");
        assert_eq!(frame.texts[1].center, Vec2::new(298.0, 15.0));
    }

    #[test]
    fn test_prompts_follow_phase() {
        let start = Frame::from_snapshot(&snapshot(GamePhase::NotStarted));
        assert_eq!(start.texts[2].text, "press SPACE to fly");
        assert_eq!(start.texts[2].center, Vec2::new(174.0, 98.0));

        let over = Frame::from_snapshot(&snapshot(GamePhase::GameOver));
        let lines: Vec<_> = over.texts[2..].iter().map(|t| t.text.as_str()).collect();
        assert_eq!(lines, vec!["GAME OVER", "press R to retry"]);
        assert_eq!(over.texts[3].center, Vec2::new(174.0, 118.0));
    }
}
