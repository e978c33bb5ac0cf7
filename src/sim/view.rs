//! Read-only snapshot of what the renderer needs for one frame

use super::geometry::Rect;
use super::obstacle::PipeKind;
use super::player::Sprite;
use super::state::GameState;

/// How many finished runs the game-over overlay lists
pub const LEADERBOARD_ROWS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct PipeView {
    pub rect: Rect,
    pub kind: PipeKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameView {
    pub player: Rect,
    pub sprite: Sprite,
    pub pipes: Vec<PipeView>,
    pub floor_offset: f32,
    pub score: u64,
    pub best: u64,
    /// Whether the stage shows the score counters at all
    pub show_score: bool,
    pub game_on: bool,
    pub speed: i32,
    /// Best finished runs, shown on the game-over overlay
    pub leaderboard: Vec<u64>,
}

impl FrameView {
    pub fn capture(state: &GameState) -> Self {
        let leaderboard = if state.run.game_on {
            Vec::new()
        } else {
            state.score.history.top(LEADERBOARD_ROWS)
        };

        Self {
            player: state.player.rect(),
            sprite: state.player.sprite,
            pipes: state
                .spawner
                .pipes
                .iter()
                .map(|p| PipeView {
                    rect: p.rect,
                    kind: p.kind,
                })
                .collect(),
            floor_offset: state.floor.offset,
            score: state.score.current,
            best: state.score.best(),
            show_score: state.tuning.scoring,
            game_on: state.run.game_on,
            speed: state.run.speed(),
            leaderboard,
        }
    }
}
