//! Pipes: spawning, scrolling and culling

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::{FIELD_WIDTH, FLOOR_TOP};

/// Pipe visual variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PipeKind {
    Small,
    Twins,
    Big,
    /// Widest variant; never spawned twice in a row
    Cluster,
}

impl PipeKind {
    /// Draw table for even-numbered pipes
    pub const ALL: [PipeKind; 4] = [
        PipeKind::Small,
        PipeKind::Twins,
        PipeKind::Big,
        PipeKind::Cluster,
    ];

    /// Draw table for odd-numbered pipes: no cluster, small twice as likely
    pub const RESTRICTED: [PipeKind; 4] = [
        PipeKind::Small,
        PipeKind::Twins,
        PipeKind::Big,
        PipeKind::Small,
    ];

    /// Sprite size (width, height)
    pub fn size(&self) -> Vec2 {
        match self {
            PipeKind::Small => Vec2::new(40.0, 48.0),
            PipeKind::Twins => Vec2::new(88.0, 48.0),
            PipeKind::Big => Vec2::new(48.0, 64.0),
            PipeKind::Cluster => Vec2::new(136.0, 56.0),
        }
    }
}

/// A pipe standing on the floor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipe {
    /// Creation index
    pub id: u32,
    pub kind: PipeKind,
    pub rect: Rect,
}

impl Pipe {
    /// New pipe centered on the right edge of the field, standing on the floor
    pub fn new(id: u32, kind: PipeKind) -> Self {
        Self {
            id,
            kind,
            rect: Rect::from_midbottom(Vec2::new(FIELD_WIDTH, FLOOR_TOP), kind.size()),
        }
    }

    /// Fully past the left edge
    pub fn is_off_screen(&self) -> bool {
        self.rect.right() <= 0.0
    }
}

/// Owns the live pipes and the creation counter that drives variant choice
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spawner {
    /// Pipes created so far (never reset)
    pub count: u32,
    /// Live pipes, unordered
    pub pipes: Vec<Pipe>,
}

impl Spawner {
    /// Pick the variant for the next pipe from the table its parity allows
    pub fn choose_kind<R: Rng>(&self, rng: &mut R) -> PipeKind {
        let table = if self.count % 2 == 0 {
            &PipeKind::ALL
        } else {
            &PipeKind::RESTRICTED
        };
        table[rng.random_range(0..table.len())]
    }

    /// Add a pipe of the given kind at the right edge
    pub fn spawn(&mut self, kind: PipeKind) -> &Pipe {
        let pipe = Pipe::new(self.count, kind);
        self.count += 1;
        self.pipes.push(pipe);
        &self.pipes[self.pipes.len() - 1]
    }

    /// Spawn timer fired: flip a coin, maybe add a pipe
    pub fn try_spawn<R: Rng>(&mut self, rng: &mut R, chance: f64) -> Option<PipeKind> {
        if !rng.random_bool(chance.clamp(0.0, 1.0)) {
            return None;
        }
        let kind = self.choose_kind(rng);
        self.spawn(kind);
        Some(kind)
    }

    /// Scroll every pipe left by `speed`
    pub fn advance(&mut self, speed: i32) {
        for pipe in &mut self.pipes {
            pipe.rect.translate_x(-(speed as f32));
        }
    }

    /// Drop pipes that have left the field; returns how many were removed
    pub fn cull(&mut self) -> usize {
        let before = self.pipes.len();
        self.pipes.retain(|p| !p.is_off_screen());
        before - self.pipes.len()
    }

    /// Remove every pipe; returns how many were removed
    pub fn clear(&mut self) -> usize {
        let removed = self.pipes.len();
        self.pipes.clear();
        removed
    }

    /// First live pipe whose bounds overlap `rect`
    pub fn hit(&self, rect: &Rect) -> Option<&Pipe> {
        self.pipes.iter().find(|p| p.rect.overlaps(rect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_at_right_edge_on_floor() {
        let mut spawner = Spawner::default();
        let pipe = spawner.spawn(PipeKind::Big).clone();
        assert_eq!(pipe.id, 0);
        assert_eq!(pipe.rect.bottom(), FLOOR_TOP);
        assert_eq!(pipe.rect.left() + pipe.rect.size.x / 2.0, FIELD_WIDTH);
        assert_eq!(spawner.count, 1);
    }

    #[test]
    fn test_odd_pipes_never_cluster() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut spawner = Spawner::default();
        let mut even_kinds = std::collections::HashSet::new();
        for _ in 0..400 {
            let kind = spawner.choose_kind(&mut rng);
            if spawner.count % 2 == 1 {
                assert_ne!(kind, PipeKind::Cluster);
            } else {
                even_kinds.insert(kind);
            }
            spawner.spawn(kind);
        }
        // Even slots draw from every variant
        assert_eq!(even_kinds.len(), 4);
    }

    #[test]
    fn test_coin_flip_bounds() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut spawner = Spawner::default();
        for _ in 0..50 {
            assert!(spawner.try_spawn(&mut rng, 0.0).is_none());
        }
        assert_eq!(spawner.count, 0);
        for _ in 0..50 {
            assert!(spawner.try_spawn(&mut rng, 1.0).is_some());
        }
        assert_eq!(spawner.count, 50);
    }

    #[test]
    fn test_fair_coin_spawns_about_half() {
        let mut rng = Pcg32::seed_from_u64(2024);
        let mut spawner = Spawner::default();
        for _ in 0..2000 {
            spawner.try_spawn(&mut rng, 0.5);
        }
        assert!((800..1200).contains(&spawner.count));
    }

    #[test]
    fn test_cull_on_right_edge() {
        let mut spawner = Spawner::default();
        spawner.spawn(PipeKind::Small);
        let width = PipeKind::Small.size().x;

        // Put the right edge exactly 1 unit inside the field
        let start_left = spawner.pipes[0].rect.left();
        let target_left = 1.0 - width;
        spawner.pipes[0].rect.translate_x(target_left - start_left);
        assert_eq!(spawner.cull(), 0);

        spawner.advance(1);
        assert_eq!(spawner.pipes[0].rect.right(), 0.0);
        assert_eq!(spawner.cull(), 1);
        assert!(spawner.pipes.is_empty());
    }

    #[test]
    fn test_clear_keeps_counter() {
        let mut spawner = Spawner::default();
        spawner.spawn(PipeKind::Small);
        spawner.spawn(PipeKind::Twins);
        assert_eq!(spawner.clear(), 2);
        assert!(spawner.pipes.is_empty());
        assert_eq!(spawner.count, 2);
        assert_eq!(spawner.spawn(PipeKind::Big).id, 2);
    }
}
