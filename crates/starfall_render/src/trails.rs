use std::collections::VecDeque;

use bevy::prelude::*;
use starfall_sim::Galaxy;

/// Gizmo group for star trails, so their width can be tuned separately
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct TrailGizmos;

/// Recent positions of one star, oldest first
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    points: VecDeque<Vec2>,
    generation: u32,
}

impl Trail {
    /// A collapsed trail: every point sits at `head`
    pub fn new(head: Vec2, length: usize, generation: u32) -> Self {
        Self {
            points: std::iter::repeat(head).take(length).collect(),
            generation,
        }
    }

    /// Drop the oldest point and append `head`
    pub fn advance(&mut self, head: Vec2) {
        self.points.pop_front();
        self.points.push_back(head);
    }

    pub fn reseed(&mut self, head: Vec2, generation: u32) {
        self.points.iter_mut().for_each(|p| *p = head);
        self.generation = generation;
    }

    pub fn points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.points.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn head(&self) -> Option<Vec2> {
        self.points.back().copied()
    }
}

/// One trail per star, advanced once per simulation frame
#[derive(Resource, Default)]
pub struct StarTrails {
    trails: Vec<Trail>,
    last_frame: Option<u64>,
}

impl StarTrails {
    pub fn sync(&mut self, galaxy: &Galaxy) {
        if self.last_frame == Some(galaxy.frame) {
            return;
        }
        self.last_frame = Some(galaxy.frame);

        let length = galaxy.config().trail_length;
        if self.trails.len() != galaxy.star_count() {
            self.trails = galaxy
                .stars()
                .iter()
                .map(|s| Trail::new(head_of(s.position), length, s.generation))
                .collect();
            return;
        }

        for (trail, star) in self.trails.iter_mut().zip(galaxy.stars()) {
            let head = head_of(star.position);
            if trail.generation != star.generation {
                // Recycled: start fresh instead of streaking across the screen
                trail.reseed(head, star.generation);
            } else {
                trail.advance(head);
            }
        }
    }

    pub fn trails(&self) -> &[Trail] {
        &self.trails
    }
}

fn head_of(position: [f32; 3]) -> Vec2 {
    Vec2::new(position[0], position[1])
}

pub fn sync_trails(galaxy: Res<Galaxy>, mut trails: ResMut<StarTrails>) {
    trails.sync(&galaxy);
}

/// Brightness of the newest segment; > 1 so bloom picks it up
const HEAD_INTENSITY: f32 = 3.0;

/// Draw every trail tapering from dark tail to bright head
pub fn draw_trails(trails: Res<StarTrails>, mut gizmos: Gizmos<TrailGizmos>) {
    for trail in trails.trails() {
        let n = trail.len().max(2) as f32 - 1.0;
        let segments = trail.points().zip(trail.points().skip(1)).enumerate();
        for (i, (from, to)) in segments {
            if from == to {
                continue;
            }
            let c0 = HEAD_INTENSITY * i as f32 / n;
            let c1 = HEAD_INTENSITY * (i + 1) as f32 / n;
            gizmos.line_gradient_2d(
                from,
                to,
                Color::linear_rgb(c0, c0, c0),
                Color::linear_rgb(c1, c1, c1),
            );
        }
    }
}
