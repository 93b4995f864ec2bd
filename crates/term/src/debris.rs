//! Game-over debris: every formerly locked cell flies off under gravity.
//!
//! Positions are in field pixels, [`CELL_PX`] per board cell, with the origin
//! at the top-left corner of the playfield. A particle is dropped once it has
//! left the visible area.

use crate::core::ports::DebrisSink;
use crate::core::{DebrisCell, SimpleRng};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

pub const CELL_PX: f32 = 8.0;
pub const GRAVITY_PX_S2: f32 = 900.0;

/// Horizontal launch speed range, `[min, max)` px/s.
pub const LAUNCH_VX: (i32, i32) = (-200, 200);
/// Vertical launch speed range, `[min, max)` px/s. Negative is upwards.
pub const LAUNCH_VY: (i32, i32) = (-350, -50);

/// Cells beyond the field edges a particle may travel before it is dropped.
const MARGIN_CELLS: f32 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub kind: PieceKind,
}

impl Particle {
    /// Board cell the particle currently covers. May lie outside the field.
    pub fn cell(&self) -> (i32, i32) {
        (
            (self.x / CELL_PX).floor() as i32,
            (self.y / CELL_PX).floor() as i32,
        )
    }

    fn step(&mut self, dt: f32) {
        self.vy += GRAVITY_PX_S2 * dt;
        self.x += self.vx * dt;
        self.y += self.vy * dt;
    }

    fn is_gone(&self) -> bool {
        let margin = MARGIN_CELLS * CELL_PX;
        let right = BOARD_WIDTH as f32 * CELL_PX + margin;
        let bottom = BOARD_HEIGHT as f32 * CELL_PX + margin;
        self.y > bottom || self.x < -margin || self.x > right
    }
}

#[derive(Debug, Clone)]
pub struct DebrisField {
    particles: Vec<Particle>,
    rng: SimpleRng,
}

impl DebrisField {
    pub fn new(seed: u32) -> Self {
        Self {
            particles: Vec::with_capacity((BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize)),
            rng: SimpleRng::new(seed),
        }
    }

    fn launch_speed(&mut self, (min, max): (i32, i32)) -> f32 {
        let span = (max - min) as u32;
        (min + self.rng.next_range(span) as i32) as f32
    }

    /// Launch one particle from the center of a board cell.
    pub fn launch(&mut self, x: i8, y: i8, kind: PieceKind) {
        let vx = self.launch_speed(LAUNCH_VX);
        let vy = self.launch_speed(LAUNCH_VY);
        self.particles.push(Particle {
            x: (x as f32 + 0.5) * CELL_PX,
            y: (y as f32 + 0.5) * CELL_PX,
            vx,
            vy,
            kind,
        });
    }

    pub fn update(&mut self, elapsed_ms: u32) {
        let dt = elapsed_ms as f32 / 1000.0;
        for p in &mut self.particles {
            p.step(dt);
        }
        self.particles.retain(|p| !p.is_gone());
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

impl Default for DebrisField {
    fn default() -> Self {
        Self::new(1)
    }
}

impl DebrisSink for DebrisField {
    fn spawn(&mut self, cell: &DebrisCell) {
        self.launch(cell.x, cell.y, cell.kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TICK_MS;

    #[test]
    fn launch_speeds_stay_in_range() {
        let mut field = DebrisField::new(42);
        for i in 0..200 {
            field.launch((i % 10) as i8, 19, PieceKind::T);
        }
        for p in field.particles() {
            assert!(p.vx >= -200.0 && p.vx < 200.0, "vx {}", p.vx);
            assert!(p.vy >= -350.0 && p.vy < -50.0, "vy {}", p.vy);
        }
    }

    #[test]
    fn particles_rise_then_fall_out() {
        let mut field = DebrisField::new(7);
        field.spawn(&DebrisCell {
            x: 4,
            y: 10,
            kind: PieceKind::L,
        });
        let y0 = field.particles()[0].y;

        field.update(TICK_MS);
        assert!(field.particles()[0].y < y0, "launched upwards");

        let mut ticks = 0;
        while !field.is_empty() {
            field.update(TICK_MS);
            ticks += 1;
            assert!(ticks < 1000, "particle never left the screen");
        }
    }

    #[test]
    fn particle_cell_maps_pixels_to_cells() {
        let p = Particle {
            x: -0.5,
            y: 17.0,
            vx: 0.0,
            vy: 0.0,
            kind: PieceKind::I,
        };
        assert_eq!(p.cell(), (-1, 2));
    }
}
