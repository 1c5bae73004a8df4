//! Moving rectangles: the player and the obstacles

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::Canvas;
use super::collision::Aabb;

/// Display color of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    /// Neutral gray, all three channels share one value
    Gray(u8),
    Red,
}

impl Color {
    pub fn rgb(&self) -> (u8, u8, u8) {
        match *self {
            Color::Gray(v) => (v, v, v),
            Color::Red => (255, 0, 0),
        }
    }
}

impl fmt::Display for Color {
    /// CSS form: `#RRGGBB` for grays, a keyword for the player
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Color::Gray(v) => write!(f, "#{v:02X}{v:02X}{v:02X}"),
            Color::Red => write!(f, "red"),
        }
    }
}

/// Keyboard direction applied to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// What an entity is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Steered by keyboard input, starts at rest
    Player,
    /// Constant velocity picked at spawn
    Obstacle,
}

/// A moving axis-aligned rectangle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Top-left corner; may lie outside the surface
    pub pos: Vec2,
    pub size: Vec2,
    vel: Vec2,
    pub color: Color,
    role: Role,
}

impl Entity {
    /// A player at rest with its top-left corner at `pos`
    pub fn player(pos: Vec2, side: f32) -> Self {
        Self {
            pos,
            size: Vec2::splat(side),
            vel: Vec2::ZERO,
            color: Color::Red,
            role: Role::Player,
        }
    }

    /// An obstacle; its velocity never changes afterwards
    pub fn obstacle(pos: Vec2, side: f32, vel: Vec2, color: Color) -> Self {
        Self {
            pos,
            size: Vec2::splat(side),
            vel,
            color,
            role: Role::Obstacle,
        }
    }

    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    #[inline]
    pub fn vel(&self) -> Vec2 {
        self.vel
    }

    /// Point the player along one axis at `speed`, zeroing the other axis.
    /// Obstacles ignore steering.
    pub fn steer(&mut self, direction: Direction, speed: f32) {
        if self.role != Role::Player {
            return;
        }
        self.vel = match direction {
            Direction::Up => Vec2::new(0.0, -speed),
            Direction::Down => Vec2::new(0.0, speed),
            Direction::Left => Vec2::new(-speed, 0.0),
            Direction::Right => Vec2::new(speed, 0.0),
        };
    }

    /// Move by one tick of velocity (no clamping to the surface)
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn overlaps(&self, other: &Entity) -> bool {
        self.bounds().overlaps(&other.bounds())
    }

    pub fn is_within_surface(&self, width: f32, height: f32) -> bool {
        self.bounds().within(width, height)
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        canvas.draw_filled_rect(self.pos.x, self.pos.y, self.size.x, self.size.y, self.color);
    }
}
