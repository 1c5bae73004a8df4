//! Phase and entity containers shared by the frame step and the session

use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Idle background animation, no player
    Menu,
    /// Player active, collisions checked
    Running,
    /// Run over, frame updates frozen
    Ended,
}

/// Everything that moves
#[derive(Debug, Clone, Default)]
pub struct Field {
    /// Present only while a run is in progress
    pub player: Option<Entity>,
    pub obstacles: Vec<Entity>,
}

impl Field {
    /// Index of the first obstacle touching the player, if any
    pub fn first_collision(&self) -> Option<usize> {
        let player = self.player.as_ref()?;
        self.obstacles.iter().position(|o| player.overlaps(o))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Color;
    use glam::Vec2;

    #[test]
    fn test_first_collision() {
        let mut field = Field::default();
        field
            .obstacles
            .push(Entity::obstacle(Vec2::new(0.0, 0.0), 5.0, Vec2::X, Color::Gray(100)));
        field
            .obstacles
            .push(Entity::obstacle(Vec2::new(52.0, 52.0), 5.0, Vec2::X, Color::Gray(100)));
        assert_eq!(field.first_collision(), None);

        field.player = Some(Entity::player(Vec2::new(50.0, 50.0), 10.0));
        assert_eq!(field.first_collision(), Some(1));
    }
}
