//! Minimal reference physics
//!
//! Stands in for the rendering engine's physics: integrates gravity, keeps
//! throwables inside the scene edges, and reports contacts with the catcher
//! and the ground. Contacts are handed out as raw body pairs, exactly as an
//! external engine would deliver them; nothing here decides what they mean.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::catcher::Catcher;
use super::collision::{Body, Category};
use super::world::World;
use crate::tuning::Tuning;

/// Static scene geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    /// Top surface of the ground
    pub ground_y: f32,
    pub gravity: f32,
    pub edge_restitution: f32,
}

impl Arena {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            width: tuning.scene_width,
            height: tuning.scene_height,
            ground_y: tuning.ground_height,
            gravity: tuning.gravity,
            edge_restitution: tuning.edge_restitution,
        }
    }

    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }

    /// Where ground decorations sit for an impact at `x`
    pub fn ground_mark(&self, x: f32) -> Vec2 {
        Vec2::new(x, self.ground_y + 5.0)
    }

    pub fn ground_body(&self, x: f32) -> Body {
        Body::fixture(Category::Ground, Vec2::new(x, self.ground_y))
    }
}

/// A contact as reported by the physics side (unordered)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactEvent {
    pub a: Body,
    pub b: Body,
}

/// Advance every throwable by `dt` and collect contacts
pub fn step(world: &mut World, catcher: &Catcher, arena: &Arena, dt: f32) -> Vec<ContactEvent> {
    let mut contacts = Vec::new();

    for item in world.throwables_mut() {
        item.vel.y -= arena.gravity * dt;
        item.pos += item.vel * dt;

        // Edge loop: bounce off the sides and the top
        let r = item.radius();
        if item.pos.x - r < 0.0 {
            item.pos.x = r;
            item.vel.x = item.vel.x.abs() * arena.edge_restitution;
        } else if item.pos.x + r > arena.width {
            item.pos.x = arena.width - r;
            item.vel.x = -item.vel.x.abs() * arena.edge_restitution;
        }
        if item.pos.y + r > arena.height {
            item.pos.y = arena.height - r;
            item.vel.y = -item.vel.y.abs() * arena.edge_restitution;
        }

        let body = Body::entity(item.kind.category(), item.id, item.pos);
        if catcher.overlaps(item.pos, r) {
            contacts.push(ContactEvent {
                a: catcher.body(),
                b: body,
            });
        }
        if item.pos.y - r <= arena.ground_y {
            contacts.push(ContactEvent {
                a: body,
                b: arena.ground_body(item.pos.x),
            });
        }
    }

    contacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::throwable::Throwable;

    fn setup() -> (World, Catcher, Arena) {
        let tuning = Tuning::default();
        (World::new(), Catcher::new(&tuning), Arena::from_tuning(&tuning))
    }

    #[test]
    fn test_gravity_pulls_down() {
        let (mut world, catcher, arena) = setup();
        let id = world.insert(Throwable::banana().at(Vec2::new(20.0, 400.0)));
        step(&mut world, &catcher, &arena, 0.1);
        let banana = world.get(id).unwrap();
        assert!(banana.vel.y < 0.0);
        assert!(banana.pos.y < 400.0);
    }

    #[test]
    fn test_side_edges_bounce() {
        let (mut world, catcher, arena) = setup();
        let mut coconut = Throwable::coconut().at(Vec2::new(arena.width - 15.0, 400.0));
        coconut.vel = Vec2::new(300.0, 0.0);
        let id = world.insert(coconut);
        step(&mut world, &catcher, &arena, 0.1);
        let coconut = world.get(id).unwrap();
        assert!(coconut.vel.x < 0.0);
        assert!(coconut.pos.x + coconut.radius() <= arena.width);
    }

    #[test]
    fn test_reports_catcher_and_ground_contacts() {
        let (mut world, catcher, arena) = setup();
        let above = catcher.pos + Vec2::new(0.0, catcher.half_size.y + 5.0);
        let caught = world.insert(Throwable::banana().at(above));
        let landed = world.insert(Throwable::coconut().at(Vec2::new(20.0, arena.ground_y + 2.0)));

        let contacts = step(&mut world, &catcher, &arena, 1.0 / 60.0);
        assert_eq!(contacts.len(), 2);
        assert!(contacts.iter().any(|c| c.b.entity == Some(caught) && c.a.category == Category::Catcher));
        assert!(contacts.iter().any(|c| c.a.entity == Some(landed) && c.b.category == Category::Ground));
    }
}
