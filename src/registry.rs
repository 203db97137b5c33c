/// The live entity collection for the active level.
///
/// Insertion-ordered: registration order is both update order and painter's
/// (render) order. During an update pass the entity being visited is taken
/// out of its slot, so every lookup it performs sees the rest of the world
/// but never itself; entities appended mid-pass occupy fresh slots past the
/// pass end, which makes them render the same frame without being updated
/// until the next one.
use crate::entity::{Entity, Equation, Generator, Lives, Obstacle, Player, Target};
use crate::rect::Bounds;
use crate::surface::Surface;

#[derive(Clone, Debug, Default)]
pub struct Registry {
    slots: Vec<Option<Entity>>,
}

impl Registry {
    pub fn new() -> Self {
        Registry { slots: Vec::new() }
    }

    pub fn add(&mut self, entity: Entity) {
        self.slots.push(Some(entity));
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Slot count at the start of an update pass (includes vacancies).
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn take_slot(&mut self, index: usize) -> Option<Entity> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    pub fn restore_slot(&mut self, index: usize, entity: Entity) {
        self.slots[index] = Some(entity);
    }

    /// Drops vacated slots after a pass, preserving order.
    pub fn compact(&mut self) {
        self.slots.retain(Option::is_some);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.slots.iter().flatten()
    }

    /// Renders every live entity in registration order.
    pub fn render_all(&self, surface: &mut dyn Surface, bounds: Bounds) {
        for entity in self.iter() {
            entity.render(surface, bounds);
        }
    }

    // ── Typed lookups ─────────────────────────────────────────────────────
    //
    // Cross-entity references are re-resolved every frame; a miss means the
    // collaborator is gone and the caller skips its effect.

    pub fn player(&self) -> Option<&Player> {
        self.iter().find_map(|e| match e {
            Entity::Player(p) => Some(p),
            _ => None,
        })
    }

    pub fn player_mut(&mut self) -> Option<&mut Player> {
        self.slots.iter_mut().flatten().find_map(|e| match e {
            Entity::Player(p) => Some(p),
            _ => None,
        })
    }

    pub fn equation(&self) -> Option<&Equation> {
        self.iter().find_map(|e| match e {
            Entity::Equation(q) => Some(q),
            _ => None,
        })
    }

    pub fn equation_mut(&mut self) -> Option<&mut Equation> {
        self.slots.iter_mut().flatten().find_map(|e| match e {
            Entity::Equation(q) => Some(q),
            _ => None,
        })
    }

    pub fn generator(&self) -> Option<&Generator> {
        self.iter().find_map(|e| match e {
            Entity::Generator(g) => Some(g),
            _ => None,
        })
    }

    pub fn generator_mut(&mut self) -> Option<&mut Generator> {
        self.slots.iter_mut().flatten().find_map(|e| match e {
            Entity::Generator(g) => Some(g),
            _ => None,
        })
    }

    pub fn lives(&self) -> Option<&Lives> {
        self.iter().find_map(|e| match e {
            Entity::Lives(l) => Some(l),
            _ => None,
        })
    }

    pub fn lives_mut(&mut self) -> Option<&mut Lives> {
        self.slots.iter_mut().flatten().find_map(|e| match e {
            Entity::Lives(l) => Some(l),
            _ => None,
        })
    }

    pub fn targets(&self) -> impl Iterator<Item = &Target> {
        self.iter().filter_map(|e| match e {
            Entity::Target(t) => Some(t),
            _ => None,
        })
    }

    pub fn targets_mut(&mut self) -> impl Iterator<Item = &mut Target> {
        self.slots.iter_mut().flatten().filter_map(|e| match e {
            Entity::Target(t) => Some(t),
            _ => None,
        })
    }

    pub fn obstacles(&self) -> impl Iterator<Item = &Obstacle> {
        self.iter().filter_map(|e| match e {
            Entity::Obstacle(o) => Some(o),
            _ => None,
        })
    }

    pub fn obstacles_mut(&mut self) -> impl Iterator<Item = &mut Obstacle> {
        self.slots.iter_mut().flatten().filter_map(|e| match e {
            Entity::Obstacle(o) => Some(o),
            _ => None,
        })
    }

    /// Falling numbers currently alive (spawn-cap bookkeeping).
    pub fn target_count(&self) -> usize {
        self.targets().filter(|t| !t.dead).count()
    }

    /// Live obstacles (concurrent-cap bookkeeping).
    pub fn obstacle_count(&self) -> usize {
        self.obstacles().filter(|o| !o.dead).count()
    }
}
