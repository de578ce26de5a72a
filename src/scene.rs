use crate::{anchor::Anchor, core::Vec3};

pub trait SpawnHost {
    fn spawn(&mut self, position: Vec3);
    fn despawn(&mut self);
}

/// One `spawn` per anchor value, one `despawn` when it goes away.
#[derive(Debug, Default)]
pub struct SpawnDriver {
    spawned_for: Option<Anchor>,
}

impl SpawnDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawned_for(&self) -> Option<Anchor> {
        self.spawned_for
    }

    pub fn sync<H: SpawnHost + ?Sized>(&mut self, anchor: Option<Anchor>, host: &mut H) {
        if self.spawned_for == anchor {
            return;
        }
        if self.spawned_for.take().is_some() {
            host.despawn();
        }
        if let Some(anchor) = anchor {
            host.spawn(anchor.world_position);
            self.spawned_for = Some(anchor);
        }
    }
}
