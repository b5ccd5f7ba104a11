//! Collection triggers
//!
//! Two independent volumes follow the hole: a small direct collector at the
//! center that swallows (or trips over) whatever it touches, and a larger
//! force volume that drags attractable objects inward so they eventually
//! reach the collector. Overlap is tested in the horizontal plane, matching
//! how the hole itself deforms the ground.

use std::collections::BTreeSet;

use glam::Vec3;

use super::trash::{Trash, TrashKind};
use crate::horizontal_distance;

/// A contact reported by the direct collector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub id: u32,
    pub kind: TrashKind,
}

/// Small trigger volume at the hole center
///
/// Reports enter edges only: an object sitting inside the volume fires once,
/// when it first overlaps.
#[derive(Debug, Clone)]
pub struct Collector {
    radius: f32,
    inside: BTreeSet<u32>,
}

impl Collector {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            inside: BTreeSet::new(),
        }
    }

    /// Overlap test against all live trash; returns this tick's enter edges
    /// in ascending id order
    pub fn scan(&mut self, center: Vec3, trash: &[Trash]) -> Vec<Contact> {
        let mut now_inside = BTreeSet::new();
        let mut contacts = Vec::new();

        for object in trash.iter().filter(|t| t.alive) {
            if horizontal_distance(object.pos, center) <= self.radius + object.radius {
                now_inside.insert(object.id);
                if !self.inside.contains(&object.id) {
                    contacts.push(Contact {
                        id: object.id,
                        kind: object.kind,
                    });
                }
            }
        }

        self.inside = now_inside;
        contacts
    }
}

/// Larger trigger volume that attracts overlapping objects
///
/// Membership is an explicit set with edge handlers so enter/exit ordering
/// can never corrupt it: duplicate enters and exits without a prior enter
/// are both no-ops.
#[derive(Debug, Clone)]
pub struct ForceVolume {
    radius: f32,
    members: BTreeSet<u32>,
}

impl ForceVolume {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            members: BTreeSet::new(),
        }
    }

    /// Record an object entering the volume; returns false if it was
    /// already a member
    pub fn on_enter(&mut self, id: u32) -> bool {
        self.members.insert(id)
    }

    /// Record an object leaving the volume; unknown ids are a no-op
    pub fn on_exit(&mut self, id: u32) {
        self.members.remove(&id);
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.members.contains(&id)
    }

    /// Derive this tick's enter/exit edges from overlap with `anchor` and
    /// feed them through the edge handlers
    pub fn sync(&mut self, anchor: Vec3, trash: &[Trash]) {
        let mut overlapping = BTreeSet::new();
        for object in trash.iter().filter(|t| t.alive && t.attractable) {
            if horizontal_distance(object.pos, anchor) <= self.radius + object.radius {
                overlapping.insert(object.id);
            }
        }

        let entered: Vec<u32> = overlapping.difference(&self.members).copied().collect();
        let exited: Vec<u32> = self.members.difference(&overlapping).copied().collect();
        for id in entered {
            self.on_enter(id);
        }
        for id in exited {
            self.on_exit(id);
        }
    }

    /// Pull every member toward the anchor
    pub fn attract(&self, anchor: Vec3, trash: &mut [Trash], dt: f32) {
        if self.members.is_empty() {
            return;
        }
        for object in trash.iter_mut() {
            if object.alive && self.members.contains(&object.id) {
                object.force_to(anchor, dt);
            }
        }
    }
}
