// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scene state: objects, selection, and the playhead.

use crate::object::{ObjectId, SceneObject};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The scene the editor operates on.
///
/// Objects are kept in insertion order. The current frame is the host's
/// playhead position; keyframe times are floats while the playhead itself is
/// an integer frame counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// All objects in the scene
    objects: IndexMap<ObjectId, SceneObject>,
    /// Current playhead frame
    pub current_frame: i32,
    /// Scene frame rate
    pub frame_rate: f32,
}

impl Scene {
    /// Create a new empty scene
    pub fn new() -> Self {
        Self {
            objects: IndexMap::new(),
            current_frame: 1,
            frame_rate: 24.0,
        }
    }

    /// Add an object to the scene
    pub fn add_object(&mut self, object: SceneObject) -> ObjectId {
        let id = object.id;
        self.objects.insert(id, object);
        id
    }

    /// Remove an object from the scene
    pub fn remove_object(&mut self, id: ObjectId) -> Option<SceneObject> {
        self.objects.shift_remove(&id)
    }

    /// Get an object by ID
    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    /// Get a mutable object by ID
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(&id)
    }

    /// Iterate over all objects
    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.values()
    }

    /// Iterate over all objects mutably
    pub fn objects_mut(&mut self) -> impl Iterator<Item = &mut SceneObject> {
        self.objects.values_mut()
    }

    /// Iterate over selected objects
    pub fn selected_objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.values().filter(|o| o.selected)
    }

    /// Iterate over selected objects mutably
    pub fn selected_objects_mut(&mut self) -> impl Iterator<Item = &mut SceneObject> {
        self.objects.values_mut().filter(|o| o.selected)
    }

    /// Whether any object is selected
    pub fn has_selection(&self) -> bool {
        self.selected_objects().next().is_some()
    }

    /// Get object count
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
