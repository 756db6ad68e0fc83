// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scene objects and their animation data.

use crate::action::Action;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a scene object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub Uuid);

impl ObjectId {
    /// Create a new random object ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

/// Animation data attached to an object
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnimData {
    /// The active action, if one is assigned
    pub action: Option<Action>,
}

impl AnimData {
    /// Create animation data with an assigned action
    pub fn with_action(action: Action) -> Self {
        Self {
            action: Some(action),
        }
    }
}

/// An object in the scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneObject {
    /// Unique object ID
    pub id: ObjectId,
    /// Object name
    pub name: String,
    /// Whether the object is selected
    pub selected: bool,
    /// Animation data, if the object is animated
    pub anim: Option<AnimData>,
}

impl SceneObject {
    /// Create a new unselected object without animation data
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::new(),
            name: name.into(),
            selected: false,
            anim: None,
        }
    }

    /// Set the selection flag
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Attach an action through fresh animation data
    pub fn with_action(mut self, action: Action) -> Self {
        self.anim = Some(AnimData::with_action(action));
        self
    }

    /// The active action, if animation data and an action are both present
    pub fn action(&self) -> Option<&Action> {
        self.anim.as_ref()?.action.as_ref()
    }

    /// The active action mutably, if present
    pub fn action_mut(&mut self) -> Option<&mut Action> {
        self.anim.as_mut()?.action.as_mut()
    }
}
