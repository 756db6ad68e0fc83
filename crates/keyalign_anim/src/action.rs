// SPDX-License-Identifier: MIT OR Apache-2.0
//! Actions and the layered channel hierarchy.
//!
//! An [`Action`] owns layers, each layer owns strips, each strip owns channel
//! bags, and each channel bag owns the f-curves. Empty containers make the
//! walk total: a layer with no strips simply contributes nothing.

use crate::fcurve::FCurve;
use crate::keyframe::Keyframe;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionId(pub Uuid);

impl ActionId {
    /// Create a new random action ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ActionId {
    fn default() -> Self {
        Self::new()
    }
}

/// A group of f-curves animating one bound target
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelBag {
    /// Curves in this bag
    fcurves: Vec<FCurve>,
}

impl ChannelBag {
    /// Create a new empty channel bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a curve to this bag
    pub fn add_curve(&mut self, curve: FCurve) {
        self.fcurves.push(curve);
    }

    /// Get all curves
    pub fn curves(&self) -> &[FCurve] {
        &self.fcurves
    }

    /// Get all curves mutably
    pub fn curves_mut(&mut self) -> &mut [FCurve] {
        &mut self.fcurves
    }
}

/// A span of animation within a layer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Strip {
    /// Channel bags in this strip
    channel_bags: Vec<ChannelBag>,
}

impl Strip {
    /// Create a new empty strip
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a channel bag to this strip
    pub fn add_channel_bag(&mut self, bag: ChannelBag) {
        self.channel_bags.push(bag);
    }

    /// Get all channel bags
    pub fn channel_bags(&self) -> &[ChannelBag] {
        &self.channel_bags
    }

    /// Get all channel bags mutably
    pub fn channel_bags_mut(&mut self) -> &mut [ChannelBag] {
        &mut self.channel_bags
    }
}

/// A named animation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    /// Layer name
    pub name: String,
    /// Blend influence of this layer
    pub influence: f32,
    /// Strips on this layer
    strips: Vec<Strip>,
}

impl Layer {
    /// Create a new empty layer
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            influence: 1.0,
            strips: Vec::new(),
        }
    }

    /// Add a strip to this layer
    pub fn add_strip(&mut self, strip: Strip) {
        self.strips.push(strip);
    }

    /// Get all strips
    pub fn strips(&self) -> &[Strip] {
        &self.strips
    }

    /// Get all strips mutably
    pub fn strips_mut(&mut self) -> &mut [Strip] {
        &mut self.strips
    }
}

/// An action owning the full layered channel hierarchy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    /// Unique action ID
    pub id: ActionId,
    /// Action name
    pub name: String,
    /// Animation layers
    layers: Vec<Layer>,
}

impl Action {
    /// Create a new empty action
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ActionId::new(),
            name: name.into(),
            layers: Vec::new(),
        }
    }

    /// Create an action with one layer holding one strip and one channel bag.
    ///
    /// This is the common shape for objects animated without layering.
    pub fn single_layer(name: impl Into<String>) -> Self {
        let mut strip = Strip::new();
        strip.add_channel_bag(ChannelBag::new());
        let mut layer = Layer::new("Base");
        layer.add_strip(strip);

        let mut action = Self::new(name);
        action.layers.push(layer);
        action
    }

    /// Add a layer
    pub fn add_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    /// Get all layers
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Get all layers mutably
    pub fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }

    /// Iterate over every f-curve in the hierarchy
    pub fn fcurves(&self) -> impl Iterator<Item = &FCurve> {
        self.layers
            .iter()
            .flat_map(|layer| layer.strips())
            .flat_map(|strip| strip.channel_bags())
            .flat_map(|bag| bag.curves().iter())
    }

    /// Iterate over every f-curve in the hierarchy mutably
    pub fn fcurves_mut(&mut self) -> impl Iterator<Item = &mut FCurve> {
        self.layers
            .iter_mut()
            .flat_map(|layer| layer.strips_mut())
            .flat_map(|strip| strip.channel_bags_mut())
            .flat_map(|bag| bag.curves_mut().iter_mut())
    }

    /// Iterate over every selected keyframe in the hierarchy
    pub fn selected_keyframes(&self) -> impl Iterator<Item = &Keyframe> {
        self.fcurves().flat_map(FCurve::selected_keyframes)
    }

    /// Count selected keyframes across the hierarchy
    pub fn selected_keyframe_count(&self) -> usize {
        self.selected_keyframes().count()
    }

    /// The first channel bag of the first strip of the first layer, if present.
    ///
    /// Convenience accessor for the [`Action::single_layer`] shape.
    pub fn primary_channel_bag_mut(&mut self) -> Option<&mut ChannelBag> {
        self.layers
            .first_mut()?
            .strips_mut()
            .first_mut()?
            .channel_bags_mut()
            .first_mut()
    }
}
