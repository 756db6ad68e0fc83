// SPDX-License-Identifier: MIT OR Apache-2.0
//! Layered animation data model for KeyAlign.
//!
//! This crate provides the document-side animation structures:
//! - Keyframes with Bezier handle coordinates and selection flags
//! - F-curves grouped into channel bags, strips, and layers
//! - Actions owning the layered channel hierarchy
//! - Scene objects with optional animation data
//!
//! ## Architecture
//!
//! The hierarchy is a typed tree walked through flattening iterators:
//! `Action` → `Layer` → `Strip` → `ChannelBag` → `FCurve` → `Keyframe`.
//! Absence at any level below the action is an empty sequence rather than an
//! optional, so traversal stays total. Only `AnimData::action` and
//! `SceneObject::anim` are `Option`s, handled by the caller.

pub mod action;
pub mod fcurve;
pub mod keyframe;
pub mod object;
pub mod scene;

pub use action::{Action, ActionId, ChannelBag, Layer, Strip};
pub use fcurve::FCurve;
pub use keyframe::{InterpolationMode, Keyframe};
pub use object::{AnimData, ObjectId, SceneObject};
pub use scene::Scene;
