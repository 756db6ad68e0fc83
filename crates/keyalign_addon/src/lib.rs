// SPDX-License-Identifier: MIT OR Apache-2.0
//! KeyAlign editor add-on.
//!
//! Contributes one operator to the host editor: align the earliest selected
//! keyframe of each selected object to the current frame, shifting that
//! object's remaining selected keyframes (and their Bezier handles) by the
//! same delta. Alongside the operator this crate carries:
//! - Command palette registration with fuzzy search
//! - A Shift+N dope sheet key binding with user rebinding and RON-persisted
//!   customizations
//! - An egui preferences panel for the bindings
//! - Explicit register/unregister lifecycle through an opaque handle
//!
//! ## Architecture
//!
//! The scene transform itself is a pure function over the
//! [`keyalign_anim::Scene`] ([`align::align_selected_keyframes`]); the
//! [`operator::Operator`] trait wraps it for host dispatch, and
//! [`addon::KeyAlignAddon`] wires everything into [`registry::EditorServices`].

pub mod addon;
pub mod align;
pub mod keymap;
pub mod operator;
pub mod prefs;
pub mod registry;

pub use addon::{AddonHandle, KeyAlignAddon};
pub use align::{align_selected_keyframes, AlignFirstKeyframe};
pub use keymap::{
    KeyBinding, KeymapContext, KeymapError, KeymapHandle, KeymapRegistry, Modifiers, Shortcut,
};
pub use operator::{
    Operator, OperatorFlags, OperatorOutcome, OperatorStatus, Report, ReportLevel,
};
pub use prefs::PreferencesPanel;
pub use registry::{Command, CommandRegistry, EditorServices, RegistryError};
