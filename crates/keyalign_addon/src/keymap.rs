// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyboard shortcut bindings, contexts, and user customization.
//!
//! Bindings are owned by a [`KeymapRegistry`] and torn down through the
//! opaque [`KeymapHandle`] returned at registration, so enable/disable cycles
//! leave no stray state behind. User customizations are tracked separately
//! from the registered defaults and persist to RON as display strings
//! (`"Shift+N"`), the same form shown in the preferences panel.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Keymap persistence errors
#[derive(Debug, Error)]
pub enum KeymapError {
    /// File could not be read or written
    #[error("keymap I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Customizations could not be serialized
    #[error("keymap serialize error: {0}")]
    Serialize(#[from] ron::Error),

    /// Stored customizations could not be parsed
    #[error("keymap parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Modifier keys for shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    /// Control key (Cmd on macOS)
    pub ctrl: bool,
    /// Shift key
    pub shift: bool,
    /// Alt key (Option on macOS)
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
    };
    /// Control only
    pub const CTRL: Self = Self {
        ctrl: true,
        shift: false,
        alt: false,
    };
    /// Shift only
    pub const SHIFT: Self = Self {
        ctrl: false,
        shift: true,
        alt: false,
    };

    /// Create from egui modifiers
    pub fn from_egui(mods: &egui::Modifiers) -> Self {
        Self {
            ctrl: mods.ctrl || mods.command,
            shift: mods.shift,
            alt: mods.alt,
        }
    }

    /// Check if these modifiers match egui modifiers
    pub fn matches(&self, mods: &egui::Modifiers) -> bool {
        self.ctrl == (mods.ctrl || mods.command) && self.shift == mods.shift && self.alt == mods.alt
    }
}

impl std::fmt::Display for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.alt {
            parts.push("Alt");
        }
        if self.shift {
            parts.push("Shift");
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// A keyboard shortcut (key + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shortcut {
    /// The main key
    pub key: egui::Key,
    /// Modifier keys
    pub modifiers: Modifiers,
}

impl Shortcut {
    /// Create a new shortcut with no modifiers
    pub const fn new(key: egui::Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a shortcut with Ctrl modifier
    pub const fn ctrl(key: egui::Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::CTRL,
        }
    }

    /// Create a shortcut with Shift modifier
    pub const fn shift(key: egui::Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::SHIFT,
        }
    }

    /// Create a shortcut with custom modifiers
    pub const fn with_modifiers(key: egui::Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Check if this shortcut is pressed given current input
    pub fn is_pressed(&self, ctx: &egui::Context) -> bool {
        ctx.input(|i| self.modifiers.matches(&i.modifiers) && i.key_pressed(self.key))
    }

    /// Get display string for this shortcut (e.g. `"Shift+N"`)
    pub fn display(&self) -> String {
        if self.modifiers == Modifiers::NONE {
            self.key.name().to_string()
        } else {
            format!("{}+{}", self.modifiers, self.key.name())
        }
    }

    /// Parse a shortcut from a display string (e.g. `"Shift+N"`, `"Ctrl+Shift+Z"`)
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let (key_part, modifier_parts) = parts.split_last()?;

        let mut modifiers = Modifiers::NONE;
        for part in modifier_parts {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" | "cmd" => modifiers.ctrl = true,
                "shift" => modifiers.shift = true,
                "alt" | "option" => modifiers.alt = true,
                _ => return None,
            }
        }

        let key = parse_key(key_part)?;
        Some(Self { key, modifiers })
    }
}

impl std::fmt::Display for Shortcut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Parse a key name case-insensitively, with a few common aliases.
fn parse_key(s: &str) -> Option<egui::Key> {
    let trimmed = s.trim();
    if let Some(key) = egui::Key::from_name(trimmed) {
        return Some(key);
    }
    if let Some(key) = egui::Key::ALL
        .iter()
        .copied()
        .find(|k| k.name().eq_ignore_ascii_case(trimmed))
    {
        return Some(key);
    }
    match trimmed.to_ascii_lowercase().as_str() {
        "esc" => Some(egui::Key::Escape),
        "del" => Some(egui::Key::Delete),
        "return" => Some(egui::Key::Enter),
        _ => None,
    }
}

/// Editor area a binding is active in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeymapContext {
    /// Active everywhere
    #[default]
    Global,
    /// Active in the dope sheet
    DopeSheet,
    /// Active in the graph editor
    GraphEditor,
    /// Active in the 3D viewport
    Viewport,
}

impl KeymapContext {
    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Global => "Global",
            Self::DopeSheet => "Dope Sheet",
            Self::GraphEditor => "Graph Editor",
            Self::Viewport => "Viewport",
        }
    }

    /// Whether a binding in this context fires while `area` is focused
    pub fn active_in(&self, area: KeymapContext) -> bool {
        *self == Self::Global || *self == area
    }
}

/// A registered key binding
#[derive(Debug, Clone)]
pub struct KeyBinding {
    /// Command triggered by the binding
    pub command_id: String,
    /// Default shortcut
    pub shortcut: Shortcut,
    /// Context the binding is active in
    pub context: KeymapContext,
}

impl KeyBinding {
    /// Create a new binding
    pub fn new(command_id: impl Into<String>, shortcut: Shortcut, context: KeymapContext) -> Self {
        Self {
            command_id: command_id.into(),
            shortcut,
            context,
        }
    }
}

/// Opaque handle to a registered binding.
///
/// Consumed by [`KeymapRegistry::unregister`]; there is no other way to
/// remove a binding.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct KeymapHandle(u64);

/// Serialized form of user customizations: command id to shortcut display
/// string, `None` meaning explicitly unbound.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct KeymapPrefs {
    bindings: IndexMap<String, Option<String>>,
}

/// Registry of key bindings with user customization on top.
#[derive(Debug, Default)]
pub struct KeymapRegistry {
    /// Registered bindings by handle value
    bindings: IndexMap<u64, KeyBinding>,
    /// User deviations from the registered defaults
    customizations: IndexMap<String, Option<Shortcut>>,
    /// Next handle value
    next_handle: u64,
}

impl KeymapRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a binding, returning the handle that removes it
    pub fn register(&mut self, binding: KeyBinding) -> KeymapHandle {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.bindings.insert(handle, binding);
        KeymapHandle(handle)
    }

    /// Remove the binding a handle refers to
    pub fn unregister(&mut self, handle: KeymapHandle) -> Option<KeyBinding> {
        self.bindings.shift_remove(&handle.0)
    }

    /// Iterate over registered bindings
    pub fn bindings(&self) -> impl Iterator<Item = &KeyBinding> {
        self.bindings.values()
    }

    /// Get the registered binding for a command
    pub fn binding_for_command(&self, command_id: &str) -> Option<&KeyBinding> {
        self.bindings.values().find(|b| b.command_id == command_id)
    }

    /// The shortcut currently in effect for a command.
    ///
    /// A customization overrides the registered default; `None` means the
    /// command is unbound (either never registered or explicitly cleared).
    pub fn effective_shortcut(&self, command_id: &str) -> Option<Shortcut> {
        match self.customizations.get(command_id) {
            Some(customized) => *customized,
            None => self.binding_for_command(command_id).map(|b| b.shortcut),
        }
    }

    /// Whether a command's shortcut deviates from its registered default
    pub fn is_customized(&self, command_id: &str) -> bool {
        self.customizations.contains_key(command_id)
    }

    /// Override a command's shortcut (`None` unbinds it)
    pub fn customize(&mut self, command_id: impl Into<String>, shortcut: Option<Shortcut>) {
        self.customizations.insert(command_id.into(), shortcut);
    }

    /// Drop a command's customization, restoring the registered default
    pub fn reset(&mut self, command_id: &str) {
        self.customizations.shift_remove(command_id);
    }

    /// Find a binding whose effective shortcut collides with `shortcut` in
    /// an overlapping context, ignoring `exclude_command`.
    pub fn conflict(
        &self,
        shortcut: Shortcut,
        context: KeymapContext,
        exclude_command: &str,
    ) -> Option<&KeyBinding> {
        self.bindings.values().find(|b| {
            b.command_id != exclude_command
                && (b.context.active_in(context) || context.active_in(b.context))
                && self.effective_shortcut(&b.command_id) == Some(shortcut)
        })
    }

    /// Check which command (if any) is triggered by the current input.
    ///
    /// Bindings without Ctrl or Alt are suppressed while a text field has
    /// focus, since those key presses insert text.
    pub fn check_input(&self, ctx: &egui::Context, area: KeymapContext) -> Option<String> {
        let text_has_focus = ctx.memory(|m| m.focused().is_some());

        for binding in self.bindings.values() {
            if !binding.context.active_in(area) {
                continue;
            }
            let Some(shortcut) = self.effective_shortcut(&binding.command_id) else {
                continue;
            };
            if text_has_focus && !shortcut.modifiers.ctrl && !shortcut.modifiers.alt {
                continue;
            }
            if shortcut.is_pressed(ctx) {
                return Some(binding.command_id.clone());
            }
        }
        None
    }

    /// Save user customizations to a RON file
    pub fn save_customizations(&self, path: &Path) -> Result<(), KeymapError> {
        let text = ron::ser::to_string_pretty(&self.to_prefs(), ron::ser::PrettyConfig::default())?;
        std::fs::write(path, text)?;
        tracing::debug!(?path, "saved keymap customizations");
        Ok(())
    }

    /// Load user customizations from a RON file.
    ///
    /// A missing file means no customizations and is not an error.
    pub fn load_customizations(&mut self, path: &Path) -> Result<(), KeymapError> {
        if !path.exists() {
            return Ok(());
        }
        let text = std::fs::read_to_string(path)?;
        let prefs: KeymapPrefs = ron::from_str(&text)?;
        self.apply_prefs(prefs);
        tracing::debug!(?path, "loaded keymap customizations");
        Ok(())
    }

    fn to_prefs(&self) -> KeymapPrefs {
        KeymapPrefs {
            bindings: self
                .customizations
                .iter()
                .map(|(id, shortcut)| (id.clone(), shortcut.map(|s| s.display())))
                .collect(),
        }
    }

    fn apply_prefs(&mut self, prefs: KeymapPrefs) {
        for (command_id, stored) in prefs.bindings {
            match stored {
                None => self.customize(command_id, None),
                Some(text) => match Shortcut::parse(&text) {
                    Some(shortcut) => self.customize(command_id, Some(shortcut)),
                    None => {
                        tracing::warn!(%command_id, %text, "ignoring unparseable stored shortcut");
                    }
                },
            }
        }
    }
}
