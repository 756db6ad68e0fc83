// SPDX-License-Identifier: MIT OR Apache-2.0
//! Preferences panel for the add-on's key bindings.
//!
//! Lists each registered binding with its effective shortcut and offers a
//! capture-next-keypress rebind flow, unbinding, and reset-to-default. All
//! state changes go through the [`KeymapRegistry`]; the panel itself only
//! holds transient capture state.

use crate::keymap::{KeymapContext, KeymapRegistry, Modifiers, Shortcut};
use crate::registry::CommandRegistry;

/// Preferences panel state
#[derive(Default)]
pub struct PreferencesPanel {
    /// Command currently being rebound, if any
    capturing_for: Option<String>,
    /// Warning from the last capture attempt
    conflict_warning: Option<String>,
}

impl PreferencesPanel {
    /// Create a new panel
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a rebind capture is in progress
    pub fn is_capturing(&self) -> bool {
        self.capturing_for.is_some()
    }

    /// Render the panel
    pub fn ui(
        &mut self,
        ui: &mut egui::Ui,
        keymap: &mut KeymapRegistry,
        commands: &CommandRegistry,
    ) {
        ui.heading("Shortcuts");
        ui.add_space(4.0);

        let bindings: Vec<(String, KeymapContext)> = keymap
            .bindings()
            .map(|b| (b.command_id.clone(), b.context))
            .collect();

        egui::Grid::new("keyalign_bindings")
            .num_columns(4)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                for (command_id, context) in &bindings {
                    let label = commands
                        .get(command_id)
                        .map_or(command_id.as_str(), |c| c.name);
                    ui.label(label);
                    ui.label(
                        egui::RichText::new(context.name())
                            .weak()
                            .size(11.0),
                    );

                    let shortcut_text = keymap
                        .effective_shortcut(command_id)
                        .map_or_else(|| "Unbound".to_string(), |s| s.display());
                    let customized = keymap.is_customized(command_id);
                    let mut shortcut_rich = egui::RichText::new(shortcut_text).monospace();
                    if customized {
                        shortcut_rich = shortcut_rich.strong();
                    }
                    ui.label(shortcut_rich);

                    ui.horizontal(|ui| {
                        if ui.button("Rebind").clicked() {
                            self.capturing_for = Some(command_id.clone());
                            self.conflict_warning = None;
                        }
                        if ui.button("Clear").clicked() {
                            keymap.customize(command_id.clone(), None);
                        }
                        if ui
                            .add_enabled(customized, egui::Button::new("Reset"))
                            .clicked()
                        {
                            keymap.reset(command_id);
                        }
                    });
                    ui.end_row();
                }
            });

        if let Some(command_id) = self.capturing_for.clone() {
            ui.add_space(8.0);
            ui.label(
                egui::RichText::new("Press a key combination... (Esc to cancel)").italics(),
            );
            if let Some(captured) = capture_shortcut(ui) {
                self.finish_capture(keymap, &command_id, captured);
            }
        }

        if let Some(warning) = &self.conflict_warning {
            ui.add_space(4.0);
            ui.colored_label(egui::Color32::from_rgb(255, 200, 80), warning);
        }
    }

    fn finish_capture(
        &mut self,
        keymap: &mut KeymapRegistry,
        command_id: &str,
        captured: Option<Shortcut>,
    ) {
        self.capturing_for = None;
        let Some(shortcut) = captured else {
            // Escape pressed, capture cancelled.
            return;
        };

        let context = keymap
            .binding_for_command(command_id)
            .map_or(KeymapContext::Global, |b| b.context);
        if let Some(conflict) = keymap.conflict(shortcut, context, command_id) {
            self.conflict_warning = Some(format!(
                "{} is already bound to {}",
                shortcut.display(),
                conflict.command_id
            ));
            return;
        }

        self.conflict_warning = None;
        keymap.customize(command_id.to_string(), Some(shortcut));
        tracing::debug!(%command_id, shortcut = %shortcut.display(), "rebound shortcut");
    }
}

/// Read the next key press from the input queue.
///
/// Returns `Some(None)` for Escape (cancel) and `None` while no key has been
/// pressed yet.
fn capture_shortcut(ui: &egui::Ui) -> Option<Option<Shortcut>> {
    ui.input(|i| {
        i.events.iter().find_map(|event| match event {
            egui::Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } => {
                if *key == egui::Key::Escape {
                    Some(None)
                } else {
                    Some(Some(Shortcut::with_modifiers(
                        *key,
                        Modifiers::from_egui(modifiers),
                    )))
                }
            }
            _ => None,
        })
    })
}
