// SPDX-License-Identifier: MIT OR Apache-2.0
//! Add-on lifecycle: everything KeyAlign contributes to the host.
//!
//! Registration returns an [`AddonHandle`] recording exactly what was added;
//! unregistration consumes the handle and removes exactly those items. No
//! registration state lives outside the handle and the host services.

use crate::align::AlignFirstKeyframe;
use crate::keymap::{KeyBinding, KeymapContext, KeymapHandle, Shortcut};
use crate::registry::{Command, EditorServices, RegistryError};

/// Opaque record of the registrations made by [`KeyAlignAddon::register`].
#[derive(Debug)]
pub struct AddonHandle {
    operator_id: &'static str,
    command_id: &'static str,
    keymap: KeymapHandle,
}

/// The KeyAlign add-on.
pub struct KeyAlignAddon;

impl KeyAlignAddon {
    /// Register the operator, its palette command, and its default key
    /// binding (Shift+N in the dope sheet).
    pub fn register(services: &mut EditorServices) -> Result<AddonHandle, RegistryError> {
        services.register_operator(Box::new(AlignFirstKeyframe))?;

        let command = Command::new(
            AlignFirstKeyframe::ID,
            "Align First Keyframe To Current Frame",
            "Animation",
        )
        .with_shortcut("Shift+N")
        .with_description(
            "Align the earliest selected keyframe of each selected object to the current frame",
        );
        if let Err(err) = services.commands.register(command) {
            services.unregister_operator(AlignFirstKeyframe::ID);
            return Err(err);
        }

        let keymap = services.keymap.register(KeyBinding::new(
            AlignFirstKeyframe::ID,
            Shortcut::shift(egui::Key::N),
            KeymapContext::DopeSheet,
        ));

        tracing::info!("KeyAlign add-on registered");
        Ok(AddonHandle {
            operator_id: AlignFirstKeyframe::ID,
            command_id: AlignFirstKeyframe::ID,
            keymap,
        })
    }

    /// Tear down everything the handle records.
    pub fn unregister(services: &mut EditorServices, handle: AddonHandle) {
        services.keymap.unregister(handle.keymap);
        services.commands.unregister(handle.command_id);
        services.unregister_operator(handle.operator_id);
        tracing::info!("KeyAlign add-on unregistered");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_contributes_operator_command_and_binding() {
        let mut services = EditorServices::new();
        let handle = KeyAlignAddon::register(&mut services).unwrap();

        assert!(services.operator(AlignFirstKeyframe::ID).is_some());
        assert!(services.commands.get(AlignFirstKeyframe::ID).is_some());
        let binding = services
            .keymap
            .binding_for_command(AlignFirstKeyframe::ID)
            .unwrap();
        assert_eq!(binding.shortcut, Shortcut::shift(egui::Key::N));
        assert_eq!(binding.context, KeymapContext::DopeSheet);

        KeyAlignAddon::unregister(&mut services, handle);
        assert!(services.operator(AlignFirstKeyframe::ID).is_none());
        assert!(services.commands.get(AlignFirstKeyframe::ID).is_none());
        assert!(services
            .keymap
            .binding_for_command(AlignFirstKeyframe::ID)
            .is_none());
    }

    #[test]
    fn test_double_register_rolls_back_cleanly() {
        let mut services = EditorServices::new();
        let handle = KeyAlignAddon::register(&mut services).unwrap();

        assert!(KeyAlignAddon::register(&mut services).is_err());
        // The first registration is still intact.
        assert!(services.operator(AlignFirstKeyframe::ID).is_some());
        assert_eq!(services.keymap.bindings().count(), 1);

        KeyAlignAddon::unregister(&mut services, handle);
        assert_eq!(services.keymap.bindings().count(), 0);
    }

    #[test]
    fn test_reenable_after_disable() {
        let mut services = EditorServices::new();
        let handle = KeyAlignAddon::register(&mut services).unwrap();
        KeyAlignAddon::unregister(&mut services, handle);

        let handle = KeyAlignAddon::register(&mut services).unwrap();
        assert!(services.operator(AlignFirstKeyframe::ID).is_some());
        KeyAlignAddon::unregister(&mut services, handle);
    }
}
