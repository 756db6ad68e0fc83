// SPDX-License-Identifier: MIT OR Apache-2.0
//! Command registry, operator table, and the editor service surface.
//!
//! [`EditorServices`] is the slice of the host an add-on registers into:
//! the operator table, the command palette, and the keymap. Add-ons receive
//! it mutably at enable/disable time; the host owns it for the rest of the
//! session.

use crate::keymap::{KeymapContext, KeymapRegistry};
use crate::operator::{Operator, OperatorOutcome};
use indexmap::IndexMap;
use keyalign_anim::Scene;
use thiserror::Error;

/// Registration and dispatch errors
#[derive(Debug, Error)]
pub enum RegistryError {
    /// An operator with this id is already registered
    #[error("operator already registered: {0}")]
    DuplicateOperator(&'static str),

    /// A command with this id is already registered
    #[error("command already registered: {0}")]
    DuplicateCommand(&'static str),

    /// No operator with this id is registered
    #[error("unknown operator: {0}")]
    UnknownOperator(String),

    /// The operator's poll rejected the current scene state
    #[error("operator rejected by poll: {0}")]
    PollRejected(&'static str),
}

/// A command that can be executed from the command palette
#[derive(Clone)]
pub struct Command {
    /// Unique identifier for the command
    pub id: &'static str,
    /// Display name shown in the palette
    pub name: &'static str,
    /// Category for grouping (e.g. "Animation", "Edit")
    pub category: &'static str,
    /// Keyboard shortcut (for display only)
    pub shortcut: Option<&'static str>,
    /// Description shown as hint
    pub description: Option<&'static str>,
}

impl Command {
    /// Create a new command
    pub const fn new(id: &'static str, name: &'static str, category: &'static str) -> Self {
        Self {
            id,
            name,
            category,
            shortcut: None,
            description: None,
        }
    }

    /// Add a keyboard shortcut hint
    pub const fn with_shortcut(mut self, shortcut: &'static str) -> Self {
        self.shortcut = Some(shortcut);
        self
    }

    /// Add a description
    pub const fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    /// Get display text for fuzzy matching
    pub fn display_text(&self) -> String {
        format!("{}: {}", self.category, self.name)
    }
}

/// Registry of palette commands
#[derive(Default)]
pub struct CommandRegistry {
    commands: IndexMap<&'static str, Command>,
}

impl CommandRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command
    pub fn register(&mut self, command: Command) -> Result<(), RegistryError> {
        if self.commands.contains_key(command.id) {
            return Err(RegistryError::DuplicateCommand(command.id));
        }
        self.commands.insert(command.id, command);
        Ok(())
    }

    /// Remove a command by id
    pub fn unregister(&mut self, id: &str) -> Option<Command> {
        self.commands.shift_remove(id)
    }

    /// Get a command by id
    pub fn get(&self, id: &str) -> Option<&Command> {
        self.commands.get(id)
    }

    /// Iterate over all commands
    pub fn all(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }

    /// Get command count
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Search commands with fuzzy matching, best matches first
    pub fn search(&self, query: &str) -> Vec<&Command> {
        if query.is_empty() {
            return self.commands.values().collect();
        }

        let query_lower = query.to_lowercase();
        let mut results: Vec<(&Command, i32)> = self
            .commands
            .values()
            .filter_map(|cmd| {
                let score = fuzzy_score(&cmd.display_text().to_lowercase(), &query_lower);
                (score > 0).then_some((cmd, score))
            })
            .collect();

        results.sort_by(|a, b| b.1.cmp(&a.1));
        results.into_iter().map(|(cmd, _)| cmd).collect()
    }
}

/// Subsequence fuzzy score with bonuses for adjacency and word boundaries.
fn fuzzy_score(text: &str, query: &str) -> i32 {
    if query.is_empty() {
        return 1;
    }

    let text_chars: Vec<char> = text.chars().collect();
    let query_chars: Vec<char> = query.chars().collect();

    let mut score = 0;
    let mut query_idx = 0;
    let mut prev_match_idx: Option<usize> = None;

    for (i, &c) in text_chars.iter().enumerate() {
        if query_idx < query_chars.len() && c == query_chars[query_idx] {
            if prev_match_idx == Some(i.wrapping_sub(1)) {
                score += 5;
            }
            if i == 0 || !text_chars[i - 1].is_alphanumeric() {
                score += 3;
            }
            score += 1;
            prev_match_idx = Some(i);
            query_idx += 1;
        }
    }

    if query_idx == query_chars.len() {
        score
    } else {
        0
    }
}

/// The host services an add-on registers into.
#[derive(Default)]
pub struct EditorServices {
    /// Registered operators by id
    operators: IndexMap<&'static str, Box<dyn Operator>>,
    /// Command palette registry
    pub commands: CommandRegistry,
    /// Keymap registry
    pub keymap: KeymapRegistry,
}

impl EditorServices {
    /// Create empty services
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an operator
    pub fn register_operator(&mut self, operator: Box<dyn Operator>) -> Result<(), RegistryError> {
        let id = operator.id();
        if self.operators.contains_key(id) {
            return Err(RegistryError::DuplicateOperator(id));
        }
        self.operators.insert(id, operator);
        Ok(())
    }

    /// Remove an operator by id
    pub fn unregister_operator(&mut self, id: &str) -> Option<Box<dyn Operator>> {
        self.operators.shift_remove(id)
    }

    /// Get an operator by id
    pub fn operator(&self, id: &str) -> Option<&dyn Operator> {
        self.operators.get(id).map(|op| &**op)
    }

    /// Invoke an operator against the scene.
    ///
    /// The outcome's reports are returned to the caller for display; the
    /// host decides whether to push an undo step from the operator's flags.
    pub fn invoke(
        &self,
        operator_id: &str,
        scene: &mut Scene,
    ) -> Result<OperatorOutcome, RegistryError> {
        let operator = self
            .operators
            .get(operator_id)
            .ok_or_else(|| RegistryError::UnknownOperator(operator_id.to_string()))?;

        if !operator.poll(scene) {
            return Err(RegistryError::PollRejected(operator.id()));
        }

        let outcome = operator.execute(scene);
        tracing::debug!(
            operator = operator.id(),
            status = ?outcome.status,
            undo = operator.flags().undo,
            "operator executed"
        );
        Ok(outcome)
    }

    /// Run whatever operator the current input triggers in `area`.
    ///
    /// Returns `None` when no binding fired. Commands registered through
    /// add-ons share their operator's id, so the keymap hit is invoked
    /// directly.
    pub fn dispatch_shortcut(
        &self,
        ctx: &egui::Context,
        area: KeymapContext,
        scene: &mut Scene,
    ) -> Option<OperatorOutcome> {
        let command_id = self.keymap.check_input(ctx, area)?;
        match self.invoke(&command_id, scene) {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                tracing::warn!(%command_id, %err, "shortcut dispatch failed");
                None
            }
        }
    }
}
