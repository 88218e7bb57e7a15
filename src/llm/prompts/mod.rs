// ABOUTME: Coach personas, fixed behavioural instructions, and instruction-delimiter markup
// ABOUTME: Instruction text is loaded at compile time from markdown files for easy maintenance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prompts
//!
//! Fixed prompt text plus the [`InstructionTemplate`] describing the
//! delimiter tokens an instruct model expects around a single
//! system-plus-user instruction block.

/// Persona opening every chat prompt
pub const CHAT_PERSONA: &str = "You are a helpful fitness coach.";

/// Brevity rules appended to every chat system instruction
pub const CHAT_INSTRUCTIONS: &str = include_str!("chat_instructions.md");

/// Persona opening every plan prompt
pub const PLAN_PERSONA: &str = "You are a fitness coach creating a workout plan.";

/// Line-format rules appended to every plan system instruction
pub const PLAN_INSTRUCTIONS: &str = include_str!("plan_instructions.md");

/// Label introducing flattened conversation history
pub const HISTORY_LABEL: &str = "Previous conversation:";

/// Label introducing the current message when history is present
pub const CURRENT_QUESTION_LABEL: &str = "Current question:";

/// Delimiter tokens wrapping one instruction block
///
/// The rendered shape is `{bos}{inst_open} {system}\n\n{body} {inst_close}`.
/// The model's generation contract echoes that prompt in front of its
/// continuation, so `inst_close` doubles as the boundary the cleaner uses to
/// find where generated text begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionTemplate {
    /// Start-of-sequence token
    pub bos: &'static str,
    /// End-of-sequence token
    pub eos: &'static str,
    /// Instruction-open marker
    pub inst_open: &'static str,
    /// Instruction-close marker
    pub inst_close: &'static str,
}

impl InstructionTemplate {
    /// Mistral instruct markup: `<s>[INST] ... [/INST]`
    #[must_use]
    pub const fn mistral() -> Self {
        Self {
            bos: "<s>",
            eos: "</s>",
            inst_open: "[INST]",
            inst_close: "[/INST]",
        }
    }

    /// Every special token, longest first
    #[must_use]
    pub const fn markers(&self) -> [&'static str; 4] {
        [self.inst_close, self.inst_open, self.eos, self.bos]
    }

    /// Render one instruction block
    #[must_use]
    pub fn wrap(&self, system: &str, body: &str) -> String {
        format!(
            "{}{} {system}\n\n{body} {}",
            self.bos, self.inst_open, self.inst_close
        )
    }

    /// Remove every special token from `text`
    ///
    /// Removal repeats until nothing changes, so nested fragments such as
    /// `[IN[INST]ST]` cannot reassemble into a marker.
    #[must_use]
    pub fn strip(&self, text: &str) -> String {
        let markers = self.markers();
        let mut cleaned = text.to_owned();
        loop {
            let before = cleaned.len();
            for marker in markers.iter().filter(|m| !m.is_empty()) {
                if cleaned.contains(marker) {
                    cleaned = cleaned.replace(marker, "");
                }
            }
            if cleaned.len() == before {
                return cleaned;
            }
        }
    }

    /// True if `text` contains any special token
    #[must_use]
    pub fn contains_markup(&self, text: &str) -> bool {
        self.markers()
            .iter()
            .any(|marker| !marker.is_empty() && text.contains(marker))
    }
}

impl Default for InstructionTemplate {
    fn default() -> Self {
        Self::mistral()
    }
}
