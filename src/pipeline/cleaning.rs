// ABOUTME: Ordered text-cleaning stages turning raw model output into chat replies or plan text
// ABOUTME: Each stage is a pure total function; clean_chat_output and clean_plan_output compose them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Output Cleaning
//!
//! Chat output runs through these stages in order:
//!
//! 1. [`strip_instruction_markup`]
//! 2. [`isolate_continuation`]
//! 3. [`strip_echoed_question`]
//! 4. [`strip_leaked_instructions`]
//! 5. [`truncate_at_stop_patterns`]
//! 6. [`cap_sentences`]
//! 7. [`normalize_whitespace`]
//! 8. empty result replaced by [`CHAT_FALLBACK_REPLY`]
//!
//! Order is part of the contract: echo stripping assumes the prompt is
//! already gone, and sentence capping assumes stop patterns already cut
//! off any invented follow-up turns.
//!
//! Plan output runs stages 1 and 2, then [`strip_leaked_plan_instructions`],
//! then a trim. Plans are multi-line structured text, so they are never
//! sentence-capped and an empty plan is returned as-is.

use std::sync::LazyLock;

use regex::{escape, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::llm::prompts::{InstructionTemplate, CHAT_PERSONA};

/// Reply substituted when cleaning leaves nothing
pub const CHAT_FALLBACK_REPLY: &str = "Let's try that again — could you rephrase your question?";

/// Literal substrings that end a chat reply
///
/// Entries starting with a newline only match at a line start, and the
/// line break itself is kept.
pub const STOP_PATTERNS: &[&str] = &[
    "Question:",
    "Answer:",
    "\nUser:",
    "\nQuestion",
    "Q:",
    "\nA:",
    "User:",
    "Assistant:",
    "What is your",
    "What are your",
    "Your experience level",
    "Your goal is",
    "Given your",
];

/// Case-insensitive substrings marking small talk
pub const SIMPLE_MESSAGE_PATTERNS: &[&str] = &[
    "how are you",
    "hello",
    "hi",
    "hey",
    "thanks",
    "thank you",
    "yes",
    "no",
    "okay",
    "ok",
    "doing",
    "how old",
    "what is my",
    "who am i",
];

/// Sentence cap for small-talk messages
pub const SIMPLE_SENTENCE_LIMIT: usize = 2;

/// Sentence cap for every other message
pub const MAX_SENTENCES: usize = 5;

/// Closing phrases of the chat instructions; the second is an older wording
const CHAT_LEAK_CLOSINGS: [&str; 2] = [
    "explaining how to do it.",
    "unless asked for detailed plans.",
];

/// Opening of the plan persona, matched with or without its trailing words
const PLAN_LEAK_OPENING: &str = "You are a fitness coach";

/// Closing phrase of the plan instructions
const PLAN_LEAK_CLOSING: &str = "Be specific with weights.";

static CHAT_LEAK_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    let closings: Vec<String> = CHAT_LEAK_CLOSINGS.iter().map(|c| escape(c)).collect();
    Regex::new(&format!(
        r"(?is){}.*?(?:{})",
        escape(CHAT_PERSONA),
        closings.join("|")
    ))
    .ok()
});

static PLAN_LEAK_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?is){}.*?{}",
        escape(PLAN_LEAK_OPENING),
        escape(PLAN_LEAK_CLOSING)
    ))
    .ok()
});

// Punctuation, whitespace, then an uppercase letter
static SENTENCE_BOUNDARY: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+[A-Z]").ok());

static EXCESS_NEWLINES: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\n{3,}").ok());

static EXCESS_SPACES: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r" {2,}").ok());

/// A cleaned chat reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    /// Text to show the user, never empty
    pub text: String,
    /// True when cleaning left nothing and the fallback reply was substituted
    pub used_fallback: bool,
}

impl ChatReply {
    /// The fallback reply
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            text: CHAT_FALLBACK_REPLY.to_owned(),
            used_fallback: true,
        }
    }
}

// ============================================================================
// Stages
// ============================================================================

/// Stage 1: remove every special token
#[must_use]
pub fn strip_instruction_markup(text: &str, template: &InstructionTemplate) -> String {
    template.strip(text)
}

/// Stage 2: keep only the text after the first instruction-close marker
///
/// The marker is located in the raw text. Markup inside the continuation
/// (typically a trailing end-of-sequence token) is removed too. Without a
/// marker the whole text is used with markup removed.
#[must_use]
pub fn isolate_continuation(raw: &str, template: &InstructionTemplate) -> String {
    let continuation = if template.inst_close.is_empty() {
        raw
    } else {
        raw.find(template.inst_close)
            .map_or(raw, |idx| &raw[idx + template.inst_close.len()..])
    };
    strip_instruction_markup(continuation, template)
        .trim()
        .to_owned()
}

/// Stage 3: remove a leading echo of the user's message
///
/// Matching is case-insensitive and ignores trailing `?`, `!`, and `.` on
/// the message. Punctuation and whitespace after the echo go with it.
/// Repeated echoes are all removed.
#[must_use]
pub fn strip_echoed_question(text: &str, message: &str) -> String {
    let question = message.trim().trim_end_matches(['?', '!', '.']);
    if question.is_empty() {
        return text.to_owned();
    }
    let Ok(echo) = RegexBuilder::new(&format!(r"^{}[?!.]*\s*", escape(question)))
        .case_insensitive(true)
        .build()
    else {
        return text.to_owned();
    };

    let mut cleaned = text.to_owned();
    while let Some(end) = echo.find(&cleaned).map(|found| found.end()) {
        if end == 0 {
            break;
        }
        cleaned.replace_range(..end, "");
    }
    cleaned
}

/// Stage 4: remove chat system-instruction text the model repeated
#[must_use]
pub fn strip_leaked_instructions(text: &str) -> String {
    replace_all(CHAT_LEAK_PATTERN.as_ref(), text, "")
}

/// Plan counterpart of stage 4
#[must_use]
pub fn strip_leaked_plan_instructions(text: &str) -> String {
    replace_all(PLAN_LEAK_PATTERN.as_ref(), text, "")
}

/// Stage 5: cut the text at the earliest stop pattern
#[must_use]
pub fn truncate_at_stop_patterns(text: &str) -> String {
    let cut = STOP_PATTERNS
        .iter()
        .filter_map(|pattern| {
            text.find(pattern).map(|idx| {
                // Keep the line break of newline-led patterns
                if pattern.starts_with('\n') {
                    idx + 1
                } else {
                    idx
                }
            })
        })
        .min();
    cut.map_or(text, |idx| &text[..idx]).to_owned()
}

/// True if the message looks like small talk
#[must_use]
pub fn is_simple_message(message: &str) -> bool {
    let lowered = message.to_lowercase();
    SIMPLE_MESSAGE_PATTERNS
        .iter()
        .any(|pattern| lowered.contains(pattern))
}

/// Split trimmed text into sentences
///
/// A boundary is `.`, `!`, or `?` followed by whitespace and an ASCII
/// uppercase letter. The whitespace is dropped; punctuation stays with its
/// sentence.
#[must_use]
pub fn split_sentences(text: &str) -> Vec<&str> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    let Some(boundary) = SENTENCE_BOUNDARY.as_ref() else {
        return vec![text];
    };

    let mut sentences = Vec::new();
    let mut start = 0;
    for found in boundary.find_iter(text) {
        // Punctuation and the uppercase letter are both one byte
        sentences.push(&text[start..=found.start()]);
        start = found.end() - 1;
    }
    sentences.push(&text[start..]);
    sentences
}

/// Stage 6: cap the number of sentences
///
/// Small-talk messages keep at most two sentences, everything else at most
/// five. Text within the cap is returned unchanged.
#[must_use]
pub fn cap_sentences(text: &str, simple: bool) -> String {
    let limit = if simple {
        SIMPLE_SENTENCE_LIMIT
    } else {
        MAX_SENTENCES
    };
    let sentences = split_sentences(text);
    if sentences.len() > limit {
        sentences[..limit].join(" ")
    } else {
        text.to_owned()
    }
}

/// Stage 7: collapse runs of blank lines and spaces, then trim
///
/// Applying it to its own output is a no-op.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    let collapsed = replace_all(EXCESS_NEWLINES.as_ref(), text.trim(), "\n\n");
    let collapsed = replace_all(EXCESS_SPACES.as_ref(), &collapsed, " ");
    collapsed.trim().to_owned()
}

// ============================================================================
// Composed Cleaners
// ============================================================================

/// Run every chat stage over raw generator output
#[must_use]
pub fn clean_chat_output(raw: &str, message: &str, template: &InstructionTemplate) -> ChatReply {
    let text = isolate_continuation(raw, template);
    debug!(len = text.len(), "isolated continuation");

    // The prompt embedded the message with markup removed
    let message = strip_instruction_markup(message, template);
    let text = strip_echoed_question(&text, &message);
    let text = strip_leaked_instructions(&text);
    let text = truncate_at_stop_patterns(&text);
    debug!(len = text.len(), "stripped echo, leaks, and stop patterns");

    let simple = is_simple_message(&message);
    let text = cap_sentences(&text, simple);
    // Leak removal can splice marker fragments back together
    let text = normalize_whitespace(&strip_instruction_markup(&text, template));
    debug!(len = text.len(), simple, "capped and normalized reply");

    if text.is_empty() {
        warn!("Cleaned chat output was empty, substituting fallback reply");
        return ChatReply::fallback();
    }

    ChatReply {
        text,
        used_fallback: false,
    }
}

/// Run the plan stages over raw generator output
///
/// May return an empty string, meaning nothing usable was generated.
#[must_use]
pub fn clean_plan_output(raw: &str, template: &InstructionTemplate) -> String {
    let text = isolate_continuation(raw, template);
    let text = strip_leaked_plan_instructions(&text);
    let text = strip_instruction_markup(&text, template);
    debug!(len = text.len(), "cleaned plan output");
    text.trim().to_owned()
}

fn replace_all(pattern: Option<&Regex>, text: &str, replacement: &str) -> String {
    pattern.map_or_else(
        || text.to_owned(),
        |re| re.replace_all(text, replacement).into_owned(),
    )
}
