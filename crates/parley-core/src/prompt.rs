//! Prompt renderers for the two model operations.
//!
//! Both renderers are pure: identical input always yields byte-identical
//! output. The instruction wording is fixed content.
//!
//! Chat layout:
//! ```text
//! {CHAT_INSTRUCTIONS}
//!
//! Conversation so far:
//! User: ...
//! AI: ...
//!
//! AI:
//! ```
//!
//! Report layout:
//! ```text
//! {REPORT_INSTRUCTIONS}
//!
//! {transcript}
//!
//! Simple Report:
//! ```

use parley_types::conversation::Turn;

/// Instructions prepended to every chat continuation prompt.
pub const CHAT_INSTRUCTIONS: &str = "Continue the conversation naturally by responding to the user \
and asking a follow-up question to keep the discussion interesting. Try to know about the person";

/// Instructions wrapped around a transcript for the skills report.
pub const REPORT_INSTRUCTIONS: &str = "Analyze the following conversation for the user's English \
and grammar skills. Provide Simple feedback on their grammar, vocabulary, and fluency, and suggest \
not more than 30 words specific areas for improvement:";

/// Cue the model continues from in a chat prompt.
pub const AI_CUE: &str = "AI:";

const REPORT_CUE: &str = "Simple Report:";

/// Renders stored history into a chat continuation prompt.
pub struct ChatPrompt;

impl ChatPrompt {
    pub fn build(history: &[Turn]) -> String {
        let history_text = history
            .iter()
            .map(Turn::to_string)
            .collect::<Vec<_>>()
            .join("\n");

        format!("{CHAT_INSTRUCTIONS}\n\nConversation so far:\n{history_text}\n\n{AI_CUE}")
    }
}

/// Wraps a caller-supplied transcript into a language skills report prompt.
pub struct ReportPrompt;

impl ReportPrompt {
    pub fn build(transcript: &str) -> String {
        format!("{REPORT_INSTRUCTIONS}\n\n{transcript}\n\n{REPORT_CUE}")
    }
}
