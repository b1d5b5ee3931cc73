use serde::{Deserialize, Serialize};

/// One generated campaign package, keyed by employer name in the engine
/// store. Regeneration overwrites the whole entry; no history is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutreachAssets {
    /// 140-180 word primary email.
    pub primary_email: String,
    /// Three follow-up emails, 80-120 words each.
    pub follow_ups: Vec<String>,
    /// Ordered bullet points for a phone call script.
    pub call_script: Vec<String>,
    /// Three subject line options.
    pub subject_lines: Vec<String>,
    /// Tailored LinkedIn DM / InMail message.
    pub linked_in_message: String,
}
