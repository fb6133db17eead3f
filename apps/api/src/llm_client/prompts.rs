// Shared prompt fragments used by more than one generation task.
// Task templates live in generation::prompts.

/// Brand voice line appended to script and caption prompts.
pub const BRAND_VOICE: &str = "Brand Voice: State Property - sophisticated yet accessible luxury, \
authentic storytelling, empowering messaging.";

/// Trailing instruction for every task that expects a bare JSON array back.
pub const JSON_ARRAY_ONLY: &str = "Only return the JSON array, no additional text.";
