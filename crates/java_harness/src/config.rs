use serde::{Deserialize, Serialize};

/// Knobs for the assertion utilities.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AssertionConfig {
    /// Call name whose statement `replace_assertion` swaps out.
    pub target_call: String,
    /// Token a prompt template leaves where the expected value was elided.
    pub placeholder: String,
    /// Parseable literal substituted for `placeholder` before parsing.
    pub placeholder_stand_in: String,
    /// Code fence marker in free-form responses.
    pub fence: String,
    /// Lines starting with this prefix lose their first `strip_len` chars
    /// (turns `Assert.assertEquals(..)` into `assertEquals(..)`).
    pub strip_prefix: String,
    /// Characters dropped from a `strip_prefix` line. Counts the qualifier
    /// separator too, so it is one more than the prefix length for the
    /// `Assert.` form; set both together when changing the convention.
    pub strip_len: usize,
}

impl Default for AssertionConfig {
    fn default() -> Self {
        Self {
            target_call: "assertEquals".to_string(),
            placeholder: "<expected_value>".to_string(),
            placeholder_stand_in: "\"<expected_value>\"".to_string(),
            fence: "```".to_string(),
            strip_prefix: "Assert".to_string(),
            strip_len: 7,
        }
    }
}
