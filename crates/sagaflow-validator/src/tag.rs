use std::sync::OnceLock;

use regex::Regex;

static ACTION_TAG: OnceLock<Regex> = OnceLock::new();

/// Whether `text` is a message action tag of the form `@<scope>/<name>`.
///
/// The scope may contain word characters and dashes, the name only word
/// characters.
pub fn is_action_tag(text: &str) -> bool {
  ACTION_TAG
    .get_or_init(|| {
      Regex::new(r"^@[A-Za-z0-9_-]+/[A-Za-z0-9_]+$").expect("action tag pattern is valid")
    })
    .is_match(text)
}
