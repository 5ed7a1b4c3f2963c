//! ID prefix constants.
//!
//! Every persisted entity gets an ID of the form `{prefix}-{32 hex chars}`,
//! where the hex part is 128 random bits generated by the database.

pub const PREFIX_TASK: &str = "tsk";
pub const PREFIX_LIST: &str = "lst";
pub const PREFIX_LABEL: &str = "lbl";
pub const PREFIX_CHANGE: &str = "chg";
pub const PREFIX_SUBTASK: &str = "sub";
pub const PREFIX_REMINDER: &str = "rem";
pub const PREFIX_ATTACHMENT: &str = "att";

/// All known prefixes, for exhaustive tests.
pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_TASK,
    PREFIX_LIST,
    PREFIX_LABEL,
    PREFIX_CHANGE,
    PREFIX_SUBTASK,
    PREFIX_REMINDER,
    PREFIX_ATTACHMENT,
];

/// Length of the random hex part of a generated ID.
pub const RANDOM_HEX_LEN: usize = 32;

/// Check whether `id` looks like an ID generated with `prefix`.
#[must_use]
pub fn has_prefix(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|hex| hex.len() == RANDOM_HEX_LEN && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
