//! Which verse plays next
//!
//! Boundaries stop playback: there is no wrap-around to the first verse and no
//! continuation into the next chapter. Repeat-one beats advancing.

/// Stateless advance rules over a verse list of a given length
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvancePolicy;

impl AdvancePolicy {
    /// Map a requested index onto the verse list
    ///
    /// `None` means the request falls outside `0..len` and playback stops.
    pub fn resolve(requested: i64, len: usize) -> Option<usize> {
        usize::try_from(requested).ok().filter(|&index| index < len)
    }

    /// Index requested when the current verse finishes on its own
    pub fn after_completion(current: usize, repeat_one: bool) -> i64 {
        if repeat_one {
            current as i64
        } else {
            current as i64 + 1
        }
    }

    /// Index requested by a skip-forward; nothing cued counts as index 0
    pub fn next(current: Option<usize>) -> i64 {
        current.unwrap_or(0) as i64 + 1
    }

    /// Index requested by a skip-back; nothing cued counts as index 0
    pub fn previous(current: Option<usize>) -> i64 {
        current.unwrap_or(0) as i64 - 1
    }
}
