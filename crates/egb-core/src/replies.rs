//! Canned acknowledgement lines.
//!
//! Pools rotate instead of sampling randomly, which keeps replies varied in
//! chat and deterministic under test.

use std::sync::atomic::{AtomicUsize, Ordering};

pub struct ReplyPool {
    replies: &'static [&'static str],
    next: AtomicUsize,
}

impl ReplyPool {
    pub const fn new(replies: &'static [&'static str]) -> Self {
        Self {
            replies,
            next: AtomicUsize::new(0),
        }
    }

    pub fn pick(&self) -> &'static str {
        let idx = self.next.fetch_add(1, Ordering::Relaxed);
        self.replies[idx % self.replies.len()]
    }
}

pub static PING_REPLIES: ReplyPool = ReplyPool::new(&[
    "pong 🏓",
    "Up and running 🐦",
    "Alive and well 🐦",
    "Adey 🐦",
    "Yo 🐦",
    "👀",
]);

pub static MUTE_REPLIES: ReplyPool = ReplyPool::new(&[
    "Yes sir",
    "Roger that 🐦",
    "Sigh... oki",
    "👍🏽",
    "Got it 👍🏽",
    "🤐👍🏽",
]);

pub static UNMUTE_REPLIES: ReplyPool = ReplyPool::new(&[
    "Thanks sir",
    "Finally 🐦",
    "🥳",
    "Speaking freely now 👍🏽",
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_wraps_around() {
        static POOL: ReplyPool = ReplyPool::new(&["a", "b", "c"]);
        assert_eq!(POOL.pick(), "a");
        assert_eq!(POOL.pick(), "b");
        assert_eq!(POOL.pick(), "c");
        assert_eq!(POOL.pick(), "a");
    }

    #[test]
    fn shipped_pools_are_non_empty() {
        assert!(!PING_REPLIES.pick().is_empty());
        assert!(!MUTE_REPLIES.pick().is_empty());
        assert!(!UNMUTE_REPLIES.pick().is_empty());
    }
}
