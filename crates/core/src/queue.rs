//! The session's pending command strings.
//!
//! Consumed front-to-back. Handlers may push follow-up commands onto the
//! front, which is what makes "navigate then run" chains execute before
//! anything queued or typed later.

use std::collections::VecDeque;

#[derive(Debug, Default)]
pub struct CommandQueue {
    pending: VecDeque<String>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_commands<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut queue = Self::new();
        queue.push_back_all(commands);
        queue
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn push_back(&mut self, command: impl Into<String>) {
        let command = command.into();
        if !command.trim().is_empty() {
            self.pending.push_back(command);
        }
    }

    pub fn push_back_all<I, S>(&mut self, commands: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for command in commands {
            self.push_back(command);
        }
    }

    /// Inserts `commands` at the front, preserving their order: after
    /// pushing `[C, D]` onto `[B]`, the queue pops `C, D, B`.
    pub fn push_front_all<I, S>(&mut self, commands: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let commands: Vec<String> = commands
            .into_iter()
            .map(Into::into)
            .filter(|command| !command.trim().is_empty())
            .collect();
        for command in commands.into_iter().rev() {
            self.pending.push_front(command);
        }
    }

    pub fn pop_front(&mut self) -> Option<String> {
        self.pending.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consumed_front_to_back() {
        let mut queue = CommandQueue::from_commands(["a", "b", "c"]);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop_front().as_deref(), Some("a"));
        assert_eq!(queue.pop_front().as_deref(), Some("b"));
        assert_eq!(queue.pop_front().as_deref(), Some("c"));
        assert!(queue.pop_front().is_none());
    }

    #[test]
    fn test_front_push_preserves_pushed_order() {
        let mut queue = CommandQueue::from_commands(["b"]);
        queue.push_front_all(["c", "d"]);
        assert_eq!(queue.pop_front().as_deref(), Some("c"));
        assert_eq!(queue.pop_front().as_deref(), Some("d"));
        assert_eq!(queue.pop_front().as_deref(), Some("b"));
    }

    #[test]
    fn test_blank_commands_are_dropped() {
        let mut queue = CommandQueue::new();
        queue.push_back_all(["", "  ", "tvl"]);
        queue.push_front_all([" ", ""]);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop_front().as_deref(), Some("tvl"));
    }
}
