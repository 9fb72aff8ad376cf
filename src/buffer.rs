use std::collections::VecDeque;

/// What a bounded buffer does when a push would exceed its capacity.
///
/// Passed explicitly at construction — there is no global default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Overflow is a logic error: panic. Used where refills are already
    /// bounded by construction and exceeding capacity means a bug.
    Reject,
    /// Silently discard the pushed element.
    Ignore,
}

/// Fixed-capacity double-ended queue.
pub struct BoundedBuffer<T> {
    items: VecDeque<T>,
    capacity: usize,
    policy: OverflowPolicy,
}

impl<T> BoundedBuffer<T> {
    /// Create an empty buffer with the given capacity and overflow policy.
    pub fn new(capacity: usize, policy: OverflowPolicy) -> Self {
        assert!(capacity > 0, "bounded buffer capacity must be positive");
        BoundedBuffer {
            items: VecDeque::with_capacity(capacity),
            capacity,
            policy,
        }
    }

    /// Append at the back. Returns false if the element was discarded
    /// under the `Ignore` policy.
    pub fn push_back(&mut self, item: T) -> bool {
        if self.is_full() {
            return self.overflow();
        }
        self.items.push_back(item);
        true
    }

    /// Prepend at the front. Returns false if the element was discarded
    /// under the `Ignore` policy.
    pub fn push_front(&mut self, item: T) -> bool {
        if self.is_full() {
            return self.overflow();
        }
        self.items.push_front(item);
        true
    }

    fn overflow(&self) -> bool {
        match self.policy {
            OverflowPolicy::Reject => panic!(
                "bounded buffer overflow: capacity {} exceeded",
                self.capacity
            ),
            OverflowPolicy::Ignore => false,
        }
    }

    pub fn pop_front(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    pub fn pop_back(&mut self) -> Option<T> {
        self.items.pop_back()
    }

    pub fn peek_front(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn peek_back(&self) -> Option<&T> {
        self.items.back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }
}
