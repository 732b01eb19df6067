//! Arena-backed doubly linked list ordered by recency.
//!
//! Nodes live in a slot vector and link to each other by index, so the
//! LRU index can hold plain handles instead of owning pointers. Vacated
//! slots go on a free stack and are reused by later pushes.

/// Slot index of a node inside a [`RecencyList`].
pub(crate) type Handle = usize;

struct Node<T> {
    data: T,
    prev: Option<Handle>,
    next: Option<Handle>,
}

/// Doubly linked list with `head` = most recently used and `tail` = least recently used.
pub(crate) struct RecencyList<T> {
    nodes: Vec<Option<Node<T>>>,
    free: Vec<Handle>,
    head: Option<Handle>,
    tail: Option<Handle>,
    len: usize,
}

impl<T> RecencyList<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        RecencyList {
            nodes: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[cfg(test)]
    pub(crate) fn head(&self) -> Option<Handle> {
        self.head
    }

    #[cfg(test)]
    pub(crate) fn tail(&self) -> Option<Handle> {
        self.tail
    }

    pub(crate) fn get(&self, handle: Handle) -> Option<&T> {
        self.node(handle).map(|node| &node.data)
    }

    pub(crate) fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.node_mut(handle).map(|node| &mut node.data)
    }

    /// Insert `data` at the head and return its handle.
    pub(crate) fn push_front(&mut self, data: T) -> Handle {
        let node = Node {
            data,
            prev: None,
            next: self.head,
        };
        let handle = match self.free.pop() {
            Some(handle) => {
                self.nodes[handle] = Some(node);
                handle
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        };

        match self.head {
            Some(old_head) => {
                if let Some(head) = self.node_mut(old_head) {
                    head.prev = Some(handle);
                }
            }
            None => self.tail = Some(handle),
        }
        self.head = Some(handle);
        self.len += 1;
        handle
    }

    /// Detach the node at `handle` and hand back its data. Stale handles yield `None`.
    pub(crate) fn remove(&mut self, handle: Handle) -> Option<T> {
        if self.node(handle).is_none() {
            return None;
        }
        self.unlink(handle);
        let node = self.nodes[handle].take()?;
        self.free.push(handle);
        self.len -= 1;
        Some(node.data)
    }

    /// Remove the least recently used node. An empty list is left untouched.
    pub(crate) fn remove_last(&mut self) -> Option<T> {
        let tail = self.tail?;
        self.remove(tail)
    }

    /// Splice the node at `handle` in front of the current head.
    pub(crate) fn move_to_front(&mut self, handle: Handle) {
        if self.head == Some(handle) || self.node(handle).is_none() {
            return;
        }
        self.unlink(handle);

        let old_head = self.head;
        if let Some(node) = self.node_mut(handle) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(old_head) => {
                if let Some(head) = self.node_mut(old_head) {
                    head.prev = Some(handle);
                }
            }
            // unlink emptied the list; this node is also the tail now
            None => self.tail = Some(handle),
        }
        self.head = Some(handle);
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterate from most to least recently used.
    #[cfg(test)]
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    fn node(&self, handle: Handle) -> Option<&Node<T>> {
        self.nodes.get(handle).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, handle: Handle) -> Option<&mut Node<T>> {
        self.nodes.get_mut(handle).and_then(Option::as_mut)
    }

    /// Rewire the neighbours of `handle` around it, fixing `head`/`tail` at the ends.
    fn unlink(&mut self, handle: Handle) {
        let (prev, next) = match self.node_mut(handle) {
            Some(node) => (node.prev.take(), node.next.take()),
            None => return,
        };

        match prev {
            Some(prev) => {
                if let Some(prev_node) = self.node_mut(prev) {
                    prev_node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next) => {
                if let Some(next_node) = self.node_mut(next) {
                    next_node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    /// Checks link symmetry in both directions and that the walk length matches `len`.
    #[cfg(test)]
    pub(crate) fn debug_validate_links(&self) {
        let mut count = 0;
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(handle) = cursor {
            let node = self.node(handle).expect("linked handle points at an empty slot");
            assert_eq!(node.prev, prev, "prev link of {} is asymmetric", handle);
            prev = Some(handle);
            cursor = node.next;
            count += 1;
            assert!(count <= self.len, "forward walk exceeds len({})", self.len);
        }
        assert_eq!(prev, self.tail, "forward walk does not end at tail");
        assert_eq!(count, self.len, "walked {} nodes but len is {}", count, self.len);
        assert_eq!(
            self.nodes.iter().filter(|slot| slot.is_some()).count(),
            self.len,
            "occupied slots do not match len"
        );
    }
}

#[cfg(test)]
pub(crate) struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    cursor: Option<Handle>,
}

#[cfg(test)]
impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.cursor?)?;
        self.cursor = node.next;
        Some(&node.data)
    }
}
