//! Recency List Module
//!
//! Implements Least Recently Used ordering for cache eviction.

// == Node ==
#[derive(Debug, Clone)]
struct Node {
    key: String,
    prev: Option<usize>,
    next: Option<usize>,
}

// == Recency List ==
/// Doubly linked list of keys ordered by access time.
///
/// Nodes live in a slab and link to each other by index, so every
/// operation on a known slot is O(1):
/// - Head = Most recently used
/// - Tail = Least recently used
///
/// The slot returned by [`RecencyList::push_front`] stays valid until the
/// node is removed; callers keep it next to their entry.
#[derive(Debug, Default)]
pub struct RecencyList {
    nodes: Vec<Option<Node>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl RecencyList {
    // == Constructor ==
    /// Creates a new empty recency list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty list with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    // == Push Front ==
    /// Inserts a key as the most recently used and returns its slot.
    ///
    /// The list does not deduplicate; the store guarantees each key is
    /// pushed once.
    pub fn push_front(&mut self, key: String) -> usize {
        let node = Node {
            key,
            prev: None,
            next: self.head,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = Some(node);
                idx
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        };

        match self.head {
            Some(old_head) => self.node_mut(old_head).prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
        self.len += 1;
        idx
    }

    // == Touch ==
    /// Marks the key at `idx` as recently used (moves it to the head).
    pub fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return;
        }
        self.unlink(idx);

        let old_head = self.head;
        {
            let node = self.node_mut(idx);
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(h) => self.node_mut(h).prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    // == Remove ==
    /// Removes the node at `idx` and returns its key.
    ///
    /// Returns None if the slot is vacant.
    pub fn remove(&mut self, idx: usize) -> Option<String> {
        if !matches!(self.nodes.get(idx), Some(Some(_))) {
            return None;
        }
        self.unlink(idx);
        let node = self.nodes[idx].take()?;
        self.free.push(idx);
        self.len -= 1;
        Some(node.key)
    }

    // == Pop Back ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if the list is empty.
    pub fn pop_back(&mut self) -> Option<String> {
        let tail = self.tail?;
        self.remove(tail)
    }

    /// Returns the least recently used key without removing it.
    pub fn peek_back(&self) -> Option<&str> {
        self.tail
            .and_then(|idx| self.nodes[idx].as_ref())
            .map(|node| node.key.as_str())
    }

    /// Returns the key held at `idx`, if the slot is occupied.
    pub fn key_at(&self, idx: usize) -> Option<&str> {
        self.nodes
            .get(idx)
            .and_then(Option::as_ref)
            .map(|node| node.key.as_str())
    }

    /// Number of tracked keys.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterates keys from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            let node = self.nodes[cursor?].as_ref()?;
            cursor = node.next;
            Some(node.key.as_str())
        })
    }

    // Detach `idx` from its neighbours, fixing head/tail. Leaves the node's
    // own links stale.
    fn unlink(&mut self, idx: usize) {
        let (prev, next) = {
            let node = self.node_mut(idx);
            (node.prev, node.next)
        };
        match prev {
            Some(p) => self.node_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.node_mut(n).prev = prev,
            None => self.tail = prev,
        }
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node {
        match self.nodes.get_mut(idx) {
            Some(Some(node)) => node,
            _ => panic!("recency list slot {idx} is vacant"),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: &RecencyList) -> Vec<&str> {
        list.iter().collect()
    }

    #[test]
    fn test_list_new() {
        let list = RecencyList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.peek_back(), None);
    }

    #[test]
    fn test_push_front_orders_by_recency() {
        let mut list = RecencyList::new();

        list.push_front("key1".to_string());
        list.push_front("key2".to_string());
        list.push_front("key3".to_string());

        assert_eq!(list.len(), 3);
        assert_eq!(keys(&list), vec!["key3", "key2", "key1"]);
        assert_eq!(list.peek_back(), Some("key1"));
    }

    #[test]
    fn test_move_to_front() {
        let mut list = RecencyList::new();

        let a = list.push_front("a".to_string());
        list.push_front("b".to_string());
        list.push_front("c".to_string());

        list.move_to_front(a);

        assert_eq!(keys(&list), vec!["a", "c", "b"]);
        assert_eq!(list.peek_back(), Some("b"));
    }

    #[test]
    fn test_move_head_and_tail() {
        let mut list = RecencyList::new();

        let a = list.push_front("a".to_string());
        let b = list.push_front("b".to_string());

        list.move_to_front(b);
        assert_eq!(keys(&list), vec!["b", "a"]);

        list.move_to_front(a);
        assert_eq!(keys(&list), vec!["a", "b"]);
        assert_eq!(list.peek_back(), Some("b"));
    }

    #[test]
    fn test_pop_back() {
        let mut list = RecencyList::new();

        list.push_front("key1".to_string());
        list.push_front("key2".to_string());
        list.push_front("key3".to_string());

        assert_eq!(list.pop_back(), Some("key1".to_string()));
        assert_eq!(list.len(), 2);
        assert_eq!(list.pop_back(), Some("key2".to_string()));
        assert_eq!(list.pop_back(), Some("key3".to_string()));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
    }

    #[test]
    fn test_remove_middle() {
        let mut list = RecencyList::new();

        list.push_front("key1".to_string());
        let mid = list.push_front("key2".to_string());
        list.push_front("key3".to_string());

        assert_eq!(list.remove(mid), Some("key2".to_string()));
        assert_eq!(list.len(), 2);
        assert_eq!(keys(&list), vec!["key3", "key1"]);
    }

    #[test]
    fn test_remove_vacant_slot() {
        let mut list = RecencyList::new();
        let idx = list.push_front("key1".to_string());

        assert!(list.remove(idx).is_some());
        assert_eq!(list.remove(idx), None);
        assert_eq!(list.remove(42), None);
        assert!(list.is_empty());
    }

    #[test]
    fn test_slots_are_reused() {
        let mut list = RecencyList::with_capacity(2);

        let a = list.push_front("a".to_string());
        list.push_front("b".to_string());
        list.remove(a);

        let c = list.push_front("c".to_string());
        assert_eq!(c, a);
        assert_eq!(list.key_at(c), Some("c"));
        assert_eq!(keys(&list), vec!["c", "b"]);
    }

    #[test]
    fn test_order_after_multiple_touches() {
        let mut list = RecencyList::new();

        let a = list.push_front("a".to_string());
        let b = list.push_front("b".to_string());
        let c = list.push_front("c".to_string());

        list.move_to_front(a);
        list.move_to_front(c);
        list.move_to_front(b);

        // head .. tail = b, c, a
        assert_eq!(list.pop_back(), Some("a".to_string()));
        assert_eq!(list.pop_back(), Some("c".to_string()));
        assert_eq!(list.pop_back(), Some("b".to_string()));
    }

    #[test]
    fn test_clear() {
        let mut list = RecencyList::new();
        list.push_front("a".to_string());
        list.push_front("b".to_string());

        list.clear();

        assert!(list.is_empty());
        assert_eq!(list.iter().count(), 0);
        assert_eq!(list.push_front("c".to_string()), 0);
    }
}
