use std::collections::HashMap;

struct Node<V> {
    children: HashMap<char, Node<V>>,
    value: Option<V>,
}

impl<V> Node<V> {
    fn new() -> Self {
        Self {
            children: HashMap::new(),
            value: None,
        }
    }
}

/// Char-keyed trie mapping native patterns to decoded glyphs.
pub(crate) struct GlyphTrie<V> {
    root: Node<V>,
}

impl<V: Copy + PartialEq> GlyphTrie<V> {
    pub fn new() -> Self {
        Self { root: Node::new() }
    }

    /// Register `pattern`. Re-registering the same value is a no-op; a
    /// different value for an existing pattern is returned as `Err`.
    pub fn insert(&mut self, pattern: &str, value: V) -> Result<(), V> {
        let mut node = &mut self.root;
        for ch in pattern.chars() {
            node = node.children.entry(ch).or_insert_with(Node::new);
        }
        match node.value {
            Some(existing) if existing != value => Err(existing),
            _ => {
                node.value = Some(value);
                Ok(())
            }
        }
    }

    /// Longest registered pattern at the start of `chars`, as
    /// `(length in chars, value)`.
    pub fn longest_match(&self, chars: &[char]) -> Option<(usize, V)> {
        self.longest_match_by(chars, |c| c)
    }

    /// Like [`longest_match`](Self::longest_match) but compares each input
    /// char after passing it through `fold`.
    pub fn longest_match_by(&self, chars: &[char], fold: impl Fn(char) -> char) -> Option<(usize, V)> {
        let mut node = &self.root;
        let mut best = None;
        for (i, &ch) in chars.iter().enumerate() {
            match node.children.get(&fold(ch)) {
                Some(child) => node = child,
                None => break,
            }
            if let Some(value) = node.value {
                best = Some((i + 1, value));
            }
        }
        best
    }
}
