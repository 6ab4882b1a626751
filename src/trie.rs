use std::collections::BTreeMap;
use std::path::{Component, Path};
use tracing::trace;

/// A directory or file in the token tree. Files carry their own count;
/// directories sum their children.
#[derive(Debug, Default)]
pub struct TokenNode {
    pub children: BTreeMap<String, TokenNode>,
    pub token_count: Option<usize>,
}

impl TokenNode {
    pub fn total_tokens(&self) -> usize {
        self.token_count.unwrap_or(0)
            + self
                .children
                .values()
                .map(TokenNode::total_tokens)
                .sum::<usize>()
    }
}

/// Token counts keyed by relative path components.
#[derive(Debug, Default)]
pub struct TokenTrie {
    root: TokenNode,
}

impl TokenTrie {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: &Path, token_count: usize) {
        let mut node = &mut self.root;
        for component in path.components() {
            if let Component::Normal(part) = component {
                node = node
                    .children
                    .entry(part.to_string_lossy().into_owned())
                    .or_default();
            }
        }
        if node.token_count.is_some() {
            trace!("Overwriting token count for {}", path.display());
        }
        node.token_count = Some(token_count);
    }

    pub fn root(&self) -> &TokenNode {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_roll_up() {
        let mut trie = TokenTrie::new();
        trie.insert(Path::new("src/app.ts"), 10);
        trie.insert(Path::new("src/lib/util.ts"), 5);
        trie.insert(Path::new("index.js"), 2);

        let root = trie.root();
        assert_eq!(root.total_tokens(), 17);
        let src = &root.children["src"];
        assert_eq!(src.token_count, None);
        assert_eq!(src.total_tokens(), 15);
        assert_eq!(src.children["app.ts"].token_count, Some(10));
    }

    #[test]
    fn test_reinsert_overwrites() {
        let mut trie = TokenTrie::new();
        trie.insert(Path::new("a.css"), 3);
        trie.insert(Path::new("a.css"), 4);
        assert_eq!(trie.root().total_tokens(), 4);
    }

    #[test]
    fn test_children_are_sorted() {
        let mut trie = TokenTrie::new();
        trie.insert(Path::new("b.ts"), 1);
        trie.insert(Path::new("a.ts"), 1);
        let names: Vec<_> = trie.root().children.keys().cloned().collect();
        assert_eq!(names, vec!["a.ts", "b.ts"]);
    }
}
