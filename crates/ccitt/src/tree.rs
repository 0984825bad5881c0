//! # Decoding trees
//!
//! Binary prefix tries over the code tables. Nodes live in a single `Vec`
//! and refer to their children by index, so a finished tree is plain
//! read-only data that can be shared between threads.

use once_cell::sync::Lazy;

use crate::{
    tables::{run_codes, Code, Mode, MODE_CODES},
    Color,
};

/// A value stored in the tree, together with the code that leads to it
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Entry<T> {
    /// The decoded value
    pub value: T,
    /// The code that was matched
    pub code: Code,
}

type NodeId = u16;

#[derive(Debug, Clone)]
struct Node<T> {
    children: [Option<NodeId>; 2],
    entry: Option<Entry<T>>,
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self {
            children: [None, None],
            entry: None,
        }
    }
}

/// A decoding tree
#[derive(Debug, Clone)]
pub struct DecodingTree<T> {
    nodes: Vec<Node<T>>,
}

impl<T: Copy> Default for DecodingTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy> DecodingTree<T> {
    /// Create a tree with only a root node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
        }
    }

    /// Number of nodes, including the root
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has nothing but its root
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Add a code, MSB first
    pub fn insert(&mut self, code: Code, value: T) {
        let mut node = 0;
        for i in 0..code.length {
            let bit = ((code.codeword >> (15 - i)) & 1) as usize;
            node = match self.nodes[node].children[bit] {
                Some(child) => child as usize,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[node].children[bit] = Some(child as NodeId);
                    child
                }
            };
        }
        debug_assert!(self.nodes[node].entry.is_none(), "duplicate code {:?}", code);
        self.nodes[node].entry = Some(Entry { value, code });
    }

    /// Follow the bits of `window` starting at bit `start` (counted from
    /// the MSB) and return the deepest entry on the path
    pub fn lookup(&self, window: u16, start: u8) -> Option<Entry<T>> {
        let mut node = 0;
        let mut found = None;
        for i in start..16 {
            let bit = ((window >> (15 - i)) & 1) as usize;
            match self.nodes[node].children[bit] {
                Some(child) => node = child as usize,
                None => break,
            }
            if let Some(entry) = self.nodes[node].entry {
                found = Some(entry);
            }
        }
        found
    }
}

fn build_run_tree(color: Color) -> DecodingTree<u16> {
    let mut tree = DecodingTree::new();
    for (len, code) in run_codes(color) {
        tree.insert(code, len as u16);
    }
    tree
}

fn build_mode_tree() -> DecodingTree<Mode> {
    let mut tree = DecodingTree::new();
    for (mode, code) in MODE_CODES {
        tree.insert(code, mode);
    }
    tree
}

static WHITE_TREE: Lazy<DecodingTree<u16>> = Lazy::new(|| build_run_tree(Color::White));
static BLACK_TREE: Lazy<DecodingTree<u16>> = Lazy::new(|| build_run_tree(Color::Black));
static MODE_TREE: Lazy<DecodingTree<Mode>> = Lazy::new(build_mode_tree);

/// The tree for white or black run lengths
pub fn run_tree(color: Color) -> &'static DecodingTree<u16> {
    match color {
        Color::White => &WHITE_TREE,
        Color::Black => &BLACK_TREE,
    }
}

/// The tree for 2D mode codes
pub fn mode_tree() -> &'static DecodingTree<Mode> {
    &MODE_TREE
}
