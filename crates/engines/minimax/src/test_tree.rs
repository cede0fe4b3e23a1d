//! Hand-built game trees for exercising the search without chess.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::adapter::SearchBoard;
use crate::search::decay_mate;

/// Shape of a tree to build. Internal nodes carry their own static value,
/// used when the search stops above them.
pub enum Shape {
    Leaf(i32),
    Node(i32, Vec<Shape>),
}

pub use Shape::{Leaf, Node};

#[derive(Debug, Clone)]
struct TreeNode {
    value: i32,
    children: Vec<usize>,
    key: u64,
    /// The edge leading into this node is a capture
    noisy: bool,
}

/// A game tree walked with apply/undo. Moves are child node indices.
#[derive(Debug, Clone)]
pub struct GameTree {
    nodes: Vec<TreeNode>,
    path: Vec<usize>,
}

impl GameTree {
    pub fn build(shape: Shape) -> Self {
        let mut tree = GameTree {
            nodes: Vec::new(),
            path: vec![0],
        };
        tree.add(shape);
        tree
    }

    fn add(&mut self, shape: Shape) -> usize {
        let id = self.nodes.len();
        let (value, children) = match shape {
            Leaf(v) => (v, Vec::new()),
            Node(v, children) => (v, children),
        };
        self.nodes.push(TreeNode {
            value,
            children: Vec::new(),
            key: id as u64,
            noisy: false,
        });
        for child in children {
            let child_id = self.add(child);
            self.nodes[id].children.push(child_id);
        }
        id
    }

    /// Random tree of the given height; every internal node has 1..=max_branching children.
    pub fn random(seed: u64, height: u8, max_branching: usize) -> Self {
        fn shape(rng: &mut StdRng, height: u8, max_branching: usize) -> Shape {
            let value = if rng.gen_ratio(1, 12) {
                // Occasional forced mate for either side
                if rng.gen_bool(0.5) { 999_999 } else { -999_999 }
            } else {
                rng.gen_range(-1000..=1000)
            };
            if height == 0 || rng.gen_ratio(1, 10) {
                return Leaf(value);
            }
            let n = rng.gen_range(1..=max_branching);
            Node(value, (0..n).map(|_| shape(rng, height - 1, max_branching)).collect())
        }
        let mut rng = StdRng::seed_from_u64(seed);
        Self::build(shape(&mut rng, height, max_branching))
    }

    /// Give `node` the same key as `other`, making them one position.
    pub fn alias(&mut self, node: usize, other: usize) {
        self.nodes[node].key = self.nodes[other].key;
    }

    pub fn set_noisy(&mut self, node: usize) {
        self.nodes[node].noisy = true;
    }

    /// Node the path currently ends at. Ids follow creation order: the root
    /// is 0 and subtrees are numbered depth-first.
    pub fn current(&self) -> usize {
        self.path[self.path.len() - 1]
    }

    pub fn value(&self) -> i32 {
        self.nodes[self.current()].value
    }

    pub fn children(&self, node: usize) -> &[usize] {
        &self.nodes[node].children
    }
}

impl SearchBoard for GameTree {
    type Move = usize;
    type Key = u64;

    fn first_player_to_move(&self) -> bool {
        self.path.len() % 2 == 1
    }

    fn legal_moves(&self) -> Vec<usize> {
        self.nodes[self.current()].children.clone()
    }

    fn apply(&mut self, mv: usize) {
        assert!(self.nodes[self.current()].children.contains(&mv), "not a child: {mv}");
        self.path.push(mv);
    }

    fn undo(&mut self) {
        assert!(self.path.len() > 1, "undo at the root");
        self.path.pop();
    }

    fn is_game_over(&self) -> bool {
        self.nodes[self.current()].children.is_empty()
    }

    fn is_repetition(&self, count: usize) -> bool {
        let key = self.key();
        self.path.iter().filter(|&&n| self.nodes[n].key == key).count() >= count
    }

    fn key(&self) -> u64 {
        self.nodes[self.current()].key
    }

    fn is_noisy(&self, mv: usize) -> bool {
        self.nodes[mv].noisy
    }
}

pub fn static_value(tree: &GameTree) -> i32 {
    tree.value()
}

/// Plain minimax with the same leaf, horizon and mate-decay rules as the
/// search, but no pruning, table or ordering.
pub fn reference_minimax(tree: &mut GameTree, depth: u8, maximizing: bool) -> i32 {
    if tree.is_game_over() || depth == 0 {
        return tree.value();
    }
    let scores: Vec<i32> = tree
        .legal_moves()
        .into_iter()
        .map(|mv| {
            tree.apply(mv);
            let s = decay_mate(reference_minimax(tree, depth - 1, !maximizing));
            tree.undo();
            s
        })
        .collect();
    if maximizing {
        scores.into_iter().max().unwrap_or(0)
    } else {
        scores.into_iter().min().unwrap_or(0)
    }
}
