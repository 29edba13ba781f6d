//! Opening book stored as a move-prefix tree.
//!
//! Book files are plain text: the first line is a header, every other
//! non-empty line is a sequence of UCI moves played from the standard start
//! position. Lines sharing a prefix share tree nodes, so a lookup walks the
//! game history one move at a time and offers the children of the node it
//! reaches.

use std::fs;
use std::path::Path;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::game_state::chess_errors::{ChessError, ChessResult};
use crate::game_state::position::Position;
use crate::moves::chess_move::Move;
use crate::utils::long_algebraic::parse_legal_uci_move;

const ROOT: usize = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookNode {
    pub uci_move: String,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

impl BookNode {
    fn new(uci_move: &str, parent: Option<usize>) -> Self {
        Self {
            uci_move: uci_move.to_owned(),
            parent,
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpeningBook {
    nodes: Vec<BookNode>,
}

impl Default for OpeningBook {
    fn default() -> Self {
        Self {
            nodes: vec![BookNode::new("ROOT", None)],
        }
    }
}

impl OpeningBook {
    /// The book compiled into the binary.
    pub fn load_default() -> Self {
        Self::from_text(include_str!("data/book_openings.txt"))
    }

    pub fn from_path(path: impl AsRef<Path>) -> ChessResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            ChessError::OpeningBook(format!("failed reading {}: {e}", path.display()))
        })?;
        Ok(Self::from_text(&text))
    }

    /// Moves are stored as text; they are only parsed against a position
    /// when chosen.
    pub fn from_text(text: &str) -> Self {
        let mut book = Self::default();
        for line in text.lines().skip(1) {
            let mut node = ROOT;
            for uci_move in line.split_whitespace() {
                node = book.add_child(node, uci_move);
            }
        }
        book
    }

    fn find_child(&self, parent: usize, uci_move: &str) -> Option<usize> {
        self.nodes[parent]
            .children
            .iter()
            .copied()
            .find(|&child| self.nodes[child].uci_move == uci_move)
    }

    fn add_child(&mut self, parent: usize, uci_move: &str) -> usize {
        if let Some(existing) = self.find_child(parent, uci_move) {
            return existing;
        }
        let index = self.nodes.len();
        self.nodes.push(BookNode::new(uci_move, Some(parent)));
        self.nodes[parent].children.push(index);
        index
    }

    /// Node reached by playing `history` from the root, if every move is known.
    fn walk(&self, history: &[Move]) -> Option<usize> {
        history.iter().try_fold(ROOT, |node, mv| {
            self.find_child(node, &mv.to_string())
        })
    }

    pub fn in_book(&self, history: &[Move]) -> bool {
        self.walk(history)
            .is_some_and(|node| !self.nodes[node].children.is_empty())
    }

    pub fn continuations(&self, history: &[Move]) -> Vec<&str> {
        self.walk(history)
            .map(|node| {
                self.nodes[node]
                    .children
                    .iter()
                    .map(|&child| self.nodes[child].uci_move.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Picks one continuation uniformly at random and resolves it against
    /// `position`, which must be the position reached by `history`.
    pub fn choose_move<R: Rng + ?Sized>(
        &self,
        position: &Position,
        history: &[Move],
        rng: &mut R,
    ) -> ChessResult<Move> {
        let candidates = self.continuations(history);
        let Some(choice) = candidates.choose(rng) else {
            return Err(ChessError::OpeningBook(
                "position is not covered by the book".to_owned(),
            ));
        };
        parse_legal_uci_move(position, choice)
            .map_err(|e| ChessError::OpeningBook(format!("bad book entry '{choice}': {e}")))
    }

    /// Moves from the root down to `node`.
    pub fn line_to(&self, node: usize) -> Vec<&str> {
        let mut line = Vec::new();
        let mut current = Some(node);
        while let Some(index) = current.filter(|&i| i != ROOT) {
            line.push(self.nodes[index].uci_move.as_str());
            current = self.nodes[index].parent;
        }
        line.reverse();
        line
    }

    /// Distinct book lines, counted as leaves of the tree.
    pub fn line_count(&self) -> usize {
        self.nodes
            .iter()
            .skip(1)
            .filter(|node| node.children.is_empty())
            .count()
    }

    /// Stored moves, the root excluded.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - 1
    }
}
