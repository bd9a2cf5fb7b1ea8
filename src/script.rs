//! Whitespace-separated command scripts that drive the trees.
//!
//! Range-minimum scripts start with a directive count:
//!
//! ```text
//! 3
//! IN 4 40
//! IN 1 10
//! RMQ 0 5
//! ```
//!
//! AVL scripts are a flat list of `insert <word>`, `delete <word>`, `stats`,
//! `traverse` and `paths` commands.

use std::cmp::Ordering;
use std::str::{FromStr, SplitWhitespace};

use thiserror::Error;
use tracing::debug;

use crate::tree::{AvlTree, RangeMinTree};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("unexpected end of script: expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("invalid number `{token}`")]
    InvalidNumber { token: String },

    #[error("unknown command `{token}`")]
    UnknownCommand { token: String },

    #[error("invalid order code {0}: expected -3 through 3")]
    InvalidOrderCode(i32),
}

pub type Result<T> = std::result::Result<T, ScriptError>;

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(script: &'a str) -> Self {
        Self {
            inner: script.split_whitespace(),
        }
    }

    fn next_word(&mut self) -> Option<&'a str> {
        self.inner.next()
    }

    fn expect_word(&mut self, expected: &'static str) -> Result<&'a str> {
        self.next_word()
            .ok_or(ScriptError::UnexpectedEnd { expected })
    }

    fn expect_number<N: FromStr>(&mut self, expected: &'static str) -> Result<N> {
        let token = self.expect_word(expected)?;
        token.parse().map_err(|_| ScriptError::InvalidNumber {
            token: token.to_owned(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RmqCommand {
    Insert { key: i64, data: i64 },
    Query { lo: i64, hi: i64 },
}

pub fn parse_rmq(script: &str) -> Result<Vec<RmqCommand>> {
    let mut tokens = Tokens::new(script);
    let count: usize = tokens.expect_number("directive count")?;

    // count is untrusted input
    let mut commands = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        let command = match tokens.expect_word("directive")? {
            "IN" => RmqCommand::Insert {
                key: tokens.expect_number("key")?,
                data: tokens.expect_number("data")?,
            },
            "RMQ" => RmqCommand::Query {
                lo: tokens.expect_number("range start")?,
                hi: tokens.expect_number("range end")?,
            },
            other => {
                return Err(ScriptError::UnknownCommand {
                    token: other.to_owned(),
                });
            }
        };
        commands.push(command);
    }
    Ok(commands)
}

/// Runs the commands against a fresh tree, returning the tree and the
/// report lines.
pub fn run_rmq(commands: &[RmqCommand]) -> (RangeMinTree, Vec<String>) {
    let mut tree = RangeMinTree::new();
    let mut lines = Vec::with_capacity(commands.len() + 4);

    for command in commands {
        debug!(?command, "rmq directive");
        match *command {
            RmqCommand::Insert { key, data } => {
                lines.push(format!("Inserting {} @ index : {}", data, key));
                tree.insert(key, data);
            }
            RmqCommand::Query { lo, hi } => {
                let min = tree
                    .range_min(lo, hi)
                    .map_or_else(|| "none".to_owned(), |m| m.to_string());
                lines.push(format!(
                    "Range minimum query between indices: [{}, {}] = {}",
                    lo, hi, min
                ));
            }
        }
    }

    lines.push("=".repeat(68));
    lines.push("In Order Traversal:".to_owned());
    let entries: Vec<_> = tree
        .in_order()
        .into_iter()
        .map(|(k, d)| format!("({}, {})", k, d))
        .collect();
    lines.push(entries.join(" -> "));
    lines.push("Tree view:".to_owned());
    lines.extend(tree.render().lines().map(str::to_owned));

    (tree, lines)
}

/// Orderings for AVL trees of words, selected by a numeric code.
///
/// Orders that compare only lengths treat equal-length words as the same
/// key, so the second one is not inserted. Lengths count `char`s, so a word
/// outside the Basic Multilingual Plane is one character long, not two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringOrder {
    /// `-3`
    LongestThenReverse,
    /// `-2`
    Longest,
    /// `-1`
    ReverseLexicographic,
    /// `0`
    ShortestThenReverse,
    /// `1`
    Lexicographic,
    /// `2`
    Shortest,
    /// `3`
    ShortestThenLexicographic,
}

impl StringOrder {
    pub fn from_code(code: i32) -> Result<Self> {
        Ok(match code {
            -3 => Self::LongestThenReverse,
            -2 => Self::Longest,
            -1 => Self::ReverseLexicographic,
            0 => Self::ShortestThenReverse,
            1 => Self::Lexicographic,
            2 => Self::Shortest,
            3 => Self::ShortestThenLexicographic,
            other => return Err(ScriptError::InvalidOrderCode(other)),
        })
    }

    pub fn compare(self, a: &str, b: &str) -> Ordering {
        let by_len = || a.chars().count().cmp(&b.chars().count());
        match self {
            Self::LongestThenReverse => by_len().reverse().then_with(|| b.cmp(a)),
            Self::Longest => by_len().reverse(),
            Self::ReverseLexicographic => b.cmp(a),
            Self::ShortestThenReverse => by_len().then_with(|| b.cmp(a)),
            Self::Lexicographic => a.cmp(b),
            Self::Shortest => by_len(),
            Self::ShortestThenLexicographic => by_len().then_with(|| a.cmp(b)),
        }
    }

    pub fn tree(self) -> AvlTree<String> {
        AvlTree::with_comparator(move |a: &String, b: &String| self.compare(a, b))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvlCommand {
    Insert(String),
    Delete(String),
    Stats,
    Traverse,
    Paths,
}

pub fn parse_avl(script: &str) -> Result<Vec<AvlCommand>> {
    let mut tokens = Tokens::new(script);
    let mut commands = Vec::new();

    while let Some(word) = tokens.next_word() {
        let command = match word {
            "insert" => AvlCommand::Insert(tokens.expect_word("word to insert")?.to_owned()),
            "delete" => AvlCommand::Delete(tokens.expect_word("word to delete")?.to_owned()),
            "stats" => AvlCommand::Stats,
            "traverse" => AvlCommand::Traverse,
            "paths" => AvlCommand::Paths,
            other => {
                return Err(ScriptError::UnknownCommand {
                    token: other.to_owned(),
                });
            }
        };
        commands.push(command);
    }
    Ok(commands)
}

pub fn run_avl(order: StringOrder, commands: &[AvlCommand]) -> (AvlTree<String>, Vec<String>) {
    let mut tree = order.tree();
    let mut lines = Vec::new();

    for command in commands {
        debug!(?command, "avl command");
        match command {
            AvlCommand::Insert(word) => {
                if tree.insert(word.clone()) {
                    lines.push(format!("Inserted : {}", word));
                } else {
                    lines.push(format!("Already present : {}", word));
                }
            }
            AvlCommand::Delete(word) => match tree.remove(word) {
                Some(_) => lines.push(format!("Deleted : {}", word)),
                None => lines.push(format!("Not found : {}", word)),
            },
            AvlCommand::Stats => lines.push(format!(
                "Stats: size = {}, height = {}, #full-nodes = {}, fibonacci? = {}",
                tree.len(),
                tree.height(),
                tree.full_count(),
                tree.is_fibonacci()
            )),
            AvlCommand::Traverse => {
                lines.push("In-Order Traversal :".to_owned());
                tree.traverse(|word| lines.push(word.clone()));
            }
            AvlCommand::Paths => {
                let paths = tree.paths();
                lines.push(format!("Root-to-Leaf Paths : {}", paths.len()));
                for path in paths {
                    let words: Vec<&str> = path.into_iter().map(String::as_str).collect();
                    lines.push(words.join(" "));
                }
            }
        }
    }

    (tree, lines)
}
