//! The sequence demonstration: one fixed run of operations against a single
//! sequence, recording its state after each step.

use tracing::debug;

use crate::sequence::{Result, Sequence};

pub const DEMO_SEQUENCE: [i64; 5] = [5, 2, 3, 1, 4];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Walkthrough {
    pub lines: Vec<String>,
    pub sequence: Sequence<i64>,
}

pub fn run(initial: &[i64]) -> Result<Walkthrough> {
    let mut seq = Sequence::from(initial);
    let mut lines = Vec::new();
    let mut record = |line: String| {
        debug!(%line, "walkthrough step");
        lines.push(line);
    };

    record(format!("Element at index 2: {}", seq.get(2)?));

    seq.append(6);
    record(format!("After appending 6: {}", seq));

    seq.sort();
    record(format!("Sorted list: {}", seq));

    seq.reverse();
    record(format!("Reversed list: {}", seq));

    seq.remove(&3)?;
    record(format!("After removing 3: {}", seq));

    seq.insert(2, 7)?;
    record(format!("After inserting 7 at index 2: {}", seq));

    match seq.position(&4) {
        Some(index) => record(format!("Element 4 found at index: {}", index)),
        None => record("Element not found".to_owned()),
    }

    Ok(Walkthrough {
        lines,
        sequence: seq,
    })
}
