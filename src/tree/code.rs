//! Prefix codes derived from a [`HuffmanTree`].
use crate::frequency::{FrequencyTable, SYMBOLS};
use crate::tree::{HuffmanTree, Node};

/// A codeword: `length` bits taken from the low end of `value`, MSB first.
///
/// A length of 0 is only produced for the lone symbol of a single-leaf tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Code {
    pub length: u8,
    pub value: u64,
}

impl Code {
    fn child(self, bit: u64) -> Code {
        Code {
            length: self.length + 1,
            value: (self.value << 1) | bit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; SYMBOLS],
}

impl CodeTable {
    /// Walks the tree from the root, appending 0 for left and 1 for right.
    ///
    /// Uses an explicit stack; a skewed tree can be as deep as the number
    /// of distinct symbols.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = [None; SYMBOLS];
        let mut stack = vec![(tree.root(), Code::default())];
        while let Some((node, code)) = stack.pop() {
            match tree.node(node) {
                Node::Leaf(leaf) => codes[leaf.symbol as usize] = Some(code),
                Node::Internal(internal) => {
                    stack.push((internal.right, code.child(1)));
                    stack.push((internal.left, code.child(0)));
                }
            }
        }
        let table = Self { codes };
        log::debug!("generated codes, max_length={}", table.max_length());
        table
    }

    pub fn get(&self, symbol: u8) -> Option<Code> {
        self.codes[symbol as usize]
    }

    /// Longest code in the table.
    pub fn max_length(&self) -> u8 {
        self.codes.iter().flatten().map(|code| code.length).max().unwrap_or(0)
    }

    /// Total number of payload bits needed to encode a buffer with these frequencies.
    pub fn payload_bits(&self, table: &FrequencyTable) -> u64 {
        table
            .iter()
            .map(|(symbol, count)| {
                let length = self.get(symbol).map_or(0, |code| code.length);
                count as u64 * length as u64
            })
            .sum()
    }
}
