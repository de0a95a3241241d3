use crate::bits::BitReader;
use crate::entropy::payload_len;
use crate::error::{HuffmanError, Result};
use crate::frequency::{FrequencyTable, HEADER_LEN, SYMBOLS};
use crate::tree::{HuffmanTree, Node};

/// State for decompressing one buffer.
#[derive(Debug)]
pub struct Decoder<'a> {
    table: FrequencyTable,
    tree: Option<HuffmanTree>,
    payload: &'a [u8],
    decoded_len: usize,
}

impl<'a> Decoder<'a> {
    /// Parses the header, rebuilds the tree and checks that the payload
    /// length agrees with the counts.
    pub fn new(input: &'a [u8]) -> Result<Self> {
        let table = FrequencyTable::from_header(input)?;
        let decoded_len = usize::try_from(table.total())
            .map_err(|_| HuffmanError::CorruptHeader("total count does not fit in memory"))?;
        let payload = &input[HEADER_LEN..];
        let tree = HuffmanTree::from_frequencies(&table);

        let required = tree.as_ref().map_or(0, |tree| tree.codes().payload_bits(&table));
        let available = payload.len() as u64 * 8;
        if required > available {
            return Err(HuffmanError::TruncatedStream {
                needed: required,
                available,
            });
        }
        if payload_len(required).is_some_and(|needed| payload.len() > needed) {
            return Err(HuffmanError::CorruptHeader("payload is longer than the counts require"));
        }
        log::debug!(
            "header: {decoded_len} symbols, {} distinct, {required} payload bits",
            table.distinct()
        );
        Ok(Self {
            table,
            tree,
            payload,
            decoded_len,
        })
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.table
    }

    /// Length of the original buffer according to the header.
    pub fn decoded_len(&self) -> usize {
        self.decoded_len
    }

    /// Appends the decoded bytes to `output`.
    pub fn decode_into(&self, output: &mut Vec<u8>) -> Result<()> {
        output
            .try_reserve_exact(self.decoded_len)
            .map_err(HuffmanError::allocation(self.decoded_len))?;

        let Some(tree) = &self.tree else {
            return Ok(());
        };
        let root = tree.root();
        if let Node::Leaf(leaf) = tree.node(root) {
            // A lone symbol has a zero-length code; nothing is read.
            output.resize(output.len() + leaf.count as usize, leaf.symbol);
            return Ok(());
        }

        let mut remaining = [0u32; SYMBOLS];
        for (symbol, count) in self.table.iter() {
            remaining[symbol as usize] = count;
        }
        let mut unique = self.table.distinct();
        let mut reader = BitReader::new(self.payload);
        let mut node = root;
        while unique > 0 {
            match tree.node(node) {
                Node::Internal(internal) => {
                    node = if reader.read_bit()? { internal.right } else { internal.left };
                }
                Node::Leaf(leaf) => {
                    let count = &mut remaining[leaf.symbol as usize];
                    if *count == 0 {
                        return Err(HuffmanError::CorruptHeader(
                            "payload holds more symbols than the counts allow",
                        ));
                    }
                    output.push(leaf.symbol);
                    *count -= 1;
                    if *count == 0 {
                        unique -= 1;
                    }
                    node = root;
                }
            }
        }
        log::trace!("consumed {} payload bits", reader.cursor().bit_position());
        Ok(())
    }
}

/// Restores the original bytes from a buffer produced by [`encode`](crate::encode).
pub fn decode(input: &[u8]) -> Result<Vec<u8>> {
    let decoder = Decoder::new(input)?;
    let mut output = Vec::new();
    decoder.decode_into(&mut output)?;
    log::debug!("decoded {} bytes into {}", input.len(), output.len());
    Ok(output)
}
