//! Static Huffman compression of byte buffers.
//!
//! [`encode`] stores the 256-entry frequency table followed by the packed
//! codes; [`decode`] rebuilds the same tree from that table and reverses it.
//!
//! ```
//! let compressed = static_huffman::encode(b"AAAAAAAAB")?;
//! assert_eq!(compressed.len(), 1024 + 2);
//! assert_eq!(static_huffman::decode(&compressed)?, b"AAAAAAAAB");
//! # Ok::<(), static_huffman::HuffmanError>(())
//! ```
pub mod bits;
pub mod entropy;
pub mod error;
pub mod frequency;
pub mod tree;

pub use crate::entropy::{decode, encode, encoded_len};
pub use crate::error::{HuffmanError, Result};
pub use crate::frequency::{FrequencyTable, HEADER_LEN};
pub use crate::tree::{Code, CodeTable, HuffmanTree};
