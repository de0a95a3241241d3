use crate::bits::BitWriter;
use crate::entropy::output_len;
use crate::error::{zeroed_buffer, HuffmanError, Result};
use crate::frequency::{FrequencyTable, HEADER_LEN};
use crate::tree::{CodeTable, HuffmanTree};

/// State for compressing one buffer: its frequencies and derived codes.
#[derive(Debug)]
pub struct Encoder<'a> {
    input: &'a [u8],
    table: FrequencyTable,
    codes: Option<CodeTable>,
    payload_bits: u64,
    encoded_len: usize,
}

impl<'a> Encoder<'a> {
    pub fn new(input: &'a [u8]) -> Result<Self> {
        let table = FrequencyTable::count(input)?;
        let codes = HuffmanTree::from_frequencies(&table).map(|tree| tree.codes());
        let payload_bits = codes.as_ref().map_or(0, |codes| codes.payload_bits(&table));
        let encoded_len = output_len(payload_bits)?;
        Ok(Self {
            input,
            table,
            codes,
            payload_bits,
            encoded_len,
        })
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.table
    }

    /// Code table, absent for empty input.
    pub fn codes(&self) -> Option<&CodeTable> {
        self.codes.as_ref()
    }

    pub fn payload_bits(&self) -> u64 {
        self.payload_bits
    }

    /// Exact size of the compressed output: header plus padded payload.
    pub fn encoded_len(&self) -> usize {
        self.encoded_len
    }

    /// Writes header and payload into `output`, overwriting its contents.
    ///
    /// `output` must be exactly [`encoded_len`](Self::encoded_len) bytes long.
    pub fn encode_into(&self, output: &mut [u8]) -> Result<()> {
        if output.len() != self.encoded_len {
            return Err(HuffmanError::OutputSize {
                expected: self.encoded_len,
                actual: output.len(),
            });
        }
        self.table.write_to(output);
        // Codes are ORed into place.
        output[HEADER_LEN..].fill(0);
        let Some(codes) = &self.codes else {
            return Ok(());
        };
        let mut writer = BitWriter::new(&mut output[HEADER_LEN..]);
        for &byte in self.input {
            // Every byte of the input was counted, so it has a code.
            let code = codes.get(byte).unwrap_or_default();
            writer.write(code.length, code.value);
        }
        debug_assert_eq!(writer.cursor().bit_position(), self.payload_bits);
        debug_assert_eq!(HEADER_LEN + writer.cursor().bytes_used(), output.len());
        Ok(())
    }
}

/// Compresses `input` into a frequency header followed by the packed codes.
///
/// Empty input yields a header of 256 zero counters and no payload.
pub fn encode(input: &[u8]) -> Result<Vec<u8>> {
    let encoder = Encoder::new(input)?;
    let mut output = zeroed_buffer(encoder.encoded_len)?;
    encoder.encode_into(&mut output)?;
    log::debug!(
        "encoded {} bytes into {} ({} payload bits)",
        input.len(),
        output.len(),
        encoder.payload_bits
    );
    Ok(output)
}
