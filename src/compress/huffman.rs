//! Canonical Huffman coding over bytes.
//!
//! Only code lengths travel on the wire; both ends rebuild the same codes by
//! sorting symbols by (length, symbol value).

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::bitio::{BitReader, BitWriter};
use crate::error::{Error, Result};

/// Longest code the decoder accepts.
pub const MAX_CODE_LEN: u8 = 32;

/// Code length per byte value (0 = symbol absent).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLengths(pub [u8; 256]);

#[derive(Debug, Clone, Copy)]
enum Node {
    Leaf(u8),
    Internal(usize, usize),
}

impl CodeLengths {
    /// Build lengths from byte frequencies. `None` if every frequency is zero.
    pub fn from_frequencies(freqs: &[u64; 256]) -> Option<Self> {
        let mut nodes: Vec<Node> = Vec::new();
        // (weight, node index); the index breaks ties deterministically
        let mut heap = BinaryHeap::new();
        for (sym, &f) in freqs.iter().enumerate() {
            if f > 0 {
                heap.push(Reverse((f, nodes.len())));
                nodes.push(Node::Leaf(sym as u8));
            }
        }

        let mut lengths = [0u8; 256];
        match heap.len() {
            0 => return None,
            1 => {
                if let Some(Node::Leaf(sym)) = nodes.first() {
                    lengths[*sym as usize] = 1;
                }
                return Some(Self(lengths));
            }
            _ => {}
        }

        while heap.len() > 1 {
            let (Some(Reverse((wa, a))), Some(Reverse((wb, b)))) = (heap.pop(), heap.pop()) else {
                break;
            };
            let idx = nodes.len();
            nodes.push(Node::Internal(a, b));
            heap.push(Reverse((wa + wb, idx)));
        }

        let root = nodes.len() - 1;
        let mut stack = vec![(root, 0u8)];
        while let Some((idx, depth)) = stack.pop() {
            match nodes[idx] {
                Node::Leaf(sym) => lengths[sym as usize] = depth,
                Node::Internal(l, r) => {
                    stack.push((l, depth + 1));
                    stack.push((r, depth + 1));
                }
            }
        }
        Some(Self(lengths))
    }

    /// Present symbols in canonical order.
    fn sorted_symbols(&self) -> Vec<u8> {
        let mut syms: Vec<u8> = (0..=255u8).filter(|&s| self.0[s as usize] > 0).collect();
        syms.sort_by_key(|&s| (self.0[s as usize], s));
        syms
    }

    pub fn symbol_count(&self) -> usize {
        self.0.iter().filter(|&&l| l > 0).count()
    }

    /// Encoded size in bits for the given frequencies.
    pub fn encoded_bits(&self, freqs: &[u64; 256]) -> u64 {
        freqs
            .iter()
            .zip(self.0.iter())
            .map(|(&f, &l)| f * l as u64)
            .sum()
    }

    /// Reject length sets that cannot come from a prefix code.
    pub fn validate(&self) -> Result<()> {
        let mut kraft: u128 = 0;
        for &l in self.0.iter().filter(|&&l| l > 0) {
            if l > MAX_CODE_LEN {
                return Err(Error::CorruptPayload("code length out of range"));
            }
            kraft += 1u128 << (MAX_CODE_LEN - l);
        }
        if kraft == 0 {
            return Err(Error::CorruptPayload("empty code table"));
        }
        if kraft > 1u128 << MAX_CODE_LEN {
            return Err(Error::CorruptPayload("oversubscribed code table"));
        }
        Ok(())
    }
}

/// Encoder side: symbol -> (code, length).
pub struct Encoder {
    codes: [(u64, u8); 256],
}

impl Encoder {
    pub fn new(lengths: &CodeLengths) -> Self {
        let mut codes = [(0u64, 0u8); 256];
        let mut code: u64 = 0;
        let mut prev_len = 0u8;
        for sym in lengths.sorted_symbols() {
            let len = lengths.0[sym as usize];
            if prev_len != 0 {
                code = (code + 1) << (len - prev_len);
            }
            codes[sym as usize] = (code, len);
            prev_len = len;
        }
        Self { codes }
    }

    pub fn encode(&self, data: &[u8], out: &mut BitWriter) {
        for &b in data {
            let (code, len) = self.codes[b as usize];
            out.write_bits(code, len as u32);
        }
    }
}

/// Decoder side: per-length counts plus symbols in canonical order.
pub struct Decoder {
    counts: [u32; MAX_CODE_LEN as usize + 1],
    symbols: Vec<u8>,
    max_len: u8,
}

impl Decoder {
    pub fn new(lengths: &CodeLengths) -> Result<Self> {
        lengths.validate()?;
        let mut counts = [0u32; MAX_CODE_LEN as usize + 1];
        let mut max_len = 0;
        for &l in lengths.0.iter().filter(|&&l| l > 0) {
            counts[l as usize] += 1;
            max_len = max_len.max(l);
        }
        Ok(Self {
            counts,
            symbols: lengths.sorted_symbols(),
            max_len,
        })
    }

    fn decode_symbol(&self, input: &mut BitReader<'_>) -> Result<u8> {
        let mut code: u64 = 0;
        let mut first: u64 = 0;
        let mut index: u64 = 0;
        for len in 1..=self.max_len as usize {
            let bit = input
                .read_bit()
                .ok_or(Error::CorruptPayload("bit stream ended early"))?;
            code |= bit as u64;
            let count = self.counts[len] as u64;
            if code >= first && code - first < count {
                return Ok(self.symbols[(index + code - first) as usize]);
            }
            index += count;
            first = (first + count) << 1;
            code <<= 1;
        }
        Err(Error::CorruptPayload("invalid huffman code"))
    }

    pub fn decode(&self, input: &[u8], n: usize, out: &mut Vec<u8>) -> Result<()> {
        let mut reader = BitReader::new(input);
        out.reserve(n);
        for _ in 0..n {
            out.push(self.decode_symbol(&mut reader)?);
        }
        Ok(())
    }
}
