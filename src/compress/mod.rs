//! 负载压缩编解码
//!
//! 固定、确定性的无损算法：字节级规范 Huffman 编码，当 Huffman 无法缩小
//! 数据时回退为原样存储（stored）。输入受固定工作缓冲区 `MAX_INPUT` 限制。
//!
//! 压缩结果格式：
//!
//! ```text
//! stored : | 0x00 | raw_len (u16 BE) | raw bytes ...                          |
//! huffman: | 0x01 | raw_len (u16 BE) | n-1 (u8) | n × (sym, len) | bits ... |
//! ```

mod bitio;
mod huffman;

pub use bitio::{BitReader, BitWriter};
pub use huffman::{CodeLengths, Decoder, Encoder, MAX_CODE_LEN};

use crate::error::{Error, Result};
use tracing::trace;

/// 固定工作缓冲区大小（字节）。
pub const MAX_INPUT: usize = 10_000;

const METHOD_STORED: u8 = 0;
const METHOD_HUFFMAN: u8 = 1;
const PREFIX_LEN: usize = 3;

/// 对 `len` 字节输入，足以容纳压缩输出的缓冲区大小。
pub fn worst_case_len(len: usize) -> usize {
    PREFIX_LEN + len
}

/// 压缩到调用方提供的缓冲区，返回写入的字节数。
///
/// 缓冲区不够时返回 `OutputBufferTooSmall`，绝不截断。
pub fn compress_into(src: &[u8], dst: &mut [u8]) -> Result<usize> {
    if src.len() > MAX_INPUT {
        return Err(Error::InputTooLarge {
            len: src.len(),
            max: MAX_INPUT,
        });
    }

    let encoded = encode_huffman(src).unwrap_or_else(|| encode_stored(src));
    if encoded.len() > dst.len() {
        return Err(Error::OutputBufferTooSmall {
            required: encoded.len(),
            capacity: dst.len(),
        });
    }
    dst[..encoded.len()].copy_from_slice(&encoded);
    trace!(raw = src.len(), compressed = encoded.len(), "payload compressed");
    Ok(encoded.len())
}

/// 压缩为新分配的缓冲区。
pub fn compress(src: &[u8]) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; worst_case_len(src.len().min(MAX_INPUT))];
    let n = compress_into(src, &mut buf)?;
    buf.truncate(n);
    Ok(buf)
}

/// 解压到调用方提供的缓冲区，返回写入的字节数。
pub fn decompress_into(src: &[u8], dst: &mut [u8]) -> Result<usize> {
    let out = decompress(src)?;
    if out.len() > dst.len() {
        return Err(Error::OutputBufferTooSmall {
            required: out.len(),
            capacity: dst.len(),
        });
    }
    dst[..out.len()].copy_from_slice(&out);
    Ok(out.len())
}

/// 解压；`decompress(compress(b)) == b` 对所有 `b.len() <= MAX_INPUT` 成立。
pub fn decompress(src: &[u8]) -> Result<Vec<u8>> {
    if src.len() < PREFIX_LEN {
        return Err(Error::CorruptPayload("missing codec prefix"));
    }
    let method = src[0];
    let raw_len = u16::from_be_bytes([src[1], src[2]]) as usize;
    if raw_len > MAX_INPUT {
        return Err(Error::InputTooLarge {
            len: raw_len,
            max: MAX_INPUT,
        });
    }
    let body = &src[PREFIX_LEN..];

    match method {
        METHOD_STORED => {
            if body.len() != raw_len {
                return Err(Error::CorruptPayload("stored length mismatch"));
            }
            Ok(body.to_vec())
        }
        METHOD_HUFFMAN => {
            let (&n_minus_one, rest) = body
                .split_first()
                .ok_or(Error::CorruptPayload("missing symbol count"))?;
            let n = n_minus_one as usize + 1;
            if rest.len() < n * 2 {
                return Err(Error::CorruptPayload("truncated code table"));
            }
            let mut lengths = [0u8; 256];
            for pair in rest[..n * 2].chunks_exact(2) {
                if pair[1] == 0 || lengths[pair[0] as usize] != 0 {
                    return Err(Error::CorruptPayload("bad code table entry"));
                }
                lengths[pair[0] as usize] = pair[1];
            }
            let decoder = Decoder::new(&CodeLengths(lengths))?;
            let mut out = Vec::new();
            decoder.decode(&rest[n * 2..], raw_len, &mut out)?;
            Ok(out)
        }
        _ => Err(Error::CorruptPayload("unknown codec method")),
    }
}

fn encode_stored(src: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(worst_case_len(src.len()));
    out.push(METHOD_STORED);
    out.extend_from_slice(&(src.len() as u16).to_be_bytes());
    out.extend_from_slice(src);
    out
}

/// `None` when Huffman would not beat stored.
fn encode_huffman(src: &[u8]) -> Option<Vec<u8>> {
    let mut freqs = [0u64; 256];
    for &b in src {
        freqs[b as usize] += 1;
    }
    let lengths = CodeLengths::from_frequencies(&freqs)?;
    lengths.validate().ok()?;

    let n = lengths.symbol_count();
    let table_len = 1 + n * 2;
    let bits = lengths.encoded_bits(&freqs) as usize;
    let total = PREFIX_LEN + table_len + bits.div_ceil(8);
    if total >= worst_case_len(src.len()) {
        return None;
    }

    let mut out = Vec::with_capacity(total);
    out.push(METHOD_HUFFMAN);
    out.extend_from_slice(&(src.len() as u16).to_be_bytes());
    out.push((n - 1) as u8);
    for sym in 0..=255u8 {
        let len = lengths.0[sym as usize];
        if len > 0 {
            out.push(sym);
            out.push(len);
        }
    }
    let mut writer = BitWriter::new();
    Encoder::new(&lengths).encode(src, &mut writer);
    out.extend_from_slice(&writer.finish());
    debug_assert_eq!(out.len(), total);
    Some(out)
}
