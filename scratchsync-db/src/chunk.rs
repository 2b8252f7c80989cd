//! Tag/length/payload chunks and the field encodings used inside them.
//!
//! ```text
//! +---------+-------------------+------------------+
//! | tag (4) | length (u32, BE)  | payload (length) |
//! +---------+-------------------+------------------+
//! ```

use crate::error::DatabaseError;

/// Four ASCII bytes naming a chunk or field.
pub type Tag = [u8; 4];

pub const VRSN: Tag = *b"vrsn";
pub const OTRK: Tag = *b"otrk";
pub const TTYP: Tag = *b"ttyp";
pub const PFIL: Tag = *b"pfil";
pub const TADD: Tag = *b"tadd";
pub const UADD: Tag = *b"uadd";
pub const BMIS: Tag = *b"bmis";

const HEADER_LEN: usize = 8;

/// One undecoded chunk. Payloads are kept verbatim so that anything this
/// crate does not interpret is written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub tag: Tag,
    pub data: Vec<u8>,
}

impl Chunk {
    pub fn new(tag: Tag, data: Vec<u8>) -> Self {
        Self { tag, data }
    }

    pub fn text(tag: Tag, value: &str) -> Self {
        Self::new(tag, encode_utf16(value))
    }

    pub fn u32(tag: Tag, value: u32) -> Self {
        Self::new(tag, value.to_be_bytes().to_vec())
    }

    pub fn bool(tag: Tag, value: bool) -> Self {
        Self::new(tag, vec![u8::from(value)])
    }

    /// Decode the payload as UTF-16BE text.
    pub fn as_text(&self) -> Result<String, DatabaseError> {
        decode_utf16(&self.tag, &self.data)
    }

    /// Decode the payload as a big-endian `u32`, if it is exactly 4 bytes.
    pub fn as_u32(&self) -> Option<u32> {
        let bytes: [u8; 4] = self.data.as_slice().try_into().ok()?;
        Some(u32::from_be_bytes(bytes))
    }

    pub(crate) fn encoded_len(&self) -> usize {
        HEADER_LEN + self.data.len()
    }
}

/// Split `bytes` into consecutive chunks.
pub fn read_chunks(bytes: &[u8]) -> Result<Vec<Chunk>, DatabaseError> {
    let mut chunks = Vec::new();
    let mut offset = 0;

    while offset < bytes.len() {
        let header = bytes
            .get(offset..offset + HEADER_LEN)
            .ok_or(DatabaseError::TruncatedHeader { offset })?;
        let mut tag = [0u8; 4];
        tag.copy_from_slice(&header[..4]);
        let declared = u32::from_be_bytes([header[4], header[5], header[6], header[7]]) as usize;

        let start = offset + HEADER_LEN;
        let available = bytes.len() - start;
        if declared > available {
            return Err(DatabaseError::TruncatedPayload {
                tag: tag_name(&tag),
                offset,
                declared,
                available,
            });
        }

        chunks.push(Chunk::new(tag, bytes[start..start + declared].to_vec()));
        offset = start + declared;
    }

    Ok(chunks)
}

/// Append the encoding of `chunks` to `out`.
pub fn write_chunks(out: &mut Vec<u8>, chunks: &[Chunk]) -> Result<(), DatabaseError> {
    for chunk in chunks {
        write_chunk(out, &chunk.tag, &chunk.data)?;
    }
    Ok(())
}

pub fn write_chunk(out: &mut Vec<u8>, tag: &Tag, data: &[u8]) -> Result<(), DatabaseError> {
    let len = u32::try_from(data.len()).map_err(|_| DatabaseError::PayloadTooLarge {
        tag: tag_name(tag),
        len: data.len(),
    })?;
    out.extend_from_slice(tag);
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(data);
    Ok(())
}

pub fn encode_utf16(value: &str) -> Vec<u8> {
    value.encode_utf16().flat_map(u16::to_be_bytes).collect()
}

/// Decode UTF-16BE, dropping any trailing NUL terminators.
pub fn decode_utf16(tag: &Tag, data: &[u8]) -> Result<String, DatabaseError> {
    if data.len() % 2 != 0 {
        return Err(DatabaseError::InvalidText {
            tag: tag_name(tag),
            reason: format!("odd payload length {}", data.len()),
        });
    }
    let units: Vec<u16> = data
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();
    let text = String::from_utf16(&units).map_err(|e| DatabaseError::InvalidText {
        tag: tag_name(tag),
        reason: e.to_string(),
    })?;
    Ok(text.trim_end_matches('\0').to_owned())
}

pub fn tag_name(tag: &Tag) -> String {
    String::from_utf8_lossy(tag).into_owned()
}
