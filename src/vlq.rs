//! Variable length quantity encoding and decoding
//!
//! Delta times and payload lengths inside a track are stored as
//! big-endian 7 bit groups, one group per byte, with the high bit of
//! every byte except the last set as a continuation flag. The format
//! caps quantities at 4 encoded bytes, so 28 bits of value.

use crate::{
    error::{TrackError, TrackResult},
    reader::TrackSource,
};

/// Largest value a variable length quantity can carry (4 encoded bytes
/// of 7 value bits each)
pub const MAX: u32 = 0x0FFF_FFFF;

/// Encodes a value as a minimal length variable length quantity.
///
/// No superfluous leading zero groups are produced. `value` must not
/// exceed [`MAX`]; call sites inside the crate guarantee this through
/// [`DeltaTime`](crate::DeltaTime) or an explicit payload length check
/// before encoding.
pub fn encode(mut value: u32) -> Vec<u8> {
    debug_assert!(value <= MAX);

    let mut bytes = Vec::new();

    loop {
        let mut byte = (value & 0x7F) as u8;
        value >>= 7;

        if !bytes.is_empty() {
            byte |= 0x80;
        }

        bytes.push(byte);

        if value == 0 {
            break;
        }
    }

    bytes.reverse();
    bytes
}

/// Decodes a variable length quantity from the source, returning the
/// value together with the number of bytes consumed.
///
/// Accumulates 7 bits per byte until the first byte with a clear high
/// bit. Fails with [`TrackError::TruncatedInput`] if the source ends
/// first, and with [`TrackError::OverlongVlq`] if a fourth byte still
/// carries the continuation flag; the fifth byte is never consumed.
/// Non minimal encodings that fit in 4 bytes are accepted.
pub fn decode<I>(source: &mut TrackSource<I>) -> TrackResult<(u32, usize)>
where
    I: Iterator<Item = u8>,
{
    let mut value: u32 = 0;

    for consumed in 1..=4 {
        let byte = source.read_byte().ok_or(TrackError::TruncatedInput)?;
        value = (value << 7) | u32::from(byte & 0x7F);

        if byte & 0x80 == 0 {
            return Ok((value, consumed));
        }
    }

    Err(TrackError::OverlongVlq)
}
