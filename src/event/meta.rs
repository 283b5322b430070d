//! Meta event codec
//!
//! Meta events carry non performance data such as tempo changes, text,
//! and the end of track marker. On the wire they look like
//! `<delta time> FF <type> <length> <data>`, with the length itself a
//! variable length quantity.

use crate::{
    error::{TrackError, TrackResult},
    reader::TrackSource,
    vlq,
    DeltaTime,
};

/// A single meta event with its delta time, type byte, and payload
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetaEvent {
    /// Ticks since the previous event
    delta_time: DeltaTime,
    /// Meta type byte, `0x51` for tempo, `0x2F` for end of track, etc
    meta_type: u8,
    /// Raw payload bytes
    data: Vec<u8>,
}

impl MetaEvent {
    /// Creates a meta event from its parts
    pub fn new(delta_time: DeltaTime, meta_type: u8, data: Vec<u8>) -> Self {
        Self {
            delta_time,
            meta_type,
            data,
        }
    }

    /// Ticks since the previous event
    pub const fn delta_time(&self) -> DeltaTime {
        self.delta_time
    }

    /// Meta type byte
    pub const fn meta_type(&self) -> u8 {
        self.meta_type
    }

    /// Payload bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Decodes the remainder of a meta event, the `0xFF` marker having
    /// already been consumed from the source.
    ///
    /// Reads the type byte, the payload length, and exactly that many
    /// payload bytes. An early end of the source at any point yields
    /// [`TrackError::TruncatedInput`]. The end of track type `0x2F` is
    /// returned like any other.
    pub fn decode<I>(delta_time: DeltaTime, source: &mut TrackSource<I>) -> TrackResult<Self>
    where
        I: Iterator<Item = u8>,
    {
        let meta_type = source.read_byte().ok_or(TrackError::TruncatedInput)?;
        let (length, _) = vlq::decode(source)?;
        let data = source.read_exact(length as usize)?;

        Ok(Self {
            delta_time,
            meta_type,
            data,
        })
    }

    /// Encodes the full event, delta time and `0xFF` marker included.
    ///
    /// Fails with [`TrackError::OverlongVlq`] before emitting anything
    /// if the payload is too long for its length field.
    pub fn encode(&self) -> TrackResult<Vec<u8>> {
        if self.data.len() > vlq::MAX as usize {
            return Err(TrackError::OverlongVlq);
        }

        let mut bytes = vlq::encode(self.delta_time.ticks());
        bytes.push(0xFF);
        bytes.push(self.meta_type);
        bytes.extend(vlq::encode(self.data.len() as u32));
        bytes.extend(self.data.iter());

        Ok(bytes)
    }
}
