//! System exclusive event codec
//!
//! Sysex events ferry vendor defined bytes: `<delta time> F0 <length>
//! <data> F7`, where the length counts the data bytes plus the `0xF7`
//! terminator. The decoder holds the stream to that promise and calls
//! out both malformed terminators and lying length fields.

use crate::{
    error::{TrackError, TrackResult},
    reader::TrackSource,
    status,
    vlq,
    DeltaTime,
};

/// A single system exclusive event with its delta time and payload
/// (marker, length, and terminator excluded)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SysexEvent {
    /// Ticks since the previous event
    delta_time: DeltaTime,
    /// Vendor payload, without the trailing `0xF7`
    data: Vec<u8>,
}

impl SysexEvent {
    /// Creates a sysex event from its parts
    pub fn new(delta_time: DeltaTime, data: Vec<u8>) -> Self {
        Self { delta_time, data }
    }

    /// Ticks since the previous event
    pub const fn delta_time(&self) -> DeltaTime {
        self.delta_time
    }

    /// Payload bytes, terminator excluded
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Decodes the remainder of a sysex event, the `0xF0` marker having
    /// already been consumed from the source.
    ///
    /// Reads the declared length, then walks bytes until the slot the
    /// length reserves for the terminator. A status byte other than
    /// `0xF7` anywhere in the event, or a data byte sitting in the
    /// terminator slot, yields [`TrackError::InvalidSysexTerminator`];
    /// a terminator that arrives with the wrong number of bytes behind
    /// it yields [`TrackError::SysexLengthMismatch`].
    pub fn decode<I>(delta_time: DeltaTime, source: &mut TrackSource<I>) -> TrackResult<Self>
    where
        I: Iterator<Item = u8>,
    {
        let (declared, _) = vlq::decode(source)?;
        let mut data = Vec::new();

        loop {
            let byte = source.read_byte().ok_or(TrackError::TruncatedInput)?;

            if status::is_status_byte(byte) {
                if byte != 0xF7 {
                    return Err(TrackError::InvalidSysexTerminator(byte));
                }

                let actual = data.len() as u32 + 1;
                if actual != declared {
                    return Err(TrackError::SysexLengthMismatch {
                        expected: declared,
                        actual,
                    });
                }

                return Ok(Self { delta_time, data });
            }

            // a data byte where the declared length demands the terminator
            if data.len() as u32 + 1 == declared {
                return Err(TrackError::InvalidSysexTerminator(byte));
            }

            data.push(byte);
        }
    }

    /// Encodes the full event, delta time, `0xF0` marker, length, and
    /// `0xF7` terminator included.
    ///
    /// Fails with [`TrackError::OverlongVlq`] before emitting anything
    /// if the payload plus terminator is too long for its length field.
    pub fn encode(&self) -> TrackResult<Vec<u8>> {
        if self.data.len() >= vlq::MAX as usize {
            return Err(TrackError::OverlongVlq);
        }

        let mut bytes = vlq::encode(self.delta_time.ticks());
        bytes.push(0xF0);
        bytes.extend(vlq::encode(self.data.len() as u32 + 1));
        bytes.extend(self.data.iter());
        bytes.push(0xF7);

        Ok(bytes)
    }
}
