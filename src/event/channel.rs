//! Channel event codec
//!
//! Channel events are the performance data of a track: notes, control
//! changes, pitch bends, and friends. Each is a status byte whose high
//! nibble picks the command and low nibble picks the channel, followed
//! by one or two data bytes depending on the command. The status byte
//! itself may be omitted on the wire when it matches the running
//! status.

use crate::{
    error::{TrackError, TrackResult},
    reader::TrackSource,
    status::{self, RunningStatus},
    vlq,
    DeltaTime,
};

/// A single channel event with its delta time, status byte, and data
/// bytes
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelEvent {
    /// Ticks since the previous event
    delta_time: DeltaTime,
    /// Full status byte, command nibble plus channel nibble
    status: u8,
    /// One or two data bytes, as the command dictates
    data: Vec<u8>,
}

impl ChannelEvent {
    /// Creates a channel event from its parts.
    ///
    /// `status` must be a recognized channel command and `data` must
    /// hold exactly the number of bytes that command calls for.
    pub fn new(delta_time: DeltaTime, status: u8, data: Vec<u8>) -> Self {
        debug_assert!(status::is_status_byte(status));
        if let Some(length) = status::command_data_len(status) {
            debug_assert_eq!(data.len(), length);
        }

        Self {
            delta_time,
            status,
            data,
        }
    }

    /// Ticks since the previous event
    pub const fn delta_time(&self) -> DeltaTime {
        self.delta_time
    }

    /// Full status byte
    pub const fn status(&self) -> u8 {
        self.status
    }

    /// Channel number, the low nibble of the status byte
    pub const fn channel(&self) -> u8 {
        self.status & 0x0F
    }

    /// Data bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Decodes a channel event, starting from the byte after the delta
    /// time.
    ///
    /// An explicit status byte is latched into `running` before its
    /// data bytes are read. A data byte in the lead position instead
    /// borrows the latched status, failing with
    /// [`TrackError::NoRunningStatus`] when nothing is latched yet.
    /// Status bytes outside the channel command table fail with
    /// [`TrackError::UnrecognizedCommand`] and leave `running`
    /// untouched.
    pub fn decode<I>(
        delta_time: DeltaTime,
        source: &mut TrackSource<I>,
        running: &mut RunningStatus,
    ) -> TrackResult<Self>
    where
        I: Iterator<Item = u8>,
    {
        let lead = source.read_byte().ok_or(TrackError::TruncatedInput)?;

        let (status, length) = if status::is_status_byte(lead) {
            let length =
                status::command_data_len(lead).ok_or(TrackError::UnrecognizedCommand(lead))?;
            running.latch(lead);
            (lead, length)
        } else {
            let status = running.current().ok_or(TrackError::NoRunningStatus)?;
            let length =
                status::command_data_len(status).ok_or(TrackError::UnrecognizedCommand(status))?;

            // the lead byte is the first data byte
            source.unread(lead);
            (status, length)
        };

        let data = source.read_exact(length)?;

        Ok(Self {
            delta_time,
            status,
            data,
        })
    }

    /// Encodes the event, delta time included.
    ///
    /// With `emit_status` false the status byte is left off the wire,
    /// which is only decodable while the matching status is latched.
    pub fn encode(&self, emit_status: bool) -> Vec<u8> {
        let mut bytes = vlq::encode(self.delta_time.ticks());

        if emit_status {
            bytes.push(self.status);
        }

        bytes.extend(self.data.iter());
        bytes
    }
}
