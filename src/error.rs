//! Failure taxonomy shared by every codec in the crate

use thiserror::Error;

/// Result type produced by the track codecs (see [`TrackError`])
pub type TrackResult<T> = Result<T, TrackError>;

/// Error types from decoding or encoding a track event stream
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackError {
    /// Byte source ran out in the middle of a field
    #[error("Byte source ended before the current field was complete")]
    TruncatedInput,
    /// A variable length quantity ran past the 4 byte format bound,
    /// either on the wire or as a value to encode
    #[error("Variable length quantity exceeds the 28 bit format range")]
    OverlongVlq,
    /// A negative tick count was supplied for a delta time
    #[error("Delta time must not be negative, got {0} ticks")]
    NegativeDeltaTime(i64),
    /// The byte in a sysex event's terminator slot was not 0xF7
    #[error("Invalid system exclusive terminator byte {0:#04X}")]
    InvalidSysexTerminator(u8),
    /// A terminated sysex event whose byte count disagrees with its
    /// declared length field
    #[error("System exclusive length mismatch: declared {expected} bytes, found {actual}")]
    SysexLengthMismatch {
        /// Byte count promised by the encoded length field
        expected: u32,
        /// Byte count actually present, terminator included
        actual: u32,
    },
    /// A channel data byte appeared before any status byte was
    /// established in the current session
    #[error("Channel data byte with no running status established")]
    NoRunningStatus,
    /// A status byte whose high nibble names no channel command
    #[error("Unrecognized command status byte {0:#04X}")]
    UnrecognizedCommand(u8),
}
