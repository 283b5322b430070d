//! Status byte classification and running status tracking
//!
//! Every event in a track stream opens (after its delta time) with a
//! byte that decides which codec handles the rest: `0xFF` for meta
//! events, `0xF0` for system exclusive events, and anything else for
//! channel events. Channel events may also omit their status byte
//! entirely and lean on the most recent one, which [`RunningStatus`]
//! keeps track of.

/// Event family selected by the byte that follows a delta time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Meta event, marked by `0xFF`
    Meta,
    /// System exclusive event, marked by `0xF0`
    Sysex,
    /// Channel event, any other leading byte
    Channel,
}

/// Classifies the byte that follows a delta time.
///
/// `0xFF` and `0xF0` select the meta and sysex codecs; every other
/// byte, status or data, belongs to the channel codec.
pub const fn classify(byte: u8) -> EventKind {
    match byte {
        0xFF => EventKind::Meta,
        0xF0 => EventKind::Sysex,
        _ => EventKind::Channel,
    }
}

/// Whether the byte has its high bit set, marking it as a status byte
pub const fn is_status_byte(byte: u8) -> bool {
    byte & 0x80 != 0
}

/// Whether the byte has a clear high bit, marking it as a data byte
pub const fn is_data_byte(byte: u8) -> bool {
    !is_status_byte(byte)
}

/// Number of data bytes a channel command carries, keyed by the high
/// nibble of its status byte.
///
/// Returns `None` for bytes outside the channel command range,
/// including the `0xF0` system family and plain data bytes.
pub const fn command_data_len(status: u8) -> Option<usize> {
    match status & 0xF0 {
        0x80 | 0x90 | 0xA0 | 0xB0 | 0xE0 => Some(2),
        0xC0 | 0xD0 => Some(1),
        _ => None,
    }
}

/// Most recent explicit channel status byte seen in a stream.
///
/// Both the reader and the writer keep one of these per session. A
/// channel event with an explicit status byte latches it; meta and
/// sysex events pass through without touching it; and a channel event
/// that opens with a data byte borrows whatever is latched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunningStatus {
    /// Last explicit status byte, `None` until one has been seen
    last: Option<u8>,
}

impl RunningStatus {
    /// Creates a tracker with no status established
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Records an explicit channel status byte
    pub fn latch(&mut self, status: u8) {
        debug_assert!(is_status_byte(status));
        self.last = Some(status);
    }

    /// Currently latched status byte, if any
    pub const fn current(&self) -> Option<u8> {
        self.last
    }
}
