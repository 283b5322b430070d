//! # mtrk
//!
//! A minimal dependency codec for the event stream inside a MIDI track chunk,
//! covering variable length delta times, the three event families (meta,
//! system exclusive, and channel), and running status compression, without
//! introducing any extra overhead or dependencies.
//!
//! ## Overview
//!
//! A track chunk's payload is a run of events laid end to end. Each event
//! opens with a variable length delta time counting the ticks since the
//! previous event, followed by a byte that picks the event family: `0xFF`
//! for meta events, `0xF0` for system exclusive events, and anything else
//! for channel events. Channel events may drop their status byte entirely
//! when it matches the previous one, a wire level compression called
//! running status that both the reader and writer here speak.
//!
//! - **Minimal dependencies**: Keeps your application lightweight and minimizes build complexity.
//!     Opt in to serde support and only require `thiserror` by default
//! - **Streaming-friendly**: Exposes traits and types that can decode track data from any
//!   byte iterator via [`reader::TrackReadable`], making it easier to handle data on the fly.
//! - **Deterministic errors**: Every malformed stream maps to one variant of
//!   [`error::TrackError`], so callers can match on exactly what went wrong.
//!
//! ## Example Usage
//!
//! ```rust
//! use mtrk::reader::TrackReader;
//!
//! // Track bytes (replace with your own source as needed): a tempo
//! // change followed by a note on.
//! let bytes = [
//!     0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20, // tempo meta event
//!     0x00, 0x90, 0x3C, 0x40, // note on, middle C
//! ];
//!
//! let mut reader = TrackReader::from_slice(&bytes);
//!
//! // Continuously read events until the stream ends cleanly.
//! while let Some(event) = reader.read_event().expect("Decode track event") {
//!     println!("Decoded event: {:?}", event);
//! }
//! ```
//!
//! The above example illustrates how to decode events one at a time; the
//! reader carries the running status between calls so status-less channel
//! events resolve against the last explicit status byte.
//!
//! ## Library Structure
//!
//! - **[`vlq`]**: Variable length quantity encoding and decoding, shared by
//!   delta times and payload length fields.
//! - **[`status`]**: Status byte classification, the channel command length
//!   table, and the [`status::RunningStatus`] tracker.
//! - **[`event`]**: The [`event::TrackEvent`] sum type and the per family
//!   codecs for meta, sysex, and channel events.
//! - **[`reader`] and [`writer`]**: Session types that decode and encode
//!   whole streams, carrying running status across events.
//! - **[`error`]**: The [`error::TrackError`] taxonomy every codec reports
//!   through.
//!
//! ## Extensibility
//!
//! This crate stops at the event layer on purpose: meta and sysex payloads
//! come back as raw bytes, and no tempo map or timing interpretation is
//! imposed. Because `mtrk` exposes events in a straightforward format, you
//! remain in full control of the semantic layer above them.

pub mod error;
pub mod event;
pub mod reader;
pub mod status;
pub mod vlq;
pub mod writer;

use error::TrackError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ticks elapsed since the previous event in a track stream.
///
/// Values are capped at [`vlq::MAX`], the most a 4 byte variable length
/// quantity can carry. The [`TryFrom<i64>`] impl is the checked door in
/// for tick counts computed with signed arithmetic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeltaTime(u32);

impl DeltaTime {
    /// A delta time of zero ticks, for events simultaneous with their
    /// predecessor
    pub const ZERO: Self = Self(0);

    /// Creates a delta time from a tick count already known to be in
    /// range
    pub const fn new(ticks: u32) -> Self {
        debug_assert!(ticks <= vlq::MAX);
        Self(ticks)
    }

    /// The tick count
    pub const fn ticks(&self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for DeltaTime {
    type Error = TrackError;

    fn try_from(ticks: i64) -> Result<Self, Self::Error> {
        if ticks < 0 {
            return Err(TrackError::NegativeDeltaTime(ticks));
        }
        if ticks > i64::from(vlq::MAX) {
            return Err(TrackError::OverlongVlq);
        }

        Ok(Self(ticks as u32))
    }
}

impl From<DeltaTime> for u32 {
    fn from(delta_time: DeltaTime) -> Self {
        delta_time.0
    }
}
