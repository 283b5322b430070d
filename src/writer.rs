//! Encoding sessions that build track byte streams
//!
//! [`TrackWriter`] is the counterpart to the reader's decoding
//! session: events go in, canonical track bytes come out, with the
//! running status tracker deciding (on request) which channel status
//! bytes can stay off the wire. Encoding is all or nothing per event;
//! a rejected event leaves the accumulated bytes exactly as they were.

use crate::{error::TrackResult, event::TrackEvent, status::RunningStatus};

/// Encoding session that accumulates track bytes.
///
/// Events already written stay written: an encoding failure on a later
/// event does not roll the earlier bytes back.
#[derive(Debug, Default)]
pub struct TrackWriter {
    /// Accumulated track bytes
    out: Vec<u8>,
    /// Running status carried across written events
    running: RunningStatus,
}

impl TrackWriter {
    /// Creates an empty session
    pub fn new() -> Self {
        Self {
            out: Vec::new(),
            running: RunningStatus::new(),
        }
    }

    /// Appends an event with its status or marker byte on the wire.
    ///
    /// Channel statuses still latch into the running status tracker,
    /// so later compressed writes see them. Nothing is appended when
    /// encoding fails.
    pub fn write_event(&mut self, event: &TrackEvent) -> TrackResult<()> {
        let bytes = event.encode()?;

        if let TrackEvent::Channel(channel) = event {
            self.running.latch(channel.status());
        }

        self.out.extend(bytes);
        Ok(())
    }

    /// Appends an event, dropping the status byte of a channel event
    /// whose status matches the one currently latched.
    ///
    /// Meta and sysex events pass through unchanged and leave the
    /// latched status alone, so a run of same status channel events
    /// stays compressible across them.
    pub fn write_event_compressed(&mut self, event: &TrackEvent) -> TrackResult<()> {
        if let TrackEvent::Channel(channel) = event {
            if self.running.current() == Some(channel.status()) {
                self.out.extend(channel.encode(false));
                return Ok(());
            }
        }

        self.write_event(event)
    }

    /// Bytes accumulated so far
    pub fn bytes(&self) -> &[u8] {
        &self.out
    }

    /// Number of bytes accumulated so far
    pub fn len(&self) -> usize {
        self.out.len()
    }

    /// Whether no bytes have been accumulated yet
    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    /// Consumes the session, yielding the accumulated bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.out
    }
}

/// Encodes a sequence of events into track bytes, every status byte
/// explicit.
///
/// Convenience over a [`TrackWriter`] session for callers that have
/// all their events up front and want no running status compression.
pub fn encode_events<'a, E>(events: E) -> TrackResult<Vec<u8>>
where
    E: IntoIterator<Item = &'a TrackEvent>,
{
    let mut writer = TrackWriter::new();
    for event in events {
        writer.write_event(event)?;
    }
    Ok(writer.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::{encode_events, TrackWriter};
    use crate::{
        error::TrackError,
        event::{channel::ChannelEvent, meta::MetaEvent, TrackEvent},
        reader::TrackReader,
        DeltaTime,
    };

    #[test]
    fn matching_status_is_suppressed() {
        let first: TrackEvent = ChannelEvent::new(DeltaTime::ZERO, 0x90, vec![0x3C, 0x40]).into();
        let second: TrackEvent =
            ChannelEvent::new(DeltaTime::new(96), 0x90, vec![0x3E, 0x40]).into();

        let mut writer = TrackWriter::new();
        writer.write_event_compressed(&first).unwrap();
        writer.write_event_compressed(&second).unwrap();

        assert_eq!(writer.bytes(), &[0x00, 0x90, 0x3C, 0x40, 0x60, 0x3E, 0x40]);

        // a fresh session decodes the compressed stream back intact
        let events: Result<Vec<TrackEvent>, _> = TrackReader::from_slice(writer.bytes()).collect();
        assert_eq!(events, Ok(vec![first, second]));
    }

    #[test]
    fn different_status_is_written_out() {
        let note: TrackEvent = ChannelEvent::new(DeltaTime::ZERO, 0x90, vec![0x3C, 0x40]).into();
        let bend: TrackEvent = ChannelEvent::new(DeltaTime::ZERO, 0xE0, vec![0x00, 0x40]).into();

        let mut writer = TrackWriter::new();
        writer.write_event_compressed(&note).unwrap();
        writer.write_event_compressed(&bend).unwrap();

        assert_eq!(writer.bytes(), &[0x00, 0x90, 0x3C, 0x40, 0x00, 0xE0, 0x00, 0x40]);
    }

    #[test]
    fn meta_events_do_not_break_a_run() {
        let note: TrackEvent = ChannelEvent::new(DeltaTime::ZERO, 0x90, vec![0x3C, 0x40]).into();
        let tempo: TrackEvent =
            MetaEvent::new(DeltaTime::ZERO, 0x51, vec![0x07, 0xA1, 0x20]).into();
        let again: TrackEvent = ChannelEvent::new(DeltaTime::ZERO, 0x90, vec![0x3E, 0x40]).into();

        let mut writer = TrackWriter::new();
        writer.write_event_compressed(&note).unwrap();
        writer.write_event_compressed(&tempo).unwrap();
        writer.write_event_compressed(&again).unwrap();

        assert_eq!(
            writer.bytes(),
            &[
                0x00, 0x90, 0x3C, 0x40, // explicit status
                0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20, // meta passes through
                0x00, 0x3E, 0x40, // status still latched
            ]
        );
    }

    #[test]
    fn failed_events_leave_the_bytes_alone() {
        let good: TrackEvent = ChannelEvent::new(DeltaTime::ZERO, 0xC0, vec![0x05]).into();
        let oversized: TrackEvent =
            MetaEvent::new(DeltaTime::ZERO, 0x01, vec![0u8; 0x1000_0000]).into();

        let mut writer = TrackWriter::new();
        writer.write_event(&good).unwrap();
        let before = writer.bytes().to_vec();

        assert_eq!(writer.write_event(&oversized), Err(TrackError::OverlongVlq));
        assert_eq!(writer.bytes(), &before[..]);
        assert_eq!(writer.len(), 3);
        assert!(!writer.is_empty());
    }

    #[test]
    fn plain_encoding_keeps_every_status() {
        let events: Vec<TrackEvent> = vec![
            ChannelEvent::new(DeltaTime::ZERO, 0x90, vec![0x3C, 0x40]).into(),
            ChannelEvent::new(DeltaTime::new(96), 0x90, vec![0x3E, 0x40]).into(),
        ];

        let bytes = encode_events(&events).unwrap();
        assert_eq!(bytes, vec![0x00, 0x90, 0x3C, 0x40, 0x60, 0x90, 0x3E, 0x40]);
    }
}
