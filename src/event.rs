//! Track event composition
//!
//! A track stream is a run of events back to back, each one a delta
//! time followed by family specific bytes. [`TrackEvent`] is the sum
//! of the three families and owns the classify and dispatch step that
//! hands the byte source to the right codec.

pub mod channel;
pub mod meta;
pub mod sysex;

use channel::ChannelEvent;
use meta::MetaEvent;
use sysex::SysexEvent;

use crate::{
    error::{TrackError, TrackResult},
    reader::TrackSource,
    status::{self, EventKind, RunningStatus},
    vlq,
    DeltaTime,
};

/// Any event a track stream can hold
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackEvent {
    /// Meta event, `0xFF` on the wire
    Meta(MetaEvent),
    /// System exclusive event, `0xF0` on the wire
    Sysex(SysexEvent),
    /// Channel event, everything else
    Channel(ChannelEvent),
}

impl TrackEvent {
    /// Decodes the next event from the source, or `None` at a clean
    /// event boundary.
    ///
    /// Reads a delta time, classifies the following byte, and defers
    /// to the matching codec. A source that ends before the delta time
    /// begins is a finished stream; one that ends anywhere after is
    /// [`TrackError::TruncatedInput`].
    pub fn decode<I>(
        source: &mut TrackSource<I>,
        running: &mut RunningStatus,
    ) -> TrackResult<Option<Self>>
    where
        I: Iterator<Item = u8>,
    {
        if source.peek().is_none() {
            return Ok(None);
        }

        let (ticks, _) = vlq::decode(source)?;
        let delta_time = DeltaTime::new(ticks);

        let lead = source.read_byte().ok_or(TrackError::TruncatedInput)?;

        let event = match status::classify(lead) {
            EventKind::Meta => Self::Meta(MetaEvent::decode(delta_time, source)?),
            EventKind::Sysex => Self::Sysex(SysexEvent::decode(delta_time, source)?),
            EventKind::Channel => {
                // the channel codec wants its own look at the lead byte
                source.unread(lead);
                Self::Channel(ChannelEvent::decode(delta_time, source, running)?)
            }
        };

        Ok(Some(event))
    }

    /// Encodes the event with its status or marker byte on the wire.
    ///
    /// Status byte suppression is the writer's call, made through
    /// [`ChannelEvent::encode`] directly.
    pub fn encode(&self) -> TrackResult<Vec<u8>> {
        match self {
            Self::Meta(event) => event.encode(),
            Self::Sysex(event) => event.encode(),
            Self::Channel(event) => Ok(event.encode(true)),
        }
    }

    /// Ticks since the previous event
    pub const fn delta_time(&self) -> DeltaTime {
        match self {
            Self::Meta(event) => event.delta_time(),
            Self::Sysex(event) => event.delta_time(),
            Self::Channel(event) => event.delta_time(),
        }
    }
}

impl From<MetaEvent> for TrackEvent {
    fn from(event: MetaEvent) -> Self {
        Self::Meta(event)
    }
}

impl From<SysexEvent> for TrackEvent {
    fn from(event: SysexEvent) -> Self {
        Self::Sysex(event)
    }
}

impl From<ChannelEvent> for TrackEvent {
    fn from(event: ChannelEvent) -> Self {
        Self::Channel(event)
    }
}

#[cfg(test)]
mod tests {
    use super::{channel::ChannelEvent, meta::MetaEvent, sysex::SysexEvent, TrackEvent};
    use crate::{error::TrackError, reader::TrackSource, status::RunningStatus, DeltaTime};

    /// Wraps a byte slice in a pushback capable source
    fn source(bytes: &[u8]) -> TrackSource<std::vec::IntoIter<u8>> {
        TrackSource::new(bytes.to_vec().into_iter())
    }

    #[test]
    fn empty_source_is_a_finished_stream() {
        let mut src = source(&[]);
        let mut running = RunningStatus::new();

        assert_eq!(TrackEvent::decode(&mut src, &mut running), Ok(None));
    }

    #[test]
    fn lone_delta_time_is_truncated_input() {
        let mut src = source(&[0x81]);
        let mut running = RunningStatus::new();

        assert_eq!(
            TrackEvent::decode(&mut src, &mut running),
            Err(TrackError::TruncatedInput)
        );
    }

    #[test]
    fn marker_bytes_pick_the_codec() {
        let mut running = RunningStatus::new();

        let mut src = source(&[0x00, 0xFF, 0x2F, 0x00]);
        let event = TrackEvent::decode(&mut src, &mut running).unwrap();
        assert_eq!(event, Some(MetaEvent::new(DeltaTime::ZERO, 0x2F, Vec::new()).into()));

        let mut src = source(&[0x00, 0xF0, 0x01, 0xF7]);
        let event = TrackEvent::decode(&mut src, &mut running).unwrap();
        assert_eq!(event, Some(SysexEvent::new(DeltaTime::ZERO, Vec::new()).into()));

        let mut src = source(&[0x00, 0x90, 0x3C, 0x40]);
        let event = TrackEvent::decode(&mut src, &mut running).unwrap();
        assert_eq!(
            event,
            Some(ChannelEvent::new(DeltaTime::ZERO, 0x90, vec![0x3C, 0x40]).into())
        );
    }

    #[test]
    fn delta_time_reaches_every_family() {
        let mut running = RunningStatus::new();
        let mut src = source(&[0x81, 0x40, 0xC0, 0x05]);

        let event = TrackEvent::decode(&mut src, &mut running).unwrap().unwrap();
        assert_eq!(event.delta_time(), DeltaTime::new(192));
    }

    #[test]
    fn encoding_matches_the_family_codecs() {
        let meta: TrackEvent = MetaEvent::new(DeltaTime::ZERO, 0x51, vec![0x07, 0xA1, 0x20]).into();
        assert_eq!(meta.encode(), Ok(vec![0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20]));

        let sysex: TrackEvent = SysexEvent::new(DeltaTime::ZERO, vec![0x01, 0x02, 0x03]).into();
        assert_eq!(sysex.encode(), Ok(vec![0x00, 0xF0, 0x04, 0x01, 0x02, 0x03, 0xF7]));

        let channel: TrackEvent = ChannelEvent::new(DeltaTime::ZERO, 0x90, vec![0x3C, 0x40]).into();
        assert_eq!(channel.encode(), Ok(vec![0x00, 0x90, 0x3C, 0x40]));
    }
}
