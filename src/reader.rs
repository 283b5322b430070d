//! Byte sourcing and the decoding session
//!
//! [`TrackReadable`] turns in memory byte spans or file paths into the
//! iterators the codecs consume, [`TrackSource`] wraps such an
//! iterator with the single byte of pushback the channel codec needs,
//! and [`TrackReader`] drives whole decoding sessions, carrying the
//! running status from one event to the next.

use std::{
    convert::Infallible,
    fs::File,
    io::{BufReader, Read},
    iter::Copied,
    path::Path,
    slice::Iter,
};

use crate::{
    error::{TrackError, TrackResult},
    event::TrackEvent,
    status::RunningStatus,
};

/// Trait that allows different types to serve as a track byte stream
pub trait TrackReadable {
    /// Error type producing the byte iterator may return
    type Error;
    /// Creates a byte iterator from the type
    fn track_bytes(self) -> Result<impl Iterator<Item = u8>, Self::Error>;
}

/// Wrapper struct to allow passing Vec<u8> to the TrackReadable trait
pub struct TrackData(pub Vec<u8>);

impl TrackReadable for TrackData {
    type Error = Infallible;
    fn track_bytes(self) -> Result<impl Iterator<Item = u8>, Self::Error> {
        Ok(self.0.into_iter())
    }
}

impl<PATH> TrackReadable for PATH
where
    PATH: AsRef<Path>,
{
    type Error = std::io::Error;
    fn track_bytes(self) -> Result<impl Iterator<Item = u8>, Self::Error> {
        let path = self.as_ref();
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(reader.bytes().filter_map(Result::ok))
    }
}

/// Byte iterator with one byte of pushback.
///
/// The channel codec classifies its lead byte before knowing whether
/// that byte is a status byte or the first data byte;
/// [`unread`](TrackSource::unread) lets it hand the byte back for the
/// next read.
#[derive(Debug)]
pub struct TrackSource<I>
where
    I: Iterator<Item = u8>,
{
    /// Underlying byte iterator
    bytes: I,
    /// Byte handed back by [`TrackSource::unread`], served before the
    /// iterator
    unread: Option<u8>,
}

impl<I> TrackSource<I>
where
    I: Iterator<Item = u8>,
{
    /// Wraps a byte iterator
    pub fn new(bytes: I) -> Self {
        Self {
            bytes,
            unread: None,
        }
    }

    /// Next byte, the pushback slot first
    pub fn read_byte(&mut self) -> Option<u8> {
        self.unread.take().or_else(|| self.bytes.next())
    }

    /// Exactly `n` bytes, or [`TrackError::TruncatedInput`] if the
    /// source ends first
    pub fn read_exact(&mut self, n: usize) -> TrackResult<Vec<u8>> {
        let mut bytes = Vec::with_capacity(n);
        for _ in 0..n {
            bytes.push(self.read_byte().ok_or(TrackError::TruncatedInput)?);
        }
        Ok(bytes)
    }

    /// Hands a byte back to be served by the next read.
    ///
    /// Only one byte can be held at a time; the slot must be empty.
    pub fn unread(&mut self, byte: u8) {
        debug_assert!(self.unread.is_none());
        self.unread = Some(byte);
    }

    /// Next byte without consuming it
    pub fn peek(&mut self) -> Option<u8> {
        if self.unread.is_none() {
            self.unread = self.bytes.next();
        }
        self.unread
    }
}

/// Decoding session over a track byte stream.
///
/// Owns the byte source and the running status tracker, so channel
/// events that lean on an earlier status byte resolve correctly as
/// long as they are read through the same reader.
#[derive(Debug)]
pub struct TrackReader<I>
where
    I: Iterator<Item = u8>,
{
    /// Byte source the codecs pull from
    source: TrackSource<I>,
    /// Running status carried across events
    running: RunningStatus,
}

impl<I> TrackReader<I>
where
    I: Iterator<Item = u8>,
{
    /// Creates a session over a byte iterator
    pub fn new(bytes: I) -> Self {
        Self {
            source: TrackSource::new(bytes),
            running: RunningStatus::new(),
        }
    }

    /// Decodes the next event, or `None` when the stream ends cleanly
    /// at an event boundary
    pub fn read_event(&mut self) -> TrackResult<Option<TrackEvent>> {
        TrackEvent::decode(&mut self.source, &mut self.running)
    }

    /// Currently latched running status
    pub const fn running_status(&self) -> Option<u8> {
        self.running.current()
    }
}

impl<'a> TrackReader<Copied<Iter<'a, u8>>> {
    /// Creates a session over a borrowed byte slice
    pub fn from_slice(bytes: &'a [u8]) -> Self {
        Self::new(bytes.iter().copied())
    }
}

impl<I> Iterator for TrackReader<I>
where
    I: Iterator<Item = u8>,
{
    type Item = TrackResult<TrackEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_event().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::{TrackData, TrackReadable, TrackReader, TrackSource};
    use crate::{
        error::TrackError,
        event::{channel::ChannelEvent, meta::MetaEvent, TrackEvent},
        DeltaTime,
    };

    #[test]
    fn pushback_is_served_before_the_iterator() {
        let mut src = TrackSource::new(vec![0x01, 0x02].into_iter());

        assert_eq!(src.read_byte(), Some(0x01));
        src.unread(0x01);
        assert_eq!(src.read_byte(), Some(0x01));
        assert_eq!(src.read_byte(), Some(0x02));
        assert_eq!(src.read_byte(), None);
    }

    #[test]
    fn peek_does_not_consume() {
        let mut src = TrackSource::new(vec![0x42].into_iter());

        assert_eq!(src.peek(), Some(0x42));
        assert_eq!(src.peek(), Some(0x42));
        assert_eq!(src.read_byte(), Some(0x42));
        assert_eq!(src.peek(), None);
    }

    #[test]
    fn read_exact_reports_shortfalls() {
        let mut src = TrackSource::new(vec![0x01, 0x02].into_iter());

        assert_eq!(src.read_exact(0), Ok(Vec::new()));
        assert_eq!(src.read_exact(2), Ok(vec![0x01, 0x02]));
        assert_eq!(src.read_exact(1), Err(TrackError::TruncatedInput));
    }

    #[test]
    fn byte_spans_stream() {
        let data = TrackData(vec![0x00, 0xFF, 0x2F, 0x00]);
        let bytes = data.track_bytes();

        assert!(bytes.is_ok());

        let mut reader = TrackReader::new(bytes.unwrap());
        assert_eq!(
            reader.read_event(),
            Ok(Some(MetaEvent::new(DeltaTime::ZERO, 0x2F, Vec::new()).into()))
        );
        assert_eq!(reader.read_event(), Ok(None));
    }

    #[test]
    fn paths_stream() {
        let path = std::env::temp_dir().join(format!("mtrk-reader-{}.bin", std::process::id()));
        std::fs::write(&path, [0x00u8, 0xC0, 0x05]).unwrap();

        let bytes = (&path).track_bytes().unwrap();
        let mut reader = TrackReader::new(bytes);

        assert_eq!(
            reader.read_event(),
            Ok(Some(ChannelEvent::new(DeltaTime::ZERO, 0xC0, vec![0x05]).into()))
        );

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn sessions_carry_running_status() {
        // explicit note on, then a status-less note leaning on it
        let bytes = [0x00, 0x90, 0x3C, 0x40, 0x60, 0x3E, 0x40];
        let mut reader = TrackReader::from_slice(&bytes);

        assert_eq!(reader.running_status(), None);

        let first = reader.read_event().unwrap().unwrap();
        assert_eq!(first, ChannelEvent::new(DeltaTime::ZERO, 0x90, vec![0x3C, 0x40]).into());
        assert_eq!(reader.running_status(), Some(0x90));

        let second = reader.read_event().unwrap().unwrap();
        assert_eq!(second, ChannelEvent::new(DeltaTime::new(96), 0x90, vec![0x3E, 0x40]).into());

        assert_eq!(reader.read_event(), Ok(None));
    }

    #[test]
    fn readers_iterate() {
        let bytes = [0x00, 0xC0, 0x05, 0x00, 0xFF, 0x2F, 0x00];
        let events: Result<Vec<TrackEvent>, _> = TrackReader::from_slice(&bytes).collect();

        let events = events.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], ChannelEvent::new(DeltaTime::ZERO, 0xC0, vec![0x05]).into());
    }
}
