//! Example program that writes a compressed track stream to a file and
//! decodes it back through the path based byte source

use mtrk::{
    event::{channel::ChannelEvent, meta::MetaEvent, TrackEvent},
    reader::{TrackReadable, TrackReader},
    writer::TrackWriter,
    DeltaTime,
};

fn main() {
    let events: Vec<TrackEvent> = vec![
        MetaEvent::new(DeltaTime::ZERO, 0x51, vec![0x07, 0xA1, 0x20]).into(),
        ChannelEvent::new(DeltaTime::ZERO, 0x90, vec![0x3C, 0x40]).into(),
        ChannelEvent::new(DeltaTime::new(192), 0x90, vec![0x3C, 0x00]).into(),
        MetaEvent::new(DeltaTime::ZERO, 0x2F, Vec::new()).into(),
    ];

    let mut writer = TrackWriter::new();
    for event in &events {
        writer.write_event_compressed(event).expect("Encode track event");
    }

    let path = std::env::temp_dir().join("mtrk_roundtrip.bin");
    std::fs::write(&path, writer.bytes()).expect("Write track bytes to file");

    let bytes = (&path).track_bytes().expect("Stream track bytes back");
    let mut reader = TrackReader::new(bytes);

    while let Some(event) = reader.read_event().expect("Decode track event") {
        println!("{event:?}")
    }

    std::fs::remove_file(&path).expect("Remove scratch file");
}
