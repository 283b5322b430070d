//! Example program that decodes a track event stream held in memory

use mtrk::reader::TrackReader;

fn main() {
    // tempo, a patch, two notes (the second on running status), and
    // the end of track marker
    let bytes = [
        0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20, 0x00, 0xC0, 0x05, 0x00, 0x90, 0x3C, 0x40, 0x81,
        0x40, 0x3E, 0x40, 0x60, 0xFF, 0x2F, 0x00,
    ];

    let mut reader = TrackReader::from_slice(&bytes);

    while let Some(event) = reader.read_event().expect("Decode track event") {
        println!("{event:?}")
    }
}
