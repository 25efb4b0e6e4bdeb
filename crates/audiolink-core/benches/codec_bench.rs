//! Criterion benchmarks for the Audiolink JSON codec.
//!
//! Measures encode and decode+validate latency for each message type. The
//! codec sits on the hot path of every plugin↔service exchange, so a
//! regression here shows up directly as playback-coordination lag.
//!
//! Run with:
//! ```bash
//! cargo bench --package audiolink-core --bench codec_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use audiolink_core::{
    decode_message, encode_message, AudioCommand, AudioCommandMessage, AudioListMessage,
    AudioMessage, AudioTrackMessage, AudiolinkMessage, Identifier, ListAction, Range,
};
use uuid::Uuid;

// ── Message fixtures ──────────────────────────────────────────────────────────

fn identifier(s: &str) -> Identifier {
    Identifier::new(s).unwrap()
}

fn make_audio() -> AudiolinkMessage {
    AudiolinkMessage::Audio(
        AudioMessage::builder(Some(Uuid::new_v4()))
            .audios([
                identifier("cave-drips"),
                identifier("wind-howl"),
                identifier("distant-thunder"),
            ])
            .track(identifier("ambience"))
            .delay_range(Range::new(2, 7))
            .build(),
    )
}

fn make_command() -> AudiolinkMessage {
    AudiolinkMessage::Command(AudioCommandMessage::new(
        Some(Uuid::new_v4()),
        AudioCommand::Mute,
    ))
}

fn make_list() -> AudiolinkMessage {
    AudiolinkMessage::List(AudioListMessage::new(ListAction::Replace, ["old-id", "new-id"]).unwrap())
}

fn make_track() -> AudiolinkMessage {
    AudiolinkMessage::Track(
        AudioTrackMessage::builder(Some(Uuid::new_v4()), identifier("night"))
            .repeating()
            .fading()
            .build(),
    )
}

fn fixtures() -> Vec<(&'static str, AudiolinkMessage)> {
    vec![
        ("audio", make_audio()),
        ("audio-command", make_command()),
        ("audio-list", make_list()),
        ("audio-track", make_track()),
    ]
}

// ── Benchmarks ────────────────────────────────────────────────────────────────

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    for (name, message) in fixtures() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &message, |b, message| {
            b.iter(|| encode_message(black_box(message)).unwrap());
        });
    }
    group.finish();
}

fn bench_decode_and_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_validate");
    for (name, message) in fixtures() {
        let frame = encode_message(&message).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &frame, |b, frame| {
            b.iter(|| {
                decode_message(black_box(frame))
                    .unwrap()
                    .validate()
                    .unwrap()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode_and_validate);
criterion_main!(benches);
