//! Benchmarks for envelope encoding and dispatch

use std::rc::Rc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use editor_bridge::{
    Bridge, InboundMessage, LaunchOptions, OutboundMessage, RequestLedger, TranscriptCore,
};
use serde_json::json;

fn launched() -> Bridge<TranscriptCore> {
    Bridge::launch(
        TranscriptCore::new(),
        LaunchOptions::default(),
        Rc::new(RequestLedger::new()),
    )
    .expect("default options are valid")
}

fn bench_encode_edited(c: &mut Criterion) {
    c.bench_function("encode_edited", |b| {
        b.iter(|| {
            let message = OutboundMessage::edited(black_box("x"), 10, 4, 10, 4);
            black_box(message.to_value().unwrap());
        });
    });
}

fn bench_encode_telemetry(c: &mut Criterion) {
    let entries: Vec<_> = (0..16)
        .map(|i| (format!("key{i}"), json!(i)))
        .collect();
    c.bench_function("encode_telemetry", |b| {
        b.iter(|| {
            let message = OutboundMessage::telemetry("drag", black_box(entries.clone()));
            black_box(message.to_value().unwrap());
        });
    });
}

fn bench_decode_set_text(c: &mut Criterion) {
    let text = "def main():\n    print('hello')\n".repeat(200);
    let value = json!({"type": "set_text", "text": text});
    c.bench_function("decode_set_text", |b| {
        b.iter(|| {
            black_box(InboundMessage::from_value(black_box(&value)).unwrap());
        });
    });
}

fn bench_dispatch(c: &mut Criterion) {
    let messages = [
        json!({"type": "set_text", "text": "x = 1\n"}),
        json!({"type": "new_diagnostics", "diagnostics": [{"message": "unused", "severity": 2}]}),
        json!({"type": "undo"}),
        json!({"type": "format_document"}),
    ];
    c.bench_function("dispatch_mixed", |b| {
        let mut bridge = launched();
        b.iter(|| {
            for message in &messages {
                black_box(bridge.handle_value(message).unwrap());
            }
            bridge.core_mut().take_calls();
        });
    });
}

criterion_group!(
    benches,
    bench_encode_edited,
    bench_encode_telemetry,
    bench_decode_set_text,
    bench_dispatch,
);
criterion_main!(benches);
