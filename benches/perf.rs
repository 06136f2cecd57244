use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use baccarat_terminal::display::{DisplayView, render_history, render_prediction};
use baccarat_terminal::outcome::Outcome;
use baccarat_terminal::predictor_api::parse_action_response_json;

fn long_history(len: usize) -> Vec<Outcome> {
    (0..len).map(|i| Outcome::ALL[(i * 7 + i / 3) % 3]).collect()
}

fn response_json(history: &[Outcome]) -> String {
    serde_json::json!({
        "success": true,
        "history": history,
        "prediction": "B",
        "opposite": "P",
        "confidence": 0.64,
    })
    .to_string()
}

fn bench_render(c: &mut Criterion) {
    let history = long_history(80);
    let mut view = DisplayView::new();

    c.bench_function("render_history_80", |b| {
        b.iter(|| render_history(black_box(&mut view), black_box(&history)))
    });

    c.bench_function("render_prediction", |b| {
        b.iter(|| {
            render_prediction(
                black_box(&mut view),
                Outcome::Banker,
                Outcome::Player,
                black_box(0.71),
            )
        })
    });
}

fn bench_parse(c: &mut Criterion) {
    let raw = response_json(&long_history(80));
    c.bench_function("parse_action_response_80", |b| {
        b.iter(|| parse_action_response_json(black_box(&raw)).expect("valid json"))
    });
}

criterion_group!(benches, bench_render, bench_parse);
criterion_main!(benches);
