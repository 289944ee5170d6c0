use criterion::{black_box, criterion_group, criterion_main, Criterion};
use led_leaderboard::core::{parse, FontMetrics, PlanOptions, Planner};
use led_leaderboard::term::fb::PixelBuffer;
use led_leaderboard::term::font;
use led_leaderboard::term::renderer::{encode_diff_into, encode_full_into};

fn feed_body(entries: usize) -> Vec<u8> {
    let rows: Vec<String> = (0..entries)
        .map(|i| format!(r#"{{"username":"user_{i:03}","points":{}}}"#, 1000 - i))
        .collect();
    format!(r#"{{"leaderboard":[{}],"month":9}}"#, rows.join(",")).into_bytes()
}

fn bench_parse(c: &mut Criterion) {
    let body = feed_body(50);

    c.bench_function("parse_50_entries", |b| {
        b.iter(|| parse(black_box(&body)))
    });
}

fn bench_plan(c: &mut Criterion) {
    let snapshot = parse(&feed_body(50)).unwrap_or_default();
    let planner = Planner::new(PlanOptions::default(), FontMetrics::FIVE_BY_SEVEN);

    c.bench_function("plan_top_10", |b| {
        b.iter(|| planner.plan(black_box(&snapshot)))
    });
}

fn bench_raster(c: &mut Criterion) {
    let snapshot = parse(&feed_body(10)).unwrap_or_default();
    let planner = Planner::new(PlanOptions::default(), FontMetrics::FIVE_BY_SEVEN);
    let plan = planner.plan(&snapshot);
    let mut fb = PixelBuffer::new(128, 128);

    c.bench_function("raster_frame", |b| {
        b.iter(|| {
            fb.clear();
            for line in &plan {
                font::draw_text(&mut fb, line.x, line.y, line.color, &line.text);
            }
        })
    });
}

fn bench_encode(c: &mut Criterion) {
    let snapshot = parse(&feed_body(10)).unwrap_or_default();
    let planner = Planner::new(PlanOptions::default(), FontMetrics::FIVE_BY_SEVEN);
    let blank = PixelBuffer::new(128, 128);
    let mut frame = PixelBuffer::new(128, 128);
    for line in planner.plan(&snapshot) {
        font::draw_text(&mut frame, line.x, line.y, line.color, &line.text);
    }
    let mut out = Vec::with_capacity(64 * 1024);

    c.bench_function("encode_full_frame", |b| {
        b.iter(|| {
            out.clear();
            let _ = encode_full_into(black_box(&frame), &mut out);
        })
    });

    c.bench_function("encode_diff_from_blank", |b| {
        b.iter(|| {
            out.clear();
            let _ = encode_diff_into(black_box(&blank), black_box(&frame), &mut out);
        })
    });
}

criterion_group!(benches, bench_parse, bench_plan, bench_raster, bench_encode);
criterion_main!(benches);
