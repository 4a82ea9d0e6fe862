// Copyright (c) 2026 Bountyy Oy. All rights reserved.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use deepracer_control::dom::{parse_html, Selector};
use deepracer_control::vehicle::extract_csrf_token;

const START_PAGE: &str = r#"
    <!DOCTYPE html>
    <html>
    <head>
        <title>AWS DeepRacer</title>
        <meta charset="utf-8">
        <meta name="viewport" content="width=device-width, initial-scale=1">
        <meta name="csrf-token" content="IjA1ZDg0ZmM5ZDY0YjA0.YQ2h3g.Jq3u1d9y">
        <link rel="stylesheet" href="/static/css/main.css">
    </head>
    <body>
        <div id="root">
            <form action="/login" method="post">
                <input type="password" name="password">
                <input type="submit" value="Access vehicle">
            </form>
        </div>
        <script src="/static/js/main.js"></script>
    </body>
    </html>
"#;

fn html_parsing_benchmark(c: &mut Criterion) {
    c.bench_function("parse_html", |b| {
        b.iter(|| parse_html(black_box(START_PAGE)))
    });
}

fn csrf_extraction_benchmark(c: &mut Criterion) {
    c.bench_function("extract_csrf_token", |b| {
        b.iter(|| extract_csrf_token(black_box(START_PAGE)))
    });

    let doc = parse_html(START_PAGE).unwrap();
    let selector = Selector::parse(r#"meta[name="csrf-token"]"#).unwrap();
    c.bench_function("match_meta_selector", |b| {
        b.iter(|| {
            doc.elements()
                .iter()
                .find(|el| selector.matches(black_box(el)))
                .is_some()
        })
    });
}

criterion_group!(benches, html_parsing_benchmark, csrf_extraction_benchmark);
criterion_main!(benches);
