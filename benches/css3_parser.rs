use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use weft_bin::css3::Css3;
use weft_bin::shared::config::ParserConfig;

/// A stylesheet with a mix of the constructs found on real sites
fn stylesheet(copies: usize) -> String {
    let block = r#"
@media screen and (min-width: 640px) {
  .nav > li + li, .nav a:hover:not(.active) { margin: 0 auto; padding: 4px 8px }
}
body { font: 14px / 1.4 "Helvetica Neue", Arial, sans-serif; color: #333 }
ul li:nth-child(2n+1)::before { content: "-"; width: calc(100% - 2 * 10px) }
a[href^="http"], a[target=_blank] { color: var(--link, #00f) !important }
@keyframes pulse { from { opacity: 0 } 50% { opacity: .5 } to { opacity: 1 } }
.broken { color: red; bogus-property: 1 2 3; width: 10px }
"#;
    block.repeat(copies)
}

fn parse_stylesheet(c: &mut Criterion) {
    let mut group = c.benchmark_group("CSS3 parser");
    group.significance_level(0.1).sample_size(100);

    let small = stylesheet(1);
    let large = stylesheet(200);

    group.bench_function("small stylesheet", |b| {
        b.iter(|| {
            let _ = Css3::parse_str(black_box(&small), ParserConfig::default());
        })
    });

    group.bench_function("large stylesheet", |b| {
        b.iter(|| {
            let _ = Css3::parse_str(black_box(&large), ParserConfig::default());
        })
    });

    group.bench_function("style attribute", |b| {
        b.iter(|| {
            let _ = Css3::parse_declaration_list_str(black_box(
                "display: flex; flex: 1 0 auto; margin: 0 auto; color: #fff",
            ));
        })
    });

    group.finish();
}

criterion_group!(benches, parse_stylesheet);
criterion_main!(benches);
