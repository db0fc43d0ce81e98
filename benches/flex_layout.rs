use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use weft_bin::flexbox::style::{FlexDirection, FlexPack, Length};
use weft_bin::flexbox::{layout_flex_container, ContainerStyle, FixedSizeBox, FlexItemStyle};
use weft_bin::shared::config::LayoutConfig;
use weft_bin::shared::types::Size;

fn children(count: usize) -> Vec<FixedSizeBox> {
    (0..count)
        .map(|idx| {
            let mut style = FlexItemStyle {
                flex_positive: (idx % 3) as f32,
                order: (idx % 5) as i32,
                ..Default::default()
            };
            // every other item hits its max width and gets pinned
            if idx % 2 == 0 {
                style.sizing.max_width = Length::Px(22.0);
            }
            FixedSizeBox::new(style, Size::new(20.0, 10.0 + (idx % 7) as f32))
        })
        .collect()
}

fn flex_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("Flex layout");
    group.significance_level(0.1).sample_size(200);

    let config = LayoutConfig::default();
    let available = Size::new(10_000.0, 10_000.0);

    for count in [10, 100, 1000] {
        let mut row = ContainerStyle {
            flex_pack: FlexPack::Justify,
            ..Default::default()
        };
        row.sizing.width = Length::Px(count as f32 * 30.0);

        let column = ContainerStyle {
            flex_direction: FlexDirection::ColumnReverse,
            ..Default::default()
        };

        let mut items = children(count);
        group.bench_with_input(BenchmarkId::new("row", count), &count, |b, _| {
            b.iter(|| layout_flex_container(black_box(&row), available, &mut items, &config))
        });
        group.bench_with_input(BenchmarkId::new("column-reverse", count), &count, |b, _| {
            b.iter(|| layout_flex_container(black_box(&column), available, &mut items, &config))
        });
    }

    group.finish();
}

criterion_group!(benches, flex_layout);
criterion_main!(benches);
