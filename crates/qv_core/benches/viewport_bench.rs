//! 视口与宽高比计算基准测试
//!
//! 运行: `cargo bench -p qv_core --bench viewport_bench`

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qv_core::aspect::aspect_ratios_for_modes;
use qv_core::{AspectRatio, DisplayMode, RefreshRate, ViewportSet, compute_adjusted_viewport};

/// 测试不同宽高比组合下的视口计算
fn bench_adjusted_viewport(c: &mut Criterion) {
    let mut group = c.benchmark_group("Adjusted Viewport");

    for (name, content, display) in [
        ("letterbox", 16.0f32 / 9.0, 4.0f32 / 3.0),
        ("pillarbox", 4.0 / 3.0, 16.0 / 9.0),
        ("equal", 16.0 / 9.0, 16.0 / 9.0),
    ] {
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &(content, display),
            |b, &(content, display)| {
                b.iter(|| {
                    compute_adjusted_viewport(
                        black_box(1920.0),
                        black_box(1080.0),
                        black_box(content),
                        black_box(display),
                    )
                });
            },
        );
    }

    group.bench_function("ViewportSet", |b| {
        b.iter(|| ViewportSet::new(black_box(2560), black_box(1440), 16.0 / 9.0, 4.0 / 3.0));
    });

    group.finish();
}

/// 测试宽高比约分与描述
fn bench_aspect_ratio(c: &mut Criterion) {
    let mut group = c.benchmark_group("Aspect Ratio");

    group.bench_function("reduce", |b| {
        b.iter(|| AspectRatio::new(black_box(1600), black_box(1024)));
    });

    group.bench_function("describe", |b| {
        let ratio = AspectRatio::new(1600, 1024);
        b.iter(|| black_box(ratio).to_string());
    });

    // 模拟一块显示器的模式列表（多个刷新率重复同一分辨率）
    for mode_count in [16usize, 64, 256] {
        let resolutions = [
            (800, 600),
            (1024, 768),
            (1280, 720),
            (1280, 1024),
            (1600, 1024),
            (1920, 1080),
            (1920, 1200),
            (2560, 1440),
        ];
        let modes: Vec<DisplayMode> = (0..mode_count)
            .map(|i| {
                let (w, h) = resolutions[i % resolutions.len()];
                DisplayMode {
                    refresh_rate: RefreshRate::new(60 + i as u32, 1),
                    ..DisplayMode::windowed(w, h)
                }
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::new("list", mode_count),
            &modes,
            |b, modes| {
                b.iter(|| aspect_ratios_for_modes(black_box(modes)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_adjusted_viewport, bench_aspect_ratio);
criterion_main!(benches);
