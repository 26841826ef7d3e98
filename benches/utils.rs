//! 工具函数性能基准测试

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use linkpad::utils::{generate_random_code, is_valid_shortcode, validate_url};

// ============== is_valid_shortcode 基准测试 ==============

fn bench_is_valid_shortcode(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/is_valid_shortcode");

    group.bench_function("valid_simple", |b| {
        b.iter(|| {
            assert!(is_valid_shortcode("abc123"));
        });
    });

    group.bench_function("valid_max_length", |b| {
        b.iter(|| {
            assert!(is_valid_shortcode("AbCdEf1234"));
        });
    });

    // 无效短码
    group.bench_function("invalid_too_short", |b| {
        b.iter(|| {
            assert!(!is_valid_shortcode("ab"));
        });
    });

    group.bench_function("invalid_special_chars", |b| {
        b.iter(|| {
            assert!(!is_valid_shortcode("ab-c_1"));
        });
    });

    group.finish();
}

// ============== generate_random_code 基准测试 ==============

fn bench_generate_random_code(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/generate_random_code");

    for length in [3, 6, 10] {
        group.bench_with_input(BenchmarkId::from_parameter(length), &length, |b, &len| {
            b.iter(|| generate_random_code(len));
        });
    }

    group.finish();
}

// ============== validate_url 基准测试 ==============

fn bench_validate_url(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/validate_url");

    let cases = [
        ("simple", "https://example.com"),
        ("with_query", "https://example.com/a/b/c?utm_source=mail&id=42#top"),
        ("padded", "   http://localhost:3000/path   "),
        ("invalid", "not a url at all"),
    ];

    for (name, url) in cases {
        group.bench_with_input(BenchmarkId::new("url", name), url, |b, url| {
            b.iter(|| validate_url(url).is_ok());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_is_valid_shortcode,
    bench_generate_random_code,
    bench_validate_url
);
criterion_main!(benches);
