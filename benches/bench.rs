use criterion::{black_box, criterion_group, criterion_main, Criterion};
use uri_span::{encoding::decode_in_place, Uri};

criterion_group!(benches, bench_parse, bench_parse_v6, bench_decode);
criterion_main!(benches);

const PARSE_CASE: &str = "https://user@example.com/search?q=%E6%B5%8B%E8%AF%95#fragment";
const PARSE_V6_CASE: &str = "ldap://[2001:db8::ffff:192.0.2.1]:389/c=GB";
const DECODE_CASE: &[u8] = b"q=%E6%B5%8B%E8%AF%95&lang=%65%6e";

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse", |b| b.iter(|| Uri::parse(black_box(PARSE_CASE))));
}

fn bench_parse_v6(c: &mut Criterion) {
    c.bench_function("parse_v6", |b| {
        b.iter(|| Uri::parse(black_box(PARSE_V6_CASE)))
    });
}

fn bench_decode(c: &mut Criterion) {
    let mut buf = [0; DECODE_CASE.len()];
    c.bench_function("decode_in_place", |b| {
        b.iter(|| {
            buf.copy_from_slice(DECODE_CASE);
            decode_in_place(black_box(&mut buf))
        })
    });
}
