use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use iotrix::core::constants::FALLBACK_MESSAGE;
use iotrix::core::message::Exchange;
use iotrix::ui::theme::Theme;
use iotrix::ui::transcript::build_transcript_lines;

fn make_exchanges(n: usize, base: &str) -> Vec<Exchange> {
    (0..n)
        .map(|i| {
            let reply = if i % 10 == 9 { FALLBACK_MESSAGE } else { base };
            Exchange::answered(format!("question {i}: {base}"), reply)
        })
        .collect()
}

fn bench_transcript(c: &mut Criterion) {
    let base = "How do I set up port forwarding for an MQTT broker behind a NAT router \
without exposing the admin interface to the internet?";
    let theme = Theme::dark();

    for &count in &[50usize, 200usize] {
        let exchanges = make_exchanges(count, base);
        let mut group = c.benchmark_group(format!("transcript_exchanges{count}"));
        group.throughput(Throughput::Elements(count as u64));

        for &width in &[80u16, 160u16] {
            group.bench_function(BenchmarkId::new("build_lines", width), |b| {
                b.iter(|| build_transcript_lines(&exchanges, &theme, width, "● ○ ○"))
            });
        }

        group.finish();
    }
}

criterion_group!(benches, bench_transcript);
criterion_main!(benches);
