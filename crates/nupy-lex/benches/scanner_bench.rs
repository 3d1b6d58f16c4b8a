//! Scanner throughput benchmark.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nupy_lex::{Scanner, TokenKind};
use nupy_util::Handler;

const SAMPLE: &str = "\
# compute a few squares
i = 0
total = 0
while i < 100:
    sq = i ** 2
    total = total + sq
    i = i + 1
print(total)
msg = 'done'
print(msg)
";

fn bench_scan(c: &mut Criterion) {
    let source = SAMPLE.repeat(64);

    c.bench_function("scan_sample_program", |b| {
        b.iter(|| {
            let mut handler = Handler::silent();
            let mut scanner = Scanner::new(black_box(&source), &mut handler);
            let mut count = 0usize;
            loop {
                let token = scanner.next_token();
                count += 1;
                if token.kind == TokenKind::Eos {
                    break;
                }
            }
            count
        })
    });
}

criterion_group!(benches, bench_scan);
criterion_main!(benches);
