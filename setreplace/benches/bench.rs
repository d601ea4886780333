use criterion::{criterion_group, criterion_main, Criterion};
use setreplace::scope::Problem;
use setreplace::{Config, Set};
use setreplace_parse::CmdIter;

fn set(src: &str) -> Set {
    let cmds = CmdIter::new(src).map(|cmd| cmd.unwrap());
    Problem::from_commands(cmds).unwrap().into_set(Config::default())
}

const GROWTH: &str = "
    rule {x, y}, {x, z} -> {x, z}, {x, w}, {y, w}, {z, w}.
    init {1, 1}, {1, 1}.
";

const TRIANGLES: &str = "
    rule {x, y}, {y, z}, {z, x} -> {x, y}, {y, z}, {z, w}, {w, x}.
    init {1, 2}, {2, 3}, {3, 1}.
";

const TERNARY: &str = "
    rule {x, y, y}, {y, z, u} -> {u, z, z}, {u, x, v}, {z, y, v}.
    init {1, 1, 1}, {1, 1, 1}.
";

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("parse", |b| b.iter(|| set(GROWTH)));
    c.bench_function("growth500", |b| b.iter(|| set(GROWTH).replace_n(500)));
    c.bench_function("triangles200", |b| b.iter(|| set(TRIANGLES).replace_n(200)));
    c.bench_function("ternary500", |b| b.iter(|| set(TERNARY).replace_n(500)));

    let mut grown = set(GROWTH);
    grown.replace_n(2000);
    c.bench_function("fork", |b| b.iter(|| grown.clone().replace_n(10)));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
