use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use pymaint::analyzers::{PythonAnalyzer, SourceAnalyzer};
use pymaint::scoring::calculate_maintainability_index;
use std::hint::black_box;

fn generate_module(functions: usize) -> String {
    let mut source = String::from("\"\"\"Generated module.\"\"\"\nimport os\n\n");
    for i in 0..functions {
        source.push_str(&format!(
            "def handler_{i}(request, limit=10):\n    \
             # validate input\n    \
             if not request or limit <= 0:\n        \
             return None\n    \
             total = 0\n    \
             for item in request.items:\n        \
             if item.size > limit and item.enabled:\n            \
             total += item.size * 2\n        \
             elif item.size < 0:\n            \
             total -= 1\n    \
             return [x for x in range(total) if x % 3 == 0]\n\n"
        ));
    }
    source.push_str("class Service:\n    def run(self):\n        return os.getcwd()\n");
    source
}

fn bench_measure(c: &mut Criterion) {
    let analyzer = PythonAnalyzer::new();
    let mut group = c.benchmark_group("python_measure");

    for functions in [10, 100, 500].iter() {
        let source = generate_module(*functions);
        group.bench_with_input(
            BenchmarkId::from_parameter(functions),
            &source,
            |b, source| b.iter(|| analyzer.measure(black_box(source))),
        );
    }

    group.finish();
}

fn bench_score(c: &mut Criterion) {
    c.bench_function("maintainability_index", |b| {
        b.iter(|| {
            calculate_maintainability_index(black_box(42), black_box(18_500.0), black_box(1_250))
        })
    });
}

criterion_group!(benches, bench_measure, bench_score);
criterion_main!(benches);
