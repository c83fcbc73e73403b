//! Benchmarks for graph building, sampling and poem search.

use std::collections::HashSet;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;

use prosody::config::parse_scheme;
use prosody::graph::{Graph, SampleQuery};
use prosody::poem::{Poem, PoemOptions};
use prosody::tokenize::tokenize;

const CORPUS: &str = "\
The cat sat on the mat. The bat sat on the hat.
A dog ran in the fog. The frog sat on a log.
The night was long and the light was bright.
I saw the cat and the rat sat on the mat.
The dog and the frog ran to the log in the fog.
";

fn corpus_tokens() -> Vec<String> {
    tokenize(&CORPUS.repeat(20))
}

fn bench_build(c: &mut Criterion) {
    let tokens = corpus_tokens();

    c.bench_function("build_graph", |bench| {
        bench.iter(|| black_box(Graph::from_tokens(&tokens)))
    });
}

fn bench_sample(c: &mut Criterion) {
    let graph = Graph::from_tokens(&corpus_tokens());
    let node = graph.node("sat on").unwrap();
    let excluded = HashSet::new();
    let query = SampleQuery::new().exclude(&excluded);
    let mut rng = rand::rngs::StdRng::seed_from_u64(0);

    c.bench_function("sample_neighbors", |bench| {
        bench.iter(|| black_box(graph.sample_neighbors(Some(node), &query, &mut rng)))
    });
}

fn bench_generate(c: &mut Criterion) {
    let graph = Graph::from_tokens(&corpus_tokens());

    c.bench_function("generate_aabb", |bench| {
        bench.iter(|| {
            let rng = rand::rngs::StdRng::seed_from_u64(0);
            let options = PoemOptions::new(2, parse_scheme("AABB")).with_max_steps(100_000);
            let mut poem = Poem::new(&graph, options, rng).unwrap();
            black_box(poem.generate().ok())
        })
    });
}

criterion_group!(benches, bench_build, bench_sample, bench_generate);
criterion_main!(benches);
