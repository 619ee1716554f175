use gfa_graph::optfields::*;
use gfa_graph::parser::*;
use gfa_graph::{Graph, GraphConfig};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

/// A chain of `len` segments joined by 2M overlaps, as GFA text.
fn chain_gfa(len: usize) -> Vec<Vec<u8>> {
    let mut lines = vec![b"H\tVN:Z:1.0".to_vec()];
    for i in 0..len {
        lines.push(format!("S\ts{}\tACGTACGTAC\tKC:i:{}", i, 10 * i).into_bytes());
    }
    for i in 1..len {
        lines.push(format!("L\ts{}\t+\ts{}\t+\t2M", i - 1, i).into_bytes());
    }
    lines
}

fn build_graph<T: OptFields>(input: &[Vec<u8>]) -> Graph<T> {
    let parser: GFAParser<T> = GFAParser::new();
    let lines = parser.parse_lines(input.iter().map(|v| v.as_slice())).unwrap();
    Graph::from_lines(GraphConfig::strict(), lines).unwrap()
}

fn multiply_all(graph: &mut Graph<OptionalFields>, len: usize) {
    for i in 0..len {
        let name = format!("s{}", i);
        let copy = format!("s{}_copy", i);
        graph.multiply_segment(name.as_bytes(), &[copy]).unwrap();
    }
}

fn merge_chain(graph: &mut Graph<OptionalFields>, len: usize) {
    let last = format!("s{}", len - 1);
    graph.merge_unbranched_segpath(b"s0", last.as_bytes()).unwrap();
}

macro_rules! bench_chain {
    ($name:ident, $id:literal, $op:ident) => {
        fn $name(c: &mut Criterion) {
            for len in [100usize, 1000].iter() {
                let input = chain_gfa(*len);
                let graph: Graph<OptionalFields> = build_graph(&input);
                c.bench_with_input(BenchmarkId::new($id, len), len, |b, &l| {
                    b.iter_batched(
                        || graph.clone(),
                        |mut g| $op(&mut g, l),
                        criterion::BatchSize::LargeInput,
                    );
                });
            }
        }
    };
}

fn build_chain(c: &mut Criterion) {
    for len in [100usize, 1000].iter() {
        let input = chain_gfa(*len);
        c.bench_with_input(BenchmarkId::new("build", len), &input, |b, i| {
            b.iter(|| build_graph::<OptionalFields>(i));
        });
    }
}

bench_chain!(multiply_chain, "multiply", multiply_all);
bench_chain!(merge_whole_chain, "merge", merge_chain);

criterion_group!(
    name = graph_benches;
    config = Criterion::default().sample_size(25);
    targets = build_chain, multiply_chain, merge_whole_chain
);

criterion_main!(graph_benches);
