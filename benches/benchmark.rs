use std::collections::HashSet;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use tune_match::{decode, encode, rank, recommend_from_likes, CandidateMatrix, TFIDFVectorizer};

const WORDS: &[&str] = &[
    "rock", "pop", "jazz", "blues", "metal", "punk", "folk", "soul", "funk", "disco", "house", "techno",
    "ambient", "guitar", "piano", "drums", "bass", "synth", "violin", "brass", "vocal", "choir", "live",
    "acoustic", "electric", "remix", "ballad", "anthem", "groove", "swing", "lofi", "dream", "noise",
    "indie", "country", "gospel", "reggae", "latin", "trap", "drill",
];

/// Deterministic synthetic catalog
fn catalog(n: usize) -> Vec<String> {
    let mut state = 0x9E37_79B9u32;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state as usize
    };
    (0..n)
        .map(|i| {
            let mut text = format!("song{i} artist{}", i % 97);
            for _ in 0..12 {
                text.push(' ');
                text.push_str(WORDS[next() % WORDS.len()]);
            }
            text
        })
        .collect()
}

fn fit_and_rank_benchmark(c: &mut Criterion) {
    let texts = catalog(5_000);

    c.bench_function("fit_transform", |b| {
        b.iter(|| TFIDFVectorizer::default().fit_transform(&texts).unwrap());
    });

    let (_, vectors) = TFIDFVectorizer::default().fit_transform(&texts).unwrap();
    let encoded: Vec<(u64, Vec<u8>)> = vectors
        .iter()
        .enumerate()
        .map(|(i, v)| (i as u64 + 1, encode(v).unwrap()))
        .collect();

    c.bench_function("load_matrix", |b| {
        b.iter(|| CandidateMatrix::from_encoded(encoded.iter().map(|(id, bytes)| (*id, bytes)), Default::default()).unwrap());
    });

    c.bench_function("decode", |b| {
        b.iter(|| decode(&encoded[0].1).unwrap());
    });

    let matrix = CandidateMatrix::from_rows(vectors.iter().cloned().enumerate().map(|(i, v)| (i as u64 + 1, v))).unwrap();
    let exclude: HashSet<u64> = [1].into_iter().collect();
    let mut group = c.benchmark_group("rank");
    for top_n in [1usize, 10, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(top_n), &top_n, |b, &top_n| {
            b.iter(|| rank(&vectors[0], &matrix, &exclude, top_n).unwrap());
        });
    }
    group.finish();

    c.bench_function("recommend_from_likes", |b| {
        b.iter(|| recommend_from_likes(&[1, 2, 3], &matrix, 10).unwrap());
    });
}

criterion_group!(benches, fit_and_rank_benchmark);
criterion_main!(benches);
