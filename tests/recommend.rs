use std::collections::HashSet;

use tune_match::{
    aggregate, decode, encode, rank, recommend_for, recommend_from_likes, CandidateMatrix, MemoryStore, Recommender,
    RecommenderConfig, SongRecord, TFIDFVectorizer, ZeroSpVec,
};

const TEXTS: [&str; 4] = ["rock guitar solo", "rock guitar solo", "jazz piano", "classical orchestra"];
const IDS: [u64; 4] = [1, 2, 3, 4];

fn scenario_matrix() -> (CandidateMatrix, Vec<ZeroSpVec<f64>>) {
    let (_, vectors) = TFIDFVectorizer::default().fit_transform(&TEXTS).unwrap();
    let matrix = CandidateMatrix::from_rows(IDS.iter().copied().zip(vectors.iter().cloned())).unwrap();
    (matrix, vectors)
}

fn catalog() -> Vec<(u64, String)> {
    let songs = [
        (11, "Neon Nights", "Glass Tiger", "synthwave retro neon driving"),
        (12, "Midnight Drive", "Glass Tiger", "synthwave retro night driving"),
        (13, "Blue in Green", "Bill Evans Trio", "jazz piano modal ballad"),
        (14, "Autumn Leaves", "Bill Evans Trio", "jazz piano standard ballad"),
        (15, "Cross Road", "Delta Slim", "blues slide guitar acoustic"),
        (16, "Muddy Water", "Delta Slim", "blues slide guitar electric"),
        (17, "Symphony No 5", "Vienna Phil", "classical orchestra symphony"),
    ];
    songs
        .iter()
        .map(|&(id, title, artist, tags)| {
            SongRecord {
                item_id: id,
                title: title.into(),
                artist: artist.into(),
                tags: tags.into(),
                ..Default::default()
            }
            .corpus_entry()
        })
        .collect()
}

#[test]
fn codec_round_trips_vectorizer_output() {
    let (_, vectors) = TFIDFVectorizer::default()
        .fit_transform(&catalog().into_iter().map(|(_, t)| t).collect::<Vec<_>>())
        .unwrap();
    for v in &vectors {
        let back = decode(&encode(v).unwrap()).unwrap();
        assert_eq!(&back, v);
        assert_eq!(back.indices(), v.indices());
        let bits = |x: &ZeroSpVec<f64>| x.values().iter().map(|f| f.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&back), bits(v));
    }
}

#[test]
fn identical_text_ranks_first_with_score_one() {
    let (matrix, _) = scenario_matrix();
    let recs = recommend_for(1, &matrix, 1).unwrap();
    assert_eq!(recs, vec![(2, 1.0)]);
}

#[test]
fn self_is_never_recommended() {
    let (matrix, _) = scenario_matrix();
    for id in IDS {
        let recs = recommend_for(id, &matrix, 10).unwrap();
        assert_eq!(recs.len(), 3);
        assert!(recs.iter().all(|(rid, _)| *rid != id));
    }
}

#[test]
fn top_n_bounds_and_ordering() {
    let (matrix, vectors) = scenario_matrix();
    let none = HashSet::new();
    for n in 0..6 {
        let recs = rank(&vectors[2], &matrix, &none, n).unwrap();
        assert_eq!(recs.len(), n.min(4));
        assert!(recs.windows(2).all(|w| w[0].1 >= w[1].1));
    }
    // item 3 first, then the zero-score rows in row order
    let ids: Vec<u64> = rank(&vectors[2], &matrix, &none, 4).unwrap().into_iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec![3, 1, 2, 4]);
    let scores = rank(&vectors[2], &matrix, &none, 4).unwrap();
    assert!(scores.iter().all(|(_, s)| (0.0..=1.0).contains(s)));
}

#[test]
fn fitting_twice_gives_identical_vectors() {
    let a = TFIDFVectorizer::new(5).fit_transform(&TEXTS).unwrap();
    let b = TFIDFVectorizer::new(5).fit_transform(&TEXTS).unwrap();
    assert_eq!(a.0, b.0);
    assert_eq!(a.1, b.1);
}

#[test]
fn aggregate_is_mean_of_rows() {
    let (matrix, vectors) = scenario_matrix();
    let profile = aggregate(&[1, 3, 4], &matrix).unwrap().unwrap();
    for col in 0..matrix.dim() {
        let mean = (vectors[0][col] + vectors[2][col] + vectors[3][col]) / 3.0;
        assert!((profile[col] - mean).abs() < 1e-15);
    }
    assert!(aggregate(&[], &matrix).unwrap().is_none());
    assert!(aggregate(&[77], &matrix).unwrap().is_none());
}

#[test]
fn likes_of_identical_items() {
    let (matrix, vectors) = scenario_matrix();
    let profile = aggregate(&[1, 2], &matrix).unwrap().unwrap();
    assert_eq!(profile, vectors[0]);

    let recs = recommend_from_likes(&[1, 2], &matrix, 10).unwrap();
    assert_eq!(recs.len(), 2);
    assert!(recs.iter().all(|(id, score)| (*id == 3 || *id == 4) && *score < 1.0));
}

#[test]
fn unknown_item_gives_empty_result() {
    let (matrix, _) = scenario_matrix();
    assert!(recommend_for(999, &matrix, 5).unwrap().is_empty());
    assert!(recommend_from_likes(&[999, 1000], &matrix, 5).unwrap().is_empty());
}

#[test]
fn max_features_caps_dimension() {
    let (model, vectors) = TFIDFVectorizer::new(3).fit_transform(&TEXTS).unwrap();
    assert_eq!(model.dim(), 3);
    assert!(vectors.iter().all(|v| v.len() == 3));
    let mut vocab: Vec<&str> = model.vocabulary().collect();
    vocab.sort_unstable();
    assert_eq!(vocab, vec!["guitar", "rock", "solo"]);
}

#[test]
fn recommender_over_catalog() {
    let mut rec = Recommender::new(MemoryStore::new(), RecommenderConfig::default());
    let report = rec.ingest(&catalog()).unwrap();
    assert_eq!(report.items, 7);

    let recs = rec.recommend(13, 3).unwrap();
    assert_eq!(recs.len(), 3);
    assert_eq!(recs[0].0, 14);

    let recs = rec.recommend_from_likes(&[15, 11], 10).unwrap();
    assert_eq!(recs.len(), 5);
    assert!(recs.iter().all(|(id, _)| *id != 15 && *id != 11));
    let top_two: HashSet<u64> = recs[..2].iter().map(|(id, _)| *id).collect();
    assert_eq!(top_two, [12, 16].into_iter().collect());

    // free-text query through the fitted model
    let query = report.model.transform("late night jazz piano");
    let matrix = rec.load_matrix().unwrap().unwrap();
    let hits = rank(&query, &matrix, &HashSet::new(), 2).unwrap();
    let ids: HashSet<u64> = hits.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, [13, 14].into_iter().collect());
}
