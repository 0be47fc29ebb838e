use std::{env, fs, process, time::Instant};

use tracing_subscriber::EnvFilter;
use tune_match::{Hits, HitEntry, MemoryStore, Recommender, RecommenderConfig};

const USAGE: &str = "usage: tune-match <corpus.tsv> <item_id> [n]\n       tune-match <corpus.tsv> --likes <id,id,...> [n]";

/// Parse `item_id<TAB>text` lines; blank lines and `#` comments are skipped
fn read_corpus(path: &str) -> Result<Vec<(u64, String)>, String> {
    let raw = fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}"))?;
    let mut corpus = Vec::new();
    for (lineno, line) in raw.lines().enumerate() {
        let line = line.trim_end();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (id, text) = line
            .split_once('\t')
            .ok_or_else(|| format!("{path}:{}: expected item_id<TAB>text", lineno + 1))?;
        let id: u64 = id
            .trim()
            .parse()
            .map_err(|_| format!("{path}:{}: bad item id {id:?}", lineno + 1))?;
        corpus.push((id, text.to_string()));
    }
    Ok(corpus)
}

fn parse_ids(list: &str) -> Result<Vec<u64>, String> {
    list.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.trim().parse().map_err(|_| format!("bad item id {s:?}")))
        .collect()
}

fn parse_n(arg: Option<&String>, default: usize) -> Result<usize, String> {
    match arg {
        Some(n) => n.parse().map_err(|_| format!("bad result count {n:?}")),
        None => Ok(default),
    }
}

fn run(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let config = RecommenderConfig::from_env()?;
    let path = args.get(1).ok_or(USAGE)?;
    let corpus = read_corpus(path)?;

    let mut recommender = Recommender::new(MemoryStore::new(), config);
    let start = Instant::now();
    let report = recommender.ingest(&corpus)?;
    println!(
        "ingested {} items, vocabulary {} ({:?})",
        report.items,
        report.vocabulary_size,
        start.elapsed()
    );

    let start = Instant::now();
    let recs = match args.get(2).map(String::as_str) {
        Some("--likes") => {
            let likes = parse_ids(args.get(3).ok_or(USAGE)?)?;
            let n = parse_n(args.get(4), recommender.config().likes_top_n)?;
            recommender.recommend_from_likes(&likes, n)?
        }
        Some(id) => {
            let id: u64 = id.parse().map_err(|_| format!("bad item id {id:?}"))?;
            let n = parse_n(args.get(3), recommender.config().default_top_n)?;
            recommender.recommend(id, n)?
        }
        None => return Err(USAGE.into()),
    };

    if recs.is_empty() {
        println!("no recommendations (unknown item?)");
    } else {
        let hits = Hits::new(recs.into_iter().map(|(id, score)| HitEntry { id, score }).collect());
        print!("{hits}");
    }
    println!("query took {:?}", start.elapsed());
    Ok(())
}

fn main() {
    // LOG_LEVEL mirrors RUST_LOG; RUST_LOG wins when both are set
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string())))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = env::args().collect();
    if let Err(e) = run(&args) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
