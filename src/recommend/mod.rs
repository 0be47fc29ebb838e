pub mod scoring;
pub mod taste;

pub use scoring::{rank, recommend_for, HitEntry, Hits};
pub use taste::{aggregate, recommend_from_likes};
