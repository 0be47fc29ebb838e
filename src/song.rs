use serde::{Deserialize, Serialize};

/// Song metadata as delivered by the catalog.
/// Missing text fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SongRecord {
    pub item_id: u64,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
    pub tags: String,
    pub description: String,
}

impl SongRecord {
    /// Text the vectorizer sees for this song:
    /// title, artist, album, genre, tags and description joined by single spaces
    pub fn text_blob(&self) -> String {
        [
            self.title.as_str(),
            self.artist.as_str(),
            self.album.as_str(),
            self.genre.as_str(),
            self.tags.as_str(),
            self.description.as_str(),
        ]
        .join(" ")
    }

    /// `(item_id, text_blob)` corpus entry
    pub fn corpus_entry(&self) -> (u64, String) {
        (self.item_id, self.text_blob())
    }
}
