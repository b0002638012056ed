use std::fmt;

use serde::{Deserialize, Serialize};

/// The four recommendation kinds. Every saved item belongs to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "list_category", rename_all = "lowercase")]
pub enum Category {
    #[serde(alias = "songs")]
    Song,
    #[serde(alias = "movies")]
    Movie,
    #[serde(alias = "books")]
    Book,
    #[serde(alias = "sports", alias = "match", alias = "matches")]
    Sport,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Song,
        Category::Movie,
        Category::Book,
        Category::Sport,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Category::Song => "song",
            Category::Movie => "movie",
            Category::Book => "book",
            Category::Sport => "sport",
        }
    }

    /// Per-user collection name used by the front-end.
    pub fn collection(self) -> &'static str {
        match self {
            Category::Song => "songs",
            Category::Movie => "movies",
            Category::Book => "books",
            Category::Sport => "sports",
        }
    }

    /// Verb used when scheduling ("Listen on", "Watch on", ...).
    pub fn schedule_verb(self) -> &'static str {
        match self {
            Category::Song => "Listen",
            Category::Movie | Category::Sport => "Watch",
            Category::Book => "Read",
        }
    }

    /// Guidance returned instead of calling the generator for a blank query.
    pub fn empty_query_message(self) -> &'static str {
        match self {
            Category::Song => {
                "Please provide a mood, genre, or activity to get music recommendations."
            }
            Category::Movie => {
                "Please provide a genre, vibe, or situation to get movie recommendations."
            }
            Category::Book => {
                "Please provide a genre, theme, or emotion to get book recommendations."
            }
            Category::Sport => "Please provide a sport or tournament to get match recommendations.",
        }
    }

    /// Shown when a bulk generation call answers without any text.
    pub fn empty_bulk_message(self) -> &'static str {
        match self {
            Category::Song => "No playlist generated.",
            Category::Movie => "No movies generated.",
            Category::Book => "No books generated.",
            Category::Sport => "No matches generated.",
        }
    }

    /// Playlist, new releases, new books, upcoming matches.
    pub fn default_bulk_count(self) -> u32 {
        match self {
            Category::Song => 20,
            Category::Movie => 10,
            Category::Book => 5,
            Category::Sport => 15,
        }
    }

    /// Only sports matches carry a notification flag.
    pub fn supports_notification(self) -> bool {
        matches!(self, Category::Sport)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}
