// Prompt templates for the recommendation assistants.
// Placeholders are substituted with `str::replace` before sending.

use chrono::{Datelike, NaiveDate};

use crate::llm_client::prompts::{numbered_list_instruction, INTRO_LINE_INSTRUCTION};
use crate::recommendations::category::Category;

const SONG_EXAMPLE: &str = "1. **Song Name** by Artist (Year) - Brief description - \
    [Spotify Link](https://open.spotify.com/search/[song]%20[artist])";
const MOVIE_EXAMPLE: &str =
    "1. **Title** (Year) - Brief summary - [IMDb Link](https://www.imdb.com/find?q=[title])";
const BOOK_EXAMPLE: &str = "1. **Book Title** by Author (Year) - Brief summary - \
    [Goodreads Link](https://www.goodreads.com/search?q=[book title])";
const SPORT_EXAMPLE: &str = "1. **Match/Tournament Name** - Date/Location - Brief description - \
    [ESPN Link](https://www.espn.com/search/results?q=[match name])";

const SONG_QUERY_TEMPLATE: &str = r#"You are a professional music curator. Recommend 8-10 songs for: "{query}"

{format}

{intro}
End with a brief tip about when to listen (e.g., "Perfect for morning workouts!" or "Great for late-night studying").

User request: {query}"#;

const MOVIE_QUERY_TEMPLATE: &str = r#"You are a professional film critic. Recommend 8-10 movies/TV shows for: "{query}"

{format}

{intro}
Include one hidden gem recommendation.
End with a brief suggestion about when to watch (e.g., "Perfect for a cozy weekend!" or "Great for date night!").

User request: {query}"#;

const BOOK_QUERY_TEMPLATE: &str = r#"You are a professional literary curator. Recommend 8-10 books for: "{query}"

{format}

{intro}
Include one must-read classic.
End with a brief suggestion about when to read (e.g., "Perfect for vacation reading!" or "Great for daily commute!").

User request: {query}"#;

const SPORT_QUERY_TEMPLATE: &str = r#"You are a professional sports analyst. Recommend ONLY UPCOMING/FUTURE matches and tournaments for: "{query}"

CRITICAL DATE FILTER: Today's date is {today}.
- ONLY include matches scheduled for dates AFTER {today}
- Do NOT include any matches from past dates
- Focus on matches happening in the next 1-6 months ({year} and early {next_year})

{format}

Include:
- ONLY future matches with dates after {today}
- Dates and venues
- Key teams/players to watch
- Brief highlights about why it's worth watching

{intro}
End with a brief suggestion about where to watch (e.g., "Catch these on ESPN!" or "Available on streaming platforms!").

User request: {query}"#;

const PLAYLIST_TEMPLATE: &str = r#"Generate a curated playlist of exactly {count} diverse songs.

{format}

Include: Mix of genres, new releases and classics, different moods/tempos.
Start with: "Here's your curated playlist of {count} amazing songs!""#;

const NEW_MOVIES_TEMPLATE: &str = r#"Generate exactly {count} recently released movies ({prev_year}-{year}).

{format}

Include: Latest theatrical releases, streaming originals, acclaimed films, variety of genres.
Start with: "Here are {count} must-watch new releases!""#;

const NEW_BOOKS_TEMPLATE: &str = r#"Generate exactly {count} recently released books ({prev_year}-{year}).

{format}

Include: Latest fiction, bestselling authors, award-winners, variety of genres.
Start with: "Here are {count} captivating new books to read!""#;

const UPCOMING_MATCHES_TEMPLATE: &str = r#"Generate exactly {count} UPCOMING/FUTURE sports matches and tournaments across different sports.

CRITICAL DATE FILTER: Today's date is {today}.
- ONLY include matches scheduled for dates AFTER {today}
- Do NOT include matches from past months or years
- Only show matches from {today} onwards ({year} and {next_year})

{format}

Include:
- Cricket, football, basketball, tennis and other major sports with upcoming matches
- Mix of dates and locations (all dates must be future)
- Key teams/players

Start with: "Here are {count} exciting upcoming sports matches to watch!""#;

fn example_for(category: Category) -> &'static str {
    match category {
        Category::Song => SONG_EXAMPLE,
        Category::Movie => MOVIE_EXAMPLE,
        Category::Book => BOOK_EXAMPLE,
        Category::Sport => SPORT_EXAMPLE,
    }
}

/// US-style `M/D/YYYY`, the form the sports prompts were tuned with.
fn us_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

fn fill_dates(template: &str, today: NaiveDate) -> String {
    template
        .replace("{today}", &us_date(today))
        .replace("{prev_year}", &(today.year() - 1).to_string())
        .replace("{next_year}", &(today.year() + 1).to_string())
        .replace("{year}", &today.year().to_string())
}

/// Prompt for a free-text recommendation request.
pub fn query_prompt(category: Category, query: &str, today: NaiveDate) -> String {
    let template = match category {
        Category::Song => SONG_QUERY_TEMPLATE,
        Category::Movie => MOVIE_QUERY_TEMPLATE,
        Category::Book => BOOK_QUERY_TEMPLATE,
        Category::Sport => SPORT_QUERY_TEMPLATE,
    };
    let format = numbered_list_instruction("1-10", example_for(category));
    // Dates first so a query containing "{year}" is left untouched.
    fill_dates(template, today)
        .replace("{format}", &format)
        .replace("{intro}", INTRO_LINE_INSTRUCTION)
        .replace("{query}", query.trim())
}

/// Prompt for a bulk batch (playlist, new releases, new books, upcoming matches).
pub fn bulk_prompt(category: Category, count: u32, today: NaiveDate) -> String {
    let template = match category {
        Category::Song => PLAYLIST_TEMPLATE,
        Category::Movie => NEW_MOVIES_TEMPLATE,
        Category::Book => NEW_BOOKS_TEMPLATE,
        Category::Sport => UPCOMING_MATCHES_TEMPLATE,
    };
    let format = numbered_list_instruction(&format!("1-{count}"), example_for(category));
    fill_dates(template, today)
        .replace("{format}", &format)
        .replace("{count}", &count.to_string())
}
