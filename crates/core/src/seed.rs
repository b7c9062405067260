//! Starter dataset written into a store that has never been initialized.

use crate::record::Record;
use crate::types::new_record_id;

/// (title, type, genre, year, rating, status)
const SEED: &[(&str, &str, &str, i32, i32, &str)] = &[
    ("The Dark Knight", "Movie", "Action", 2008, 9, "Completed"),
    ("Inception", "Movie", "Sci-Fi", 2010, 9, "Completed"),
    ("Interstellar", "Movie", "Sci-Fi", 2014, 9, "Completed"),
    ("The Matrix", "Movie", "Sci-Fi", 1999, 9, "Completed"),
    ("Parasite", "Movie", "Thriller", 2019, 9, "Completed"),
    ("Get Out", "Movie", "Horror", 2017, 8, "Completed"),
    ("The Shawshank Redemption", "Movie", "Drama", 1994, 10, "Completed"),
    ("Pulp Fiction", "Movie", "Crime", 1994, 9, "Completed"),
    ("Spirited Away", "Movie", "Animation", 2001, 10, "Completed"),
    ("Avengers: Endgame", "Movie", "Action", 2019, 8, "Completed"),
    ("Spider-Man: Into the Spider-Verse", "Movie", "Animation", 2018, 9, "Completed"),
    ("The Lion King", "Movie", "Animation", 1994, 9, "Completed"),
    ("Dune", "Movie", "Sci-Fi", 2021, 8, "Completed"),
    ("Oppenheimer", "Movie", "Drama", 2023, 9, "Completed"),
    ("Barbie", "Movie", "Comedy", 2023, 7, "Completed"),
    ("Top Gun: Maverick", "Movie", "Action", 2022, 8, "Completed"),
    ("The Social Network", "Movie", "Drama", 2010, 8, "Completed"),
    ("La La Land", "Movie", "Romance", 2016, 8, "Completed"),
    ("Knives Out", "Movie", "Mystery", 2019, 8, "Completed"),
    ("The Grand Budapest Hotel", "Movie", "Comedy", 2014, 8, "Completed"),
    ("Breaking Bad", "Show", "Drama", 2008, 10, "Completed"),
    ("Better Call Saul", "Show", "Drama", 2015, 9, "Completed"),
    ("Stranger Things", "Show", "Sci-Fi", 2016, 8, "Watching"),
    ("The Office", "Show", "Comedy", 2005, 8, "Completed"),
    ("Game of Thrones", "Show", "Fantasy", 2011, 7, "Completed"),
    ("House of the Dragon", "Show", "Fantasy", 2022, 8, "Watching"),
    ("The Mandalorian", "Show", "Sci-Fi", 2019, 8, "Watching"),
    ("The Witcher", "Show", "Fantasy", 2019, 7, "Watching"),
    ("Black Mirror", "Show", "Sci-Fi", 2011, 9, "Completed"),
    ("The Boys", "Show", "Action", 2019, 8, "Watching"),
    ("The Crown", "Show", "Drama", 2016, 8, "Planned"),
    ("The Sopranos", "Show", "Drama", 1999, 10, "Planned"),
    ("Narcos", "Show", "Drama", 2015, 8, "Completed"),
    ("The Walking Dead", "Show", "Horror", 2010, 7, "Dropped"),
    ("Chernobyl", "Show", "Drama", 2019, 10, "Completed"),
];

/// Placeholder poster host for starter records.
const POSTER_BASE: &str = "https://placehold.co/300x450?text=";

/// Placeholder poster URL labelled with the title. Seed titles only need
/// spaces, `:` and `&` escaped.
fn poster_url(title: &str) -> String {
    let mut url = String::from(POSTER_BASE);
    for c in title.chars() {
        match c {
            ' ' => url.push('+'),
            ':' => url.push_str("%3A"),
            '&' => url.push_str("%26"),
            c => url.push(c),
        }
    }
    url
}

/// Build the starter records with fresh identifiers. Every record carries a
/// poster URL so the set validates even when image URLs are required.
pub fn seed_records() -> Vec<Record> {
    SEED.iter()
        .map(|&(title, record_type, genre, year, rating, status)| Record {
            id: new_record_id(),
            title: title.to_string(),
            record_type: record_type.to_string(),
            genre: genre.to_string(),
            year,
            rating: Some(rating),
            status: status.to_string(),
            notes: String::new(),
            image_url: Some(poster_url(title)),
        })
        .collect()
}
