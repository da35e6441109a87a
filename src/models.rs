use serde::Deserialize;

use crate::entities::movie;

#[derive(Debug, Default, Deserialize)]
pub struct NewUserForm {
    #[serde(default)]
    pub name: String,
}

/// Add-movie form. Only `title` is required; the rest is used when the
/// lookup finds nothing.
#[derive(Debug, Default, Deserialize)]
pub struct AddMovieForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub rating: String,
}

/// Edit form. A field left out of the submission keeps its current value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateMovieForm {
    pub name: Option<String>,
    pub director: Option<String>,
    pub year: Option<String>,
    pub rating: Option<String>,
}

/// Everything needed to insert a movie, either looked up or typed in.
#[derive(Clone, Debug, PartialEq)]
pub struct MovieDetails {
    pub name: String,
    pub director: Option<String>,
    pub year: i32,
    pub rating: f64,
    pub poster_url: Option<String>,
}

/// New values for the editable columns of an existing movie.
#[derive(Clone, Debug, PartialEq)]
pub struct MovieChanges {
    pub name: String,
    pub director: Option<String>,
    pub year: i32,
    pub rating: f64,
}

impl AddMovieForm {
    pub fn trimmed_title(&self) -> &str {
        self.title.trim()
    }

    /// Blank or unparseable numbers fall back to 0 / 0.0, each on its own.
    pub fn manual_details(&self) -> MovieDetails {
        MovieDetails {
            name: self.trimmed_title().to_string(),
            director: non_blank(&self.director),
            year: parse_year(&self.year).unwrap_or(0),
            rating: parse_rating(&self.rating).unwrap_or(0.0),
            poster_url: None,
        }
    }
}

impl UpdateMovieForm {
    /// Missing fields keep the current value. A blank name or a number that
    /// fails to parse also keeps it; a blank director clears it.
    pub fn merge_over(&self, current: &movie::Model) -> MovieChanges {
        MovieChanges {
            name: self.name.as_deref().and_then(non_blank).unwrap_or_else(|| current.name.clone()),
            director: match &self.director {
                Some(director) => non_blank(director),
                None => current.director.clone(),
            },
            year: self.year.as_deref().and_then(parse_year).unwrap_or(current.year),
            rating: self.rating.as_deref().and_then(parse_rating).unwrap_or(current.rating),
        }
    }
}

fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn parse_year(s: &str) -> Option<i32> {
    s.trim().parse().ok()
}

fn parse_rating(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|r| r.is_finite())
}
