use serde::Deserialize;

use crate::models::MovieDetails;

/// OMDb's placeholder for fields it has no value for.
const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unparseable rating {0:?}")]
    Rating(String),

    #[error("no match: {0}")]
    NotFound(String),
}

pub struct OmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OmdbClient {
    pub fn new(client: reqwest::Client, api_key: String, base_url: String) -> Self {
        if api_key.trim().is_empty() {
            tracing::warn!("no OMDB_API_KEY provided, movie lookups are disabled");
        }

        Self { client, api_key, base_url }
    }

    /// Looks `title` up and returns whatever metadata OMDb has for it.
    ///
    /// This never fails: transport errors, bad payloads and unknown titles
    /// all come back as `None` so the caller can fall back to manual entry.
    pub async fn lookup(&self, title: &str) -> Option<MovieDetails> {
        if self.api_key.trim().is_empty() {
            return None;
        }

        match self.fetch(title).await {
            Ok(details) => {
                tracing::debug!(title, found = %details.name, "omdb match");
                Some(details)
            }
            Err(LookupError::NotFound(reason)) => {
                tracing::debug!(title, reason, "omdb has no match");
                None
            }
            Err(err) => {
                tracing::warn!(title, error = %err, "omdb lookup failed");
                None
            }
        }
    }

    async fn fetch(&self, title: &str) -> Result<MovieDetails, LookupError> {
        let body = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), ("t", title)])
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let resp: OmdbResponse = serde_json::from_slice(&body)?;
        resp.into_details(title)
    }
}

#[derive(Debug, Deserialize)]
struct OmdbResponse {
    #[serde(rename = "Response", default)]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Director")]
    director: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
}

impl OmdbResponse {
    fn into_details(self, query: &str) -> Result<MovieDetails, LookupError> {
        if self.response != "True" {
            return Err(LookupError::NotFound(
                self.error.unwrap_or_else(|| "Response was not True".to_string()),
            ));
        }

        let rating = match self.imdb_rating.as_deref().map(str::trim) {
            None | Some(NOT_AVAILABLE) => 0.0,
            Some(raw) => raw.parse::<f64>().map_err(|_| LookupError::Rating(raw.to_string()))?,
        };

        let director = match self.director {
            None => Some("Unknown".to_string()),
            Some(d) if d.trim().is_empty() || d == NOT_AVAILABLE => None,
            Some(d) => Some(d),
        };

        Ok(MovieDetails {
            name: self.title.unwrap_or_else(|| query.to_string()),
            director,
            year: self.year.as_deref().map(parse_year).unwrap_or(0),
            rating,
            poster_url: self.poster.filter(|p| !p.trim().is_empty() && p != NOT_AVAILABLE),
        })
    }
}

/// Reads the leading year out of values like `"2021"` or `"2008–2013"`.
fn parse_year(raw: &str) -> i32 {
    let prefix: String = raw.trim().chars().take(4).collect();
    if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_digit()) {
        return 0;
    }
    prefix.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{TEST_API_KEY, fake_omdb, unreachable_url};

    fn client(base_url: String) -> OmdbClient {
        OmdbClient::new(reqwest::Client::new(), TEST_API_KEY.to_string(), base_url)
    }

    #[test]
    fn year_is_taken_from_leading_digits() {
        assert_eq!(parse_year("2021"), 2021);
        assert_eq!(parse_year("2008–2013"), 2008);
        assert_eq!(parse_year("N/A"), 0);
        assert_eq!(parse_year(""), 0);
        assert_eq!(parse_year("19x5"), 0);
    }

    #[test]
    fn not_available_fields_become_defaults() {
        let resp: OmdbResponse = serde_json::from_str(
            r#"{"Response":"True","Title":"Obscure","Director":"N/A","Year":"N/A","imdbRating":"N/A","Poster":"N/A"}"#,
        )
        .unwrap();

        let details = resp.into_details("obscure").unwrap();
        assert_eq!(details.name, "Obscure");
        assert_eq!(details.director, None);
        assert_eq!(details.year, 0);
        assert_eq!(details.rating, 0.0);
        assert_eq!(details.poster_url, None);
    }

    #[test]
    fn missing_fields_fall_back_to_query() {
        let resp: OmdbResponse = serde_json::from_str(r#"{"Response":"True"}"#).unwrap();

        let details = resp.into_details("Stalker").unwrap();
        assert_eq!(details.name, "Stalker");
        assert_eq!(details.director.as_deref(), Some("Unknown"));
    }

    #[test]
    fn garbled_rating_is_rejected() {
        let resp: OmdbResponse =
            serde_json::from_str(r#"{"Response":"True","Title":"X","imdbRating":"eight"}"#)
                .unwrap();
        assert!(matches!(resp.into_details("X"), Err(LookupError::Rating(_))));
    }

    #[tokio::test]
    async fn lookup_extracts_metadata() {
        let omdb = client(fake_omdb().await);

        let details = omdb.lookup("Dune").await.unwrap();
        assert_eq!(details.name, "Dune");
        assert_eq!(details.director.as_deref(), Some("D. Villeneuve"));
        assert_eq!(details.year, 2021);
        assert_eq!(details.rating, 8.0);
        assert_eq!(details.poster_url.as_deref(), Some("https://img.example/dune.jpg"));
    }

    #[tokio::test]
    async fn lookup_swallows_every_failure() {
        let base_url = fake_omdb().await;
        let omdb = client(base_url.clone());

        assert_eq!(omdb.lookup("No Such Film").await, None);
        assert_eq!(omdb.lookup("Broken").await, None);
        assert_eq!(omdb.lookup("Teapot").await, None);
        assert_eq!(omdb.lookup("Garbled").await, None);

        let wrong_key =
            OmdbClient::new(reqwest::Client::new(), "wrong".to_string(), base_url);
        assert_eq!(wrong_key.lookup("Dune").await, None);

        let offline = client(unreachable_url().await);
        assert_eq!(offline.lookup("Dune").await, None);
    }

    #[tokio::test]
    async fn empty_api_key_disables_lookup() {
        let omdb = OmdbClient::new(reqwest::Client::new(), " ".to_string(), fake_omdb().await);
        assert_eq!(omdb.lookup("Dune").await, None);
    }
}
