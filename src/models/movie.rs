use sea_orm::{NotSet, Set};
use serde::{Deserialize, Serialize};

use super::DomainRecord;
use crate::clients::tmdb::TmdbMovie;
use crate::domain::{Domain, LocationId};
use crate::entities::movies;

const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w200";

/// Shown when TMDB has no poster for a title.
pub const PLACEHOLDER_POSTER_URL: &str = "http://media.graytvinc.com/images/810*607/Movie32.jpg";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    pub released_on: Option<String>,
    pub total_votes: i64,
    pub average_votes: f64,
    pub popularity: f64,
    pub image_url: String,
    pub overview: String,
    pub created_at: i64,
    pub location_id: LocationId,
}

impl DomainRecord for Movie {
    const DOMAIN: Domain = Domain::Movies;

    type Entity = movies::Entity;
    type Model = movies::Model;
    type ActiveModel = movies::ActiveModel;
    type Raw = TmdbMovie;

    fn from_raw(movie: TmdbMovie, location_id: LocationId, created_at: i64) -> Self {
        let image_url = match movie.poster_path.as_deref() {
            Some(path) if !path.is_empty() => format!("{POSTER_BASE_URL}{path}"),
            _ => PLACEHOLDER_POSTER_URL.to_string(),
        };

        Self {
            title: movie.title,
            released_on: movie.release_date,
            total_votes: movie.vote_count,
            average_votes: movie.vote_average,
            popularity: movie.popularity,
            image_url,
            overview: movie.overview,
            created_at,
            location_id,
        }
    }

    fn from_model(m: movies::Model) -> Self {
        Self {
            title: m.title,
            released_on: m.released_on,
            total_votes: m.total_votes,
            average_votes: m.average_votes,
            popularity: m.popularity,
            image_url: m.image_url,
            overview: m.overview,
            created_at: m.created_at,
            location_id: LocationId::new(m.location_id),
        }
    }

    fn into_active_model(self) -> movies::ActiveModel {
        movies::ActiveModel {
            id: NotSet,
            title: Set(self.title),
            released_on: Set(self.released_on),
            total_votes: Set(self.total_votes),
            average_votes: Set(self.average_votes),
            popularity: Set(self.popularity),
            image_url: Set(self.image_url),
            overview: Set(self.overview),
            created_at: Set(self.created_at),
            location_id: Set(self.location_id.value()),
        }
    }

    fn location_column() -> movies::Column {
        movies::Column::LocationId
    }

    fn order_column() -> movies::Column {
        movies::Column::Id
    }

    fn created_at(&self) -> i64 {
        self.created_at
    }

    fn location_id(&self) -> LocationId {
        self.location_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmdb_movie(poster_path: Option<&str>) -> TmdbMovie {
        TmdbMovie {
            title: "Sleepless in Seattle".to_string(),
            release_date: Some("1993-06-24".to_string()),
            vote_count: 1800,
            vote_average: 6.7,
            popularity: 11.2,
            poster_path: poster_path.map(str::to_string),
            overview: "A recently widowed man's son calls a radio talk-show.".to_string(),
        }
    }

    #[test]
    fn poster_path_becomes_full_url() {
        let movie = Movie::from_raw(tmdb_movie(Some("/abc.jpg")), LocationId::new(1), 0);
        assert_eq!(movie.image_url, "https://image.tmdb.org/t/p/w200/abc.jpg");
        assert_eq!(movie.released_on.as_deref(), Some("1993-06-24"));
        assert_eq!(movie.total_votes, 1800);
    }

    #[test]
    fn missing_poster_uses_placeholder() {
        let movie = Movie::from_raw(tmdb_movie(None), LocationId::new(1), 0);
        assert_eq!(movie.image_url, PLACEHOLDER_POSTER_URL);
    }
}
