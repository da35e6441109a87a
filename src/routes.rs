use std::sync::Arc;

use axum::{
    extract::{Form, Path, State, rejection::PathRejection},
    response::{Html, Redirect},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    AppState,
    entities::{movie, user},
    error::{AppError, AppResult},
    flash::{self, Flash},
    models::{AddMovieForm, NewUserForm, UpdateMovieForm},
    templates,
};

type Page = (CookieJar, Html<String>);
type Done = (CookieJar, Redirect);

pub async fn index(State(state): State<Arc<AppState>>, jar: CookieJar) -> AppResult<Page> {
    let users = state.store.list_users().await?;
    let (jar, flash) = flash::take(jar);
    Ok((jar, Html(templates::index_page(&users, flash.as_ref()))))
}

pub async fn add_user(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<NewUserForm>,
) -> AppResult<Done> {
    let name = form.name.trim();
    if name.is_empty() {
        return Ok(done(jar, Flash::danger("Name cannot be empty."), "/"));
    }

    let user = state.store.add_user(name).await?;
    tracing::info!(user_id = user.id, name = %user.name, "user added");
    Ok(done(jar, Flash::success(format!("User '{}' added successfully!", user.name)), "/"))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
    jar: CookieJar,
) -> AppResult<Done> {
    let user_id = path_ids(path)?;

    let Some(user) = state.store.get_user(user_id).await? else {
        return Ok(done(jar, Flash::danger("User not found."), "/"));
    };

    state.store.delete_user(user.id).await?;
    tracing::info!(user_id = user.id, "user deleted with its movies");
    Ok(done(jar, Flash::success(format!("User '{}' deleted.", user.name)), "/"))
}

pub async fn user_movies(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
    jar: CookieJar,
) -> AppResult<Page> {
    let user = require_user(&state, path_ids(path)?).await?;
    let movies = state.store.user_movies(user.id).await?;
    let (jar, flash) = flash::take(jar);
    Ok((jar, Html(templates::movies_page(&user, &movies, flash.as_ref()))))
}

pub async fn add_movie_form(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
    jar: CookieJar,
) -> AppResult<Page> {
    let user = require_user(&state, path_ids(path)?).await?;
    let (jar, flash) = flash::take(jar);
    Ok((jar, Html(templates::add_movie_page(&user, flash.as_ref()))))
}

pub async fn add_movie(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
    jar: CookieJar,
    Form(form): Form<AddMovieForm>,
) -> AppResult<Done> {
    let user = require_user(&state, path_ids(path)?).await?;

    let title = form.trimmed_title();
    if title.is_empty() {
        let back = format!("/users/{}/add_movie", user.id);
        return Ok(done(jar, Flash::danger("Movie title cannot be empty."), &back));
    }

    let (details, message) = match state.omdb.lookup(title).await {
        Some(details) => {
            let message = format!("Movie '{}' added!", details.name);
            (details, message)
        }
        None => {
            let details = form.manual_details();
            let message = format!("Movie '{}' added manually.", details.name);
            (details, message)
        }
    };

    let movie = state.store.add_movie(user.id, details).await?;
    tracing::info!(user_id = user.id, movie_id = movie.id, name = %movie.name, "movie added");
    Ok(done(jar, Flash::success(message), &movies_url(user.id)))
}

pub async fn update_movie_form(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(i32, i32)>, PathRejection>,
    jar: CookieJar,
) -> AppResult<Page> {
    let (user_id, movie_id) = path_ids(path)?;
    let (user, movie) = require_user_movie(&state, user_id, movie_id).await?;
    let (jar, flash) = flash::take(jar);
    Ok((jar, Html(templates::update_movie_page(&user, &movie, flash.as_ref()))))
}

pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(i32, i32)>, PathRejection>,
    jar: CookieJar,
    Form(form): Form<UpdateMovieForm>,
) -> AppResult<Done> {
    let (user_id, movie_id) = path_ids(path)?;
    let (user, movie) = require_user_movie(&state, user_id, movie_id).await?;

    let changes = form.merge_over(&movie);
    let updated = state
        .store
        .update_movie(movie.id, changes)
        .await?
        .ok_or(AppError::NotFound("Movie not found"))?;

    tracing::info!(user_id = user.id, movie_id = updated.id, "movie updated");
    Ok(done(
        jar,
        Flash::success(format!("Movie '{}' updated!", updated.name)),
        &movies_url(user.id),
    ))
}

pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(i32, i32)>, PathRejection>,
    jar: CookieJar,
) -> AppResult<Done> {
    let (user_id, movie_id) = path_ids(path)?;
    let back = movies_url(user_id);

    let movie = state.store.get_movie(movie_id).await?.filter(|m| m.user_id == user_id);
    let Some(movie) = movie else {
        return Ok(done(jar, Flash::danger("Movie not found."), &back));
    };

    if !state.store.delete_movie(movie.id).await? {
        return Ok(done(jar, Flash::danger("Movie not found."), &back));
    }

    tracing::info!(user_id, movie_id = movie.id, "movie deleted");
    Ok(done(jar, Flash::success(format!("Movie '{}' deleted.", movie.name)), &back))
}

pub async fn not_found() -> AppError {
    AppError::NotFound("Page not found")
}

/// Ids that do not parse get the same 404 as an unknown route.
fn path_ids<T>(path: Result<Path<T>, PathRejection>) -> AppResult<T> {
    path.map(|Path(ids)| ids).map_err(|_| AppError::NotFound("Page not found"))
}

async fn require_user(state: &AppState, user_id: i32) -> AppResult<user::Model> {
    state.store.get_user(user_id).await?.ok_or(AppError::NotFound("User not found"))
}

/// Both must exist and the movie must belong to the user.
async fn require_user_movie(
    state: &AppState,
    user_id: i32,
    movie_id: i32,
) -> AppResult<(user::Model, movie::Model)> {
    let user = state.store.get_user(user_id).await?;
    let movie = state.store.get_movie(movie_id).await?;
    match (user, movie) {
        (Some(user), Some(movie)) if movie.user_id == user.id => Ok((user, movie)),
        _ => Err(AppError::NotFound("Not found")),
    }
}

fn done(jar: CookieJar, flash: Flash, to: &str) -> Done {
    (flash::push(jar, flash), Redirect::to(to))
}

fn movies_url(user_id: i32) -> String {
    format!("/users/{user_id}/movies")
}
