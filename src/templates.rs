use maud::{DOCTYPE, Markup, html};

use crate::{
    entities::{movie, user},
    flash::{Flash, Level},
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

const INPUT_CLASS: &str = "mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";
const LABEL_CLASS: &str = "block text-sm font-medium text-gray-700";
const BUTTON_CLASS: &str =
    "rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700";

pub fn index_page(users: &[user::Model], flash: Option<&Flash>) -> String {
    page(
        "MoviWeb",
        flash,
        html! {
            h1 class="text-3xl font-bold text-gray-900" { "MoviWeb" }
            p class="mt-2 text-gray-600" { "Everyone's favorite movies, one list per person." }

            div class="mt-8 bg-white shadow rounded-lg p-8" {
                h2 class="text-xl font-semibold text-gray-900" { "Users" }
                @if users.is_empty() {
                    p class="mt-4 text-gray-500" { "No users yet." }
                } @else {
                    ul class="mt-4 divide-y divide-gray-100" {
                        @for user in users {
                            li class="flex items-center justify-between py-3" {
                                a class="text-blue-600 hover:text-blue-800" href=(movies_url(user.id)) { (user.name) }
                                form method="post" action=(format!("/users/{}/delete", user.id)) {
                                    button class="text-sm text-red-600 hover:text-red-800" type="submit" { "Delete" }
                                }
                            }
                        }
                    }
                }

                form class="mt-8 flex gap-4 items-end" method="post" action="/users" {
                    div class="flex-1" {
                        label class=(LABEL_CLASS) for="name" { "New user" }
                        input class=(INPUT_CLASS) name="name" id="name" required;
                    }
                    button class=(BUTTON_CLASS) type="submit" { "Add user" }
                }
            }
        },
    )
}

pub fn movies_page(user: &user::Model, movies: &[movie::Model], flash: Option<&Flash>) -> String {
    page(
        &format!("{}'s movies", user.name),
        flash,
        html! {
            div class="flex items-start justify-between gap-6" {
                h1 class="text-3xl font-bold text-gray-900" { (user.name) "'s movies" }
                div class="flex gap-4 text-sm" {
                    a class="text-blue-600 hover:text-blue-800" href=(format!("/users/{}/add_movie", user.id)) { "Add movie" }
                    a class="text-blue-600 hover:text-blue-800" href="/" { "All users" }
                }
            }

            @if movies.is_empty() {
                div class="mt-10 bg-white shadow rounded-lg p-8" {
                    p class="text-gray-600" { "No movies yet." }
                }
            } @else {
                div class="mt-10 space-y-4" {
                    @for movie in movies {
                        (movie_card(user, movie))
                    }
                }
            }
        },
    )
}

pub fn add_movie_page(user: &user::Model, flash: Option<&Flash>) -> String {
    page(
        "Add movie",
        flash,
        html! {
            div class="bg-white shadow rounded-lg p-8" {
                h1 class="text-2xl font-bold text-gray-900" { "Add a movie for " (user.name) }
                p class="mt-2 text-sm text-gray-500" { "Details are looked up by title. The optional fields are used when nothing is found." }

                form class="mt-8 space-y-6" method="post" action=(format!("/users/{}/add_movie", user.id)) {
                    (text_field("title", "Title", "", true))
                    (text_field("director", "Director (optional)", "", false))
                    (text_field("year", "Year (optional)", "", false))
                    (text_field("rating", "Rating (optional)", "", false))
                    div class="flex items-center gap-6" {
                        button class=(BUTTON_CLASS) type="submit" { "Add" }
                        a class="text-sm text-gray-600 hover:text-gray-800" href=(movies_url(user.id)) { "Cancel" }
                    }
                }
            }
        },
    )
}

pub fn update_movie_page(user: &user::Model, movie: &movie::Model, flash: Option<&Flash>) -> String {
    page(
        "Update movie",
        flash,
        html! {
            div class="bg-white shadow rounded-lg p-8" {
                h1 class="text-2xl font-bold text-gray-900" { "Update " (movie.name) }

                form class="mt-8 space-y-6" method="post" action=(format!("/users/{}/movies/{}/update", user.id, movie.id)) {
                    (text_field("name", "Title", &movie.name, false))
                    (text_field("director", "Director", movie.director.as_deref().unwrap_or(""), false))
                    (text_field("year", "Year", &movie.year.to_string(), false))
                    (text_field("rating", "Rating", &movie.rating.to_string(), false))
                    div class="flex items-center gap-6" {
                        button class=(BUTTON_CLASS) type="submit" { "Save" }
                        a class="text-sm text-gray-600 hover:text-gray-800" href=(movies_url(user.id)) { "Cancel" }
                    }
                }
            }
        },
    )
}

pub fn not_found_page(message: &str) -> String {
    message_page("Not found", message)
}

pub fn error_page(message: String) -> String {
    message_page("Error", &message)
}

fn message_page(heading: &str, message: &str) -> String {
    page(
        heading,
        None,
        html! {
            div class="bg-white shadow rounded-lg p-8" {
                h1 class="text-2xl font-bold text-gray-900" { (heading) }
                p class="mt-4 text-gray-700" { (message) }
                a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
            }
        },
    )
}

fn page(title: &str, flash: Option<&Flash>, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body class="min-h-screen bg-gray-50" {
                main class="max-w-3xl mx-auto px-6 py-12" {
                    @if let Some(flash) = flash {
                        (flash_banner(flash))
                    }
                    (body)
                }
            }
        }
    }
    .into_string()
}

fn flash_banner(flash: &Flash) -> Markup {
    let colors = match flash.level {
        Level::Success => "border-green-300 bg-green-50 text-green-800",
        Level::Danger => "border-red-300 bg-red-50 text-red-800",
    };

    html! {
        div class=(format!("mb-6 rounded-md border px-4 py-3 {}", colors)) role="status" data-level=(flash.level.as_str()) {
            (flash.message)
        }
    }
}

fn movie_card(user: &user::Model, movie: &movie::Model) -> Markup {
    html! {
        div class="bg-white shadow rounded-lg p-6 flex gap-6" {
            @if let Some(poster) = &movie.poster_url {
                img class="w-20 rounded" src=(poster) alt=(format!("{} poster", movie.name));
            }
            div class="flex-1" {
                h2 class="text-xl font-semibold text-gray-900" {
                    (movie.name)
                    @if movie.year > 0 {
                        span class="ml-2 font-normal text-gray-500" { "(" (movie.year) ")" }
                    }
                }
                p class="mt-1 text-sm text-gray-600" {
                    (movie.director.as_deref().unwrap_or("Unknown director"))
                    " · "
                    @if movie.rating > 0.0 {
                        "Rating " (format!("{:.1}", movie.rating))
                    } @else {
                        "Not rated"
                    }
                }
                div class="mt-4 flex gap-4 text-sm" {
                    a class="text-blue-600 hover:text-blue-800" href=(format!("/users/{}/movies/{}/update", user.id, movie.id)) { "Edit" }
                    form method="post" action=(format!("/users/{}/movies/{}/delete", user.id, movie.id)) {
                        button class="text-red-600 hover:text-red-800" type="submit" { "Delete" }
                    }
                }
            }
        }
    }
}

fn text_field(name: &str, label: &str, value: &str, required: bool) -> Markup {
    html! {
        div {
            label class=(LABEL_CLASS) for=(name) { (label) }
            input class=(INPUT_CLASS) name=(name) id=(name) value=(value) required[required];
        }
    }
}

fn movies_url(user_id: i32) -> String {
    format!("/users/{user_id}/movies")
}
