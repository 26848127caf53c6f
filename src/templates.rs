use maud::{DOCTYPE, Markup, html};

use crate::{
    entities::movie,
    models::{CatalogMovie, LANGUAGES, REGIONS},
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

pub fn index_page(movies: &[movie::Model]) -> String {
    page(
        "My Top Movies",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-3xl mx-auto px-6 py-12" {
                    div class="flex items-start justify-between gap-6" {
                        div {
                            h1 class="text-3xl font-bold text-gray-900" { "My Top Movies" }
                            p class="mt-2 text-gray-600" { "Ranked by your ratings." }
                        }
                        a class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" href="/add" { "Add Movie" }
                    }

                    @if movies.is_empty() {
                        div class="mt-10 bg-white shadow rounded-lg p-8" {
                            p class="text-gray-600" { "No movies yet. Add one to get started." }
                        }
                    } @else {
                        div class="mt-10 space-y-4" {
                            @for movie in movies {
                                (movie_card(movie))
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn add_page(error: bool) -> String {
    page(
        "Add Movie",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-2xl mx-auto px-6 py-12" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-3xl font-bold text-gray-900" { "Add Movie" }
                        p class="mt-2 text-gray-600" { "Search the movie database by title." }

                        @if error {
                            (form_error("Check the form: title is required, page must be 1-5."))
                        }

                        form class="mt-8 space-y-6" method="post" action="/add" {
                            div {
                                label class="block text-sm font-medium text-gray-700" for="title" { "Movie title" }
                                input class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500" name="title" id="title";
                            }

                            div class="grid gap-6 md:grid-cols-2" {
                                div {
                                    label class="block text-sm font-medium text-gray-700" for="language" { "Language" }
                                    select class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2" name="language" id="language" {
                                        @for lang in LANGUAGES {
                                            option value=(lang) { (lang) }
                                        }
                                    }
                                }
                                div {
                                    label class="block text-sm font-medium text-gray-700" for="region" { "Region" }
                                    select class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2" name="region" id="region" {
                                        @for region in REGIONS {
                                            option value=(region) { (region) }
                                        }
                                    }
                                }
                                div {
                                    label class="block text-sm font-medium text-gray-700" for="release_year" { "Release year (optional)" }
                                    input class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2" name="release_year" id="release_year";
                                }
                                div {
                                    label class="block text-sm font-medium text-gray-700" for="page" { "Results page (1-5)" }
                                    input class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2" type="number" name="page" id="page" value="1" min="1" max="5";
                                }
                            }

                            div class="flex items-center gap-2" {
                                input type="checkbox" name="include_adult" id="include_adult" value="true";
                                label class="text-sm text-gray-700" for="include_adult" { "Include adult titles" }
                            }

                            button class="w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Search" }
                        }

                        a class="mt-6 inline-block text-sm text-blue-600 hover:text-blue-800" href="/" { "Back to list" }
                    }
                }
            }
        },
    )
}

pub fn select_page(results: &[CatalogMovie]) -> String {
    page(
        "Select Movie",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-3xl mx-auto px-6 py-12" {
                    h1 class="text-3xl font-bold text-gray-900" { "Select Movie" }
                    p class="mt-2 text-gray-600" { "Pick the film you searched for." }

                    @if results.is_empty() {
                        div class="mt-10 bg-white shadow rounded-lg p-8" {
                            p class="text-gray-600" { "No matches. " a class="text-blue-600 hover:text-blue-800" href="/add" { "Try another search." } }
                        }
                    } @else {
                        div class="mt-10 space-y-4" {
                            @for movie in results {
                                a class="block bg-white shadow rounded-lg p-6 hover:bg-gray-100" href=(format!("/select?id={}", movie.id)) {
                                    h2 class="text-xl font-semibold text-gray-900" {
                                        (movie.title)
                                        @if let Some(date) = &movie.release_date {
                                            span class="ml-2 font-normal text-gray-500" { "(" (date) ")" }
                                        }
                                    }
                                    @if !movie.overview.is_empty() {
                                        p class="mt-2 text-sm text-gray-600" { (movie.overview) }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn edit_page(movie: &movie::Model, error: bool) -> String {
    page(
        "Rate Movie",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-2xl mx-auto px-6 py-12" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-3xl font-bold text-gray-900" { (movie.title) }
                        @if let Some(year) = movie.year {
                            p class="mt-1 text-gray-500" { (year) }
                        }

                        @if error {
                            (form_error("Rating must be a number from 0 to 10 and a review is required."))
                        }

                        form class="mt-8 space-y-6" method="post" action=(format!("/edit?id={}", movie.id)) {
                            div {
                                label class="block text-sm font-medium text-gray-700" for="rating" { "Your rating out of 10, e.g. 7.5" }
                                input class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2" name="rating" id="rating" value=[movie.rating.map(|r| r.to_string())];
                            }
                            div {
                                label class="block text-sm font-medium text-gray-700" for="review" { "Your review" }
                                input class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2" name="review" id="review" value=[movie.review.clone()];
                            }
                            button class="w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Save" }
                        }

                        a class="mt-6 inline-block text-sm text-blue-600 hover:text-blue-800" href="/" { "Back to list" }
                    }
                }
            }
        },
    )
}

pub fn error_page(message: String) -> String {
    page(
        "Error",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { "Error" }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}

fn form_error(message: &str) -> Markup {
    html! {
        div class="mt-6 rounded-md border border-red-300 bg-red-50 p-4" id="form-error" {
            p class="text-sm text-red-700" { (message) }
        }
    }
}

fn movie_card(movie: &movie::Model) -> Markup {
    html! {
        div class="bg-white shadow rounded-lg p-6" {
            div class="flex items-start gap-6" {
                @if let Some(url) = &movie.img_url {
                    img class="w-20 rounded-md" src=(url) alt=(movie.title);
                }
                div class="flex-1" {
                    div class="flex items-start justify-between gap-4" {
                        h2 class="text-xl font-semibold text-gray-900" {
                            @if let Some(rank) = movie.ranking {
                                span class="mr-2 text-gray-400" { "#" (rank) }
                            }
                            (movie.title)
                            @if let Some(year) = movie.year {
                                span class="ml-2 font-normal text-gray-500" { "(" (year) ")" }
                            }
                        }
                        @if let Some(rating) = movie.rating {
                            span class="rounded-full bg-blue-100 px-3 py-1 text-sm font-semibold text-blue-800" { (rating) " / 10" }
                        }
                    }
                    p class="mt-2 text-sm text-gray-600" { (movie.description) }
                    @if let Some(review) = &movie.review {
                        p class="mt-2 text-sm italic text-gray-700" { "\u{201c}" (review) "\u{201d}" }
                    }
                    div class="mt-4 flex gap-4 text-sm" {
                        a class="text-blue-600 hover:text-blue-800" href=(format!("/edit?id={}", movie.id)) { "Edit" }
                        a class="text-red-600 hover:text-red-800" href=(format!("/delete?id={}", movie.id)) { "Delete" }
                    }
                }
            }
        }
    }
}
