// src/api/handlers/pages.rs
use actix_web::{web, HttpResponse, Responder};
use rust_embed::RustEmbed;
use std::borrow::Cow;

#[derive(RustEmbed)]
#[folder = "static/"]
struct StaticAssets;

fn serve(path: &str) -> HttpResponse {
    match StaticAssets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(Cow::into_owned(content.data))
        }
        None => HttpResponse::NotFound().body("404 Not Found"),
    }
}

pub async fn index_page() -> impl Responder {
    serve("index.html")
}

pub async fn simulateur_page() -> impl Responder {
    serve("simulateur.html")
}

pub async fn static_file(path: web::Path<String>) -> impl Responder {
    serve(&path.into_inner())
}
