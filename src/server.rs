use std::net::SocketAddr;

use actix_cors::Cors;
use actix_web::{
    http::header::ContentType,
    middleware::Logger,
    web::{self, resource, scope, Data},
    App, HttpResponse, HttpServer,
};
use log::info;
use uuid::Uuid;

use crate::{
    dom::{escape_text, Document},
    error::FolioError,
    page::{build_shell, initialize, PageSelectors},
    types::Catalog,
};

const STYLESHEET_PATH: &str = "/css/style.css";
const STYLESHEET: &str = include_str!("../site/css/style.css");

/// Shared by every worker; the catalog itself is never modified.
#[derive(Clone, Debug)]
pub struct SiteState {
    pub catalog: Catalog,
    pub selectors: PageSelectors,
    pub site_title: String,
}

pub async fn start_server(addr: SocketAddr, state: SiteState) -> std::io::Result<()> {
    info!("Server started at {}", addr);
    HttpServer::new(move || {
        App::new()
            .app_data(Data::new(state.clone()))
            .configure(routes)
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_header()
                    .allow_any_method(),
            )
    })
    .bind(addr)?
    .run()
    .await
}

pub fn routes(config: &mut web::ServiceConfig) {
    config
        .service(resource("/").route(web::get().to(page_handler)))
        .service(resource(STYLESHEET_PATH).route(web::get().to(stylesheet_handler)))
        .service(
            scope("/v1")
                .service(resource("/projects").route(web::get().to(projects_handler)))
                .service(resource("/folio").route(web::get().to(status_handler))),
        );
}

/// Builds the page shell, initializes it and serializes the whole document.
pub fn render_page(state: &SiteState) -> Result<String, FolioError> {
    let mut document = Document::new();
    let body = document.root();
    build_shell(&mut document, body, &state.site_title, &state.selectors);
    initialize(&state.catalog, &mut document, &state.selectors)?;

    Ok(format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>{}</title><link rel=\"stylesheet\" href=\"{}\"></head>{}</html>",
        escape_text(&state.site_title),
        STYLESHEET_PATH,
        document.to_html()
    ))
}

async fn page_handler(state: Data<SiteState>) -> Result<HttpResponse, FolioError> {
    let render_id = Uuid::new_v4();
    let html = render_page(&state)?;
    info!("Rendered page {} ({} bytes)", render_id, html.len());
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .insert_header(("x-render-id", render_id.to_string()))
        .body(html))
}

async fn stylesheet_handler() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/css; charset=utf-8")
        .body(STYLESHEET)
}

async fn projects_handler(state: Data<SiteState>) -> HttpResponse {
    HttpResponse::Ok().json(&state.catalog)
}

async fn status_handler() -> HttpResponse {
    HttpResponse::Ok().body("folio is running")
}
