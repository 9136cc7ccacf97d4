use std::{io::ErrorKind, path::Path, process};

use log::{error, info, warn};

use folio_cards::{
    error::FolioError,
    server::{start_server, SiteState},
    site::{data::load_or_builtin, settings::Settings},
};

const SETTINGS_PATH: &str = "site/settings.json";

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = load_settings(Path::new(SETTINGS_PATH));
    let projects_file = settings.projects_file();
    let catalog = match load_or_builtin(&projects_file) {
        Ok(catalog) => catalog,
        Err(error) => {
            error!("Could not load {}: {}", projects_file.display(), error);
            process::exit(1);
        }
    };
    info!("Serving {} project(s)", catalog.len());

    let state = SiteState {
        catalog,
        selectors: settings.selectors(),
        site_title: settings.site_title.value.clone(),
    };
    start_server(settings.socket_addr(), state).await
}

fn load_settings(path: &Path) -> Settings {
    match Settings::load(path) {
        Ok(settings) => settings,
        Err(FolioError::Io(error)) if error.kind() == ErrorKind::NotFound => {
            warn!("No settings at {}, using defaults", path.display());
            Settings::new()
        }
        Err(error) => {
            error!("Settings load error: {}", error);
            process::exit(1);
        }
    }
}
