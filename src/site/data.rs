use std::{
    fs::File,
    io::{BufReader, ErrorKind, Read},
    path::Path,
};

use log::{error, info, warn};

use crate::{error::FolioError, types::Catalog};

pub fn load_from_storage(local_projects_path: &Path) -> Result<Catalog, FolioError> {
    let file = File::open(local_projects_path)?;
    let mut buffer: Vec<u8> = Vec::new();
    let size = BufReader::new(file).read_to_end(&mut buffer)?;
    info!("Local projects data size: {}", size);
    match serde_json::from_slice::<Catalog>(&buffer) {
        Ok(catalog) => {
            info!("Loaded {} project(s) from {}", catalog.len(), local_projects_path.display());
            Ok(catalog)
        }
        Err(error) => {
            error!("Local projects data structure is incorrect: {}", error);
            Err(error.into())
        }
    }
}

/// Reads the catalog file, or falls back to the built-in catalog when there is none.
pub fn load_or_builtin(local_projects_path: &Path) -> Result<Catalog, FolioError> {
    match load_from_storage(local_projects_path) {
        Err(FolioError::Io(error)) if error.kind() == ErrorKind::NotFound => {
            warn!(
                "No projects file at {}, using the built-in catalog",
                local_projects_path.display()
            );
            Ok(Catalog::builtin())
        }
        result => result,
    }
}
