use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Read},
    net::{Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
};

use log::error;

use crate::{error::FolioError, page::PageSelectors};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Settings {
    pub ipv4_addr: Ipv4Setting,
    pub port: U16Setting,
    pub local_projects_path: StrSetting,
    pub projects_file_name: StrSetting,
    pub site_title: StrSetting,
    pub projects_grid_selector: StrSetting,
    pub scroll_indicator_selector: StrSetting,
    pub current_year_id: StrSetting,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StrSetting {
    pub name: String,
    pub value: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct U16Setting {
    pub name: String,
    pub value: u16,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Ipv4Setting {
    pub name: String,
    pub value: Ipv4Addr,
}

impl StrSetting {
    fn new(name: &str, value: &str) -> Self {
        StrSetting {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings::new()
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, FolioError> {
        let file = File::open(path).map_err(|error| {
            error!("Could not open settings file {}: {}", path.display(), error);
            FolioError::Io(error)
        })?;
        let mut buffer = Vec::new();
        BufReader::new(file).read_to_end(&mut buffer)?;
        serde_json::from_slice::<Settings>(&buffer).map_err(|error| {
            error!("Settings file {} is malformed: {}", path.display(), error);
            FolioError::Settings(error.to_string())
        })
    }

    pub fn new() -> Self {
        Settings {
            ipv4_addr: Ipv4Setting {
                name: "Ipv4 Address".to_string(),
                value: Ipv4Addr::new(127, 0, 0, 1),
            },
            port: U16Setting {
                name: "Port".to_string(),
                value: 4010,
            },
            local_projects_path: StrSetting::new("local_projects_path", "data"),
            projects_file_name: StrSetting::new("projects_file_name", "projects"),
            site_title: StrSetting::new("Site Title", "Portfolio"),
            projects_grid_selector: StrSetting::new("Projects Grid", ".projects-grid"),
            scroll_indicator_selector: StrSetting::new("Scroll Indicator", ".scroll-indicator"),
            current_year_id: StrSetting::new("Current Year", "current-year"),
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from((self.ipv4_addr.value, self.port.value))
    }

    pub fn projects_file(&self) -> PathBuf {
        Path::new(&self.local_projects_path.value)
            .join(format!("{}.json", self.projects_file_name.value))
    }

    pub fn selectors(&self) -> PageSelectors {
        PageSelectors {
            projects_grid: self.projects_grid_selector.value.clone(),
            scroll_indicator: self.scroll_indicator_selector.value.clone(),
            current_year: self.current_year_id.value.clone(),
        }
    }
}
