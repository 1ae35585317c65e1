use chrono::NaiveDate;
use serde::Deserialize;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, ErrorKind, Result};
use crate::rotation::{AnchorPoint, Label, Rotation};

const CONFIG_PATH_ENV_VAR: &str = "GRUPOS_CONFIG_FILE";

/// Shortest accepted redraw interval.
pub const MIN_TICK_RATE_MS: u64 = 50;

const HOME_TEXT: &str = "\
Calendario de grupos A, B y C.

Cada domingo comienza una nueva semana de turnos. El miércoles
siguiente corresponde al mismo grupo que ese domingo.

  1-4  trimestre
  m    manual
  p    pastoreo
  x    misiones
  i    inicio
  q    salir";

const MANUAL_TEXT: &str = "\
Cómo leer el calendario

Los domingos y miércoles llevan la letra del grupo de turno.
Los grupos rotan cada semana en el orden A, B, C y vuelven a
empezar: cada grupo repite su turno cada tres semanas.

Navegación
  h / l    trimestre anterior / siguiente
  j / k    desplazar
  :        línea de comandos (inicio, t 1-4, hoy, fecha AAAA-MM-DD)";

const PASTOREO_TEXT: &str = "\
Pastoreo

Visitas y acompañamiento a cargo del grupo de turno.";

const MISIONES_TEXT: &str = "\
Misiones

Actividades de misión organizadas por el grupo de turno.";

pub(crate) fn find_configfile_locations() -> io::Result<Vec<PathBuf>> {
    let config_env = env::var(CONFIG_PATH_ENV_VAR).ok().map(PathBuf::from);

    let home = dirs::home_dir().ok_or_else(|| {
        io::Error::new(io::ErrorKind::Other, "Unable to find home directory")
    })?;

    let home_config = home.join(".grupos.toml");

    let config_xdg = dirs::config_dir()
        .unwrap_or_else(|| home.join(".config"))
        .join("grupos")
        .join("config.toml");

    let mut locations = vec![config_xdg, home_config];

    if let Some(path) = config_env {
        locations.insert(0, path);
    }

    Ok(locations)
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnchorSpec {
    pub date: NaiveDate,
    pub label: Label,
}

impl Default for AnchorSpec {
    fn default() -> Self {
        AnchorSpec {
            date: NaiveDate::from_ymd_opt(2025, 12, 28).unwrap_or_default(),
            label: Label::C,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PanelTexts {
    pub home: String,
    pub manual: String,
    pub pastoreo: String,
    pub misiones: String,
}

impl Default for PanelTexts {
    fn default() -> Self {
        PanelTexts {
            home: HOME_TEXT.to_owned(),
            manual: MANUAL_TEXT.to_owned(),
            pastoreo: PASTOREO_TEXT.to_owned(),
            misiones: MISIONES_TEXT.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub year: i32,
    pub tick_rate_ms: u64,
    pub anchor: AnchorSpec,
    pub panels: PanelTexts,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            year: 2026,
            tick_rate_ms: 500,
            anchor: AnchorSpec::default(),
            panels: PanelTexts::default(),
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content)?;
        if config.tick_rate_ms < MIN_TICK_RATE_MS {
            return Err(Error::new(
                ErrorKind::ConfigParse,
                &format!(
                    "tick_rate_ms = {} is below the minimum of {}",
                    config.tick_rate_ms, MIN_TICK_RATE_MS
                ),
            ));
        }
        config.rotation()?;
        Ok(config)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn rotation(&self) -> Result<Rotation> {
        AnchorPoint::new(self.anchor.date, self.anchor.label).map(Rotation::new)
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Config::from_toml(&content).map_err(|err| match err.kind {
        ErrorKind::IOError(_) => err,
        _ => {
            let message = format!("{}: {}", path.display(), err);
            Error::new(err.kind, &message)
        }
    })
}

/// Loads `path` if given, otherwise the first existing default location,
/// otherwise the built-in defaults.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        log::info!("Loading config from {}", path.display());
        return load_config(path);
    }

    let locations = find_configfile_locations().unwrap_or_else(|err| {
        log::warn!("{}", err);
        Vec::new()
    });

    match locations.iter().find(|p| p.is_file()) {
        Some(path) => {
            log::info!("Loading config from {}", path.display());
            load_config(path)
        }
        None => {
            log::info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}
