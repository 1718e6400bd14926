use ::config::{Environment, File, FileFormat};
use serde::Deserialize;
use std::collections::HashSet;
use std::env;

use crate::error::ConfigError;
use crate::models::RoutePrices;

pub const DEFAULT_CONFIG_PATH: &str = "config/config.yaml";

/// Верхняя граница размера секции. Места выделяются заранее, по одному на номер.
pub const MAX_SECTION_SEATS: u32 = 10_000;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    /// Порядок секций задаёт порядок обхода при выдаче мест.
    pub sections: Vec<SectionConfig>,
    /// Цены по маршрутам.
    #[serde(default)]
    pub stations: Vec<RouteConfig>,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

// Секция вагона
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SectionConfig {
    pub name: String,
    pub max_seats: u32,
}

// Маршрут и его цена
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RouteConfig {
    pub from: String,
    pub to: String,
    pub price: f64,
}

impl RouteConfig {
    pub fn new(from: impl Into<String>, to: impl Into<String>, price: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            price,
        }
    }
}

impl SectionConfig {
    pub fn new(name: impl Into<String>, max_seats: u32) -> Self {
        Self {
            name: name.into(),
            max_seats,
        }
    }
}

fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
    config::Config::builder()
        .set_default("app.host", "0.0.0.0")?
        .set_default("app.port", 50051)?
        .set_default("app.environment", "development")?
        .set_default("app.rust_log", "rail_booking=info,tower_http=info")?
        .set_default("app.log_format", "json")
}

impl Config {
    /// Загружает конфигурацию: значения по умолчанию, затем YAML-файл
    /// (`CONFIG_PATH`), затем переменные окружения `RAIL__*` и `HOST`/`PORT`/`RUST_LOG`.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let settings = builder()?
            .add_source(File::with_name(&path).format(FileFormat::Yaml))
            .add_source(Environment::with_prefix("RAIL").separator("__"))
            .set_override_option("app.host", env::var("HOST").ok())?
            .set_override_option("app.port", env::var("PORT").ok())?
            .set_override_option("app.rust_log", env::var("RUST_LOG").ok())?
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Разбирает YAML без обращения к окружению.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = builder()?
            .add_source(File::from_str(yaml, FileFormat::Yaml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sections.is_empty() {
            return Err(ConfigError::NoSections);
        }

        let mut seen = HashSet::new();
        for section in &self.sections {
            if section.name.is_empty() {
                return Err(ConfigError::EmptySectionName);
            }
            if !seen.insert(section.name.as_str()) {
                return Err(ConfigError::DuplicateSection(section.name.clone()));
            }
            if section.max_seats == 0 {
                return Err(ConfigError::ZeroCapacity(section.name.clone()));
            }
            if section.max_seats > MAX_SECTION_SEATS {
                return Err(ConfigError::CapacityTooLarge {
                    section: section.name.clone(),
                    max_seats: section.max_seats,
                    limit: MAX_SECTION_SEATS,
                });
            }
        }

        self.route_prices().map(|_| ())
    }

    pub fn route_prices(&self) -> Result<RoutePrices, ConfigError> {
        RoutePrices::new(&self.stations)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app.host, self.app.port)
    }
}
