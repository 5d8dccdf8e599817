use config::{Config, ConfigError, Environment, File};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

mod storage;
use storage::StorageConfig;

mod web;
use web::WebConfig;

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[allow(unused)]
pub struct Configuration {
    pub storage: StorageConfig,
    pub web: WebConfig,
}

lazy_static! {
    pub static ref CONFIG: RwLock<Configuration> = RwLock::new(Configuration::new().unwrap());
}

impl Configuration {
    fn new() -> Result<Self, ConfigError> {

        let conf = Config::builder()
            .add_source(Config::try_from(&Configuration::default()).unwrap())
            .add_source(File::with_name("config.toml").required(false))
            .add_source(File::with_name("devel.toml").required(false))
            // e.g. PRESAGE_WEB__PORT=8080 overrides web.port
            .add_source(Environment::with_prefix("presage").separator("__"))
            .build()?;

        conf.try_deserialize()
    }
}

#[macro_export]
macro_rules! read_config {
    ($($field:ident).+) => {
        presage_config::CONFIG.read().unwrap().$($field).+
    };
}
