use crate::error::{BadEnvVarSnafu, ParseBodyLimitSnafu, ParsePortSnafu, SimsResult};
use dotenvy::var;
use snafu::ResultExt;
use std::{env::VarError, path::PathBuf, sync::Arc};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATA_PATH: &str = "data/students.json";
const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    server_config: Arc<ServerConfig>,
}

impl RuntimeConfiguration {
    pub fn new() -> SimsResult<Self> {
        Ok(Self {
            server_config: Arc::new(ServerConfig::new()?),
        })
    }

    pub fn server_config(&self) -> Arc<ServerConfig> {
        self.server_config.clone()
    }
}

impl From<ServerConfig> for RuntimeConfiguration {
    fn from(server_config: ServerConfig) -> Self {
        Self {
            server_config: Arc::new(server_config),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server_ip: String,
    pub data_path: PathBuf,
    pub body_limit: usize,
}

impl ServerConfig {
    pub fn new() -> SimsResult<Self> {
        let server_ip = match optional_env_var("SIMS_SERVER_IP")? {
            Some(ip) => ip,
            None => {
                let port = match optional_env_var("PORT")? {
                    Some(port) => port.parse().context(ParsePortSnafu)?,
                    None => DEFAULT_PORT,
                };
                format!("127.0.0.1:{port}")
            }
        };

        let data_path = optional_env_var("SIMS_DATA_PATH")?
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_PATH), PathBuf::from);

        let body_limit = match optional_env_var("SIMS_BODY_LIMIT")? {
            Some(limit) => limit.parse().context(ParseBodyLimitSnafu)?,
            None => DEFAULT_BODY_LIMIT,
        };

        Ok(Self {
            server_ip,
            data_path,
            body_limit,
        })
    }

    #[cfg(test)]
    pub fn with_data_path(data_path: impl Into<PathBuf>) -> Self {
        Self {
            server_ip: format!("127.0.0.1:{DEFAULT_PORT}"),
            data_path: data_path.into(),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

fn optional_env_var(name: &'static str) -> SimsResult<Option<String>> {
    match var(name) {
        Ok(value) => Ok(Some(value)),
        Err(dotenvy::Error::EnvVar(VarError::NotPresent)) => Ok(None),
        Err(e) => Err(e).context(BadEnvVarSnafu { name }),
    }
}
