use clap::Parser;

use crate::entity::ADMINISTRATOR_ID;
use crate::errors::ServiceError;
use crate::resolver::ResolverConfig;

/// Server configuration.
#[derive(Parser, Debug, Clone)]
#[clap(name = "people-assign-server", about = "People assignment resolution service")]
pub struct Config {
    /// IP address to bind to
    #[clap(long, default_value = "127.0.0.1", env = "APP_HOST")]
    pub host: String,

    /// Port to listen on
    #[clap(long, default_value = "9999", env = "APP_PORT")]
    pub port: u16,

    /// Number of worker threads
    #[clap(long, default_value = "4", env = "APP_WORKERS")]
    pub workers: usize,

    /// User placed first in every business administrator list
    #[clap(long, default_value = ADMINISTRATOR_ID, env = "APP_ADMINISTRATOR")]
    pub administrator: String,

    /// Character separating IDs inside one parameter value
    #[clap(long, default_value = ",", env = "APP_ID_SEPARATOR")]
    pub separator: char,

    /// Print version information and exit
    #[clap(long)]
    pub version: bool,
}

impl Config {
    /// Resolver settings derived from the command line, validated.
    pub fn resolver_config(&self) -> Result<ResolverConfig, ServiceError> {
        let config = ResolverConfig {
            administrator: self.administrator.clone(),
            separator: self.separator,
            ..ResolverConfig::default()
        };
        config.validate()?;
        Ok(config)
    }
}
