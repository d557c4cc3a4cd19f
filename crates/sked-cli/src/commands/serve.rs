use anyhow::Result;

use crate::cli::ServeCommand;
use crate::config::Config;
use crate::server;

pub async fn serve(mut config: Config, command: ServeCommand) -> Result<()> {
    if let Some(port) = command.port {
        config.port = port;
    }
    server::serve(config).await
}
