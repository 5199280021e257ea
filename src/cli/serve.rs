//! Serve command - run the café web page

use mq_cafe::config::load_settings;
use mq_cafe::error::Result;
use mq_cafe::web;
use std::path::Path;

/// Run the serve command
///
/// `bind` overrides the configured listen address.
pub async fn run_serve(path: &Path, config: Option<&Path>, bind: Option<String>) -> Result<()> {
    let mut settings = load_settings(path, config)?;
    if let Some(bind) = bind {
        settings.server.bind = bind;
    }
    web::serve(&settings).await
}
