mod app;
mod host;

use anyhow::Result;
use backdrop_engine::logging::{init_logging, LoggingConfig};

use app::{Preview, PreviewConfig};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    Preview::run(PreviewConfig::default())
}
