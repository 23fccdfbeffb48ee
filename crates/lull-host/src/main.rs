use anyhow::{Context, Result};
use lull_engine::device::GpuInit;
use lull_engine::logging::{init_logging, LoggingConfig};
use lull_engine::window::{Runtime, RuntimeConfig};
use lull_host::{HostConfig, UiHost};
use winit::dpi::LogicalSize;

fn main() -> Result<()> {
    let config = HostConfig::load().context("loading host config")?;

    init_logging(LoggingConfig {
        env_filter: config.log_filter.clone(),
        ..LoggingConfig::default()
    });
    log::debug!("{config:?}");

    let host = UiHost::new(&config);
    Runtime::run(
        RuntimeConfig {
            title: config.title.clone(),
            initial_size: LogicalSize::new(config.width, config.height),
        },
        GpuInit::default(),
        host,
    )
}
