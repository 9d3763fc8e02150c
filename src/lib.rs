// Public modules
pub mod bus;
pub mod config;
pub mod errors;
pub mod messages;
pub mod reader;
pub mod record;
pub mod scheduler;

// Re-export commonly used types
pub use config::{load_config, load_config_or_default, AppConfig};
pub use errors::{ConfigError, ReaderError, ReaderResult};
pub use reader::{CodeReader, DEVICE_ADDRESS, MAX_BYTES_PER_CHUNK, REG_LED_STATE};
pub use record::{CodeReaderResults, CONTENT_BYTE_COUNT, RESULTS_WIRE_SIZE};
pub use scheduler::{run_reader_loop, ScanPoller};

use tokio::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Initialize tracing with default configuration
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();
}

/// Run the code reader daemon with the given configuration directory
pub async fn run_code_reader(config_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    info!("[TinyCodeReader] starting up...");

    let reader_config_path = format!("{}/reader.toml", config_path);
    let config = load_config_or_default(&reader_config_path)?;
    let settings = config.reader;
    info!("[config] reader '{}' on {}", settings.id, settings.bus);

    let wire = bus::open_linux_bus(&settings.bus)?;
    let mut reader = CodeReader::new(wire);
    reader.set_led(settings.led);
    info!("[reader] LED {}", if settings.led { "on" } else { "off" });

    let mut poller = ScanPoller::new(reader, settings.id.clone());
    run_reader_loop(
        &mut poller,
        Duration::from_millis(settings.poll_interval_ms),
        None,
    )
    .await;

    Ok(())
}
