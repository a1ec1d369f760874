use log::info;
use once_cell::sync::OnceCell;

static LOGGER_INITIALIZED: OnceCell<()> = OnceCell::new();

/// Installs `env_logger` as the global logger.
///
/// Idempotent and thread-safe: only the first call does anything. Filtering is
/// controlled by `RUST_LOG` as usual. If another logger is already installed
/// the failure is reported on stderr and otherwise ignored.
pub fn init_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        match env_logger::builder().is_test(cfg!(test)).try_init() {
            Ok(_) => info!("framepair logger initialized."),
            Err(e) => eprintln!(
                "Failed to initialize logger: {}. Logging might not work as expected.",
                e
            ),
        };
    });
}
