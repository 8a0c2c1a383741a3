//! Consensus-side collaborators of the Zone hashing core: the per-network
//! parameter table and the mining workers that drive the proof-of-work
//! lifecycle.

pub mod config;
pub mod protocol;

#[cfg(test)]
mod tests {
    use tracing::level_filters::LevelFilter;
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry};

    // always setup tracing first
    #[ctor::ctor]
    fn setup() {
        let console_layer = fmt::layer()
            .with_test_writer()
            .with_ansi(false)
            .with_level(true)
            .with_filter(LevelFilter::DEBUG);

        let _ = Registry::default()
            .with(console_layer)
            .try_init();
    }
}
