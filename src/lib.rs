//! Maskpad - interactive image-masking engine
//!
//! A user paints strokes over a raster image to reveal (Draw) or
//! conceal (Erase) content through a single-channel alpha mask, with
//! full undo/redo and deterministic re-render of the composited result
//! by replaying the stroke history. Windowing, gesture recognition and
//! presentation stay with the embedding application; the engine
//! exchanges in-memory bitmaps by reference.

pub mod composite;
pub mod error;
pub mod geometry;
pub mod history;
pub mod mask;
pub mod session;
pub mod stroke;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging for embedders that don't bring their own
/// subscriber
pub fn init() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "maskpad=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("maskpad initializing...");
}
