// SPDX-License-Identifier: MIT OR Apache-2.0
//! Headless ScalerFader demo.
//!
//! Builds a stack of named elements, drives the rotation with a 60 Hz frame
//! clock and logs every time the front element changes.
//!
//! Usage: `scalerfader_demo [CONFIG.ron] [SECONDS]`

use scalerfader::{Element, ScalerFader, ScalerFaderConfig};
use scalerfader_animation::AnimationClock;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const FRAME: Duration = Duration::from_micros(16_667);
const DEFAULT_SECONDS: u64 = 12;
const PHOTOS: [&str; 4] = ["harbour", "lighthouse", "dunes", "pier"];

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting ScalerFader demo v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run() {
        tracing::error!("Demo failed: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => ScalerFaderConfig::load(&PathBuf::from(path))?,
        None => ScalerFaderConfig { start_immediately: true, ..Default::default() },
    };
    let seconds = match args.next() {
        Some(value) => value.parse()?,
        None => DEFAULT_SECONDS,
    };

    let clock = AnimationClock::new();
    let fader = ScalerFader::new(config, clock.clone())?;
    fader.push_all(PHOTOS.map(Element::new))?;

    fader.on_layout()?;
    if !fader.is_started() {
        fader.start()?;
    }

    let mut front = front_name(&fader);
    tracing::info!("Rotation started with {} on top", front);

    let frames = Duration::from_secs(seconds).as_nanos() / FRAME.as_nanos();
    for _ in 0..frames {
        clock.tick(FRAME);

        let current = front_name(&fader);
        if current != front {
            let order: Vec<_> = fader.children().iter().map(|e| e.name().to_string()).collect();
            tracing::info!(
                "{:>8.2}s  {} on top, stack {:?}",
                clock.now().as_secs_f32(),
                current,
                order
            );
            front = current;
        }

        for element in fader.children() {
            let (sx, sy) = element.scale();
            tracing::trace!(
                "{} scale ({:.3}, {:.3}) alpha {:.3}",
                element.name(),
                sx,
                sy,
                element.alpha()
            );
        }
    }

    fader.on_detached();
    tracing::info!("Detached after {} frames, stack restored", clock.frame());
    Ok(())
}

fn front_name(fader: &ScalerFader) -> String {
    fader
        .children()
        .last()
        .map(|e| e.name().to_string())
        .unwrap_or_default()
}
