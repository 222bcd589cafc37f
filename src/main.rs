use std::time::Instant;

use anyhow::Context;
use tracing::info;

use wavedock::dock::{
    calculate_dock_icons, react_to_position, update_dock_size, Dock, IdleScheduler,
    LayoutContext,
};
use wavedock::geometry::Rect;
use wavedock::{Icon, IconKind, LayoutConfig};

fn main() -> anyhow::Result<()> {
    if let Ok(env_filter) = tracing_subscriber::EnvFilter::try_from_default_env() {
        tracing_subscriber::fmt()
            .compact()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("info")
            .compact()
            .init();
    }

    let config = match std::env::args().nth(1) {
        Some(path) => LayoutConfig::from_file(&path)
            .with_context(|| format!("loading configuration from {path}"))?,
        None => LayoutConfig::load(),
    };
    let ctx = LayoutContext::new(config);

    let mut dock = Dock::new();
    dock.set_icons(
        vec![
            Icon::new(IconKind::Launcher, 48.0, 48.0),
            Icon::new(IconKind::Launcher, 48.0, 48.0),
            Icon::new(IconKind::Separator, 12.0, 48.0),
            Icon::new(IconKind::AppTask, 48.0, 48.0),
            Icon::new(IconKind::Applet, 48.0, 48.0),
        ],
        &ctx.config,
    );

    let mut scheduler = IdleScheduler::new();
    update_dock_size(&mut dock, &ctx, &mut scheduler);
    if let Some(request) = scheduler.drain(&dock, &ctx) {
        info!(?request, "initial window geometry");
    }
    dock.window = Rect::new(0.0, 0.0, dock.max_width, dock.max_height);
    info!(
        icons = dock.icons.len(),
        flat_width = dock.flat_width,
        max_width = dock.max_width,
        max_height = dock.max_height,
        ratio = dock.ratio,
        "dock sized"
    );

    // sweep the pointer across the fully grown dock and report what it hits
    dock.magnitude_index = wavedock::dock::GROWTH_STEPS;
    dock.mouse_y = dock.window.height - 10.0;
    let now = Instant::now();
    let steps = 16;
    for i in 0..=steps {
        dock.mouse_x = dock.window.width * i as f64 / steps as f64;
        let pointed = calculate_dock_icons(&mut dock, &ctx.config);
        let signals = react_to_position(&mut dock, &ctx.config, &mut scheduler, now);
        info!(
            mouse_x = dock.mouse_x,
            position = ?dock.mouse_position,
            pointed = ?pointed.map(|i| (i, dock.icons[i].scale)),
            ?signals,
            "pointer step"
        );
    }

    Ok(())
}
