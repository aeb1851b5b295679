/*
 *  main.rs
 *
 *  clockface - analog clock face widget
 *  (c) 2020-26 Stuart Hunter
 *
 *  Host: renders the clock into a framebuffer and writes each frame out
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::path::Path;

use anyhow::{Context, Result};
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use env_logger::Env;
use log::{debug, info, trace, warn};
use tokio::sync::mpsc::unbounded_channel;

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

use clockface::canvas::EgCanvas;
use clockface::config::{self, DEFAULT_SIDE};
use clockface::face::{AttrValue, ClockStyle, FixedClock, LocalClock, MeasureSpec, TimeSource};
use clockface::vframebuf::VarFrameBuf;
use clockface::view::{ClockView, Scheduler, TokioScheduler};

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Waits for SIGINT, SIGTERM or SIGHUP.
#[cfg(unix)]
async fn signal_handler() -> std::io::Result<()> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sighup = signal(SignalKind::hangup())?;

    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT received. Initiating graceful shutdown.");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received. Initiating graceful shutdown.");
        }
        _ = sighup.recv() => {
            info!("SIGHUP received. Initiating graceful shutdown.");
        }
    }
    Ok(())
}

#[cfg(not(unix))]
async fn signal_handler() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await?;
    info!("Ctrl-C received. Initiating graceful shutdown.");
    Ok(())
}

fn dimension(value: Option<u32>) -> MeasureSpec {
    match value {
        Some(px) => MeasureSpec::exactly(px),
        None => MeasureSpec::unspecified(DEFAULT_SIDE),
    }
}

/// One host frame: clear the surface, let the view draw, publish the result.
fn render<S: Scheduler, T: TimeSource>(
    view: &mut ClockView<S, T>,
    fb: &mut VarFrameBuf<Rgb888>,
    surface: Rgb888,
    output: Option<&Path>,
) -> Result<()> {
    fb.clear_color(surface);
    let frame = view.on_draw(&mut EgCanvas::new(fb)).context("drawing clock face")?;
    if let Some(path) = output {
        fb.save_ppm(path)
            .with_context(|| format!("writing frame to {}", path.display()))?;
    }
    debug!(
        "frame {} drawn for {:02}:{:02}:{:02}",
        view.frames(),
        frame.time.hour,
        frame.time.minute,
        frame.time.second
    );
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let (cfg, cli) = config::load().context("loading configuration")?;

    if cli.dump_config {
        print!("{}", cfg.to_yaml()?);
        return Ok(());
    }

    let level = cfg.log_level.clone().unwrap_or_else(|| "info".to_string());
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();

    info!("{} analog clock", env!("CARGO_PKG_NAME"));
    info!("v.{} built {} ({})", env!("CARGO_PKG_VERSION"), BUILD_DATE, BUILD_PROFILE);

    let style = ClockStyle::from_attributes(&cfg.style());
    let surface = cfg
        .surface_color
        .as_ref()
        .and_then(AttrValue::as_color)
        .unwrap_or(Rgb888::BLACK);

    let clock: Box<dyn TimeSource> = match cfg.fixed_time() {
        Some(t) => {
            info!("clock fixed at {:02}:{:02}:{:02}", t.hour, t.minute, t.second);
            Box::new(FixedClock(t))
        }
        None => Box::new(LocalClock),
    };

    let (tx, mut rx) = unbounded_channel();
    let mut view = ClockView::new(style, TokioScheduler::new(tx, cfg.fps()), clock);

    let (width, height) = cfg.dimensions();
    let side = view.on_measure(dimension(width), dimension(height));
    let mut fb = VarFrameBuf::new(
        width.unwrap_or(side.width),
        height.unwrap_or(side.height),
        surface,
    );
    info!("surface {}x{}, clock {}x{}", fb.width(), fb.height(), side.width, side.height);

    let output = cfg.output.as_deref();
    if output.is_none() {
        warn!("no --output given, frames are rendered but not written");
    }

    if cli.once {
        render(&mut view, &mut fb, surface, output)?;
        return Ok(());
    }

    view.on_attached();

    let shutdown = signal_handler();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            res = &mut shutdown => {
                if let Err(e) = res {
                    warn!("signal handling failed: {}", e);
                }
                break;
            }
            req = rx.recv() => match req {
                Some(req) => {
                    trace!("redraw {} due ({:?})", req.id, req.redraw);
                    render(&mut view, &mut fb, surface, output)?;
                }
                None => break,
            }
        }
    }

    view.on_detached();
    info!("{} frames rendered, bye", view.frames());
    Ok(())
}
