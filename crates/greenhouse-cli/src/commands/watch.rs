//! Watch command implementation.
//!
//! Runs the simulated feed and redraws the dashboard after every batch.
//! A requested page is applied as soon as enough readings have arrived for
//! it to exist.

use anyhow::Result;
use tracing::debug;

use greenhouse_core::SensorFeed;

use crate::cli::OutputFormat;

use super::{DashboardContext, write_frame};

pub async fn cmd_watch(ctx: &DashboardContext, ticks: u32) -> Result<()> {
    let mut controller = ctx.controller()?;
    let (feed, mut batches) = SensorFeed::channel(ctx.feed.clone())?;

    if !ctx.quiet {
        eprintln!(
            "Watching {} sensors every {}ms | Press Ctrl+C to stop",
            ctx.feed.sensor_count,
            ctx.feed.interval.as_millis()
        );
    }

    let clear = ctx.format == OutputFormat::Text;
    let mut pending_page = (ctx.page != 1).then_some(ctx.page);
    let mut received: u32 = 0;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                eprintln!("\nShutting down...");
                break;
            }
            batch = batches.next_batch() => {
                let Ok(batch) = batch else {
                    debug!("Feed stopped");
                    break;
                };
                received += 1;
                controller.ingest(batch);

                if let Some(page) = pending_page
                    && controller.set_page(page)
                {
                    pending_page = None;
                }

                let frame = ctx.render(&mut controller)?;
                write_frame(&frame, clear)?;

                if ticks > 0 && received >= ticks {
                    if !ctx.quiet {
                        eprintln!("Completed {} batches.", received);
                    }
                    break;
                }
            }
        }
    }

    feed.cancel();
    Ok(())
}
