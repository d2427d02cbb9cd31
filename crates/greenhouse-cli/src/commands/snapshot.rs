//! Snapshot command implementation.
//!
//! Generates batches back to back without a timer, stamping batch `i` one
//! feed interval after batch `i - 1`, and prints a single frame.

use std::time::Duration;

use anyhow::{Context, Result};
use time::OffsetDateTime;
use tracing::{debug, warn};

use super::{DashboardContext, write_frame};

pub fn cmd_snapshot(ctx: &DashboardContext, ticks: u32) -> Result<()> {
    ctx.feed.validate()?;
    let mut controller = ctx.controller()?;
    let mut generator = ctx.feed.generator();

    let start = OffsetDateTime::now_utc();
    for tick in 1..=ticks {
        let batch = generator.batch_at(stamp_for_tick(start, ctx.feed.interval, tick)?)?;
        let outcome = controller.ingest(batch);
        debug!(tick, ?outcome, "Generated batch");
    }

    if ctx.page != 1 && !controller.set_page(ctx.page) {
        warn!(
            "Page {} is out of range (1-{}), showing page 1",
            ctx.page,
            controller.page_count()
        );
    }

    let frame = ctx.render(&mut controller)?;
    write_frame(&frame, false)
}

/// `start + interval * tick`, or an error when the result is not representable.
fn stamp_for_tick(start: OffsetDateTime, interval: Duration, tick: u32) -> Result<OffsetDateTime> {
    interval
        .checked_mul(tick)
        .and_then(|offset| time::Duration::try_from(offset).ok())
        .and_then(|offset| start.checked_add(offset))
        .with_context(|| {
            format!(
                "Interval of {}ms over {} ticks is out of the supported time range",
                interval.as_millis(),
                tick
            )
        })
}
