//! Frame consumers. The sink decides the pace; the simulation only produces
//! the next frame when asked.

use async_trait::async_trait;
use std::io::Write;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

use crate::context::ElevatorContext;
use crate::simulation::{Frame, Frames};
use crate::strategy::Strategy;

#[async_trait]
pub trait FrameSink: Send {
    async fn render(&mut self, frame: &Frame) -> anyhow::Result<()>;

    /// Called once the run has drained every request.
    async fn finish(&mut self, _ctx: &ElevatorContext) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Writes one status line per frame.
#[derive(Debug)]
pub struct TextRenderer<W> {
    out: W,
}

impl<W: Write + Send> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn line(frame: &Frame) -> String {
        let mut line = format!(
            "[ FLOOR {} | {:8} | pos {:5.1} | target {} ]",
            frame.floor,
            frame.status.to_string(),
            frame.position,
            frame.target
        );
        if let Some(floor) = frame.serviced {
            line.push_str(&format!(" SERVICED {floor}"));
        }
        line
    }
}

#[async_trait]
impl<W: Write + Send> FrameSink for TextRenderer<W> {
    async fn render(&mut self, frame: &Frame) -> anyhow::Result<()> {
        writeln!(self.out, "{}", Self::line(frame))?;
        self.out.flush()?;
        Ok(())
    }

    async fn finish(&mut self, ctx: &ElevatorContext) -> anyhow::Result<()> {
        writeln!(
            self.out,
            "All requests processed. The elevator is idle at floor {}.",
            ctx.current_floor()
        )?;
        self.out.flush()?;
        Ok(())
    }
}

/// Keeps every frame it is given.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub frames: Vec<Frame>,
    pub finished_at: Option<i32>,
}

#[async_trait]
impl FrameSink for RecordingSink {
    async fn render(&mut self, frame: &Frame) -> anyhow::Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }

    async fn finish(&mut self, ctx: &ElevatorContext) -> anyhow::Result<()> {
        self.finished_at = Some(ctx.current_floor());
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriveSummary {
    pub frames: usize,
    pub serviced: Vec<i32>,
    /// False when the frame limit cut the run short.
    pub completed: bool,
}

/// Pulls frames into `sink`, one per `interval` tick, until the run ends or
/// `limit` frames have been delivered. A zero interval renders flat out.
pub async fn drive<S, K>(
    mut frames: Frames<S>,
    sink: &mut K,
    interval: Duration,
    limit: Option<usize>,
) -> anyhow::Result<DriveSummary>
where
    S: Strategy,
    K: FrameSink + ?Sized,
{
    let mut ticker = (!interval.is_zero()).then(|| {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    });
    let mut summary = DriveSummary::default();

    loop {
        if limit.is_some_and(|limit| summary.frames >= limit) {
            return Ok(summary);
        }
        if let Some(ticker) = ticker.as_mut() {
            ticker.tick().await;
        }
        let Some(frame) = frames.next() else {
            break;
        };
        sink.render(&frame).await?;
        summary.frames += 1;
        summary.serviced.extend(frame.serviced);
    }

    sink.finish(frames.context()).await?;
    summary.completed = true;
    Ok(summary)
}
