//! Poll loop: fetch → parse → plan → render → sleep, until cancelled.
//!
//! ```text
//! Idle → Fetching → Parsing → Planning → Rendering → Sleeping → Fetching …
//!            │          │                                │
//!            └──────────┴──── failure: skip to Sleeping ─┘
//! ```
//!
//! A failed fetch or parse never touches the canvas, so the previous frame
//! stays on screen. Cancellation is observed at the top of every cycle and
//! between sleep increments; once observed the canvas is cleared and closed.

use std::time::Duration;

use anyhow::Result;
use tracing::{debug, error, info, instrument, warn};

use crate::cancel::CancelToken;
use crate::core::{parse, present, Canvas, PlanOptions, Planner};
use crate::transport::Transport;
use crate::types::{DEFAULT_POLL_INTERVAL_SECS, DEFAULT_SLEEP_INCREMENT_MS, DEFAULT_SOURCE_URL};

/// Bytes of an unparseable body echoed into the log.
const PREVIEW_BYTES: usize = 80;

const MIN_SLEEP_INCREMENT: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollConfig {
    pub source_url: String,
    pub poll_interval: Duration,
    /// Upper bound on how long a cancellation can go unnoticed while sleeping.
    pub sleep_increment: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            sleep_increment: Duration::from_millis(DEFAULT_SLEEP_INCREMENT_MS),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Fetching,
    Parsing,
    Planning,
    Rendering,
    Sleeping,
    Interrupted,
}

/// Result of a single cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new frame with this many instructions was committed.
    Rendered(usize),
    TransportFailed,
    ParseFailed,
    RenderFailed,
    Interrupted,
}

pub struct PollLoop<T, C> {
    transport: T,
    canvas: C,
    planner: Planner,
    config: PollConfig,
    token: CancelToken,
    phase: Phase,
    cycles: u64,
}

impl<T: Transport, C: Canvas> PollLoop<T, C> {
    /// The planner takes its font metrics from `canvas`.
    pub fn new(
        transport: T,
        canvas: C,
        options: PlanOptions,
        config: PollConfig,
        token: CancelToken,
    ) -> Self {
        let geometry = canvas.geometry();
        let planner = Planner::new(options, geometry.font);
        let (need_w, need_h) = planner.extent();
        if i32::from(geometry.width) < need_w || i32::from(geometry.height) < need_h {
            warn!(
                width = geometry.width,
                height = geometry.height,
                need_w,
                need_h,
                "Panel is smaller than the board, lines will be clipped"
            );
        }
        Self {
            transport,
            canvas,
            planner,
            config,
            token,
            phase: Phase::Idle,
            cycles: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    /// Cycles started so far, including failed ones.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    fn enter(&mut self, phase: Phase) {
        debug!(from = ?self.phase, to = ?phase, "Poll loop transition");
        self.phase = phase;
    }

    /// Run one fetch → render pass. Does not sleep.
    #[instrument(skip(self), fields(url = %self.config.source_url))]
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        if self.token.is_cancelled() {
            self.enter(Phase::Interrupted);
            return CycleOutcome::Interrupted;
        }
        self.cycles += 1;

        self.enter(Phase::Fetching);
        let body = match self.transport.fetch(&self.config.source_url).await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, cycle = self.cycles, "Fetch failed, keeping previous frame");
                return CycleOutcome::TransportFailed;
            }
        };

        self.enter(Phase::Parsing);
        let snapshot = match parse(&body) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                let preview = String::from_utf8_lossy(&body[..body.len().min(PREVIEW_BYTES)]);
                warn!(
                    error = %e,
                    bytes = body.len(),
                    preview = %preview,
                    "Discarding unusable payload, keeping previous frame"
                );
                return CycleOutcome::ParseFailed;
            }
        };

        self.enter(Phase::Planning);
        let plan = self.planner.plan(&snapshot);

        self.enter(Phase::Rendering);
        if let Err(e) = present(&mut self.canvas, &plan) {
            error!(error = ?e, "Rendering leaderboard failed");
            return CycleOutcome::RenderFailed;
        }

        info!(
            entries = snapshot.entries.len(),
            instructions = plan.len(),
            month = ?snapshot.month,
            "Leaderboard rendered"
        );
        CycleOutcome::Rendered(plan.len())
    }

    /// Wait out the poll interval in increments. Returns `false` if cancelled.
    pub async fn sleep(&mut self) -> bool {
        self.enter(Phase::Sleeping);
        let mut remaining = self.config.poll_interval;
        while !remaining.is_zero() {
            if self.token.is_cancelled() {
                return false;
            }
            let step = remaining.min(self.config.sleep_increment.max(MIN_SLEEP_INCREMENT));
            tokio::time::sleep(step).await;
            remaining -= step;
        }
        !self.token.is_cancelled()
    }

    /// Loop until cancelled, then blank and release the canvas.
    pub async fn run(&mut self) -> Result<()> {
        info!(
            url = %self.config.source_url,
            interval_secs = self.config.poll_interval.as_secs(),
            "Starting poll loop"
        );

        loop {
            if self.run_cycle().await == CycleOutcome::Interrupted {
                break;
            }
            if !self.sleep().await {
                break;
            }
        }

        self.shutdown()
    }

    /// `close` runs even if blanking fails; the first error wins.
    fn shutdown(&mut self) -> Result<()> {
        self.enter(Phase::Interrupted);
        info!(cycles = self.cycles, "Poll loop stopped, clearing display");
        let blanked = self.canvas.clear().and_then(|()| self.canvas.commit());
        let closed = self.canvas.close();
        if let Err(e) = &blanked {
            error!(error = ?e, "Clearing display on shutdown failed");
        }
        blanked.and(closed)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;
    use crate::core::{Geometry, RecordingCanvas};
    use crate::transport::TransportError;
    use crate::types::Rgb;

    const GOOD: &str = r#"{"leaderboard":[{"username":"alice","points":50}],"month":5}"#;

    /// Serves scripted responses, cancelling the token once they run out.
    struct Scripted {
        responses: Mutex<VecDeque<Result<Vec<u8>, TransportError>>>,
        token: CancelToken,
    }

    impl Scripted {
        fn new(token: &CancelToken, responses: Vec<Result<&str, &str>>) -> Self {
            let responses = responses
                .into_iter()
                .map(|r| {
                    r.map(|b| b.as_bytes().to_vec())
                        .map_err(|e| TransportError::new("http://test/", e))
                })
                .collect();
            Self {
                responses: Mutex::new(responses),
                token: token.clone(),
            }
        }
    }

    impl Transport for Scripted {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>, TransportError> {
            let next = self.responses.lock().unwrap().pop_front();
            match next {
                Some(r) => r,
                None => {
                    self.token.cancel();
                    Err(TransportError::new(url, "script exhausted"))
                }
            }
        }
    }

    fn fast_config() -> PollConfig {
        PollConfig {
            source_url: "http://test/".to_string(),
            poll_interval: Duration::from_millis(20),
            sleep_increment: Duration::from_millis(5),
        }
    }

    fn poll_loop(
        token: &CancelToken,
        responses: Vec<Result<&str, &str>>,
    ) -> PollLoop<Scripted, RecordingCanvas> {
        PollLoop::new(
            Scripted::new(token, responses),
            RecordingCanvas::default(),
            PlanOptions::default(),
            fast_config(),
            token.clone(),
        )
    }

    #[tokio::test]
    async fn good_payload_renders_a_frame() {
        let token = CancelToken::new();
        let mut pl = poll_loop(&token, vec![Ok(GOOD)]);

        assert_eq!(pl.phase(), Phase::Idle);
        assert_eq!(pl.run_cycle().await, CycleOutcome::Rendered(4));
        assert_eq!(pl.phase(), Phase::Rendering);
        assert_eq!(pl.canvas().frames().len(), 1);
    }

    #[tokio::test]
    async fn failures_leave_the_previous_frame_untouched() {
        let token = CancelToken::new();
        let mut pl = poll_loop(&token, vec![Ok(GOOD), Err("refused"), Ok("not json"), Ok("{}")]);

        pl.run_cycle().await;
        let shown = pl.canvas().current().unwrap().to_vec();

        assert_eq!(pl.run_cycle().await, CycleOutcome::TransportFailed);
        assert_eq!(pl.phase(), Phase::Fetching);
        assert_eq!(pl.run_cycle().await, CycleOutcome::ParseFailed);
        assert_eq!(pl.run_cycle().await, CycleOutcome::ParseFailed);
        assert_eq!(pl.phase(), Phase::Parsing);

        assert_eq!(pl.canvas().frames().len(), 1);
        assert_eq!(pl.canvas().clear_count(), 1);
        assert_eq!(pl.canvas().current().unwrap(), shown.as_slice());
        assert_eq!(pl.cycles(), 4);
    }

    #[tokio::test]
    async fn cancelled_token_skips_the_fetch() {
        let token = CancelToken::new();
        let mut pl = poll_loop(&token, vec![Ok(GOOD)]);
        token.cancel();

        assert_eq!(pl.run_cycle().await, CycleOutcome::Interrupted);
        assert_eq!(pl.phase(), Phase::Interrupted);
        assert_eq!(pl.cycles(), 0);
        assert!(pl.canvas().frames().is_empty());
    }

    #[tokio::test]
    async fn run_blanks_and_closes_the_canvas_on_exit() {
        let token = CancelToken::new();
        let mut pl = poll_loop(&token, vec![Ok(GOOD), Ok(GOOD)]);

        tokio::time::timeout(Duration::from_secs(5), pl.run())
            .await
            .expect("loop did not stop")
            .unwrap();

        let canvas = pl.canvas();
        assert_eq!(canvas.frames().len(), 3);
        assert!(canvas.current().unwrap().is_empty());
        assert!(canvas.is_closed());
        assert_eq!(pl.phase(), Phase::Interrupted);
    }

    #[tokio::test]
    async fn sleep_stops_within_one_increment_of_cancellation() {
        let token = CancelToken::new();
        let mut pl = PollLoop::new(
            Scripted::new(&token, vec![]),
            RecordingCanvas::default(),
            PlanOptions::default(),
            PollConfig {
                poll_interval: Duration::from_secs(300),
                sleep_increment: Duration::from_millis(10),
                ..fast_config()
            },
            token.clone(),
        );

        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(30)).await;
            canceller.cancel();
        });

        let finished = tokio::time::timeout(Duration::from_secs(5), pl.sleep()).await;
        assert_eq!(finished, Ok(false));
    }

    /// Delegates to a [`RecordingCanvas`] but refuses to clear.
    struct StuckCanvas(RecordingCanvas);

    impl Canvas for StuckCanvas {
        fn geometry(&self) -> Geometry {
            self.0.geometry()
        }

        fn clear(&mut self) -> Result<()> {
            anyhow::bail!("panel unplugged")
        }

        fn draw_text(&mut self, x: i32, y: i32, color: Rgb, text: &str) -> Result<()> {
            self.0.draw_text(x, y, color, text)
        }

        fn commit(&mut self) -> Result<()> {
            self.0.commit()
        }

        fn close(&mut self) -> Result<()> {
            self.0.close()
        }
    }

    #[tokio::test]
    async fn close_runs_even_when_blanking_fails() {
        let token = CancelToken::new();
        token.cancel();
        let mut pl = PollLoop::new(
            Scripted::new(&token, vec![]),
            StuckCanvas(RecordingCanvas::default()),
            PlanOptions::default(),
            fast_config(),
            token.clone(),
        );

        let err = pl.run().await.unwrap_err();
        assert!(err.to_string().contains("unplugged"));
        assert!(pl.canvas().0.is_closed());
        assert_eq!(pl.phase(), Phase::Interrupted);
    }
}
