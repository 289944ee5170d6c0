//! Feed module - drives the display from a remote leaderboard feed.
//!
//! This crate owns everything that touches the outside world on a schedule:
//! the HTTP transport, process signals, and the poll loop that feeds parsed
//! snapshots into a [`Canvas`](core::Canvas).
//!
//! # Cycle
//!
//! 1. **Fetch**: one GET against the configured URL ([`transport`])
//! 2. **Parse**: bytes → snapshot; failures are logged and skip the render
//! 3. **Plan**: snapshot → draw instructions
//! 4. **Render**: clear, draw all, commit
//! 5. **Sleep**: the poll interval, split into short increments so a
//!    termination signal is noticed promptly ([`cancel`])
//!
//! No state is carried from one cycle to the next; a failed cycle simply
//! leaves the previous frame on screen until the next poll.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use led_leaderboard_core::{PlanOptions, RecordingCanvas};
//! use led_leaderboard_feed::{install_signal_handlers, CancelToken, HttpTransport, PollConfig, PollLoop};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let token = CancelToken::new();
//! install_signal_handlers(token.clone())?;
//!
//! let transport = HttpTransport::new(Duration::from_secs(10))?;
//! let mut poll_loop = PollLoop::new(
//!     transport,
//!     RecordingCanvas::default(),
//!     PlanOptions::default(),
//!     PollConfig::default(),
//!     token,
//! );
//! poll_loop.run().await?;
//! # Ok(())
//! # }
//! ```

pub mod cancel;
pub mod poll_loop;
pub mod transport;

pub use led_leaderboard_core as core;
pub use led_leaderboard_types as types;

pub use cancel::{install_signal_handlers, CancelToken};
pub use poll_loop::{CycleOutcome, Phase, PollConfig, PollLoop};
pub use transport::{HttpTransport, Transport, TransportError};
