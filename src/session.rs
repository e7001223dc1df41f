//! Driving an engine over time.
//!
//! The engine itself is synchronous and tick-at-a-time; this module supplies
//! the pieces around it: a [`Ticker`] deciding when the next tick happens, a
//! [`SampleSlot`] for handing readings from a capture thread to the scoring
//! loop, and [`run_session`] tying them together.
use std::ops::ControlFlow;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use log::{debug, info, warn};
use crate::drivers::{Reading, SampleSource};
use crate::engine::ThreatScoreEngine;
use crate::types::EngineOutput;
/// Decides how long to wait between ticks.
pub trait Ticker {
    /// Called after each tick with the time that tick took.
    fn wait_next(&mut self, last_tick_took: Duration);
}
/// Sleeps a fixed delay after each completed tick. A slow tick pushes the next
/// one back instead of overlapping it, so the cadence is best effort.
pub struct FixedDelayTicker {
    delay: Duration,
}
impl FixedDelayTicker {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}
impl Ticker for FixedDelayTicker {
    fn wait_next(&mut self, last_tick_took: Duration) {
        if last_tick_took > self.delay {
            debug!(
                "tick took {:?}, longer than the {:?} cadence",
                last_tick_took, self.delay
            );
        }
        thread::sleep(self.delay);
    }
}
/// Never waits. For offline replay and tests.
pub struct ImmediateTicker;
impl Ticker for ImmediateTicker {
    fn wait_next(&mut self, _last_tick_took: Duration) {}
}
/// What a feed has for the current tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Feed {
    Ready(Reading),
    /// Nothing new since the last tick; the tick is skipped.
    Idle,
    /// No more readings will arrive.
    Closed,
}
pub trait TickFeed {
    fn poll(&mut self) -> Feed;
}
/// Pulls straight from a source, one reading per tick.
pub struct SourceFeed<S>(pub S);
impl<S: SampleSource> TickFeed for SourceFeed<S> {
    fn poll(&mut self) -> Feed {
        self.0.next_reading().map_or(Feed::Closed, Feed::Ready)
    }
}
#[derive(Default)]
struct SlotState {
    latest: Option<Reading>,
    closed: bool,
    overwritten: u64,
}
/// Single-slot mailbox between capture and scoring. A new reading replaces
/// any unconsumed one; there is never a backlog.
#[derive(Clone, Default)]
pub struct SampleSlot {
    inner: Arc<Mutex<SlotState>>,
}
impl SampleSlot {
    pub fn new() -> Self {
        Self::default()
    }
    fn lock(&self) -> MutexGuard<'_, SlotState> {
        // State is plain data; a panicked writer cannot leave it half-updated.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
    /// Store `reading`, returning true if it displaced an unconsumed one.
    pub fn offer(&self, reading: Reading) -> bool {
        let mut state = self.lock();
        let displaced = state.latest.replace(reading).is_some();
        if displaced {
            state.overwritten += 1;
        }
        displaced
    }
    pub fn take(&self) -> Option<Reading> {
        self.lock().latest.take()
    }
    pub fn close(&self) {
        self.lock().closed = true;
    }
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }
    /// Readings dropped because the consumer had not caught up.
    pub fn overwritten(&self) -> u64 {
        self.lock().overwritten
    }
}
impl TickFeed for SampleSlot {
    fn poll(&mut self) -> Feed {
        let mut state = self.lock();
        match state.latest.take() {
            Some(reading) => Feed::Ready(reading),
            None if state.closed => Feed::Closed,
            None => Feed::Idle,
        }
    }
}
/// Counters for a finished session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionSummary {
    pub ticks: u64,
    pub idle: u64,
    pub calibrating: u64,
    pub scored: u64,
    pub obscured: u64,
    pub faults: u64,
    pub final_score: f64,
}
/// Tick `engine` until the feed closes or `sink` breaks.
pub fn run_session<F, T, S>(
    engine: &mut ThreatScoreEngine,
    feed: &mut F,
    ticker: &mut T,
    mut sink: S,
) -> SessionSummary
where
    F: TickFeed,
    T: Ticker,
    S: FnMut(&EngineOutput) -> ControlFlow<()>,
{
    info!("session started");
    let mut summary = SessionSummary::default();
    loop {
        let started = Instant::now();
        match feed.poll() {
            Feed::Closed => break,
            Feed::Idle => summary.idle += 1,
            Feed::Ready(reading) => {
                let output = engine.tick(reading.sample());
                summary.ticks += 1;
                match output {
                    EngineOutput::Calibrating { .. } => summary.calibrating += 1,
                    EngineOutput::Scored { .. } => summary.scored += 1,
                    EngineOutput::Obscured => summary.obscured += 1,
                }
                if sink(&output).is_break() {
                    break;
                }
            }
        }
        ticker.wait_next(started.elapsed());
    }
    summary.faults = engine.faults();
    summary.final_score = engine.display_score();
    info!(
        "session ended after {} ticks ({} scored, {} obscured, {} faults), score {:.1}",
        summary.ticks, summary.scored, summary.obscured, summary.faults, summary.final_score
    );
    summary
}
/// Background capture thread feeding a [`SampleSlot`].
pub struct CaptureHandle {
    stop_tx: Sender<()>,
    join: Option<JoinHandle<u64>>,
}
impl CaptureHandle {
    /// Stop capturing and return how many readings were produced.
    pub fn stop(mut self) -> u64 {
        self.stop_tx.send(()).ok();
        self.join_inner()
    }
    fn join_inner(&mut self) -> u64 {
        match self.join.take().map(JoinHandle::join) {
            Some(Ok(produced)) => produced,
            Some(Err(_)) => {
                warn!("capture thread panicked");
                0
            }
            None => 0,
        }
    }
}
impl Drop for CaptureHandle {
    fn drop(&mut self) {
        self.stop_tx.send(()).ok();
        self.join_inner();
    }
}
/// Run `source` on its own thread, offering one reading per `interval` to
/// `slot`. The slot is closed when the source runs dry or the handle stops it.
pub fn spawn_capture<S>(mut source: S, slot: SampleSlot, interval: Duration) -> CaptureHandle
where
    S: SampleSource + Send + 'static,
{
    let (stop_tx, stop_rx): (Sender<()>, Receiver<()>) = mpsc::channel();
    let join = thread::spawn(move || {
        let mut produced = 0u64;
        loop {
            match stop_rx.try_recv() {
                Ok(()) | Err(TryRecvError::Disconnected) => break,
                Err(TryRecvError::Empty) => {}
            }
            let Some(reading) = source.next_reading() else {
                break;
            };
            slot.offer(reading);
            produced += 1;
            thread::sleep(interval);
        }
        slot.close();
        debug!(
            "capture stopped after {produced} readings ({} overwritten before scoring)",
            slot.overwritten()
        );
        produced
    });
    CaptureHandle {
        stop_tx,
        join: Some(join),
    }
}
