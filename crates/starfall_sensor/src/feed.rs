use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TrySendError};
use starfall_core::SensorMessage;
use tracing::{debug, info, warn};

use crate::codec::FeedError;
use crate::range::DistanceRange;
use crate::source::HeightmapSource;

/// Control messages from the simulation thread to the sensor worker
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorCommand {
    SetDistanceRange { min: f32, max: f32 },
    ShiftDistanceRange { dmin: f32, dmax: f32 },
}

/// Frames buffered before the worker starts dropping them
const QUEUE_DEPTH: usize = 4;

/// Background acquisition loop. Messages are picked up between frames with
/// [`SensorFeed::try_recv_latest`]; dropping the feed stops the worker.
pub struct SensorFeed {
    messages: Receiver<SensorMessage>,
    commands: Option<Sender<SensorCommand>>,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl SensorFeed {
    /// Spawn the worker. `interval` is the pause between acquisitions;
    /// blocking sources can use `Duration::ZERO`.
    pub fn start<S>(source: S, interval: Duration) -> Result<Self, FeedError>
    where
        S: HeightmapSource + 'static,
    {
        let (message_tx, messages) = crossbeam_channel::bounded(QUEUE_DEPTH);
        let (commands, command_rx) = crossbeam_channel::unbounded();
        let running = Arc::new(AtomicBool::new(true));

        let flag = Arc::clone(&running);
        let worker = thread::Builder::new()
            .name("sensor-feed".into())
            .spawn(move || run_worker(source, interval, flag, message_tx, command_rx))?;

        info!("Sensor feed started ({:?} interval)", interval);
        Ok(Self {
            messages,
            commands: Some(commands),
            running,
            worker: Some(worker),
        })
    }

    /// False once stopped, and also after the worker died on its own
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
            && self.worker.as_ref().is_some_and(|w| !w.is_finished())
    }

    /// Messages waiting to be picked up
    pub fn pending(&self) -> usize {
        self.messages.len()
    }

    /// Newest pending message; older ones are discarded
    pub fn try_recv_latest(&self) -> Option<SensorMessage> {
        self.messages.try_iter().last()
    }

    pub fn send(&self, command: SensorCommand) -> Result<(), FeedError> {
        let tx = self.commands.as_ref().ok_or(FeedError::Disconnected)?;
        tx.send(command).map_err(|_| FeedError::Disconnected)
    }

    pub fn set_distance_range(&self, min: f32, max: f32) -> Result<(), FeedError> {
        self.send(SensorCommand::SetDistanceRange { min, max })
    }

    pub fn shift_distance_range(&self, dmin: f32, dmax: f32) -> Result<(), FeedError> {
        self.send(SensorCommand::ShiftDistanceRange { dmin, dmax })
    }

    /// Signal the worker and wait for it to exit
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        // Closing the command channel wakes a worker sleeping on it
        self.commands = None;
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Sensor worker panicked");
            } else {
                info!("Sensor feed stopped");
            }
        }
    }
}

impl Drop for SensorFeed {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Clears the running flag however the worker exits, unwinding included
struct RunningGuard(Arc<AtomicBool>);

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

fn run_worker<S: HeightmapSource>(
    mut source: S,
    interval: Duration,
    running: Arc<AtomicBool>,
    messages: Sender<SensorMessage>,
    commands: Receiver<SensorCommand>,
) {
    let running = RunningGuard(running);
    let mut range = DistanceRange::default();
    source.set_distance_range(range);

    while running.0.load(Ordering::Acquire) {
        match source.next_message() {
            Ok(message) => match messages.try_send(message) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => debug!("Sensor queue full, frame dropped"),
                Err(TrySendError::Disconnected(_)) => break,
            },
            Err(e) => warn!("Sensor acquisition failed: {}", e),
        }

        // Doubles as the pacing sleep
        let first = match commands.recv_timeout(interval) {
            Ok(command) => Some(command),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => break,
        };
        for command in first.into_iter().chain(commands.try_iter()) {
            match command {
                SensorCommand::SetDistanceRange { min, max } => range.set(min, max),
                SensorCommand::ShiftDistanceRange { dmin, dmax } => range.shift(dmin, dmax),
            }
            info!("Sensor distance range: {:.1} - {:.1} m", range.min, range.max);
            source.set_distance_range(range);
        }
    }
}
