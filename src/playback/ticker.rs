use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;


/// The event a [`Ticker`] sends once per interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advance;


/// A cancelable periodic task.
///
/// The ticker owns a background thread that sends [`Advance`]
/// every `interval` until it is canceled or dropped,
/// or until the receiving side is gone.
/// Canceling joins the thread, so no event is sent afterwards.
///
/// # Example
/// ```no_run
/// use std::time::Duration;
/// use boostsim::prelude::*;
///
/// let mut playback = Playback::new(5);
/// playback.apply(Intent::Play);
///
/// let (mut ticker, events) = Ticker::spawn(Duration::from_millis(1_200));
/// for _ in events.iter() {
///     playback.apply(Intent::Tick);
///     if !playback.is_playing() {
///         break;
///     }
/// }
/// ticker.cancel();
/// ```
pub struct Ticker {
    interval: Duration,
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}


impl Ticker {
    /// Start ticking every `interval`.
    pub fn spawn(interval: Duration) -> (Self, Receiver<Advance>) {
        let (events, receiver) = mpsc::channel();
        let (stop, stopped) = mpsc::channel::<()>();

        let handle = thread::spawn(move || loop {
            match stopped.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {
                    if events.send(Advance).is_err() {
                        break;
                    }
                },
                // A stop message or a dropped sender.
                _ => break,
            }
        });

        let ticker = Self {
            interval,
            stop: Some(stop),
            handle: Some(handle),
        };
        (ticker, receiver)
    }


    /// The tick interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }


    /// Returns `true` until [`Ticker::cancel`] is called.
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }


    /// Stop ticking and wait for the background thread.
    /// Calling this more than once is a no-op.
    pub fn cancel(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("ticker thread panicked");
            }
        }
    }
}


impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}
