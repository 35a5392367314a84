//! Background acquisition with at most one live request per view.
//!
//! `trigger` runs a job on a worker thread. Triggering again supersedes the
//! previous request: its cancel token is raised and its result is dropped
//! whenever it arrives, so only the newest acquisition ever reaches the
//! renderer.

use log::{debug, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use thiserror::Error;

/// Identifies one triggered acquisition; later triggers get larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(pub u64);

/// Cooperative cancellation flag handed to every job.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[derive(Debug, Error)]
pub enum LoadError<E> {
    #[error("acquisition failed: {0}")]
    Job(E),
    #[error("acquisition worker stopped without a result")]
    WorkerLost,
}

/// Result of the newest acquisition.
#[derive(Debug)]
pub struct Completed<T, E> {
    pub ticket: Ticket,
    pub result: Result<T, LoadError<E>>,
}

struct InFlight<T, E> {
    ticket: Ticket,
    cancel: CancelToken,
    receiver: Receiver<Result<T, E>>,
}

pub struct DatasetLoader<T, E> {
    next: u64,
    in_flight: Option<InFlight<T, E>>,
}

impl<T, E> Default for DatasetLoader<T, E> {
    fn default() -> Self {
        Self {
            next: 0,
            in_flight: None,
        }
    }
}

impl<T, E> DatasetLoader<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `job` in the background, superseding any request still in flight.
    pub fn trigger<F>(&mut self, job: F) -> Ticket
    where
        F: FnOnce(&CancelToken) -> Result<T, E> + Send + 'static,
    {
        self.cancel();
        self.next += 1;
        let ticket = Ticket(self.next);
        let cancel = CancelToken::default();
        let worker_cancel = cancel.clone();
        let (sender, receiver) = mpsc::channel();

        thread::spawn(move || {
            let result = job(&worker_cancel);
            if worker_cancel.is_cancelled() {
                warn!("acquisition #{} finished after being superseded; dropped", ticket.0);
                return;
            }
            let _ = sender.send(result);
        });

        self.in_flight = Some(InFlight {
            ticket,
            cancel,
            receiver,
        });
        ticket
    }

    /// Cancel the request in flight, if any. Its result will never be delivered.
    pub fn cancel(&mut self) {
        if let Some(prev) = self.in_flight.take() {
            debug!("superseding acquisition #{}", prev.ticket.0);
            prev.cancel.cancel();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Ticket of the request in flight.
    pub fn current(&self) -> Option<Ticket> {
        self.in_flight.as_ref().map(|f| f.ticket)
    }

    /// Non-blocking: the newest result once it is ready.
    pub fn poll(&mut self) -> Option<Completed<T, E>> {
        let in_flight = self.in_flight.as_ref()?;
        let result = match in_flight.receiver.try_recv() {
            Ok(r) => r.map_err(LoadError::Job),
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(LoadError::WorkerLost),
        };
        let ticket = in_flight.ticket;
        self.in_flight = None;
        Some(Completed { ticket, result })
    }

    /// Block until the newest request completes. `None` when nothing is in flight.
    pub fn wait(&mut self) -> Option<Completed<T, E>> {
        let in_flight = self.in_flight.take()?;
        let result = match in_flight.receiver.recv() {
            Ok(r) => r.map_err(LoadError::Job),
            Err(_) => Err(LoadError::WorkerLost),
        };
        Some(Completed {
            ticket: in_flight.ticket,
            result,
        })
    }
}
