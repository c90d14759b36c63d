//! movieAdded topic: fan-out of newly created movies to live subscribers.
//!
//! Delivery contract: every subscriber attached when an event is published
//! receives it once. Nothing is replayed to later subscribers. A subscriber
//! that falls more than the channel capacity behind skips the events it
//! missed. Dropping the stream (or receiver) unsubscribes.

use std::sync::Arc;

use futures::Stream;
use tokio::sync::broadcast;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tracing::{debug, warn};

use crate::db::MovieRecord;

/// Topic name carried in logs
pub const MOVIE_ADDED: &str = "MOVIE_ADDED";

/// Event published after a movie is stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieAddedEvent {
    pub movie: MovieRecord,
}

/// Largest accepted channel capacity
pub const MAX_EVENTS_CAPACITY: usize = 65_536;

/// Broker for the movieAdded topic. Shared through schema data.
pub struct MovieEventBroker {
    sender: broadcast::Sender<MovieAddedEvent>,
}

impl MovieEventBroker {
    /// Capacity is clamped to `1..=MAX_EVENTS_CAPACITY`
    pub fn new(cap: usize) -> Arc<Self> {
        let (sender, _) = broadcast::channel(cap.clamp(1, MAX_EVENTS_CAPACITY));
        Arc::new(Self { sender })
    }

    /// Attach a raw receiver
    pub fn subscribe(&self) -> broadcast::Receiver<MovieAddedEvent> {
        self.sender.subscribe()
    }

    /// Attach and return a stream of events. The subscription starts now,
    /// not when the stream is first polled.
    pub fn stream(&self) -> impl Stream<Item = MovieAddedEvent> + Send + 'static {
        BroadcastStream::new(self.subscribe()).filter_map(|result| match result {
            Ok(event) => Some(event),
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                warn!(topic = MOVIE_ADDED, skipped, "Subscriber lagged, events dropped");
                None
            }
        })
    }

    /// Publish to every current subscriber. Returns how many were reached.
    pub fn publish(&self, event: MovieAddedEvent) -> usize {
        let movie_id = event.movie.id.clone();
        match self.sender.send(event) {
            Ok(reached) => {
                debug!(topic = MOVIE_ADDED, movie_id = %movie_id, reached, "Published event");
                reached
            }
            Err(_) => {
                debug!(topic = MOVIE_ADDED, movie_id = %movie_id, "No subscribers for event");
                0
            }
        }
    }

    /// Number of attached subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
