//! Topic registry and fan-out

use crate::session::Session;
use crate::topic::Topic;
use dashmap::DashMap;
use pantry_core::{ChangeEvent, ContainerId, Result, UserId};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, trace};

/// Default per-topic buffer: events a slow subscriber may fall behind by
/// before it starts lagging.
const DEFAULT_TOPIC_CAPACITY: usize = 256;

/// The subscribe-time authorization check
///
/// Modeled as its own seam (rather than inlined business logic) so the
/// handshake can be unit-tested without any particular wire protocol; the
/// engine implements it over the access resolver.
pub trait TopicAuthorizer: Send + Sync {
    /// NotFound for unknown containers, AccessDenied for unauthorized
    /// users, Ok for readers.
    fn authorize_read(&self, user: UserId, container: ContainerId) -> Result<()>;
}

struct TopicChannel {
    tx: broadcast::Sender<ChangeEvent>,
    /// Serializes publishes so each topic has a single writer at a time.
    publish_lock: Mutex<()>,
}

/// Fans domain-change events out to subscribed sessions
///
/// Topics are created lazily on first subscribe and garbage-collected when
/// a publish finds no remaining subscribers. Publishes to different topics
/// run concurrently without coordination.
pub struct Broadcaster {
    topics: DashMap<ContainerId, Arc<TopicChannel>>,
    authorizer: Arc<dyn TopicAuthorizer>,
    capacity: usize,
}

impl Broadcaster {
    /// Create a broadcaster with the default per-topic buffer
    pub fn new(authorizer: Arc<dyn TopicAuthorizer>) -> Self {
        Self::with_capacity(authorizer, DEFAULT_TOPIC_CAPACITY)
    }

    /// Create a broadcaster with an explicit per-topic buffer capacity
    pub fn with_capacity(authorizer: Arc<dyn TopicAuthorizer>, capacity: usize) -> Self {
        Self {
            topics: DashMap::new(),
            authorizer,
            capacity,
        }
    }

    /// Admit or reject a subscription
    ///
    /// Checks run in a fixed order and nothing is registered until both
    /// pass:
    /// 1. the session must carry an identity (Unauthenticated otherwise),
    /// 2. that identity must be able to read the named container
    ///    (NotFound / AccessDenied otherwise).
    ///
    /// An admitted subscription observes every event published to the topic
    /// after this call returns, in publish order, and nothing from before.
    pub fn subscribe(&self, session: &Session, topic: Topic) -> Result<Subscription> {
        let identity = session.require_identity()?;
        self.authorizer.authorize_read(identity.user, topic.container())?;

        let rx = self
            .topics
            .entry(topic.container())
            .or_insert_with(|| {
                Arc::new(TopicChannel {
                    tx: broadcast::channel(self.capacity).0,
                    publish_lock: Mutex::new(()),
                })
            })
            .tx
            .subscribe();
        debug!(session = %session.id(), %topic, "subscription admitted");
        Ok(Subscription {
            topic,
            rx,
        })
    }

    /// Deliver an event to every current subscriber of the container's topic
    ///
    /// Best-effort: returns the number of subscribers the event was handed
    /// to, zero when nobody is listening. Publishes to the same topic are
    /// serialized; the event order every subscriber observes is the order
    /// publishers passed this point.
    pub fn publish(&self, container: ContainerId, event: ChangeEvent) -> usize {
        let Some(channel) = self.topics.get(&container).map(|entry| Arc::clone(entry.value()))
        else {
            return 0;
        };

        let delivered = {
            let _serialized = channel.publish_lock.lock();
            channel.tx.send(event).unwrap_or(0)
        };
        trace!(%container, delivered, "event published");

        if delivered == 0 {
            // Last subscriber left: drop the topic. remove_if re-checks
            // under the shard lock, so a concurrent subscribe either beat
            // the removal (count > 0, entry stays) or comes after and
            // re-creates the topic.
            self.topics
                .remove_if(&container, |_, channel| channel.tx.receiver_count() == 0);
        }
        delivered
    }

    /// Number of sessions currently subscribed to a container's topic
    pub fn subscriber_count(&self, container: ContainerId) -> usize {
        self.topics
            .get(&container)
            .map(|channel| channel.tx.receiver_count())
            .unwrap_or(0)
    }

    /// Number of live topics
    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }
}

/// Why a subscription stopped yielding events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecvError {
    /// The subscriber fell behind by this many events; they are gone.
    /// Re-fetch current state rather than trusting the stream.
    Lagged(u64),
    /// The topic is gone and no further events will arrive
    Closed,
}

/// An admitted subscription: a live stream of one topic's events
///
/// Dropping the subscription unsubscribes; in-flight mutations are
/// unaffected by a subscriber going away.
#[derive(Debug)]
pub struct Subscription {
    topic: Topic,
    rx: broadcast::Receiver<ChangeEvent>,
}

impl Subscription {
    /// The topic this subscription is admitted to
    pub fn topic(&self) -> Topic {
        self.topic
    }

    /// Wait for the next event
    pub async fn recv(&mut self) -> std::result::Result<ChangeEvent, RecvError> {
        self.rx.recv().await.map_err(|err| match err {
            broadcast::error::RecvError::Lagged(missed) => RecvError::Lagged(missed),
            broadcast::error::RecvError::Closed => RecvError::Closed,
        })
    }

    /// Take an already-delivered event without waiting
    ///
    /// Returns None when the stream is currently empty.
    pub fn try_recv(&mut self) -> Option<ChangeEvent> {
        self.rx.try_recv().ok()
    }
}
