//! Tells observers which server side resources a mutation made stale.
//!
//! The client never patches cached server state. After a mutation it publishes an
//! [`Invalidation`] naming the affected resources and whoever displays them re-fetches.

use kaizen_model::module::ModuleRef;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Resource {
    QuizQuestions(ModuleRef),
    QuizResults(ModuleRef),
    ModuleProgress(ModuleRef),
    CourseProgress(String),
    CertificateEligibility(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    QuizSubmitted { module: ModuleRef, passed: bool },
    ProgressUpdated { module: ModuleRef },
}

impl Mutation {
    #[must_use]
    pub fn module(&self) -> &ModuleRef {
        match self {
            Mutation::QuizSubmitted { module, .. } | Mutation::ProgressUpdated { module } => module,
        }
    }

    /// Resources that must be re-fetched after this mutation.
    #[must_use]
    pub fn invalidates(&self) -> Vec<Resource> {
        match self {
            Mutation::QuizSubmitted { module, passed } => {
                let mut resources = vec![
                    Resource::QuizResults(module.clone()),
                    Resource::ModuleProgress(module.clone()),
                    Resource::CourseProgress(module.course_id.clone()),
                ];
                if *passed {
                    resources.push(Resource::CertificateEligibility(module.course_id.clone()));
                }
                resources
            }
            Mutation::ProgressUpdated { module } => vec![
                Resource::ModuleProgress(module.clone()),
                Resource::CourseProgress(module.course_id.clone()),
                Resource::CertificateEligibility(module.course_id.clone()),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invalidation {
    pub mutation: Mutation,
    pub resources: Vec<Resource>,
}

impl Invalidation {
    #[must_use]
    pub fn affects(&self, resource: &Resource) -> bool {
        self.resources.contains(resource)
    }
}

impl From<Mutation> for Invalidation {
    fn from(mutation: Mutation) -> Self {
        let resources = mutation.invalidates();
        Self { mutation, resources }
    }
}

#[derive(Debug, Clone)]
pub struct InvalidationBus {
    sender: broadcast::Sender<Invalidation>,
}

impl Default for InvalidationBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl InvalidationBus {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes the invalidations caused by `mutation` and returns how many subscribers got them.
    pub fn publish(&self, mutation: Mutation) -> usize {
        let invalidation = Invalidation::from(mutation);
        tracing::debug!(?invalidation, "publishing invalidation");
        // Without subscribers there is nobody holding stale data.
        self.sender.send(invalidation).unwrap_or(0)
    }

    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            receiver: self.sender.subscribe(),
        }
    }
}

pub struct Subscription {
    receiver: broadcast::Receiver<Invalidation>,
}

impl Subscription {
    /// Waits for the next invalidation. Returns `None` once every bus handle is gone.
    pub async fn next(&mut self) -> Option<Invalidation> {
        loop {
            match self.receiver.recv().await {
                Ok(invalidation) => return Some(invalidation),
                Err(RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "invalidation subscriber lagged behind");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Next invalidation if one is already queued.
    pub fn try_next(&mut self) -> Option<Invalidation> {
        loop {
            match self.receiver.try_recv() {
                Ok(invalidation) => return Some(invalidation),
                Err(TryRecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "invalidation subscriber lagged behind");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }
}
