use async_trait::async_trait;

/// The [`FillerActor`] trait is an actor-like service of the filler.
#[async_trait]
pub trait FillerActor {
    /// The event type received by the actor.
    type InboundEvent;
    /// The error type for the actor.
    type Error: std::fmt::Debug;
    /// Starts the actor.
    async fn start(mut self) -> Result<(), Self::Error>;
}
