use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;
use tracing::info;

use super::{
    error::Error,
    types::{PlanRequest, SnapshotStreamer},
};

pub struct Producer<S: SnapshotStreamer> {
    streamer: S,
}

impl<S> Producer<S>
where
    S: SnapshotStreamer,
{
    pub fn new(streamer: S) -> Self {
        Producer { streamer }
    }

    pub fn spawn(self, sender: Sender<Vec<PlanRequest>>) -> JoinHandle<Result<(), Error>> {
        info!("Producer ready.");
        tokio::spawn(async move { self.streamer.run_stream(sender).await })
    }
}
