use csv::ReaderBuilder;
use std::fs::File;
use tokio::sync::mpsc::Sender;
use tracing::{error, info};

use super::error::Error;
use super::types::{PlanRequest, SnapshotStreamer};

/// Streams snapshots from a CSV file with the header
/// `id,resistance,growth_stat,global_multiplier,cores,current,max,desired_gain`.
pub struct CsvStreamer {
    path: String,
    batch_size: usize,
}

impl CsvStreamer {
    pub fn new(path: String, batch_size: usize) -> Self {
        CsvStreamer {
            path,
            batch_size: batch_size.max(1),
        }
    }

    fn parse_csv_to_requests(&self) -> Result<Vec<PlanRequest>, Error> {
        let file = File::open(&self.path).map_err(|e| {
            error!(path = %self.path, error = %e, "Failed to read snapshot file");
            Error::IoError(e)
        })?;

        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut requests = Vec::new();
        for result in rdr.deserialize() {
            let record: PlanRequest = result?;
            requests.push(record);
        }
        Ok(requests)
    }
}

#[async_trait::async_trait]
impl SnapshotStreamer for CsvStreamer {
    async fn run_stream(self, sender: Sender<Vec<PlanRequest>>) -> Result<(), Error> {
        let all_requests = self.parse_csv_to_requests()?;
        let mut sent = 0;

        info!(total = all_requests.len(), "CsvStreamer: Starting transfer of snapshots");

        for chunk in all_requests.chunks(self.batch_size) {
            if sender.send(chunk.to_vec()).await.is_err() {
                error!("CsvStreamer shutting down: planner receiver dropped during send.");
                return Err(Error::ChannelSendFailed);
            }
            sent += chunk.len();
        }

        info!(sent, "CsvStreamer: Transfer complete");
        Ok(())
    }
}
