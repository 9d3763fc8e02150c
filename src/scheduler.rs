use crate::bus::WireBus;
use crate::errors::ReaderResult;
use crate::messages::{CodeMessage, Header};
use crate::reader::CodeReader;
use crate::record::CodeReaderResults;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{error, info, warn};

/// Polls one code reader and turns non-empty results into messages
pub struct ScanPoller<W> {
    reader: CodeReader<W>,
    sensor_id: String,
    seq: u64,
    results: CodeReaderResults,
}

impl<W: WireBus> ScanPoller<W> {
    pub fn new(reader: CodeReader<W>, sensor_id: String) -> Self {
        Self {
            reader,
            sensor_id,
            seq: 0,
            results: CodeReaderResults::default(),
        }
    }

    pub fn reader_mut(&mut self) -> &mut CodeReader<W> {
        &mut self.reader
    }

    /// Read once; `Ok(None)` means no code is in view.
    pub fn poll_once(&mut self) -> ReaderResult<Option<CodeMessage>> {
        self.reader.read_into(&mut self.results)?;
        if !self.results.has_content() {
            return Ok(None);
        }
        self.seq += 1;
        let header = Header::new(self.sensor_id.clone(), self.seq);
        Ok(Some(CodeMessage::from_results(header, &self.results)))
    }
}

/// Poll at `period` until `max_polls` reads have been attempted, or forever
/// when no limit is given. Returns the number of messages published.
pub async fn run_reader_loop<W: WireBus>(
    poller: &mut ScanPoller<W>,
    period: Duration,
    max_polls: Option<u64>,
) -> u64 {
    info!("[{}] Starting reader task every {}ms", poller.sensor_id, period.as_millis());

    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut polls = 0u64;
    let mut published = 0u64;

    while max_polls.map_or(true, |max| polls < max) {
        ticker.tick().await;
        polls += 1;

        match poller.poll_once() {
            Ok(Some(msg)) => match msg.to_json() {
                Ok(json) => {
                    info!(target: "scan", "{}", json);
                    published += 1;
                }
                Err(e) => error!("[{}] Failed to encode scan: {}", poller.sensor_id, e),
            },
            Ok(None) => {}
            Err(e) => warn!("[{}] Reader read error: {}", poller.sensor_id, e),
        }
    }

    published
}
