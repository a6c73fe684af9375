use houston::{ErrorRecord, ErrorSink};
use std::sync::Mutex;

/// Sink that keeps every record it is handed.
#[derive(Default)]
pub struct RecordingSink {
    records: Mutex<Vec<ErrorRecord>>,
}

impl RecordingSink {
    pub fn records(&self) -> Vec<ErrorRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl ErrorSink for RecordingSink {
    fn log_record(&self, record: &ErrorRecord) {
        self.records.lock().unwrap().push(record.clone());
    }
}
