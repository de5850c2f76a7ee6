mod dataset;
mod pipeline;

pub use dataset::{DatasetSource, ParsedDataset, ParsedLine, parse_dataset, parse_line};
pub use pipeline::{CategoryOutcome, IngestionReport, Ingestor};
