pub mod extractor;
pub mod preview;
