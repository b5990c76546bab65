//! Merging of heterogeneous label sources into one label set

pub mod fuser;
pub mod sources;
pub mod stem;

pub use fuser::{fuse, fuse_with, FusedLabel};
pub use sources::{LabelSources, RawLabel};
pub use stem::{labels_similar, Stemmer, SuffixStemmer};
