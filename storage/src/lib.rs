pub mod dataset;
pub mod fasta;

pub use dataset::{
    Sequence, Source, SourceKind, infer_source_kind, load_fasta, load_sequence, load_sources,
    load_text, read_source,
};
pub use fasta::{FastaEntry, parse_fasta};
