use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use crate::fasta;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Text,
    Fasta,
}

#[derive(Debug, Clone)]
pub struct Source {
    pub path: PathBuf,
    pub kind: SourceKind,
}

impl Source {
    /// Source whose kind is guessed from the file extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let kind = infer_source_kind(&path);
        Self { path, kind }
    }
}

/// One input ready for indexing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub name: String,
    /// FASTA record ids in file order; empty for plain text.
    pub records: Vec<String>,
    pub data: Vec<u8>,
}

/// Reads a whole file, or standard input when `path` is `-`.
pub fn read_source(path: &Path) -> Result<Vec<u8>, String> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .map_err(|e| format!("Failed to read stdin: {}", e))?;
        Ok(buf)
    } else {
        fs::read(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))
    }
}

/// Plain text input; trailing line breaks are dropped.
pub fn load_text(path: &Path) -> Result<Sequence, String> {
    let mut data = read_source(path)?;
    while matches!(data.last(), Some(b'\n' | b'\r')) {
        data.pop();
    }

    Ok(Sequence {
        name: source_name(path)?,
        records: Vec::new(),
        data,
    })
}

/// FASTA input; the sequences of all records are concatenated in file order.
pub fn load_fasta(path: &Path) -> Result<Sequence, String> {
    let raw_bytes = read_source(path)?;
    let entries = fasta::parse_fasta(&raw_bytes)
        .map_err(|e| format!("{}: {}", path.display(), e))?;

    let mut data = Vec::with_capacity(entries.iter().map(|e| e.data.len()).sum());
    let mut records = Vec::with_capacity(entries.len());
    for entry in entries {
        data.extend_from_slice(entry.data.as_bytes());
        records.push(entry.id);
    }

    Ok(Sequence {
        name: source_name(path)?,
        records,
        data,
    })
}

pub fn load_sequence(path: &Path, kind: SourceKind) -> Result<Sequence, String> {
    match kind {
        SourceKind::Text => load_text(path),
        SourceKind::Fasta => load_fasta(path),
    }
}

pub fn load_sources(sources: &[Source]) -> Result<Vec<Sequence>, String> {
    sources
        .iter()
        .map(|source| load_sequence(&source.path, source.kind))
        .collect()
}

pub fn infer_source_kind(path: &Path) -> SourceKind {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("fasta") | Some("fa") | Some("fna") | Some("faa") | Some("fsa") => SourceKind::Fasta,
        _ => SourceKind::Text,
    }
}

fn source_name(path: &Path) -> Result<String, String> {
    if path.as_os_str() == "-" {
        return Ok("stdin".to_string());
    }
    path.file_name()
        .ok_or_else(|| format!("Missing filename for path {}", path.display()))
        .map(|name| name.to_string_lossy().to_string())
}
