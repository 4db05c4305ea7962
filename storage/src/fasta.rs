use std::str;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaEntry {
    pub id: String,
    pub desc: String,
    pub data: String,
}

/// Parses a FASTA byte slice. Sequence lines of one record are joined without
/// their line breaks; blank lines are skipped.
pub fn parse_fasta(raw_bytes: &[u8]) -> Result<Vec<FastaEntry>, String> {
    let mut entries = Vec::new();
    let mut current_header: Option<(String, String)> = None;
    let mut current_seq_buf: Vec<u8> = Vec::with_capacity(4096);

    for line in raw_bytes.split(|&b| b == b'\n') {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        if line.is_empty() {
            continue;
        }

        if line[0] == b'>' {
            if let Some((id, desc)) = current_header.take() {
                entries.push(finish_entry(id, desc, &current_seq_buf)?);
            }

            let header_text = &line[1..];
            let (raw_id, raw_desc) = match header_text.iter().position(|&b| b == b' ') {
                Some(p) => (&header_text[..p], &header_text[p + 1..]),
                None => (header_text, &[] as &[u8]),
            };

            let id = str::from_utf8(raw_id)
                .map_err(|_| "Invalid UTF-8 in FASTA Header ID".to_string())?;
            let desc = str::from_utf8(raw_desc)
                .map_err(|_| format!("Invalid UTF-8 in FASTA Description for ID: {}", id))?;

            current_header = Some((id.to_string(), desc.to_string()));
            current_seq_buf.clear();
        } else {
            if current_header.is_none() {
                return Err("Parse Error: Found sequence data before the first header (line starting with >)".to_string());
            }
            current_seq_buf.extend_from_slice(line);
        }
    }

    if let Some((id, desc)) = current_header {
        entries.push(finish_entry(id, desc, &current_seq_buf)?);
    }

    Ok(entries)
}

fn finish_entry(id: String, desc: String, seq: &[u8]) -> Result<FastaEntry, String> {
    let data = str::from_utf8(seq)
        .map_err(|_| format!("Invalid UTF-8 in sequence data for ID: {}", id))?
        .to_string();
    Ok(FastaEntry { id, desc, data })
}
