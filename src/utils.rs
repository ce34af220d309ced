//! Line readers shared by the resource loaders.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};

/// Opens a resource file for buffered line reading.
pub(crate) fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| Error::ResourceLoad {
            path: path.to_path_buf(),
            source,
        })
}

/// Calls `f` with the 1-based line number and trimmed content of every
/// non-blank line. A leading BOM is dropped and invalid UTF-8 bytes are
/// removed rather than failing the load.
pub(crate) fn for_each_line<R, F>(reader: R, resource: &str, mut f: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(usize, &str) -> Result<()>,
{
    for (idx, raw) in reader.split(b'\n').enumerate() {
        let raw = raw.map_err(|source| Error::ResourceLoad {
            path: resource.into(),
            source,
        })?;
        let line_no = idx + 1;
        let text = strip_invalid_utf8(&raw);
        if text.len() != raw.len() {
            log::warn!(
                "{}:{}: dropped {} invalid UTF-8 byte(s)",
                resource,
                line_no,
                raw.len() - text.len()
            );
        }

        let mut line: &str = &text;
        if line_no == 1 {
            line = line.trim_start_matches('\u{feff}');
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        f(line_no, line)?;
    }
    Ok(())
}

/// Removes invalid UTF-8 sequences, keeping every valid character in order.
/// An incomplete sequence at the very end is dropped.
pub(crate) fn strip_invalid_utf8(mut bytes: &[u8]) -> Cow<'_, str> {
    if let Ok(s) = std::str::from_utf8(bytes) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(bytes.len());
    loop {
        match std::str::from_utf8(bytes) {
            Ok(valid) => {
                out.push_str(valid);
                break;
            }
            Err(err) => {
                let (valid, rest) = bytes.split_at(err.valid_up_to());
                out.push_str(std::str::from_utf8(valid).unwrap_or_default());
                match err.error_len() {
                    Some(len) => bytes = &rest[len..],
                    None => break,
                }
            }
        }
    }
    Cow::Owned(out)
}
