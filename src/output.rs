//! Score file writer: one value per line, in column order.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Cannot open file {path}: {source}")]
    Create { path: PathBuf, source: io::Error },

    #[error("Cannot write to {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

pub type OutputResult<T> = Result<T, OutputError>;

/// Writes one score per line.
pub fn write_scores_to<W: Write>(writer: &mut W, scores: &[f64]) -> io::Result<()> {
    for score in scores {
        writeln!(writer, "{}", score)?;
    }
    writer.flush()
}

/// Writes scores to `path`, or to standard output when `path` is "-".
pub fn write_scores(path: &Path, scores: &[f64]) -> OutputResult<()> {
    let write_error = |source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };

    if path.as_os_str() == "-" {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write_scores_to(&mut handle, scores).map_err(write_error)?;
    } else {
        let file = File::create(path).map_err(|source| OutputError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        write_scores_to(&mut BufWriter::new(file), scores).map_err(write_error)?;
        info!("Wrote {} scores to {}", scores.len(), path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_to_buffer() {
        let mut buffer = Vec::new();
        write_scores_to(&mut buffer, &[1.0, 0.25, 0.0]).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "1\n0.25\n0\n");
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.txt");
        write_scores(&path, &[0.5, 0.125]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "0.5\n0.125\n");
    }

    #[test]
    fn test_unwritable_path_names_the_path() {
        let path = Path::new("/nonexistent/dir/scores.txt");
        let err = write_scores(path, &[1.0]).unwrap_err();
        assert!(matches!(err, OutputError::Create { .. }));
        assert!(err.to_string().contains("/nonexistent/dir/scores.txt"));
    }
}
