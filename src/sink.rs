//! Line-oriented output sinks.

use crate::Result;
use flate2::{Compression, write::GzEncoder};
use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

/// Destination for delimited-text rows.
pub trait RowSink {
    /// Append `rows`, one line each.
    fn append(&mut self, rows: &[String]) -> Result<()>;
}

/// Writes rows as newline-terminated lines to any [`Write`]r.
#[derive(Debug)]
pub struct CsvSink<W: Write> {
    writer: W,
    lines: usize,
}

impl<W: Write> CsvSink<W> {
    /// Wrap `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer, lines: 0 }
    }

    /// Lines written so far.
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Flush and return the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> RowSink for CsvSink<W> {
    fn append(&mut self, rows: &[String]) -> Result<()> {
        for row in rows {
            self.writer.write_all(row.as_bytes())?;
            self.writer.write_all(b"\n")?;
        }
        self.lines += rows.len();
        Ok(())
    }
}

/// Gzip-compressed CSV file.
///
/// Rows go to a `<name>.part` file next to the target, which [`GzipSink::close`]
/// renames into place. A sink dropped without `close` (a failed run) removes its
/// partial file, so the target path only ever holds a complete corpus.
///
/// The gzip header carries no timestamp or file name, so identical rows always
/// produce byte-identical files.
#[derive(Debug)]
pub struct GzipSink {
    inner: Option<CsvSink<GzEncoder<BufWriter<File>>>>,
    path: PathBuf,
    part: PathBuf,
}

impl GzipSink {
    /// Start writing `path`, creating missing parent directories.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut name = path.file_name().unwrap_or_default().to_os_string();
        name.push(".part");
        let part = path.with_file_name(name);

        let file = BufWriter::new(File::create(&part)?);
        Ok(Self {
            inner: Some(CsvSink::new(GzEncoder::new(file, Compression::default()))),
            path: path.to_path_buf(),
            part,
        })
    }

    /// Final path of the corpus.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Temporary path written until [`GzipSink::close`].
    pub fn part_path(&self) -> &Path {
        &self.part
    }

    /// Write the gzip trailer, flush to disk and move the file into place.
    /// Returns the number of lines written.
    pub fn close(mut self) -> Result<usize> {
        let inner = self.inner.take().ok_or_else(closed)?;
        let lines = inner.lines();
        let mut file = inner.finish()?.finish()?;
        file.flush()?;
        drop(file);

        if let Err(err) = fs::rename(&self.part, &self.path) {
            let _ = fs::remove_file(&self.part);
            return Err(err.into());
        }
        tracing::debug!(path = %self.path.display(), lines, "closed output file");
        Ok(lines)
    }
}

fn closed() -> io::Error {
    io::Error::other("output file already closed")
}

impl RowSink for GzipSink {
    fn append(&mut self, rows: &[String]) -> Result<()> {
        self.inner.as_mut().ok_or_else(closed)?.append(rows)
    }
}

impl Drop for GzipSink {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.take() {
            drop(inner);
            if fs::remove_file(&self.part).is_ok() {
                tracing::warn!(path = %self.path.display(), "discarded unfinished output file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CsvSink, GzipSink, RowSink};
    use flate2::read::GzDecoder;
    use std::{fs, io::Read, path::PathBuf};

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "bignum-vectors-sink-{}-{name}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn close_moves_file_into_place() {
        let dir = scratch("close");
        let path = dir.join("add").join("256").join("random.csv.gz");
        let mut sink = GzipSink::open(&path).unwrap();
        let part = sink.part_path().to_path_buf();
        assert_eq!(part, dir.join("add").join("256").join("random.csv.gz.part"));

        sink.append(&["num1,num2,result".to_owned(), "1,2,3".to_owned()])
            .unwrap();
        assert!(part.exists());
        assert!(!path.exists());

        assert_eq!(sink.close().unwrap(), 2);
        assert!(!part.exists());

        let mut text = String::new();
        GzDecoder::new(fs::File::open(&path).unwrap())
            .read_to_string(&mut text)
            .unwrap();
        assert_eq!(text, "num1,num2,result\n1,2,3\n");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn dropped_sink_leaves_nothing_behind() {
        let dir = scratch("drop");
        let path = dir.join("special.csv.gz");
        let mut sink = GzipSink::open(&path).unwrap();
        let part = sink.part_path().to_path_buf();
        sink.append(&["num1,num2,result,comment".to_owned()]).unwrap();
        drop(sink);

        assert!(!part.exists());
        assert!(!path.exists());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn lines_are_newline_terminated() {
        let mut sink = CsvSink::new(Vec::new());
        sink.append(&["a,b".to_owned(), "c,d".to_owned()]).unwrap();
        sink.append(&[]).unwrap();
        assert_eq!(sink.lines(), 2);
        assert_eq!(sink.finish().unwrap(), b"a,b\nc,d\n");
    }
}
