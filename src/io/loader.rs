use crate::error::Error;
use flate2::read::GzDecoder;
use log::{debug, info};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub const LINE_TERMINATORS: &[char] = &['\n', '\r'];

/// Removes any trailing `\n` and `\r`, so both line ending conventions are accepted.
pub fn strip_line_terminator(line: &str) -> &str {
    line.trim_end_matches(LINE_TERMINATORS)
}

/// Line-by-line reader over any buffered source.
/// Lines are returned as read, including their terminators.
/// Bytes that are not valid UTF-8 (e.g. latin-1 exports) become U+FFFD.
pub struct LineReader<R: BufRead> {
    // number of lines that have been successfully read
    num_read: usize,
    reader: R,
    buffer: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            num_read: 0,
            reader,
            buffer: Vec::new(),
        }
    }

    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        self.buffer.clear();
        let bytes_read = self.reader.read_until(b'\n', &mut self.buffer)?;
        if bytes_read == 0 {
            return Ok(None);
        }
        self.num_read += 1;
        let line = String::from_utf8(std::mem::take(&mut self.buffer))
            .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned());
        Ok(Some(line))
    }

    pub fn num_read(&self) -> usize {
        self.num_read
    }

    pub fn read_all(mut self) -> io::Result<Vec<String>> {
        let mut lines = Vec::new();
        while let Some(line) = self.next_line()? {
            lines.push(line);
        }
        Ok(lines)
    }
}

fn is_gzipped(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "gz")
}

fn resource_error(path: &Path, source: io::Error) -> Error {
    match source.kind() {
        io::ErrorKind::NotFound => Error::ResourceNotFound(path.to_path_buf()),
        _ => Error::Resource {
            path: path.to_path_buf(),
            source,
        },
    }
}

fn read_lines(path: &Path) -> io::Result<Vec<String>> {
    // the file handle is dropped, and with it closed, on every return path
    let file = File::open(path)?;
    if is_gzipped(path) {
        debug!("Reading {:?} as gzip", path);
        LineReader::new(BufReader::new(GzDecoder::new(file))).read_all()
    } else {
        LineReader::new(BufReader::new(file)).read_all()
    }
}

/// Loads all lines of a plain or gzipped text file, header included.
pub fn load_lines(path: &Path) -> Result<Vec<String>, Error> {
    let lines = read_lines(path).map_err(|e| resource_error(path, e))?;
    info!("Loaded {} lines from {:?}", lines.len(), path);
    Ok(lines)
}

/// Number of lines in a file, without keeping them around.
pub fn num_lines(path: &Path) -> Result<usize, Error> {
    let count = || -> io::Result<usize> {
        let file = File::open(path)?;
        let mut reader = if is_gzipped(path) {
            LineReader::new(Box::new(BufReader::new(GzDecoder::new(file))) as Box<dyn BufRead>)
        } else {
            LineReader::new(Box::new(BufReader::new(file)) as Box<dyn BufRead>)
        };
        while reader.next_line()?.is_some() {}
        Ok(reader.num_read())
    };
    count().map_err(|e| resource_error(path, e))
}

#[cfg(test)]
mod tests {
    use super::{load_lines, num_lines, strip_line_terminator, LineReader};
    use crate::error::Error;
    use std::env;
    use std::io::Cursor;
    use std::path::{Path, PathBuf};

    fn test_resource(name: &str) -> PathBuf {
        let base_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
        Path::new(&base_dir).join("resources/test").join(name)
    }

    #[test]
    fn strips_both_terminators() {
        assert_eq!(strip_line_terminator("a\tb\n"), "a\tb");
        assert_eq!(strip_line_terminator("a\tb\r\n"), "a\tb");
        assert_eq!(strip_line_terminator("a\tb"), "a\tb");
        // trailing empty fields are kept
        assert_eq!(strip_line_terminator("a\t\r\n"), "a\t");
    }

    #[test]
    fn line_reader_keeps_terminators() {
        let reader = LineReader::new(Cursor::new("h1\th2\r\nx\ty\n\nlast"));
        let lines = reader.read_all().unwrap();
        assert_eq!(lines, vec!["h1\th2\r\n", "x\ty\n", "\n", "last"]);
    }

    #[test]
    fn invalid_utf8_is_replaced_not_fatal() {
        let reader = LineReader::new(Cursor::new(b"id\tx\nM\xfcller\t1\n".to_vec()));
        let lines = reader.read_all().unwrap();
        assert_eq!(lines, vec!["id\tx\n", "M\u{FFFD}ller\t1\n"]);

        let lines = load_lines(&test_resource("latin1.tsv")).unwrap();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("M\u{FFFD}ller\t"));
    }

    #[test]
    fn loads_plain_file() {
        let lines = load_lines(&test_resource("small.tsv")).unwrap();
        assert_eq!(lines.len(), 8);
        assert!(lines[0].starts_with("SampleID\t"));
        assert_eq!(num_lines(&test_resource("small.tsv")).unwrap(), 8);
    }

    #[test]
    fn loads_gzipped_file_like_plain_file() {
        let plain = load_lines(&test_resource("small.tsv")).unwrap();
        let gz = load_lines(&test_resource("small.tsv.gz")).unwrap();
        assert_eq!(plain, gz);
        assert_eq!(num_lines(&test_resource("small.tsv.gz")).unwrap(), 8);
    }

    #[test]
    fn missing_file_is_not_found() {
        let path = test_resource("does_not_exist.tsv");
        match load_lines(&path) {
            Err(Error::ResourceNotFound(p)) => assert_eq!(p, path),
            other => panic!("expected ResourceNotFound, got {:?}", other),
        }
        assert!(matches!(num_lines(&path), Err(Error::ResourceNotFound(_))));
    }

    #[test]
    fn unreadable_resource_is_other_io_failure() {
        // a directory can be opened on unix but not read as text
        let path = test_resource("");
        assert!(matches!(load_lines(&path), Err(Error::Resource { .. })));
    }
}
