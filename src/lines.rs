//! Loading, sorting and writing newline-delimited byte records.
//!
//! A [`Line`] is an arbitrary run of bytes ending in `\n` (or at end of input).
//! Lines are compared byte by byte, so they may contain `\0` or invalid UTF-8
//! and still sort deterministically.
//!
//! # Example
//!
//! ```
//! use hbal_tree::LoadedFile;
//!
//! let mut file = LoadedFile::load(&b"pear\napple\nfig"[..])?;
//! file.sort();
//!
//! let mut out = Vec::new();
//! file.write_to(&mut out)?;
//! assert_eq!(out, b"apple\nfigpear\n");
//! # Ok::<(), hbal_tree::LinesError>(())
//! ```

use alloc::vec::Vec;
use core::cmp::Ordering;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use log::{debug, trace};
use thiserror::Error;

/// Errors raised while loading or writing lines.
#[derive(Debug, Error)]
pub enum LinesError {
    #[error("failed to open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read input")]
    Read(#[source] io::Error),
    #[error("failed to write output")]
    Write(#[source] io::Error),
}

/// One record, including its trailing `\n` when the input had one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Line(Vec<u8>);

impl Line {
    /// Returns the raw bytes of the line.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the line, returning its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Returns the length of the line in bytes, terminator included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the line holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if the line ends in `\n`.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.0.last() == Some(&b'\n')
    }
}

impl From<Vec<u8>> for Line {
    fn from(bytes: Vec<u8>) -> Self {
        Line(bytes)
    }
}

impl From<&[u8]> for Line {
    fn from(bytes: &[u8]) -> Self {
        Line(bytes.to_vec())
    }
}

impl PartialOrd for Line {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Line {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_lines(self, other)
    }
}

/// Compares two lines byte by byte.
///
/// The first differing byte decides. When one line is a prefix of the other
/// the shorter one sorts first, and lines of equal length and content are
/// equal. Bytes are compared as unsigned values, so `\0` sorts before
/// everything else.
///
/// ```
/// use std::cmp::Ordering;
/// use hbal_tree::lines::{compare_lines, Line};
///
/// let a = Line::from(&b"ab\0c"[..]);
/// let b = Line::from(&b"ab\0d"[..]);
/// assert_eq!(compare_lines(&a, &b), Ordering::Less);
/// assert_eq!(compare_lines(&Line::from(&b"ab"[..]), &a), Ordering::Less);
/// ```
#[must_use]
pub fn compare_lines(a: &Line, b: &Line) -> Ordering {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    for (x, y) in a.iter().zip(b) {
        match x.cmp(y) {
            Ordering::Equal => {}
            order => return order,
        }
    }
    a.len().cmp(&b.len())
}

/// The lines of one input, in load order until [`sort`](LoadedFile::sort) is called.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadedFile {
    lines: Vec<Line>,
}

impl LoadedFile {
    /// Reads `reader` to the end, splitting after every `\n`.
    ///
    /// A trailing fragment without a terminator becomes the last line. Empty
    /// input produces a file with no lines.
    ///
    /// # Errors
    ///
    /// Returns [`LinesError::Read`] if the reader fails.
    pub fn load<R: Read>(reader: R) -> Result<Self, LinesError> {
        let mut reader = BufReader::new(reader);
        let mut lines = Vec::new();
        let mut bytes = 0;
        loop {
            let mut buf = Vec::new();
            let read = reader.read_until(b'\n', &mut buf).map_err(LinesError::Read)?;
            if read == 0 {
                break;
            }
            bytes += read;
            lines.push(Line(buf));
        }
        debug!("loaded {} lines ({bytes} bytes)", lines.len());
        Ok(LoadedFile { lines })
    }

    /// Opens the file at `path` and [`load`](LoadedFile::load)s it.
    ///
    /// # Errors
    ///
    /// Returns [`LinesError::Open`] if the file cannot be opened, or
    /// [`LinesError::Read`] if reading it fails.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, LinesError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LinesError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("opened {}", path.display());
        Self::load(file)
    }

    /// Sorts the lines with [`compare_lines`].
    pub fn sort(&mut self) {
        trace!("sorting {} lines", self.lines.len());
        self.lines.sort_unstable_by(compare_lines);
    }

    /// Writes every line's bytes to `writer`, in order, adding nothing.
    ///
    /// # Errors
    ///
    /// Returns [`LinesError::Write`] on the first failed write.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), LinesError> {
        for line in &self.lines {
            writer.write_all(line.as_bytes()).map_err(LinesError::Write)?;
        }
        Ok(())
    }

    /// Returns the lines.
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Returns the number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if no lines were loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Opens, loads, sorts and writes each file in `paths` to `writer`, one after
/// the other. Each file is sorted on its own; the outputs are concatenated.
///
/// # Errors
///
/// Stops at the first file that fails to open or read, or the first failed
/// write. Output for the files before it has already been written.
pub fn sort_files<I, P, W>(paths: I, mut writer: W) -> Result<(), LinesError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
    W: Write,
{
    for path in paths {
        let mut file = LoadedFile::open(path)?;
        file.sort();
        file.write_to(&mut writer)?;
    }
    writer.flush().map_err(LinesError::Write)
}
