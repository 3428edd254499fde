//! Matrix format detection.
//!
//! Every probe looks at the same bounded [Peek] of the file and answers with
//! a yes/no verdict. [detect_format] asks the probes in [PROBES] order and
//! returns the first match, so the decision never depends on a loader
//! failing halfway through a file.

use std::fmt::{self, Display};
use std::fs::File;
use std::io::{BufRead, Read};
use std::path::Path;
use std::str::FromStr;

use tadtool_core::utils::{get_dynamic_reader, is_comment_line};
use tadtool_core::{TadError, TadResult};

/// Magic string at the start of every `.npy` file.
pub const NPY_MAGIC: &[u8] = b"\x93NUMPY";

/// Upper bound on the number of bytes read while sniffing text formats.
pub const PEEK_LIMIT: u64 = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixFormat {
    /// NumPy binary array.
    Npy,
    /// N x N whitespace-delimited numbers.
    DenseText,
    /// `row col weight` edge list.
    Sparse,
}

impl Display for MatrixFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatrixFormat::Npy => "npy",
            MatrixFormat::DenseText => "dense",
            MatrixFormat::Sparse => "sparse",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for MatrixFormat {
    type Err = TadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "npy" | "numpy" => Ok(MatrixFormat::Npy),
            "dense" | "text" => Ok(MatrixFormat::DenseText),
            "sparse" | "edges" => Ok(MatrixFormat::Sparse),
            _ => Err(TadError::Format(format!("Unknown matrix format: {}", s))),
        }
    }
}

///
/// The bounded view of a file that probes decide on.
///
#[derive(Debug, Default, Clone)]
pub struct Peek {
    /// Leading raw bytes of the file (not decompressed).
    pub magic: Vec<u8>,
    /// First non-comment line of the (decompressed) text, possibly truncated.
    pub first_line: Option<String>,
}

impl Peek {
    ///
    /// Read the peek of a file on disk.
    ///
    pub fn from_path(path: &Path) -> TadResult<Self> {
        let mut magic = Vec::with_capacity(NPY_MAGIC.len());
        File::open(path)?
            .take(NPY_MAGIC.len() as u64)
            .read_to_end(&mut magic)?;

        if magic.as_slice() == NPY_MAGIC {
            return Ok(Peek {
                magic,
                first_line: None,
            });
        }

        let reader = get_dynamic_reader(path)?.take(PEEK_LIMIT);
        let mut first_line = None;
        for line in reader.split(b'\n') {
            let line = String::from_utf8_lossy(&line?).into_owned();
            if !is_comment_line(&line) {
                first_line = Some(line);
                break;
            }
        }

        Ok(Peek { magic, first_line })
    }

    ///
    /// Number of whitespace-separated fields on the first data line.
    ///
    pub fn field_count(&self) -> usize {
        self.first_line
            .as_deref()
            .map_or(0, |line| line.split_whitespace().count())
    }
}

pub trait FormatProbe {
    fn format(&self) -> MatrixFormat;

    fn matches(&self, peek: &Peek) -> bool;
}

pub struct NpyProbe;

pub struct DenseTextProbe;

pub struct SparseProbe;

impl FormatProbe for NpyProbe {
    fn format(&self) -> MatrixFormat {
        MatrixFormat::Npy
    }

    fn matches(&self, peek: &Peek) -> bool {
        peek.magic.as_slice() == NPY_MAGIC
    }
}

impl FormatProbe for DenseTextProbe {
    fn format(&self) -> MatrixFormat {
        MatrixFormat::DenseText
    }

    fn matches(&self, peek: &Peek) -> bool {
        peek.field_count() > 3
    }
}

impl FormatProbe for SparseProbe {
    fn format(&self) -> MatrixFormat {
        MatrixFormat::Sparse
    }

    fn matches(&self, peek: &Peek) -> bool {
        peek.field_count() == 3
    }
}

/// Probes in the order they are consulted.
pub const PROBES: [&dyn FormatProbe; 3] = [&NpyProbe, &DenseTextProbe, &SparseProbe];

///
/// Decide the format of a peeked file, or `None` if no probe matches.
///
pub fn detect_format_from_peek(peek: &Peek) -> Option<MatrixFormat> {
    PROBES
        .iter()
        .find(|probe| probe.matches(peek))
        .map(|probe| probe.format())
}

///
/// Decide the on-disk format of a matrix file.
///
pub fn detect_format(path: &Path) -> TadResult<MatrixFormat> {
    let peek = Peek::from_path(path)?;
    detect_format_from_peek(&peek).ok_or_else(|| {
        TadError::Format(format!(
            "Cannot determine matrix format of {:?}: first data line has {} fields",
            path,
            peek.field_count()
        ))
    })
}
