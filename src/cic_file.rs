//! # CIC file-structure parser
//!
//! Reads a CIC file as an ordered sequence of lines and dispatches it to the
//! constructor of its message kind.
//!
//! ## Line protocol
//! -----------------
//! 1. `CIC_<KIND>_VERS = <version>` gives the kind and the version.
//! 2. An optional `COMMENT <text>` line.
//! 3. `CREATION_DATE = <isot>`, then `ORIGINATOR = <text>`.
//! 4. Any lines up to `META_START` are skipped.
//! 5. Lines up to `META_END` form the [`MetadataBlock`].
//! 6. The rest of the stream is handed to the [`TabularReader`].
//! 7. The parts are validated by the message kind ([`build_message`]).
//!
//! The stream is consumed strictly forward; the comment line is the only
//! lookahead. Each failing stage is reported with its own [`CicError`] variant,
//! wrapping the lower-level error when there is one.
//!
//! ## Example
//! -----------------
//! ```rust
//! use cic_parser::cic_file::parse_as;
//! use cic_parser::message::Oem;
//!
//! let file = "\
//! CIC_OEM_VERS = 1.0
//! CREATION_DATE = 2009-12-08T09:00:00.000
//! ORIGINATOR = CNES
//! META_START
//! OBJECT_NAME = CubeSat
//! OBJECT_ID = CubeSat
//! CENTER_NAME = EARTH
//! REF_FRAME = EME2000
//! TIME_SYSTEM = UTC
//! META_END
//! 2009-12-08T09:00:00.000 -2495.77 7055.08 -4.29 -7.57 -2.63 0.12
//! ";
//!
//! let oem: Oem = parse_as(file.as_bytes()).unwrap();
//! assert_eq!(oem.center_name(), "EARTH");
//! ```
use std::{
    fs::File,
    io::{BufRead, BufReader},
    sync::LazyLock,
};

use camino::Utf8Path;
use regex::Regex;
use tracing::{debug, span, trace, warn, Level};

use crate::{
    cic_errors::CicError,
    constants::{
        COMMENT_KEYWORD, CREATION_DATE, HEADER_PREFIX, HEADER_SUFFIX, META_END, META_START,
        ORIGINATOR,
    },
    data_table::{EphemerisTableReader, TabularReader},
    header::Header,
    message::{build_message, CicMessage, Message},
    metadata::MetadataBlock,
};

static VERSION_KEY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{HEADER_PREFIX}_([^_\s]*)_{HEADER_SUFFIX}$"))
        .expect("version key regex must compile")
});

/// Forward-only line reader keeping track of the current line number.
struct LineScanner<R> {
    input: R,
    line_number: usize,
}

impl<R: BufRead> LineScanner<R> {
    fn new(input: R) -> Self {
        LineScanner {
            input,
            line_number: 0,
        }
    }

    /// Next line without its line terminator, `None` at end of stream.
    fn next_line(&mut self) -> Result<Option<String>, CicError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        let content_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(content_len);
        Ok(Some(line))
    }

    fn malformed(&self, line: &str) -> CicError {
        CicError::MalformedHeaderLine {
            line_number: self.line_number,
            line: line.to_string(),
        }
    }

    /// Next line of the header, which must exist.
    fn header_line(&mut self) -> Result<String, CicError> {
        match self.next_line()? {
            Some(line) => Ok(line),
            None => Err(CicError::MalformedHeaderLine {
                line_number: self.line_number + 1,
                line: String::new(),
            }),
        }
    }
}

/// Split `CIC_<KIND>_VERS = <version>` into its kind and version.
fn split_version_line(line: &str) -> Option<(&str, &str)> {
    let (key, version) = line.split_once('=')?;
    let kind = VERSION_KEY_REGEX.captures(key.trim())?.get(1)?.as_str();
    Some((kind, version.trim()))
}

/// Value of a `KEY = VALUE` header line, warning when the key is not `expected_key`.
fn header_value<'a, R: BufRead>(
    scanner: &LineScanner<R>,
    line: &'a str,
    expected_key: &str,
) -> Result<&'a str, CicError> {
    let (key, value) = line.split_once('=').ok_or_else(|| scanner.malformed(line))?;
    if key.trim() != expected_key {
        warn!(
            line_number = scanner.line_number,
            "expected {expected_key}, found {:?}",
            key.trim()
        );
    }
    Ok(value.trim())
}

fn parse_header<R: BufRead>(scanner: &mut LineScanner<R>) -> Result<Header, CicError> {
    let version_line = scanner.header_line()?;
    let (kind, version) =
        split_version_line(&version_line).ok_or_else(|| scanner.malformed(&version_line))?;

    let mut line = scanner.header_line()?;
    let comment = line
        .strip_prefix(COMMENT_KEYWORD)
        .map(|rest| rest.trim().to_string());
    if comment.is_some() {
        line = scanner.header_line()?;
    }

    let creation_date = header_value(scanner, &line, CREATION_DATE)?.to_string();

    let line = scanner.header_line()?;
    let originator = header_value(scanner, &line, ORIGINATOR)?;

    let header = Header::new(
        kind,
        version,
        creation_date,
        originator,
        comment.as_deref(),
    )?;
    debug!(kind = %header.message_kind(), version = header.version(), "header parsed");
    Ok(header)
}

/// Read the metadata block.
///
/// `META_START` and `META_END` are matched after trimming trailing whitespace,
/// so CRLF line endings and trailing blanks still close the block.
fn parse_metadata<R: BufRead>(scanner: &mut LineScanner<R>) -> Result<MetadataBlock, CicError> {
    loop {
        match scanner.next_line()? {
            None => return Err(CicError::MissingMetadataBlock),
            Some(line) if line.trim_end() == META_START => break,
            Some(line) => trace!(line_number = scanner.line_number, "skipping {line:?}"),
        }
    }

    let mut meta = MetadataBlock::new();
    loop {
        match scanner.next_line()? {
            None => return Err(CicError::UnterminatedMetadataBlock),
            Some(line) if line.trim_end() == META_END => break,
            Some(line) => meta.push_line(&line),
        }
    }
    debug!(entries = meta.len(), "metadata block parsed");
    Ok(meta)
}

/// CIC parser configured with a [`TabularReader`] for the data block.
///
/// [`CicParser::new`] uses the default [`EphemerisTableReader`];
/// [`CicParser::with_reader`] plugs any other implementation.
#[derive(Debug, Clone, Default)]
pub struct CicParser<T = EphemerisTableReader> {
    reader: T,
}

impl CicParser {
    pub fn new() -> Self {
        CicParser {
            reader: EphemerisTableReader::default(),
        }
    }
}

impl<T: TabularReader> CicParser<T> {
    pub fn with_reader(reader: T) -> Self {
        CicParser { reader }
    }

    pub fn reader(&self) -> &T {
        &self.reader
    }

    /// Parse and validate a CIC message from a stream.
    ///
    /// Arguments
    /// -----------------
    /// * `input`: the whole file content, read line by line
    ///
    /// Return
    /// ----------
    /// * The validated [`Message`], or the [`CicError`] of the first failing stage.
    pub fn parse<R: BufRead>(&self, input: R) -> Result<Message, CicError> {
        let mut scanner = LineScanner::new(input);

        let header = parse_header(&mut scanner)?;
        let meta = parse_metadata(&mut scanner)?;

        debug!(line_number = scanner.line_number, "reading data block");
        let data = self.reader.read(&mut scanner.input, &meta)?;

        build_message(header, meta, data)
    }

    /// Parse a stream and require a given message kind.
    ///
    /// The kind check happens once the whole message is parsed and validated:
    /// structural and validation errors take precedence over
    /// [`CicError::KindMismatch`].
    pub fn parse_as<M: CicMessage, R: BufRead>(&self, input: R) -> Result<M, CicError> {
        let message = self.parse(input)?;
        let found = message.kind();
        let mismatch = CicError::KindMismatch {
            expected: M::KIND,
            found,
        };
        if found != M::KIND {
            return Err(mismatch);
        }
        M::from_message(message).ok_or(mismatch)
    }

    /// Open and parse a CIC file; the file is closed when parsing ends.
    pub fn parse_file(&self, path: impl AsRef<Utf8Path>) -> Result<Message, CicError> {
        let path = path.as_ref();
        let span = span!(Level::DEBUG, "cic_file", %path);
        let _guard = span.enter();

        let file = File::open(path)?;
        self.parse(BufReader::new(file))
    }

    /// Open and parse a CIC file, requiring a given message kind.
    pub fn parse_file_as<M: CicMessage>(&self, path: impl AsRef<Utf8Path>) -> Result<M, CicError> {
        let path = path.as_ref();
        let span = span!(Level::DEBUG, "cic_file", %path);
        let _guard = span.enter();

        let file = File::open(path)?;
        self.parse_as(BufReader::new(file))
    }
}

/// Parse a CIC message with the default parser, see [`CicParser::parse`].
pub fn parse<R: BufRead>(input: R) -> Result<Message, CicError> {
    CicParser::new().parse(input)
}

/// Parse a CIC message of a given kind with the default parser, see [`CicParser::parse_as`].
pub fn parse_as<M: CicMessage, R: BufRead>(input: R) -> Result<M, CicError> {
    CicParser::new().parse_as(input)
}

/// Parse a CIC file with the default parser, see [`CicParser::parse_file`].
pub fn parse_file(path: impl AsRef<Utf8Path>) -> Result<Message, CicError> {
    CicParser::new().parse_file(path)
}

/// Parse a CIC file of a given kind with the default parser, see [`CicParser::parse_file_as`].
pub fn parse_file_as<M: CicMessage>(path: impl AsRef<Utf8Path>) -> Result<M, CicError> {
    CicParser::new().parse_file_as(path)
}
