//! # cic_parser
//!
//! Parsing and validation of CCSDS **CIC** message files: Orbit (OEM),
//! Attitude (AEM), Maneuver (MEM) and Mission (MPM) Ephemeris Messages.
//!
//! A CIC file is made of a key-value header, a `META_START`/`META_END`
//! metadata block and a table of time-tagged records:
//!
//! ```text
//! CIC_OEM_VERS = 1.0
//! COMMENT Sample position file for CubeSat
//! CREATION_DATE = 2009-12-08T09:00:00.000
//! ORIGINATOR = CNES
//!
//! META_START
//! OBJECT_NAME = CubeSat
//! OBJECT_ID = CubeSat
//! CENTER_NAME = EARTH
//! REF_FRAME = EME2000
//! TIME_SYSTEM = UTC
//! META_END
//!
//! 2009-12-08T09:00:00.000 -2495.77 7055.08 -4.29 -7.57 -2.63 0.12
//! ```
//!
//! ## Entry points
//! -----------------
//! * [`parse`] / [`parse_file`] – any kind, returns a [`Message`].
//! * [`parse_as`] / [`parse_file_as`] – a given kind, e.g. `parse_as::<Oem, _>(input)`.
//! * [`CicParser`] – the same operations with a custom [`TabularReader`].
//!
//! Only OEM files produce a message; AEM, MEM and MPM files are recognized
//! and rejected with [`CicError::UnimplementedKind`].
//!
//! ## Logging
//! -----------------
//! Parsing stages emit [`tracing`] events. Install a subscriber in the
//! application to see them.
pub mod cic_errors;
pub mod cic_file;
pub mod constants;
pub mod data_table;
pub mod header;
pub mod message;
pub mod metadata;
pub mod time;

pub use cic_errors::{CicError, HeaderError, MessageError, TableError};
pub use cic_file::{parse, parse_as, parse_file, parse_file_as, CicParser};
pub use data_table::{DataTable, EphemerisTableReader, TabularReader};
pub use header::{CreationDate, Header, MessageKind};
pub use message::{CicMessage, Message, Oem};
pub use metadata::MetadataBlock;
pub use time::Instant;
