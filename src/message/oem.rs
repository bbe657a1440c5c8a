//! # Orbit Ephemeris Message
//!
//! An OEM adds kind-specific requirements on top of the shared header and
//! metadata block:
//!
//! | Key | Requirement |
//! |---|---|
//! | `OBJECT_NAME` | present |
//! | `OBJECT_ID` | present |
//! | `CENTER_NAME` | present |
//! | `REF_FRAME` | present, exactly `EME2000` |
//! | `TIME_SYSTEM` | present, one of `TAI`, `UTC`, `TT`, `TDB` |
//!
//! Keys are checked in this order and the first failure is reported. The
//! values are otherwise taken as they are: no format check is applied to
//! `OBJECT_ID` or `CENTER_NAME`.
use hifitime::TimeScale;
use nalgebra::Vector3;

use crate::{
    cic_errors::MessageError,
    constants::{
        CENTER_NAME, OBJECT_ID, OBJECT_NAME, OEM_REF_FRAME, OEM_REQUIRED_KEYS, REF_FRAME,
        TIME_SYSTEM,
    },
    data_table::DataTable,
    header::{Header, MessageKind},
    metadata::MetadataBlock,
    time::time_scale_from_name,
};

use super::{CicMessage, Message};

/// A validated Orbit Ephemeris Message.
#[derive(Debug, Clone, PartialEq)]
pub struct Oem {
    header: Header,
    meta: MetadataBlock,
    data: DataTable,
    object_name: String,
    object_id: String,
    center_name: String,
    time_system: TimeScale,
}

impl Oem {
    /// Validate the OEM-specific requirements and assemble the message.
    ///
    /// Arguments
    /// -----------------
    /// * `header`: a header whose kind must be [`MessageKind::Oem`]
    /// * `meta`: the metadata block, see the module documentation for the required keys
    /// * `data`: the decoded data block
    ///
    /// Return
    /// ----------
    /// * The message, or the first [`MessageError`] found:
    ///   [`MessageError::KindMismatch`], [`MessageError::MissingMetadata`],
    ///   [`MessageError::UnsupportedReferenceFrame`] or
    ///   [`MessageError::UnsupportedTimeSystem`].
    pub fn from_parts(
        header: Header,
        meta: MetadataBlock,
        data: DataTable,
    ) -> Result<Self, MessageError> {
        if header.message_kind() != MessageKind::Oem {
            return Err(MessageError::KindMismatch {
                expected: MessageKind::Oem,
                found: header.message_kind(),
            });
        }

        for key in OEM_REQUIRED_KEYS {
            meta.require(key)?;
        }

        let ref_frame = meta.require(REF_FRAME)?;
        if ref_frame != OEM_REF_FRAME {
            return Err(MessageError::UnsupportedReferenceFrame(
                ref_frame.to_string(),
            ));
        }

        let time_system = meta.require(TIME_SYSTEM)?;
        let time_system = time_scale_from_name(time_system)
            .ok_or_else(|| MessageError::UnsupportedTimeSystem(time_system.to_string()))?;

        Ok(Oem {
            object_name: meta.require(OBJECT_NAME)?.to_string(),
            object_id: meta.require(OBJECT_ID)?.to_string(),
            center_name: meta.require(CENTER_NAME)?.to_string(),
            time_system,
            header,
            meta,
            data,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn meta(&self) -> &MetadataBlock {
        &self.meta
    }

    pub fn data(&self) -> &DataTable {
        &self.data
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    pub fn object_id(&self) -> &str {
        &self.object_id
    }

    pub fn center_name(&self) -> &str {
        &self.center_name
    }

    /// Always `EME2000` for a valid OEM.
    pub fn ref_frame(&self) -> &'static str {
        OEM_REF_FRAME
    }

    pub fn time_system(&self) -> TimeScale {
        self.time_system
    }

    /// Positions of the ephemeris records, `None` if a record has fewer than three values.
    pub fn positions(&self) -> Option<Vec<Vector3<f64>>> {
        self.data.positions()
    }

    /// Velocities of the ephemeris records, `None` if a record has fewer than six values.
    pub fn velocities(&self) -> Option<Vec<Vector3<f64>>> {
        self.data.velocities()
    }
}

impl CicMessage for Oem {
    const KIND: MessageKind = MessageKind::Oem;

    fn from_message(message: Message) -> Option<Self> {
        match message {
            Message::Oem(oem) => Some(oem),
        }
    }
}

impl From<Oem> for Message {
    fn from(oem: Oem) -> Self {
        Message::Oem(oem)
    }
}
