//! # Validated CIC messages
//!
//! A [`Message`] is the tagged union of the message kinds this crate can
//! build. Every kind shares a [`Header`], a [`MetadataBlock`] and a
//! [`DataTable`]; each variant then applies its own metadata rules.
//!
//! Only the Orbit Ephemeris Message is implemented. The other kinds are
//! recognized by the header parser but [`build_message`] refuses them with
//! [`CicError::UnimplementedKind`].
//!
//! ## Typed access
//! -----------------
//! [`CicMessage`] links a concrete message type to its [`MessageKind`] and is
//! what [`crate::cic_file::parse_as`] uses to return e.g. an [`Oem`] directly.
pub mod oem;

use tracing::debug;

use crate::{
    cic_errors::CicError,
    data_table::DataTable,
    header::{Header, MessageKind},
    metadata::MetadataBlock,
};

pub use oem::Oem;

/// A validated CIC message.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Oem(Oem),
}

impl Message {
    pub fn kind(&self) -> MessageKind {
        match self {
            Message::Oem(_) => MessageKind::Oem,
        }
    }

    pub fn header(&self) -> &Header {
        match self {
            Message::Oem(oem) => oem.header(),
        }
    }

    pub fn meta(&self) -> &MetadataBlock {
        match self {
            Message::Oem(oem) => oem.meta(),
        }
    }

    pub fn data(&self) -> &DataTable {
        match self {
            Message::Oem(oem) => oem.data(),
        }
    }

    pub fn as_oem(&self) -> Option<&Oem> {
        match self {
            Message::Oem(oem) => Some(oem),
        }
    }

    pub fn into_oem(self) -> Option<Oem> {
        Oem::from_message(self)
    }
}

/// A concrete message type that [`crate::cic_file::parse_as`] can return.
pub trait CicMessage: Sized {
    /// The header kind this type is built from.
    const KIND: MessageKind;

    /// Extract the concrete message, `None` if `message` holds another kind.
    fn from_message(message: Message) -> Option<Self>;
}

/// Route the parsed parts to the constructor of their message kind.
///
/// Arguments
/// -----------------
/// * `header`, `meta`, `data`: the structurally parsed parts of a file
///
/// Return
/// ----------
/// * The validated message, [`CicError::InvalidMessage`] when the kind-specific
///   validation fails, or [`CicError::UnimplementedKind`] for AEM, MEM and MPM.
pub fn build_message(
    header: Header,
    meta: MetadataBlock,
    data: DataTable,
) -> Result<Message, CicError> {
    let kind = header.message_kind();
    debug!("building {kind} message");
    match kind {
        MessageKind::Oem => Ok(Oem::from_parts(header, meta, data)?.into()),
        MessageKind::Aem | MessageKind::Mem | MessageKind::Mpm => {
            Err(CicError::UnimplementedKind(kind))
        }
    }
}

#[cfg(test)]
mod message_test {
    use hifitime::{Epoch, TimeScale};

    use super::*;
    use crate::cic_errors::MessageError;

    fn parts(kind: &str) -> (Header, MetadataBlock, DataTable) {
        let header = Header::new(kind, "1.0", "2009-12-08T09:00:00.000", "CNES", None).unwrap();
        let meta = [
            ("OBJECT_NAME", "CubeSat"),
            ("OBJECT_ID", "CubeSat"),
            ("CENTER_NAME", "EARTH"),
            ("REF_FRAME", "EME2000"),
            ("TIME_SYSTEM", "UTC"),
        ]
        .into_iter()
        .collect();
        let data = DataTable::new(
            TimeScale::UTC,
            vec![Epoch::from_gregorian_utc_at_midnight(2009, 12, 8)],
            vec![vec![1.0, 2.0, 3.0]],
        )
        .unwrap();
        (header, meta, data)
    }

    #[test]
    fn test_build_oem() {
        let (header, meta, data) = parts("OEM");
        let message = build_message(header, meta, data).unwrap();

        assert_eq!(message.kind(), MessageKind::Oem);
        assert_eq!(message.header().version(), "1.0");
        assert_eq!(message.meta().get("CENTER_NAME"), Some("EARTH"));
        assert_eq!(message.data().len(), 1);
        assert_eq!(message.as_oem().map(Oem::object_name), Some("CubeSat"));
        assert!(message.into_oem().is_some());
    }

    #[test]
    fn test_build_unimplemented_kinds() {
        for (label, kind) in [
            ("AEM", MessageKind::Aem),
            ("MEM", MessageKind::Mem),
            ("MPM", MessageKind::Mpm),
        ] {
            let (header, meta, data) = parts(label);
            assert_eq!(
                build_message(header, meta, data),
                Err(CicError::UnimplementedKind(kind))
            );
        }
    }

    #[test]
    fn test_build_invalid_oem() {
        let (header, mut meta, data) = parts("OEM");
        meta.insert("REF_FRAME", "ITRF");
        assert_eq!(
            build_message(header, meta, data),
            Err(CicError::InvalidMessage(
                MessageError::UnsupportedReferenceFrame("ITRF".into())
            ))
        );
    }
}
