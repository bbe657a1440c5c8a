mod common;

use cic_parser::{
    parse, parse_as, parse_file, parse_file_as, CicError, HeaderError, MessageKind, Oem,
};

use common::{data_file, init_tracing};

fn with_kind(kind: &str) -> String {
    std::fs::read_to_string(data_file("AEM_test.txt"))
        .unwrap()
        .replace("CIC_AEM_VERS", &format!("CIC_{kind}_VERS"))
}

#[test]
fn test_aem_file_is_unimplemented() {
    init_tracing();

    assert_eq!(
        parse_file(data_file("AEM_test.txt")).unwrap_err(),
        CicError::UnimplementedKind(MessageKind::Aem)
    );
    assert_eq!(
        parse_file_as::<Oem>(data_file("AEM_test.txt")).unwrap_err(),
        CicError::UnimplementedKind(MessageKind::Aem)
    );
}

#[test]
fn test_recognized_kinds_without_message() {
    for (tag, kind) in [
        ("AEM", MessageKind::Aem),
        ("MEM", MessageKind::Mem),
        ("MPM", MessageKind::Mpm),
    ] {
        let content = with_kind(tag);
        assert_eq!(
            parse(content.as_bytes()).unwrap_err(),
            CicError::UnimplementedKind(kind)
        );
        assert_eq!(
            parse_as::<Oem, _>(content.as_bytes()).unwrap_err(),
            CicError::UnimplementedKind(kind)
        );
    }
}

#[test]
fn test_lowercase_kind_tag() {
    let content = std::fs::read_to_string(data_file("OEM_test.txt"))
        .unwrap()
        .replace("CIC_OEM_VERS", "CIC_oem_VERS");

    let oem: Oem = parse_as(content.as_bytes()).unwrap();
    assert_eq!(oem.header().message_kind(), MessageKind::Oem);
}

#[test]
fn test_unknown_kind_tag() {
    let content = with_kind("OPM");
    assert_eq!(
        parse(content.as_bytes()).unwrap_err(),
        CicError::InvalidHeader(HeaderError::UnsupportedKind("OPM".into()))
    );
}
