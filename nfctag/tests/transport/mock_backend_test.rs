use nfctag::LinkProtocol;
use nfctag::Error;
use nfctag::constants::GET_UID;
use nfctag::transport::ReaderBackend;
use nfctag::transport::mock::{MOCK_READER_NAME, MockBackend, MockTag};

#[test]
fn schedule_advances_per_connect() {
    let mut backend = MockBackend::new();
    backend.present(MockTag::ntag213(&[0x04, 0x01]));
    backend.present(MockTag::ntag213(&[0x04, 0x02]));

    let mut first = backend.connect(MOCK_READER_NAME, LinkProtocol::T1).unwrap();
    assert_eq!(first.transmit(&GET_UID).unwrap(), vec![0x04, 0x01, 0x90, 0x00]);
    first.disconnect().unwrap();

    let mut second = backend.connect(MOCK_READER_NAME, LinkProtocol::T1).unwrap();
    assert_eq!(second.transmit(&GET_UID).unwrap(), vec![0x04, 0x02, 0x90, 0x00]);
    second.disconnect().unwrap();

    // drained: the last tag stays put
    let mut again = backend.connect(MOCK_READER_NAME, LinkProtocol::T1).unwrap();
    assert_eq!(again.transmit(&GET_UID).unwrap()[1], 0x02);
    again.disconnect().unwrap();
}

#[test]
fn removed_tag_refuses_connect() {
    let mut backend = MockBackend::new();
    backend.remove_tag();
    assert!(matches!(
        backend.connect(MOCK_READER_NAME, LinkProtocol::Any),
        Err(Error::Transport(_))
    ));
}

#[test]
fn unknown_reader_name() {
    let mut backend = MockBackend::new();
    backend.present(MockTag::ntag213(&[1, 2, 3, 4]));
    assert!(matches!(
        backend.connect("Other Reader", LinkProtocol::Any),
        Err(Error::DeviceNotFound)
    ));
}

#[test]
fn transmit_after_disconnect_fails() {
    let mut backend = MockBackend::new();
    backend.present(MockTag::ntag213(&[1, 2, 3, 4]));
    let mut t = backend.connect(MOCK_READER_NAME, LinkProtocol::Any).unwrap();
    t.disconnect().unwrap();
    assert!(t.transmit(&GET_UID).is_err());
}

#[test]
fn capability_page_is_one_time_programmable() {
    let mut backend = MockBackend::new();
    backend.present(MockTag::ntag213(&[1, 2, 3, 4]));
    let mut t = backend.connect(MOCK_READER_NAME, LinkProtocol::Any).unwrap();
    let r = t
        .transmit(&[0xFF, 0xD6, 0x00, 0x03, 0x04, 0x00, 0x00, 0x00, 0x01])
        .unwrap();
    assert_eq!(r, vec![0x90, 0x00]);
    t.disconnect().unwrap();
    // bits already set stay set
    assert_eq!(backend.tag(&[1, 2, 3, 4]).unwrap().pages[3], [0xE1, 0x10, 0x12, 0x01]);
    assert_eq!(backend.state().write_count(), 1);
}

#[test]
fn connect_failures_are_transient() {
    let mut backend = MockBackend::new();
    backend.present(MockTag::ntag213(&[1, 2, 3, 4]));
    backend.set_connect_failures(1);
    assert!(backend.connect(MOCK_READER_NAME, LinkProtocol::T0).is_err());
    assert!(backend.connect(MOCK_READER_NAME, LinkProtocol::T0).is_ok());
}
