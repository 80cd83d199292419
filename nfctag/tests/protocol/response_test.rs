use nfctag::Error;
use nfctag::protocol::Response;

#[test]
fn decode_success_with_data() {
    let r = Response::decode(&[0x04, 0xAA, 0x90, 0x00]).unwrap();
    assert!(r.is_success());
    assert_eq!(r.data, vec![0x04, 0xAA]);
    assert_eq!(r.status(), (0x90, 0x00));
}

#[test]
fn failure_status_into_error() {
    let r = Response::decode(&[0x63, 0x00]).unwrap();
    assert!(!r.is_success());
    assert!(matches!(
        r.into_result(),
        Err(Error::Status { sw1: 0x63, sw2: 0x00 })
    ));
}

#[test]
fn too_short_is_rejected() {
    assert!(matches!(
        Response::decode(&[0x90]),
        Err(Error::InvalidLength { expected: 2, actual: 1 })
    ));
}
