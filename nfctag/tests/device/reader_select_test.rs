#[path = "../common/mod.rs"]
mod common;

use nfctag::device::{DeviceSessionBuilder, ReaderModel, ReaderProfile};
use nfctag::transport::mock::MockBackend;
use nfctag::Error;

#[test]
fn selects_first_supported_reader() {
    common::helpers::init_logger();
    let backend = MockBackend::with_readers(&[
        "Yubico YubiKey OTP+FIDO+CCID 0",
        "SCM Microsystems Inc. SCL3711 reader & NFC device 0",
    ]);
    let mut device = DeviceSessionBuilder::new()
        .with_backend(Box::new(backend))
        .build()
        .unwrap();
    let reader = device.find_device().unwrap();
    assert_eq!(reader.model, ReaderModel::Scm);
    assert_eq!(device.reader(), Some(&reader));
}

#[test]
fn acr122_uses_reduced_profile() {
    let profile = ReaderModel::Acr122.profile();
    assert_eq!(profile.extended_end_page, 80);
    assert!(profile.debounce > ReaderProfile::default().debounce);
}

#[test]
fn no_reader_attached() {
    let mut device = DeviceSessionBuilder::new()
        .with_backend(Box::new(MockBackend::with_readers(&[])))
        .build()
        .unwrap();
    assert!(matches!(device.find_device(), Err(Error::DeviceNotFound)));
    assert!(device.open_channel().is_none());
}
