use nfctag::protocol::{Command, encode_write_page, paginate};

#[test]
fn fixed_commands_match_reader_apdus() {
    assert_eq!(hex::encode(Command::GetUid.encode()), "ffca000000");
    assert_eq!(hex::encode(Command::EnableNdef.encode()), "ffd6000304e110060f");
    assert_eq!(hex::encode(Command::Lock.encode()), "ffd600020400000000");
}

#[test]
fn read_and_write_pages() {
    assert_eq!(hex::encode(Command::ReadPage { page: 0x27 }.encode()), "ffb0002704");
    assert_eq!(
        hex::encode(encode_write_page(5, [0xDE, 0xAD, 0xBE, 0xEF])),
        "ffd6000504deadbeef"
    );
}

#[test]
fn paginate_pads_final_page() {
    let pages = paginate(&[1, 2, 3, 4, 5]);
    assert_eq!(pages, vec![[1, 2, 3, 4], [5, 0, 0, 0]]);
    assert!(paginate(&[]).is_empty());
}
