use nhsave::{EncryptedInt32, Error};
use paste::paste;

macro_rules! roundtrip_shift {
    ( $($shift:literal),* ) => {
        $(
            paste! {
                #[test]
                fn [<int_roundtrip_shift_ $shift>]() {
                    for value in [0u32, 1, 12345, 0x8000_0000, 0xDEAD_BEEF, 0xFFFF_FFFF] {
                        for adjust in [0u16, 1, 42, 0x7FFF, 0xFFFF] {
                            let enc = EncryptedInt32::encrypt(value, $shift, adjust);
                            assert_eq!(
                                EncryptedInt32::decrypt(enc, $shift, adjust),
                                value,
                                "value {value:#x} adjust {adjust:#x}"
                            );
                        }
                    }
                }
            }
        )*
    };
}

roundtrip_shift!(0, 1, 2, 3, 7, 13, 20, 28, 29);

#[test]
fn known_vectors() {
    assert_eq!(EncryptedInt32::encrypt(12345, 7, 42), 0x7415_49FC);
    assert_eq!(EncryptedInt32::calculate_checksum(0x7415_49FC), 0xA1);
    assert_eq!(EncryptedInt32::decrypt(0x1234_5678, 5, 1000), 0xF8F5_5B7F);
    assert_eq!(EncryptedInt32::decrypt(0, 0, 0), 0x80E3_2B11);
}

#[test]
fn checksum_is_pure() {
    assert_eq!(EncryptedInt32::calculate_checksum(0), 0xD3);
    assert_eq!(EncryptedInt32::calculate_checksum(0xFFFF_FFFF), 0xCF);
    assert_eq!(
        EncryptedInt32::calculate_checksum(0x1234_5678),
        EncryptedInt32::calculate_checksum(0x1234_5678)
    );
}

#[test]
fn record_roundtrip_through_buffer() {
    let mut record = EncryptedInt32::new(EncryptedInt32::encrypt(0, 7, 42), 42, 7, 0);
    record.value = 12345;

    let mut buf = [0u8; EncryptedInt32::SIZE];
    record.write(&mut buf, 0).unwrap();

    let read = EncryptedInt32::read_verify(&buf, 0).unwrap();
    assert_eq!(read.value, 12345);
    assert_eq!(read.adjust, 42);
    assert_eq!(read.shift, 7);

    // flip one bit in the stored encrypted field
    buf[0] ^= 1;
    assert!(matches!(
        EncryptedInt32::read_verify(&buf, 0),
        Err(Error::ChecksumMismatch { offset: 0, .. })
    ));

    // unverified read still parses
    EncryptedInt32::read(&buf, 0).unwrap();
}

#[test]
fn obfuscation_parameters_preserved_on_rewrite() {
    // two records with the same logical value but different writer-chosen
    // parameters must serialize to different bytes
    let mut a = EncryptedInt32::new(EncryptedInt32::encrypt(500, 2, 9), 9, 2, 0);
    let mut b = EncryptedInt32::new(EncryptedInt32::encrypt(500, 11, 300), 300, 11, 0);
    a.value = 600;
    b.value = 600;

    let mut buf_a = [0u8; EncryptedInt32::SIZE];
    let mut buf_b = [0u8; EncryptedInt32::SIZE];
    a.write(&mut buf_a, 0).unwrap();
    b.write(&mut buf_b, 0).unwrap();
    assert_ne!(buf_a, buf_b);

    assert_eq!(EncryptedInt32::read_verify(&buf_a, 0).unwrap().value, 600);
    assert_eq!(EncryptedInt32::read_verify(&buf_b, 0).unwrap().value, 600);
}

#[test]
fn record_at_offset() {
    let mut buf = vec![0u8; 32];
    let mut record = EncryptedInt32::new(EncryptedInt32::encrypt(1, 4, 77), 77, 4, 0);
    record.value = 0xCAFE;
    record.write(&mut buf, 24).unwrap();

    assert_eq!(EncryptedInt32::read_verify(&buf, 24).unwrap().value, 0xCAFE);
}

#[test]
fn out_of_bounds_record_rejected() {
    let buf = [0u8; 12];
    assert!(matches!(
        EncryptedInt32::read(&buf, 8),
        Err(Error::RecordBounds { offset: 8, len: 12 })
    ));

    let mut buf = [0u8; 4];
    let record = EncryptedInt32::new(0, 0, 0, 0);
    assert!(matches!(
        record.write(&mut buf, 0),
        Err(Error::RecordBounds { .. })
    ));
}
