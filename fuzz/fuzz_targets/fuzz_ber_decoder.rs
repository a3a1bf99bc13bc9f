#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;

use snmp_ber::ber::{DecodeConfig, Decoder};
use snmp_ber::value::SnmpObject;
use snmp_ber::varbind::decode_varbind_list;

fuzz_target!(|data: &[u8]| {
    let bytes = Bytes::copy_from_slice(data);

    // TLV splitting only
    let mut decoder = Decoder::new(bytes.clone());
    while decoder.read_tlv().is_ok() {}

    // Full typed decode, default and tight limits
    let _ = SnmpObject::decode_bytes(bytes.clone());
    let tight = DecodeConfig::default().max_depth(4).max_length(512);
    let _ = SnmpObject::decode_with_config(bytes.clone(), tight);

    // Anything that decodes must re-encode to the same bytes
    if let Ok(value) = SnmpObject::decode_bytes(bytes.clone()) {
        let reencoded = value.encode().expect("decoded value re-encodes");
        assert_eq!(SnmpObject::decode_bytes(reencoded).ok(), Some(value));
    }

    let _ = decode_varbind_list(data);
});
