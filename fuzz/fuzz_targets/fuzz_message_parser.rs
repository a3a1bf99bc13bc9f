#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;

use snmp_ber::message::CommunityMessage;
use snmp_ber::pdu::{BulkPdu, NotificationPdu, Pdu, TrapPdu};

fuzz_target!(|data: &[u8]| {
    let bytes = Bytes::copy_from_slice(data);

    if let Ok(msg) = CommunityMessage::decode(bytes) {
        let reencoded = msg.encode().expect("decoded message re-encodes");
        let _ = CommunityMessage::decode(reencoded);
    }

    let _ = Pdu::decode(data);
    let _ = BulkPdu::decode(data);
    let _ = TrapPdu::decode(data);
    let _ = NotificationPdu::decode(data);
});
