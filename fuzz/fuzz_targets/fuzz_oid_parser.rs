#![no_main]

use libfuzzer_sys::fuzz_target;

use snmp_ber::oid::Oid;

fuzz_target!(|data: &[u8]| {
    let _ = Oid::from_ber(data, 0);

    if let Ok(s) = std::str::from_utf8(data) {
        let _ = Oid::parse(s);
    }
});
