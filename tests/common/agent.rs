//! Minimal UDP agent answering GET requests from a fixed table.

use std::net::SocketAddr;

use snmp_ber::error::ErrorStatus;
use snmp_ber::pdu::PduType;
use snmp_ber::{
    CommunityMessage, OctetString, Oid, Pdu, SnmpObject, TimeTicks, VarBind,
};
use tokio::net::UdpSocket;
use tokio::task::JoinHandle;

use super::fixtures::*;

/// A background agent bound to an ephemeral loopback port.
///
/// GET requests are answered from the system group; unknown OIDs get
/// `noSuchName` with the 1-based index of the first miss. Messages with the
/// wrong community are dropped, as are non-GET PDUs. Datagrams that do not
/// decode are echoed back verbatim.
pub struct TestAgent {
    pub addr: SocketAddr,
    task: JoinHandle<()>,
}

impl TestAgent {
    pub async fn new() -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        let task = tokio::spawn(async move {
            let mut buf = vec![0u8; 65535];
            loop {
                let Ok((len, peer)) = socket.recv_from(&mut buf).await else {
                    return;
                };
                let request = bytes::Bytes::copy_from_slice(&buf[..len]);
                let reply = match CommunityMessage::decode(request.clone()) {
                    Ok(msg) => match answer(&msg) {
                        Some(reply) => match reply.encode() {
                            Ok(bytes) => bytes,
                            Err(_) => continue,
                        },
                        None => continue,
                    },
                    Err(_) => request,
                };
                let _ = socket.send_to(&reply, peer).await;
            }
        });
        Self { addr, task }
    }
}

impl Drop for TestAgent {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn lookup(oid: &Oid) -> Option<SnmpObject> {
    if *oid == sys_descr() {
        Some(OctetString::from(SYS_DESCR).into())
    } else if *oid == sys_name() {
        Some(OctetString::from(SYS_NAME).into())
    } else if *oid == sys_uptime() {
        Some(TimeTicks::new(SYS_UPTIME).into())
    } else {
        None
    }
}

fn answer(msg: &CommunityMessage) -> Option<CommunityMessage> {
    if msg.community.value() != COMMUNITY.as_bytes() {
        return None;
    }
    let SnmpObject::Pdu(pdu) = msg.pdu() else {
        return None;
    };
    if pdu.pdu_type() != PduType::GetRequest {
        return None;
    }

    let request_id = i32::try_from(pdu.request_id_i64()).ok()?;
    let mut varbinds = Vec::with_capacity(pdu.varbinds.len());
    let mut miss = None;
    for (i, vb) in pdu.varbinds.iter().enumerate() {
        match lookup(&vb.oid) {
            Some(value) => varbinds.push(VarBind::new(vb.oid.clone(), value)),
            None => {
                miss.get_or_insert(i as i32 + 1);
                varbinds.push(VarBind::null(vb.oid.clone()));
            }
        }
    }

    let response = match miss {
        Some(index) => Pdu::response(
            request_id,
            ErrorStatus::NoSuchName,
            index,
            pdu.varbinds.clone(),
        ),
        None => Pdu::response(request_id, ErrorStatus::NoError, 0, varbinds),
    };
    CommunityMessage::new(msg.version, msg.community.clone(), response).ok()
}

