//! Mock transport for testing.
//!
//! A programmable transport that replays queued replies without a network.

use std::collections::VecDeque;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use bytes::Bytes;

use super::Transport;
use crate::error::{Error, Result};
use crate::message::CommunityMessage;
use crate::value::{Integer, SnmpObject};

/// A reply the mock hands back from `recv`.
#[derive(Clone, Debug)]
pub enum MockResponse {
    /// Return this data, with its request ID rewritten to the last request's
    Data(Bytes),
    /// Return this data unchanged
    RawData(Bytes),
    /// Simulate a timeout
    Timeout,
    /// Simulate an IO error
    IoError(String),
}

/// A request sent through the mock transport.
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    /// The raw request data
    pub data: Bytes,
    /// The request ID, if the data decodes as a community message carrying one
    pub request_id: Option<i64>,
}

struct MockTransportInner {
    target: SocketAddr,
    responses: VecDeque<MockResponse>,
    requests: Vec<RecordedRequest>,
    last_request_id: Option<i64>,
}

/// Mock transport for exercising [`exchange`](super::exchange).
///
/// An empty queue behaves like a silent peer and times out.
///
/// ```
/// use snmp_ber::transport::MockTransport;
///
/// let mut mock = MockTransport::new("127.0.0.1:161".parse().unwrap());
/// mock.queue_timeout();
/// assert_eq!(mock.queued_response_count(), 1);
/// ```
#[derive(Clone)]
pub struct MockTransport {
    inner: Arc<Mutex<MockTransportInner>>,
}

impl MockTransport {
    pub fn new(target: SocketAddr) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockTransportInner {
                target,
                responses: VecDeque::new(),
                requests: Vec::new(),
                last_request_id: None,
            })),
        }
    }

    // A panic while holding the lock only happens in a failing test; keep going.
    fn lock(&self) -> MutexGuard<'_, MockTransportInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Queue a reply whose request ID is patched to match the request.
    pub fn queue_response(&mut self, data: impl Into<Bytes>) {
        self.lock().responses.push_back(MockResponse::Data(data.into()));
    }

    /// Queue a reply returned byte-for-byte.
    pub fn queue_raw_response(&mut self, data: impl Into<Bytes>) {
        self.lock().responses.push_back(MockResponse::RawData(data.into()));
    }

    pub fn queue_timeout(&mut self) {
        self.lock().responses.push_back(MockResponse::Timeout);
    }

    pub fn queue_io_error(&mut self, msg: impl Into<String>) {
        self.lock().responses.push_back(MockResponse::IoError(msg.into()));
    }

    /// All requests sent so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    pub fn queued_response_count(&self) -> usize {
        self.lock().responses.len()
    }

    /// Rewrite the request ID of a request/response PDU. Anything else is
    /// returned unchanged.
    fn patch_request_id(data: Bytes, request_id: i64) -> Bytes {
        let Ok(msg) = CommunityMessage::decode(data.clone()) else {
            return data;
        };
        let version = msg.version;
        let community = msg.community.clone();
        match msg.into_pdu() {
            SnmpObject::Pdu(mut pdu) => {
                pdu.request_id = Integer::new(request_id);
                CommunityMessage::new(version, community, pdu)
                    .and_then(|m| m.encode())
                    .unwrap_or(data)
            }
            _ => data,
        }
    }
}

impl Transport for MockTransport {
    async fn send(&self, data: &[u8]) -> Result<()> {
        let data = Bytes::copy_from_slice(data);
        let request_id = CommunityMessage::decode(data.clone())
            .ok()
            .and_then(|m| m.request_id());

        let mut inner = self.lock();
        inner.requests.push(RecordedRequest { data, request_id });
        inner.last_request_id = request_id;
        Ok(())
    }

    async fn recv(&self, request_id: i64, timeout: Duration) -> Result<(Bytes, SocketAddr)> {
        let (response, target, last_request_id) = {
            let mut inner = self.lock();
            (inner.responses.pop_front(), inner.target, inner.last_request_id)
        };

        match response {
            Some(MockResponse::Data(data)) => {
                let data = match last_request_id {
                    Some(id) => Self::patch_request_id(data, id),
                    None => data,
                };
                Ok((data, target))
            }
            Some(MockResponse::RawData(data)) => Ok((data, target)),
            Some(MockResponse::IoError(msg)) => Err(Error::Io {
                target: Some(target),
                source: std::io::Error::other(msg),
            }),
            Some(MockResponse::Timeout) | None => Err(Error::Timeout {
                target: Some(target),
                elapsed: timeout,
                request_id,
                retries: 0,
            }),
        }
    }

    fn peer_addr(&self) -> SocketAddr {
        self.lock().target
    }

    fn local_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::LOCALHOST, 0))
    }
}
