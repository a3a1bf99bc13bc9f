//! Byte-stream exerciser for the codec.
//!
//! Provides the `Transport` trait, a UDP implementation and [`exchange`], which
//! drives one request/response round trip of encoded community messages. All
//! timeouts and retries live here; the codec itself never retries.

mod udp;

#[cfg(any(test, feature = "testing"))]
mod mock;

pub use udp::*;

#[cfg(any(test, feature = "testing"))]
pub use mock::*;

use std::future::Future;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use bytes::Bytes;

use crate::error::{Error, Result};
use crate::message::CommunityMessage;

/// Largest payload of a single UDP datagram over IPv4.
pub const MAX_UDP_PAYLOAD: usize = 65507;

/// Client-side transport abstraction.
///
/// Implementations are cheap to clone (`Arc` inside) so a transport can be
/// shared between tasks.
pub trait Transport: Send + Sync + Clone {
    /// Send request data to the target.
    fn send(&self, data: &[u8]) -> impl Future<Output = Result<()>> + Send;

    /// Receive one datagram, waiting at most `timeout`.
    ///
    /// `request_id` is only used to label errors and log events; correlation
    /// is checked by [`exchange`] after decoding.
    ///
    /// Returns (response_data, actual_source_address)
    fn recv(
        &self,
        request_id: i64,
        timeout: Duration,
    ) -> impl Future<Output = Result<(Bytes, SocketAddr)>> + Send;

    /// The peer address for this transport.
    fn peer_addr(&self) -> SocketAddr;

    /// Local bind address.
    fn local_addr(&self) -> SocketAddr;
}

/// Timeouts, retries and size limits for [`exchange`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// How long to wait for each reply (default: 5s)
    pub timeout: Duration,
    /// Extra attempts after the first timeout (default: 2)
    pub retries: u32,
    /// Requested socket receive buffer size (default: kernel default)
    pub recv_buffer_size: Option<usize>,
    /// Largest message sent or accepted (default: 65507)
    pub max_message_size: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            retries: 2,
            recv_buffer_size: None,
            max_message_size: MAX_UDP_PAYLOAD,
        }
    }
}

impl TransportConfig {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn recv_buffer_size(mut self, size: usize) -> Self {
        self.recv_buffer_size = Some(size);
        self
    }

    pub fn max_message_size(mut self, size: usize) -> Self {
        self.max_message_size = size;
        self
    }
}

/// Send `message` and wait for the reply.
///
/// Each attempt resends the same bytes. Timeouts are retried up to
/// `config.retries` times; any other failure returns immediately. A reply
/// whose request ID differs from the request's fails with
/// [`Error::RequestIdMismatch`]. Messages without a request ID (SNMPv1 traps)
/// accept any reply. A message carrying an OID that would not survive
/// encoding fails with [`Error::InvalidOid`] before anything is sent.
pub async fn exchange<T: Transport>(
    transport: &T,
    message: &CommunityMessage,
    config: &TransportConfig,
) -> Result<CommunityMessage> {
    let data = message.encode()?;
    if data.len() > config.max_message_size {
        return Err(Error::MessageTooLarge {
            size: data.len(),
            max: config.max_message_size,
        });
    }

    let expected = message.request_id();
    let label = expected.unwrap_or(0);
    let start = Instant::now();

    for attempt in 0..=config.retries {
        if attempt > 0 {
            tracing::debug!(
                snmp.target = %transport.peer_addr(),
                snmp.request_id = label,
                snmp.attempt = attempt,
                "retrying after timeout"
            );
        }

        transport.send(&data).await?;

        let (reply, source) = match transport.recv(label, config.timeout).await {
            Ok(reply) => reply,
            Err(Error::Timeout { .. }) => continue,
            Err(e) => return Err(e),
        };

        if reply.len() > config.max_message_size {
            return Err(Error::MessageTooLarge {
                size: reply.len(),
                max: config.max_message_size,
            });
        }

        let response = CommunityMessage::decode(reply)?;
        if let (Some(expected), Some(actual)) = (expected, response.request_id())
            && expected != actual
        {
            tracing::debug!(
                snmp.source = %source,
                snmp.request_id = expected,
                snmp.actual = actual,
                "request ID mismatch"
            );
            return Err(Error::RequestIdMismatch { expected, actual });
        }

        return Ok(response);
    }

    Err(Error::Timeout {
        target: Some(transport.peer_addr()),
        elapsed: start.elapsed(),
        request_id: label,
        retries: config.retries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorStatus;
    use crate::oid;
    use crate::pdu::Pdu;
    use crate::value::OctetString;
    use crate::varbind::VarBind;

    fn target() -> SocketAddr {
        "127.0.0.1:161".parse().unwrap()
    }

    fn reply(request_id: i32) -> Bytes {
        let pdu = Pdu::response(
            request_id,
            ErrorStatus::NoError,
            0,
            vec![VarBind::new(oid!(1, 3, 6, 1, 2, 1, 1, 5, 0), OctetString::from("edge"))],
        );
        CommunityMessage::v2c("public", pdu).encode().unwrap()
    }

    fn config() -> TransportConfig {
        TransportConfig::default().timeout(Duration::from_millis(10))
    }

    #[tokio::test]
    async fn test_exchange_returns_reply() {
        let mut mock = MockTransport::new(target());
        mock.queue_response(reply(0));

        let sys_name = oid!(1, 3, 6, 1, 2, 1, 1, 5, 0);
        let request = CommunityMessage::v2c("public", Pdu::get_request(42, &[sys_name]));
        let response = exchange(&mock, &request, &config()).await.unwrap();

        assert_eq!(response.request_id(), Some(42));
        assert_eq!(mock.requests().len(), 1);
        assert_eq!(mock.requests()[0].request_id, Some(42));
    }

    #[tokio::test]
    async fn test_exchange_retries_timeouts() {
        let mut mock = MockTransport::new(target());
        mock.queue_timeout();
        mock.queue_timeout();
        mock.queue_response(reply(0));

        let request = CommunityMessage::v2c("public", Pdu::get_request(7, &[oid!(1, 3)]));
        let response = exchange(&mock, &request, &config()).await.unwrap();
        assert_eq!(response.request_id(), Some(7));
        assert_eq!(mock.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_exchange_gives_up_after_retries() {
        let mock = MockTransport::new(target());
        let request = CommunityMessage::v2c("public", Pdu::get_request(9, &[oid!(1, 3)]));
        let err = exchange(&mock, &request, &config().retries(1)).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Timeout {
                request_id: 9,
                retries: 1,
                ..
            }
        ));
        assert_eq!(mock.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_exchange_request_id_mismatch() {
        let mut mock = MockTransport::new(target());
        mock.queue_raw_response(reply(100));

        let request = CommunityMessage::v2c("public", Pdu::get_request(1, &[oid!(1, 3)]));
        let err = exchange(&mock, &request, &config()).await.unwrap_err();
        assert!(matches!(
            err,
            Error::RequestIdMismatch {
                expected: 1,
                actual: 100
            }
        ));
    }

    #[tokio::test]
    async fn test_exchange_io_error_not_retried() {
        let mut mock = MockTransport::new(target());
        mock.queue_io_error("connection refused");

        let request = CommunityMessage::v2c("public", Pdu::get_request(1, &[oid!(1, 3)]));
        let err = exchange(&mock, &request, &config()).await.unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert_eq!(err.target(), Some(target()));
        assert_eq!(mock.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_exchange_rejects_oversized_request() {
        let mock = MockTransport::new(target());
        let request = CommunityMessage::v2c("public", Pdu::get_request(1, &[oid!(1, 3)]));
        let err = exchange(&mock, &request, &config().max_message_size(8))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MessageTooLarge { max: 8, .. }));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_exchange_refuses_invalid_oid_before_sending() {
        let mock = MockTransport::new(target());
        let request = CommunityMessage::v2c("public", Pdu::get_request(1, &[oid!(1)]));
        let err = exchange(&mock, &request, &config()).await.unwrap_err();
        assert!(matches!(err, Error::InvalidOid { .. }));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_exchange_malformed_reply() {
        let mut mock = MockTransport::new(target());
        mock.queue_raw_response(Bytes::from_static(&[0x30, 0x03, 0x02, 0x01]));

        let request = CommunityMessage::v2c("public", Pdu::get_request(1, &[oid!(1, 3)]));
        let err = exchange(&mock, &request, &config()).await.unwrap_err();
        assert!(err.is_decode_error());
    }
}
