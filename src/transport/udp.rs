//! UDP transport implementation.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::net::UdpSocket;
use tokio::time::timeout;

use super::{Transport, TransportConfig};
use crate::error::{Error, Result};
use crate::format::hex;
use crate::util::bind_ephemeral_udp_socket;

/// UDP transport for a single target.
///
/// Owns a connected socket, so datagrams from other sources are filtered by
/// the kernel.
#[derive(Clone)]
pub struct UdpTransport {
    inner: Arc<UdpTransportInner>,
}

struct UdpTransportInner {
    socket: UdpSocket,
    target: SocketAddr,
    local_addr: SocketAddr,
    max_message_size: usize,
}

impl UdpTransport {
    /// Connect to a target address with default settings.
    pub async fn connect(target: SocketAddr) -> Result<Self> {
        Self::connect_with_config(target, &TransportConfig::default()).await
    }

    /// Connect to a target address.
    ///
    /// Binds an ephemeral port in the target's address family.
    pub async fn connect_with_config(target: SocketAddr, config: &TransportConfig) -> Result<Self> {
        tracing::debug!(snmp.target = %target, "connecting UDP transport");

        let io_err = |source: std::io::Error| Error::Io {
            target: Some(target),
            source,
        };

        let socket = bind_ephemeral_udp_socket(target, config.recv_buffer_size).map_err(io_err)?;
        socket.connect(target).await.map_err(io_err)?;
        let local_addr = socket.local_addr().map_err(io_err)?;

        tracing::debug!(
            snmp.target = %target,
            snmp.local_addr = %local_addr,
            "UDP transport connected"
        );

        Ok(Self {
            inner: Arc::new(UdpTransportInner {
                socket,
                target,
                local_addr,
                max_message_size: config.max_message_size,
            }),
        })
    }
}

impl Transport for UdpTransport {
    async fn send(&self, data: &[u8]) -> Result<()> {
        tracing::trace!(
            snmp.target = %self.inner.target,
            snmp.bytes = data.len(),
            snmp.data = %hex::Bytes(data),
            "UDP send"
        );
        self.inner.socket.send(data).await.map_err(|e| Error::Io {
            target: Some(self.inner.target),
            source: e,
        })?;
        Ok(())
    }

    async fn recv(&self, request_id: i64, recv_timeout: Duration) -> Result<(Bytes, SocketAddr)> {
        tracing::trace!(
            snmp.target = %self.inner.target,
            snmp.request_id = request_id,
            snmp.timeout_ms = recv_timeout.as_millis() as u64,
            "UDP recv waiting"
        );

        // One spare byte detects datagrams longer than the limit
        let mut buf = vec![0u8; self.inner.max_message_size + 1];

        match timeout(recv_timeout, self.inner.socket.recv(&mut buf)).await {
            Ok(Ok(len)) => {
                buf.truncate(len);
                tracing::trace!(
                    snmp.target = %self.inner.target,
                    snmp.bytes = len,
                    snmp.data = %hex::Bytes(&buf),
                    "UDP recv complete"
                );
                Ok((Bytes::from(buf), self.inner.target))
            }
            Ok(Err(e)) => {
                tracing::trace!(snmp.target = %self.inner.target, error = %e, "UDP recv error");
                Err(Error::Io {
                    target: Some(self.inner.target),
                    source: e,
                })
            }
            Err(_) => {
                tracing::trace!(
                    snmp.target = %self.inner.target,
                    snmp.request_id = request_id,
                    "UDP recv timeout"
                );
                Err(Error::Timeout {
                    target: Some(self.inner.target),
                    elapsed: recv_timeout,
                    request_id,
                    retries: 0,
                })
            }
        }
    }

    fn peer_addr(&self) -> SocketAddr {
        self.inner.target
    }

    fn local_addr(&self) -> SocketAddr {
        self.inner.local_addr
    }
}
