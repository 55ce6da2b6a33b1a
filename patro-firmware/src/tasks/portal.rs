//! Captive portal task
//!
//! Serves one connection at a time: read the request head, hand it to the
//! core portal, write the response, close. Transport errors are logged and
//! the listener carries on.

use defmt::*;
use embassy_net::tcp::TcpSocket;
use embassy_net::{IpAddress, Stack};
use embassy_time::Duration;
use embedded_io_async::Write;
use heapless::String;
use patro_core::portal::{Portal, Request};

use crate::shared::{record_peer, ARBITER};

/// Largest request head accepted; the rest is ignored
const HEAD_BUFFER_SIZE: usize = 1024;

/// Room for the status line and headers of any response
const RESPONSE_HEAD_SIZE: usize = 192;

/// Idle time before a stalled client is dropped
const SOCKET_TIMEOUT: Duration = Duration::from_secs(10);

/// Portal task - accepts HTTP connections forever
#[embassy_executor::task]
pub async fn portal_task(stack: Stack<'static>, port: u16) -> ! {
    info!("Portal task started on port {}", port);

    let portal = Portal::new(&ARBITER);
    let mut rx_buffer = [0u8; 1024];
    let mut tx_buffer = [0u8; 2048];
    let mut head = [0u8; HEAD_BUFFER_SIZE];

    loop {
        let mut socket = TcpSocket::new(stack, &mut rx_buffer, &mut tx_buffer);
        socket.set_timeout(Some(SOCKET_TIMEOUT));

        if let Err(e) = socket.accept(port).await {
            warn!("Accept failed: {:?}", e);
            continue;
        }

        if let Some(address) = socket.remote_endpoint().and_then(|ep| ipv4_octets(ep.addr)) {
            record_peer(address);
        }

        serve(&mut socket, &portal, &mut head).await;

        socket.close();
        if let Err(e) = socket.flush().await {
            trace!("Flush on close failed: {:?}", e);
        }
        socket.abort();
    }
}

#[allow(unreachable_patterns)]
fn ipv4_octets(addr: IpAddress) -> Option<[u8; 4]> {
    match addr {
        IpAddress::Ipv4(v4) => Some(v4.octets()),
        _ => None,
    }
}

/// Handle a single request on an accepted socket
async fn serve(socket: &mut TcpSocket<'_>, portal: &Portal<'_>, head: &mut [u8]) {
    let len = match read_head(socket, head).await {
        Some(len) => len,
        None => return,
    };

    let text = match core::str::from_utf8(&head[..len]) {
        Ok(text) => text,
        // Keep whatever decodes; the request line comes first
        Err(e) => match core::str::from_utf8(&head[..e.valid_up_to()]) {
            Ok(text) => text,
            Err(_) => return,
        },
    };

    let request = match Request::parse(text) {
        Ok(request) => request,
        Err(e) => {
            debug!("Dropping bad request: {:?}", e);
            return;
        }
    };

    let outcome = portal.handle(&request);
    match outcome.applied {
        Some(color) => info!(
            "Override applied: r={} g={} b={}",
            color.red, color.green, color.blue
        ),
        None => debug!("{} -> {}", request.path, outcome.route),
    }

    let response = outcome.response;
    let mut response_head: String<RESPONSE_HEAD_SIZE> = String::new();
    if response.write_head(&mut response_head).is_err() {
        warn!("Response head overflow");
        return;
    }

    if let Err(e) = socket.write_all(response_head.as_bytes()).await {
        warn!("Write failed: {:?}", e);
        return;
    }
    if request.wants_body() {
        if let Err(e) = socket.write_all(response.body().as_bytes()).await {
            warn!("Write failed: {:?}", e);
        }
    }
}

/// Read until the blank line ending the head, the buffer fills, or EOF
///
/// Returns `None` if the client sent nothing or the socket failed.
async fn read_head(socket: &mut TcpSocket<'_>, buf: &mut [u8]) -> Option<usize> {
    let mut len = 0;
    while len < buf.len() {
        match socket.read(&mut buf[len..]).await {
            Ok(0) => break,
            Ok(n) => {
                len += n;
                if buf[..len].windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            Err(e) => {
                warn!("Read failed: {:?}", e);
                return None;
            }
        }
    }
    (len > 0).then_some(len)
}
