use hickory_server::ServerFuture;
use llm_dns_infrastructure::dns::DnsServerHandler;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{TcpListener, UdpSocket};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Serve TXT queries over UDP and TCP on `bind_addr` until `shutdown` fires.
///
/// Each transport gets its own listener task and every request is handled
/// on its own task, so a slow generation call never stalls other queries.
/// On shutdown both listeners stop accepting and in-flight requests are
/// allowed to finish.
pub async fn start_dns_server(
    bind_addr: String,
    handler: DnsServerHandler,
    tcp_timeout: Duration,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let socket_addr: SocketAddr = bind_addr.parse()?;
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let udp_socket = create_udp_socket(domain, socket_addr)?;
    let tcp_listener = create_tcp_listener(domain, socket_addr)?;

    let mut server = ServerFuture::new(handler);
    server.register_socket(udp_socket);
    server.register_listener(tcp_listener, tcp_timeout);

    info!(bind_address = %socket_addr, "DNS server ready (UDP/TCP)");

    tokio::select! {
        _ = shutdown.cancelled() => {}
        result = server.block_until_done() => {
            result?;
            return Ok(());
        }
    }

    info!("Stopping DNS listeners");
    server.shutdown_gracefully().await?;
    Ok(())
}

fn create_udp_socket(domain: Domain, socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}

fn create_tcp_listener(domain: Domain, socket_addr: SocketAddr) -> anyhow::Result<TcpListener> {
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;
    socket.set_nonblocking(true)?;
    let std_listener: std::net::TcpListener = socket.into();
    Ok(TcpListener::from_std(std_listener)?)
}
