mod helpers;

use helpers::StaticGenerator;
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::{Name, RData, RecordType};
use hickory_proto::serialize::binary::BinEncodable;
use hickory_server::ServerFuture;
use llm_dns_application::use_cases::{AccessControl, AnswerTxtQueryUseCase, ResolverSettings};
use llm_dns_infrastructure::dns::DnsServerHandler;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, UdpSocket};

struct TestServer {
    server: ServerFuture<DnsServerHandler>,
    addr: SocketAddr,
}

impl TestServer {
    async fn start(generator: Arc<StaticGenerator>, settings: ResolverSettings) -> Self {
        let use_case = Arc::new(AnswerTxtQueryUseCase::new(generator, settings));
        let handler = DnsServerHandler::new(use_case, 0);

        let udp = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = udp.local_addr().unwrap();
        let tcp = TcpListener::bind(addr).await.unwrap();

        let mut server = ServerFuture::new(handler);
        server.register_socket(udp);
        server.register_listener(tcp, Duration::from_secs(5));

        Self { server, addr }
    }

    async fn shutdown(mut self) {
        self.server.shutdown_gracefully().await.unwrap();
    }
}

fn query_bytes(id: u16, name: &str, record_type: RecordType) -> Vec<u8> {
    let mut message = Message::new();
    message
        .set_id(id)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true);
    message.add_query(Query::query(Name::from_ascii(name).unwrap(), record_type));
    message.to_vec().unwrap()
}

async fn udp_query(addr: SocketAddr, name: &str, record_type: RecordType) -> Message {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    socket
        .send_to(&query_bytes(7, name, record_type), addr)
        .await
        .unwrap();

    let mut buf = vec![0u8; 4096];
    let (len, _) = tokio::time::timeout(Duration::from_secs(5), socket.recv_from(&mut buf))
        .await
        .expect("no reply within 5s")
        .unwrap();
    Message::from_vec(&buf[..len]).unwrap()
}

async fn tcp_query(addr: SocketAddr, name: &str, record_type: RecordType) -> Message {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let bytes = query_bytes(9, name, record_type);
    stream.write_all(&(bytes.len() as u16).to_be_bytes()).await.unwrap();
    stream.write_all(&bytes).await.unwrap();

    let mut len_buf = [0u8; 2];
    stream.read_exact(&mut len_buf).await.unwrap();
    let mut buf = vec![0u8; u16::from_be_bytes(len_buf) as usize];
    stream.read_exact(&mut buf).await.unwrap();
    Message::from_vec(&buf).unwrap()
}

fn txt_strings(message: &Message) -> Vec<String> {
    message
        .answers()
        .iter()
        .flat_map(|record| match record.data() {
            RData::TXT(txt) => txt
                .iter()
                .map(|s| String::from_utf8_lossy(s).into_owned())
                .collect::<Vec<_>>(),
            _ => Vec::new(),
        })
        .collect()
}

#[tokio::test]
async fn test_udp_txt_query_is_answered() {
    let generator = Arc::new(StaticGenerator::answering("Life is \u{201C}42\u{201D}."));
    let server = TestServer::start(generator.clone(), ResolverSettings::default()).await;

    let reply = udp_query(server.addr, "What.is.Life.", RecordType::TXT).await;

    assert_eq!(reply.id(), 7);
    assert_eq!(reply.response_code(), ResponseCode::NoError);
    assert_eq!(reply.message_type(), MessageType::Response);
    assert_eq!(reply.answers().len(), 1);
    assert_eq!(reply.answers()[0].name().to_string(), "What.is.Life.");
    assert_eq!(reply.answers()[0].ttl(), 0);
    assert_eq!(txt_strings(&reply), vec!["Life is \"42\".".to_string()]);
    assert_eq!(generator.calls(), 1);

    server.shutdown().await;
}

#[tokio::test]
async fn test_tcp_carries_multi_chunk_answer() {
    let answer = "lorem ipsum ".repeat(100);
    let generator = Arc::new(StaticGenerator::answering(&answer));
    let server = TestServer::start(generator, ResolverSettings::default()).await;

    let reply = tcp_query(server.addr, "b64-dGVsbCBtZSBtb3Jl.", RecordType::TXT).await;

    assert_eq!(reply.response_code(), ResponseCode::NoError);
    let strings = txt_strings(&reply);
    assert!(strings.len() >= 4);
    assert!(strings.iter().all(|s| s.len() <= 200));
    assert!(strings.last().unwrap().ends_with("..."));

    server.shutdown().await;
}

#[tokio::test]
async fn test_non_txt_query_gets_notimp() {
    let generator = Arc::new(StaticGenerator::answering("unused"));
    let server = TestServer::start(generator.clone(), ResolverSettings::default()).await;

    let reply = udp_query(server.addr, "what.is.life.", RecordType::A).await;

    assert_eq!(reply.response_code(), ResponseCode::NotImp);
    assert!(reply.answers().is_empty());
    assert_eq!(generator.calls(), 0);

    server.shutdown().await;
}

#[tokio::test]
async fn test_wrong_token_gets_refused() {
    let generator = Arc::new(StaticGenerator::answering("unused"));
    let settings = ResolverSettings {
        access: AccessControl::required(Some("s3cret")),
        ..ResolverSettings::default()
    };
    let server = TestServer::start(generator.clone(), settings).await;

    let refused = udp_query(server.addr, "key-nope.hello.", RecordType::TXT).await;
    let allowed = udp_query(server.addr, "key-s3cret.hello.", RecordType::TXT).await;

    assert_eq!(refused.response_code(), ResponseCode::Refused);
    assert_eq!(allowed.response_code(), ResponseCode::NoError);
    assert_eq!(generator.calls(), 1);

    server.shutdown().await;
}

#[tokio::test]
async fn test_missing_secret_gets_servfail() {
    let generator = Arc::new(StaticGenerator::answering("unused"));
    let settings = ResolverSettings {
        access: AccessControl::required(None),
        ..ResolverSettings::default()
    };
    let server = TestServer::start(generator, settings).await;

    let reply = udp_query(server.addr, "key-any.hello.", RecordType::TXT).await;

    assert_eq!(reply.response_code(), ResponseCode::ServFail);

    server.shutdown().await;
}

#[tokio::test]
async fn test_backend_failure_gets_servfail_and_server_keeps_running() {
    let generator = Arc::new(StaticGenerator::failing());
    let server = TestServer::start(generator.clone(), ResolverSettings::default()).await;

    let first = udp_query(server.addr, "hello.", RecordType::TXT).await;
    let second = tcp_query(server.addr, "hello.again.", RecordType::TXT).await;

    assert_eq!(first.response_code(), ResponseCode::ServFail);
    assert_eq!(second.response_code(), ResponseCode::ServFail);
    assert_eq!(generator.calls(), 2);

    server.shutdown().await;
}

#[tokio::test]
async fn test_slow_query_does_not_block_others() {
    let generator =
        Arc::new(StaticGenerator::answering("done").with_delay(Duration::from_millis(1500)));
    let server = TestServer::start(generator, ResolverSettings::default()).await;
    let addr = server.addr;

    let slow = tokio::spawn(async move { udp_query(addr, "slow.question.", RecordType::TXT).await });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let start = Instant::now();
    let fast = udp_query(addr, "fast.question.", RecordType::TXT).await;
    assert_eq!(fast.response_code(), ResponseCode::NoError);
    assert!(start.elapsed() < Duration::from_millis(1000));

    let slow = slow.await.unwrap();
    assert_eq!(slow.response_code(), ResponseCode::NoError);

    server.shutdown().await;
}
