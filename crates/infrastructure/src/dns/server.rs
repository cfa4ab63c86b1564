use hickory_proto::op::{Header, Query, ResponseCode};
use hickory_proto::rr::rdata::TXT;
use hickory_proto::rr::{Name, RData, Record};
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use llm_dns_application::use_cases::AnswerTxtQueryUseCase;
use llm_dns_domain::config::txt::MAX_CHARACTER_STRING_BYTES;
use llm_dns_domain::{DomainError, RecordType, ResolutionOutcome, TxtChunkSet, TxtQuery};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

#[derive(Clone)]
pub struct DnsServerHandler {
    use_case: Arc<AnswerTxtQueryUseCase>,
    ttl: u32,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<AnswerTxtQueryUseCase>, ttl: u32) -> Self {
        Self { use_case, ttl }
    }

    /// Labels come from the original query so `b64-` and `key-` labels keep
    /// their case.
    pub fn txt_query_from(query: &Query) -> TxtQuery {
        TxtQuery::new(
            query.name().iter().map(|label| label.to_vec()),
            RecordType::from(u16::from(query.query_type())),
        )
    }
}

/// What goes on the wire for a resolution result. A failed backend call is
/// answered with SERVFAIL instead of tearing down the listener.
pub fn reply_for(
    result: Result<ResolutionOutcome, DomainError>,
) -> (ResponseCode, Option<TxtChunkSet>) {
    match result {
        Ok(ResolutionOutcome::Answer(chunks)) => (ResponseCode::NoError, Some(chunks)),
        Ok(ResolutionOutcome::NotImplemented) => (ResponseCode::NotImp, None),
        Ok(ResolutionOutcome::ServerFailure) => (ResponseCode::ServFail, None),
        Ok(ResolutionOutcome::Refused) => (ResponseCode::Refused, None),
        Err(_) => (ResponseCode::ServFail, None),
    }
}

pub fn txt_record(name: Name, ttl: u32, chunks: TxtChunkSet) -> Record {
    Record::from_rdata(name, ttl, RData::TXT(TXT::new(wire_strings(chunks))))
}

/// Chunks never split words, so a single long word can exceed the 255-byte
/// character-string limit. Such chunks are cut at char boundaries here.
fn wire_strings(chunks: TxtChunkSet) -> Vec<String> {
    let mut strings = Vec::with_capacity(chunks.len());
    for chunk in chunks.into_inner() {
        if chunk.len() <= MAX_CHARACTER_STRING_BYTES {
            strings.push(chunk);
            continue;
        }

        let mut rest = chunk.as_str();
        while !rest.is_empty() {
            let mut end = rest.len().min(MAX_CHARACTER_STRING_BYTES);
            while !rest.is_char_boundary(end) {
                end -= 1;
            }
            let (head, tail) = rest.split_at(end);
            strings.push(head.to_string());
            rest = tail;
        }
    }
    strings
}

#[async_trait::async_trait]
impl RequestHandler for DnsServerHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        let request_info = match request.request_info() {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to parse request info");
                return send_error_response(request, &mut response_handle, ResponseCode::FormErr)
                    .await;
            }
        };

        let original = request_info.query.original();
        let client_ip = request.src().ip();
        let query = Self::txt_query_from(original);

        info!(
            name = %original.name(),
            record_type = %query.record_type,
            client = %client_ip,
            protocol = %request_info.protocol,
            "DNS query received"
        );

        let start = Instant::now();
        let result = self.use_case.execute(&query).await;
        if let Err(e) = &result {
            error!(name = %original.name(), error = %e, "Query resolution failed");
        }

        let (code, chunks) = reply_for(result);
        let chunks = match chunks {
            Some(chunks) => chunks,
            None => {
                if code == ResponseCode::Refused {
                    warn!(client = %client_ip, "Query refused");
                }
                return send_error_response(request, &mut response_handle, code).await;
            }
        };

        debug!(
            name = %original.name(),
            chunks = chunks.len(),
            bytes = chunks.total_bytes(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Sending TXT answer"
        );

        let answer = txt_record(original.name().clone(), self.ttl, chunks);
        let builder = MessageResponseBuilder::from_message_request(request);
        let header = Header::response_from_request(request.header());
        let response = builder.build(header, std::iter::once(&answer), &[], &[], &[]);

        match response_handle.send_response(response).await {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to send response");
                ResponseInfo::from(*request.header())
            }
        }
    }
}

async fn send_error_response<R: ResponseHandler>(
    request: &Request,
    response_handle: &mut R,
    code: ResponseCode,
) -> ResponseInfo {
    debug!(code = ?code, "Sending error response");
    let builder = MessageResponseBuilder::from_message_request(request);
    let mut header = Header::response_from_request(request.header());
    header.set_response_code(code);
    let response = builder.build(header, &[], &[], &[], &[]);

    match response_handle.send_response(response).await {
        Ok(info) => info,
        Err(e) => {
            error!(error = %e, "Failed to send error response");
            ResponseInfo::from(*request.header())
        }
    }
}
