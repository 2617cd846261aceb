use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
  pub method: String,
  pub target: String,
  pub authorization: Option<String>,
  pub body: String,
}

type Responder = dyn Fn(&RecordedRequest, SocketAddr) -> (u16, String) + Send + Sync;

/// A minimal HTTP/1.1 server on a local port.
///
/// Every request is recorded and answered with the status and JSON body the responder returns.
/// Connections are closed after each response.
pub struct TestServer {
  address: SocketAddr,
  requests: Arc<Mutex<Vec<RecordedRequest>>>,
  server_task: JoinHandle<()>,
}

impl TestServer {
  pub async fn start<F>(responder: F) -> Self
  where
    F: Fn(&RecordedRequest, SocketAddr) -> (u16, String) + Send + Sync + 'static,
  {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let requests: Arc<Mutex<Vec<RecordedRequest>>> = Arc::default();
    let responder: Arc<Responder> = Arc::new(responder);

    let server_requests = Arc::clone(&requests);
    let server_task = tokio::spawn(async move {
      while let Ok((mut stream, _)) = listener.accept().await {
        let Some(request) = read_request(&mut stream).await else {
          continue;
        };
        let (code, body) = responder(&request, address);

        server_requests.lock().unwrap().push(request);

        let _ = write_response(&mut stream, code, &body).await;
      }
    });

    Self {
      address,
      requests,
      server_task,
    }
  }

  pub fn base_url(&self) -> String {
    format!("http://{}/api/v2", self.address)
  }

  pub fn requests(&self) -> Vec<RecordedRequest> {
    self.requests.lock().unwrap().clone()
  }
}

impl Drop for TestServer {
  fn drop(&mut self) {
    self.server_task.abort();
  }
}

async fn read_request(stream: &mut TcpStream) -> Option<RecordedRequest> {
  let mut buffer = Vec::new();
  let mut chunk = [0_u8; 4096];

  let header_end = loop {
    if let Some(position) = find_header_end(&buffer) {
      break position;
    }

    let read = stream.read(&mut chunk).await.ok()?;

    if read == 0 {
      return None;
    }

    buffer.extend_from_slice(&chunk[..read]);
  };

  let head = String::from_utf8_lossy(&buffer[..header_end]).to_string();
  let mut lines = head.split("\r\n");
  let mut request_line = lines.next()?.split_whitespace();
  let method = request_line.next()?.to_owned();
  let target = request_line.next()?.to_owned();

  let mut content_length = 0;
  let mut authorization = None;

  for line in lines {
    let Some((name, value)) = line.split_once(':') else {
      continue;
    };

    if name.eq_ignore_ascii_case("content-length") {
      content_length = value.trim().parse().ok()?;
    } else if name.eq_ignore_ascii_case("authorization") {
      authorization = Some(value.trim().to_owned());
    }
  }

  let body_start = header_end + HEADER_TERMINATOR.len();

  while buffer.len() < body_start + content_length {
    let read = stream.read(&mut chunk).await.ok()?;

    if read == 0 {
      break;
    }

    buffer.extend_from_slice(&chunk[..read]);
  }

  let body_end = buffer.len().min(body_start + content_length);
  let body = String::from_utf8_lossy(&buffer[body_start..body_end]).to_string();

  Some(RecordedRequest {
    method,
    target,
    authorization,
    body,
  })
}

fn find_header_end(buffer: &[u8]) -> Option<usize> {
  buffer
    .windows(HEADER_TERMINATOR.len())
    .position(|window| window == HEADER_TERMINATOR)
}

async fn write_response(stream: &mut TcpStream, code: u16, body: &str) -> std::io::Result<()> {
  let response = format!(
    "HTTP/1.1 {code} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
    body.len()
  );

  stream.write_all(response.as_bytes()).await?;
  stream.shutdown().await
}
