//! Tests de integración del servidor de archivos
//! tests/integration_test.rs
//!
//! Cada test levanta su propia instancia del servidor en un puerto
//! efímero, con un document root temporal, y habla HTTP crudo por un
//! `TcpStream`.

use file_server::config::Config;
use file_server::server::{Server, ShutdownHandle};
use std::fs;
use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tempfile::TempDir;

/// Document root de prueba:
///
/// ```text
/// root/
///   index.html                      (24 bytes)
///   space in name.txt               "letters and spaces\n" (19 bytes)
///   text..txt                       "hello" (5 bytes)
///   blob.bin
///   dir1/                           (sin índice)
///     deep/deep.txt                 "bingo, you found it\n" (20 bytes)
///   dir2/
///     index.html                    "<html>Directory index file</html>\n" (34 bytes)
///     page.html                     "<html><body>Page Sample</body></html>\n" (38 bytes)
/// ```
fn sample_root() -> TempDir {
    let root = TempDir::new().expect("tempdir");
    let base = root.path();

    fs::write(base.join("index.html"), b"<html>root index</html>\n").unwrap();
    fs::write(base.join("space in name.txt"), b"letters and spaces\n").unwrap();
    fs::write(base.join("text..txt"), b"hello").unwrap();
    fs::write(base.join("blob.bin"), b"\x00\x01\x02\x03").unwrap();

    fs::create_dir_all(base.join("dir1/deep")).unwrap();
    fs::write(base.join("dir1/deep/deep.txt"), b"bingo, you found it\n").unwrap();

    fs::create_dir(base.join("dir2")).unwrap();
    fs::write(base.join("dir2/index.html"), b"<html>Directory index file</html>\n").unwrap();
    fs::write(base.join("dir2/page.html"), b"<html><body>Page Sample</body></html>\n").unwrap();

    root
}

struct TestServer {
    addr: SocketAddr,
    handle: ShutdownHandle,
    runner: Option<JoinHandle<std::io::Result<()>>>,
    _root: TempDir,
}

impl TestServer {
    /// Levanta el servidor sobre un `sample_root` nuevo
    fn start(workers: usize) -> Self {
        let root = sample_root();

        let mut config = Config::default();
        config.port = 0;
        config.workers = workers;
        config.root = root.path().to_string_lossy().into_owned();
        config.read_timeout_ms = 5_000;

        let server = Server::bind(config).expect("bind");
        let addr = server.local_addr().expect("local addr");
        let handle = server.shutdown_handle().expect("shutdown handle");
        let runner = thread::spawn(move || server.run());

        Self {
            addr,
            handle,
            runner: Some(runner),
            _root: root,
        }
    }

    /// Envía bytes crudos y retorna la respuesta completa
    fn send_raw(&self, raw: &[u8]) -> String {
        let mut stream = TcpStream::connect(self.addr).expect("connect");
        stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
        stream.set_write_timeout(Some(Duration::from_secs(5))).unwrap();

        stream.write_all(raw).expect("send request");
        stream.flush().unwrap();
        stream.shutdown(Shutdown::Write).unwrap();

        let mut response = Vec::new();
        stream.read_to_end(&mut response).expect("read response");
        String::from_utf8_lossy(&response).into_owned()
    }

    /// Helper: GET de un path
    fn get(&self, path: &str) -> String {
        self.send_raw(format!("GET {} HTTP/1.0\r\n\r\n", path).as_bytes())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.request_stop();
        if let Some(runner) = self.runner.take() {
            let _ = runner.join();
        }
    }
}

/// Helper: extrae el body de una response HTTP
fn extract_body(response: &str) -> &str {
    match response.find("\r\n\r\n") {
        Some(pos) => &response[pos + 4..],
        None => "",
    }
}

/// Helper: extrae el valor de un header
fn extract_header<'a>(response: &'a str, name: &str) -> Option<&'a str> {
    response
        .lines()
        .take_while(|line| !line.is_empty())
        .find_map(|line| {
            let (header, value) = line.split_once(':')?;
            (header.eq_ignore_ascii_case(name)).then(|| value.trim())
        })
}

#[test]
fn test_get_file_exact_content() {
    let server = TestServer::start(2);
    let response = server.get("/dir2/page.html");

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"), "got: {}", response);
    assert_eq!(extract_header(&response, "Content-Length"), Some("38"));
    assert_eq!(extract_header(&response, "Content-Type"), Some("text/html"));
    assert_eq!(extract_body(&response), "<html><body>Page Sample</body></html>\n");
}

#[test]
fn test_response_headers_present() {
    let server = TestServer::start(2);
    let response = server.get("/dir2/page.html");

    assert!(extract_header(&response, "Server").is_some());
    assert!(extract_header(&response, "Date").is_some());
    assert_eq!(extract_header(&response, "Connection"), Some("close"));
    assert_eq!(
        extract_header(&response, "Cache-Control"),
        Some("no-cache, no-store, max-age=0, must-revalidate")
    );
    assert_eq!(extract_header(&response, "Expires"), Some("0"));
    assert_eq!(extract_header(&response, "Pragma"), Some("no-cache"));
}

#[test]
fn test_directory_index() {
    let server = TestServer::start(2);
    let response = server.get("/dir2/");

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert_eq!(extract_header(&response, "Content-Length"), Some("34"));
    assert_eq!(extract_body(&response), "<html>Directory index file</html>\n");
}

#[test]
fn test_root_index() {
    let server = TestServer::start(2);
    let response = server.get("/");

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert_eq!(extract_body(&response), "<html>root index</html>\n");
}

#[test]
fn test_index_not_found() {
    let server = TestServer::start(2);
    let response = server.get("/dir1/");

    assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));
}

#[test]
fn test_file_not_found() {
    let server = TestServer::start(2);
    let response = server.get("/smdklcdsmvdfjnvdfjvdfvdfvdsfssdmfdsdfsd.html");

    assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));
}

#[test]
fn test_file_in_nested_folders() {
    let server = TestServer::start(2);
    let response = server.get("/dir1/deep/deep.txt");

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert_eq!(extract_header(&response, "Content-Length"), Some("20"));
    assert_eq!(extract_body(&response), "bingo, you found it\n");
}

#[test]
fn test_file_with_trailing_slash() {
    let server = TestServer::start(2);
    let response = server.get("/dir2/page.html/");

    assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));
}

#[test]
fn test_directory_without_trailing_slash() {
    let server = TestServer::start(2);
    let response = server.get("/dir2");

    assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));
}

#[test]
fn test_query_string_ignored() {
    let server = TestServer::start(2);
    let response = server.get("/dir2/page.html?arg1=value&arg2=value");

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert_eq!(extract_header(&response, "Content-Length"), Some("38"));
}

#[test]
fn test_file_with_spaces() {
    let server = TestServer::start(2);
    let response = server.get("/space%20in%20name.txt");

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert_eq!(extract_header(&response, "Content-Length"), Some("19"));
    assert_eq!(extract_body(&response), "letters and spaces\n");
}

#[test]
fn test_file_urlencoded() {
    let server = TestServer::start(2);
    let response = server.get("/dir2/%70%61%67%65%2e%68%74%6d%6c");

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert_eq!(extract_header(&response, "Content-Length"), Some("38"));
}

#[test]
fn test_file_with_dots_in_name() {
    let server = TestServer::start(2);
    let response = server.get("/text..txt");

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert_eq!(extract_header(&response, "Content-Length"), Some("5"));
    assert_eq!(extract_header(&response, "Content-Type"), Some("text/plain"));
    assert_eq!(extract_body(&response), "hello");
}

#[test]
fn test_document_root_escaping() {
    let server = TestServer::start(2);
    let response = server.get("/../../../../../../../../../../../../../etc/passwd");

    let status: u16 = response
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse().ok())
        .expect("status code");
    assert!([400, 403, 404].contains(&status), "got: {}", response);
    assert_ne!(status, 200);
}

#[test]
fn test_unknown_extension_is_octet_stream() {
    let server = TestServer::start(2);
    let response = server.get("/blob.bin");

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert_eq!(
        extract_header(&response, "Content-Type"),
        Some("application/octet-stream")
    );
}

#[test]
fn test_post_method_not_allowed() {
    let server = TestServer::start(2);
    let response = server.send_raw(b"POST /dir2/page.html HTTP/1.0\r\n\r\n");

    assert!(response.starts_with("HTTP/1.1 405 Method Not Allowed\r\n"));
    assert!(extract_body(&response).contains("Method Not Allowed"));
}

#[test]
fn test_head_method() {
    let server = TestServer::start(2);
    let response = server.send_raw(b"HEAD /dir2/page.html HTTP/1.0\r\n\r\n");

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert_eq!(extract_header(&response, "Content-Length"), Some("38"));
    assert_eq!(extract_body(&response), "");
}

#[test]
fn test_head_not_found_headers_only() {
    let server = TestServer::start(2);
    let response = server.send_raw(b"HEAD /missing.html HTTP/1.0\r\n\r\n");

    assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));
    // el Content-Length anuncia el body que GET hubiera mandado
    let length: usize = extract_header(&response, "Content-Length")
        .unwrap()
        .parse()
        .unwrap();
    assert!(length > 0);
    assert_eq!(extract_body(&response), "");
}

#[test]
fn test_bare_newline_is_bad_request() {
    let server = TestServer::start(2);
    let response = server.send_raw(b"\n");

    assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
}

#[test]
fn test_garbage_is_bad_request() {
    let server = TestServer::start(2);
    let response = server.send_raw(b"\x00\x01\x02\x03garbage\r\n\r\n");

    assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
}

#[test]
fn test_concurrent_connections_all_answered() {
    // más conexiones simultáneas que workers: ninguna se pierde
    let workers = 4;
    let connections = 16;
    let server = TestServer::start(workers);
    let addr = server.addr;

    let clients: Vec<_> = (0..connections)
        .map(|_| {
            thread::spawn(move || {
                let mut stream = TcpStream::connect(addr)?;
                stream.set_read_timeout(Some(Duration::from_secs(10)))?;
                stream.write_all(b"GET /dir2/page.html HTTP/1.0\r\n\r\n")?;
                stream.shutdown(Shutdown::Write)?;

                let mut response = Vec::new();
                stream.read_to_end(&mut response)?;
                Ok::<_, std::io::Error>(String::from_utf8_lossy(&response).into_owned())
            })
        })
        .collect();

    for client in clients {
        let response = client.join().expect("client thread").expect("client io");
        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"), "got: {}", response);
        assert_eq!(extract_body(&response), "<html><body>Page Sample</body></html>\n");
    }
}

#[test]
fn test_sequential_requests() {
    let server = TestServer::start(2);

    for _ in 0..5 {
        let response = server.get("/dir2/page.html");
        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    }
}

#[test]
fn test_shutdown_finishes_cleanly() {
    let server = TestServer::start(2);
    let response = server.get("/dir2/page.html");
    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    // el Drop pide el stop y joinea el run(); si algo queda colgado,
    // el test no termina
}
