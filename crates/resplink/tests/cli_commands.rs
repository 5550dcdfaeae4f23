#![cfg(feature = "cli")]

use std::io::Write;
use std::net::{TcpListener, TcpStream};
use std::process::{Command, Output};
use std::thread;

use bytes::{Bytes, BytesMut};
use resplink_codec::{encode_value, DecodeOutcome, ReplyReader, Value};

/// Serve one connection: PING, ECHO and GET (always nil); anything else is an error.
fn spawn_device() -> (String, thread::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("loopback bind");
    let addr = listener.local_addr().expect("local addr");

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept");
        serve(stream);
    });

    (format!("tcp://{addr}"), handle)
}

fn serve(stream: TcpStream) {
    let mut writer = stream.try_clone().expect("clone");
    let mut reader = ReplyReader::new(stream);

    loop {
        let mut argv: Vec<Bytes> = Vec::new();
        match reader.decode(Some(&mut argv)) {
            DecodeOutcome::Complete => {}
            DecodeOutcome::Incomplete => continue,
            _ => return,
        }

        let verb = String::from_utf8_lossy(&argv[0]).to_ascii_uppercase();
        let reply = match verb.as_str() {
            "PING" => Value::Simple("PONG".into()),
            "ECHO" => Value::Bulk(argv[1].clone()),
            "GET" => Value::Nil,
            _ => Value::Error(format!("ERR unknown command '{verb}'")),
        };

        let mut wire = BytesMut::new();
        encode_value(&reply, &mut wire);
        // Split every reply so the client has to retry.
        for piece in wire.chunks(3) {
            if writer.write_all(piece).is_err() {
                return;
            }
            thread::sleep(std::time::Duration::from_millis(1));
        }
    }
}

fn resplink(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_resplink"))
        .args(["--log-level", "error"])
        .args(args)
        .env_remove("RESPLINK_TARGET")
        .env_remove("RESPLINK_BAUD")
        .env_remove("RESPLINK_SETTLE")
        .env_remove("RESPLINK_LOG")
        .output()
        .expect("resplink should run")
}

#[test]
fn send_prints_json_reply() {
    let (target, device) = spawn_device();

    let output = resplink(&[
        "--format", "json", "send", "--settle", "0ms", target.as_str(), "ECHO", "hello",
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(json["kind"], "bulk string");
    assert_eq!(json["reply"], "hello");
    assert_eq!(json["command"], "ECHO hello");

    device.join().unwrap();
}

#[test]
fn send_raw_writes_reply_bytes() {
    let (target, device) = spawn_device();

    let output = resplink(&["--format", "raw", "send", "--settle", "0ms", target.as_str(), "PING"]);
    assert!(output.status.success());
    assert_eq!(output.stdout, b"PONG");

    device.join().unwrap();
}

#[test]
fn nil_reply_exits_with_dedicated_code() {
    let (target, device) = spawn_device();

    let output = resplink(&["--format", "pretty", "send", "--settle", "0ms", target.as_str(), "GET", "k"]);
    assert_eq!(output.status.code(), Some(10));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "(nil)");

    device.join().unwrap();
}

#[test]
fn error_reply_exits_with_failure() {
    let (target, device) = spawn_device();

    let output = resplink(&["send", "--settle", "0ms", target.as_str(), "FLY"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERR unknown command 'FLY'"), "stderr: {stderr}");

    device.join().unwrap();
}

#[test]
fn ping_reports_each_sample() {
    let (target, device) = spawn_device();

    let output = resplink(&[
        "--format", "json", "ping", "--settle", "0ms", "--count", "3", target.as_str(),
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    let samples = json["samples"].as_array().expect("samples array");
    assert_eq!(samples.len(), 3);
    assert!(samples.iter().all(|s| s["reply"] == "PONG"));

    device.join().unwrap();
}

#[test]
fn invalid_target_is_usage_error() {
    let output = resplink(&["send", "--settle", "0ms", "tcp://", "PING"]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn version_prints_package_version() {
    let output = resplink(&["version"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        format!("resplink {}", env!("CARGO_PKG_VERSION"))
    );
}
