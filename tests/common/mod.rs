//! Common test utilities and fixtures for modsync integration tests.
//!
//! This module consolidates frequently used test patterns: building a
//! project directory with a manifest, and serving a canned Thunderstore
//! catalog over a local HTTP listener so tests never touch the network.

// Allow dead code because these utilities are used across different test
// files and not every test file uses all of them
#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary project directory holding a manifest.json.
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    /// Create a project with the given dependency list and pack version.
    pub fn new(version: &str, dependencies: &[&str]) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let manifest = serde_json::json!({
            "name": "TestPack",
            "version_number": version,
            "description": "Integration test pack",
            "website_url": "https://example.com",
            "dependencies": dependencies,
        });
        std::fs::write(
            dir.path().join("manifest.json"),
            serde_json::to_string_pretty(&manifest).unwrap(),
        )
        .expect("write manifest");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.dir.path().join("manifest.json")
    }

    pub fn read(&self, file: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(file))
            .unwrap_or_else(|e| panic!("read {file}: {e}"))
    }

    pub fn exists(&self, file: &str) -> bool {
        self.dir.path().join(file).exists()
    }

    /// Write a snapshot file as the diff baseline.
    pub fn write_snapshot(&self, dependencies: &[&str]) {
        std::fs::write(
            self.dir.path().join(".dependencies_snapshot.json"),
            serde_json::to_string_pretty(&dependencies).unwrap(),
        )
        .expect("write snapshot");
    }

    /// Dependencies currently declared in the manifest.
    pub fn manifest_dependencies(&self) -> Vec<String> {
        let manifest: serde_json::Value =
            serde_json::from_str(&self.read("manifest.json")).expect("parse manifest");
        manifest["dependencies"]
            .as_array()
            .expect("dependencies array")
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect()
    }

    pub fn manifest_version(&self) -> String {
        let manifest: serde_json::Value =
            serde_json::from_str(&self.read("manifest.json")).expect("parse manifest");
        manifest["version_number"].as_str().unwrap().to_string()
    }
}

/// Serve a canned catalog payload over a local HTTP listener.
///
/// Returns the URL to pass via `--api-url`. The listener thread answers
/// every connection with the same 200 response and runs until the test
/// process exits.
pub fn serve_catalog(packages: serde_json::Value) -> String {
    let body = packages.to_string();
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local listener");
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            let body = body.clone();
            std::thread::spawn(move || {
                // Drain the request headers before responding
                let mut buf = [0u8; 4096];
                let mut request = Vec::new();
                while let Ok(n) = stream.read(&mut buf) {
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&buf[..n]);
                    if request.windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
            });
        }
    });

    format!("http://{addr}/")
}

/// A catalog payload with one package per `(full_name, latest_version)` pair.
pub fn catalog_json(packages: &[(&str, &str)]) -> serde_json::Value {
    serde_json::Value::Array(
        packages
            .iter()
            .map(|(full_name, version)| {
                serde_json::json!({
                    "full_name": full_name,
                    "package_url": format!("https://thunderstore.io/c/repo/p/{full_name}/"),
                    "versions": [{"version_number": version}],
                })
            })
            .collect(),
    )
}
