// Test utility module for protomap integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary project tree that is removed on drop
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `relative`, creating parent directories
    pub fn file(self, relative: &str, content: &str) -> Self {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, content).expect("write fixture file");
        self
    }

    pub fn join(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }
}

pub const WEBSOCKET_CLIENT_PY: &str = "import websocket\n\nws = websocket.connect(\"ws://localhost:8080\")\nws.send(\"hello\")\n";

pub const FLASK_SOCKETIO_SERVER_PY: &str = "import socketio\n\nsio = socketio.AsyncServer()\n\n@sio.event\nasync def message(sid, data):\n    await sio.emit('reply', data)\n";

pub const REST_CLIENT_JS: &str = "import axios from 'axios';\n\nexport async function load() {\n  const res = await fetch('/api/items');\n  return res.json();\n}\n";
