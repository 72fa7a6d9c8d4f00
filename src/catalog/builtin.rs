//! Built-in protocol descriptors and detection patterns.
//!
//! Patterns are plain `regex` syntax, matched case-insensitively one line at
//! a time. Confidence values are hand-tuned: import statements and
//! constructor calls score high, generic call shapes (`.emit(`, `.json()`)
//! score low because they also appear in unrelated code.

use super::{Category, DetectionPattern, ProtocolDescriptor};

const fn pat(pattern: &'static str, confidence: f64) -> DetectionPattern {
    DetectionPattern {
        pattern,
        confidence,
    }
}

const WEBSOCKET_PATTERNS: &[DetectionPattern] = &[
    pat(r"new\s+WebSocket\s*\(", 0.95),
    pat(r"websocket\.connect", 0.9),
    pat(r"from\s+websockets\s+import", 0.95),
    pat(r"import\s+websocket", 0.9),
    pat(r"ws://|wss://", 0.8),
    pat(r"WebSocketClient", 0.85),
    pat(r"websocket\.WebSocketApp", 0.95),
    pat(r"\.onmessage\s*=", 0.7),
    pat(r"\.onopen\s*=", 0.7),
    pat(r"socket\.send\(", 0.6),
];

const SOCKETIO_PATTERNS: &[DetectionPattern] = &[
    pat(r"import\s+socketio", 0.95),
    pat(r"from\s+socketio\s+import", 0.95),
    pat(r#"require\(['"]socket\.io['"]"#, 0.95),
    pat(r#"require\(['"]socket\.io-client['"]"#, 0.95),
    pat(r#"io\s*\(\s*['"]http"#, 0.85),
    pat(r"\.emit\s*\(", 0.6),
    pat(r#"\.on\s*\(['"]connect"#, 0.8),
    pat(r"socketio\.AsyncServer", 0.95),
    pat(r"socketio\.Server", 0.95),
    pat(r"@sio\.", 0.9),
];

const HTTP_REST_PATTERNS: &[DetectionPattern] = &[
    pat(r"import\s+requests", 0.9),
    pat(r"from\s+requests\s+import", 0.9),
    pat(r"import\s+httpx", 0.9),
    pat(r"fetch\s*\(", 0.7),
    pat(r"axios\.", 0.85),
    pat(r"requests\.(get|post|put|delete|patch)", 0.95),
    pat(r"@app\.(get|post|put|delete|patch)\(", 0.9),
    pat(r"\.json\(\)", 0.5),
    pat(r"Content-Type.*application/json", 0.7),
];

const HTTP_POLLING_PATTERNS: &[DetectionPattern] = &[
    pat(r"setInterval.*fetch", 0.8),
    pat(r"setTimeout.*request", 0.7),
    pat(r"poll|polling", 0.6),
    pat(r"long[-_]?poll", 0.9),
];

const GRPC_PATTERNS: &[DetectionPattern] = &[
    pat(r"import\s+grpc", 0.95),
    pat(r"from\s+grpc\s+import", 0.95),
    pat(r"grpc\.insecure_channel", 0.95),
    pat(r"grpc\.secure_channel", 0.95),
    pat(r"\.proto\b", 0.7),
    pat(r"protobuf", 0.8),
    pat(r"@grpc/", 0.95),
    pat(r"grpc\.ServerCredentials", 0.95),
];

const GRAPHQL_PATTERNS: &[DetectionPattern] = &[
    pat(r"import.*graphql", 0.9),
    pat(r"from\s+graphene\s+import", 0.95),
    pat(r"from\s+strawberry\s+import", 0.95),
    pat(r"gql`", 0.9),
    pat(r"useQuery|useMutation", 0.85),
    pat(r"ApolloClient", 0.95),
    // `regex` needs the brace escaped; `pattern_matched` reports it with the backslash
    pat(r"type\s+Query\s*\{", 0.9),
    pat(r"@strawberry\.", 0.95),
];

const SSE_PATTERNS: &[DetectionPattern] = &[
    pat(r"new\s+EventSource", 0.95),
    pat(r"text/event-stream", 0.95),
    pat(r"EventSource", 0.8),
    pat(r"Server-Sent Events", 0.9),
];

const MQTT_PATTERNS: &[DetectionPattern] = &[
    pat(r"import\s+paho", 0.95),
    pat(r"from\s+paho\s+import", 0.95),
    pat(r"mqtt\.Client", 0.95),
    pat(r"mqtt://|mqtts://", 0.9),
    pat(r"\.subscribe\s*\(", 0.5),
    pat(r"\.publish\s*\(", 0.5),
];

/// Descriptors in canonical catalog order
pub fn descriptors() -> Vec<ProtocolDescriptor> {
    vec![
        ProtocolDescriptor {
            key: "websocket",
            name: "WebSocket",
            category: Category::Realtime,
            complexity_base: 3,
            dependencies: &["websockets", "ws", "websocket-client"],
            pros: &[
                "Full-duplex communication",
                "Low overhead after handshake",
                "Standardized (RFC 6455)",
                "Wide browser support",
                "Simple API",
            ],
            cons: &[
                "No automatic reconnection",
                "No built-in message acknowledgment",
                "Manual room/namespace management",
            ],
            typical_use_cases: &["Real-time chat", "Live updates", "Gaming", "Streaming data"],
            compatibility_notes: &[
                ("browser", "Native support in all modern browsers"),
                ("python", "websockets, websocket-client libraries"),
                ("nodejs", "ws, native WebSocket in browsers"),
            ],
            patterns: WEBSOCKET_PATTERNS,
        },
        ProtocolDescriptor {
            key: "socket.io",
            name: "Socket.IO",
            category: Category::Realtime,
            complexity_base: 6,
            dependencies: &["socket.io", "socket.io-client", "python-socketio", "socketio"],
            pros: &[
                "Automatic reconnection",
                "Room/namespace support",
                "Binary support",
                "Fallback to HTTP long-polling",
                "Event-based API",
            ],
            cons: &[
                "Higher overhead than WebSocket",
                "Version compatibility issues (v2/v3/v4)",
                "Requires matching client/server versions",
                "Not standard protocol",
            ],
            typical_use_cases: &[
                "Complex real-time apps",
                "Chat with rooms",
                "Collaborative editing",
                "Real-time dashboards",
            ],
            compatibility_notes: &[
                ("browser", "Requires socket.io-client library"),
                ("python", "python-socketio (note version compatibility)"),
                ("nodejs", "socket.io server, socket.io-client for client"),
                (
                    "warning",
                    "v4 client requires v4 server - version mismatch causes connection failures",
                ),
            ],
            patterns: SOCKETIO_PATTERNS,
        },
        ProtocolDescriptor {
            key: "http_rest",
            name: "HTTP/REST",
            category: Category::RequestResponse,
            complexity_base: 2,
            dependencies: &["requests", "httpx", "aiohttp", "fetch", "axios"],
            pros: &[
                "Universal support",
                "Stateless and cacheable",
                "Simple to debug",
                "Works through proxies/firewalls",
                "Well-understood patterns",
            ],
            cons: &[
                "No server push (without polling)",
                "Higher latency for real-time",
                "Connection overhead per request",
            ],
            typical_use_cases: &[
                "CRUD APIs",
                "Microservices",
                "Public APIs",
                "Traditional web apps",
            ],
            compatibility_notes: &[
                ("browser", "Native fetch API"),
                ("python", "requests, httpx, aiohttp"),
                ("nodejs", "fetch, axios"),
            ],
            patterns: HTTP_REST_PATTERNS,
        },
        ProtocolDescriptor {
            key: "http_polling",
            name: "HTTP Long-Polling",
            category: Category::RequestResponse,
            complexity_base: 4,
            dependencies: &["requests", "httpx", "aiohttp"],
            pros: &[
                "Works everywhere HTTP works",
                "No WebSocket support needed",
                "Simple server implementation",
            ],
            cons: &[
                "Higher server load",
                "Not truly real-time",
                "Resource intensive for many clients",
            ],
            typical_use_cases: &[
                "Legacy browser support",
                "Firewall-restricted environments",
                "Simple notification systems",
            ],
            compatibility_notes: &[
                ("browser", "Works with any HTTP client"),
                ("python", "Standard HTTP libraries"),
                ("nodejs", "Standard HTTP libraries"),
            ],
            patterns: HTTP_POLLING_PATTERNS,
        },
        ProtocolDescriptor {
            key: "grpc",
            name: "gRPC",
            category: Category::Rpc,
            complexity_base: 7,
            dependencies: &["grpcio", "grpc", "protobuf", "@grpc/grpc-js"],
            pros: &[
                "High performance (HTTP/2)",
                "Strongly typed with protobuf",
                "Bidirectional streaming",
                "Code generation",
            ],
            cons: &[
                "Browser support limited (grpc-web)",
                "Requires protobuf knowledge",
                "More complex setup",
                "Binary protocol harder to debug",
            ],
            typical_use_cases: &[
                "Microservices communication",
                "High-performance APIs",
                "Mobile backends",
                "Service mesh",
            ],
            compatibility_notes: &[
                ("browser", "Requires grpc-web proxy"),
                ("python", "grpcio library"),
                ("nodejs", "@grpc/grpc-js"),
            ],
            patterns: GRPC_PATTERNS,
        },
        ProtocolDescriptor {
            key: "graphql",
            name: "GraphQL",
            category: Category::RequestResponse,
            complexity_base: 5,
            dependencies: &["graphql", "graphene", "apollo", "strawberry", "@apollo/client"],
            pros: &[
                "Flexible queries",
                "No over-fetching",
                "Strong typing",
                "Introspection",
                "Single endpoint",
            ],
            cons: &[
                "Learning curve",
                "Complex caching",
                "N+1 query problem",
                "More server complexity",
            ],
            typical_use_cases: &[
                "Complex data relationships",
                "Mobile apps (bandwidth optimization)",
                "Evolving APIs",
                "Frontend-driven development",
            ],
            compatibility_notes: &[
                ("browser", "Apollo Client, urql"),
                ("python", "graphene, strawberry"),
                ("nodejs", "apollo-server"),
            ],
            patterns: GRAPHQL_PATTERNS,
        },
        ProtocolDescriptor {
            key: "sse",
            name: "Server-Sent Events (SSE)",
            category: Category::Streaming,
            complexity_base: 2,
            dependencies: &["aiohttp", "flask", "fastapi"],
            pros: &[
                "Simple one-way streaming",
                "Built on HTTP",
                "Automatic reconnection",
                "Native browser support",
            ],
            cons: &[
                "One-way only (server to client)",
                "Text-based only",
                "Limited browser connections",
            ],
            typical_use_cases: &[
                "News feeds",
                "Stock tickers",
                "Progress updates",
                "Notifications",
            ],
            compatibility_notes: &[
                ("browser", "Native EventSource API"),
                ("python", "Built into web frameworks"),
                ("nodejs", "Built-in or libraries"),
            ],
            patterns: SSE_PATTERNS,
        },
        ProtocolDescriptor {
            key: "mqtt",
            name: "MQTT",
            category: Category::Realtime,
            complexity_base: 5,
            dependencies: &["paho-mqtt", "mqtt", "mosquitto"],
            pros: &[
                "Very lightweight",
                "Publish/subscribe pattern",
                "QoS levels",
                "Great for IoT",
            ],
            cons: &["Requires broker", "Not browser-native", "Different paradigm"],
            typical_use_cases: &[
                "IoT devices",
                "Sensor data",
                "Home automation",
                "Low-bandwidth environments",
            ],
            compatibility_notes: &[
                ("browser", "Requires MQTT over WebSocket"),
                ("python", "paho-mqtt"),
                ("nodejs", "mqtt.js"),
            ],
            patterns: MQTT_PATTERNS,
        },
    ]
}
