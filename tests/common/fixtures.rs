//! Static catalog texts used across harnesses.
//!
//! The shapes mirror the real hand-maintained catalog: an array of format
//! records with `format_id`, `grok_exp`, `samplelog`, a `log_type` array
//! whose entries carry `patterns`, and (pre-strip) a bulky `data_table`
//! member per record.

/// A valid-JSON pretty-printed catalog with a `data_table` member in each
/// record. Valid on purpose, so harnesses can compute an independent
/// reference by parsing it directly.
pub const CATALOG_WITH_TABLES: &str = r#"[
  {
    "format_id": 1,
    "vendor": "apache",
    "grok_exp": "%{IP:client_ip} %{WORD:method} %{NUMBER:status}",
    "samplelog": "10.0.0.1 GET 200",
    "data_table": [
      { "no": 1, "client_ip": "10.0.0.1", "method": "GET" },
      { "no": 2, "client_ip": "10.0.0.2", "method": "POST" }
    ],
    "log_type": [
      { "name": "access", "patterns": ["%{IP:client_ip}", "%{WORD:method}"] },
      { "name": "error", "patterns": ["%{GREEDYDATA:msg}"] }
    ]
  },
  {
    "format_id": 2,
    "vendor": "nginx",
    "grok_exp": "%{IP:src} %{NUMBER:bytes}",
    "samplelog": "192.168.0.9 512",
    "data_table": { "rows": [ { "no": 1, "src": "192.168.0.9" } ] },
    "log_type": [
      { "name": "access", "patterns": ["%{IP:src}"] }
    ]
  }
]
"#;

/// A catalog that is *not* valid JSON: the `grok_exp`/`samplelog` values
/// contain unescaped regex backslashes, exactly the breakage the escape
/// fixer exists for.
pub const CATALOG_BROKEN_ESCAPES: &str = r#"[
  {
    "format_id": 10,
    "grok_exp": "%{IP:ip} \d+ (?:\s|-)",
    "samplelog": "10.0.0.1 42 -",
    "log_type": [
      { "name": "access", "patterns": ["%{IP:ip}"] }
    ]
  },
  {
    "format_id": 11,
    "grok_exp": "%{WORD:w} \\d+",
    "samplelog": "already fine 7",
    "log_type": [
      { "name": "event", "patterns": ["%{WORD:w}", "%{NUMBER:n}"] }
    ]
  }
]
"#;

/// A valid catalog whose `grok_exp` values carry dangling placeholder
/// annotations.
pub const CATALOG_BAD_PLACEHOLDERS: &str = r#"[
  { "format_id": 501, "grok_exp": "%{IP:client_ip:} %{WORD:method}" },
  { "format_id": 502, "grok_exp": "%{NUMBER:}" },
  { "format_id": 503, "grok_exp": "%{WORD:method}" }
]
"#;

/// A catalog truncated mid-`data_table`: the span never closes.
pub const CATALOG_TRUNCATED: &str = r#"[
  {
    "format_id": 1,
    "data_table": [
      { "no": 1 },
"#;
