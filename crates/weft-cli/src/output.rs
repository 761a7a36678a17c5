//! CLI output rendering
//!
//! Every command speaks through an [`OutputFormat`], which renders either
//! human-oriented lines or machine-readable JSON. Human mode writes
//! progress to stdout and failures to stderr; JSON mode emits one object
//! per command on stdout.

/// Output format selected by the global `--json` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }

    pub fn is_json(self) -> bool {
        self == OutputFormat::Json
    }

    /// Report a completed action.
    pub fn success(self, message: &str) {
        match self {
            OutputFormat::Human => println!("\u{2713} {message}"),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"ok": true, "message": message}));
            }
        }
    }

    /// Report a failed action.
    pub fn failure(self, message: &str) {
        match self {
            OutputFormat::Human => eprintln!("\u{2717} {message}"),
            OutputFormat::Json => {
                eprintln!("{}", serde_json::json!({"ok": false, "error": message}));
            }
        }
    }

    /// Print a supporting detail line. Suppressed in JSON mode, where the
    /// final [`emit_json`](Self::emit_json) object carries the details.
    pub fn detail(self, message: &str) {
        if self == OutputFormat::Human {
            println!("  {message}");
        }
    }

    /// Print a structured result object. No-op in human mode.
    pub fn emit_json(self, value: &serde_json::Value) {
        if self == OutputFormat::Json {
            match serde_json::to_string_pretty(value) {
                Ok(text) => println!("{text}"),
                Err(_) => println!("{value}"),
            }
        }
    }
}
