//! Global Constants
//!
//! Centralized constants for baseline derivation and tuning.
//! All magic numbers should be defined here with documentation.

/// Baseline derivation constants
pub mod baseline {
    /// Room below an exact documented target
    pub const EXACT_MARGIN_BELOW: f64 = 10.0;

    /// Room above an exact documented target
    pub const EXACT_MARGIN_ABOVE: f64 = 5.0;

    /// Room below an upper-bound target (`<15%`)
    pub const UPPER_BOUND_MARGIN_BELOW: f64 = 5.0;

    /// Tolerated overshoot above an upper-bound target
    pub const UPPER_BOUND_MARGIN_ABOVE: f64 = 3.0;

    /// Headroom above a lower-bound target (`>70%`)
    pub const LOWER_BOUND_MARGIN_ABOVE: f64 = 10.0;

    /// Lowest value an upper-bound target range may start at
    pub const UPPER_BOUND_FLOOR: f64 = 0.0;

    /// First contact resolution never drops below this
    pub const FCR_FLOOR: f64 = 40.0;

    /// First contact resolution never exceeds this
    pub const FCR_CEILING: f64 = 95.0;

    /// Generic percentage bounds
    pub const PERCENT_FLOOR: f64 = 0.0;
    pub const PERCENT_CEILING: f64 = 100.0;

    /// Query keyword that switches first contact resolution to the technical band
    pub const TECHNICAL_MARKER: &str = "technical";
}

/// Document loading constants
pub mod document {
    /// Default cap on document text handed to the analyzer (characters)
    pub const DEFAULT_MAX_CHARS: usize = 50_000;

    /// Length of the content preview kept in document metadata
    pub const PREVIEW_CHARS: usize = 200;

    /// Extensions read as plain text
    pub const TEXT_EXTENSIONS: &[&str] = &["txt", "md", "markdown"];

    /// Extension read through PDF text extraction
    pub const PDF_EXTENSION: &str = "pdf";
}

/// HTTP/Network constants
pub mod network {
    /// Default LLM request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

    /// Connection timeout (seconds)
    pub const CONNECTION_TIMEOUT_SECS: u64 = 30;

    /// Default maximum tokens generated by the analyzer model
    pub const DEFAULT_MAX_TOKENS: usize = 2048;
}
