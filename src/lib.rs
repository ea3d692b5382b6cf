//! # runflags
//!
//! Shell-safe container runtime flag strings for generated service units.
//!
//! A templating layer hands over one JSON object describing a container's
//! run options; [`build`] turns it into a single deterministic flag string
//! joined by shell line continuations, ready to interpolate into an
//! `ExecStart=` line. The transformation is pure: no I/O, no state, and
//! byte-stable output for a given input.
//!
//! ```
//! use runflags::{build, OptionSet};
//!
//! let options = OptionSet::from_json(
//!     r#"{
//!         "username": "app",
//!         "ports": ["80:80", "443:443"],
//!         "extra_params": ["--rm"]
//!     }"#,
//! )
//! .unwrap();
//!
//! let flags = build(&options).unwrap();
//! assert!(flags.starts_with("-u 'app'"));
//! assert!(flags.ends_with("--rm"));
//! ```

pub mod flags;
pub mod options;
pub mod shell;

pub use flags::{build, FlagError, JoinStyle, POSIX_JOIN, WINDOWS_JOIN};
pub use options::{OptionSet, OptionValue};
