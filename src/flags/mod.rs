//! Container run-flag string assembly.
//!
//! Converts an [`OptionSet`] into the single flag string interpolated into
//! generated service units (`ExecStart=` continuations). Generated units
//! are diffed and parsed by downstream tooling, so the output is a fixed
//! byte format: flag order, quoting, and separator placement never vary
//! for a given input.
//!
//! [`build`] is a pure function. It holds no state, performs no I/O, and
//! is safe to call concurrently.
//!
//! The assembly runs in a fixed order:
//!
//! 1. Simple single flags (`-u`, `-h`, `--restart`, ...), each emitted at
//!    most once.
//! 2. Join-style selection from `osfamily` (POSIX backslash or Windows
//!    backtick line continuation).
//! 3. Multi-value flags in [`MULTI_VALUE_FLAGS`] table order, one flag per
//!    list element, each with the separator already appended.
//! 4. `extra_params`, verbatim.
//! 5. A final join of the whole sequence with the same separator.
//!
//! Steps 3 and 5 both contribute a separator after a multi-value flag, so
//! such a flag followed by anything else carries two consecutive
//! separators. Existing consumers of the generated units tolerate and
//! expect that byte layout; it must not be collapsed.

use thiserror::Error;
use tracing::debug;

use crate::options::{OptionSet, OptionValue};
use crate::shell;

/// POSIX shell line continuation: backslash-newline.
///
/// Some software (inc systemd) will truncate very long lines using glibc's
/// max line length, so options are wrapped across multiple lines.
pub const POSIX_JOIN: &str = " \\\n";

/// Windows (PowerShell) line continuation: backtick-newline.
pub const WINDOWS_JOIN: &str = " `\n";

/// Sentinel string meaning "no value", distinct from structural absence.
///
/// Only honored on `osfamily`, `health_check_cmd`, and
/// `health_check_interval`; elsewhere it is an ordinary string.
const UNDEF: &str = "undef";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while assembling the flag string.
///
/// Absent or falsy options never error -- their flags are simply omitted.
/// Errors are reserved for values whose shape is fundamentally
/// incompatible with the flag that consumes them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlagError {
    /// A value has the wrong shape for its option, e.g. a list where a
    /// single string is expected.
    #[error("option '{key}' expects {expected}, found {found}")]
    InvalidValue {
        key: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// `extra_params` must always be supplied, even when empty.
    #[error("option 'extra_params' must be present as a list")]
    MissingExtraParams,
}

// ---------------------------------------------------------------------------
// Join style
// ---------------------------------------------------------------------------

/// Line-continuation separator used between flags, selected once per
/// invocation from the `osfamily` option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinStyle {
    /// `" \\\n"` -- POSIX shells; the default.
    Posix,
    /// `` " `\n" `` -- Windows shells.
    Windows,
}

impl JoinStyle {
    /// The separator string for this style.
    pub fn separator(self) -> &'static str {
        match self {
            Self::Posix => POSIX_JOIN,
            Self::Windows => WINDOWS_JOIN,
        }
    }

    /// Select the style from the `osfamily` option.
    ///
    /// `"windows"` (any case) selects [`JoinStyle::Windows`]; anything
    /// else, including absence and the `undef` sentinel, selects
    /// [`JoinStyle::Posix`].
    fn resolve(options: &OptionSet) -> Result<Self, FlagError> {
        match sentinel_scalar(options, "osfamily")? {
            Some(family) if family.eq_ignore_ascii_case("windows") => Ok(Self::Windows),
            _ => Ok(Self::Posix),
        }
    }
}

// ---------------------------------------------------------------------------
// Multi-value flag table
// ---------------------------------------------------------------------------

/// `(option key, formatter)` pairs, walked in this exact order.
///
/// Each present element of the (flattened) value list produces one flag.
/// The table order is part of the output contract.
const MULTI_VALUE_FLAGS: &[(&str, fn(&str) -> String)] = &[
    ("dns", fmt_dns),
    ("dns_search", fmt_dns_search),
    ("expose", fmt_expose),
    ("links", fmt_link),
    ("lxc_conf", fmt_lxc_conf),
    ("volumes_from", fmt_volumes_from),
    ("env", fmt_env),
    ("env_file", fmt_env_file),
    ("ports", fmt_port),
    ("labels", fmt_label),
    ("hostentries", fmt_add_host),
    ("volumes", fmt_volume),
];

fn fmt_dns(v: &str) -> String {
    format!("--dns {v}")
}

fn fmt_dns_search(v: &str) -> String {
    format!("--dns-search {v}")
}

fn fmt_expose(v: &str) -> String {
    format!("--expose={v}")
}

fn fmt_link(v: &str) -> String {
    format!("--link {v}")
}

fn fmt_lxc_conf(v: &str) -> String {
    format!("--lxc-conf=\"{v}\"")
}

fn fmt_volumes_from(v: &str) -> String {
    format!("--volumes-from {v}")
}

fn fmt_env(v: &str) -> String {
    format!("-e \"{v}\"")
}

fn fmt_env_file(v: &str) -> String {
    format!("--env-file {v}")
}

fn fmt_port(v: &str) -> String {
    format!("-p {v}")
}

fn fmt_label(v: &str) -> String {
    format!("-l {v}")
}

fn fmt_add_host(v: &str) -> String {
    format!("--add-host {v}")
}

fn fmt_volume(v: &str) -> String {
    format!("-v {v}")
}

// ---------------------------------------------------------------------------
// Typed option accessors
// ---------------------------------------------------------------------------

/// Read `key` as an optional string.
///
/// Absent, `null`, `false`, and the empty string read as `None`. A list
/// or a bare `true` cannot be rendered as a single value and is an error.
fn scalar<'a>(options: &'a OptionSet, key: &'static str) -> Result<Option<&'a str>, FlagError> {
    match options.get(key) {
        OptionValue::Absent | OptionValue::Bool(false) => Ok(None),
        OptionValue::Scalar(s) if s.is_empty() => Ok(None),
        OptionValue::Scalar(s) => Ok(Some(s)),
        other => Err(FlagError::InvalidValue {
            key,
            expected: "a string value",
            found: other.kind(),
        }),
    }
}

/// Like [`scalar`], but the literal string `undef` also reads as `None`.
fn sentinel_scalar<'a>(
    options: &'a OptionSet,
    key: &'static str,
) -> Result<Option<&'a str>, FlagError> {
    Ok(scalar(options, key)?.filter(|s| *s != UNDEF))
}

/// Read `key` as a presence toggle.
///
/// `true` enables the flag. Stringly-typed config layers are common, so a
/// scalar is accepted as well: the empty string and `"false"` disable,
/// any other string enables.
fn boolean(options: &OptionSet, key: &'static str) -> Result<bool, FlagError> {
    match options.get(key) {
        OptionValue::Absent => Ok(false),
        OptionValue::Bool(b) => Ok(*b),
        OptionValue::Scalar(s) => Ok(!(s.is_empty() || s == "false")),
        other => Err(FlagError::InvalidValue {
            key,
            expected: "a boolean",
            found: other.kind(),
        }),
    }
}

/// Read `key` as a flat list of present values.
///
/// A scalar is a one-element list; nested lists are flattened; null and
/// empty entries are dropped. Never errors: any shape coerces.
fn values<'a>(options: &'a OptionSet, key: &str) -> Vec<&'a str> {
    let mut out = Vec::new();
    options.get(key).flatten_into(&mut out);
    out
}

/// Read `extra_params`, which must be present as a list.
///
/// Elements pass through verbatim -- empty strings included -- because
/// callers use this as the raw escape hatch for flags the builder does
/// not model. Nested lists are flattened; null entries are dropped.
fn extra_params(options: &OptionSet) -> Result<Vec<&str>, FlagError> {
    match options.get("extra_params") {
        OptionValue::List(items) => {
            let mut out = Vec::new();
            for item in items {
                push_verbatim(item, &mut out);
            }
            Ok(out)
        }
        OptionValue::Absent => Err(FlagError::MissingExtraParams),
        other => Err(FlagError::InvalidValue {
            key: "extra_params",
            expected: "a list",
            found: other.kind(),
        }),
    }
}

fn push_verbatim<'a>(value: &'a OptionValue, out: &mut Vec<&'a str>) {
    match value {
        OptionValue::Absent => {}
        OptionValue::Bool(true) => out.push("true"),
        OptionValue::Bool(false) => out.push("false"),
        OptionValue::Scalar(s) => out.push(s),
        OptionValue::List(items) => {
            for item in items {
                push_verbatim(item, out);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Build the flag string for one container's run options.
///
/// Output bytes are a pure function of the input: identical option sets
/// always produce identical strings, and flag categories always appear in
/// the same relative order no matter which keys are populated.
///
/// # Errors
///
/// [`FlagError::InvalidValue`] when a value's shape is incompatible with
/// its option, and [`FlagError::MissingExtraParams`] when `extra_params`
/// is missing entirely. Absent or falsy options never error.
///
/// # Examples
/// ```
/// use runflags::{build, OptionSet};
///
/// let options = OptionSet::new()
///     .with("username", "alice")
///     .with("ports", vec!["80:80"])
///     .with("extra_params", Vec::<&str>::new());
///
/// let flags = build(&options).unwrap();
/// assert_eq!(flags, "-u 'alice' \\\n-p 80:80 \\\n");
/// ```
pub fn build(options: &OptionSet) -> Result<String, FlagError> {
    let mut flags: Vec<String> = Vec::new();

    if let Some(username) = scalar(options, "username")? {
        flags.push(format!("-u '{}'", shell::escape(username)));
    }

    if let Some(hostname) = scalar(options, "hostname")? {
        flags.push(format!("-h '{}'", shell::escape(hostname)));
    }

    if let Some(restart) = scalar(options, "restart")? {
        flags.push(format!("--restart '{restart}'"));
    }

    if let Some(memory_limit) = scalar(options, "memory_limit")? {
        flags.push(format!("-m {memory_limit}"));
    }

    let cpusets = values(options, "cpuset");
    if !cpusets.is_empty() {
        flags.push(format!("--cpuset-cpus={}", cpusets.join(",")));
    }

    if boolean(options, "disable_network")? {
        flags.push("-n false".to_string());
    }

    if boolean(options, "privileged")? {
        flags.push("--privileged".to_string());
    }

    if let Some(cmd) = sentinel_scalar(options, "health_check_cmd")? {
        flags.push(format!("--health-cmd='{cmd}'"));
    }

    if let Some(interval) = sentinel_scalar(options, "health_check_interval")? {
        flags.push(format!("--health-interval={interval}s"));
    }

    if boolean(options, "tty")? {
        flags.push("-t".to_string());
    }

    if boolean(options, "read_only")? {
        flags.push("--read-only=true".to_string());
    }

    let style = JoinStyle::resolve(options)?;
    let separator = style.separator();

    for &(key, fmt) in MULTI_VALUE_FLAGS {
        for value in values(options, key) {
            let mut flag = fmt(value);
            flag.push_str(separator);
            flags.push(flag);
        }
    }

    for param in extra_params(options)? {
        flags.push(param.to_string());
    }

    debug!(
        flags = flags.len(),
        style = ?style,
        "assembled container run flags"
    );

    Ok(flags.join(separator))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
