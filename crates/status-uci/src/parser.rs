//! Parsing of `uci show` output.
//!
//! `uci -X show <package>` prints one line per section and one per option:
//! ```text
//! wireless.radio0=wifi-device
//! wireless.radio0.channel='11'
//! wireless.cfg033579=wifi-iface
//! wireless.cfg033579.maclist='00:11:22:33:44:55' '66:77:88:99:aa:bb'
//! ```
//! Values are single-quoted; an embedded quote is written as `'\''`. List
//! options carry several quoted values separated by spaces.
//!
//! A line with several values is recorded as a list option. `uci show`
//! prints a one-item list exactly like a plain option, so such a list is
//! read back as a plain option.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Error, Result};
use crate::package::{Package, Section};

/// Matches `package.section[.option]=value`.
static LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_-]+)\.([A-Za-z0-9_-]+)(?:\.([A-Za-z0-9_-]+))?=(.*)$")
        .expect("Invalid uci show line regex")
});

/// Matches the generated names `uci` gives anonymous sections.
static ANONYMOUS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^cfg[0-9a-f]{6}$").expect("Invalid anonymous section regex"));

/// Parse the output of `uci -X show <package>`.
///
/// Lines for other packages are ignored. An option line for a section that
/// was never declared is an error, as is an unterminated quote.
///
/// # Example
/// ```
/// use status_uci::parser::parse_show_output;
///
/// let output = "wireless.radio0=wifi-device\nwireless.radio0.channel='11'\n";
/// let package = parse_show_output("wireless", output).unwrap();
/// assert_eq!(package.sections[0].get("channel"), Some("11"));
/// ```
pub fn parse_show_output(package: &str, output: &str) -> Result<Package> {
    let mut parsed = Package::new(package);

    for (index, line) in output.lines().enumerate() {
        let line_no = index + 1;
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        let caps = LINE_REGEX.captures(line).ok_or_else(|| Error::Parse {
            line: line_no,
            message: format!("unrecognized line: {}", line),
        })?;

        if &caps[1] != package {
            tracing::debug!(line = line_no, "Ignoring line for another package");
            continue;
        }

        let section_name = &caps[2];
        let values = decode_values(&caps[4]).map_err(|message| Error::Parse {
            line: line_no,
            message,
        })?;

        match caps.get(3) {
            None => {
                let section_type = values.join(" ");
                let section = if ANONYMOUS_REGEX.is_match(section_name) {
                    Section::anonymous(section_type, section_name)
                } else {
                    Section::new(section_type, section_name)
                };
                parsed.sections.push(section);
            }
            Some(option) => {
                let section = parsed
                    .sections
                    .iter_mut()
                    .find(|s| s.name == section_name)
                    .ok_or_else(|| Error::Parse {
                        line: line_no,
                        message: format!("option for undeclared section {}", section_name),
                    })?;
                if values.len() > 1 {
                    section.remove(option.as_str());
                    for value in values {
                        section.add_list(option.as_str(), value);
                    }
                } else {
                    section.set(option.as_str(), values.join(" "));
                }
            }
        }
    }

    Ok(parsed)
}

/// Split a raw value into its quoted tokens.
fn decode_values(raw: &str) -> std::result::Result<Vec<String>, String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut in_quote = false;
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quote {
            if c == '\'' {
                in_quote = false;
            } else {
                current.push(c);
            }
            continue;
        }
        match c {
            '\'' => {
                in_quote = true;
                in_token = true;
            }
            '\\' if chars.peek() == Some(&'\'') => {
                chars.next();
                current.push('\'');
                in_token = true;
            }
            ' ' | '\t' => {
                if in_token {
                    values.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            other => {
                current.push(other);
                in_token = true;
            }
        }
    }

    if in_quote {
        return Err("unterminated quote".to_string());
    }
    if in_token {
        values.push(current);
    }
    Ok(values)
}
