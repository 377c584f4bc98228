//! Dotted native configuration paths
//!
//! A path addresses a package, a section (by name or by position within its
//! type) and optionally one option:
//!
//! ```text
//! wireless.radio0.channel
//! wireless.@wifi-iface[0].ssid
//! wireless.@wifi-iface[-1]
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// How a section is addressed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SectionRef {
    /// By section name.
    Named(String),
    /// By position among sections of one type. Negative indexes count from
    /// the end (`-1` is the last section of that type).
    Indexed { section_type: String, index: i32 },
}

impl SectionRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn indexed(section_type: impl Into<String>, index: usize) -> Self {
        Self::Indexed {
            section_type: section_type.into(),
            index: i32::try_from(index).unwrap_or(i32::MAX),
        }
    }
}

impl fmt::Display for SectionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{}", name),
            Self::Indexed {
                section_type,
                index,
            } => write!(f, "@{}[{}]", section_type, index),
        }
    }
}

/// A path to a section or an option inside a package.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UciPath {
    pub package: String,
    pub section: SectionRef,
    pub option: Option<String>,
}

impl UciPath {
    pub fn section(package: impl Into<String>, section: SectionRef) -> Self {
        Self {
            package: package.into(),
            section,
            option: None,
        }
    }

    pub fn option(package: impl Into<String>, section: SectionRef, option: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            section,
            option: Some(option.into()),
        }
    }

    /// The same path without its option component.
    pub fn section_path(&self) -> Self {
        Self {
            package: self.package.clone(),
            section: self.section.clone(),
            option: None,
        }
    }
}

impl fmt::Display for UciPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.package, self.section)?;
        if let Some(option) = &self.option {
            write!(f, ".{}", option)?;
        }
        Ok(())
    }
}

fn is_name(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

impl FromStr for UciPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (package, rest) = s
            .split_once('.')
            .ok_or_else(|| Error::invalid_path(s, "missing section"))?;
        if !is_name(package) {
            return Err(Error::invalid_path(s, "invalid package name"));
        }

        let (section, remainder) = if let Some(indexed) = rest.strip_prefix('@') {
            let open = indexed
                .find('[')
                .ok_or_else(|| Error::invalid_path(s, "missing '[' in section index"))?;
            let close = indexed
                .find(']')
                .ok_or_else(|| Error::invalid_path(s, "missing ']' in section index"))?;
            if close < open {
                return Err(Error::invalid_path(s, "malformed section index"));
            }
            let section_type = &indexed[..open];
            if !is_name(section_type) {
                return Err(Error::invalid_path(s, "invalid section type"));
            }
            let index = indexed[open + 1..close]
                .parse::<i32>()
                .map_err(|_| Error::invalid_path(s, "section index is not a number"))?;
            (
                SectionRef::Indexed {
                    section_type: section_type.to_string(),
                    index,
                },
                &indexed[close + 1..],
            )
        } else {
            let end = rest.find('.').unwrap_or(rest.len());
            let name = &rest[..end];
            if !is_name(name) {
                return Err(Error::invalid_path(s, "invalid section name"));
            }
            (SectionRef::Named(name.to_string()), &rest[end..])
        };

        let option = match remainder {
            "" => None,
            other => {
                let option = other
                    .strip_prefix('.')
                    .ok_or_else(|| Error::invalid_path(s, "unexpected characters after section"))?;
                if !is_name(option) {
                    return Err(Error::invalid_path(s, "invalid option name"));
                }
                Some(option.to_string())
            }
        };

        Ok(Self {
            package: package.to_string(),
            section,
            option,
        })
    }
}
