//! Packages, sections and options

use crate::path::SectionRef;

/// A typed section holding ordered options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub section_type: String,
    /// True for sections created without an explicit name.
    pub anonymous: bool,
    pub options: Vec<(String, String)>,
    /// Options declared as lists; their items are held space-joined in `options`.
    pub lists: Vec<String>,
}

impl Section {
    pub fn new(section_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            section_type: section_type.into(),
            anonymous: false,
            options: Vec::new(),
            lists: Vec::new(),
        }
    }

    pub fn anonymous(section_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            anonymous: true,
            ..Self::new(section_type, name)
        }
    }

    /// Builder-style option append.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Builder-style list option.
    pub fn with_list<I, V>(mut self, key: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let key = key.into();
        for item in items {
            self.add_list(key.as_str(), item);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_option(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn is_list(&self, key: &str) -> bool {
        self.lists.iter().any(|k| k == key)
    }

    /// Set a single-valued option, keeping its position if it already exists.
    ///
    /// Setting a list option turns it into a plain option.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        self.lists.retain(|k| *k != key);
        match self.options.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.options.push((key, value)),
        }
    }

    /// Append one item to a list option, creating the list if needed.
    ///
    /// A plain option of the same name is replaced.
    pub fn add_list(&mut self, key: &str, item: impl Into<String>) {
        let item = item.into();
        let was_list = self.is_list(key);
        match self.options.iter_mut().find(|(k, _)| k == key) {
            Some(slot) if was_list => {
                slot.1.push(' ');
                slot.1.push_str(&item);
            }
            Some(slot) => slot.1 = item,
            None => self.options.push((key.to_string(), item)),
        }
        if !was_list {
            self.lists.push(key.to_string());
        }
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.lists.retain(|k| k != key);
        let before = self.options.len();
        self.options.retain(|(k, _)| k != key);
        self.options.len() != before
    }

    /// Compare the declared type, tolerating a single-quoted type tag.
    pub fn type_matches(&self, section_type: &str) -> bool {
        let declared = self
            .section_type
            .strip_prefix('\'')
            .and_then(|t| t.strip_suffix('\''))
            .unwrap_or(&self.section_type);
        declared == section_type
    }
}

/// A named configuration package with sections in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    pub sections: Vec<Section>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sections: Vec::new(),
        }
    }

    /// Builder-style section append.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    pub fn sections_of_type<'a>(&'a self, section_type: &'a str) -> impl Iterator<Item = &'a Section> + 'a {
        self.sections
            .iter()
            .filter(move |s| s.type_matches(section_type))
    }

    /// Resolve a section reference to an index into `sections`.
    pub fn position(&self, section: &SectionRef) -> Option<usize> {
        match section {
            SectionRef::Named(name) => self.sections.iter().position(|s| &s.name == name),
            SectionRef::Indexed {
                section_type,
                index,
            } => {
                let matching: Vec<usize> = self
                    .sections
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| s.type_matches(section_type))
                    .map(|(i, _)| i)
                    .collect();
                let resolved = if *index < 0 {
                    let back = usize::try_from(index.unsigned_abs()).ok()?;
                    matching.len().checked_sub(back)?
                } else {
                    usize::try_from(*index).ok()?
                };
                matching.get(resolved).copied()
            }
        }
    }

    pub fn find(&self, section: &SectionRef) -> Option<&Section> {
        self.position(section).map(|i| &self.sections[i])
    }

    pub fn find_mut(&mut self, section: &SectionRef) -> Option<&mut Section> {
        self.position(section).map(move |i| &mut self.sections[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Package {
        Package::new("wireless")
            .with_section(Section::new("wifi-device", "radio0"))
            .with_section(Section::anonymous("wifi-iface", "cfg033579"))
            .with_section(Section::new("wifi-device", "radio1"))
            .with_section(Section::anonymous("'wifi-iface'", "cfg043579"))
    }

    #[test]
    fn indexed_lookup_counts_within_type() {
        let package = sample();
        let section = package.find(&SectionRef::indexed("wifi-device", 1)).unwrap();
        assert_eq!(section.name, "radio1");
    }

    #[test]
    fn negative_index_counts_from_end() {
        let package = sample();
        let last = package
            .find(&SectionRef::Indexed {
                section_type: "wifi-iface".into(),
                index: -1,
            })
            .unwrap();
        assert_eq!(last.name, "cfg043579");
    }

    #[test]
    fn out_of_range_index_is_none() {
        let package = sample();
        assert!(package.find(&SectionRef::indexed("wifi-device", 2)).is_none());
    }

    #[test]
    fn set_keeps_option_position() {
        let mut section = Section::new("wifi-device", "radio0")
            .with_option("type", "mac80211")
            .with_option("channel", "11");
        section.set("type", "broadcom");
        assert_eq!(section.options[0], ("type".to_string(), "broadcom".to_string()));
        assert!(section.remove("channel"));
        assert!(!section.has_option("channel"));
    }

    #[test]
    fn list_items_accumulate_until_set() {
        let mut section = Section::anonymous("wifi-iface", "cfg033579")
            .with_list("maclist", ["00:11:22:33:44:55", "66:77:88:99:aa:bb"]);
        assert!(section.is_list("maclist"));
        assert_eq!(section.get("maclist"), Some("00:11:22:33:44:55 66:77:88:99:aa:bb"));

        section.set("maclist", "aa:bb:cc:dd:ee:ff");
        assert!(!section.is_list("maclist"));
        assert_eq!(section.get("maclist"), Some("aa:bb:cc:dd:ee:ff"));
    }
}
