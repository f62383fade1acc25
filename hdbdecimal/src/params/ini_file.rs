use crate::{HdbError, HdbResult};
use std::{collections::BTreeMap, path::Path};

/// The content of an INI file, as sections of key-value pairs.
///
/// Keys that appear before the first section header belong to the unnamed
/// section `""`. Section names and keys are case-sensitive; later occurrences
/// of a key overwrite earlier ones.
///
/// Values are read the way the export tools' INI library reads them:
/// a value in backticks or triple double quotes is taken verbatim, up to the
/// last closing quote. Otherwise the value ends at the first `#` or `;`, and one
/// pair of surrounding single or double quotes is removed. A password containing
/// `#` or `;` therefore needs backticks.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct IniFile {
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl IniFile {
    /// Reads and parses the given file.
    pub fn load<P: AsRef<Path>>(path: P) -> HdbResult<Self> {
        let path = path.as_ref();
        info!("reading configuration from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parses the text of an INI file.
    ///
    /// # Errors
    ///
    /// `HdbError::Config` for lines that are neither blank, nor a comment,
    /// nor a section header, nor a key-value pair.
    pub fn parse(text: &str) -> HdbResult<Self> {
        let mut sections: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
        let mut current = String::new();

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if let Some(rest) = line.strip_prefix('[') {
                // anything after the closing bracket is ignored
                let name = rest
                    .rfind(']')
                    .map(|pos| rest[..pos].trim())
                    .ok_or_else(|| HdbError::config(line_no, "section header lacks ']'"))?;
                if name.is_empty() {
                    return Err(HdbError::config(line_no, "empty section name"));
                }
                current = name.to_string();
                sections.entry(current.clone()).or_default();
                continue;
            }

            let (key, value) = line
                .find(|c: char| c == '=' || c == ':')
                .map(|pos| (&line[..pos], &line[pos + 1..]))
                .ok_or_else(|| HdbError::config(line_no, "expected 'key = value'"))?;
            let key = key.trim();
            if key.is_empty() {
                return Err(HdbError::config(line_no, "empty key"));
            }
            trace!("[{current}] {key}");
            sections
                .entry(current.clone())
                .or_default()
                .insert(key.to_string(), parse_value(value).to_string());
        }

        Ok(Self { sections })
    }

    /// Returns the value of `key` in `section`, if present.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|s| s.get(key))
            .map(String::as_str)
    }

    /// Returns true if the section exists, even if it is empty.
    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    /// Iterates over the names of all sections, in alphabetical order.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }
}

impl std::str::FromStr for IniFile {
    type Err = HdbError;
    fn from_str(s: &str) -> HdbResult<Self> {
        Self::parse(s)
    }
}

fn parse_value(raw: &str) -> &str {
    let value = raw.trim();
    for quote in ["\"\"\"", "`"] {
        if let Some(verbatim) = value
            .strip_prefix(quote)
            .and_then(|inner| inner.rfind(quote).map(|end| &inner[..end]))
        {
            return verbatim;
        }
    }

    let value = value
        .find(|c: char| c == '#' || c == ';')
        .map_or(value, |pos| &value[..pos])
        .trim_end();
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::IniFile;
    use crate::HdbError;

    const SAMPLE: &str = "\
        ; global settings\n\
        mode = batch\n\
        \n\
        [server]\n\
        uid = REPORTER\n\
        pwd = \"s3cr=t\"\n\
        host: hana.example.com\n\
        port = 30015\n\
        # output\n\
        [save]\n\
        extension=csv\n\
        [empty]\n";

    #[test]
    fn test_parse() {
        let ini: IniFile = SAMPLE.parse().unwrap();
        assert_eq!(ini.get("", "mode"), Some("batch"));
        assert_eq!(ini.get("server", "uid"), Some("REPORTER"));
        assert_eq!(ini.get("server", "pwd"), Some("s3cr=t"));
        assert_eq!(ini.get("server", "host"), Some("hana.example.com"));
        assert_eq!(ini.get("server", "port"), Some("30015"));
        assert_eq!(ini.get("save", "extension"), Some("csv"));
        assert_eq!(ini.get("save", "uid"), None);
        assert!(ini.has_section("empty"));
        assert_eq!(
            ini.section_names().collect::<Vec<_>>(),
            vec!["", "empty", "save", "server"]
        );
    }

    #[test]
    fn test_errors() {
        match IniFile::parse("[server]\nuid REPORTER\n") {
            Err(HdbError::Config { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(IniFile::parse("[server\n").is_err());
        assert!(IniFile::parse("[ ]\n").is_err());
        assert!(IniFile::parse("= value\n").is_err());
    }

    #[test]
    fn test_inline_comments() {
        let ini = IniFile::parse(
            "[server] ; production\n\
             port = 30015 ; prod\n\
             host = hana01# primary\n\
             uid = 'REPORTER' # quoted\n\
             pwd = `p#ss;w=rd` ; verbatim\n\
             [save]\n\
             extension = \"\"\"c;sv\"\"\"\n\
             empty = ; nothing\n",
        )
        .unwrap();
        assert_eq!(ini.get("server", "port"), Some("30015"));
        assert_eq!(ini.get("server", "host"), Some("hana01"));
        assert_eq!(ini.get("server", "uid"), Some("REPORTER"));
        assert_eq!(ini.get("server", "pwd"), Some("p#ss;w=rd"));
        assert_eq!(ini.get("save", "extension"), Some("c;sv"));
        assert_eq!(ini.get("save", "empty"), Some(""));

        let params = crate::ExportParams::from_ini(&ini).unwrap();
        assert_eq!(params.port(), 30015);
        assert_eq!(params.password().unsecure(), "p#ss;w=rd");
    }

    #[test]
    fn test_last_value_wins() {
        let ini = IniFile::parse("[a]\nk = 1\nk = 2\n").unwrap();
        assert_eq!(ini.get("a", "k"), Some("2"));
    }
}
