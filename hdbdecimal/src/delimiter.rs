//! Conversion of the field delimiter in delimited text files.
//!
//! The export tools write `;`-separated files, while some consumers deliver or
//! expect tab- or space-separated ones.

use crate::HdbResult;
use std::path::Path;

/// A field delimiter that the conversion knows by name.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Delimiter {
    /// `\t`, named `TAB`
    Tab,
    /// `;`, named `SEMICOLON`
    Semicolon,
    /// ` `, named `SPACE`
    Space,
}

impl Delimiter {
    /// Looks up a delimiter by its name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "TAB" => Some(Self::Tab),
            "SEMICOLON" => Some(Self::Semicolon),
            "SPACE" => Some(Self::Space),
            _ => None,
        }
    }

    /// Delimiter to convert from; unknown names mean `Tab`.
    pub fn source_or_default(name: &str) -> Self {
        Self::from_name(name).unwrap_or(Self::Tab)
    }

    /// Delimiter to convert to; unknown names mean `Semicolon`.
    pub fn target_or_default(name: &str) -> Self {
        Self::from_name(name).unwrap_or(Self::Semicolon)
    }

    /// The delimiting text.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tab => "\t",
            Self::Semicolon => ";",
            Self::Space => " ",
        }
    }

    /// The name under which the delimiter is known.
    pub fn name(self) -> &'static str {
        match self {
            Self::Tab => "TAB",
            Self::Semicolon => "SEMICOLON",
            Self::Space => "SPACE",
        }
    }
}

impl std::fmt::Display for Delimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Replaces every occurrence of `from` by `to`.
pub fn convert_delimiters(content: &str, from: Delimiter, to: Delimiter) -> String {
    if from == to {
        return content.to_string();
    }
    let converted = content.replace(from.as_str(), to.as_str());
    debug!(
        "converted {} occurrences of {from} to {to}",
        content.matches(from.as_str()).count()
    );
    converted
}

/// Converts the delimiters of a file in place and returns the new content.
pub fn convert_file<P: AsRef<Path>>(path: P, from: Delimiter, to: Delimiter) -> HdbResult<String> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let converted = convert_delimiters(&content, from, to);
    std::fs::write(path, converted.as_bytes())?;
    info!("converted {} from {from} to {to}", path.display());
    Ok(converted)
}

#[cfg(test)]
mod tests {
    use super::{convert_delimiters, Delimiter};

    #[test]
    fn test_names() {
        assert_eq!(Delimiter::from_name("tab"), Some(Delimiter::Tab));
        assert_eq!(Delimiter::from_name("Semicolon"), Some(Delimiter::Semicolon));
        assert_eq!(Delimiter::from_name(" SPACE "), Some(Delimiter::Space));
        assert_eq!(Delimiter::from_name("comma"), None);

        assert_eq!(Delimiter::source_or_default("comma"), Delimiter::Tab);
        assert_eq!(Delimiter::target_or_default("comma"), Delimiter::Semicolon);
        assert_eq!(Delimiter::source_or_default("space"), Delimiter::Space);
    }

    #[test]
    fn test_convert() {
        assert_eq!(
            convert_delimiters("a\tb\tc\n1\t2\t3\n", Delimiter::Tab, Delimiter::Semicolon),
            "a;b;c\n1;2;3\n"
        );
        assert_eq!(
            convert_delimiters("a;b c", Delimiter::Semicolon, Delimiter::Space),
            "a b c"
        );
        assert_eq!(
            convert_delimiters("a;b", Delimiter::Semicolon, Delimiter::Semicolon),
            "a;b"
        );
    }
}
