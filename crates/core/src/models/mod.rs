//! Shared domain models.

use serde::{Deserialize, Deserializer, Serialize};

/// Longest accepted hex color, `#RRGGBB`.
pub const HEX_COLOR_MAX_LEN: usize = 7;

/// A named collection of colors and links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Display name shown in the project list.
    pub name: String,
    /// Hex color codes in insertion order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub colors: Vec<String>,
    /// Named links in insertion order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub urls: Vec<NamedUrl>,
}

impl Project {
    /// Create a project with no colors or links.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            colors: Vec::new(),
            urls: Vec::new(),
        }
    }

    /// Returns the one-line description shown under the project name.
    pub fn summary(&self) -> String {
        let colors = if self.colors.len() == 1 {
            "color"
        } else {
            "colors"
        };
        let urls = if self.urls.len() == 1 { "URL" } else { "URLs" };
        format!(
            "{} {colors}, {} {urls}",
            self.colors.len(),
            self.urls.len()
        )
    }
}

/// A link with a human-readable label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedUrl {
    /// Label shown in the link list.
    pub name: String,
    /// Value copied to the clipboard.
    pub url: String,
}

impl NamedUrl {
    /// Build a link from its label and target.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Accepts `#RGB` and `#RRGGBB`. Only the prefix and length are checked.
pub fn is_hex_color(input: &str) -> bool {
    let len = input.chars().count();
    input.starts_with('#') && (len == 4 || len == HEX_COLOR_MAX_LEN)
}

// Older data files carry `null` for empty collections.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_color_accepts_short_and_long_forms() {
        assert!(is_hex_color("#FFF"));
        assert!(is_hex_color("#FF5733"));
        assert!(is_hex_color("#zzz"));
    }

    #[test]
    fn hex_color_rejects_bad_length_or_prefix() {
        assert!(!is_hex_color("#FF57"));
        assert!(!is_hex_color("FF5733"));
        assert!(!is_hex_color("#FF57333"));
        assert!(!is_hex_color(""));
        assert!(!is_hex_color("#"));
    }

    #[test]
    fn summary_uses_singular_for_one() {
        let mut project = Project::new("Branding");
        assert_eq!(project.summary(), "0 colors, 0 URLs");

        project.colors.push("#FFF".to_string());
        project.urls.push(NamedUrl::new("Docs", "https://example.com"));
        assert_eq!(project.summary(), "1 color, 1 URL");

        project.colors.push("#000".to_string());
        assert_eq!(project.summary(), "2 colors, 1 URL");
    }

    #[test]
    fn null_and_missing_collections_load_empty() {
        let projects: Vec<Project> =
            serde_json::from_str(r#"[{"name":"A","colors":null},{"name":"B"}]"#)
                .expect("valid json");
        assert_eq!(projects[0], Project::new("A"));
        assert_eq!(projects[1], Project::new("B"));
    }
}
