use std::path::Path;

use anyhow::{Context, Result};

use crate::pipeline::derive::ThemeValues;

/// Prefix that identifies the start marker line of a generated block.
pub const START_MARKER: &str = "/* AUTO-GENERATED THEME VARIABLES";
/// Full start marker line written at the top of every block.
pub const START_LINE: &str =
    "/* AUTO-GENERATED THEME VARIABLES - run hero-theme to update */";
/// End marker line.
pub const END_MARKER: &str = "/* END AUTO-GENERATED THEME VARIABLES */";

/// A generated block of CSS custom properties.
#[derive(Debug, Clone)]
pub struct ThemeBlock {
    pub values: ThemeValues,
}

impl ThemeBlock {
    pub fn from_values(values: ThemeValues) -> Self {
        Self { values }
    }

    /// Serialize the block, markers included, followed by a blank separator
    /// line.
    pub fn serialize(&self) -> String {
        let v = &self.values;
        let mut out = String::new();
        out.push_str(START_LINE);
        out.push('\n');
        out.push_str(":root {\n");
        out.push_str(&format!("  --accent: {};\n", v.accent.to_hex()));
        out.push_str(&format!("  --accent-dark: {};\n", v.accent_dark.to_hex()));
        out.push_str(&format!("  --hero-overlay: {};\n", v.overlay));
        out.push_str(&format!("  --hero-text: {};\n", v.text.css()));
        out.push_str("}\n");
        out.push_str(END_MARKER);
        out.push_str("\n\n");
        out
    }

    /// Replace the block in `path`, creating the file (and its parent
    /// directories) if it does not exist yet.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let existing = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", path.display()))
            }
        };

        let updated = splice(&existing, &self.serialize());

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(path, updated)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("wrote theme block to {}", path.display());
        Ok(())
    }
}

/// Remove any existing generated block from `existing` and put `block` in
/// front of what is left.
///
/// The old block is cut from its start marker through the end marker plus up
/// to two trailing newlines, which is exactly the separator `serialize`
/// emits. A hand-written block followed by a single newline therefore gains
/// the blank separator line on the first run and is stable afterwards. A
/// start marker without a matching end marker leaves the content alone.
pub fn splice(existing: &str, block: &str) -> String {
    let rest = excise(existing);
    let mut out = String::with_capacity(block.len() + rest.len());
    out.push_str(block);
    out.push_str(&rest);
    out
}

fn excise(content: &str) -> String {
    let Some(start) = content.find(START_MARKER) else {
        return content.to_string();
    };
    let Some(end) = content[start..].find(END_MARKER) else {
        log::warn!("theme start marker without end marker, leaving stylesheet content as is");
        return content.to_string();
    };

    let mut after = start + end + END_MARKER.len();
    for _ in 0..2 {
        if content[after..].starts_with("\r\n") {
            after += 2;
        } else if content[after..].starts_with('\n') {
            after += 1;
        } else {
            break;
        }
    }

    let mut out = String::with_capacity(content.len());
    out.push_str(&content[..start]);
    out.push_str(&content[after..]);
    out
}
