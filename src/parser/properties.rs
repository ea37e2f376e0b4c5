//! Properties file parser
//!
//! Reads the `key=value` format emitted by the build step that records
//! class-paths of old releases. Line syntax follows Java properties files:
//! `\n`, `\r\n` or a lone `\r` ends a line, `#` and `!` start comments, and
//! a key ends at the first `=`, `:` or blank. Backslashes are kept verbatim
//! so Windows paths such as `C:\libs\foo.jar` are not mangled, which also
//! means a trailing backslash never continues a line.

use indexmap::IndexMap;

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// Splits a line into key and value at the first separator.
fn split_entry(line: &str) -> (&str, &str) {
    let Some(end) = line.find(|c: char| c == '=' || c == ':' || is_blank(c)) else {
        return (line, "");
    };

    let rest = line[end..].trim_start_matches(is_blank);
    let rest = rest.strip_prefix(['=', ':']).unwrap_or(rest);

    (&line[..end], rest.trim_start_matches(is_blank))
}

/// Parses properties text into entries ordered by first appearance.
///
/// A repeated key keeps its original position and takes the last value.
pub fn parse_properties(content: &str) -> IndexMap<String, String> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut entries = IndexMap::new();

    for line in content.split(['\r', '\n']) {
        let line = line.trim_start_matches(is_blank);
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let (key, value) = split_entry(line);
        entries.insert(key.to_string(), value.to_string());
    }

    entries
}
