use wtl_core::text::encode_units;

const DOLLAR: u16 = b'$' as u16;
const AT: u16 = b'@' as u16;
const OPEN_BRACE: u16 = b'{' as u16;
const CLOSE_BRACE: u16 = b'}' as u16;

/// One `@{name}` / `${name}` occurrence. Offsets are UTF-16 units relative
/// to the scanned text; `length` covers the opener through the closing brace
/// (or end-of-text when the brace is missing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderRef {
    pub name: String,
    pub offset: usize,
    pub length: usize,
}

/// Shared scanning primitive for the diagnostics engine and the superset
/// compiler: both must agree on what counts as a placeholder reference.
pub fn scan_placeholders(source: &str) -> Vec<PlaceholderRef> {
    scan_placeholder_units(&encode_units(source))
}

pub fn scan_placeholder_units(units: &[u16]) -> Vec<PlaceholderRef> {
    let mut refs = Vec::new();
    let mut index = 0;

    while index < units.len() {
        if (units[index] == DOLLAR || units[index] == AT)
            && units.get(index + 1) == Some(&OPEN_BRACE)
        {
            let name_start = index + 2;
            let mut cursor = name_start;
            while cursor < units.len() && units[cursor] != CLOSE_BRACE {
                cursor += 1;
            }

            let name = String::from_utf16_lossy(&units[name_start..cursor]);
            if cursor < units.len() {
                cursor += 1;
            }

            refs.push(PlaceholderRef {
                name,
                offset: index,
                length: cursor - index,
            });
            index = cursor;
            continue;
        }

        index += 1;
    }

    refs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_finds_both_opener_styles_with_offsets() {
        let refs = scan_placeholders("a ${x} b @{y}");
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].name, "x");
        assert_eq!(refs[0].offset, 2);
        assert_eq!(refs[0].length, 4);
        assert_eq!(refs[1].name, "y");
        assert_eq!(refs[1].offset, 9);
    }

    #[test]
    fn scan_ignores_openers_without_brace() {
        let refs = scan_placeholders("$x @y ${}");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "");
        assert_eq!(refs[0].length, 3);
    }

    #[test]
    fn scan_tolerates_missing_close_at_end_of_text() {
        let refs = scan_placeholders("@{tail");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "tail");
        assert_eq!(refs[0].length, 6);
    }

    #[test]
    fn scan_offsets_are_utf16_units() {
        let refs = scan_placeholders("🎮${v}");
        assert_eq!(refs[0].offset, 2);
    }
}
