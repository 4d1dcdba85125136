/// Maximum number of title characters copied.
pub const TITLE_LEN: usize = 21;

/// Bytes consulted for the title: the title itself plus one byte of lookahead.
pub const TITLE_WINDOW: usize = TITLE_LEN + 1;

/// Leading bytes of the extended field that must be printable for it to count.
pub const EXTENDED_MARKER_LEN: usize = 4;

fn is_title_char(byte: u8) -> bool {
    (33..=125).contains(&byte)
}

fn is_printable(byte: u8) -> bool {
    (32..=126).contains(&byte)
}

/// Copies the title up to the first byte that is neither a visible character
/// nor a single space. A run of two spaces ends the title.
pub fn extract_title(window: &[u8]) -> String {
    let mut title = String::with_capacity(TITLE_LEN);
    for (i, &byte) in window.iter().take(TITLE_LEN).enumerate() {
        let next = window.get(i + 1).copied();
        let keep = is_title_char(byte) || (byte == b' ' && next != Some(b' '));
        if !keep {
            break;
        }
        title.push(char::from(byte));
    }
    title
}

/// Copies the extended title when its marker bytes are printable.
///
/// The upper bound of each character is checked against the primary title
/// byte at the same index, not against the extended byte itself, and spaces
/// are always accepted. Existing tooling reads the field this way, so bytes
/// above `0x7e` can end up in the result.
pub fn extract_extended(extended: &[u8], title: &[u8]) -> Option<String> {
    let marker = extended.get(..EXTENDED_MARKER_LEN)?;
    if !marker.iter().all(|&byte| is_printable(byte)) {
        return None;
    }

    let mut text = String::with_capacity(TITLE_LEN);
    for (&byte, &guard) in extended.iter().zip(title).take(TITLE_LEN) {
        let keep = (byte > 32 && guard < 126) || byte == b' ';
        if !keep {
            break;
        }
        text.push(char::from(byte));
    }
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn padded(text: &[u8]) -> [u8; TITLE_WINDOW] {
        let mut window = [0u8; TITLE_WINDOW];
        window[..text.len()].copy_from_slice(text);
        window
    }

    #[test]
    fn stops_at_double_space() {
        let window = padded(b"SUPER GAME          ");
        assert_eq!(extract_title(&window), "SUPER GAME");
    }

    #[test]
    fn single_space_before_terminator_is_kept() {
        let window = padded(b"ABC \0XYZ");
        assert_eq!(extract_title(&window), "ABC ");
    }

    #[test]
    fn stops_at_non_printable() {
        let window = padded(b"AB\x7eCD");
        assert_eq!(extract_title(&window), "AB");
        let window = padded(b"AB\x01CD");
        assert_eq!(extract_title(&window), "AB");
    }

    #[test]
    fn copies_at_most_title_len() {
        let mut window = [b'X'; TITLE_WINDOW];
        window[TITLE_LEN] = b'!';
        assert_eq!(extract_title(&window).len(), TITLE_LEN);
    }

    #[test]
    fn space_at_the_end_looks_at_the_lookahead() {
        let mut window = [b'X'; TITLE_WINDOW];
        window[TITLE_LEN - 1] = b' ';
        window[TITLE_LEN] = b' ';
        assert_eq!(extract_title(&window), "X".repeat(TITLE_LEN - 1));
    }

    #[test]
    fn extended_requires_printable_marker() {
        let title = [b'T'; TITLE_LEN];
        assert_eq!(extract_extended(b"AB\0DEFG", &title), None);
        assert_eq!(
            extract_extended(b"ABCD\0", &title),
            Some("ABCD".to_string())
        );
    }

    #[test]
    fn extended_keeps_space_runs() {
        let title = [b'T'; TITLE_LEN];
        assert_eq!(
            extract_extended(b"AB  CD\0", &title),
            Some("AB  CD".to_string())
        );
    }

    #[test]
    fn extended_upper_bound_follows_title_byte() {
        let mut title = [b'T'; TITLE_LEN];
        title[4] = 0x7e;
        assert_eq!(
            extract_extended(b"ABCDEFG\0", &title),
            Some("ABCD".to_string())
        );

        let extended = [b'A', b'B', b'C', b'D', 0x7f, 0];
        let title = [b'T'; TITLE_LEN];
        assert_eq!(
            extract_extended(&extended, &title),
            Some("ABCD\u{7f}".to_string())
        );
    }
}
