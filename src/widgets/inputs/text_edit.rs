//! Cursor-aware editing helpers; cursors count chars, not bytes.

pub fn char_count(value: &str) -> usize {
    value.chars().count()
}

pub fn clamp_cursor(cursor: usize, value: &str) -> usize {
    cursor.min(char_count(value))
}

pub fn insert_char(value: &mut String, cursor: &mut usize, ch: char) {
    let pos = clamp_cursor(*cursor, value);
    value.insert(byte_index_at_char(value, pos), ch);
    *cursor = pos + 1;
}

pub fn backspace_char(value: &mut String, cursor: &mut usize) -> bool {
    let pos = clamp_cursor(*cursor, value);
    if pos == 0 {
        return false;
    }
    value.remove(byte_index_at_char(value, pos - 1));
    *cursor = pos - 1;
    true
}

pub fn delete_char(value: &mut String, cursor: &mut usize) -> bool {
    let pos = clamp_cursor(*cursor, value);
    if pos >= char_count(value) {
        return false;
    }
    value.remove(byte_index_at_char(value, pos));
    *cursor = pos;
    true
}

pub fn move_left(cursor: &mut usize, value: &str) -> bool {
    let pos = clamp_cursor(*cursor, value);
    if pos == 0 {
        return false;
    }
    *cursor = pos - 1;
    true
}

pub fn move_right(cursor: &mut usize, value: &str) -> bool {
    let pos = clamp_cursor(*cursor, value);
    if pos >= char_count(value) {
        return false;
    }
    *cursor = pos + 1;
    true
}

pub fn delete_word_left(value: &mut String, cursor: &mut usize) -> bool {
    let mut chars: Vec<char> = value.chars().collect();
    let pos = (*cursor).min(chars.len());
    let mut start = pos;
    while start > 0 && is_separator(chars[start - 1]) {
        start -= 1;
    }
    while start > 0 && !is_separator(chars[start - 1]) {
        start -= 1;
    }
    if start == pos {
        *cursor = pos;
        return false;
    }
    chars.drain(start..pos);
    *value = chars.into_iter().collect();
    *cursor = start;
    true
}

fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '.' | '/' | ',' | '-' | '_' | ':')
}

fn byte_index_at_char(value: &str, char_idx: usize) -> usize {
    value
        .char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(value.len())
}

#[cfg(test)]
mod tests {
    use super::{backspace_char, delete_char, delete_word_left, insert_char};

    #[test]
    fn edits_respect_multibyte_chars() {
        let mut value = "żó".to_string();
        let mut cursor = 1;
        insert_char(&mut value, &mut cursor, 'x');
        assert_eq!(value, "żxó");
        assert!(backspace_char(&mut value, &mut cursor));
        assert!(delete_char(&mut value, &mut cursor));
        assert_eq!(value, "ż");
        assert_eq!(cursor, 1);
    }

    #[test]
    fn delete_word_left_stops_at_separator() {
        let mut value = "font-size".to_string();
        let mut cursor = 9;
        assert!(delete_word_left(&mut value, &mut cursor));
        assert_eq!(value, "font-");
        assert_eq!(cursor, 5);
    }
}
