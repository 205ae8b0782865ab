use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::domain::idea::Idea;

const TITLE_COLUMN_WIDTH: usize = 20;

/// One line per idea for plain listings: id, padded title, description,
/// cut down to `max_width` display columns.
pub(crate) fn format_idea_line(idea: &Idea, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    let title = pad_to_width(&single_line(&idea.title), TITLE_COLUMN_WIDTH);
    let line = format!("{:>13}  {}  {}", idea.id.as_i64(), title, single_line(&idea.description));
    truncate_with_ellipsis(&line, max_width)
}

/// Breaks `value` into rows of at most `width` display columns, filling each
/// row character by character. Always yields at least one row.
pub(crate) fn wrap_to_width(value: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = vec![String::new()];
    let mut used = 0;
    for ch in value.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + ch_width > width && used > 0 {
            rows.push(String::new());
            used = 0;
        }
        let last = rows.len() - 1;
        rows[last].push(ch);
        used += ch_width;
    }
    rows
}

fn single_line(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn pad_to_width(value: &str, width: usize) -> String {
    let value_width = UnicodeWidthStr::width(value);
    if value_width >= width {
        return value.to_string();
    }
    format!("{}{}", value, " ".repeat(width - value_width))
}

fn truncate_with_ellipsis(value: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(value) <= max_width {
        return value.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let budget = max_width - 3;
    let mut used = 0;
    let mut result = String::new();
    for ch in value.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(1);
        if used + ch_width > budget {
            break;
        }
        result.push(ch);
        used += ch_width;
    }
    result.push_str("...");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::idea::IdeaId;

    fn idea(title: &str, description: &str) -> Idea {
        Idea {
            id: IdeaId::from(1_700_000_000_000),
            title: title.to_string(),
            description: description.to_string(),
            created_at: None,
        }
    }

    #[test]
    fn short_line_is_left_intact() {
        let line = format_idea_line(&idea("Kiosk", "self checkout"), 200);
        assert!(line.starts_with("1700000000000  Kiosk "));
        assert!(line.ends_with("  self checkout"));
    }

    #[test]
    fn wide_characters_count_double() {
        let line = format_idea_line(&idea("测试创意标题", "这是一个测试创意的详细描述"), 40);
        assert!(UnicodeWidthStr::width(line.as_str()) <= 40);
        assert!(line.ends_with("..."));
    }

    #[test]
    fn newlines_in_description_are_flattened() {
        let line = format_idea_line(&idea("ab", "line one\nline two"), 200);
        assert!(line.contains("line one line two"));
    }

    #[test]
    fn wrapping_fills_rows_by_display_width() {
        let rows = wrap_to_width("创意ab创意", 5);
        assert_eq!(rows, vec!["创意a", "b创意"]);
        assert_eq!(wrap_to_width("", 10), vec![String::new()]);

        let long = format!("{}癸", "甲".repeat(49));
        let rows = wrap_to_width(&long, 56);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].chars().count(), 28);
        assert!(rows[1].ends_with('癸'));
    }

    #[test]
    fn tiny_widths_degrade_to_dots() {
        assert_eq!(format_idea_line(&idea("ab", "abcde"), 2), "..");
        assert_eq!(format_idea_line(&idea("ab", "abcde"), 0), "");
    }
}
