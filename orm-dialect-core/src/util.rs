pub fn separated_by<T, F>(
    out: &mut String,
    values: impl IntoIterator<Item = T>,
    mut f: F,
    separator: &str,
) where
    F: FnMut(&mut String, T),
{
    let mut len = out.len();
    for v in values {
        if out.len() > len {
            out.push_str(separator);
        }
        len = out.len();
        f(out, v);
    }
}

/// Piece of a SQL template: either verbatim text or a positional `?` placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlPiece<'s> {
    Text(&'s str),
    Placeholder,
}

/// Splits a SQL template on its `?` placeholders.
///
/// Question marks inside single quoted literals or double quoted identifiers are
/// text. A doubled quote inside a quoted section is an escaped quote.
pub fn split_placeholders(sql: &str) -> impl Iterator<Item = SqlPiece<'_>> {
    let mut position = 0;
    let mut quote: Option<char> = None;
    let mut chars = sql.char_indices();
    let mut pending_placeholder = false;
    std::iter::from_fn(move || {
        if pending_placeholder {
            pending_placeholder = false;
            return Some(SqlPiece::Placeholder);
        }
        while let Some((i, c)) = chars.next() {
            match (quote, c) {
                (None, '\'' | '"') => quote = Some(c),
                (Some(q), c) if q == c => quote = None,
                (None, '?') => {
                    let text = &sql[position..i];
                    position = i + 1;
                    if text.is_empty() {
                        return Some(SqlPiece::Placeholder);
                    }
                    pending_placeholder = true;
                    return Some(SqlPiece::Text(text));
                }
                _ => {}
            }
        }
        if position < sql.len() {
            let text = &sql[position..];
            position = sql.len();
            return Some(SqlPiece::Text(text));
        }
        None
    })
}

/// Largest char boundary of `value` not past `index`.
pub fn floor_char_boundary(value: &str, index: usize) -> usize {
    if index >= value.len() {
        return value.len();
    }
    let mut index = index;
    while !value.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[macro_export]
macro_rules! truncate_long {
    ($query:expr) => {
        format_args!(
            "{}{}",
            &$query[..$crate::floor_char_boundary(&$query, 497)].trim_end(),
            if $query.len() > 497 { "..." } else { "" },
        )
    };
}

#[cfg(test)]
mod tests {
    use super::{SqlPiece, floor_char_boundary, split_placeholders};

    #[test]
    fn split() {
        let pieces = split_placeholders("a = ? AND b = '?' AND \"c?\" = ?").collect::<Vec<_>>();
        assert_eq!(
            pieces,
            [
                SqlPiece::Text("a = "),
                SqlPiece::Placeholder,
                SqlPiece::Text(" AND b = '?' AND \"c?\" = "),
                SqlPiece::Placeholder,
            ]
        );
        let pieces = split_placeholders("??").collect::<Vec<_>>();
        assert_eq!(pieces, [SqlPiece::Placeholder, SqlPiece::Placeholder]);
        assert_eq!(split_placeholders("").count(), 0);
        let pieces = split_placeholders("'it''s ?'").collect::<Vec<_>>();
        assert_eq!(pieces, [SqlPiece::Text("'it''s ?'")]);
    }

    #[test]
    fn truncate() {
        assert_eq!(floor_char_boundary("abc", 10), 3);
        assert_eq!(floor_char_boundary("aé", 2), 1);
        assert_eq!(floor_char_boundary("aé", 3), 3);

        let short = "SELECT 1".to_string();
        assert_eq!(format!("{}", truncate_long!(short)), "SELECT 1");

        let long = format!("{}é{}", "a".repeat(496), "b".repeat(100));
        let truncated = format!("{}", truncate_long!(long));
        assert_eq!(truncated, format!("{}...", "a".repeat(496)));

        let long = format!("{}é{}", "a".repeat(495), "b".repeat(100));
        let truncated = format!("{}", truncate_long!(long));
        assert_eq!(truncated, format!("{}é...", "a".repeat(495)));
    }
}
