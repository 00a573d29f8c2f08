//! Comment stripping for submitted source text.
//!
//! Static checks run against code with comments removed so that a keyword that
//! only appears in a comment neither satisfies nor violates a rule. Both strippers
//! here scan character by character, tracking string literals so that comment
//! markers inside strings are left alone. Newlines are always preserved, which
//! keeps line-anchored patterns meaningful after stripping.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    LineComment,
    BlockComment,
    Literal(char),
}

/// Removes `// line` and `/* block */` comments from C-family source
/// (Java, C, C++, C#, JavaScript).
///
/// String (`"`) and character (`'`) literals are copied verbatim, escapes included.
/// Each block comment is replaced by one space followed by the newlines it spanned.
pub fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut state = State::Code;
    let mut escape_next = false;
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Code => match c {
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    state = State::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    out.push(' ');
                    state = State::BlockComment;
                }
                '"' | '\'' => {
                    out.push(c);
                    state = State::Literal(c);
                }
                _ => out.push(c),
            },
            State::LineComment => {
                if c == '\n' {
                    out.push('\n');
                    state = State::Code;
                }
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = State::Code;
                } else if c == '\n' {
                    out.push('\n');
                }
            }
            State::Literal(quote) => {
                out.push(c);
                if escape_next {
                    escape_next = false;
                } else if c == '\\' {
                    escape_next = true;
                } else if c == quote || c == '\n' {
                    state = State::Code;
                }
            }
        }
    }

    out
}

/// Removes `#` line comments from Ruby or Python source, leaving string literals intact.
pub fn strip_hash_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut state = State::Code;
    let mut escape_next = false;

    for c in source.chars() {
        match state {
            State::Code => match c {
                '#' => state = State::LineComment,
                '"' | '\'' => {
                    out.push(c);
                    state = State::Literal(c);
                }
                _ => out.push(c),
            },
            State::LineComment | State::BlockComment => {
                if c == '\n' {
                    out.push('\n');
                    state = State::Code;
                }
            }
            State::Literal(quote) => {
                out.push(c);
                if escape_next {
                    escape_next = false;
                } else if c == '\\' {
                    escape_next = true;
                } else if c == quote || c == '\n' {
                    state = State::Code;
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_line_comments() {
        let src = "int x = 1; // uses for loop\nreturn x;";
        assert_eq!(strip_comments(src), "int x = 1; \nreturn x;");
    }

    #[test]
    fn test_strips_block_comments_keeping_newlines() {
        let src = "a /* one\ntwo */ b";
        assert_eq!(strip_comments(src), "a  \n b");
    }

    #[test]
    fn test_inline_block_comment_becomes_space() {
        assert_eq!(strip_comments("int/*x*/y;"), "int y;");
    }

    #[test]
    fn test_comment_markers_inside_strings_survive() {
        let src = r#"String s = "http://example.com /* not */"; // gone"#;
        assert_eq!(
            strip_comments(src),
            r#"String s = "http://example.com /* not */"; "#
        );
    }

    #[test]
    fn test_escaped_quote_does_not_end_string() {
        let src = r#"s = "a \" // b"; // c"#;
        assert_eq!(strip_comments(src), r#"s = "a \" // b"; "#);
    }

    #[test]
    fn test_char_literal_slash() {
        let src = "char c = '/'; // slash";
        assert_eq!(strip_comments(src), "char c = '/'; ");
    }

    #[test]
    fn test_unterminated_block_comment_swallows_rest() {
        assert_eq!(strip_comments("x /* never closed\nfor"), "x  \n");
    }

    #[test]
    fn test_hash_comments() {
        let src = "x = 1 # for loop\ny = '# not a comment'\n";
        assert_eq!(strip_hash_comments(src), "x = 1 \ny = '# not a comment'\n");
    }
}
