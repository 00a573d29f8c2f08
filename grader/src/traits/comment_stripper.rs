//! Comment Stripper Trait
//!
//! Static checks match against submitted code with its comments removed, so a keyword
//! mentioned only in a comment does not count. [`CommentStripper`] is the seam for that
//! capability; the default implementations delegate to [`util::comments`].

/// Removes comments from source text.
pub trait CommentStripper: Send + Sync {
    fn strip_comments(&self, source: &str) -> String;
}

/// `//` and `/* */` comments: Java, C, C++, C#, JavaScript.
#[derive(Debug, Default, Clone, Copy)]
pub struct CStyleComments;

impl CommentStripper for CStyleComments {
    fn strip_comments(&self, source: &str) -> String {
        util::comments::strip_comments(source)
    }
}

/// `#` comments: Ruby, Python.
#[derive(Debug, Default, Clone, Copy)]
pub struct HashComments;

impl CommentStripper for HashComments {
    fn strip_comments(&self, source: &str) -> String {
        util::comments::strip_hash_comments(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strippers_delegate_by_comment_style() {
        let java = "int x; // for later";
        let ruby = "x = 1 # for later";
        assert_eq!(CStyleComments.strip_comments(java), "int x; ");
        assert_eq!(HashComments.strip_comments(ruby), "x = 1 ");
        assert_eq!(CStyleComments.strip_comments(ruby), ruby);
    }
}
