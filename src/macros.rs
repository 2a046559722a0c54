//! Declarative macros for building document trees

/// Creates a [`Tree`](crate::document::Tree) from `key => value` pairs,
/// keeping the order in which they are written.
///
/// ```
/// use freestyle::tree;
///
/// let choices = tree! {
///     "@class" => "string-array",
///     "string" => vec!["linux", "windows"],
/// };
/// assert_eq!(choices.len(), 2);
/// ```
#[macro_export]
macro_rules! tree {
    () => {
        $crate::document::Tree::new()
    };
    ( $( $key:expr => $value:expr ),+ $(,)? ) => {{
        let mut tree = $crate::document::Tree::new();
        $(
            tree.insert($key, $value);
        )+
        tree
    }};
}
