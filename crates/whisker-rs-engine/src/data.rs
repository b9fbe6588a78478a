//! The hierarchical data model rendered against a template.
//!
//! Provides [`Data`], the tagged value passed to
//! [`Template::render`](crate::engine::Template::render), along with the
//! HTML-escaping helper applied to escaped variable output.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use whisker_rs_core::error::{WhiskerError, WhiskerResult};

/// A callable value invoked with a tag's raw inner text; its returned text
/// is parsed and rendered in place of the tag.
pub type LambdaFn = Rc<dyn Fn(&str) -> String>;

/// A callable value supplying the source text of an included sub-template.
pub type PartialFn = Rc<dyn Fn() -> String>;

/// A dynamic value in the template data tree.
///
/// Each value exclusively owns its nested values; there is no sharing and no
/// cycles. The renderer only reads the tree, apart from invoking `Lambda`
/// and `Partial` callables, whose side effects belong to the caller.
///
/// # Examples
///
/// ```
/// use whisker_rs_engine::data::Data;
///
/// let mut data = Data::object();
/// data.set("name", "Steve").unwrap();
/// assert_eq!(data.get("name").and_then(Data::as_str), Some("Steve"));
/// assert!(data.get("missing").is_none());
/// ```
#[derive(Clone)]
pub enum Data {
    /// A key-value mapping with unique keys.
    Object(HashMap<String, Data>),
    /// A string value.
    String(String),
    /// An ordered list of values.
    List(Vec<Data>),
    /// A boolean value.
    Bool(bool),
    /// A callable producing template text from a tag's raw inner text.
    Lambda(LambdaFn),
    /// A callable producing the source text of a sub-template.
    Partial(PartialFn),
    /// The moved-from/absent marker, observably distinct from an empty
    /// Object. Falsy, resolves to nothing when rendered.
    Invalid,
}

impl Data {
    /// Creates an empty Object.
    pub fn object() -> Self {
        Self::Object(HashMap::new())
    }

    /// Creates an empty List.
    pub fn list() -> Self {
        Self::List(Vec::new())
    }

    /// Creates a Lambda from a callable taking a tag's raw inner text.
    pub fn lambda(f: impl Fn(&str) -> String + 'static) -> Self {
        Self::Lambda(Rc::new(f))
    }

    /// Creates a Partial from a callable supplying sub-template source text.
    pub fn partial(f: impl Fn() -> String + 'static) -> Self {
        Self::Partial(Rc::new(f))
    }

    // ── Type info ────────────────────────────────────────────────────

    /// Returns `true` if this value is an Object.
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Returns `true` if this value is a String.
    pub const fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// Returns `true` if this value is a List.
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Returns `true` if this value is a Bool.
    pub const fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    /// Returns `true` if this value is a Lambda.
    pub const fn is_lambda(&self) -> bool {
        matches!(self, Self::Lambda(_))
    }

    /// Returns `true` if this value is a Partial.
    pub const fn is_partial(&self) -> bool {
        matches!(self, Self::Partial(_))
    }

    /// Returns `true` if this value is the moved-from/absent marker.
    pub const fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid)
    }

    /// Returns `true` if this value is a List with no elements.
    pub fn is_empty_list(&self) -> bool {
        matches!(self, Self::List(items) if items.is_empty())
    }

    /// Returns `true` if this value is considered "truthy" by sections.
    ///
    /// `Bool(false)`, an empty List, and `Invalid` are falsy; every other
    /// value, including the empty string, is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::List(items) => !items.is_empty(),
            Self::Invalid => false,
            Self::Object(_) | Self::String(_) | Self::Lambda(_) | Self::Partial(_) => true,
        }
    }

    // ── Object data ──────────────────────────────────────────────────

    /// Inserts or overwrites an entry on an Object.
    ///
    /// # Errors
    ///
    /// Returns [`WhiskerError::NotAnObject`] when called on any other
    /// variant.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Self>) -> WhiskerResult<()> {
        let name = name.into();
        match self {
            Self::Object(map) => {
                map.insert(name, value.into());
                Ok(())
            }
            _ => Err(WhiskerError::NotAnObject { name }),
        }
    }

    /// Looks up an entry on an Object. Returns `None` when the key is absent
    /// or the receiver is not an Object.
    pub fn get(&self, name: &str) -> Option<&Self> {
        match self {
            Self::Object(map) => map.get(name),
            _ => None,
        }
    }

    // ── List data ────────────────────────────────────────────────────

    /// Appends a value to a List.
    ///
    /// # Errors
    ///
    /// Returns [`WhiskerError::NotAList`] when called on any other variant.
    pub fn push_back(&mut self, value: impl Into<Self>) -> WhiskerResult<()> {
        match self {
            Self::List(items) => {
                items.push(value.into());
                Ok(())
            }
            _ => Err(WhiskerError::NotAList),
        }
    }

    // ── String data ──────────────────────────────────────────────────

    /// Returns the string contents if this is a String.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Takes the value out, leaving [`Data::Invalid`] behind.
    ///
    /// A consumed value is observably different from a fresh default, which
    /// is an empty Object.
    pub fn take(&mut self) -> Self {
        std::mem::replace(self, Self::Invalid)
    }
}

impl Default for Data {
    fn default() -> Self {
        Self::object()
    }
}

impl fmt::Debug for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object(map) => f.debug_tuple("Object").field(map).finish(),
            Self::String(s) => f.debug_tuple("String").field(s).finish(),
            Self::List(items) => f.debug_tuple("List").field(items).finish(),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Lambda(_) => f.write_str("Lambda(..)"),
            Self::Partial(_) => f.write_str("Partial(..)"),
            Self::Invalid => f.write_str("Invalid"),
        }
    }
}

impl PartialEq for Data {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Object(a), Self::Object(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Lambda(a), Self::Lambda(b)) => Rc::ptr_eq(a, b),
            (Self::Partial(a), Self::Partial(b)) => Rc::ptr_eq(a, b),
            (Self::Invalid, Self::Invalid) => true,
            _ => false,
        }
    }
}

// -- From implementations --

impl From<&str> for Data {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Data {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Data {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<T: Into<Data>> From<Vec<T>> for Data {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Data>> From<HashMap<String, T>> for Data {
    fn from(m: HashMap<String, T>) -> Self {
        Self::Object(m.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl From<serde_json::Value> for Data {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Invalid,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::String(n.to_string()),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(arr) => Self::List(arr.into_iter().map(Data::from).collect()),
            serde_json::Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Data::from(v))).collect())
            }
        }
    }
}

/// Escapes HTML special characters in a string.
///
/// Replaces `&`, `<`, `>`, `"`, and `'` with their HTML entity equivalents.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty_object() {
        let data = Data::default();
        assert!(data.is_object());
        assert!(data.get("anything").is_none());
    }

    #[test]
    fn test_set_and_get() {
        let mut data = Data::object();
        data.set("name", "Steve").unwrap();
        data.set("age", "42").unwrap();
        assert_eq!(data.get("name").and_then(Data::as_str), Some("Steve"));
        assert_eq!(data.get("age").and_then(Data::as_str), Some("42"));
        assert!(data.get("miss").is_none());
    }

    #[test]
    fn test_set_overwrites() {
        let mut data = Data::object();
        data.set("x", "1").unwrap();
        data.set("x", "2").unwrap();
        assert_eq!(data.get("x").and_then(Data::as_str), Some("2"));
    }

    #[test]
    fn test_set_on_non_object_errors() {
        let mut data = Data::from("not an object");
        let err = data.set("x", "1").unwrap_err();
        assert_eq!(
            err,
            WhiskerError::NotAnObject {
                name: "x".to_string()
            }
        );
    }

    #[test]
    fn test_push_back() {
        let mut list = Data::list();
        list.push_back("a").unwrap();
        list.push_back("b").unwrap();
        assert!(matches!(&list, Data::List(items) if items.len() == 2));
    }

    #[test]
    fn test_push_back_on_non_list_errors() {
        let mut data = Data::object();
        assert_eq!(data.push_back("a").unwrap_err(), WhiskerError::NotAList);
    }

    #[test]
    fn test_truthiness() {
        assert!(Data::Bool(true).is_truthy());
        assert!(!Data::Bool(false).is_truthy());
        assert!(Data::from("hello").is_truthy());
        assert!(Data::from("").is_truthy());
        assert!(Data::object().is_truthy());
        assert!(!Data::list().is_truthy());
        assert!(Data::from(vec!["a"]).is_truthy());
        assert!(!Data::Invalid.is_truthy());
        assert!(Data::lambda(|_| String::new()).is_truthy());
    }

    #[test]
    fn test_take_leaves_invalid() {
        let mut data = Data::from(vec!["a", "b"]);
        let taken = data.take();
        assert!(taken.is_list());
        assert!(data.is_invalid());
        // A consumed value is not the same as a fresh default.
        assert_ne!(data, Data::default());
    }

    #[test]
    fn test_is_empty_list() {
        assert!(Data::list().is_empty_list());
        assert!(!Data::from(vec!["a"]).is_empty_list());
        assert!(!Data::object().is_empty_list());
    }

    #[test]
    fn test_from_conversions() {
        assert!(Data::from("s").is_string());
        assert!(Data::from(String::from("s")).is_string());
        assert!(Data::from(true).is_bool());
        assert!(Data::from(vec!["a", "b"]).is_list());
        let mut map = HashMap::new();
        map.insert("k".to_string(), "v");
        assert!(Data::from(map).is_object());
    }

    #[test]
    fn test_from_json() {
        let json = serde_json::json!({
            "name": "Steve",
            "count": 3,
            "active": true,
            "tags": ["a", "b"],
            "missing": null
        });
        let data = Data::from(json);
        assert_eq!(data.get("name").and_then(Data::as_str), Some("Steve"));
        assert_eq!(data.get("count").and_then(Data::as_str), Some("3"));
        assert_eq!(data.get("active"), Some(&Data::Bool(true)));
        assert!(data.get("tags").is_some_and(Data::is_list));
        assert!(data.get("missing").is_some_and(Data::is_invalid));
    }

    #[test]
    fn test_equality() {
        assert_eq!(Data::from("a"), Data::from("a"));
        assert_ne!(Data::from("a"), Data::from("b"));
        assert_eq!(Data::object(), Data::object());
        assert_ne!(Data::object(), Data::Invalid);
        let lambda = Data::lambda(|_| String::new());
        assert_eq!(lambda.clone(), lambda);
        assert_ne!(Data::lambda(|_| String::new()), Data::lambda(|_| String::new()));
    }

    #[test]
    fn test_lambda_invocation_through_clone() {
        let data = Data::lambda(|text| format!("__{text}__"));
        let Data::Lambda(f) = data.clone() else {
            panic!("expected lambda");
        };
        assert_eq!(f("x"), "__x__");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>bold</b>"), "&lt;b&gt;bold&lt;/b&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("\"quotes\""), "&quot;quotes&quot;");
        assert_eq!(escape_html("it's"), "it&apos;s");
        assert_eq!(
            escape_html("\"S\"<br>te&v'e"),
            "&quot;S&quot;&lt;br&gt;te&amp;v&apos;e"
        );
    }
}
