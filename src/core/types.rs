//! Nominal type names and type descriptors.
//!
//! A [`TypeDescriptor`] is what the host type oracle hands the naming core:
//! a single named type, or a union/intersection of other descriptors. The
//! non-named members (`null`, scalars, iterables) are carried so that rules
//! can look through them, but they never contribute candidate names.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::errors::{NomenError, Result};

/// Namespace separator used in fully-qualified type names.
pub const NAMESPACE_SEPARATOR: char = '\\';

/// A fully-qualified nominal type name.
///
/// Leading namespace separators are dropped on construction, so `\App\User`
/// and `App\User` are the same name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TypeName(String);

impl TypeName {
    /// Create a type name from any string-like value
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim_start_matches(NAMESPACE_SEPARATOR).to_string())
    }

    /// The full name, without a leading separator
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The segment after the last namespace separator
    pub fn short_name(&self) -> &str {
        short_name_of(&self.0)
    }

    /// Whether the name is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Segment of `name` after its last namespace separator.
pub fn short_name_of(name: &str) -> &str {
    match name.rfind(NAMESPACE_SEPARATOR) {
        Some(position) => &name[position + 1..],
        None => name,
    }
}

impl From<String> for TypeName {
    fn from(value: String) -> Self {
        if value.starts_with(NAMESPACE_SEPARATOR) {
            Self::new(value)
        } else {
            Self(value)
        }
    }
}

impl From<&str> for TypeName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<TypeName> for String {
    fn from(value: TypeName) -> Self {
        value.0
    }
}

impl AsRef<str> for TypeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named member of a type descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedType {
    /// Fully-qualified name
    pub name: TypeName,
    /// Whether the oracle flagged this type as builtin/internal
    #[serde(default)]
    pub builtin: bool,
}

impl NamedType {
    /// Create a user-land named type
    pub fn new(name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            builtin: false,
        }
    }
}

/// Type description produced by the type oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDescriptor {
    /// A single nominal type
    Named(NamedType),
    /// `A|B|...`
    Union {
        /// Union members
        members: Vec<TypeDescriptor>,
    },
    /// `A&B&...`
    Intersection {
        /// Intersection members
        members: Vec<TypeDescriptor>,
    },
    /// An array or other iterable with a known value type
    Iterable {
        /// Key type, when declared
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key: Option<Box<TypeDescriptor>>,
        /// Value type
        value: Box<TypeDescriptor>,
    },
    /// `null`
    Null,
    /// Any scalar or pseudo type (`int`, `string`, `false`, `mixed`, ...)
    Scalar {
        /// Keyword as written
        name: String,
    },
}

impl TypeDescriptor {
    /// A user-land named type
    pub fn named(name: impl Into<TypeName>) -> Self {
        Self::Named(NamedType::new(name))
    }

    /// A named type flagged as builtin/internal
    pub fn builtin(name: impl Into<TypeName>) -> Self {
        Self::Named(NamedType {
            name: name.into(),
            builtin: true,
        })
    }

    /// Union of the given members
    pub fn union(members: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        Self::Union {
            members: members.into_iter().collect(),
        }
    }

    /// Intersection of the given members
    pub fn intersection(members: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        Self::Intersection {
            members: members.into_iter().collect(),
        }
    }

    /// Iterable of `value` with no declared key type
    pub fn iterable(value: TypeDescriptor) -> Self {
        Self::Iterable {
            key: None,
            value: Box::new(value),
        }
    }

    /// Iterable of `value` keyed by `key`
    pub fn iterable_with_key(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        Self::Iterable {
            key: Some(Box::new(key)),
            value: Box::new(value),
        }
    }

    /// A scalar keyword type
    pub fn scalar(name: impl Into<String>) -> Self {
        Self::Scalar { name: name.into() }
    }

    /// Parse a PHP-doc style type expression such as `?Foo`, `Foo|null` or `array<int, Foo>`.
    pub fn parse(input: &str) -> Result<Self> {
        TypeExpressionParser::new(input).parse()
    }

    /// Named members of this type, flattened through unions and intersections.
    ///
    /// Order is first-seen; a name appearing more than once is reported once.
    /// Members of iterables are not included: an array of `Foo` is not a `Foo`.
    pub fn named_members(&self) -> Vec<&NamedType> {
        let mut members: Vec<&NamedType> = Vec::new();
        self.collect_named_members(&mut members);
        members
    }

    fn collect_named_members<'a>(&'a self, members: &mut Vec<&'a NamedType>) {
        match self {
            Self::Named(named) => {
                if !members.iter().any(|seen| seen.name == named.name) {
                    members.push(named);
                }
            }
            Self::Union { members: inner } | Self::Intersection { members: inner } => {
                for member in inner {
                    member.collect_named_members(members);
                }
            }
            Self::Iterable { .. } | Self::Null | Self::Scalar { .. } => {}
        }
    }

    /// Whether the type is certainly iterable
    pub fn is_iterable(&self) -> bool {
        self.iterable_value_type().is_some()
    }

    /// Value type produced when iterating, if the type is certainly iterable.
    ///
    /// A union is iterable only when every member is; its value type is the
    /// union of the members' value types. An intersection is iterable when
    /// any member is.
    ///
    /// Named types are never iterable here, including `Traversable`
    /// implementors and generic classes such as `Collection<int, Foo>`: the
    /// parser keeps only the class name. A host that knows what a class
    /// yields should describe it as [`TypeDescriptor::Iterable`] instead.
    pub fn iterable_value_type(&self) -> Option<TypeDescriptor> {
        match self {
            Self::Iterable { value, .. } => Some((**value).clone()),
            Self::Union { members } => {
                let mut values: Vec<TypeDescriptor> = Vec::with_capacity(members.len());
                for member in members {
                    let value = member.iterable_value_type()?;
                    if !values.contains(&value) {
                        values.push(value);
                    }
                }
                match values.len() {
                    0 => None,
                    1 => values.pop(),
                    _ => Some(Self::Union { members: values }),
                }
            }
            Self::Intersection { members } => {
                members.iter().find_map(TypeDescriptor::iterable_value_type)
            }
            Self::Named(_) | Self::Null | Self::Scalar { .. } => None,
        }
    }
}

impl From<NamedType> for TypeDescriptor {
    fn from(value: NamedType) -> Self {
        Self::Named(value)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(named) => write!(f, "{}", named.name),
            Self::Union { members } => write_joined(f, members, "|"),
            Self::Intersection { members } => write_joined(f, members, "&"),
            Self::Iterable { key: Some(key), value } => write!(f, "array<{key}, {value}>"),
            Self::Iterable { key: None, value } => write!(f, "array<{value}>"),
            Self::Null => f.write_str("null"),
            Self::Scalar { name } => f.write_str(name),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, members: &[TypeDescriptor], separator: &str) -> fmt::Result {
    for (index, member) in members.iter().enumerate() {
        if index > 0 {
            f.write_str(separator)?;
        }
        let nested = matches!(
            member,
            TypeDescriptor::Union { .. } | TypeDescriptor::Intersection { .. }
        );
        if nested {
            write!(f, "({member})")?;
        } else {
            write!(f, "{member}")?;
        }
    }
    Ok(())
}

/// Keywords that name iterable pseudo types.
const ITERABLE_KEYWORDS: &[&str] = &[
    "array",
    "iterable",
    "list",
    "non-empty-array",
    "non-empty-list",
];

/// Keywords that name scalar or otherwise non-nominal types.
const SCALAR_KEYWORDS: &[&str] = &[
    "int",
    "integer",
    "float",
    "double",
    "string",
    "bool",
    "boolean",
    "true",
    "false",
    "mixed",
    "void",
    "never",
    "object",
    "callable",
    "resource",
    "scalar",
    "numeric",
    "array-key",
    "positive-int",
    "negative-int",
    "non-empty-string",
    "numeric-string",
    "class-string",
    "self",
    "static",
];

/// Deepest nesting a type expression may have.
///
/// Applies both to parser recursion (parentheses, `?`, generic arguments) and
/// to the height of the resulting descriptor (unions, `[]` suffixes).
pub const MAX_NESTING_DEPTH: usize = 256;

/// A parsed descriptor together with its nesting height.
struct Parsed {
    descriptor: TypeDescriptor,
    height: usize,
}

impl Parsed {
    fn leaf(descriptor: TypeDescriptor) -> Self {
        Self { descriptor, height: 1 }
    }
}

/// Recursive-descent parser over a type expression.
///
/// ```text
/// union   := inter ('|' inter)*
/// inter   := postfix ('&' postfix)*
/// postfix := primary ('[' ']')*
/// primary := '?' postfix | '(' union ')' | ident ('<' union (',' union)? '>')?
/// ```
struct TypeExpressionParser<'a> {
    input: &'a str,
    bytes: &'a [u8],
    position: usize,
    depth: usize,
}

impl<'a> TypeExpressionParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            position: 0,
            depth: 0,
        }
    }

    fn parse(mut self) -> Result<TypeDescriptor> {
        let parsed = self.parse_union()?;
        self.skip_whitespace();
        if self.position < self.bytes.len() {
            return Err(self.error(format!("unexpected `{}`", self.bytes[self.position] as char)));
        }
        Ok(parsed.descriptor)
    }

    fn error(&self, message: impl Into<String>) -> NomenError {
        NomenError::parse(message, self.input, self.position)
    }

    fn nested_too_deeply(&self) -> NomenError {
        self.error(format!("type expression nested too deeply (limit {MAX_NESTING_DEPTH})"))
    }

    /// Wrap `descriptor` as a node one level above its tallest child.
    fn nest(&self, descriptor: TypeDescriptor, child_height: usize) -> Result<Parsed> {
        let height = child_height + 1;
        if height > MAX_NESTING_DEPTH {
            return Err(self.nested_too_deeply());
        }
        Ok(Parsed { descriptor, height })
    }

    fn skip_whitespace(&mut self) {
        while self.position < self.bytes.len() && self.bytes[self.position].is_ascii_whitespace() {
            self.position += 1;
        }
    }

    fn peek(&mut self) -> Option<u8> {
        self.skip_whitespace();
        self.bytes.get(self.position).copied()
    }

    fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: u8) -> Result<()> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.error(format!("expected `{}`", expected as char)))
        }
    }

    fn parse_union(&mut self) -> Result<Parsed> {
        let mut members = vec![self.parse_intersection()?];
        while self.eat(b'|') {
            members.push(self.parse_intersection()?);
        }
        self.combine(members, |members| TypeDescriptor::Union { members })
    }

    fn parse_intersection(&mut self) -> Result<Parsed> {
        let mut members = vec![self.parse_postfix()?];
        while self.eat(b'&') {
            members.push(self.parse_postfix()?);
        }
        self.combine(members, |members| TypeDescriptor::Intersection { members })
    }

    fn combine(
        &self,
        mut members: Vec<Parsed>,
        build: fn(Vec<TypeDescriptor>) -> TypeDescriptor,
    ) -> Result<Parsed> {
        if members.len() == 1 {
            return Ok(members.remove(0));
        }
        let child_height = members.iter().map(|member| member.height).max().unwrap_or(0);
        let descriptors = members.into_iter().map(|member| member.descriptor).collect();
        self.nest(build(descriptors), child_height)
    }

    fn parse_postfix(&mut self) -> Result<Parsed> {
        let mut parsed = self.parse_primary()?;
        while self.eat(b'[') {
            self.expect(b']')?;
            parsed = self.nest(TypeDescriptor::iterable(parsed.descriptor), parsed.height)?;
        }
        Ok(parsed)
    }

    fn parse_primary(&mut self) -> Result<Parsed> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(self.nested_too_deeply());
        }
        let parsed = self.parse_primary_at_depth();
        self.depth -= 1;
        parsed
    }

    fn parse_primary_at_depth(&mut self) -> Result<Parsed> {
        match self.peek() {
            None => Err(self.error("unexpected end of type expression")),
            Some(b'?') => {
                self.position += 1;
                let inner = self.parse_postfix()?;
                self.nest(TypeDescriptor::union([inner.descriptor, TypeDescriptor::Null]), inner.height)
            }
            Some(b'(') => {
                self.position += 1;
                let inner = self.parse_union()?;
                self.expect(b')')?;
                Ok(inner)
            }
            Some(byte) if is_identifier_start(byte) => self.parse_identifier_type(),
            Some(byte) => Err(self.error(format!("unexpected `{}`", byte as char))),
        }
    }

    fn parse_identifier_type(&mut self) -> Result<Parsed> {
        let start = self.position;
        while self.position < self.bytes.len() && is_identifier_continue(self.bytes[self.position]) {
            self.position += 1;
        }
        let identifier = &self.input[start..self.position];
        let trimmed = identifier.trim_start_matches(NAMESPACE_SEPARATOR);
        if trimmed.is_empty() || trimmed.ends_with(NAMESPACE_SEPARATOR) {
            return Err(NomenError::parse(
                format!("invalid type name `{identifier}`"),
                self.input,
                start,
            ));
        }

        let arguments = if self.eat(b'<') {
            let mut arguments = vec![self.parse_union()?];
            while self.eat(b',') {
                arguments.push(self.parse_union()?);
            }
            self.expect(b'>')?;
            arguments
        } else {
            Vec::new()
        };

        let keyword = trimmed.to_ascii_lowercase();
        if ITERABLE_KEYWORDS.contains(&keyword.as_str()) {
            let mut arguments = arguments.into_iter();
            return match (arguments.next(), arguments.next(), arguments.next()) {
                (None, _, _) => self.nest(TypeDescriptor::iterable(TypeDescriptor::scalar("mixed")), 1),
                (Some(value), None, _) => self.nest(TypeDescriptor::iterable(value.descriptor), value.height),
                (Some(key), Some(value), None) => {
                    let child_height = key.height.max(value.height);
                    self.nest(
                        TypeDescriptor::iterable_with_key(key.descriptor, value.descriptor),
                        child_height,
                    )
                }
                (Some(_), Some(_), Some(_)) => Err(NomenError::parse(
                    format!("`{trimmed}` takes at most two type arguments"),
                    self.input,
                    start,
                )),
            };
        }
        if keyword == "null" {
            return Ok(Parsed::leaf(TypeDescriptor::Null));
        }
        if SCALAR_KEYWORDS.contains(&keyword.as_str()) {
            return Ok(Parsed::leaf(TypeDescriptor::scalar(trimmed)));
        }

        // Generic arguments on a class (`Collection<Foo>`) do not change its name.
        Ok(Parsed::leaf(TypeDescriptor::named(trimmed)))
    }
}

fn is_identifier_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_' || byte == b'\\'
}

fn is_identifier_continue(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'\\' | b'-')
}
