//! Type descriptors for the source dialect.
//!
//! A type carries no values, only a description of what an expression or
//! variable holds. Every type renders to its target-language spelling, and
//! that spelling doubles as the identity of the type: two types are the same
//! exactly when their canonical names are the same text.
//!
//! `Unset` is the placeholder for a type that inference has not fixed yet.
//! It has no spelling, so asking for its canonical name fails with
//! `UndeclaredType`.

use std::fmt::Display;

use crate::errors::errors::ErrorImpl;

#[derive(Debug, Clone)]
pub enum Type {
    /// Awaiting resolution by first use
    Unset,
    Void,
    /// Opaque scalar, spelled exactly as its name (`int`)
    Basic(String),
    Text,
    List(Box<Type>),
}

impl Type {
    pub fn int() -> Self {
        Type::Basic(String::from("int"))
    }

    pub fn list_of(element: Type) -> Self {
        Type::List(Box::new(element))
    }

    /// Target-language spelling, also used as the equality key.
    pub fn canonical_name(&self) -> Result<String, ErrorImpl> {
        match self {
            Type::Unset => Err(ErrorImpl::UndeclaredType { name: None }),
            Type::Void => Ok(String::from("void")),
            Type::Basic(name) => Ok(name.clone()),
            Type::Text => Ok(String::from("std::string")),
            Type::List(element) => Ok(format!("std::vector<{}>", element.canonical_name()?)),
        }
    }

    /// Type produced by iterating or indexing a value of this type.
    pub fn element_type(&self) -> Result<Type, ErrorImpl> {
        match self {
            Type::Text => Ok(Type::Text),
            Type::List(element) => Ok((**element).clone()),
            _ => Err(ErrorImpl::NotIterable {
                type_: self.canonical_name()?,
            }),
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Type::Unset)
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    pub fn is_indexable(&self) -> bool {
        matches!(self, Type::Text | Type::List(_))
    }

    pub fn is_index_assignable(&self) -> bool {
        matches!(self, Type::List(_))
    }

    /// Member-call suffix returning the length of a value of this type.
    pub fn length_accessor(&self) -> Result<&'static str, ErrorImpl> {
        match self {
            Type::Text => Ok(".length()"),
            Type::List(_) => Ok(".size()"),
            _ => Err(ErrorImpl::NoLength {
                type_: self.canonical_name()?,
            }),
        }
    }

    pub fn same_as(&self, other: &Type) -> Result<bool, ErrorImpl> {
        Ok(self.canonical_name()? == other.canonical_name()?)
    }

    pub fn is_named(&self, name: &str) -> Result<bool, ErrorImpl> {
        Ok(self.canonical_name()? == name)
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.canonical_name() {
            Ok(name) => write!(f, "{}", name),
            Err(_) => write!(f, "<unset>"),
        }
    }
}
