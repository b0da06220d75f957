//! Type descriptors, builtin selectors and user-type values.

use super::{Heap, Value};
use crate::errors::EvalError;
use std::any::Any;
use std::fmt;

/// Resolves `value.name` for values of a user type.
pub type MemberFn = fn(&Value, &str) -> Result<Value, EvalError>;

/// Builds a value of a user type from a call argument.
pub type ConstructFn = fn(&Value) -> Result<Value, EvalError>;

/// Entry in the fixed builtin function table, addressed by selector.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Builtin {
    Abs = 0,
    Bool = 1,
    Half = 2,
    Hex = 3,
    Str = 4,
    Join = 5,
    Typeof = 6,
}

impl Builtin {
    pub const ALL: [Builtin; 7] = [
        Builtin::Abs,
        Builtin::Bool,
        Builtin::Half,
        Builtin::Hex,
        Builtin::Str,
        Builtin::Join,
        Builtin::Typeof,
    ];

    pub fn from_selector(selector: u8) -> Option<Builtin> {
        Self::ALL.get(usize::from(selector)).copied()
    }

    #[inline]
    pub const fn selector(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Builtin::Abs => "abs",
            Builtin::Bool => "bool",
            Builtin::Half => "half",
            Builtin::Hex => "hex",
            Builtin::Str => "str",
            Builtin::Join => "join",
            Builtin::Typeof => "typeof",
        }
    }
}

/// Built-in types.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BaseType {
    Any,
    Null,
    Boolean,
    Integer,
    Byte,
    String,
    Packed,
    Function,
    Type,
}

impl BaseType {
    pub const fn name(self) -> &'static str {
        match self {
            BaseType::Any => "any",
            BaseType::Null => "null",
            BaseType::Boolean => "boolean",
            BaseType::Integer => "integer",
            BaseType::Byte => "byte",
            BaseType::String => "string",
            BaseType::Packed => "packed",
            BaseType::Function => "function",
            BaseType::Type => "type",
        }
    }

    /// Does a value of this kind belong to the type?
    pub fn accepts(self, v: &Value) -> bool {
        match self {
            BaseType::Any => true,
            BaseType::Null => matches!(v, Value::EmptyList),
            BaseType::Boolean => matches!(v, Value::Bool(_)),
            BaseType::Integer => matches!(v, Value::Number(_)),
            BaseType::Byte => matches!(v, Value::Byte(_)),
            BaseType::String => matches!(v, Value::Str(_)),
            BaseType::Packed => matches!(v, Value::Packed(_)),
            BaseType::Function => v.is_functional(),
            BaseType::Type => v.is_type(),
        }
    }

    /// The type of a scalar value, if it has a builtin one.
    pub fn of(v: &Value) -> Option<BaseType> {
        match v {
            Value::EmptyList => Some(BaseType::Null),
            Value::Bool(_) => Some(BaseType::Boolean),
            Value::Number(_) => Some(BaseType::Integer),
            Value::Byte(_) => Some(BaseType::Byte),
            Value::Str(_) => Some(BaseType::String),
            Value::Packed(_) => Some(BaseType::Packed),
            Value::Function(_) | Value::Builtin(_) => Some(BaseType::Function),
            Value::Type(_) => Some(BaseType::Type),
            _ => None,
        }
    }
}

/// Descriptor of a user-registered type.
pub struct TypeInfo {
    pub name: String,
    pub member: Option<MemberFn>,
    pub construct: Option<ConstructFn>,
}

impl TypeInfo {
    pub fn new(name: impl Into<String>) -> Self {
        TypeInfo {
            name: name.into(),
            member: None,
            construct: None,
        }
    }

    #[must_use]
    pub fn with_member(mut self, member: MemberFn) -> Self {
        self.member = Some(member);
        self
    }

    #[must_use]
    pub fn with_constructor(mut self, construct: ConstructFn) -> Self {
        self.construct = Some(construct);
        self
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("name", &self.name)
            .field("member", &self.member.is_some())
            .field("construct", &self.construct.is_some())
            .finish()
    }
}

/// A first-class type value.
#[derive(Clone, Debug)]
pub enum TypeValue {
    Base(BaseType),
    Named(Heap<TypeInfo>),
}

impl TypeValue {
    pub fn name(&self) -> &str {
        match self {
            TypeValue::Base(base) => base.name(),
            TypeValue::Named(info) => &info.name,
        }
    }
}

impl PartialEq for TypeValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TypeValue::Base(a), TypeValue::Base(b)) => a == b,
            (TypeValue::Named(a), TypeValue::Named(b)) => Heap::ptr_eq(a, b) || a.name == b.name,
            _ => false,
        }
    }
}

/// A value of a user-registered type: its descriptor plus an opaque payload.
#[derive(Clone)]
pub struct OpaqueValue {
    pub type_info: Heap<TypeInfo>,
    pub payload: Heap<dyn Any + Send + Sync>,
}

impl OpaqueValue {
    #[inline]
    pub fn type_name(&self) -> &str {
        &self.type_info.name
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }
}
