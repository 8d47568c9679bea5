//! JSON's primitive type tags, used by the `type` keyword and its error messages.
use serde_json::Value;
use std::{fmt, ops::BitOrAssign};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[allow(missing_docs)]
pub enum PrimitiveType {
    Array,
    Boolean,
    Integer,
    Null,
    Number,
    Object,
    String,
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveType::Array => write!(f, "array"),
            PrimitiveType::Boolean => write!(f, "boolean"),
            PrimitiveType::Integer => write!(f, "integer"),
            PrimitiveType::Null => write!(f, "null"),
            PrimitiveType::Number => write!(f, "number"),
            PrimitiveType::Object => write!(f, "object"),
            PrimitiveType::String => write!(f, "string"),
        }
    }
}

impl PrimitiveType {
    pub(crate) fn parse(name: &str) -> Option<PrimitiveType> {
        match name {
            "array" => Some(PrimitiveType::Array),
            "boolean" => Some(PrimitiveType::Boolean),
            "integer" => Some(PrimitiveType::Integer),
            "null" => Some(PrimitiveType::Null),
            "number" => Some(PrimitiveType::Number),
            "object" => Some(PrimitiveType::Object),
            "string" => Some(PrimitiveType::String),
            _ => None,
        }
    }

    /// The primitive type tags that describe `value`. A whole-number `Number` matches
    /// both `Integer` and `Number`.
    pub(crate) fn of(value: &Value) -> PrimitiveTypesBitMap {
        let mut types = PrimitiveTypesBitMap::new();
        match value {
            Value::Array(_) => types.insert(PrimitiveType::Array),
            Value::Bool(_) => types.insert(PrimitiveType::Boolean),
            Value::Null => types.insert(PrimitiveType::Null),
            Value::Object(_) => types.insert(PrimitiveType::Object),
            Value::String(_) => types.insert(PrimitiveType::String),
            Value::Number(n) => {
                types.insert(PrimitiveType::Number);
                if is_mathematical_integer(n) {
                    types.insert(PrimitiveType::Integer);
                }
            }
        }
        types
    }
}

pub(crate) fn is_mathematical_integer(number: &serde_json::Number) -> bool {
    if number.is_u64() || number.is_i64() {
        return true;
    }
    number.as_f64().map_or(false, |value| value.fract() == 0.0)
}

/// A small bitset over `PrimitiveType`, used for the multi-type form of `type`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct PrimitiveTypesBitMap(u8);

impl PrimitiveTypesBitMap {
    pub(crate) const fn new() -> Self {
        PrimitiveTypesBitMap(0)
    }

    const fn bit(type_: PrimitiveType) -> u8 {
        match type_ {
            PrimitiveType::Array => 1 << 0,
            PrimitiveType::Boolean => 1 << 1,
            PrimitiveType::Integer => 1 << 2,
            PrimitiveType::Null => 1 << 3,
            PrimitiveType::Number => 1 << 4,
            PrimitiveType::Object => 1 << 5,
            PrimitiveType::String => 1 << 6,
        }
    }

    pub(crate) fn insert(&mut self, type_: PrimitiveType) {
        self.0 |= Self::bit(type_);
    }

    pub(crate) fn contains(&self, type_: PrimitiveType) -> bool {
        self.0 & Self::bit(type_) != 0
    }

    pub(crate) fn intersects(&self, other: &PrimitiveTypesBitMap) -> bool {
        self.0 & other.0 != 0
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = PrimitiveType> + '_ {
        ALL.iter().copied().filter(move |type_| self.contains(*type_))
    }
}

impl BitOrAssign<PrimitiveType> for PrimitiveTypesBitMap {
    fn bitor_assign(&mut self, rhs: PrimitiveType) {
        self.insert(rhs)
    }
}

impl From<Vec<PrimitiveType>> for PrimitiveTypesBitMap {
    fn from(types: Vec<PrimitiveType>) -> Self {
        let mut map = PrimitiveTypesBitMap::new();
        for type_ in types {
            map.insert(type_);
        }
        map
    }
}

impl<'a> IntoIterator for &'a PrimitiveTypesBitMap {
    type Item = PrimitiveType;
    type IntoIter = Box<dyn Iterator<Item = PrimitiveType> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

const ALL: [PrimitiveType; 7] = [
    PrimitiveType::Array,
    PrimitiveType::Boolean,
    PrimitiveType::Integer,
    PrimitiveType::Null,
    PrimitiveType::Number,
    PrimitiveType::Object,
    PrimitiveType::String,
];
