use std::fmt;

/// The closed set of Clovis types. `Undefined` is the placeholder carried by
/// every expression between parsing and semantic analysis; `UintLiteral` is
/// the symbolic type of integer literals, assignment-compatible with every
/// fixed-width unsigned integer and dissolving into the concrete width when
/// mixed with one.
#[derive(Debug, Clone)]
pub enum Type {
    Undefined,
    UintLiteral,
    U64,
    U32,
    U16,
    U8,
    Bool,
    Ptr(Box<Type>),          // "*" stacked onto the element type
    Array(Box<Type>, usize), // "[" UINT_64_LIT "]" stacked onto the element type
}

impl Type {
    /// Stable identifier, structural for constructed types.
    pub fn type_id(&self) -> String {
        match self {
            Type::Undefined => "UNDEFINED".to_string(),
            Type::UintLiteral => "UINT_LIT".to_string(),
            Type::U64 => "UINT64".to_string(),
            Type::U32 => "UINT32".to_string(),
            Type::U16 => "UINT16".to_string(),
            Type::U8 => "UINT8".to_string(),
            Type::Bool => "BOOL".to_string(),
            Type::Ptr(inner) => format!("PTR({})", inner.type_id()),
            Type::Array(base, len) => format!("ARRAY({}, {})", base.type_id(), len),
        }
    }

    /// Size of the type in bytes.
    pub fn size(&self) -> usize {
        match self {
            Type::Undefined => 8,
            Type::UintLiteral => 8,
            Type::U64 => 8,
            Type::U32 => 4,
            Type::U16 => 2,
            Type::U8 => 1,
            Type::Bool => 1,
            Type::Ptr(_) => 8,
            Type::Array(base, len) => base.size() * len,
        }
    }

    /// The subregister of the accumulator matching the type's width.
    pub fn register(&self) -> &'static str {
        match self {
            Type::Undefined => "rax",
            Type::UintLiteral => "rax",
            Type::U64 => "rax",
            Type::U32 => "eax",
            Type::U16 => "ax",
            Type::U8 => "al",
            Type::Bool => "al",
            Type::Ptr(_) => "rax",
            Type::Array(..) => "rax",
        }
    }

    /// The nasm size specifier for memory operands of this type.
    pub fn asm_size(&self) -> &'static str {
        match self {
            Type::Undefined => "",
            Type::UintLiteral => "QWORD",
            Type::U64 => "QWORD",
            Type::U32 => "DWORD",
            Type::U16 => "WORD",
            Type::U8 => "BYTE",
            Type::Bool => "BYTE",
            Type::Ptr(_) => "QWORD",
            Type::Array(..) => "QWORD",
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(
            self,
            Type::UintLiteral | Type::U64 | Type::U32 | Type::U16 | Type::U8
        )
    }

    /// Type equality with literal compatibility: a fixed-width integer equals
    /// itself and `UintLiteral`, in both directions. Pointer equality is
    /// structural on the payload; arrays compare base types only.
    pub fn equals(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::UintLiteral, o) if o.is_number() => true,
            (s, Type::UintLiteral) if s.is_number() => true,
            (Type::Undefined, Type::Undefined) => true,
            (Type::U64, Type::U64) => true,
            (Type::U32, Type::U32) => true,
            (Type::U16, Type::U16) => true,
            (Type::U8, Type::U8) => true,
            (Type::Bool, Type::Bool) => true,
            (Type::Ptr(a), Type::Ptr(b)) => a.type_id() == b.type_id(),
            (Type::Array(a, _), Type::Array(b, _)) => a.equals(b),
            _ => false,
        }
    }

    /// Whether `op` can be used between this type and `operand`, and the
    /// resulting type if it can.
    pub fn binary_op(&self, op: &str, operand: &Type) -> Option<Type> {
        match self {
            Type::Undefined | Type::Array(..) => None,

            Type::UintLiteral => {
                if !operand.is_number() {
                    return None;
                }
                match op {
                    "+" | "-" | "*" | "/" | "=" => Some(operand.clone()),
                    "==" | "!=" | "<" | "<=" | ">" | ">=" => Some(Type::Bool),
                    _ => None,
                }
            }

            Type::U64 | Type::U32 | Type::U16 | Type::U8 => {
                if !self.equals(operand) {
                    return None;
                }
                match op {
                    "+" | "-" | "*" | "/" | "=" => Some(self.clone()),
                    "==" | "!=" | "<" | "<=" | ">" | ">=" => Some(Type::Bool),
                    _ => None,
                }
            }

            Type::Bool => {
                if !matches!(operand, Type::Bool) {
                    return None;
                }
                match op {
                    "==" | "!=" | "<" | "<=" | ">" | ">=" | "=" => Some(Type::Bool),
                    _ => None,
                }
            }

            Type::Ptr(_) => {
                if !self.equals(operand) {
                    return None;
                }
                match op {
                    "=" => Some(self.clone()),
                    _ => None,
                }
            }
        }
    }

    /// Whether the prefix operator `op` applies to this type, and the
    /// resulting type if it does.
    pub fn unary_op(&self, op: &str) -> Option<Type> {
        match (self, op) {
            (Type::U64 | Type::U32 | Type::U16 | Type::U8 | Type::Bool, "&") => {
                Some(Type::Ptr(Box::new(self.clone())))
            }
            (Type::Ptr(_), "&") => Some(Type::Ptr(Box::new(self.clone()))),
            (Type::Ptr(inner), "*") => Some((**inner).clone()),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_id())
    }
}
