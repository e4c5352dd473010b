use clovis::semantics::types::Type;

#[test]
fn sizes_and_asm_metadata() {
    assert_eq!(Type::U64.size(), 8);
    assert_eq!(Type::U32.size(), 4);
    assert_eq!(Type::U16.size(), 2);
    assert_eq!(Type::U8.size(), 1);
    assert_eq!(Type::Bool.size(), 1);
    assert_eq!(Type::Ptr(Box::new(Type::U8)).size(), 8);
    assert_eq!(Type::Array(Box::new(Type::U16), 10).size(), 20);

    assert_eq!(Type::U64.register(), "rax");
    assert_eq!(Type::U32.register(), "eax");
    assert_eq!(Type::U16.register(), "ax");
    assert_eq!(Type::U8.register(), "al");
    assert_eq!(Type::Bool.register(), "al");

    assert_eq!(Type::U64.asm_size(), "QWORD");
    assert_eq!(Type::U32.asm_size(), "DWORD");
    assert_eq!(Type::U16.asm_size(), "WORD");
    assert_eq!(Type::U8.asm_size(), "BYTE");
    assert_eq!(Type::Bool.asm_size(), "BYTE");
    assert_eq!(Type::Undefined.asm_size(), "");
}

#[test]
fn type_ids_are_structural() {
    assert_eq!(Type::U64.type_id(), "UINT64");
    assert_eq!(Type::UintLiteral.type_id(), "UINT_LIT");
    assert_eq!(Type::Ptr(Box::new(Type::Bool)).type_id(), "PTR(BOOL)");
    assert_eq!(
        Type::Array(Box::new(Type::Ptr(Box::new(Type::U8))), 3).type_id(),
        "ARRAY(PTR(UINT8), 3)"
    );
}

#[test]
fn literal_compatibility_is_bidirectional() {
    for fixed in [Type::U64, Type::U32, Type::U16, Type::U8] {
        assert!(fixed.equals(&Type::UintLiteral));
        assert!(Type::UintLiteral.equals(&fixed));
    }
    assert!(!Type::Bool.equals(&Type::UintLiteral));
    assert!(!Type::U64.equals(&Type::U32));
    assert!(!Type::U8.equals(&Type::Bool));
}

#[test]
fn pointer_equality_is_structural() {
    let p64 = Type::Ptr(Box::new(Type::U64));
    let p64b = Type::Ptr(Box::new(Type::U64));
    let p32 = Type::Ptr(Box::new(Type::U32));
    assert!(p64.equals(&p64b));
    assert!(!p64.equals(&p32));
    assert!(!p64.equals(&Type::U64));

    let pp64 = Type::Ptr(Box::new(p64.clone()));
    assert!(!pp64.equals(&p64));
}

#[test]
fn array_equality_compares_bases_only() {
    let a = Type::Array(Box::new(Type::U64), 2);
    let b = Type::Array(Box::new(Type::U64), 9);
    let c = Type::Array(Box::new(Type::U8), 2);
    assert!(a.equals(&b));
    assert!(!a.equals(&c));
}

#[test]
fn arithmetic_between_literal_and_fixed_width() {
    // Mixing a literal into a fixed width yields the fixed width, from
    // either side.
    let r = Type::U64.binary_op("+", &Type::UintLiteral);
    assert_eq!(r.map(|t| t.type_id()), Some("UINT64".to_string()));

    let r = Type::UintLiteral.binary_op("+", &Type::U64);
    assert_eq!(r.map(|t| t.type_id()), Some("UINT64".to_string()));

    let r = Type::UintLiteral.binary_op("*", &Type::UintLiteral);
    assert_eq!(r.map(|t| t.type_id()), Some("UINT_LIT".to_string()));

    let r = Type::U8.binary_op("-", &Type::U8);
    assert_eq!(r.map(|t| t.type_id()), Some("UINT8".to_string()));
}

#[test]
fn comparisons_yield_bool() {
    for op in ["==", "!=", "<", "<=", ">", ">="] {
        let r = Type::U32.binary_op(op, &Type::U32);
        assert_eq!(r.map(|t| t.type_id()), Some("BOOL".to_string()), "op {op}");

        let r = Type::UintLiteral.binary_op(op, &Type::U16);
        assert_eq!(r.map(|t| t.type_id()), Some("BOOL".to_string()), "op {op}");

        let r = Type::Bool.binary_op(op, &Type::Bool);
        assert_eq!(r.map(|t| t.type_id()), Some("BOOL".to_string()), "op {op}");
    }
}

#[test]
fn illegal_operator_uses() {
    assert!(Type::U64.binary_op("+", &Type::U32).is_none());
    assert!(Type::U64.binary_op("+", &Type::Bool).is_none());
    assert!(Type::Bool.binary_op("+", &Type::Bool).is_none());
    assert!(Type::Undefined.binary_op("+", &Type::Undefined).is_none());

    let arr = Type::Array(Box::new(Type::U64), 4);
    assert!(arr.binary_op("+", &arr).is_none());
    assert!(arr.binary_op("=", &arr).is_none());

    let p64 = Type::Ptr(Box::new(Type::U64));
    assert!(p64.binary_op("+", &p64).is_none());
    assert!(p64.binary_op("=", &Type::Ptr(Box::new(Type::U32))).is_none());
}

#[test]
fn pointer_assignment() {
    let p64 = Type::Ptr(Box::new(Type::U64));
    let r = p64.binary_op("=", &Type::Ptr(Box::new(Type::U64)));
    assert_eq!(r.map(|t| t.type_id()), Some("PTR(UINT64)".to_string()));
}

#[test]
fn unary_address_and_deref_round_trip() {
    for ty in [
        Type::U64,
        Type::U32,
        Type::U16,
        Type::U8,
        Type::Bool,
        Type::Ptr(Box::new(Type::U64)),
    ] {
        let ptr = ty.unary_op("&").expect("address-of must apply");
        assert_eq!(ptr.type_id(), format!("PTR({})", ty.type_id()));

        let back = ptr.unary_op("*").expect("deref must apply");
        assert_eq!(back.type_id(), ty.type_id());
    }
}

#[test]
fn unary_rejections() {
    assert!(Type::Undefined.unary_op("&").is_none());
    assert!(Type::UintLiteral.unary_op("&").is_none());
    assert!(Type::Array(Box::new(Type::U64), 4).unary_op("&").is_none());
    assert!(Type::U64.unary_op("*").is_none());
    assert!(Type::U64.unary_op("!").is_none());
    assert!(Type::U64.unary_op("-").is_none());
    assert!(Type::Bool.unary_op("!").is_none());
}
