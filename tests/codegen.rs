use clovis::compile;

const HEADER: &str = "section .text\nglobal _start\n\n_start:\n    mov rbp, rsp\n";
const EXIT_OK: &str = "    mov rax, 60\n    mov rdi, 0\n    syscall\n";

fn compile_ok(code: &str) -> String {
    let asm = compile(code).unwrap_or_else(|errors| panic!("compile errors: {errors:?}"));
    println!("{asm}");

    // Every successful compile honors the global assembly contract.
    assert!(asm.starts_with(HEADER), "missing prologue:\n{asm}");
    assert_eq!(asm.matches("_start:").count(), 1);
    assert!(asm.ends_with(EXIT_OK), "missing exit sequence:\n{asm}");

    asm
}

#[test]
fn empty_program() {
    let asm = compile_ok("");
    assert_eq!(asm, format!("{HEADER}\n{EXIT_OK}"));
}

#[test]
fn literal_declaration_and_assert() {
    let asm = compile_ok("uint64 x = 7;\nassert x == 7;");

    assert!(asm.contains("    sub rsp, 8\n"));
    assert!(asm.contains("    mov rax, 7\n"));
    assert!(asm.contains("    mov QWORD [rbp - 8], rax\n"));

    // assert: compare, skip the exit(1) on success
    assert!(asm.contains(
        "    cmp al, 1\n    je .L00\n    mov rax, 60\n    mov rdi, 1\n    syscall\n.L00:\n"
    ));
}

#[test]
fn ident_rvalue_clears_the_accumulator() {
    let asm = compile_ok("uint64 x = 7;\nuint64 y = x;");
    assert!(asm.contains("    xor rax, rax\n    mov rax, QWORD [rbp - 8]\n"));
    assert!(asm.contains("    mov QWORD [rbp - 16], rax\n"));
}

#[test]
fn narrow_widths_use_subregisters() {
    let asm = compile_ok("uint8 a = 3;\nuint8 b = a + 2;\nassert b == 5;");

    assert!(asm.contains("    sub rsp, 1\n"));
    assert!(asm.contains("    mov BYTE [rbp - 1], al\n"));
    assert!(asm.contains("    mov BYTE [rbp - 2], al\n"));
    assert!(asm.contains("    xor rax, rax\n    mov al, BYTE [rbp - 1]\n"));
}

#[test]
fn binary_evaluates_right_then_left() {
    let asm = compile_ok("uint64 x = 1 + 2;");
    assert!(asm.contains(
        "    mov rax, 2\n    push rax\n    mov rax, 1\n    pop rbx\n    add rax, rbx\n"
    ));
}

#[test]
fn arithmetic_operator_selection() {
    let asm = compile_ok("uint64 x = 8 / 2;\nuint64 y = 3 * 3;\nuint64 z = 9 - 4;");
    assert!(asm.contains("    div rbx\n"));
    assert!(asm.contains("    mul rbx\n"));
    assert!(asm.contains("    sub rax, rbx\n"));
}

#[test]
fn comparison_condition_codes() {
    let asm = compile_ok(
        "uint64 x = 1;\nbool a = x == 1;\nbool b = x != 1;\nbool c = x < 1;\nbool d = x <= 1;\nbool e = x > 1;\nbool f = x >= 1;",
    );
    for cc in ["sete al", "setne al", "setl al", "setle al", "setg al", "setge al"] {
        assert!(asm.contains(cc), "missing {cc}:\n{asm}");
    }
    assert!(asm.contains("    cmp rax, rbx\n"));
}

#[test]
fn bool_literals_become_numbers() {
    let asm = compile_ok("bool t = true;\nbool f = false;");
    assert!(asm.contains("    mov rax, 1\n    mov BYTE [rbp - 1], al\n"));
    assert!(asm.contains("    mov rax, 0\n    mov BYTE [rbp - 2], al\n"));
}

#[test]
fn if_else_label_scheme() {
    let asm = compile_ok("if true { } else { }\nif false { }");

    // First if: false branch label then end label, both placed once.
    assert!(asm.contains("    cmp al, 1\n    jne .L00\n"));
    assert!(asm.contains("    jmp .L01\n.L00:\n.L01:\n"));

    // Second if allocates fresh labels.
    assert!(asm.contains("    jne .L02\n"));
    assert_eq!(asm.matches(".L00:").count(), 1);
    assert_eq!(asm.matches(".L01:").count(), 1);
}

#[test]
fn assignment_writes_through_the_address() {
    let asm = compile_ok("uint64 x = 1;\nx = 5;");
    assert!(asm.contains(
        "    lea rax, [rbp - 8]\n    push rax\n    mov rax, 5\n    pop rbx\n    mov QWORD [rbx], rax\n"
    ));
}

#[test]
fn pointer_flow() {
    let asm = compile_ok("uint64 x = 9;\nuint64* p = &x;\nassert *p == 9;");

    // &x materializes the address, stored into p.
    assert!(asm.contains("    lea rax, [rbp - 8]\n    mov QWORD [rbp - 16], rax\n"));
    // *p loads through the pointer left in rax.
    assert!(asm.contains("    mov rax, QWORD [rbp - 16]\n"));
    assert!(asm.contains("    mov rax, QWORD [rax]\n"));
}

#[test]
fn assignment_through_a_deref() {
    let asm = compile_ok("uint64 x = 1;\nuint64* p = &x;\n*p = 5;");
    assert!(asm.contains(
        "    xor rax, rax\n    mov rax, QWORD [rbp - 16]\n    push rax\n    mov rax, 5\n    pop rbx\n    mov QWORD [rbx], rax\n"
    ));
}

#[test]
fn blocks_reclaim_their_locals() {
    let asm = compile_ok("{ uint64 a = 1;\n  uint8 b = 2; }");
    assert!(asm.contains("    sub rsp, 8\n"));
    assert!(asm.contains("    sub rsp, 1\n"));
    assert!(asm.contains("    add rsp, 9\n"));
}

#[test]
fn empty_block_reclaims_nothing() {
    let asm = compile_ok("{ }");
    assert!(!asm.contains("add rsp"));
}

#[test]
fn array_element_addressing() {
    let asm = compile_ok("uint64[4] arr;\narr[2] = 7;");

    assert!(asm.contains("    sub rsp, 32\n"));
    // index * element size, then base + offset
    assert!(asm.contains(
        "    mov rax, 2\n    mov rbx, 8\n    mul rbx\n    push rax\n    lea rax, [rbp - 32]\n    pop rbx\n    add rax, rbx\n"
    ));
    assert!(asm.contains("    mov QWORD [rbx], rax\n"));
}

#[test]
fn array_element_load() {
    let asm = compile_ok("uint8[4] arr;\narr[1] = 3;\nuint8 x = arr[1];");
    // element address computed, then a BYTE load through it
    assert!(asm.contains("    mov rbx, 1\n"));
    assert!(asm.contains("    mov al, BYTE [rax]\n"));
}

#[test]
fn pointer_base_indexing_uses_the_pointer_value() {
    let asm = compile_ok("uint64 x = 5;\nuint64* p = &x;\nuint64 y = p[0];");
    // The base is a pointer r-value, not a lea of the pointer's own slot.
    assert!(asm.contains(
        "    mov rax, 0\n    mov rbx, 8\n    mul rbx\n    push rax\n    xor rax, rax\n    mov rax, QWORD [rbp - 16]\n    pop rbx\n    add rax, rbx\n"
    ));
}

#[test]
fn labels_are_unique_across_statements() {
    let asm = compile_ok("assert true;\nassert true;\nif true { }");
    assert!(asm.contains(".L00:"));
    assert!(asm.contains(".L01:"));
    assert!(asm.contains(".L02:"));
    assert!(asm.contains(".L03:"));
    for label in [".L00:", ".L01:", ".L02:", ".L03:"] {
        assert_eq!(asm.matches(label).count(), 1, "label {label} reused");
    }
}

#[test]
#[should_panic(expected = "address of an address")]
fn address_of_address_aborts() {
    let _ = compile("uint64 x = 1;\nuint64** q = &&x;");
}

#[test]
fn errors_block_code_generation() {
    let errors = compile("uint64 x = 1;\nuint64 x = 2;").unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].to_string().contains("Redeclaration of symbol 'x'"));

    let errors = compile("bool b = 1 + 2;").unwrap_err();
    assert!(errors[0]
        .to_string()
        .contains("Declared type BOOL and initialized value type UINT_LIT do not match"));
}

#[test]
fn lex_parse_and_semantic_errors_accumulate() {
    let errors = compile("uint64 # = 1;\nbool b = 2;\ny = 3;").unwrap_err();
    // one lexical, one parse (the mangled declaration), one semantic for b,
    // one semantic for y
    assert_eq!(errors.len(), 4);
}
