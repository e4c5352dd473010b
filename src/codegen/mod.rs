use crate::grammer::ast::{Expr, Stmt};
use crate::grammer::token::TokenKind;
use crate::semantics::types::Type;

/// Generates x86_64 nasm assembly for an ELF64 `_start` executable.
///
/// Register conventions: `rax` carries expression r-values (comparisons leave
/// their result in `al`), `rbx` holds the second operand of binary
/// operations, `rbp` is fixed to the entry `rsp` so locals are addressed as
/// `[rbp - offset]`, and `rsp` is the allocation cursor for locals.
pub struct Emitter {
    code: String,
    label_count: usize,
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter {
    pub fn new() -> Self {
        let mut e = Emitter {
            code: String::new(),
            label_count: 0,
        };
        e.raw("section .text");
        e.raw("global _start");
        e.raw("");
        e.raw("_start:");
        e.line("mov rbp, rsp");
        e
    }

    /// Append the exit(0) syscall and hand back the finished assembly text.
    pub fn finish(mut self) -> String {
        self.raw("");
        self.line("mov rax, 60");
        self.line("mov rdi, 0");
        self.line("syscall");
        self.code
    }

    fn raw(&mut self, s: &str) {
        self.code.push_str(s);
        self.code.push('\n');
    }

    fn line(&mut self, s: &str) {
        self.code.push_str("    ");
        self.code.push_str(s);
        self.code.push('\n');
    }

    fn place_label(&mut self, label: &str) {
        self.code.push_str(label);
        self.code.push_str(":\n");
    }

    fn next_label(&mut self) -> String {
        let label = format!(".L{:02}", self.label_count);
        self.label_count += 1;
        label
    }

    // ------------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------------

    pub fn emit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl {
                var_type,
                init,
                symbol,
                ..
            } => {
                let symbol = symbol
                    .as_ref()
                    .expect("variable declaration resolved before emission");
                self.line(&format!("sub rsp, {}", var_type.size()));
                if let Some(init) = init {
                    self.emit_expr(init);
                    self.line(&format!(
                        "mov {} [rbp - {}], {}",
                        var_type.asm_size(),
                        symbol.offset,
                        var_type.register()
                    ));
                }
            }

            Stmt::VarAssign { left, right, .. } => {
                self.emit_addr(left);
                self.line("push rax");
                self.emit_expr(right);
                self.line("pop rbx");
                let ty = left.ty();
                self.line(&format!("mov {} [rbx], {}", ty.asm_size(), ty.register()));
            }

            Stmt::Block { stmts, byte_size } => {
                for stmt in stmts {
                    self.emit_stmt(stmt);
                }
                if *byte_size > 0 {
                    self.line(&format!("add rsp, {}", byte_size));
                }
            }

            Stmt::If {
                cond,
                then_stmt,
                else_stmt,
                ..
            } => {
                let false_label = self.next_label();
                let end_label = self.next_label();

                self.emit_expr(cond);
                self.line("cmp al, 1");
                self.line(&format!("jne {false_label}"));
                self.emit_stmt(then_stmt);
                self.line(&format!("jmp {end_label}"));
                self.place_label(&false_label);
                if let Some(else_stmt) = else_stmt {
                    self.emit_stmt(else_stmt);
                }
                self.place_label(&end_label);
            }

            Stmt::Assert { expr, .. } => {
                let ok_label = self.next_label();

                self.emit_expr(expr);
                self.line("cmp al, 1");
                self.line(&format!("je {ok_label}"));
                self.line("mov rax, 60");
                self.line("mov rdi, 1");
                self.line("syscall");
                self.place_label(&ok_label);
            }

            Stmt::Expr(expr) => self.emit_expr(expr),
        }
    }

    // ------------------------------------------------------------------------
    // Expressions: r-values land in rax
    // ------------------------------------------------------------------------

    fn emit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal { token, .. } => {
                let value = match token.kind {
                    TokenKind::TrueLit => "1",
                    TokenKind::FalseLit => "0",
                    _ => token.lexeme.as_str(),
                };
                self.line(&format!("mov rax, {value}"));
            }

            Expr::Ident { ty, symbol, .. } => {
                let symbol = symbol.as_ref().expect("identifier resolved before emission");
                self.line("xor rax, rax");
                self.line(&format!(
                    "mov {}, {} [rbp - {}]",
                    ty.register(),
                    ty.asm_size(),
                    symbol.offset
                ));
            }

            Expr::Binary {
                left, op, right, ..
            } => {
                self.emit_expr(right);
                self.line("push rax");
                self.emit_expr(left);
                self.line("pop rbx");

                match op.lexeme.as_str() {
                    "+" => self.line("add rax, rbx"),
                    "-" => self.line("sub rax, rbx"),
                    "*" => self.line("mul rbx"),
                    "/" => self.line("div rbx"),
                    "==" | "!=" | "<" | "<=" | ">" | ">=" => {
                        self.line("cmp rax, rbx");
                        let cc = match op.lexeme.as_str() {
                            "==" => "e",
                            "!=" => "ne",
                            "<" => "l",
                            "<=" => "le",
                            ">" => "g",
                            _ => "ge",
                        };
                        self.line(&format!("set{cc} al"));
                    }
                    other => panic!("binary operator '{other}' reached code generation"),
                }
            }

            Expr::Prefix { op, right, .. } => {
                self.emit_expr(right);
                match op.lexeme.as_str() {
                    "!" => self.line("xor rax, 1"),
                    "-" => self.line("neg rax"),
                    other => panic!("prefix operator '{other}' reached code generation"),
                }
            }

            Expr::Postfix { op, .. } => {
                panic!("postfix operator '{}' reached code generation", op.lexeme)
            }

            Expr::Deref { ty, right, .. } => {
                self.emit_expr(right);
                self.line(&format!("mov {}, {} [rax]", ty.register(), ty.asm_size()));
            }

            Expr::Reference { right, .. } => self.emit_addr(right),

            Expr::Group { inner, .. } => self.emit_expr(inner),

            Expr::ArrayAccess { ty, .. } => {
                self.emit_addr(expr);
                self.line(&format!("mov {}, {} [rax]", ty.register(), ty.asm_size()));
            }
        }
    }

    // ------------------------------------------------------------------------
    // Addresses: the effective address of an addressable expression lands
    // in rax
    // ------------------------------------------------------------------------

    fn emit_addr(&mut self, expr: &Expr) {
        match expr {
            Expr::Ident { symbol, .. } => {
                let symbol = symbol.as_ref().expect("identifier resolved before emission");
                self.line(&format!("lea rax, [rbp - {}]", symbol.offset));
            }

            // The pointer value is the target address.
            Expr::Deref { right, .. } => self.emit_expr(right),

            Expr::Group { inner, .. } => self.emit_addr(inner),

            Expr::Reference { .. } => {
                panic!("cannot take the address of an address expression")
            }

            Expr::ArrayAccess {
                ty, left, index, ..
            } => {
                self.emit_expr(index);
                self.line(&format!("mov rbx, {}", ty.size()));
                self.line("mul rbx");
                self.line("push rax");
                match left.ty() {
                    Type::Ptr(_) => self.emit_expr(left),
                    _ => self.emit_addr(left),
                }
                self.line("pop rbx");
                self.line("add rax, rbx");
            }

            _ => panic!("expression without an address reached address emission"),
        }
    }
}
