#[cfg(test)]
mod parser_tests {
    use lox_syntax as lox;

    use lox::ast_printer::AstPrinter;
    use lox::error::{Diagnostics, LoxError, Reporter};
    use lox::expr::{Expr, LiteralValue};
    use lox::parser::Parser;
    use lox::scanner::scan;
    use lox::stmt::Stmt;
    use lox::token::{Token, TokenType};
    use pretty_assertions::assert_eq;

    fn parse_program(source: &str) -> (Vec<Stmt>, Vec<LoxError>) {
        let mut diagnostics = Diagnostics::new();
        let tokens = scan(source, &mut diagnostics);
        let program = Parser::new(&tokens, &mut diagnostics).parse();

        (program, diagnostics.into_errors())
    }

    fn parse_expr(source: &str) -> (Option<Expr>, Vec<LoxError>) {
        let mut diagnostics = Diagnostics::new();
        let tokens = scan(source, &mut diagnostics);
        let expr = Parser::new(&tokens, &mut diagnostics).parse_expression();

        (expr, diagnostics.into_errors())
    }

    /// Parses cleanly and renders each statement in prefix form.
    fn assert_program(source: &str, expected: &[&str]) {
        let (program, errors) = parse_program(source);

        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);

        let printed: Vec<String> = program.iter().map(AstPrinter::print_stmt).collect();
        assert_eq!(printed, expected);
    }

    fn messages(errors: &[LoxError]) -> Vec<String> {
        errors.iter().map(ToString::to_string).collect()
    }

    fn num(n: f64) -> Box<Expr> {
        Box::new(Expr::literal(LiteralValue::Number(n)))
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let (expr, errors) = parse_expr("1 + 2 * 3");

        assert!(errors.is_empty());
        assert_eq!(
            expr.unwrap(),
            Expr::Binary {
                left: num(1.0),
                operator: Token::new(TokenType::PLUS, "+", 1),
                right: Box::new(Expr::Binary {
                    left: num(2.0),
                    operator: Token::new(TokenType::STAR, "*", 1),
                    right: num(3.0),
                }),
            }
        );
    }

    #[test]
    fn negative_literal_is_a_unary_node() {
        let (expr, _) = parse_expr("-1");

        assert_eq!(
            expr.unwrap(),
            Expr::Unary {
                operator: Token::new(TokenType::MINUS, "-", 1),
                right: num(1.0),
            }
        );
    }

    #[test]
    fn binary_operators_fold_left() {
        assert_program(
            "1 - 2 - 3; 8 / 4 * 2; 1 == 2 != 3;",
            &[
                "(; (- (- 1.0 2.0) 3.0))",
                "(; (* (/ 8.0 4.0) 2.0))",
                "(; (!= (== 1.0 2.0) 3.0))",
            ],
        );
    }

    #[test]
    fn logical_operators_and_unary() {
        assert_program(
            "a or b and c; !!x; -(1 + 2);",
            &[
                "(; (or a (and b c)))",
                "(; (! (! x)))",
                "(; (- (group (+ 1.0 2.0))))",
            ],
        );
    }

    #[test]
    fn assignment_is_right_associative() {
        assert_program("a = b = 1;", &["(; (= a (= b 1.0)))"]);
    }

    #[test]
    fn invalid_assignment_target_is_reported_but_parsed() {
        let (program, errors) = parse_program("a + b = c; print 1;");

        assert_eq!(
            messages(&errors),
            vec!["[line 1] Error at '=': Invalid assignment target."]
        );

        let printed: Vec<String> = program.iter().map(AstPrinter::print_stmt).collect();
        assert_eq!(printed, vec!["(; (+ a b))", "(print 1.0)"]);
    }

    #[test]
    fn chained_comparison_is_a_syntax_error() {
        let (program, errors) = parse_program("a < b < c;\nprint 1;");

        assert_eq!(
            messages(&errors),
            vec!["[line 1] Error at '<': Expect ';' after expression."]
        );
        assert_eq!(program.len(), 1);
        assert_eq!(AstPrinter::print_stmt(&program[0]), "(print 1.0)");
    }

    #[test]
    fn single_comparison_parses() {
        assert_program("a <= b == c > d;", &["(; (== (<= a b) (> c d)))"]);
    }

    #[test]
    fn calls_chain() {
        assert_program(
            "f(1)(2, 3)(); g();",
            &["(; (call (call (call f 1.0) 2.0 3.0)))", "(; (call g))"],
        );
    }

    #[test]
    fn too_many_arguments_is_advisory() {
        let args: Vec<String> = (0..256).map(|i| i.to_string()).collect();
        let source = format!("f({});", args.join(", "));

        let (program, errors) = parse_program(&source);

        assert_eq!(errors.len(), 1);
        assert!(messages(&errors)[0].ends_with("Can't have more than 255 arguments."));

        match &program[..] {
            [Stmt::Expression {
                expression: Expr::Call { arguments, .. },
            }] => assert_eq!(arguments.len(), 256),
            other => panic!("unexpected program: {:?}", other),
        }
    }

    #[test]
    fn too_many_parameters_is_advisory() {
        let params: Vec<String> = (0..256).map(|i| format!("p{i}")).collect();
        let source = format!("fun f({}) {{}}", params.join(", "));

        let (program, errors) = parse_program(&source);

        assert_eq!(errors.len(), 1);
        assert!(messages(&errors)[0].ends_with("Can't have more than 255 parameters."));

        match &program[..] {
            [Stmt::Function(function)] => assert_eq!(function.params.len(), 256),
            other => panic!("unexpected program: {:?}", other),
        }
    }

    #[test]
    fn declarations_and_statements() {
        assert_program(
            "var a; var b = \"hi\"; { print a; } while (b) b = nil; \
             if (a) print 1; else print 2; fun add(x, y) { return x + y; } \
             fun noop() { return; }",
            &[
                "(var a)",
                "(var b hi)",
                "(block (print a))",
                "(while b (; (= b nil)))",
                "(if a (print 1.0) (print 2.0))",
                "(fun add (x y) (return (+ x y)))",
                "(fun noop () (return))",
            ],
        );
    }

    #[test]
    fn else_binds_to_nearest_if() {
        assert_program(
            "if (a) if (b) print 1; else print 2;",
            &["(if a (if b (print 1.0) (print 2.0)))"],
        );
    }

    #[test]
    fn for_loop_desugars_to_block_and_while() {
        let (program, errors) = parse_program("for (var i = 0; i < 3; i = i + 1) print i;");

        assert!(errors.is_empty());
        assert_eq!(program.len(), 1);

        let Stmt::Block { statements } = &program[0] else {
            panic!("expected outer block, got {:?}", program[0]);
        };
        assert_eq!(statements.len(), 2);
        assert!(matches!(statements[0], Stmt::Var { .. }));

        let Stmt::While { condition, body } = &statements[1] else {
            panic!("expected while, got {:?}", statements[1]);
        };
        assert_eq!(AstPrinter::print(condition), "(< i 3.0)");

        let Stmt::Block { statements: inner } = body.as_ref() else {
            panic!("expected loop body block, got {:?}", body);
        };
        assert!(matches!(inner[0], Stmt::Print { .. }));
        assert_eq!(AstPrinter::print_stmt(&inner[1]), "(; (= i (+ i 1.0)))");

        assert_eq!(
            AstPrinter::print_stmt(&program[0]),
            "(block (var i 0.0) (while (< i 3.0) (block (print i) (; (= i (+ i 1.0))))))"
        );
    }

    #[test]
    fn for_loop_without_clauses() {
        assert_program(
            "for (;;) print 1; for (x = 0; x < 1;) print x;",
            &[
                "(while true (print 1.0))",
                "(block (; (= x 0.0)) (while (< x 1.0) (print x)))",
            ],
        );
    }

    #[test]
    fn missing_close_paren_reports_once() {
        let (program, errors) = parse_program("(1 + 2");

        assert!(program.is_empty());
        assert_eq!(
            messages(&errors),
            vec!["[line 1] Error at end: Expect ')' after expression."]
        );
    }

    #[test]
    fn parsing_resumes_after_synchronize() {
        let (program, errors) = parse_program("print (1 + 2;\nprint 3;\nvar x = 4;");

        assert_eq!(
            messages(&errors),
            vec!["[line 1] Error at ';': Expect ')' after expression."]
        );

        let printed: Vec<String> = program.iter().map(AstPrinter::print_stmt).collect();
        assert_eq!(printed, vec!["(print 3.0)", "(var x 4.0)"]);
    }

    #[test]
    fn synchronize_stops_before_a_statement_keyword() {
        let (program, errors) = parse_program("var 1 print 2;");

        assert_eq!(
            messages(&errors),
            vec!["[line 1] Error at '1': Expect variable name."]
        );
        assert_eq!(program.len(), 1);
        assert_eq!(AstPrinter::print_stmt(&program[0]), "(print 2.0)");
    }

    #[test]
    fn every_independent_error_is_collected() {
        let (program, errors) = parse_program("print ;\nvar 1;\nprint 3;\n{ var = 2; print 4; }");

        assert_eq!(
            messages(&errors),
            vec![
                "[line 1] Error at ';': Expect expression.",
                "[line 2] Error at '1': Expect variable name.",
                "[line 4] Error at '=': Expect variable name.",
            ]
        );

        let printed: Vec<String> = program.iter().map(AstPrinter::print_stmt).collect();
        assert_eq!(printed, vec!["(print 3.0)", "(block (print 4.0))"]);
    }

    #[test]
    fn lexical_and_syntax_errors_share_a_reporter() {
        let mut diagnostics = Diagnostics::new();
        let tokens = scan("print $;", &mut diagnostics);
        let program = Parser::new(&tokens, &mut diagnostics).parse();

        assert!(program.is_empty());
        assert!(diagnostics.had_error());
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn parsing_is_idempotent() {
        let mut diagnostics = Diagnostics::new();
        let tokens = scan(
            "fun fib(n) { if (n < 2) return n; return fib(n - 1) + fib(n - 2); }\n\
             for (var i = 0; i < 10; i = i + 1) print fib(i);",
            &mut diagnostics,
        );

        let first = Parser::new(&tokens, &mut diagnostics).parse();
        let second = Parser::new(&tokens, &mut diagnostics).parse();

        assert!(!diagnostics.had_error());
        assert_eq!(first, second);
    }

    #[test]
    fn tokens_keep_their_lines() {
        let (program, _) = parse_program("var a =\n\n  b;");

        match &program[0] {
            Stmt::Var {
                name,
                initializer: Some(Expr::Variable { name: b }),
            } => {
                assert_eq!(name.line, 1);
                assert_eq!(b.line, 3);
            }
            other => panic!("unexpected statement: {:?}", other),
        }
    }

    #[test]
    fn expression_line_comes_from_its_tokens() {
        let (expr, _) = parse_expr("(\n\na\n+ 1)");
        assert_eq!(expr.unwrap().line(), Some(4));

        let (expr, _) = parse_expr("(42)");
        assert_eq!(expr.unwrap().line(), None);
    }

    #[test]
    fn expression_must_consume_all_input() {
        let (expr, errors) = parse_expr("1 2");

        assert!(expr.is_none());
        assert_eq!(
            messages(&errors),
            vec!["[line 1] Error at '2': Expect end of expression."]
        );
    }
}
