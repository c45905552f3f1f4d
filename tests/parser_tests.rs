// End-to-end tests: whole programs through the lexer and parser.

use vela::ast::{
    Declaration, Expression, ForInitializer, Statement, TranslationUnit,
};
use vela::parser::Parser;
use vela::scope::ScopeKind;
use vela::source::StringSource;

fn parse(source: &str) -> TranslationUnit {
    Parser::new(StringSource::new(source))
        .parse_program()
        .expect("parse failed")
}

#[test]
fn parses_a_small_program() {
    let source = r#"
        using core.math as math;

        namespace geometry {
            const double PI = 3.14159;

            class Circle < Shape {
                double radius;

                public double area() {
                    return PI * radius * radius;
                }
            }
        }

        double main() {
            double total = 0;
            for (double i = 0; i < 10; i = i + 1) {
                total += i;
            }
            return total;
        }
    "#;

    let unit = parse(source);
    assert_eq!(unit.declarations.len(), 3);
    assert!(matches!(unit.declarations[0], Declaration::Using { .. }));
    assert!(matches!(unit.declarations[1], Declaration::Namespace { .. }));
    assert!(matches!(unit.declarations[2], Declaration::Function { .. }));
}

#[test]
fn scope_tree_mirrors_the_nesting() {
    let source = r#"
        namespace app {
            class Widget { }
        }

        float helper() {
            if (true) { return 1; }
            return 0;
        }
    "#;

    let unit = parse(source);
    let global = &unit.scopes[unit.global_scope];
    // namespace scope and the helper's body block
    assert_eq!(global.children.len(), 2);

    let namespace = &unit.scopes[global.children[0]];
    assert_eq!(namespace.kind, ScopeKind::Namespace);
    assert_eq!(namespace.name.as_deref(), Some("app"));
    assert_eq!(namespace.parent, Some(unit.global_scope));

    let class = &unit.scopes[namespace.children[0]];
    assert_eq!(class.kind, ScopeKind::Class);
    assert_eq!(class.name.as_deref(), Some("Widget"));

    let body = &unit.scopes[global.children[1]];
    assert_eq!(body.kind, ScopeKind::Block);
    // the nested `{ return 1; }` block
    assert_eq!(body.children.len(), 1);
}

#[test]
fn for_loop_scope_holds_the_loop_variable_and_the_body() {
    let source = "float run() { for (float i = 0; i < 3; i = i + 1) { i; } }";
    let unit = parse(source);
    let body = match &unit.declarations[0] {
        Declaration::Function { body, .. } => body,
        other => panic!("expected function, got {:?}", other),
    };
    match &body.statements[0] {
        Statement::For {
            scope,
            initializer,
            body: loop_body,
            ..
        } => {
            assert!(matches!(initializer, Some(ForInitializer::Declaration(_))));
            // header and body share one scope, so the loop scope has no
            // extra block child
            match loop_body.as_ref() {
                Statement::Block(block) => assert_eq!(block.scope, *scope),
                other => panic!("expected block body, got {:?}", other),
            }
            assert!(unit.scopes[*scope].children.is_empty());
        }
        other => panic!("expected for statement, got {:?}", other),
    }
}

#[test]
fn speculation_rewinds_across_statement_forms() {
    // Each statement here starts with an identifier and only resolves to
    // a declaration or an expression a token or two later.
    let source = r#"
        float run(Grid grid) {
            Row row = grid[0];
            row = grid[1];
            Row[] rows;
            rows[0] = row;
            return 0;
        }
    "#;

    let unit = parse(source);
    let body = match &unit.declarations[0] {
        Declaration::Function { body, .. } => body,
        other => panic!("expected function, got {:?}", other),
    };
    assert!(matches!(body.statements[0], Statement::Declaration(_)));
    assert!(matches!(body.statements[1], Statement::Expression { .. }));
    assert!(matches!(body.statements[2], Statement::Declaration(_)));
    assert!(matches!(body.statements[3], Statement::Expression { .. }));
}

#[test]
fn numeric_literal_text_survives_to_the_tree() {
    let source = "float a = 0x1F; float b = 0b101; float c = 2.5e-3;";
    let unit = parse(source);

    let initializer = |index: usize| match &unit.declarations[index] {
        Declaration::Variable {
            initializer: Some(expression),
            ..
        } => expression,
        other => panic!("expected initialized variable, got {:?}", other),
    };

    // digits only; the base prefix is implied by the token's origin
    assert!(matches!(
        initializer(0),
        Expression::IntegerLiteral(text, _) if text == "1F"
    ));
    assert!(matches!(
        initializer(1),
        Expression::IntegerLiteral(text, _) if text == "101"
    ));
    assert!(matches!(
        initializer(2),
        Expression::RealLiteral(text, _) if text == "2.5e-3"
    ));
}

#[test]
fn error_locations_point_at_the_offending_token() {
    let source = "float x = 1;\nfloat y = @;\n";
    let error = Parser::new(StringSource::new(source))
        .parse_program()
        .expect_err("expected a parse error");
    assert_eq!(error.location.line, 2);
    assert!(error.message.contains("unrecognized character"));
}

#[test]
fn comments_and_whitespace_are_invisible_to_the_parser() {
    let source = r#"
        // leading comment
        float /* inline */ x = /* nested /* comment */ here */ 1; // trailing
    "#;
    let unit = parse(source);
    assert_eq!(unit.declarations.len(), 1);
    assert!(matches!(
        unit.declarations[0],
        Declaration::Variable { ref name, .. } if name == "x"
    ));
}

#[test]
fn string_and_character_escapes_reach_the_tree_decoded() {
    let source = r#"char nl = '\n'; String greeting = "say \"hi\"";"#;
    let unit = parse(source);
    match &unit.declarations[0] {
        Declaration::Variable {
            initializer: Some(Expression::CharacterLiteral(value, _)),
            ..
        } => assert_eq!(*value, '\n'),
        other => panic!("expected character literal, got {:?}", other),
    }
    match &unit.declarations[1] {
        Declaration::Variable {
            initializer: Some(Expression::StringLiteral(text, _)),
            ..
        } => assert_eq!(text, "say \"hi\""),
        other => panic!("expected string literal, got {:?}", other),
    }
}
