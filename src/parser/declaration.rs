use crate::config::StubConfig;
use crate::parser::normalize_whitespace;
use crate::parser::token::{Token, TokenKind, pair_parens};
use tracing::trace;

/// One function declaration found in a header, in the shape it was written.
#[derive(Debug, Eq, PartialEq, Clone, Default)]
pub struct DeclarationRecord {
    /// Empty when no return type was written (constructors, destructors, macros).
    pub return_type: String,
    /// May be `~`-prefixed or already qualified (`Outer::inner`).
    pub name: String,
    pub parameters: String,
    pub is_const_qualified: bool,
}

/// Finds every `;`-terminated function declaration outside function bodies, in source order.
/// Fragments that do not have the declaration shape are skipped.
pub fn match_declarations(
    source: &str,
    tokens: &[Token],
    config: &StubConfig,
) -> Vec<DeclarationRecord> {
    let partners = pair_parens(tokens);
    let mut records = Vec::new();
    // one entry per open brace: true for class/namespace scopes, false for function bodies
    let mut scopes: Vec<bool> = Vec::new();
    let mut start = 0;
    let mut index = 0;

    while index < tokens.len() {
        match tokens[index].kind {
            TokenKind::OpenParen => {
                if let Some(close) = partners[index] {
                    index = close + 1;
                    continue;
                }
            }
            TokenKind::Semicolon => {
                let statement = &tokens[start..index];
                if !statement.is_empty() && scopes.iter().all(|scope| *scope) {
                    match match_statement(source, statement, config) {
                        Some(record) => records.push(record),
                        None => trace!(
                            fragment = %statement_text(source, statement),
                            "skipping fragment without declaration shape"
                        ),
                    }
                }
                start = index + 1;
            }
            TokenKind::OpenBrace => {
                let statement = &tokens[start..index];
                let is_body = statement
                    .iter()
                    .any(|t| t.kind == TokenKind::OpenParen);
                scopes.push(!is_body);
                start = index + 1;
            }
            TokenKind::CloseBrace => {
                scopes.pop();
                start = index + 1;
            }
            TokenKind::Colon => {
                // access labels (`public:`) and base clauses end the statement so far
                if tokens[start..index].iter().all(Token::is_ident) {
                    start = index + 1;
                }
            }
            _ => {}
        }
        index += 1;
    }

    records
}

fn statement_text(source: &str, statement: &[Token]) -> String {
    match (statement.first(), statement.last()) {
        (Some(first), Some(last)) => normalize_whitespace(&source[first.offset..last.end()]),
        _ => String::new(),
    }
}

/// `[template<...>] [specifiers] [return type] [~]name ( params ) [qualifiers]`
fn match_statement(
    source: &str,
    statement: &[Token],
    config: &StubConfig,
) -> Option<DeclarationRecord> {
    let partners = pair_parens(statement);

    let mut end = statement.len();
    let mut is_const_qualified = false;
    while let Some(last) = end.checked_sub(1) {
        match statement[last].kind {
            TokenKind::Ident(word) if config.is_const_qualifier(word) => is_const_qualified = true,
            TokenKind::Ident(word) if config.is_trailing_specifier(word) => {}
            // ref-qualifiers `&` and `&&`
            TokenKind::Punct('&') => {}
            TokenKind::CloseParen => match specifier_group_start(statement, &partners, last, config) {
                Some(start) => {
                    end = start;
                    continue;
                }
                None => break,
            },
            _ => break,
        }
        end -= 1;
    }

    let close = end.checked_sub(1)?;
    if statement[close].kind != TokenKind::CloseParen {
        return None;
    }
    let open = partners[close]?;

    let name_start = find_name_start(statement, open)?;
    let name: String = statement[name_start..open].iter().map(|t| t.text).collect();

    let prefix = &statement[..name_start];
    if prefix
        .iter()
        .any(|t| matches!(t.kind, TokenKind::Ident(word) if config.is_rejected_keyword(word)))
    {
        return None;
    }

    let return_tokens = strip_leading_specifiers(skip_leading_noise(prefix), config)?;
    if !is_type_like(return_tokens) {
        return None;
    }

    Some(DeclarationRecord {
        return_type: statement_text(source, return_tokens),
        name,
        parameters: normalize_whitespace(&source[statement[open].end()..statement[close].offset]),
        is_const_qualified,
    })
}

/// `noexcept(expr)` after the parameter list: returns the index of `noexcept`.
/// A specifier word right after the return type is the function name, not a qualifier.
fn specifier_group_start(
    statement: &[Token],
    partners: &[Option<usize>],
    close: usize,
    config: &StubConfig,
) -> Option<usize> {
    let open = partners[close]?;
    let keyword = open.checked_sub(1)?;
    let TokenKind::Ident(word) = statement[keyword].kind else {
        return None;
    };
    if !config.is_trailing_specifier(word) {
        return None;
    }

    match statement[keyword.checked_sub(1)?].kind {
        TokenKind::CloseParen | TokenKind::Punct('&') => Some(keyword),
        TokenKind::Ident(previous)
            if config.is_const_qualifier(previous) || config.is_trailing_specifier(previous) =>
        {
            Some(keyword)
        }
        _ => None,
    }
}

/// Drops attributes and macro invocations in front of the return type:
/// everything up to the last `]` or `)` outside template arguments.
fn skip_leading_noise<'t, 'a>(tokens: &'t [Token<'a>]) -> &'t [Token<'a>] {
    let mut angle_depth = 0usize;
    let mut cut = 0;

    for (index, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::Punct('<') => angle_depth += 1,
            TokenKind::Punct('>') => angle_depth = angle_depth.saturating_sub(1),
            TokenKind::CloseParen | TokenKind::Punct(']') if angle_depth == 0 => cut = index + 1,
            _ => {}
        }
    }

    &tokens[cut..]
}

/// Walks back from the `(` over `ident`, `~ident` and `ident ::` chains.
fn find_name_start(statement: &[Token], open: usize) -> Option<usize> {
    let mut start = open.checked_sub(1)?;
    if !statement[start].is_ident() {
        return None;
    }
    if start > 0 && statement[start - 1].kind == TokenKind::Tilde {
        start -= 1;
    }
    while start >= 2
        && statement[start - 1].kind == TokenKind::Scope
        && statement[start - 2].is_ident()
    {
        start -= 2;
    }

    Some(start)
}

fn strip_leading_specifiers<'t, 'a>(
    mut tokens: &'t [Token<'a>],
    config: &StubConfig,
) -> Option<&'t [Token<'a>]> {
    loop {
        match tokens.first().map(|t| t.kind) {
            Some(TokenKind::Ident("template")) => tokens = skip_angle_group(&tokens[1..])?,
            Some(TokenKind::Ident(word)) if config.is_leading_specifier(word) => {
                tokens = &tokens[1..]
            }
            _ => return Some(tokens),
        }
    }
}

/// Expects `<` first and returns what follows its matching `>`.
fn skip_angle_group<'t, 'a>(tokens: &'t [Token<'a>]) -> Option<&'t [Token<'a>]> {
    if tokens.first()?.kind != TokenKind::Punct('<') {
        return None;
    }

    let mut depth = 0usize;
    for (index, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::Punct('<') => depth += 1,
            TokenKind::Punct('>') => {
                depth -= 1;
                if depth == 0 {
                    return Some(&tokens[index + 1..]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Identifiers, `::`, pointers and references. Anything goes inside template arguments.
fn is_type_like(tokens: &[Token]) -> bool {
    let mut angle_depth = 0usize;

    for token in tokens {
        match token.kind {
            TokenKind::Ident(_) | TokenKind::Scope => {}
            TokenKind::Punct('*' | '&') => {}
            TokenKind::Punct('<') => angle_depth += 1,
            TokenKind::Punct('>') => match angle_depth.checked_sub(1) {
                Some(depth) => angle_depth = depth,
                None => return false,
            },
            _ if angle_depth > 0 => {}
            _ => return false,
        }
    }

    angle_depth == 0
}

#[cfg(test)]
mod tests {
    use crate::config::StubConfig;
    use crate::parser::declaration::{DeclarationRecord, match_declarations};
    use crate::parser::token::tokenize;
    use rand::Rng;

    fn declarations(input: &str) -> Vec<DeclarationRecord> {
        match_declarations(input, &tokenize(input), &StubConfig::default())
    }

    fn record(return_type: &str, name: &str, parameters: &str) -> DeclarationRecord {
        DeclarationRecord {
            return_type: return_type.to_string(),
            name: name.to_string(),
            parameters: parameters.to_string(),
            is_const_qualified: false,
        }
    }

    fn random_whitespace_string() -> String {
        let mut rng = rand::rng();
        let len = rng.random_range(1..=40);
        (0..len)
            .map(|_| [' ', '\t', '\n'][rng.random_range(0..3)])
            .collect()
    }

    #[test]
    fn test_free_function() {
        assert_eq!(declarations("void run(int x);"), vec![record("void", "run", "int x")]);
    }

    #[test]
    fn test_method_without_params() {
        assert_eq!(declarations("int method();"), vec![record("int", "method", "")]);
    }

    #[test]
    fn test_constructor_and_destructor() {
        let input = "class Widget { Widget(); explicit Widget(int size); ~Widget(); };";
        assert_eq!(
            declarations(input),
            vec![
                record("", "Widget", ""),
                record("", "Widget", "int size"),
                record("", "~Widget", ""),
            ]
        );
    }

    #[test]
    fn test_const_method() {
        assert_eq!(
            declarations("int size() const;"),
            vec![DeclarationRecord {
                is_const_qualified: true,
                ..record("int", "size", "")
            }]
        );
    }

    #[test]
    fn test_method_with_inheritance_modifier() {
        for modifier in ["override", "final", "const override", "override final"] {
            let input = format!("virtual void method() {modifier};");
            let records = declarations(&input);

            assert_eq!(records.len(), 1, "{input}");
            assert_eq!(records[0].return_type, "void");
            assert_eq!(records[0].name, "method");
            assert_eq!(records[0].is_const_qualified, modifier.contains("const"));
        }
    }

    #[test]
    fn test_leading_specifiers_are_dropped() {
        for specifier in ["virtual", "static", "inline", "explicit"] {
            let input = format!("{specifier} int count();");
            assert_eq!(declarations(&input), vec![record("int", "count", "")]);
        }
    }

    #[test]
    fn test_compound_return_type() {
        let input = "const std::map<std::string, int>& lookup(const std::string& key) const;";
        assert_eq!(
            declarations(input),
            vec![DeclarationRecord {
                is_const_qualified: true,
                ..record(
                    "const std::map<std::string, int>&",
                    "lookup",
                    "const std::string& key"
                )
            }]
        );
    }

    #[test]
    fn test_template_method() {
        let input = "template<typename T, typename = std::enable_if_t<std::is_integral<T>::value>> T clamp(T value);";
        assert_eq!(declarations(input), vec![record("T", "clamp", "T value")]);
    }

    #[test]
    fn test_function_type_in_template_argument() {
        let input = "std::function<void(int)> make_callback();";
        assert_eq!(
            declarations(input),
            vec![record("std::function<void(int)>", "make_callback", "")]
        );
    }

    #[test]
    fn test_parameter_whitespace_is_normalized() {
        let input = format!(
            "int{0}add({0}int a,{0}int{0}b{0}){0};",
            random_whitespace_string()
        );
        assert_eq!(declarations(&input), vec![record("int", "add", "int a, int b")]);
    }

    #[test]
    fn test_nested_parens_in_default_value() {
        let input = "void resize(Size size = Size(10, 20), int flags = (1 | 2));";
        assert_eq!(
            declarations(input),
            vec![record(
                "void",
                "resize",
                "Size size = Size(10, 20), int flags = (1 | 2)"
            )]
        );
    }

    #[test]
    fn test_qualified_name() {
        assert_eq!(
            declarations("void Outer :: inner();"),
            vec![record("void", "Outer::inner", "")]
        );
    }

    #[test]
    fn test_inline_bodies_are_skipped() {
        let input = r#"class Widget {
        public:
            int size() const { return compute(count); }
            Widget() : count(0) { reset(); }
            void reset();
        private:
            int count;
        };"#;

        assert_eq!(declarations(input), vec![record("void", "reset", "")]);
    }

    #[test]
    fn test_non_declarations_are_skipped() {
        let input = r#"
            int value = compute(3);
            virtual void draw() = 0;
            Widget(const Widget&) = delete;
            bool operator==(const Widget& other) const;
            friend void swap(Widget& a, Widget& b);
            typedef void (*Callback)(int);
            using Handler = void(int);
            operator bool() const;
            explicit operator int*() const;
            int width : 4;
        "#;

        assert!(declarations(input).is_empty());
    }

    #[test]
    fn test_attribute_and_macro_prefixes() {
        let input = r#"class Widget {
            [[nodiscard]] int size() const;
            DEPRECATED("use draw") void old();
            DECLARE_X(Y) void f();
            __attribute__((cold)) static bool fail(int code);
        };"#;

        assert_eq!(
            declarations(input),
            vec![
                DeclarationRecord {
                    is_const_qualified: true,
                    ..record("int", "size", "")
                },
                record("void", "old", ""),
                record("void", "f", ""),
                record("bool", "fail", "int code"),
            ]
        );
    }

    #[test]
    fn test_template_argument_parens_are_not_noise() {
        assert_eq!(
            declarations("[[nodiscard]] std::function<void(int)> make();"),
            vec![record("std::function<void(int)>", "make", "")]
        );
    }

    #[test]
    fn test_ref_qualified_members() {
        let input = "int get() const &; std::string take() &&; void set(int v) & noexcept;";
        assert_eq!(
            declarations(input),
            vec![
                DeclarationRecord {
                    is_const_qualified: true,
                    ..record("int", "get", "")
                },
                record("std::string", "take", ""),
                record("void", "set", "int v"),
            ]
        );
    }

    #[test]
    fn test_noexcept_expression() {
        let input = "void swap(Widget& other) noexcept(true); bool empty() const noexcept(false);";
        assert_eq!(
            declarations(input),
            vec![
                record("void", "swap", "Widget& other"),
                DeclarationRecord {
                    is_const_qualified: true,
                    ..record("bool", "empty", "")
                },
            ]
        );
    }

    #[test]
    fn test_specifier_word_as_function_name() {
        assert_eq!(declarations("void final();"), vec![record("void", "final", "")]);
    }

    #[test]
    fn test_order_is_preserved() {
        let input = "void c(); int a(); char b();";
        let names: Vec<String> = declarations(input).into_iter().map(|r| r.name).collect();

        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_namespace_scope() {
        let input = "namespace net { namespace ip { bool parse(const char* text); } }";
        assert_eq!(
            declarations(input),
            vec![record("bool", "parse", "const char* text")]
        );
    }

    #[test]
    fn test_commented_declarations_are_ignored() {
        let input = "// void old();\n/* int older(); */\nvoid current();";
        assert_eq!(declarations(input), vec![record("void", "current", "")]);
    }

    #[test]
    fn test_unbalanced_input() {
        assert!(declarations("void broken(int a;").is_empty());
        assert_eq!(
            declarations("void broken(int a; void fine();"),
            vec![record("void", "fine", "")]
        );
        assert_eq!(declarations("); void ok();"), vec![record("void", "ok", "")]);
    }

    #[test]
    fn test_bare_macro_call_is_a_declaration() {
        assert_eq!(
            declarations("DECLARE_TYPE(Widget);"),
            vec![record("", "DECLARE_TYPE", "Widget")]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(declarations("").is_empty());
        assert!(declarations(";;;").is_empty());
    }
}
