//! Recursive descent parser for Lua 5.3
//!
//! Builds the typed AST from the token stream. Trivia is dropped up front;
//! every node records the position of its first and last token.

use smol_str::SmolStr;

use super::ast::*;
use super::error::SyntaxError;
use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use crate::base::{LineIndex, Position, Span};

/// Parse Lua source code into a [`Chunk`]
pub fn parse(input: &str) -> Result<Chunk, SyntaxError> {
    let line_index = LineIndex::new(input);
    let tokens: Vec<ParsedToken<'_>> = Lexer::new(input)
        .filter(|t| !t.kind.is_trivia())
        .map(|t| ParsedToken::new(t, &line_index))
        .collect();
    let eof = line_index.position(text_size::TextSize::of(input));

    let mut parser = Parser::new(&tokens, eof);
    parser.parse_chunk()
}

/// A non-trivia token with resolved line/column bounds
struct ParsedToken<'a> {
    kind: SyntaxKind,
    text: &'a str,
    start: Position,
    end: Position,
}

impl<'a> ParsedToken<'a> {
    fn new(token: Token<'a>, line_index: &LineIndex) -> Self {
        let range = token.range();
        Self {
            kind: token.kind,
            text: token.text,
            start: line_index.position(range.start()),
            end: line_index.position(range.end()),
        }
    }
}

type ParseResult<T> = Result<T, SyntaxError>;

/// Nesting limit for blocks, tables and subexpressions
const MAX_SYNTAX_LEVELS: usize = 100;

/// The parser state
struct Parser<'a> {
    tokens: &'a [ParsedToken<'a>],
    pos: usize,
    eof: Position,
    /// End of the most recently consumed token
    last_end: Position,
    /// Blocks, tables and subexpressions currently open
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [ParsedToken<'a>], eof: Position) -> Self {
        Self {
            tokens,
            pos: 0,
            eof,
            last_end: Position::default(),
            depth: 0,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&'a ParsedToken<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> SyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(SyntaxKind::EOF)
    }

    fn current_text(&self) -> &'a str {
        self.current().map(|t| t.text).unwrap_or("<eof>")
    }

    fn current_start(&self) -> Position {
        self.current().map(|t| t.start).unwrap_or(self.eof)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) -> Option<&'a ParsedToken<'a>> {
        let token = self.current()?;
        self.last_end = token.end;
        self.pos += 1;
        Some(token)
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> ParseResult<()> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.error(format!("{} expected", kind.display())))
        }
    }

    /// Expect the token closing a construct opened at `open_line`
    fn expect_match(
        &mut self,
        close: SyntaxKind,
        open: SyntaxKind,
        open_line: usize,
    ) -> ParseResult<()> {
        if self.eat(close) {
            return Ok(());
        }
        if self.current_start().line == open_line {
            Err(self.error(format!("{} expected", close.display())))
        } else {
            Err(self.error(format!(
                "{} expected (to close {} at line {})",
                close.display(),
                open.display(),
                open_line + 1
            )))
        }
    }

    fn expect_name(&mut self) -> ParseResult<Identifier> {
        match self.current() {
            Some(token) if token.kind == SyntaxKind::NAME => {
                self.bump();
                Ok(Identifier::new(token.text, Span::new(token.start, token.end)))
            }
            _ => Err(self.error("<name> expected")),
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&self, message: impl Into<String>) -> SyntaxError {
        SyntaxError::new(
            format!("{} near '{}'", message.into(), self.current_text()),
            self.current_start(),
        )
    }

    /// Run `parse` one syntax level deeper
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= MAX_SYNTAX_LEVELS {
            return Err(self.error("chunk has too many syntax levels"));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn span_from(&self, start: Position) -> Span {
        Span::new(start, self.last_end)
    }

    /// An `if` clause runs up to the keyword that closes it
    fn clause_span(&self, start: Position) -> Span {
        Span::new(start, self.current_start())
    }

    // =========================================================================
    // Blocks
    // =========================================================================

    fn parse_chunk(&mut self) -> ParseResult<Chunk> {
        let start = self.current_start();
        let body = self.parse_block()?;
        if !self.at(SyntaxKind::EOF) {
            return Err(self.error("'<eof>' expected"));
        }
        Ok(Chunk {
            body,
            span: Span::new(start.min(self.eof), self.eof),
        })
    }

    fn parse_block(&mut self) -> ParseResult<Block> {
        self.nested(Self::parse_statements)
    }

    fn parse_statements(&mut self) -> ParseResult<Block> {
        let mut block = Vec::new();
        loop {
            let kind = self.current_kind();
            if kind.is_block_end() {
                break;
            }
            if kind == SyntaxKind::RETURN_KW {
                block.push(self.parse_return()?);
                break;
            }
            if let Some(statement) = self.parse_statement()? {
                block.push(statement);
            }
        }
        Ok(block)
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn parse_statement(&mut self) -> ParseResult<Option<Statement>> {
        let start = self.current_start();
        let kind = match self.current_kind() {
            SyntaxKind::SEMICOLON => {
                self.bump();
                return Ok(None);
            }
            SyntaxKind::IF_KW => StatementKind::If(self.parse_if()?),
            SyntaxKind::WHILE_KW => {
                self.bump();
                let condition = self.parse_expression()?;
                self.expect(SyntaxKind::DO_KW)?;
                let body = self.parse_block()?;
                self.expect_match(SyntaxKind::END_KW, SyntaxKind::WHILE_KW, start.line)?;
                StatementKind::While { condition, body }
            }
            SyntaxKind::DO_KW => {
                self.bump();
                let body = self.parse_block()?;
                self.expect_match(SyntaxKind::END_KW, SyntaxKind::DO_KW, start.line)?;
                StatementKind::Do { body }
            }
            SyntaxKind::FOR_KW => self.parse_for(start)?,
            SyntaxKind::REPEAT_KW => {
                self.bump();
                let body = self.parse_block()?;
                self.expect_match(SyntaxKind::UNTIL_KW, SyntaxKind::REPEAT_KW, start.line)?;
                let condition = self.parse_expression()?;
                StatementKind::Repeat { body, condition }
            }
            SyntaxKind::FUNCTION_KW => {
                self.bump();
                let name = self.parse_function_name()?;
                let function = self.parse_function_body(start)?;
                StatementKind::Function { name, function }
            }
            SyntaxKind::LOCAL_KW => {
                self.bump();
                if self.eat(SyntaxKind::FUNCTION_KW) {
                    let name = self.expect_name()?;
                    let function = self.parse_function_body(start)?;
                    StatementKind::LocalFunction { name, function }
                } else {
                    StatementKind::Local(self.parse_local()?)
                }
            }
            SyntaxKind::COLON_COLON => {
                self.bump();
                let name = self.expect_name()?;
                self.expect(SyntaxKind::COLON_COLON)?;
                StatementKind::Label { name }
            }
            SyntaxKind::BREAK_KW => {
                self.bump();
                StatementKind::Break
            }
            SyntaxKind::GOTO_KW => {
                self.bump();
                let label = self.expect_name()?;
                StatementKind::Goto { label }
            }
            _ => self.parse_expression_statement()?,
        };
        Ok(Some(Statement {
            kind,
            span: self.span_from(start),
        }))
    }

    fn parse_return(&mut self) -> ParseResult<Statement> {
        let start = self.current_start();
        self.expect(SyntaxKind::RETURN_KW)?;
        let arguments = if self.current_kind().is_block_end() || self.at(SyntaxKind::SEMICOLON) {
            Vec::new()
        } else {
            self.parse_expression_list()?
        };
        self.eat(SyntaxKind::SEMICOLON);
        if !self.current_kind().is_block_end() {
            return Err(self.error("'<eof>' expected"));
        }
        Ok(Statement {
            kind: StatementKind::Return { arguments },
            span: self.span_from(start),
        })
    }

    fn parse_if(&mut self) -> ParseResult<IfStatement> {
        let if_line = self.current_start().line;
        let mut clauses = Vec::new();

        let start = self.current_start();
        self.expect(SyntaxKind::IF_KW)?;
        let condition = self.parse_expression()?;
        self.expect(SyntaxKind::THEN_KW)?;
        let body = self.parse_block()?;
        clauses.push(IfClause {
            kind: ClauseKind::If,
            condition: Some(condition),
            body,
            span: self.clause_span(start),
        });

        while self.at(SyntaxKind::ELSEIF_KW) {
            let start = self.current_start();
            self.bump();
            let condition = self.parse_expression()?;
            self.expect(SyntaxKind::THEN_KW)?;
            let body = self.parse_block()?;
            clauses.push(IfClause {
                kind: ClauseKind::ElseIf,
                condition: Some(condition),
                body,
                span: self.clause_span(start),
            });
        }

        if self.at(SyntaxKind::ELSE_KW) {
            let start = self.current_start();
            self.bump();
            let body = self.parse_block()?;
            clauses.push(IfClause {
                kind: ClauseKind::Else,
                condition: None,
                body,
                span: self.clause_span(start),
            });
        }

        self.expect_match(SyntaxKind::END_KW, SyntaxKind::IF_KW, if_line)?;
        Ok(IfStatement { clauses })
    }

    fn parse_for(&mut self, start: Position) -> ParseResult<StatementKind> {
        self.expect(SyntaxKind::FOR_KW)?;
        let first = self.expect_name()?;

        let kind = if self.eat(SyntaxKind::EQ) {
            let from = self.parse_expression()?;
            self.expect(SyntaxKind::COMMA)?;
            let to = self.parse_expression()?;
            let step = if self.eat(SyntaxKind::COMMA) {
                Some(self.parse_expression()?)
            } else {
                None
            };
            self.expect(SyntaxKind::DO_KW)?;
            let body = self.parse_block()?;
            StatementKind::NumericFor {
                variable: first,
                start: from,
                end: to,
                step,
                body,
            }
        } else if self.at(SyntaxKind::COMMA) || self.at(SyntaxKind::IN_KW) {
            let mut variables = vec![first];
            while self.eat(SyntaxKind::COMMA) {
                variables.push(self.expect_name()?);
            }
            self.expect(SyntaxKind::IN_KW)?;
            let iterators = self.parse_expression_list()?;
            self.expect(SyntaxKind::DO_KW)?;
            let body = self.parse_block()?;
            StatementKind::GenericFor {
                variables,
                iterators,
                body,
            }
        } else {
            return Err(self.error("'=' or 'in' expected"));
        };

        self.expect_match(SyntaxKind::END_KW, SyntaxKind::FOR_KW, start.line)?;
        Ok(kind)
    }

    fn parse_function_name(&mut self) -> ParseResult<FunctionName> {
        let mut path = vec![self.expect_name()?];
        while self.eat(SyntaxKind::DOT) {
            path.push(self.expect_name()?);
        }
        let method = if self.eat(SyntaxKind::COLON) {
            Some(self.expect_name()?)
        } else {
            None
        };
        Ok(FunctionName { path, method })
    }

    fn parse_local(&mut self) -> ParseResult<LocalStatement> {
        let mut variables = vec![self.expect_name()?];
        while self.eat(SyntaxKind::COMMA) {
            variables.push(self.expect_name()?);
        }
        let init = if self.eat(SyntaxKind::EQ) {
            self.parse_expression_list()?
        } else {
            Vec::new()
        };
        Ok(LocalStatement { variables, init })
    }

    fn parse_expression_statement(&mut self) -> ParseResult<StatementKind> {
        let first = self.parse_suffixed_expression()?;

        if self.at(SyntaxKind::EQ) || self.at(SyntaxKind::COMMA) {
            let mut variables = vec![first];
            while self.eat(SyntaxKind::COMMA) {
                variables.push(self.parse_suffixed_expression()?);
            }
            if let Some(target) = variables.iter().find(|v| !is_assignable(v)) {
                return Err(SyntaxError::new(
                    "syntax error: cannot assign to this expression",
                    target.span.start,
                ));
            }
            self.expect(SyntaxKind::EQ)?;
            let init = self.parse_expression_list()?;
            return Ok(StatementKind::Assignment(AssignmentStatement { variables, init }));
        }

        if matches!(first.kind, ExpressionKind::Call { .. }) {
            Ok(StatementKind::Call(first))
        } else {
            Err(self.error("syntax error"))
        }
    }

    // =========================================================================
    // Functions
    // =========================================================================

    /// Parameter list and body, from `(` through `end`
    fn parse_function_body(&mut self, start: Position) -> ParseResult<FunctionBody> {
        self.expect(SyntaxKind::L_PAREN)?;
        let mut parameters = Vec::new();
        let mut is_vararg = false;
        if !self.at(SyntaxKind::R_PAREN) {
            loop {
                if self.eat(SyntaxKind::DOT_DOT_DOT) {
                    is_vararg = true;
                    break;
                }
                parameters.push(self.expect_name()?);
                if !self.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
        }
        self.expect(SyntaxKind::R_PAREN)?;
        let body = self.parse_block()?;
        self.expect_match(SyntaxKind::END_KW, SyntaxKind::FUNCTION_KW, start.line)?;
        Ok(FunctionBody {
            parameters,
            is_vararg,
            body,
            span: self.span_from(start),
        })
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn parse_expression_list(&mut self) -> ParseResult<Vec<Expression>> {
        let mut list = vec![self.parse_expression()?];
        while self.eat(SyntaxKind::COMMA) {
            list.push(self.parse_expression()?);
        }
        Ok(list)
    }

    fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_subexpression(0)
    }

    /// Precedence climbing over binary operators whose left power exceeds `limit`
    fn parse_subexpression(&mut self, limit: u8) -> ParseResult<Expression> {
        self.nested(|parser| parser.parse_binary(limit))
    }

    fn parse_binary(&mut self, limit: u8) -> ParseResult<Expression> {
        let start = self.current_start();
        let mut left = if let Some(operator) = unary_operator(self.current_kind()) {
            self.bump();
            let operand = self.parse_subexpression(UnaryOperator::PRECEDENCE)?;
            Expression {
                kind: ExpressionKind::Unary {
                    operator,
                    operand: Box::new(operand),
                },
                span: self.span_from(start),
            }
        } else {
            self.parse_simple_expression()?
        };

        while let Some(operator) = binary_operator(self.current_kind()) {
            let (left_power, right_power) = operator.precedence();
            if left_power <= limit {
                break;
            }
            self.bump();
            let right = self.parse_subexpression(right_power)?;
            left = Expression {
                kind: ExpressionKind::Binary {
                    operator,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span: self.span_from(start),
            };
        }
        Ok(left)
    }

    fn parse_simple_expression(&mut self) -> ParseResult<Expression> {
        let start = self.current_start();
        let kind = match self.current_kind() {
            SyntaxKind::NIL_KW => ExpressionKind::Nil,
            SyntaxKind::TRUE_KW => ExpressionKind::Boolean(true),
            SyntaxKind::FALSE_KW => ExpressionKind::Boolean(false),
            SyntaxKind::NUMBER => ExpressionKind::Number(SmolStr::new(self.current_text())),
            SyntaxKind::STRING => ExpressionKind::String(SmolStr::new(self.current_text())),
            SyntaxKind::DOT_DOT_DOT => ExpressionKind::Vararg,
            SyntaxKind::L_BRACE => return self.parse_table(),
            SyntaxKind::FUNCTION_KW => {
                self.bump();
                let function = self.parse_function_body(start)?;
                return Ok(Expression {
                    kind: ExpressionKind::Function(function),
                    span: self.span_from(start),
                });
            }
            _ => return self.parse_suffixed_expression(),
        };
        self.bump();
        Ok(Expression {
            kind,
            span: self.span_from(start),
        })
    }

    fn parse_primary_expression(&mut self) -> ParseResult<Expression> {
        let start = self.current_start();
        match self.current_kind() {
            SyntaxKind::NAME => {
                let name = self.expect_name()?;
                Ok(Expression {
                    kind: ExpressionKind::Identifier(name.name),
                    span: name.span,
                })
            }
            SyntaxKind::L_PAREN => {
                self.bump();
                let inner = self.parse_expression()?;
                self.expect_match(SyntaxKind::R_PAREN, SyntaxKind::L_PAREN, start.line)?;
                Ok(Expression {
                    kind: ExpressionKind::Paren(Box::new(inner)),
                    span: self.span_from(start),
                })
            }
            _ => Err(self.error("unexpected symbol")),
        }
    }

    /// Primary expression followed by any chain of `.name`, `[exp]`, `:name args`, `args`
    fn parse_suffixed_expression(&mut self) -> ParseResult<Expression> {
        let start = self.current_start();
        let mut expression = self.parse_primary_expression()?;
        loop {
            let kind = match self.current_kind() {
                SyntaxKind::DOT => {
                    self.bump();
                    let identifier = self.expect_name()?;
                    ExpressionKind::Member {
                        base: Box::new(expression),
                        indexer: Indexer::Dot,
                        identifier,
                    }
                }
                SyntaxKind::L_BRACKET => {
                    let open_line = self.current_start().line;
                    self.bump();
                    let index = self.parse_expression()?;
                    self.expect_match(SyntaxKind::R_BRACKET, SyntaxKind::L_BRACKET, open_line)?;
                    ExpressionKind::Index {
                        base: Box::new(expression),
                        index: Box::new(index),
                    }
                }
                SyntaxKind::COLON => {
                    self.bump();
                    let identifier = self.expect_name()?;
                    let callee = Expression {
                        kind: ExpressionKind::Member {
                            base: Box::new(expression),
                            indexer: Indexer::Colon,
                            identifier,
                        },
                        span: self.span_from(start),
                    };
                    let arguments = self.parse_call_arguments()?;
                    ExpressionKind::Call {
                        base: Box::new(callee),
                        arguments,
                    }
                }
                SyntaxKind::L_PAREN | SyntaxKind::L_BRACE | SyntaxKind::STRING => {
                    let arguments = self.parse_call_arguments()?;
                    ExpressionKind::Call {
                        base: Box::new(expression),
                        arguments,
                    }
                }
                _ => return Ok(expression),
            };
            expression = Expression {
                kind,
                span: self.span_from(start),
            };
        }
    }

    fn parse_call_arguments(&mut self) -> ParseResult<Vec<Expression>> {
        match self.current_kind() {
            SyntaxKind::STRING => {
                let start = self.current_start();
                let text = SmolStr::new(self.current_text());
                self.bump();
                Ok(vec![Expression {
                    kind: ExpressionKind::String(text),
                    span: self.span_from(start),
                }])
            }
            SyntaxKind::L_BRACE => Ok(vec![self.parse_table()?]),
            SyntaxKind::L_PAREN => {
                let open_line = self.current_start().line;
                self.bump();
                let arguments = if self.at(SyntaxKind::R_PAREN) {
                    Vec::new()
                } else {
                    self.parse_expression_list()?
                };
                self.expect_match(SyntaxKind::R_PAREN, SyntaxKind::L_PAREN, open_line)?;
                Ok(arguments)
            }
            _ => Err(self.error("function arguments expected")),
        }
    }

    fn parse_table(&mut self) -> ParseResult<Expression> {
        self.nested(Self::parse_table_fields)
    }

    fn parse_table_fields(&mut self) -> ParseResult<Expression> {
        let start = self.current_start();
        self.expect(SyntaxKind::L_BRACE)?;
        let mut fields = Vec::new();
        while !self.at(SyntaxKind::R_BRACE) {
            fields.push(self.parse_table_field()?);
            if !self.eat(SyntaxKind::COMMA) && !self.eat(SyntaxKind::SEMICOLON) {
                break;
            }
        }
        self.expect_match(SyntaxKind::R_BRACE, SyntaxKind::L_BRACE, start.line)?;
        Ok(Expression {
            kind: ExpressionKind::Table(fields),
            span: self.span_from(start),
        })
    }

    fn parse_table_field(&mut self) -> ParseResult<TableField> {
        let start = self.current_start();
        let kind = match self.current_kind() {
            SyntaxKind::L_BRACKET => {
                self.bump();
                let key = self.parse_expression()?;
                self.expect(SyntaxKind::R_BRACKET)?;
                self.expect(SyntaxKind::EQ)?;
                let value = self.parse_expression()?;
                TableFieldKind::Keyed { key, value }
            }
            SyntaxKind::NAME if self.nth(1) == SyntaxKind::EQ => {
                let key = self.expect_name()?;
                self.expect(SyntaxKind::EQ)?;
                let value = self.parse_expression()?;
                TableFieldKind::Named { key, value }
            }
            _ => TableFieldKind::Positional {
                value: self.parse_expression()?,
            },
        };
        Ok(TableField {
            kind,
            span: self.span_from(start),
        })
    }
}

fn is_assignable(expression: &Expression) -> bool {
    match &expression.kind {
        ExpressionKind::Identifier(_) | ExpressionKind::Index { .. } => true,
        ExpressionKind::Member { indexer, .. } => *indexer == Indexer::Dot,
        _ => false,
    }
}

fn unary_operator(kind: SyntaxKind) -> Option<UnaryOperator> {
    match kind {
        SyntaxKind::NOT_KW => Some(UnaryOperator::Not),
        SyntaxKind::HASH => Some(UnaryOperator::Length),
        SyntaxKind::MINUS => Some(UnaryOperator::Negate),
        SyntaxKind::TILDE => Some(UnaryOperator::BitNot),
        _ => None,
    }
}

fn binary_operator(kind: SyntaxKind) -> Option<BinaryOperator> {
    use BinaryOperator::*;
    let operator = match kind {
        SyntaxKind::OR_KW => Or,
        SyntaxKind::AND_KW => And,
        SyntaxKind::LT => Lt,
        SyntaxKind::GT => Gt,
        SyntaxKind::LT_EQ => LtEq,
        SyntaxKind::GT_EQ => GtEq,
        SyntaxKind::TILDE_EQ => NotEq,
        SyntaxKind::EQ_EQ => Eq,
        SyntaxKind::PIPE => BitOr,
        SyntaxKind::TILDE => BitXor,
        SyntaxKind::AMP => BitAnd,
        SyntaxKind::LT_LT => ShiftLeft,
        SyntaxKind::GT_GT => ShiftRight,
        SyntaxKind::DOT_DOT => Concat,
        SyntaxKind::PLUS => Add,
        SyntaxKind::MINUS => Sub,
        SyntaxKind::STAR => Mul,
        SyntaxKind::SLASH => Div,
        SyntaxKind::SLASH_SLASH => FloorDiv,
        SyntaxKind::PERCENT => Mod,
        SyntaxKind::CARET => Pow,
        _ => return None,
    };
    Some(operator)
}
