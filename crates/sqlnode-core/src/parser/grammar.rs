//! Recursive-descent SQL grammar with Pratt expression parsing.
//!
//! Every construct the grammar recognizes is built through
//! [`ParserContext::make_node`], so the factory sees each node exactly once.

use std::collections::VecDeque;

use super::error::{EngineFailure, EngineResult, GrammarError};
use super::pratt::{self, PREDICATE, PREFIX_NOT, PREFIX_UNARY};
use crate::ast::{DataType, Node, NodeArg, NodeKind, NodeType, SqlType};
use crate::config::{Features, ParserConfig};
use crate::context::ParserContext;
use crate::lexer::{Keyword, Lexer, Span, Token, TokenKind};
use crate::node_args;

/// Function names parsed as aggregate calls.
const AGGREGATES: [&str; 5] = ["COUNT", "SUM", "AVG", "MIN", "MAX"];

/// The grammar engine: a lexer plus token lookahead.
///
/// One engine is reused across parses; [`SqlGrammar::start`] points it at new
/// input.
#[derive(Debug)]
pub struct SqlGrammar {
    lexer: Lexer,
    current: Token,
    lookahead: VecDeque<Token>,
    previous_end: usize,
    features: Features,
}

impl SqlGrammar {
    /// Creates an engine for `config`.
    #[must_use]
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            lexer: Lexer::new(config),
            current: Token::new(TokenKind::Eof, Span::default(), 1, 1),
            lookahead: VecDeque::new(),
            previous_end: 0,
            features: config.features,
        }
    }

    /// Loads `text` and scans its first token.
    ///
    /// # Errors
    ///
    /// Returns a lexical failure if the first token is malformed.
    pub fn start(&mut self, text: &str, config: &ParserConfig) -> EngineResult<()> {
        self.lexer.reset(text, config);
        self.lookahead.clear();
        self.previous_end = 0;
        self.features = config.features;
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    /// Parses exactly one statement, optionally followed by semicolons.
    ///
    /// # Errors
    ///
    /// Returns the first syntax, lexical or node construction failure.
    pub fn statement(&mut self, ctx: &mut ParserContext) -> EngineResult<Node> {
        let statement = self.parse_statement(ctx)?;
        while self.eat(&TokenKind::Semicolon)? {}
        if !self.current.is_eof() {
            return Err(self.unexpected("end of input"));
        }
        Ok(statement)
    }

    /// Parses semicolon-separated statements in source order.
    ///
    /// # Errors
    ///
    /// Returns the first syntax, lexical or node construction failure.
    pub fn statements(&mut self, ctx: &mut ParserContext) -> EngineResult<Vec<Node>> {
        let mut statements = Vec::new();
        loop {
            while self.eat(&TokenKind::Semicolon)? {}
            if self.current.is_eof() {
                break;
            }
            statements.push(self.parse_statement(ctx)?);
            if !self.current.is_eof() {
                self.expect(&TokenKind::Semicolon, "';'")?;
            }
        }
        Ok(statements)
    }

    fn parse_statement(&mut self, ctx: &mut ParserContext) -> EngineResult<Node> {
        match &self.current.kind {
            TokenKind::Keyword(Keyword::Select | Keyword::Values) | TokenKind::LeftParen => {
                self.parse_cursor(ctx)
            }
            TokenKind::Keyword(Keyword::Insert) => self.parse_insert(ctx),
            TokenKind::Keyword(Keyword::Update) => self.parse_update(ctx),
            TokenKind::Keyword(Keyword::Delete) => self.parse_delete(ctx),
            TokenKind::Keyword(Keyword::Call) | TokenKind::Question => self.parse_call(ctx),
            TokenKind::Keyword(Keyword::Create) => self.parse_create_table(ctx),
            TokenKind::Keyword(Keyword::Drop) => self.parse_drop_table(ctx),
            _ => Err(self.unexpected("statement")),
        }
    }

    // --- Queries ---

    fn parse_cursor(&mut self, ctx: &mut ParserContext) -> EngineResult<Node> {
        let result_set = self.parse_query_expression(ctx)?;
        let order_by = if self.eat_keyword(Keyword::Order)? {
            self.expect_keyword(Keyword::By)?;
            Some(self.parse_order_by_list(ctx)?)
        } else {
            None
        };
        let (offset, fetch_first) = self.parse_row_limits(ctx)?;
        if order_by.is_none() && offset.is_none() && fetch_first.is_none() {
            return Ok(ctx.make_node(NodeType::Cursor, node_args![result_set])?);
        }
        Ok(ctx.make_node(
            NodeType::Cursor,
            node_args![result_set, order_by, offset, fetch_first],
        )?)
    }

    /// `LIMIT`, `OFFSET` and `FETCH FIRST` in any of their usual spellings.
    fn parse_row_limits(
        &mut self,
        ctx: &mut ParserContext,
    ) -> EngineResult<(Option<Node>, Option<Node>)> {
        let mut offset = None;
        let mut fetch_first = None;
        if self.eat_keyword(Keyword::Limit)? {
            let first = self.parse_expression(ctx, 0)?;
            if self.eat(&TokenKind::Comma)? {
                offset = Some(first);
                fetch_first = Some(self.parse_expression(ctx, 0)?);
            } else {
                fetch_first = Some(first);
            }
        }
        if offset.is_none() && self.eat_keyword(Keyword::Offset)? {
            offset = Some(self.parse_expression(ctx, 0)?);
            if !self.eat_word("ROWS")? {
                self.eat_word("ROW")?;
            }
        }
        if fetch_first.is_none() && self.eat_word("FETCH")? {
            if !self.eat_word("FIRST")? && !self.eat_word("NEXT")? {
                return Err(self.unexpected("FIRST or NEXT"));
            }
            fetch_first = Some(self.parse_expression(ctx, 0)?);
            if !self.eat_word("ROWS")? && !self.eat_word("ROW")? {
                return Err(self.unexpected("ROWS"));
            }
            self.expect_word("ONLY")?;
        }
        Ok((offset, fetch_first))
    }

    /// `UNION` and `EXCEPT`, left associative.
    fn parse_query_expression(&mut self, ctx: &mut ParserContext) -> EngineResult<Node> {
        let mut left = self.parse_query_term(ctx)?;
        loop {
            let node_type = match self.current.as_keyword() {
                Some(Keyword::Union) => NodeType::Union,
                Some(Keyword::Except) => NodeType::Except,
                _ => break,
            };
            self.advance()?;
            let all = self.parse_set_quantifier()?;
            let right = self.parse_query_term(ctx)?;
            left = ctx.make_node(node_type, node_args![left, right, all])?;
        }
        Ok(left)
    }

    /// `INTERSECT` binds tighter than `UNION` and `EXCEPT`.
    fn parse_query_term(&mut self, ctx: &mut ParserContext) -> EngineResult<Node> {
        let mut left = self.parse_query_primary(ctx)?;
        while self.eat_keyword(Keyword::Intersect)? {
            let all = self.parse_set_quantifier()?;
            let right = self.parse_query_primary(ctx)?;
            left = ctx.make_node(NodeType::Intersect, node_args![left, right, all])?;
        }
        Ok(left)
    }

    fn parse_set_quantifier(&mut self) -> EngineResult<bool> {
        if self.eat_keyword(Keyword::All)? {
            return Ok(true);
        }
        self.eat_keyword(Keyword::Distinct)?;
        Ok(false)
    }

    fn parse_query_primary(&mut self, ctx: &mut ParserContext) -> EngineResult<Node> {
        match &self.current.kind {
            TokenKind::Keyword(Keyword::Select) => self.parse_select(ctx),
            TokenKind::Keyword(Keyword::Values) => self.parse_values(ctx),
            TokenKind::LeftParen => {
                self.advance()?;
                let query = self.parse_query_expression(ctx)?;
                self.expect(&TokenKind::RightParen, "')'")?;
                Ok(query)
            }
            _ => Err(self.unexpected("SELECT or VALUES")),
        }
    }

    fn parse_select(&mut self, ctx: &mut ParserContext) -> EngineResult<Node> {
        self.expect_keyword(Keyword::Select)?;
        let distinct = self.parse_select_quantifier()?;
        let columns = self.parse_result_columns(ctx)?;

        // SELECT without FROM gets an empty FROM list.
        let from_items = if self.eat_keyword(Keyword::From)? {
            self.parse_from_items(ctx)?
        } else {
            Vec::new()
        };
        let from_list = ctx.make_node(NodeType::FromList, node_args![from_items])?;

        let where_clause = self.parse_optional_clause(ctx, Keyword::Where)?;
        let group_by = if self.eat_keyword(Keyword::Group)? {
            self.expect_keyword(Keyword::By)?;
            Some(self.parse_group_by_list(ctx)?)
        } else {
            None
        };
        let having = self.parse_optional_clause(ctx, Keyword::Having)?;

        Ok(ctx.make_node(
            NodeType::Select,
            node_args![columns, from_list, where_clause, group_by, having, distinct],
        )?)
    }

    fn parse_select_quantifier(&mut self) -> EngineResult<bool> {
        if self.eat_keyword(Keyword::Distinct)? {
            return Ok(true);
        }
        self.eat_keyword(Keyword::All)?;
        Ok(false)
    }

    fn parse_optional_clause(
        &mut self,
        ctx: &mut ParserContext,
        keyword: Keyword,
    ) -> EngineResult<Option<Node>> {
        if self.eat_keyword(keyword)? {
            Ok(Some(self.parse_expression(ctx, 0)?))
        } else {
            Ok(None)
        }
    }

    fn parse_result_columns(&mut self, ctx: &mut ParserContext) -> EngineResult<Node> {
        let mut columns = Vec::new();
        loop {
            columns.push(self.parse_result_column(ctx)?);
            if !self.eat(&TokenKind::Comma)? {
                break;
            }
        }
        Ok(ctx.make_node(NodeType::ResultColumnList, node_args![columns])?)
    }

    fn parse_result_column(&mut self, ctx: &mut ParserContext) -> EngineResult<Node> {
        if self.eat(&TokenKind::Star)? {
            return Ok(ctx.make_node(NodeType::AllResultColumn, node_args![NodeArg::Null])?);
        }
        if self.is_identifier()
            && matches!(self.peek(1)?.kind, TokenKind::Dot)
            && matches!(self.peek(2)?.kind, TokenKind::Star)
        {
            let start = self.current.span.start;
            let table = self.expect_identifier()?;
            let end = self.previous_end;
            self.advance()?;
            self.advance()?;
            let table_name = ctx.make_node(
                NodeType::TableName,
                node_args![NodeArg::Null, table, start, end],
            )?;
            return Ok(ctx.make_node(NodeType::AllResultColumn, node_args![table_name])?);
        }

        let expression = self.parse_expression(ctx, 0)?;
        let alias = self.parse_alias()?;
        let (name, generated) = match (alias, expression.kind()) {
            (Some(alias), _) => (alias, false),
            (None, NodeKind::ColumnReference(column)) => (column.column_name.clone(), false),
            (None, _) => (ctx.session_mut().next_generated_column_name(), true),
        };
        Ok(ctx.make_node(
            NodeType::ResultColumn,
            node_args![name, expression, generated],
        )?)
    }

    /// `AS name` or a bare name.
    fn parse_alias(&mut self) -> EngineResult<Option<String>> {
        if self.eat_keyword(Keyword::As)? {
            return self.expect_identifier().map(Some);
        }
        if self.is_identifier() && !self.current.is_word("FETCH") {
            return self.expect_identifier().map(Some);
        }
        Ok(None)
    }

    fn parse_values(&mut self, ctx: &mut ParserContext) -> EngineResult<Node> {
        self.expect_keyword(Keyword::Values)?;
        let mut rows = Vec::new();
        loop {
            let row = if self.eat(&TokenKind::LeftParen)? {
                let values = self.parse_expressions(ctx)?;
                self.expect(&TokenKind::RightParen, "')'")?;
                values
            } else {
                vec![self.parse_expression(ctx, 0)?]
            };
            rows.push(ctx.make_node(NodeType::ValueNodeList, node_args![row])?);
            if !self.eat(&TokenKind::Comma)? {
                break;
            }
        }
        let rows = ctx.make_node(NodeType::RowsList, node_args![rows])?;
        Ok(ctx.make_node(NodeType::RowsResultSet, node_args![rows])?)
    }

    fn parse_order_by_list(&mut self, ctx: &mut ParserContext) -> EngineResult<Node> {
        let mut columns = Vec::new();
        loop {
            let expression = self.parse_expression(ctx, 0)?;
            let ascending = if self.eat_keyword(Keyword::Desc)? {
                false
            } else {
                self.eat_keyword(Keyword::Asc)?;
                true
            };
            let nulls_first = if self.eat_word("NULLS")? {
                if self.eat_word("FIRST")? {
                    Some(true)
                } else if self.eat_word("LAST")? {
                    Some(false)
                } else {
                    return Err(self.unexpected("FIRST or LAST"));
                }
            } else {
                None
            };
            columns.push(ctx.make_node(
                NodeType::OrderByColumn,
                node_args![expression, ascending, nulls_first],
            )?);
            if !self.eat(&TokenKind::Comma)? {
                break;
            }
        }
        Ok(ctx.make_node(NodeType::OrderByList, node_args![columns])?)
    }

    fn parse_group_by_list(&mut self, ctx: &mut ParserContext) -> EngineResult<Node> {
        let mut columns = Vec::new();
        loop {
            let element = self.parse_grouping_element(ctx)?;
            columns.push(ctx.make_node(NodeType::GroupByColumn, node_args![element])?);
            if !self.eat(&TokenKind::Comma)? {
                break;
            }
        }
        Ok(ctx.make_node(NodeType::GroupByList, node_args![columns])?)
    }

    /// A grouping expression, or `ROLLUP`, `CUBE` and `GROUPING SETS`
    /// when the dialect enables them.
    fn parse_grouping_element(&mut self, ctx: &mut ParserContext) -> EngineResult<Node> {
        let construct = if self.current.is_word("ROLLUP") {
            Some(NodeType::Rollup)
        } else if self.current.is_word("CUBE") {
            Some(NodeType::Cube)
        } else if self.current.is_word("GROUPING") && self.peek(1)?.is_word("SETS") {
            Some(NodeType::GroupingSets)
        } else {
            None
        };
        let Some(node_type) = construct else {
            return self.parse_expression(ctx, 0);
        };
        // A bare ROLLUP or CUBE is an ordinary column name.
        if node_type != NodeType::GroupingSets
            && !matches!(self.peek(1)?.kind, TokenKind::LeftParen)
        {
            return self.parse_expression(ctx, 0);
        }
        if !self.features.contains(Features::GROUPING) {
            return Err(GrammarError::at(
                &self.current,
                format!("{node_type} is not enabled in this dialect"),
            )
            .into());
        }

        self.advance()?;
        if node_type == NodeType::GroupingSets {
            self.advance()?;
        }
        self.expect(&TokenKind::LeftParen, "'('")?;
        let items = if node_type == NodeType::GroupingSets {
            let mut sets = Vec::new();
            loop {
                sets.push(self.parse_grouping_set(ctx)?);
                if !self.eat(&TokenKind::Comma)? {
                    break;
                }
            }
            sets
        } else {
            self.parse_expressions(ctx)?
        };
        self.expect(&TokenKind::RightParen, "')'")?;
        let items = ctx.make_node(NodeType::ValueNodeList, node_args![items])?;
        Ok(ctx.make_node(node_type, node_args![items])?)
    }

    fn parse_grouping_set(&mut self, ctx: &mut ParserContext) -> EngineResult<Node> {
        if !self.eat(&TokenKind::LeftParen)? {
            return self.parse_expression(ctx, 0);
        }
        let items = if self.check(&TokenKind::RightParen) {
            Vec::new()
        } else {
            self.parse_expressions(ctx)?
        };
        self.expect(&TokenKind::RightParen, "')'")?;
        Ok(ctx.make_node(NodeType::ValueNodeList, node_args![items])?)
    }

    // --- FROM clause ---

    fn parse_from_items(&mut self, ctx: &mut ParserContext) -> EngineResult<Vec<Node>> {
        let mut items = Vec::new();
        loop {
            items.push(self.parse_table_reference(ctx)?);
            if !self.eat(&TokenKind::Comma)? {
                break;
            }
        }
        Ok(items)
    }

    /// A table primary followed by any number of joins.
    fn parse_table_reference(&mut self, ctx: &mut ParserContext) -> EngineResult<Node> {
        let mut left = self.parse_table_primary(ctx)?;
        while let Some(join_type) = self.parse_join_type()? {
            let right = self.parse_table_primary(ctx)?;
            left = if join_type == NodeType::CrossJoin {
                ctx.make_node(join_type, node_args![left, right])?
            } else if self.eat_keyword(Keyword::On)? {
                let on = self.parse_expression(ctx, 0)?;
                ctx.make_node(join_type, node_args![left, right, on, NodeArg::Null])?
            } else if self.eat_keyword(Keyword::Using)? {
                let columns = self.parse_column_list(ctx)?;
                ctx.make_node(join_type, node_args![left, right, NodeArg::Null, columns])?
            } else {
                return Err(self.unexpected("ON or USING"));
            };
        }
        Ok(left)
    }

    fn parse_join_type(&mut self) -> EngineResult<Option<NodeType>> {
        let join_type = match self.current.as_keyword() {
            Some(Keyword::Join) => {
                self.advance()?;
                return Ok(Some(NodeType::InnerJoin));
            }
            Some(Keyword::Inner) => NodeType::InnerJoin,
            Some(Keyword::Left) => NodeType::LeftOuterJoin,
            Some(Keyword::Right) => NodeType::RightOuterJoin,
            Some(Keyword::Full) => NodeType::FullOuterJoin,
            Some(Keyword::Cross) => NodeType::CrossJoin,
            _ => return Ok(None),
        };
        self.advance()?;
        if matches!(
            join_type,
            NodeType::LeftOuterJoin | NodeType::RightOuterJoin | NodeType::FullOuterJoin
        ) {
            self.eat_keyword(Keyword::Outer)?;
        }
        self.expect_keyword(Keyword::Join)?;
        Ok(Some(join_type))
    }

    fn parse_table_primary(&mut self, ctx: &mut ParserContext) -> EngineResult<Node> {
        if self.check(&TokenKind::LeftParen) {
            if self.peek_starts_query()? {
                self.advance()?;
                let query = self.parse_query_expression(ctx)?;
                self.expect(&TokenKind::RightParen, "')'")?;
                let Some(correlation) = self.parse_alias()? else {
                    return Err(self.unexpected("correlation name for derived table"));
                };
                return Ok(ctx.make_node(NodeType::FromSubquery, node_args![query, correlation])?);
            }
            self.advance()?;
            let inner = self.parse_table_reference(ctx)?;
            self.expect(&TokenKind::RightParen, "')'")?;
            return Ok(inner);
        }
        let table = self.parse_table_name(ctx)?;
        let correlation = self.parse_alias()?;
        Ok(ctx.make_node(NodeType::FromBaseTable, node_args![table, correlation])?)
    }

    /// `[schema.]table`, with its source span.
    fn parse_table_name(&mut self, ctx: &mut ParserContext) -> EngineResult<Node> {
        let start = self.current.span.start;
        let first = self.expect_identifier()?;
        let (schema, table) = if self.eat(&TokenKind::Dot)? {
            (Some(first), self.expect_identifier()?)
        } else {
            (None, first)
        };
        Ok(ctx.make_node(
            NodeType::TableName,
            node_args![schema, table, start, self.previous_end],
        )?)
    }

    /// `(a, b, ...)` as a `ValueNodeList` of column references.
    fn parse_column_list(&mut self, ctx: &mut ParserContext) -> EngineResult<Node> {
        self.expect(&TokenKind::LeftParen, "'('")?;
        let mut columns = Vec::new();
        loop {
            let start = self.current.span.start;
            let name = self.expect_identifier()?;
            columns.push(ctx.make_node(
                NodeType::ColumnReference,
                node_args![name, NodeArg::Null, start, self.previous_end],
            )?);
            if !self.eat(&TokenKind::Comma)? {
                break;
            }
        }
        self.expect(&TokenKind::RightParen, "')'")?;
        Ok(ctx.make_node(NodeType::ValueNodeList, node_args![columns])?)
    }

    // --- Data manipulation and definition ---

    fn parse_insert(&mut self, ctx: &mut ParserContext) -> EngineResult<Node> {
        self.expect_keyword(Keyword::Insert)?;
        self.expect_keyword(Keyword::Into)?;
        let table = self.parse_table_name(ctx)?;
        let columns = if self.check(&TokenKind::LeftParen) && !self.peek_starts_query()? {
            Some(self.parse_column_list(ctx)?)
        } else {
            None
        };
        let source = self.parse_query_expression(ctx)?;
        Ok(ctx.make_node(NodeType::Insert, node_args![table, columns, source])?)
    }

    fn parse_update(&mut self, ctx: &mut ParserContext) -> EngineResult<Node> {
        self.expect_keyword(Keyword::Update)?;
        let target = self.parse_target_table(ctx)?;
        self.expect_keyword(Keyword::Set)?;
        let mut assignments = Vec::new();
        loop {
            let column = self.expect_identifier()?;
            self.expect(&TokenKind::Eq, "'='")?;
            let value = self.parse_expression(ctx, 0)?;
            assignments.push(ctx.make_node(NodeType::ResultColumn, node_args![column, value])?);
            if !self.eat(&TokenKind::Comma)? {
                break;
            }
        }
        let assignments = ctx.make_node(NodeType::ResultColumnList, node_args![assignments])?;
        let where_clause = self.parse_optional_clause(ctx, Keyword::Where)?;
        Ok(ctx.make_node(
            NodeType::Update,
            node_args![target, assignments, where_clause],
        )?)
    }

    fn parse_delete(&mut self, ctx: &mut ParserContext) -> EngineResult<Node> {
        self.expect_keyword(Keyword::Delete)?;
        self.expect_keyword(Keyword::From)?;
        let target = self.parse_target_table(ctx)?;
        let where_clause = self.parse_optional_clause(ctx, Keyword::Where)?;
        Ok(ctx.make_node(NodeType::Delete, node_args![target, where_clause])?)
    }

    /// The single base table of UPDATE and DELETE.
    fn parse_target_table(&mut self, ctx: &mut ParserContext) -> EngineResult<Node> {
        let table = self.parse_table_name(ctx)?;
        let correlation = self.parse_alias()?;
        Ok(ctx.make_node(NodeType::FromBaseTable, node_args![table, correlation])?)
    }

    /// `CALL proc(...)` or `? = CALL proc(...)`.
    fn parse_call(&mut self, ctx: &mut ParserContext) -> EngineResult<Node> {
        let return_parameter = if self.eat(&TokenKind::Question)? {
            let number = ctx.session_mut().next_parameter();
            ctx.session_mut().set_return_parameter();
            self.expect(&TokenKind::Eq, "'='")?;
            Some(ctx.make_node(NodeType::Parameter, node_args![number])?)
        } else {
            None
        };
        self.expect_keyword(Keyword::Call)?;
        let name = self.expect_identifier()?;
        self.expect(&TokenKind::LeftParen, "'('")?;
        let arguments = self.parse_call_arguments(ctx)?;
        let procedure = ctx.make_node(NodeType::FunctionCall, node_args![name, arguments])?;
        match return_parameter {
            Some(parameter) => Ok(ctx.make_node(
                NodeType::CallStatement,
                node_args![procedure, parameter],
            )?),
            None => Ok(ctx.make_node(NodeType::CallStatement, node_args![procedure])?),
        }
    }

    fn parse_create_table(&mut self, ctx: &mut ParserContext) -> EngineResult<Node> {
        self.expect_keyword(Keyword::Create)?;
        self.expect_keyword(Keyword::Table)?;
        let if_not_exists = if self.eat_word("IF")? {
            self.expect_keyword(Keyword::Not)?;
            self.expect_keyword(Keyword::Exists)?;
            true
        } else {
            false
        };
        let table = self.parse_table_name(ctx)?;
        self.expect(&TokenKind::LeftParen, "'('")?;
        let mut columns = Vec::new();
        loop {
            columns.push(self.parse_column_definition(ctx)?);
            if !self.eat(&TokenKind::Comma)? {
                break;
            }
        }
        self.expect(&TokenKind::RightParen, "')'")?;
        let elements = ctx.make_node(NodeType::TableElementList, node_args![columns])?;
        Ok(ctx.make_node(
            NodeType::CreateTable,
            node_args![table, elements, if_not_exists],
        )?)
    }

    fn parse_column_definition(&mut self, ctx: &mut ParserContext) -> EngineResult<Node> {
        let name = self.expect_identifier()?;
        let data_type = self.parse_sql_type()?;
        let mut not_null = false;
        let mut default = None;
        loop {
            if self.eat_keyword(Keyword::Not)? {
                self.expect_keyword(Keyword::Null)?;
                not_null = true;
            } else if self.eat_keyword(Keyword::Null)? {
                not_null = false;
            } else if self.eat_keyword(Keyword::Default)? {
                default = Some(self.parse_expression(ctx, PREDICATE.1)?);
            } else {
                break;
            }
        }
        Ok(ctx.make_node(
            NodeType::ColumnDefinition,
            node_args![name, data_type, not_null, default],
        )?)
    }

    fn parse_drop_table(&mut self, ctx: &mut ParserContext) -> EngineResult<Node> {
        self.expect_keyword(Keyword::Drop)?;
        self.expect_keyword(Keyword::Table)?;
        let if_exists = if self.eat_word("IF")? {
            self.expect_keyword(Keyword::Exists)?;
            true
        } else {
            false
        };
        let table = self.parse_table_name(ctx)?;
        Ok(ctx.make_node(NodeType::DropTable, node_args![table, if_exists])?)
    }

    // --- Expressions ---

    fn parse_expression(&mut self, ctx: &mut ParserContext, min_bp: u8) -> EngineResult<Node> {
        let mut lhs = self.parse_prefix(ctx)?;
        loop {
            if pratt::starts_predicate(&self.current.kind) {
                if PREDICATE.0 < min_bp || !self.predicate_follows()? {
                    break;
                }
                lhs = self.parse_predicate(ctx, lhs)?;
                continue;
            }
            let Some((node_type, (left_bp, right_bp))) =
                pratt::infix_operator(&self.current, self.features)
            else {
                break;
            };
            if left_bp < min_bp {
                break;
            }
            self.advance()?;
            let rhs = self.parse_expression(ctx, right_bp)?;
            lhs = ctx.make_node(node_type, node_args![lhs, rhs])?;
        }
        Ok(lhs)
    }

    /// False for a `NOT` that does not introduce `IN`, `BETWEEN` or `LIKE`
    /// (e.g. the `NOT NULL` of a column definition).
    fn predicate_follows(&mut self) -> EngineResult<bool> {
        if !matches!(self.current.kind, TokenKind::Keyword(Keyword::Not)) {
            return Ok(true);
        }
        Ok(matches!(
            self.peek(1)?.kind,
            TokenKind::Keyword(Keyword::In | Keyword::Between | Keyword::Like)
        ))
    }

    fn parse_predicate(&mut self, ctx: &mut ParserContext, operand: Node) -> EngineResult<Node> {
        if self.eat_keyword(Keyword::Is)? {
            let node_type = if self.eat_keyword(Keyword::Not)? {
                NodeType::IsNotNull
            } else {
                NodeType::IsNull
            };
            self.expect_keyword(Keyword::Null)?;
            return Ok(ctx.make_node(node_type, node_args![operand])?);
        }

        let negated = self.eat_keyword(Keyword::Not)?;
        match self.current.as_keyword() {
            Some(Keyword::In) => {
                self.advance()?;
                self.parse_in(ctx, operand, negated)
            }
            Some(Keyword::Between) => {
                self.advance()?;
                let low = self.parse_expression(ctx, PREDICATE.1)?;
                self.expect_keyword(Keyword::And)?;
                let high = self.parse_expression(ctx, PREDICATE.1)?;
                let node_type = if negated {
                    NodeType::NotBetween
                } else {
                    NodeType::Between
                };
                Ok(ctx.make_node(node_type, node_args![operand, low, high])?)
            }
            Some(Keyword::Like) => {
                self.advance()?;
                let pattern = self.parse_expression(ctx, PREDICATE.1)?;
                let node_type = if negated {
                    NodeType::NotLike
                } else {
                    NodeType::Like
                };
                if self.eat_word("ESCAPE")? {
                    let escape = self.parse_expression(ctx, PREDICATE.1)?;
                    return Ok(ctx.make_node(node_type, node_args![operand, pattern, escape])?);
                }
                Ok(ctx.make_node(node_type, node_args![operand, pattern])?)
            }
            _ => Err(self.unexpected("IN, BETWEEN or LIKE")),
        }
    }

    fn parse_in(
        &mut self,
        ctx: &mut ParserContext,
        operand: Node,
        negated: bool,
    ) -> EngineResult<Node> {
        self.expect(&TokenKind::LeftParen, "'('")?;
        if matches!(
            self.current.as_keyword(),
            Some(Keyword::Select | Keyword::Values)
        ) {
            let query = self.parse_query_expression(ctx)?;
            self.expect(&TokenKind::RightParen, "')'")?;
            let node_type = if negated {
                NodeType::NotInSubquery
            } else {
                NodeType::InSubquery
            };
            return Ok(ctx.make_node(node_type, node_args![operand, query])?);
        }
        let values = self.parse_expressions(ctx)?;
        self.expect(&TokenKind::RightParen, "')'")?;
        let values = ctx.make_node(NodeType::ValueNodeList, node_args![values])?;
        let node_type = if negated {
            NodeType::NotInList
        } else {
            NodeType::InList
        };
        Ok(ctx.make_node(node_type, node_args![operand, values])?)
    }

    fn parse_prefix(&mut self, ctx: &mut ParserContext) -> EngineResult<Node> {
        if self.eat_keyword(Keyword::Not)? {
            let operand = self.parse_expression(ctx, PREFIX_NOT)?;
            return Ok(ctx.make_node(NodeType::Not, node_args![operand])?);
        }
        if let Some(node_type) = pratt::prefix_operator(&self.current.kind, self.features) {
            self.advance()?;
            let operand = self.parse_expression(ctx, PREFIX_UNARY)?;
            return Ok(ctx.make_node(node_type, node_args![operand])?);
        }
        self.parse_primary(ctx)
    }

    fn parse_primary(&mut self, ctx: &mut ParserContext) -> EngineResult<Node> {
        match &self.current.kind {
            TokenKind::LeftParen => return self.parse_parenthesized(ctx),
            TokenKind::Identifier(_) | TokenKind::QuotedIdentifier(_) => {
                return self.parse_identifier_expression(ctx);
            }
            TokenKind::Keyword(Keyword::Case) => return self.parse_case(ctx),
            TokenKind::Keyword(Keyword::Cast) => return self.parse_cast(ctx),
            TokenKind::Keyword(Keyword::Exists) => {
                self.advance()?;
                self.expect(&TokenKind::LeftParen, "'('")?;
                let query = self.parse_query_expression(ctx)?;
                self.expect(&TokenKind::RightParen, "')'")?;
                return Ok(ctx.make_node(NodeType::ExistsSubquery, node_args![query])?);
            }
            _ => {}
        }

        let token = self.advance()?;
        let node = match token.kind {
            TokenKind::Integer(value) => {
                let node_type = if i32::try_from(value).is_ok() {
                    NodeType::IntConstant
                } else {
                    NodeType::LongintConstant
                };
                ctx.make_node(node_type, node_args![value])?
            }
            TokenKind::Decimal(text) => ctx.make_node(NodeType::DecimalConstant, node_args![text])?,
            TokenKind::Float(value) => ctx.make_node(NodeType::DoubleConstant, node_args![value])?,
            TokenKind::String(value) => {
                ctx.make_node(NodeType::VarcharConstant, node_args![value])?
            }
            TokenKind::Keyword(Keyword::True) => {
                ctx.make_node(NodeType::BooleanConstant, node_args![true])?
            }
            TokenKind::Keyword(Keyword::False) => {
                ctx.make_node(NodeType::BooleanConstant, node_args![false])?
            }
            TokenKind::Keyword(Keyword::Null) => {
                ctx.make_node(NodeType::UntypedNullConstant, node_args![])?
            }
            TokenKind::Question => {
                let number = ctx.session_mut().next_parameter();
                ctx.make_node(NodeType::Parameter, node_args![number])?
            }
            _ => return Err(GrammarError::unexpected(&token, "expression").into()),
        };
        Ok(node)
    }

    /// A scalar subquery or a parenthesized expression.
    fn parse_parenthesized(&mut self, ctx: &mut ParserContext) -> EngineResult<Node> {
        let is_query = self.peek_starts_query()?;
        self.advance()?;
        if is_query {
            let query = self.parse_query_expression(ctx)?;
            self.expect(&TokenKind::RightParen, "')'")?;
            return Ok(ctx.make_node(NodeType::ExpressionSubquery, node_args![query])?);
        }
        let inner = self.parse_expression(ctx, 0)?;
        self.expect(&TokenKind::RightParen, "')'")?;
        Ok(inner)
    }

    /// A function call or an optionally qualified column reference.
    fn parse_identifier_expression(&mut self, ctx: &mut ParserContext) -> EngineResult<Node> {
        let start = self.current.span.start;
        let quoted = matches!(self.current.kind, TokenKind::QuotedIdentifier(_));
        let first = self.expect_identifier()?;
        if !quoted && self.check(&TokenKind::LeftParen) {
            return self.parse_function_call(ctx, first);
        }

        let mut names = vec![first];
        let mut qualifier_end = start;
        while names.len() < 3 && self.check(&TokenKind::Dot) {
            qualifier_end = self.previous_end;
            self.advance()?;
            names.push(self.expect_identifier()?);
        }
        let end = self.previous_end;
        let column = names.pop().unwrap_or_default();
        let table = match (names.pop(), names.pop()) {
            (Some(table), schema) => Some(ctx.make_node(
                NodeType::TableName,
                node_args![schema, table, start, qualifier_end],
            )?),
            (None, _) => None,
        };
        Ok(ctx.make_node(
            NodeType::ColumnReference,
            node_args![column, table, start, end],
        )?)
    }

    fn parse_function_call(&mut self, ctx: &mut ParserContext, name: String) -> EngineResult<Node> {
        self.expect(&TokenKind::LeftParen, "'('")?;
        let aggregate = AGGREGATES.iter().any(|known| name.eq_ignore_ascii_case(known));
        if !aggregate {
            let arguments = self.parse_call_arguments(ctx)?;
            return Ok(ctx.make_node(NodeType::FunctionCall, node_args![name, arguments])?);
        }

        if name.eq_ignore_ascii_case("COUNT") && self.eat(&TokenKind::Star)? {
            self.expect(&TokenKind::RightParen, "')'")?;
            let arguments = ctx.make_node(NodeType::ValueNodeList, node_args![Vec::<Node>::new()])?;
            return Ok(ctx.make_node(
                NodeType::AggregateFunction,
                node_args![name, arguments, false, true],
            )?);
        }
        let distinct = self.parse_select_quantifier()?;
        let arguments = self.parse_call_arguments(ctx)?;
        Ok(ctx.make_node(
            NodeType::AggregateFunction,
            node_args![name, arguments, distinct, false],
        )?)
    }

    /// Arguments up to and including the closing parenthesis.
    fn parse_call_arguments(&mut self, ctx: &mut ParserContext) -> EngineResult<Node> {
        let arguments = if self.eat(&TokenKind::RightParen)? {
            Vec::new()
        } else {
            let arguments = self.parse_expressions(ctx)?;
            self.expect(&TokenKind::RightParen, "')'")?;
            arguments
        };
        Ok(ctx.make_node(NodeType::ValueNodeList, node_args![arguments])?)
    }

    fn parse_case(&mut self, ctx: &mut ParserContext) -> EngineResult<Node> {
        self.expect_keyword(Keyword::Case)?;
        let operand = if self.check_keyword(Keyword::When) {
            None
        } else {
            Some(self.parse_expression(ctx, 0)?)
        };
        let mut whens = Vec::new();
        let mut thens = Vec::new();
        while self.eat_keyword(Keyword::When)? {
            whens.push(self.parse_expression(ctx, 0)?);
            self.expect_keyword(Keyword::Then)?;
            thens.push(self.parse_expression(ctx, 0)?);
        }
        if whens.is_empty() {
            return Err(self.unexpected("WHEN"));
        }
        let else_result = self.parse_optional_clause(ctx, Keyword::Else)?;
        self.expect_keyword(Keyword::End)?;

        let when_list = ctx.make_node(NodeType::ValueNodeList, node_args![whens])?;
        let then_list = ctx.make_node(NodeType::ValueNodeList, node_args![thens])?;
        let node = match operand {
            Some(operand) => ctx.make_node(
                NodeType::Conditional,
                node_args![operand, when_list, then_list, else_result],
            )?,
            None => ctx.make_node(
                NodeType::Conditional,
                node_args![when_list, then_list, else_result],
            )?,
        };
        Ok(node)
    }

    fn parse_cast(&mut self, ctx: &mut ParserContext) -> EngineResult<Node> {
        self.expect_keyword(Keyword::Cast)?;
        self.expect(&TokenKind::LeftParen, "'('")?;
        let value = self.parse_expression(ctx, 0)?;
        self.expect_keyword(Keyword::As)?;
        let target = self.parse_sql_type()?;
        self.expect(&TokenKind::RightParen, "')'")?;
        Ok(ctx.make_node(NodeType::Cast, node_args![value, target])?)
    }

    /// A type name with optional size, precision or `UNSIGNED` suffix.
    fn parse_sql_type(&mut self) -> EngineResult<SqlType> {
        let unsigned_enabled = self.features.contains(Features::UNSIGNED);
        if self.current.is_word("UNSIGNED") || self.current.is_word("SIGNED") {
            if !unsigned_enabled {
                return Err(self.unexpected("data type"));
            }
            let unsigned = self.current.is_word("UNSIGNED");
            self.advance()?;
            if !self.eat_word("INTEGER")? {
                self.eat_word("INT")?;
            }
            let sql_type = SqlType::new(DataType::Bigint);
            return Ok(if unsigned { sql_type.unsigned() } else { sql_type });
        }

        if !self.is_identifier() {
            return Err(self.unexpected("data type"));
        }
        let name = self.expect_identifier()?;
        let mut data_type = DataType::from_name(&name);
        match &mut data_type {
            DataType::Decimal { precision, scale } => {
                if self.eat(&TokenKind::LeftParen)? {
                    *precision = Some(self.parse_type_size()?);
                    if self.eat(&TokenKind::Comma)? {
                        *scale = Some(self.parse_type_size()?);
                    }
                    self.expect(&TokenKind::RightParen, "')'")?;
                }
            }
            DataType::Char(length) | DataType::Varchar(length) => {
                if self.eat(&TokenKind::LeftParen)? {
                    *length = Some(self.parse_type_size()?);
                    self.expect(&TokenKind::RightParen, "')'")?;
                }
            }
            DataType::Double if name.eq_ignore_ascii_case("DOUBLE") => {
                self.eat_word("PRECISION")?;
            }
            _ => {}
        }

        let sql_type = SqlType::new(data_type);
        if unsigned_enabled && sql_type.data_type.is_numeric() && self.eat_word("UNSIGNED")? {
            return Ok(sql_type.unsigned());
        }
        Ok(sql_type)
    }

    fn parse_type_size<T: TryFrom<i64>>(&mut self) -> EngineResult<T> {
        let token = self.advance()?;
        match token.kind {
            TokenKind::Integer(value) => T::try_from(value).map_err(|_| {
                EngineFailure::from(GrammarError::at(&token, "type size out of range"))
            }),
            _ => Err(GrammarError::unexpected(&token, "type size").into()),
        }
    }

    fn parse_expressions(&mut self, ctx: &mut ParserContext) -> EngineResult<Vec<Node>> {
        let mut expressions = Vec::new();
        loop {
            expressions.push(self.parse_expression(ctx, 0)?);
            if !self.eat(&TokenKind::Comma)? {
                break;
            }
        }
        Ok(expressions)
    }

    // --- Helper methods ---

    /// Consumes the current token and returns it.
    fn advance(&mut self) -> EngineResult<Token> {
        let next = match self.lookahead.pop_front() {
            Some(token) => token,
            None => self.lexer.next_token()?,
        };
        let token = std::mem::replace(&mut self.current, next);
        self.previous_end = token.span.end;
        Ok(token)
    }

    /// Returns the token `distance` positions after the current one.
    fn peek(&mut self, distance: usize) -> EngineResult<&Token> {
        while self.lookahead.len() < distance {
            let token = self.lexer.next_token()?;
            self.lookahead.push_back(token);
        }
        Ok(&self.lookahead[distance - 1])
    }

    fn peek_starts_query(&mut self) -> EngineResult<bool> {
        Ok(matches!(
            self.peek(1)?.kind,
            TokenKind::Keyword(Keyword::Select | Keyword::Values)
        ))
    }

    fn check(&self, kind: &TokenKind) -> bool {
        core::mem::discriminant(&self.current.kind) == core::mem::discriminant(kind)
    }

    fn check_keyword(&self, keyword: Keyword) -> bool {
        self.current.as_keyword() == Some(keyword)
    }

    const fn is_identifier(&self) -> bool {
        matches!(
            self.current.kind,
            TokenKind::Identifier(_) | TokenKind::QuotedIdentifier(_)
        )
    }

    fn eat(&mut self, kind: &TokenKind) -> EngineResult<bool> {
        if self.check(kind) {
            self.advance()?;
            return Ok(true);
        }
        Ok(false)
    }

    fn eat_keyword(&mut self, keyword: Keyword) -> EngineResult<bool> {
        if self.check_keyword(keyword) {
            self.advance()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Consumes the contextual word `word` if it is next.
    fn eat_word(&mut self, word: &str) -> EngineResult<bool> {
        if self.current.is_word(word) {
            self.advance()?;
            return Ok(true);
        }
        Ok(false)
    }

    fn expect(&mut self, kind: &TokenKind, expected: &str) -> EngineResult<()> {
        if self.eat(kind)? {
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> EngineResult<()> {
        if self.eat_keyword(keyword)? {
            Ok(())
        } else {
            Err(self.unexpected(keyword.as_str()))
        }
    }

    fn expect_word(&mut self, word: &str) -> EngineResult<()> {
        if self.eat_word(word)? {
            Ok(())
        } else {
            Err(self.unexpected(word))
        }
    }

    fn expect_identifier(&mut self) -> EngineResult<String> {
        if !self.is_identifier() {
            return Err(self.unexpected("identifier"));
        }
        match self.advance()?.kind {
            TokenKind::Identifier(name) | TokenKind::QuotedIdentifier(name) => Ok(name),
            _ => Err(self.unexpected("identifier")),
        }
    }

    fn unexpected(&self, expected: &str) -> EngineFailure {
        GrammarError::unexpected(&self.current, expected).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ComparisonOperator, NumericValue};
    use crate::error::SqlError;

    fn parse_with(config: ParserConfig, sql: &str) -> EngineResult<Node> {
        let mut ctx = ParserContext::new(config.clone());
        let mut grammar = SqlGrammar::new(&config);
        grammar.start(sql, &config)?;
        grammar.statement(&mut ctx)
    }

    fn parse(sql: &str) -> Node {
        parse_with(ParserConfig::default(), sql).unwrap()
    }

    fn where_clause(cursor: &Node) -> &Node {
        let NodeKind::Cursor(cursor) = cursor.kind() else {
            panic!("expected cursor, got {}", cursor.node_type());
        };
        let NodeKind::Select(select) = cursor.result_set.kind() else {
            panic!("expected select");
        };
        select.where_clause.as_deref().unwrap()
    }

    #[test]
    fn test_expression_precedence() {
        let cursor = parse("SELECT a FROM t WHERE a + b * 2 = 7 OR NOT c AND d");
        let predicate = where_clause(&cursor);
        assert_eq!(predicate.node_type(), NodeType::Or);
        let children = predicate.children();
        assert_eq!(children[0].node_type(), NodeType::BinaryEquals);
        assert_eq!(children[1].node_type(), NodeType::And);
        assert_eq!(children[1].children()[0].node_type(), NodeType::Not);

        let sum = children[0].children()[0];
        assert_eq!(sum.node_type(), NodeType::BinaryPlus);
        assert_eq!(sum.children()[1].node_type(), NodeType::BinaryTimes);
    }

    #[test]
    fn test_predicates() {
        let cursor = parse(
            "SELECT a FROM t WHERE a NOT BETWEEN 1 AND 5 AND b IS NOT NULL \
             AND c NOT IN (1, 2) AND d LIKE 'x%' ESCAPE '!' AND e IN (SELECT f FROM u)",
        );
        let mut types = Vec::new();
        let mut node = where_clause(&cursor);
        while node.node_type() == NodeType::And {
            types.push(node.children()[1].node_type());
            node = node.children()[0];
        }
        types.push(node.node_type());
        types.reverse();
        assert_eq!(
            types,
            [
                NodeType::NotBetween,
                NodeType::IsNotNull,
                NodeType::NotInList,
                NodeType::Like,
                NodeType::InSubquery,
            ]
        );
    }

    #[test]
    fn test_comparison_operands() {
        let cursor = parse("SELECT a FROM t WHERE t.a <> 2147483648");
        let NodeKind::BinaryComparison(comparison) = where_clause(&cursor).kind() else {
            panic!("expected comparison");
        };
        assert_eq!(comparison.operator, ComparisonOperator::NotEquals);
        let NodeKind::ColumnReference(column) = comparison.left.kind() else {
            panic!("expected column");
        };
        assert_eq!(column.column_name, "a");
        assert_eq!(column.qualifier().map(|table| table.table.as_str()), Some("t"));
        assert_eq!(comparison.right.node_type(), NodeType::LongintConstant);
    }

    #[test]
    fn test_generated_column_names() {
        let cursor = parse("SELECT a, a + 1, 2 AS two, 3 FROM t");
        let NodeKind::Cursor(cursor) = cursor.kind() else {
            panic!("expected cursor");
        };
        let NodeKind::Select(select) = cursor.result_set.kind() else {
            panic!("expected select");
        };
        let names: Vec<_> = select
            .result_columns
            .children()
            .into_iter()
            .map(|column| match column.kind() {
                NodeKind::ResultColumn(column) => column.name.clone().unwrap_or_default(),
                _ => String::new(),
            })
            .collect();
        assert_eq!(names, ["a", "_SQL_COL_1", "two", "_SQL_COL_2"]);
    }

    #[test]
    fn test_set_operations_and_limits() {
        let cursor = parse(
            "SELECT a FROM t UNION ALL SELECT a FROM u INTERSECT SELECT a FROM v \
             ORDER BY a DESC NULLS LAST LIMIT 10 OFFSET 5",
        );
        let NodeKind::Cursor(cursor) = cursor.kind() else {
            panic!("expected cursor");
        };
        assert_eq!(cursor.result_set.node_type(), NodeType::Union);
        assert_eq!(cursor.result_set.children()[1].node_type(), NodeType::Intersect);
        assert!(cursor.order_by.is_some());
        assert!(cursor.offset.is_some());
        assert!(cursor.fetch_first.is_some());
    }

    #[test]
    fn test_values_and_insert() {
        let insert = parse("INSERT INTO s.t (a, b) VALUES (1, 'x'), (2, 'y')");
        let NodeKind::Insert(insert) = insert.kind() else {
            panic!("expected insert");
        };
        assert_eq!(insert.source.node_type(), NodeType::RowsResultSet);
        assert!(insert.columns.is_some());
    }

    #[test]
    fn test_statements_and_ddl() {
        assert_eq!(
            parse("UPDATE t SET a = a + 1, b = ? WHERE c = ?").node_type(),
            NodeType::Update
        );
        assert_eq!(parse("DELETE FROM t x WHERE x.a = 1").node_type(), NodeType::Delete);
        assert_eq!(
            parse("CREATE TABLE IF NOT EXISTS t (a INTEGER NOT NULL DEFAULT 0, b VARCHAR(20))")
                .node_type(),
            NodeType::CreateTable
        );
        assert_eq!(parse("DROP TABLE IF EXISTS t").node_type(), NodeType::DropTable);
        assert_eq!(parse("? = CALL refresh(?, 1)").node_type(), NodeType::CallStatement);
    }

    #[test]
    fn test_joins_and_derived_tables() {
        let cursor = parse(
            "SELECT * FROM a JOIN b ON a.id = b.id LEFT JOIN c USING (id) \
             CROSS JOIN (SELECT 1 AS one) d",
        );
        let NodeKind::Cursor(cursor) = cursor.kind() else {
            panic!("expected cursor");
        };
        let NodeKind::Select(select) = cursor.result_set.kind() else {
            panic!("expected select");
        };
        let from = select.from_list.children();
        assert_eq!(from.len(), 1);
        assert_eq!(from[0].node_type(), NodeType::CrossJoin);
        assert_eq!(from[0].children()[1].node_type(), NodeType::FromSubquery);
    }

    #[test]
    fn test_case_cast_and_aggregates() {
        let cursor = parse(
            "SELECT CASE WHEN a > 0 THEN 'pos' ELSE 'neg' END, CAST(b AS DECIMAL(10, 2)), \
             COUNT(*), SUM(DISTINCT c), 1.5, 1e3 FROM t",
        );
        let mut types = Vec::new();
        let NodeKind::Cursor(cursor) = cursor.kind() else {
            panic!("expected cursor");
        };
        let NodeKind::Select(select) = cursor.result_set.kind() else {
            panic!("expected select");
        };
        for column in select.result_columns.children() {
            types.push(column.children()[0].node_type());
        }
        assert_eq!(
            types,
            [
                NodeType::Conditional,
                NodeType::Cast,
                NodeType::AggregateFunction,
                NodeType::AggregateFunction,
                NodeType::DecimalConstant,
                NodeType::DoubleConstant,
            ]
        );
        let NodeKind::NumericConstant(constant) = select.result_columns.children()[4]
            .children()[0]
            .kind()
        else {
            panic!("expected numeric constant");
        };
        assert_eq!(constant.value, NumericValue::Decimal("1.5".into()));
    }

    #[test]
    fn test_node_errors_pass_through() {
        match parse_with(ParserConfig::default(), "SELECT * FROM t, t") {
            Err(EngineFailure::Node(SqlError::DuplicateTableName { name })) => {
                assert_eq!(name, "t");
            }
            other => panic!("expected duplicate table error, got {other:?}"),
        }
    }

    #[test]
    fn test_syntax_error_position() {
        match parse_with(ParserConfig::default(), "SELECT a FROM WHERE") {
            Err(EngineFailure::Grammar(error)) => {
                assert_eq!((error.line, error.column), (1, 15));
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }
}
