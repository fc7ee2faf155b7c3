//! The FlyQL parser.
//!
//! Parsing is a single pass over the input driven by a finite-state machine.
//! Each character is classified (see [`crate::lexer`]) and fed to
//! [`transition`], which takes the current [`State`] and an owned
//! [`Context`] and hands back the next state and the updated context. The
//! context accumulates the key, operator and value text of the expression
//! being read and grows the tree as expressions complete.
//!
//! Parentheses push the node under construction, together with the boolean
//! operator that preceded the group, onto a stack; the matching `)` pops it
//! and joins the finished group back in.

use crate::ast::operators::{MAX_BOOL_OPERATOR_LEN, VALID_BOOL_OPERATORS_CHARS};
use crate::ast::{BoolOperator, Expression, Node, Operator};
use crate::error::{FlyqlError, ParserError, errno};
use crate::lexer::{BACKSLASH, Char, DELIMITER, DOUBLE_QUOTE, Position, SINGLE_QUOTE};
use serde::Serialize;
use std::mem;
use tracing::{debug, trace};

/// States of the parsing machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum State {
    Initial,
    Key,
    SingleQuotedKey,
    DoubleQuotedKey,
    ExpectOperator,
    KeyValueOperator,
    ExpectValue,
    Value,
    SingleQuotedValue,
    DoubleQuotedValue,
    BoolOpDelimiter,
    ExpectBoolOp,
    Error,
}

/// Classification given to every consumed character, used for highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CharType {
    #[serde(rename = "flyqlKey")]
    Key,
    #[serde(rename = "flyqlValue")]
    Value,
    #[serde(rename = "flyqlOperator")]
    Operator,
    #[serde(rename = "number")]
    Number,
    #[serde(rename = "string")]
    String,
    #[serde(rename = "space")]
    Space,
}

impl CharType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CharType::Key => "flyqlKey",
            CharType::Value => "flyqlValue",
            CharType::Operator => "flyqlOperator",
            CharType::Number => "number",
            CharType::String => "string",
            CharType::Space => "space",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypedChar {
    pub char: Char,
    pub kind: CharType,
}

/// Options for a parse call.
///
/// `raise_error` decides whether a failed parse is returned as `Err` or as a
/// [`Parser`] sitting in [`State::Error`]. `ignore_last_char` skips the
/// end-of-input checks, leaving the machine exactly where the text stopped;
/// editors use it on text that is still being typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub raise_error: bool,
    pub ignore_last_char: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            raise_error: true,
            ignore_last_char: false,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise_error(mut self, raise_error: bool) -> Self {
        self.raise_error = raise_error;
        self
    }

    pub fn ignore_last_char(mut self, ignore_last_char: bool) -> Self {
        self.ignore_last_char = ignore_last_char;
        self
    }
}

/// A tree node still being assembled.
///
/// It may be missing one or both children; [`PendingNode::into_node`]
/// collapses it into a proper [`Node`].
#[derive(Debug, Clone, Default, PartialEq)]
struct PendingNode {
    bool_operator: Option<BoolOperator>,
    left: Option<Node>,
    right: Option<Node>,
}

impl PendingNode {
    fn new(bool_operator: Option<BoolOperator>) -> Self {
        PendingNode {
            bool_operator,
            left: None,
            right: None,
        }
    }

    fn set_bool_operator(&mut self, bool_operator: Option<BoolOperator>) {
        if bool_operator.is_some() {
            self.bool_operator = bool_operator;
        }
    }

    fn into_node(self) -> Option<Node> {
        match (self.left, self.right) {
            (Some(left), Some(right)) => Some(Node::internal(
                self.bool_operator.unwrap_or_default(),
                left,
                right,
            )),
            (Some(only), None) | (None, Some(only)) => Some(only),
            (None, None) => None,
        }
    }
}

/// Saved state of an enclosing group while a parenthesised group is open.
#[derive(Debug, Clone, PartialEq)]
struct GroupFrame {
    node: PendingNode,
    bool_operator: Option<BoolOperator>,
}

/// One machine input: the character plus its raw neighbours in the text.
#[derive(Debug, Clone, Copy)]
pub struct Step {
    pub ch: Char,
    pub prev: Option<char>,
    pub next: Option<char>,
}

/// Everything the machine carries from one character to the next.
#[derive(Debug, Clone, Default)]
pub struct Context {
    key: String,
    value: String,
    value_is_string: bool,
    key_value_operator: String,
    bool_operator: String,
    current: PendingNode,
    groups: Vec<GroupFrame>,
    error: Option<ParserError>,
    typed_chars: Vec<TypedChar>,
}

impl Context {
    pub fn new() -> Self {
        Context {
            bool_operator: BoolOperator::And.to_string(),
            ..Default::default()
        }
    }

    fn fail(&mut self, ch: Option<&Char>, message: &str, code: u32) -> State {
        let message = match ch {
            Some(ch) => format!(
                "{} [char {} at {}], errno={}",
                message,
                ch.value,
                ch.pos(),
                code
            ),
            None => message.to_string(),
        };
        debug!(errno = code, %message, "parser entered error state");
        self.error = Some(ParserError::new(message, code));
        State::Error
    }

    fn store_typed_char(&mut self, ch: &Char, kind: CharType) {
        self.typed_chars.push(TypedChar { char: *ch, kind });
    }

    fn parsed_bool_operator(&self) -> Option<BoolOperator> {
        self.bool_operator.parse().ok()
    }

    fn reset_data(&mut self) {
        self.key.clear();
        self.value.clear();
        self.value_is_string = false;
        self.key_value_operator.clear();
    }

    fn operator_is_valid(&self) -> bool {
        self.key_value_operator.parse::<Operator>().is_ok()
    }

    fn new_expression(&self) -> Result<Expression, ParserError> {
        Expression::from_raw(
            &self.key,
            &self.key_value_operator,
            &self.value,
            self.value_is_string,
        )
        .map_err(|e| match e {
            FlyqlError::InvalidOperator(op) => {
                ParserError::new(format!("unknown operator: {}", op), errno::INVALID_OPERATOR)
            }
            FlyqlError::Parser(e) => e,
            other => ParserError::new(format!("invalid key: {}", other), errno::INVALID_KEY),
        })
    }

    /// Add the completed expression to the node under construction.
    ///
    /// Expressions fold to the left: once the current node is full it
    /// becomes the left child of a new node.
    fn extend_tree(&mut self) -> Result<(), ParserError> {
        let leaf = Node::leaf(self.new_expression()?);
        let bool_operator = self.parsed_bool_operator();

        if self.current.left.is_none() {
            self.current.left = Some(leaf);
            self.current.set_bool_operator(bool_operator);
        } else if self.current.right.is_none() {
            self.current.right = Some(leaf);
            self.current.set_bool_operator(bool_operator);
        } else {
            let previous = mem::take(&mut self.current);
            self.current = PendingNode {
                bool_operator: Some(bool_operator.unwrap_or_default()),
                left: previous.into_node(),
                right: Some(leaf),
            };
        }
        Ok(())
    }

    /// Same as [`Context::extend_tree`], routing failures into the error state.
    fn complete_expression(&mut self, ch: &Char) -> Option<State> {
        match self.extend_tree() {
            Ok(()) => None,
            Err(e) => Some(self.fail(Some(ch), &e.message, e.errno)),
        }
    }

    fn open_group(&mut self) {
        let node = mem::take(&mut self.current);
        let bool_operator = self.parsed_bool_operator();
        self.groups.push(GroupFrame {
            node,
            bool_operator,
        });
    }

    /// Join the finished group back into the node that was open before it.
    fn close_group(&mut self) {
        let Some(frame) = self.groups.pop() else {
            return;
        };
        let mut outer = frame.node;
        let interior = mem::take(&mut self.current).into_node();

        if let Some(interior) = interior {
            if outer.left.is_none() && outer.right.is_none() {
                outer.left = Some(interior);
                outer.set_bool_operator(frame.bool_operator);
            } else if outer.right.is_none() {
                outer.right = Some(interior);
                outer.set_bool_operator(frame.bool_operator);
            } else {
                outer = PendingNode {
                    bool_operator: Some(frame.bool_operator.unwrap_or_default()),
                    left: outer.into_node(),
                    right: Some(interior),
                };
            }
        }
        self.current = outer;
    }

    fn initial(&mut self, step: &Step) -> State {
        let ch = &step.ch;
        self.reset_data();
        self.current = PendingNode::new(self.parsed_bool_operator());

        if ch.is_group_open() {
            self.open_group();
            self.store_typed_char(ch, CharType::Operator);
            State::Initial
        } else if ch.is_delimiter() {
            self.store_typed_char(ch, CharType::Space);
            State::BoolOpDelimiter
        } else {
            self.start_key(ch)
                .unwrap_or_else(|| self.fail(Some(ch), "invalid character", errno::INVALID_CHAR_INITIAL))
        }
    }

    /// Begin a key with a key character or an opening quote.
    fn start_key(&mut self, ch: &Char) -> Option<State> {
        let next = if ch.is_key() {
            State::Key
        } else if ch.is_single_quote() {
            State::SingleQuotedKey
        } else if ch.is_double_quote() {
            State::DoubleQuotedKey
        } else {
            return None;
        };
        self.key.push(ch.value);
        self.store_typed_char(ch, CharType::Key);
        Some(next)
    }

    fn in_key(&mut self, step: &Step) -> State {
        let ch = &step.ch;
        if ch.is_delimiter() {
            self.store_typed_char(ch, CharType::Space);
            State::ExpectOperator
        } else if ch.is_op() {
            self.key_value_operator.push(ch.value);
            self.store_typed_char(ch, CharType::Operator);
            State::KeyValueOperator
        } else {
            self.start_key(ch)
                .unwrap_or_else(|| self.fail(Some(ch), "invalid character", errno::INVALID_CHAR_KEY))
        }
    }

    fn in_quoted_key(&mut self, step: &Step, quote: char) -> State {
        let ch = &step.ch;
        // Quotes stay in the key text; the key segmenter strips them
        self.key.push(ch.value);
        self.store_typed_char(ch, CharType::Key);

        match (ch.value == quote, quote) {
            (true, _) if step.prev != Some(BACKSLASH) => State::Key,
            (_, SINGLE_QUOTE) => State::SingleQuotedKey,
            _ => State::DoubleQuotedKey,
        }
    }

    fn in_expect_operator(&mut self, step: &Step) -> State {
        let ch = &step.ch;
        if ch.is_delimiter() {
            self.store_typed_char(ch, CharType::Space);
            State::ExpectOperator
        } else if ch.is_op() {
            self.key_value_operator.push(ch.value);
            self.store_typed_char(ch, CharType::Operator);
            State::KeyValueOperator
        } else {
            self.fail(Some(ch), "expected operator", errno::EXPECTED_OPERATOR)
        }
    }

    fn in_key_value_operator(&mut self, step: &Step) -> State {
        let ch = &step.ch;
        if ch.is_op() {
            self.key_value_operator.push(ch.value);
            self.store_typed_char(ch, CharType::Operator);
            return State::KeyValueOperator;
        }

        let ends_operator =
            ch.is_delimiter() || ch.is_value() || ch.is_single_quote() || ch.is_double_quote();
        if !ends_operator {
            return self.fail(Some(ch), "invalid character", errno::INVALID_CHAR_OPERATOR);
        }

        if ch.is_delimiter() {
            self.store_typed_char(ch, CharType::Space);
        }
        if !self.operator_is_valid() {
            let message = format!("unknown operator: {}", self.key_value_operator);
            return self.fail(Some(ch), &message, errno::INVALID_OPERATOR);
        }
        if ch.is_delimiter() {
            return State::ExpectValue;
        }
        self.start_value(ch)
    }

    /// Begin a value with a value character or an opening quote.
    fn start_value(&mut self, ch: &Char) -> State {
        self.store_typed_char(ch, CharType::Value);
        if ch.is_single_quote() {
            self.value_is_string = true;
            State::SingleQuotedValue
        } else if ch.is_double_quote() {
            self.value_is_string = true;
            State::DoubleQuotedValue
        } else {
            self.value.push(ch.value);
            State::Value
        }
    }

    fn in_expect_value(&mut self, step: &Step) -> State {
        let ch = &step.ch;
        if ch.is_delimiter() {
            self.store_typed_char(ch, CharType::Space);
            State::ExpectValue
        } else if ch.is_value() || ch.is_single_quote() || ch.is_double_quote() {
            self.start_value(ch)
        } else {
            self.fail(Some(ch), "expected value", errno::EXPECTED_VALUE)
        }
    }

    fn in_value(&mut self, step: &Step) -> State {
        let ch = &step.ch;
        if ch.is_value() {
            self.value.push(ch.value);
            self.store_typed_char(ch, CharType::Value);
            State::Value
        } else if ch.is_delimiter() {
            if let Some(error) = self.complete_expression(ch) {
                return error;
            }
            self.reset_data();
            self.bool_operator.clear();
            self.store_typed_char(ch, CharType::Space);
            State::ExpectBoolOp
        } else if ch.is_group_close() {
            if self.groups.is_empty() {
                return self.fail(Some(ch), "unmatched parenthesis", errno::UNMATCHED_PAREN_VALUE);
            }
            if let Some(error) = self.complete_expression(ch) {
                return error;
            }
            self.reset_data();
            self.close_group();
            self.bool_operator.clear();
            self.store_typed_char(ch, CharType::Operator);
            State::ExpectBoolOp
        } else {
            self.fail(Some(ch), "invalid character", errno::INVALID_OPERATOR)
        }
    }

    fn in_quoted_value(&mut self, step: &Step, quote: char) -> State {
        let ch = &step.ch;
        let (current, inside) = if quote == SINGLE_QUOTE {
            (State::SingleQuotedValue, ch.is_single_quoted_value())
        } else {
            (State::DoubleQuotedValue, ch.is_double_quoted_value())
        };

        if inside {
            self.value.push(ch.value);
            self.store_typed_char(ch, CharType::Value);
            return current;
        }

        self.store_typed_char(ch, CharType::Value);
        if step.prev == Some(BACKSLASH) {
            // An escaped quote replaces its backslash
            self.value.pop();
            self.value.push(ch.value);
            return current;
        }

        if let Some(error) = self.complete_expression(ch) {
            return error;
        }
        self.reset_data();
        self.bool_operator.clear();
        State::ExpectBoolOp
    }

    fn in_bool_op_delimiter(&mut self, step: &Step) -> State {
        let ch = &step.ch;
        if ch.is_delimiter() {
            self.store_typed_char(ch, CharType::Space);
            State::BoolOpDelimiter
        } else if ch.is_group_open() {
            self.open_group();
            self.store_typed_char(ch, CharType::Operator);
            State::Initial
        } else if ch.is_group_close() {
            if self.groups.is_empty() {
                return self.fail(
                    Some(ch),
                    "unmatched parenthesis",
                    errno::UNMATCHED_PAREN_BOOL_DELIMITER,
                );
            }
            self.reset_data();
            self.close_group();
            self.bool_operator.clear();
            self.store_typed_char(ch, CharType::Operator);
            State::ExpectBoolOp
        } else {
            self.start_key(ch).unwrap_or_else(|| {
                self.fail(Some(ch), "invalid character", errno::INVALID_CHAR_BOOL_DELIMITER)
            })
        }
    }

    fn in_expect_bool_op(&mut self, step: &Step) -> State {
        let ch = &step.ch;
        if ch.is_delimiter() {
            self.store_typed_char(ch, CharType::Space);
            return State::ExpectBoolOp;
        }

        if ch.is_group_close() {
            if self.groups.is_empty() {
                return self.fail(
                    Some(ch),
                    "unmatched parenthesis",
                    errno::UNMATCHED_PAREN_EXPECT_BOOL_OP,
                );
            }
            if !self.key.is_empty() && !self.value.is_empty() && !self.key_value_operator.is_empty()
            {
                if let Some(error) = self.complete_expression(ch) {
                    return error;
                }
            }
            self.reset_data();
            self.bool_operator.clear();
            self.close_group();
            self.store_typed_char(ch, CharType::Operator);
            return State::ExpectBoolOp;
        }

        self.bool_operator.push(ch.value);
        self.store_typed_char(ch, CharType::Operator);
        if self.bool_operator.chars().count() > MAX_BOOL_OPERATOR_LEN
            || !VALID_BOOL_OPERATORS_CHARS.contains(&ch.value)
        {
            return self.fail(Some(ch), "invalid character", errno::INVALID_CHAR_BOOL_OP);
        }

        if self.parsed_bool_operator().is_none() {
            return State::ExpectBoolOp;
        }
        match step.next {
            Some(next) if next != DELIMITER => self.fail(
                Some(ch),
                "expected delimiter after bool operator",
                errno::EXPECTED_DELIMITER_AFTER_BOOL_OP,
            ),
            _ => State::BoolOpDelimiter,
        }
    }

    /// Whether the query so far is nothing but a lone `and` or `or`.
    fn is_bare_bool_operator(&self) -> bool {
        self.groups.is_empty()
            && self.current.left.is_none()
            && self.current.right.is_none()
            && self.key.trim().parse::<BoolOperator>().is_ok()
    }

    /// End-of-input checks.
    fn finish(&mut self, state: State, last: Option<&Char>) -> State {
        let state = match state {
            State::Initial if self.groups.is_empty() => {
                return self.fail(last, "empty input", errno::EMPTY_INPUT);
            }
            State::Key | State::ExpectOperator if self.is_bare_bool_operator() => {
                return self.fail(last, "unexpected EOF", errno::UNEXPECTED_EOF_AFTER_BOOL_OP);
            }
            State::Initial
            | State::Key
            | State::SingleQuotedKey
            | State::DoubleQuotedKey
            | State::ExpectOperator
            | State::KeyValueOperator
            | State::ExpectValue => {
                return self.fail(last, "unexpected EOF", errno::UNEXPECTED_EOF);
            }
            State::Value | State::SingleQuotedValue | State::DoubleQuotedValue => {
                if let Err(e) = self.extend_tree() {
                    return self.fail(last, &e.message, e.errno);
                }
                self.bool_operator.clear();
                State::ExpectBoolOp
            }
            State::BoolOpDelimiter => {
                return self.fail(last, "unexpected EOF", errno::UNEXPECTED_EOF_AFTER_BOOL_OP);
            }
            State::ExpectBoolOp if !self.bool_operator.is_empty() => {
                return self.fail(last, "unexpected EOF", errno::UNEXPECTED_EOF_AFTER_BOOL_OP);
            }
            other => other,
        };

        if !self.groups.is_empty() {
            return self.fail(last, "unmatched parenthesis", errno::UNMATCHED_PAREN_EOF);
        }
        if self.current.left.is_none() && self.current.right.is_none() {
            return self.fail(last, "empty input", errno::EMPTY_INPUT);
        }
        state
    }
}

/// Advance the machine by one character.
///
/// `State::Error` is absorbing: once entered, further input is ignored.
pub fn transition(state: State, mut ctx: Context, step: &Step) -> (State, Context) {
    let next = match state {
        State::Initial => ctx.initial(step),
        State::Key => ctx.in_key(step),
        State::SingleQuotedKey => ctx.in_quoted_key(step, SINGLE_QUOTE),
        State::DoubleQuotedKey => ctx.in_quoted_key(step, DOUBLE_QUOTE),
        State::ExpectOperator => ctx.in_expect_operator(step),
        State::KeyValueOperator => ctx.in_key_value_operator(step),
        State::ExpectValue => ctx.in_expect_value(step),
        State::Value => ctx.in_value(step),
        State::SingleQuotedValue => ctx.in_quoted_value(step, SINGLE_QUOTE),
        State::DoubleQuotedValue => ctx.in_quoted_value(step, DOUBLE_QUOTE),
        State::BoolOpDelimiter => ctx.in_bool_op_delimiter(step),
        State::ExpectBoolOp => ctx.in_expect_bool_op(step),
        State::Error => State::Error,
    };
    trace!(from = ?state, to = ?next, ch = ?step.ch.value, pos = step.ch.pos(), "transition");
    (next, ctx)
}

/// Result of running the machine over a query.
///
/// A `Parser` is produced by a single call to [`Parser::parse`] and is not
/// reused. Besides the tree it exposes the machine's final state, which is
/// what incremental callers inspect.
#[derive(Debug, Clone)]
pub struct Parser {
    state: State,
    context: Context,
    position: Position,
    root: Option<Node>,
}

impl Parser {
    /// Parse `text`.
    ///
    /// # Errors
    ///
    /// With `options.raise_error` set, a failed parse is returned as `Err`.
    /// Otherwise the returned parser is in [`State::Error`] and
    /// [`Parser::error`] holds the failure.
    pub fn parse(text: &str, options: ParseOptions) -> Result<Self, ParserError> {
        debug!(
            len = text.len(),
            raise_error = options.raise_error,
            ignore_last_char = options.ignore_last_char,
            "parse start"
        );

        let chars: Vec<char> = text.chars().collect();
        let mut state = State::Initial;
        let mut context = Context::new();
        let mut position = Position::default();
        let mut last: Option<Char> = None;

        for (i, &value) in chars.iter().enumerate() {
            if state == State::Error {
                break;
            }
            position.pos = i;
            let ch = Char::new(value, position);
            last = Some(ch);

            if ch.is_newline() {
                position.line += 1;
                position.column = 0;
                continue;
            }

            let step = Step {
                ch,
                prev: i.checked_sub(1).map(|p| chars[p]),
                next: chars.get(i + 1).copied(),
            };
            (state, context) = transition(state, context, &step);
            position.column += 1;
        }
        position.pos = chars.len();

        if state != State::Error && !options.ignore_last_char {
            state = context.finish(state, last.as_ref());
        }

        let root = if state == State::Error {
            None
        } else {
            context.current.clone().into_node()
        };

        let parser = Parser {
            state,
            context,
            position,
            root,
        };
        debug!(state = ?parser.state, errno = parser.errno(), "parse end");

        match parser.context.error.clone() {
            Some(error) if options.raise_error => Err(error),
            _ => Ok(parser),
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn error(&self) -> Option<&ParserError> {
        self.context.error.as_ref()
    }

    /// Error code of a failed parse, 0 otherwise.
    pub fn errno(&self) -> u32 {
        self.context.error.as_ref().map_or(0, |e| e.errno)
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    pub fn into_root(self) -> Option<Node> {
        self.root
    }

    pub fn typed_chars(&self) -> &[TypedChar] {
        &self.context.typed_chars
    }

    /// Key text read so far for the current expression.
    pub fn key(&self) -> &str {
        &self.context.key
    }

    /// Value text read so far for the current expression.
    pub fn value(&self) -> &str {
        &self.context.value
    }

    pub fn value_is_string(&self) -> bool {
        self.context.value_is_string
    }

    pub fn key_value_operator(&self) -> &str {
        &self.context.key_value_operator
    }

    pub fn bool_operator(&self) -> &str {
        &self.context.bool_operator
    }

    /// Number of groups still open.
    pub fn depth(&self) -> usize {
        self.context.groups.len()
    }

    /// Position just past the last consumed character.
    pub fn position(&self) -> Position {
        self.position
    }
}

/// Parse a complete query into its tree.
///
/// # Examples
///
/// ```
/// use flyql::{BoolOperator, parse};
///
/// let root = parse("status=200 and method=GET").unwrap();
/// assert_eq!(root.bool_operator(), Some(BoolOperator::And));
/// assert_eq!(root.expressions().len(), 2);
///
/// let err = parse("").unwrap_err();
/// assert_eq!(err.errno, 24);
/// ```
pub fn parse(text: &str) -> Result<Node, ParserError> {
    let parser = Parser::parse(text, ParseOptions::default())?;
    parser
        .into_root()
        .ok_or_else(|| ParserError::new("empty input", errno::EMPTY_INPUT))
}

/// Parse with explicit options, returning the machine for inspection.
pub fn parse_with(text: &str, options: ParseOptions) -> Result<Parser, ParserError> {
    Parser::parse(text, options)
}
