//! Untyped constructor arguments and their typed narrowing.

use smallvec::SmallVec;

use super::{Node, NodeType, SqlType};
use crate::error::{Result, SqlError};

/// One untyped argument of a `make_node` call.
#[derive(Debug)]
pub enum NodeArg {
    /// A child node.
    Node(Node),
    /// An ordered list of nodes.
    List(Vec<Node>),
    /// Identifier or literal text.
    Text(String),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Double(f64),
    /// Flag.
    Bool(bool),
    /// Data type.
    Type(SqlType),
    /// Absent optional argument.
    Null,
}

impl NodeArg {
    /// Describes the argument's shape for error messages.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Node(node) => node.node_type().name(),
            Self::List(_) => "node list",
            Self::Text(_) => "text",
            Self::Int(_) => "integer",
            Self::Double(_) => "double",
            Self::Bool(_) => "boolean",
            Self::Type(_) => "SQL type",
            Self::Null => "null",
        }
    }
}

impl From<Node> for NodeArg {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

impl From<Box<Node>> for NodeArg {
    fn from(node: Box<Node>) -> Self {
        Self::Node(*node)
    }
}

impl From<Vec<Node>> for NodeArg {
    fn from(nodes: Vec<Node>) -> Self {
        Self::List(nodes)
    }
}

impl From<String> for NodeArg {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for NodeArg {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<i64> for NodeArg {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for NodeArg {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for NodeArg {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<usize> for NodeArg {
    fn from(value: usize) -> Self {
        Self::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for NodeArg {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<bool> for NodeArg {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<SqlType> for NodeArg {
    fn from(ty: SqlType) -> Self {
        Self::Type(ty)
    }
}

impl<T: Into<Self>> From<Option<T>> for NodeArg {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// The argument list of a `make_node` call.
///
/// Arities are small, so arguments stay inline.
#[derive(Debug, Default)]
pub struct NodeArgs(SmallVec<[NodeArg; 4]>);

impl NodeArgs {
    /// Creates an empty argument list.
    #[must_use]
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    /// Appends an argument.
    pub fn push(&mut self, arg: impl Into<NodeArg>) {
        self.0.push(arg.into());
    }

    /// Returns the number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the shapes of the arguments, in order.
    #[must_use]
    pub fn shapes(&self) -> Vec<&'static str> {
        self.0.iter().map(NodeArg::shape).collect()
    }
}

impl FromIterator<NodeArg> for NodeArgs {
    fn from_iter<I: IntoIterator<Item = NodeArg>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Builds [`NodeArgs`] from anything convertible into [`NodeArg`].
///
/// ```
/// use sqlnode_core::node_args;
/// use sqlnode_core::ast::NodeArg;
///
/// let args = node_args!["price", NodeArg::Null];
/// assert_eq!(args.len(), 2);
/// ```
#[macro_export]
macro_rules! node_args {
    () => {
        $crate::ast::NodeArgs::new()
    };
    ($($arg:expr),+ $(,)?) => {{
        let mut args = $crate::ast::NodeArgs::new();
        $(args.push($arg);)+
        args
    }};
}

/// Typed, in-order access to the arguments of one `init` call.
///
/// Every getter consumes one argument; a wrong shape reports the node type,
/// the argument position and both shapes.
#[derive(Debug)]
pub struct ArgReader {
    node_type: NodeType,
    args: smallvec::IntoIter<[NodeArg; 4]>,
    arity: usize,
    position: usize,
}

impl ArgReader {
    pub(crate) fn new(node_type: NodeType, args: NodeArgs) -> Self {
        let arity = args.len();
        Self {
            node_type,
            args: args.0.into_iter(),
            arity,
            position: 0,
        }
    }

    /// Number of arguments the call supplied.
    #[must_use]
    pub const fn arity(&self) -> usize {
        self.arity
    }

    /// The node type being initialized.
    #[must_use]
    pub const fn node_type(&self) -> NodeType {
        self.node_type
    }

    /// Number of arguments not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.args.len()
    }

    /// Takes the next argument with its position, without narrowing it.
    pub fn next_arg(&mut self) -> (usize, NodeArg) {
        let position = self.position;
        self.position += 1;
        (position, self.args.next().unwrap_or(NodeArg::Null))
    }

    /// Builds the error for an argument of the wrong shape.
    #[must_use]
    pub const fn mismatch(&self, position: usize, expected: &'static str, found: &'static str) -> SqlError {
        SqlError::TypeMismatch {
            node_type: self.node_type,
            position,
            expected,
            found,
        }
    }

    fn node_where(&mut self, expected: &'static str, accept: fn(&Node) -> bool) -> Result<Node> {
        match self.next_arg() {
            (_, NodeArg::Node(node)) if accept(&node) => Ok(node),
            (position, arg) => Err(self.mismatch(position, expected, arg.shape())),
        }
    }

    fn opt_node_where(
        &mut self,
        expected: &'static str,
        accept: fn(&Node) -> bool,
    ) -> Result<Option<Node>> {
        match self.next_arg() {
            (_, NodeArg::Null) => Ok(None),
            (_, NodeArg::Node(node)) if accept(&node) => Ok(Some(node)),
            (position, arg) => Err(self.mismatch(position, expected, arg.shape())),
        }
    }

    /// Any node.
    pub fn node(&mut self) -> Result<Node> {
        self.node_where("node", |_| true)
    }

    /// A value expression.
    pub fn value(&mut self) -> Result<Node> {
        self.node_where("value expression", |node| node.variant().is_value())
    }

    /// An optional value expression.
    pub fn opt_value(&mut self) -> Result<Option<Node>> {
        self.opt_node_where("value expression", |node| node.variant().is_value())
    }

    /// A query expression (SELECT, set operation or VALUES).
    pub fn result_set(&mut self) -> Result<Node> {
        self.node_where("result set", |node| node.variant().is_result_set())
    }

    /// A FROM-list item (base table, derived table or join).
    pub fn from_item(&mut self) -> Result<Node> {
        self.node_where("table reference", |node| node.variant().is_from_item())
    }

    /// A node of exactly `node_type`.
    pub fn node_of(&mut self, node_type: NodeType) -> Result<Node> {
        match self.next_arg() {
            (_, NodeArg::Node(node)) if node.node_type() == node_type => Ok(node),
            (position, arg) => Err(self.mismatch(position, node_type.name(), arg.shape())),
        }
    }

    /// An optional node of exactly `node_type`.
    pub fn opt_node_of(&mut self, node_type: NodeType) -> Result<Option<Node>> {
        match self.next_arg() {
            (_, NodeArg::Null) => Ok(None),
            (_, NodeArg::Node(node)) if node.node_type() == node_type => Ok(Some(node)),
            (position, arg) => Err(self.mismatch(position, node_type.name(), arg.shape())),
        }
    }

    /// A raw list of nodes.
    pub fn nodes(&mut self) -> Result<Vec<Node>> {
        match self.next_arg() {
            (_, NodeArg::List(nodes)) => Ok(nodes),
            (position, arg) => Err(self.mismatch(position, "node list", arg.shape())),
        }
    }

    /// Text.
    pub fn text(&mut self) -> Result<String> {
        match self.next_arg() {
            (_, NodeArg::Text(text)) => Ok(text),
            (position, arg) => Err(self.mismatch(position, "text", arg.shape())),
        }
    }

    /// Optional text.
    pub fn opt_text(&mut self) -> Result<Option<String>> {
        match self.next_arg() {
            (_, NodeArg::Null) => Ok(None),
            (_, NodeArg::Text(text)) => Ok(Some(text)),
            (position, arg) => Err(self.mismatch(position, "text", arg.shape())),
        }
    }

    /// An integer.
    pub fn int(&mut self) -> Result<i64> {
        match self.next_arg() {
            (_, NodeArg::Int(value)) => Ok(value),
            (position, arg) => Err(self.mismatch(position, "integer", arg.shape())),
        }
    }

    /// A non-negative integer that fits `usize`.
    pub fn offset(&mut self) -> Result<usize> {
        match self.next_arg() {
            (position, NodeArg::Int(value)) => usize::try_from(value)
                .map_err(|_| self.mismatch(position, "character offset", "negative integer")),
            (position, arg) => Err(self.mismatch(position, "character offset", arg.shape())),
        }
    }

    /// A flag.
    pub fn bool(&mut self) -> Result<bool> {
        match self.next_arg() {
            (_, NodeArg::Bool(value)) => Ok(value),
            (position, arg) => Err(self.mismatch(position, "boolean", arg.shape())),
        }
    }

    /// An optional flag.
    pub fn opt_bool(&mut self) -> Result<Option<bool>> {
        match self.next_arg() {
            (_, NodeArg::Null) => Ok(None),
            (_, NodeArg::Bool(value)) => Ok(Some(value)),
            (position, arg) => Err(self.mismatch(position, "boolean", arg.shape())),
        }
    }

    /// A data type.
    pub fn sql_type(&mut self) -> Result<SqlType> {
        match self.next_arg() {
            (_, NodeArg::Type(ty)) => Ok(ty),
            (position, arg) => Err(self.mismatch(position, "SQL type", arg.shape())),
        }
    }
}
