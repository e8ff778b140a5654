//! # sqlnode-core
//!
//! A SQL front end that turns statements into a syntax tree of factory-built
//! nodes.
//!
//! This crate provides:
//! - A closed set of node types, each bound to one node variant by a static
//!   registry
//! - A node factory that is the only way nodes are created or deep-copied
//! - A visitor protocol with early exit, child skipping and pre/post order
//! - A reusable parser driver with configurable grammar features and
//!   error positions given as character offsets
//!
//! ## Parsing
//!
//! ```rust
//! use sqlnode_core::{NodeKind, NodeType, SqlParser};
//!
//! let mut parser = SqlParser::default();
//! let cursor = parser.parse_statement("SELECT a, b FROM t WHERE a = 1").unwrap();
//! let NodeKind::Cursor(cursor) = cursor.kind() else { unreachable!() };
//! assert_eq!(cursor.result_set.node_type(), NodeType::Select);
//! ```
//!
//! ## Visiting
//!
//! Traversal consumes the tree and hands it back, so a visitor can replace
//! any node it sees:
//!
//! ```rust
//! use sqlnode_core::{HasNodeVisitor, NodeType, SqlParser};
//!
//! let mut parser = SqlParser::default();
//! let tree = parser
//!     .parse_statement("SELECT a FROM t WHERE a IN (SELECT b FROM u)")
//!     .unwrap();
//! let mut finder = HasNodeVisitor::of_type(NodeType::InSubquery);
//! let tree = tree.accept(&mut finder).unwrap();
//! assert!(finder.has_node());
//! assert_eq!(tree.node_type(), NodeType::Cursor);
//! ```

pub mod ast;
pub mod config;
pub mod context;
pub mod dialect;
pub mod error;
pub mod factory;
pub mod lexer;
pub mod parser;
pub mod registry;
pub mod visitor;

pub use ast::{Node, NodeArg, NodeArgs, NodeId, NodeKind, NodeType, Variant};
pub use config::{Features, IdentifierCase, ParserConfig};
pub use context::{ParseSession, ParserContext, GENERATED_COLUMN_PREFIX};
pub use dialect::{dialect_by_name, Dialect, GenericDialect, MySqlDialect};
pub use error::{Result, SqlError};
pub use factory::NodeFactory;
pub use parser::{char_offset, SqlParser};
pub use registry::VariantBinding;
pub use visitor::{CollectNodes, HasNodeVisitor, NodeCounter, Rewriter, Visitor};
