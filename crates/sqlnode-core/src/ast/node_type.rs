//! The closed set of node type tags.

use core::fmt;

use crate::error::{Result, SqlError};

macro_rules! node_types {
    ($($(#[$doc:meta])* $name:ident),+ $(,)?) => {
        /// Identifies exactly one syntactic construct.
        ///
        /// Tags are densely packed from zero in declaration order and never
        /// change meaning. Several tags may share one node variant; see
        /// [`NodeType::variant`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u16)]
        pub enum NodeType {
            $($(#[$doc])* $name,)+
        }

        impl NodeType {
            /// Every node type, ordered by tag.
            pub const ALL: &'static [Self] = &[$(Self::$name,)+];

            /// Returns the stable name of the node type.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$name => stringify!($name),)+
                }
            }
        }
    };
}

node_types! {
    // Statements and result sets
    /// Root of a query statement: result set plus ORDER BY / OFFSET / LIMIT.
    Cursor,
    /// A SELECT query block.
    Select,
    /// `UNION`.
    Union,
    /// `INTERSECT`.
    Intersect,
    /// `EXCEPT`.
    Except,
    /// A `VALUES` row constructor.
    RowsResultSet,
    /// `INSERT`.
    Insert,
    /// `UPDATE`.
    Update,
    /// `DELETE`.
    Delete,
    /// `CALL`.
    CallStatement,
    /// `CREATE TABLE`.
    CreateTable,
    /// `DROP TABLE`.
    DropTable,

    // Lists
    /// SELECT list / SET clause list.
    ResultColumnList,
    /// FROM list.
    FromList,
    /// List of value expressions.
    ValueNodeList,
    /// ORDER BY list.
    OrderByList,
    /// GROUP BY list.
    GroupByList,
    /// CREATE TABLE element list.
    TableElementList,
    /// Rows of a `VALUES` constructor.
    RowsList,

    // Clauses
    /// One entry of a SELECT list or SET clause.
    ResultColumn,
    /// `*` or `t.*`.
    AllResultColumn,
    /// One ORDER BY entry.
    OrderByColumn,
    /// One GROUP BY entry.
    GroupByColumn,
    /// `GROUPING SETS (...)`.
    GroupingSets,
    /// `ROLLUP (...)`.
    Rollup,
    /// `CUBE (...)`.
    Cube,
    /// A column definition in CREATE TABLE.
    ColumnDefinition,
    /// A possibly schema-qualified table name.
    TableName,

    // Table references
    /// A named table in a FROM list.
    FromBaseTable,
    /// A derived table.
    FromSubquery,
    /// `[INNER] JOIN`.
    InnerJoin,
    /// `LEFT [OUTER] JOIN`.
    LeftOuterJoin,
    /// `RIGHT [OUTER] JOIN`.
    RightOuterJoin,
    /// `FULL [OUTER] JOIN`.
    FullOuterJoin,
    /// `CROSS JOIN`.
    CrossJoin,

    // Leaf values
    /// A column reference.
    ColumnReference,
    /// TINYINT constant.
    TinyintConstant,
    /// SMALLINT constant.
    SmallintConstant,
    /// INTEGER constant.
    IntConstant,
    /// BIGINT constant.
    LongintConstant,
    /// Exact decimal constant.
    DecimalConstant,
    /// Approximate numeric constant.
    DoubleConstant,
    /// Character string constant.
    VarcharConstant,
    /// `TRUE` / `FALSE`.
    BooleanConstant,
    /// `NULL`.
    UntypedNullConstant,
    /// `?` placeholder.
    Parameter,

    // Comparisons
    /// `=`.
    BinaryEquals,
    /// `<>`.
    BinaryNotEquals,
    /// `<`.
    BinaryLessThan,
    /// `<=`.
    BinaryLessEquals,
    /// `>`.
    BinaryGreaterThan,
    /// `>=`.
    BinaryGreaterEquals,

    // Arithmetic, string and bit operators
    /// `+`.
    BinaryPlus,
    /// `-`.
    BinaryMinus,
    /// `*`.
    BinaryTimes,
    /// `/`.
    BinaryDivide,
    /// `DIV` (integer division).
    BinaryDiv,
    /// `%`.
    Mod,
    /// `||`.
    Concatenation,
    /// `&`.
    BitAnd,
    /// `|`.
    BitOr,
    /// `^`.
    BitXor,
    /// `<<`.
    LeftShift,
    /// `>>`.
    RightShift,

    // Logical and unary operators
    /// `AND`.
    And,
    /// `OR`.
    Or,
    /// `NOT`.
    Not,
    /// Unary `-`.
    UnaryMinus,
    /// Unary `+`.
    UnaryPlus,
    /// Unary `~`.
    UnaryBitNot,
    /// `IS NULL`.
    IsNull,
    /// `IS NOT NULL`.
    IsNotNull,
    /// `LIKE`.
    Like,
    /// `NOT LIKE`.
    NotLike,
    /// `BETWEEN`.
    Between,
    /// `NOT BETWEEN`.
    NotBetween,
    /// `IN (list)`.
    InList,
    /// `NOT IN (list)`.
    NotInList,

    // Subqueries and calls
    /// Scalar subquery.
    ExpressionSubquery,
    /// `EXISTS (query)`.
    ExistsSubquery,
    /// `x IN (query)`.
    InSubquery,
    /// `x NOT IN (query)`.
    NotInSubquery,
    /// Scalar function call.
    FunctionCall,
    /// Aggregate function call.
    AggregateFunction,
    /// `CAST(x AS type)`.
    Cast,
    /// `CASE` expression.
    Conditional,
}

impl NodeType {
    /// Returns the integer tag of the node type.
    #[must_use]
    pub const fn tag(self) -> u16 {
        self as u16
    }

    /// Looks up a node type by its integer tag.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::NotImplemented`] for tags outside the registry.
    pub fn from_tag(tag: u16) -> Result<Self> {
        Self::ALL
            .get(usize::from(tag))
            .copied()
            .ok_or(SqlError::NotImplemented { tag })
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_dense() {
        for (index, node_type) in NodeType::ALL.iter().enumerate() {
            assert_eq!(usize::from(node_type.tag()), index);
        }
    }

    #[test]
    fn test_from_tag_round_trip() {
        for node_type in NodeType::ALL {
            assert_eq!(NodeType::from_tag(node_type.tag()), Ok(*node_type));
        }
    }

    #[test]
    fn test_unknown_tag_is_not_implemented() {
        let tag = u16::try_from(NodeType::ALL.len()).unwrap();
        assert_eq!(
            NodeType::from_tag(tag),
            Err(SqlError::NotImplemented { tag })
        );
    }

    #[test]
    fn test_display_uses_name() {
        assert_eq!(NodeType::BinaryEquals.to_string(), "BinaryEquals");
    }
}
