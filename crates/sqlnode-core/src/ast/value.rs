//! Scalar payload types carried by nodes: operators, data types, literals.

use core::fmt;

use super::NodeType;

macro_rules! tag_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vdoc:meta])* $variant:ident => $tag:ident, $sql:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vdoc])* $variant,)+
        }

        impl $name {
            /// Maps a node type onto this operator family.
            #[must_use]
            pub const fn from_node_type(node_type: NodeType) -> Option<Self> {
                match node_type {
                    $(NodeType::$tag => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// Returns the node type that carries this operator.
            #[must_use]
            pub const fn node_type(self) -> NodeType {
                match self {
                    $(Self::$variant => NodeType::$tag,)+
                }
            }

            /// Returns the SQL spelling.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $sql,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

tag_enum! {
    /// Comparison operators.
    pub enum ComparisonOperator {
        /// `=`
        Equals => BinaryEquals, "=";
        /// `<>`
        NotEquals => BinaryNotEquals, "<>";
        /// `<`
        LessThan => BinaryLessThan, "<";
        /// `<=`
        LessEquals => BinaryLessEquals, "<=";
        /// `>`
        GreaterThan => BinaryGreaterThan, ">";
        /// `>=`
        GreaterEquals => BinaryGreaterEquals, ">=";
    }
}

tag_enum! {
    /// Arithmetic, string and bit operators.
    pub enum ArithmeticOperator {
        /// `+`
        Plus => BinaryPlus, "+";
        /// `-`
        Minus => BinaryMinus, "-";
        /// `*`
        Times => BinaryTimes, "*";
        /// `/`
        Divide => BinaryDivide, "/";
        /// `DIV`
        Div => BinaryDiv, "DIV";
        /// `%`
        Mod => Mod, "%";
        /// `||`
        Concatenate => Concatenation, "||";
        /// `&`
        BitAnd => BitAnd, "&";
        /// `|`
        BitOr => BitOr, "|";
        /// `^`
        BitXor => BitXor, "^";
        /// `<<`
        LeftShift => LeftShift, "<<";
        /// `>>`
        RightShift => RightShift, ">>";
    }
}

tag_enum! {
    /// Logical connectives.
    pub enum LogicalOperator {
        /// `AND`
        And => And, "AND";
        /// `OR`
        Or => Or, "OR";
    }
}

tag_enum! {
    /// Prefix operators.
    pub enum UnaryOperator {
        /// `NOT`
        Not => Not, "NOT";
        /// `-`
        Minus => UnaryMinus, "-";
        /// `+`
        Plus => UnaryPlus, "+";
        /// `~`
        BitNot => UnaryBitNot, "~";
    }
}

tag_enum! {
    /// Set operations between query expressions.
    pub enum SetOperator {
        /// `UNION`
        Union => Union, "UNION";
        /// `INTERSECT`
        Intersect => Intersect, "INTERSECT";
        /// `EXCEPT`
        Except => Except, "EXCEPT";
    }
}

tag_enum! {
    /// Join types.
    pub enum JoinType {
        /// `INNER JOIN`
        Inner => InnerJoin, "INNER JOIN";
        /// `LEFT OUTER JOIN`
        LeftOuter => LeftOuterJoin, "LEFT OUTER JOIN";
        /// `RIGHT OUTER JOIN`
        RightOuter => RightOuterJoin, "RIGHT OUTER JOIN";
        /// `FULL OUTER JOIN`
        FullOuter => FullOuterJoin, "FULL OUTER JOIN";
        /// `CROSS JOIN`
        Cross => CrossJoin, "CROSS JOIN";
    }
}

tag_enum! {
    /// How a subquery is used by its enclosing expression.
    pub enum SubqueryKind {
        /// Scalar subquery.
        Expression => ExpressionSubquery, "EXPRESSION";
        /// `EXISTS (query)`
        Exists => ExistsSubquery, "EXISTS";
        /// `x IN (query)`
        In => InSubquery, "IN";
        /// `x NOT IN (query)`
        NotIn => NotInSubquery, "NOT IN";
    }
}

tag_enum! {
    /// Extended GROUP BY constructs.
    pub enum GroupingKind {
        /// `GROUPING SETS`
        GroupingSets => GroupingSets, "GROUPING SETS";
        /// `ROLLUP`
        Rollup => Rollup, "ROLLUP";
        /// `CUBE`
        Cube => Cube, "CUBE";
    }
}

impl ComparisonOperator {
    /// Returns the operator with its operands swapped (`a < b` is `b > a`).
    #[must_use]
    pub const fn commuted(self) -> Self {
        match self {
            Self::Equals => Self::Equals,
            Self::NotEquals => Self::NotEquals,
            Self::LessThan => Self::GreaterThan,
            Self::LessEquals => Self::GreaterEquals,
            Self::GreaterThan => Self::LessThan,
            Self::GreaterEquals => Self::LessEquals,
        }
    }
}

/// Placement of NULLs in an ORDER BY entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NullOrdering {
    /// `NULLS FIRST`
    First,
    /// `NULLS LAST`
    Last,
}

impl NullOrdering {
    /// Returns the SQL spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::First => "NULLS FIRST",
            Self::Last => "NULLS LAST",
        }
    }
}

/// Value of a numeric constant.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericValue {
    /// Exact integer.
    Integer(i64),
    /// Exact decimal, kept as written.
    Decimal(String),
    /// Approximate numeric.
    Double(f64),
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Decimal(text) => f.write_str(text),
            Self::Double(value) => write!(f, "{value:e}"),
        }
    }
}

/// SQL data types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    /// 1-byte integer.
    Tinyint,
    /// 2-byte integer.
    Smallint,
    /// 4-byte integer.
    Integer,
    /// 8-byte integer.
    Bigint,
    /// 4-byte float.
    Real,
    /// 8-byte float.
    Double,
    /// Exact numeric with optional precision and scale.
    Decimal {
        /// Total number of digits.
        precision: Option<u16>,
        /// Digits after the decimal point.
        scale: Option<u16>,
    },
    /// Fixed-length character string.
    Char(Option<u32>),
    /// Variable-length character string.
    Varchar(Option<u32>),
    /// Unbounded character string.
    Text,
    /// Binary large object.
    Blob,
    /// Boolean.
    Boolean,
    /// Date.
    Date,
    /// Time of day.
    Time,
    /// Timestamp.
    Timestamp,
    /// A type name the grammar does not know.
    Custom(String),
}

impl DataType {
    /// Resolves a type name, ignoring case. Unknown names become
    /// [`DataType::Custom`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "TINYINT" => Self::Tinyint,
            "SMALLINT" => Self::Smallint,
            "INT" | "INTEGER" => Self::Integer,
            "BIGINT" => Self::Bigint,
            "REAL" => Self::Real,
            "DOUBLE" | "FLOAT" => Self::Double,
            "DECIMAL" | "NUMERIC" => Self::Decimal {
                precision: None,
                scale: None,
            },
            "CHAR" | "CHARACTER" => Self::Char(None),
            "VARCHAR" => Self::Varchar(None),
            "TEXT" | "CLOB" => Self::Text,
            "BLOB" => Self::Blob,
            "BOOLEAN" | "BOOL" => Self::Boolean,
            "DATE" => Self::Date,
            "TIME" => Self::Time,
            "TIMESTAMP" | "DATETIME" => Self::Timestamp,
            _ => Self::Custom(name.to_owned()),
        }
    }

    /// Returns true for exact and approximate numeric types.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Tinyint
                | Self::Smallint
                | Self::Integer
                | Self::Bigint
                | Self::Real
                | Self::Double
                | Self::Decimal { .. }
        )
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tinyint => f.write_str("TINYINT"),
            Self::Smallint => f.write_str("SMALLINT"),
            Self::Integer => f.write_str("INTEGER"),
            Self::Bigint => f.write_str("BIGINT"),
            Self::Real => f.write_str("REAL"),
            Self::Double => f.write_str("DOUBLE"),
            Self::Decimal { precision, scale } => match (precision, scale) {
                (Some(p), Some(s)) => write!(f, "DECIMAL({p}, {s})"),
                (Some(p), None) => write!(f, "DECIMAL({p})"),
                _ => f.write_str("DECIMAL"),
            },
            Self::Char(Some(n)) => write!(f, "CHAR({n})"),
            Self::Char(None) => f.write_str("CHAR"),
            Self::Varchar(Some(n)) => write!(f, "VARCHAR({n})"),
            Self::Varchar(None) => f.write_str("VARCHAR"),
            Self::Text => f.write_str("TEXT"),
            Self::Blob => f.write_str("BLOB"),
            Self::Boolean => f.write_str("BOOLEAN"),
            Self::Date => f.write_str("DATE"),
            Self::Time => f.write_str("TIME"),
            Self::Timestamp => f.write_str("TIMESTAMP"),
            Self::Custom(name) => f.write_str(name),
        }
    }
}

/// A data type as written in a CAST or column definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SqlType {
    /// The base type.
    pub data_type: DataType,
    /// `UNSIGNED` modifier.
    pub unsigned: bool,
}

impl SqlType {
    /// Creates a signed type.
    #[must_use]
    pub const fn new(data_type: DataType) -> Self {
        Self {
            data_type,
            unsigned: false,
        }
    }

    /// Marks the type `UNSIGNED`.
    #[must_use]
    pub const fn unsigned(mut self) -> Self {
        self.unsigned = true;
        self
    }
}

impl From<DataType> for SqlType {
    fn from(data_type: DataType) -> Self {
        Self::new(data_type)
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unsigned {
            write!(f, "{} UNSIGNED", self.data_type)
        } else {
            write!(f, "{}", self.data_type)
        }
    }
}
