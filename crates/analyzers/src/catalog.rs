//! Canonical names of the NUnit and BCL symbols the analyzers match against
//!
//! Rules compare resolved symbols against these names instead of the
//! textual call site, so a user type that happens to share a simple name
//! never matches.

/// Types that hold assertion methods
pub mod holders {
    pub const ASSERT: &str = "NUnit.Framework.Assert";
    pub const CLASSIC_ASSERT: &str = "NUnit.Framework.Legacy.ClassicAssert";

    pub const ALL: &[&str] = &[ASSERT, CLASSIC_ASSERT];

    /// Simple name of the constraint-model entry point holder
    pub const ASSERT_NAME: &str = "Assert";
}

/// Static entry points that root a fluent constraint
pub mod helpers {
    pub const IS: &str = "Is";
    pub const HAS: &str = "Has";
    pub const DOES: &str = "Does";
    pub const CONTAINS: &str = "Contains";
    pub const THROWS: &str = "Throws";

    pub const ALL: &[&str] = &[IS, HAS, DOES, CONTAINS, THROWS];

    pub const NAMESPACE: &str = "NUnit.Framework";
}

pub mod constraints {
    pub const CONSTRAINT_BASE: &str = "NUnit.Framework.Constraints.Constraint";

    /// Zero-argument members that join two constraint parts
    pub const COMBINATORS: &[&str] = &["And", "Or", "With"];

    pub const NOT: &str = "Not";
    pub const NULL: &str = "Null";
    pub const TRUE: &str = "True";
    pub const FALSE: &str = "False";
    pub const EQUAL_TO: &str = "EqualTo";
    pub const SAME_AS: &str = "SameAs";
    pub const WITHIN: &str = "Within";
    pub const INSTANCE_OF: &str = "InstanceOf";
    pub const ASSIGNABLE_FROM: &str = "AssignableFrom";
    pub const MEMBER: &str = "Member";
}

/// Assertion method names
pub mod methods {
    pub const THAT: &str = "That";
    pub const IS_TRUE: &str = "IsTrue";
    pub const TRUE: &str = "True";
    pub const IS_FALSE: &str = "IsFalse";
    pub const FALSE: &str = "False";
    pub const ARE_SAME: &str = "AreSame";
    pub const ARE_NOT_SAME: &str = "AreNotSame";
    pub const ARE_EQUAL: &str = "AreEqual";
    pub const ARE_NOT_EQUAL: &str = "AreNotEqual";

    /// Methods whose single boolean argument is the condition under test
    pub const CONDITION_METHODS: &[&str] = &[THAT, IS_TRUE, TRUE, IS_FALSE, FALSE];

    /// Condition methods that assert the condition is false
    pub const NEGATIVE_CONDITION_METHODS: &[&str] = &[IS_FALSE, FALSE];
}

/// Formal parameter names of the classic surface
pub mod parameters {
    pub const CONDITION: &str = "condition";
    pub const ACTUAL: &str = "actual";
    pub const EXPECTED: &str = "expected";
    pub const EXPRESSION: &str = "expression";
    pub const DELTA: &str = "delta";
    pub const AN_OBJECT: &str = "anObject";
    pub const A_DOUBLE: &str = "aDouble";
    pub const A_STRING: &str = "aString";
    pub const COLLECTION: &str = "collection";
    pub const ARG1: &str = "arg1";
    pub const ARG2: &str = "arg2";
    pub const MESSAGE: &str = "message";
    /// The `params object[]` catch-all
    pub const ARGS: &str = "args";
}

/// Base class library names
pub mod system {
    pub const OBJECT: &str = "System.Object";
    pub const STRING: &str = "System.String";
    pub const ENUMERABLE: &str = "System.Linq.Enumerable";
    pub const GENERIC_COLLECTION: &str = "System.Collections.Generic.ICollection";
    pub const LIST: &str = "System.Collections.IList";

    pub const EQUALS: &str = "Equals";
    pub const CONTAINS: &str = "Contains";
    pub const STARTS_WITH: &str = "StartsWith";
    pub const ENDS_WITH: &str = "EndsWith";
    pub const FORMAT: &str = "Format";
    pub const STRING_KEYWORD: &str = "string";
}
