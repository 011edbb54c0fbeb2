//! The built-in reference surface: BCL and NUnit declarations written as C# stubs
//!
//! Member bodies are `;` and every default argument is spelled out as a
//! separate overload. The NUnit classic surface is generated from a signature
//! table so `Assert` and `ClassicAssert` stay identical.

use crate::declarations::Declarations;
use crate::parser::parse_source;
use std::fmt::Write as _;
use std::sync::OnceLock;
use tracing::warn;

const SYSTEM: &str = r#"
namespace System
{
    using System.Collections;
    using System.Collections.Generic;

    public class Object
    {
        public virtual bool Equals(object obj);
        public static bool Equals(object objA, object objB);
        public static bool ReferenceEquals(object objA, object objB);
        public virtual int GetHashCode();
        public virtual string ToString();
        public Type GetType();
    }

    public abstract class ValueType { }
    public abstract class Enum : ValueType { }
    public abstract class Delegate { }
    public class Attribute { }

    public interface IComparable { int CompareTo(object obj); }
    public interface IComparable<in T> { int CompareTo(T other); }
    public interface IEquatable<T> { bool Equals(T other); }
    public interface IFormattable { }
    public interface IDisposable { void Dispose(); }

    public struct Void { }
    public struct Boolean : IComparable, IEquatable<bool> { }
    public struct Char : IComparable, IComparable<char>, IEquatable<char> { }
    public struct SByte : IComparable, IComparable<sbyte>, IFormattable, IEquatable<sbyte> { }
    public struct Byte : IComparable, IComparable<byte>, IFormattable, IEquatable<byte> { }
    public struct Int16 : IComparable, IComparable<short>, IFormattable, IEquatable<short> { }
    public struct UInt16 : IComparable, IComparable<ushort>, IFormattable, IEquatable<ushort> { }
    public struct Int32 : IComparable, IComparable<int>, IFormattable, IEquatable<int> { }
    public struct UInt32 : IComparable, IComparable<uint>, IFormattable, IEquatable<uint> { }
    public struct Int64 : IComparable, IComparable<long>, IFormattable, IEquatable<long> { }
    public struct UInt64 : IComparable, IComparable<ulong>, IFormattable, IEquatable<ulong> { }
    public struct Single : IComparable, IComparable<float>, IFormattable, IEquatable<float>
    {
        public static bool IsNaN(float f);
    }
    public struct Double : IComparable, IComparable<double>, IFormattable, IEquatable<double>
    {
        public static bool IsNaN(double d);
    }
    public struct Decimal : IComparable, IComparable<decimal>, IFormattable, IEquatable<decimal> { }

    public struct Nullable<T> where T : struct
    {
        public bool HasValue { get; }
        public T Value { get; }
    }

    public sealed class String : IComparable, IComparable<string>, IEnumerable<char>, IEquatable<string>
    {
        public static readonly string Empty;
        public int Length { get; }
        public bool Contains(string value);
        public bool Contains(char value);
        public bool Contains(string value, StringComparison comparisonType);
        public bool StartsWith(string value);
        public bool StartsWith(char value);
        public bool StartsWith(string value, StringComparison comparisonType);
        public bool EndsWith(string value);
        public bool EndsWith(char value);
        public bool EndsWith(string value, StringComparison comparisonType);
        public bool Equals(string value);
        public static bool Equals(string a, string b);
        public static string Format(string format, params object[] args);
        public static bool IsNullOrEmpty(string value);
        public static string Concat(string str0, string str1);
        public string Substring(int startIndex);
        public string ToUpper();
        public string ToLower();
        public string Trim();
        public static bool operator ==(string a, string b);
        public static bool operator !=(string a, string b);
    }

    public enum StringComparison
    {
        CurrentCulture,
        CurrentCultureIgnoreCase,
        InvariantCulture,
        InvariantCultureIgnoreCase,
        Ordinal,
        OrdinalIgnoreCase
    }

    public abstract class Type
    {
        public string Name { get; }
        public string FullName { get; }
    }

    public abstract class Array : ICollection, IEnumerable
    {
        public int Length { get; }
    }

    public class Exception
    {
        public Exception();
        public Exception(string message);
        public virtual string Message { get; }
    }
    public class ArgumentException : Exception { }
    public class InvalidOperationException : Exception { }

    public ref struct Span<T>
    {
        public int Length { get; }
        public bool IsEmpty { get; }
        public static bool operator ==(Span<T> left, Span<T> right);
        public static bool operator !=(Span<T> left, Span<T> right);
    }

    public readonly ref struct ReadOnlySpan<T>
    {
        public int Length { get; }
        public bool IsEmpty { get; }
        public static bool operator ==(ReadOnlySpan<T> left, ReadOnlySpan<T> right);
        public static bool operator !=(ReadOnlySpan<T> left, ReadOnlySpan<T> right);
    }

    public struct DateTime : IComparable, IComparable<DateTime>, IEquatable<DateTime>
    {
        public static DateTime Now { get; }
    }
    public struct TimeSpan : IComparable, IComparable<TimeSpan>, IEquatable<TimeSpan> { }
    public struct Guid : IComparable, IEquatable<Guid>
    {
        public static Guid NewGuid();
    }

    public delegate void Action();
    public delegate TResult Func<out TResult>();
}

namespace System.Collections
{
    public interface IEnumerable { }
    public interface ICollection : IEnumerable
    {
        int Count { get; }
    }
    public interface IList : ICollection { }
}

namespace System.Collections.Generic
{
    public interface IEnumerable<out T> : IEnumerable { }
    public interface IReadOnlyCollection<out T> : IEnumerable<T>
    {
        int Count { get; }
    }
    public interface ICollection<T> : IEnumerable<T>
    {
        int Count { get; }
        bool Contains(T item);
        void Add(T item);
    }
    public interface IList<T> : ICollection<T> { }
    public interface ISet<T> : ICollection<T> { }
    public struct KeyValuePair<TKey, TValue>
    {
        public TKey Key { get; }
        public TValue Value { get; }
    }
    public interface IDictionary<TKey, TValue> : ICollection<KeyValuePair<TKey, TValue>>
    {
        bool ContainsKey(TKey key);
    }

    public class List<T> : IList<T>, IReadOnlyCollection<T>, IList
    {
        public List();
        public int Count { get; }
        public bool Contains(T item);
        public void Add(T item);
    }

    public class HashSet<T> : ISet<T>, IReadOnlyCollection<T>
    {
        public HashSet();
        public int Count { get; }
        public bool Contains(T item);
        public bool Add(T item);
    }

    public class Dictionary<TKey, TValue> : IDictionary<TKey, TValue>, IReadOnlyCollection<KeyValuePair<TKey, TValue>>
    {
        public Dictionary();
        public int Count { get; }
        public bool ContainsKey(TKey key);
        public bool ContainsValue(TValue value);
        public void Add(TKey key, TValue value);
    }
}

namespace System.Linq
{
    using System.Collections.Generic;

    public static class Enumerable
    {
        public static bool Contains<TSource>(this IEnumerable<TSource> source, TSource value);
        public static bool Any<TSource>(this IEnumerable<TSource> source);
        public static int Count<TSource>(this IEnumerable<TSource> source);
        public static TSource First<TSource>(this IEnumerable<TSource> source);
        public static List<TSource> ToList<TSource>(this IEnumerable<TSource> source);
        public static TSource[] ToArray<TSource>(this IEnumerable<TSource> source);
    }
}
"#;

const CONSTRAINTS: &str = r#"
namespace NUnit.Framework.Constraints
{
    using System;
    using System.Collections;

    public interface IResolveConstraint
    {
        IConstraint Resolve();
    }

    public interface IConstraint : IResolveConstraint { }

    public abstract class Constraint : IConstraint
    {
        public ConstraintExpression And { get; }
        public ConstraintExpression Or { get; }
        public ConstraintExpression With { get; }
        public IConstraint Resolve();
        public static Constraint operator &(Constraint left, Constraint right);
        public static Constraint operator |(Constraint left, Constraint right);
        public static Constraint operator !(Constraint constraint);
    }

    public class ConstraintExpression
    {
        public ConstraintExpression Not { get; }
        public ConstraintExpression No { get; }
        public ConstraintExpression All { get; }
        public ConstraintExpression Some { get; }
        public ConstraintExpression None { get; }
        public ConstraintExpression With { get; }
        public ResolvableConstraintExpression Count { get; }
        public ResolvableConstraintExpression Length { get; }
        public ResolvableConstraintExpression Message { get; }
        public ResolvableConstraintExpression Property(string name);
        public ItemsConstraintExpression Exactly(int expectedCount);
        public NullConstraint Null { get; }
        public TrueConstraint True { get; }
        public FalseConstraint False { get; }
        public EmptyConstraint Empty { get; }
        public NaNConstraint NaN { get; }
        public EqualConstraint Zero { get; }
        public GreaterThanConstraint Positive { get; }
        public LessThanConstraint Negative { get; }
        public DefaultConstraint Default { get; }
        public UniqueItemsConstraint Unique { get; }
        public CollectionOrderedConstraint Ordered { get; }
        public EqualConstraint EqualTo(object expected);
        public SameAsConstraint SameAs(object expected);
        public GreaterThanConstraint GreaterThan(object expected);
        public GreaterThanOrEqualConstraint GreaterThanOrEqualTo(object expected);
        public GreaterThanOrEqualConstraint AtLeast(object expected);
        public LessThanConstraint LessThan(object expected);
        public LessThanOrEqualConstraint LessThanOrEqualTo(object expected);
        public LessThanOrEqualConstraint AtMost(object expected);
        public RangeConstraint InRange(object from, object to);
        public ExactTypeConstraint TypeOf(Type expectedType);
        public ExactTypeConstraint TypeOf<TExpected>();
        public InstanceOfTypeConstraint InstanceOf(Type expectedType);
        public InstanceOfTypeConstraint InstanceOf<TExpected>();
        public AssignableFromConstraint AssignableFrom(Type expectedType);
        public AssignableFromConstraint AssignableFrom<TExpected>();
        public AssignableToConstraint AssignableTo(Type expectedType);
        public AssignableToConstraint AssignableTo<TExpected>();
        public CollectionEquivalentConstraint EquivalentTo(IEnumerable expected);
        public SomeItemsConstraint Member(object expected);
        public SomeItemsConstraint Contains(object expected);
        public ContainsConstraint Contains(string expected);
        public ContainsConstraint Contain(object expected);
        public ContainsConstraint Contain(string expected);
        public StartsWithConstraint StartWith(string expected);
        public EndsWithConstraint EndWith(string expected);
        public RegexConstraint Match(string pattern);
    }

    public sealed class ResolvableConstraintExpression : ConstraintExpression, IResolveConstraint
    {
        public IConstraint Resolve();
    }

    public sealed class ItemsConstraintExpression : ConstraintExpression { }

    public class EqualConstraint : Constraint
    {
        public EqualConstraint(object expected);
        public EqualConstraint Within(object amount);
        public EqualConstraint IgnoreCase { get; }
        public EqualConstraint AsCollection { get; }
        public EqualConstraint Percent { get; }
        public EqualConstraint Ulps { get; }
    }

    public class NullConstraint : Constraint { }
    public class TrueConstraint : Constraint { }
    public class FalseConstraint : Constraint { }
    public class NaNConstraint : Constraint { }
    public class EmptyConstraint : Constraint { }
    public class DefaultConstraint : Constraint { }
    public class UniqueItemsConstraint : Constraint { }
    public class CollectionOrderedConstraint : Constraint
    {
        public CollectionOrderedConstraint Ascending { get; }
        public CollectionOrderedConstraint Descending { get; }
    }
    public class CollectionEquivalentConstraint : Constraint { }
    public class ThrowsNothingConstraint : Constraint { }

    public class SameAsConstraint : Constraint
    {
        public SameAsConstraint(object expected);
    }

    public abstract class ComparisonConstraint : Constraint
    {
        public ComparisonConstraint Within(object amount);
        public ComparisonConstraint Percent { get; }
    }
    public class GreaterThanConstraint : ComparisonConstraint { }
    public class GreaterThanOrEqualConstraint : ComparisonConstraint { }
    public class LessThanConstraint : ComparisonConstraint { }
    public class LessThanOrEqualConstraint : ComparisonConstraint { }

    public class RangeConstraint : Constraint { }

    public abstract class TypeConstraint : Constraint { }
    public class ExactTypeConstraint : TypeConstraint { }
    public class InstanceOfTypeConstraint : TypeConstraint { }
    public class AssignableFromConstraint : TypeConstraint { }
    public class AssignableToConstraint : TypeConstraint { }

    public class SomeItemsConstraint : Constraint
    {
        public SomeItemsConstraint IgnoreCase { get; }
    }
    public class ContainsConstraint : Constraint
    {
        public ContainsConstraint IgnoreCase { get; }
    }

    public abstract class StringConstraint : Constraint
    {
        public StringConstraint IgnoreCase { get; }
    }
    public class SubstringConstraint : StringConstraint { }
    public class StartsWithConstraint : StringConstraint { }
    public class EndsWithConstraint : StringConstraint { }
    public class RegexConstraint : StringConstraint { }
}
"#;

const HELPERS: &str = r#"
namespace NUnit.Framework
{
    using System;
    using System.Collections;
    using NUnit.Framework.Constraints;

    public delegate void TestDelegate();

    public class TestAttribute : Attribute { }
    public class TestFixtureAttribute : Attribute { }
    public class TestCaseAttribute : Attribute
    {
        public TestCaseAttribute(params object[] arguments);
    }

    public abstract class Is
    {
        public static ConstraintExpression Not { get; }
        public static ConstraintExpression All { get; }
        public static NullConstraint Null { get; }
        public static TrueConstraint True { get; }
        public static FalseConstraint False { get; }
        public static EmptyConstraint Empty { get; }
        public static NaNConstraint NaN { get; }
        public static EqualConstraint Zero { get; }
        public static GreaterThanConstraint Positive { get; }
        public static LessThanConstraint Negative { get; }
        public static DefaultConstraint Default { get; }
        public static UniqueItemsConstraint Unique { get; }
        public static CollectionOrderedConstraint Ordered { get; }
        public static EqualConstraint EqualTo(object expected);
        public static SameAsConstraint SameAs(object expected);
        public static GreaterThanConstraint GreaterThan(object expected);
        public static GreaterThanOrEqualConstraint GreaterThanOrEqualTo(object expected);
        public static GreaterThanOrEqualConstraint AtLeast(object expected);
        public static LessThanConstraint LessThan(object expected);
        public static LessThanOrEqualConstraint LessThanOrEqualTo(object expected);
        public static LessThanOrEqualConstraint AtMost(object expected);
        public static RangeConstraint InRange(object from, object to);
        public static ExactTypeConstraint TypeOf(Type expectedType);
        public static ExactTypeConstraint TypeOf<TExpected>();
        public static InstanceOfTypeConstraint InstanceOf(Type expectedType);
        public static InstanceOfTypeConstraint InstanceOf<TExpected>();
        public static AssignableFromConstraint AssignableFrom(Type expectedType);
        public static AssignableFromConstraint AssignableFrom<TExpected>();
        public static AssignableToConstraint AssignableTo(Type expectedType);
        public static AssignableToConstraint AssignableTo<TExpected>();
        public static CollectionEquivalentConstraint EquivalentTo(IEnumerable expected);
    }

    public static class Has
    {
        public static ConstraintExpression No { get; }
        public static ConstraintExpression All { get; }
        public static ConstraintExpression Some { get; }
        public static ConstraintExpression None { get; }
        public static ResolvableConstraintExpression Count { get; }
        public static ResolvableConstraintExpression Length { get; }
        public static ResolvableConstraintExpression Message { get; }
        public static ResolvableConstraintExpression Property(string name);
        public static ItemsConstraintExpression Exactly(int expectedCount);
        public static SomeItemsConstraint Member(object expected);
    }

    public static class Does
    {
        public static ConstraintExpression Not { get; }
        public static SomeItemsConstraint Contain(object expected);
        public static ContainsConstraint Contain(string expected);
        public static StartsWithConstraint StartWith(string expected);
        public static EndsWithConstraint EndWith(string expected);
        public static RegexConstraint Match(string pattern);
    }

    public static class Contains
    {
        public static SomeItemsConstraint Item(object expected);
        public static SubstringConstraint Substring(string expected);
    }

    public abstract class Throws
    {
        public static ResolvableConstraintExpression Exception { get; }
        public static ThrowsNothingConstraint Nothing { get; }
        public static ExactTypeConstraint TypeOf(Type expectedType);
        public static ExactTypeConstraint TypeOf<TExpected>();
        public static InstanceOfTypeConstraint InstanceOf(Type expectedType);
        public static InstanceOfTypeConstraint InstanceOf<TExpected>();
    }

    public class Assert
    {
        public static void That(bool condition);
        public static void That(bool condition, string message, params object[] args);
        public static void That<TActual>(TActual actual, IResolveConstraint expression);
        public static void That<TActual>(TActual actual, IResolveConstraint expression, string message, params object[] args);
        public static void Pass();
        public static void Fail(string message);
        public static void Ignore(string message);
        public static void Inconclusive(string message);
        public static void Multiple(TestDelegate testDelegate);
{CLASSIC}
    }
}

namespace NUnit.Framework.Legacy
{
    using System;
    using System.Collections;

    public class ClassicAssert
    {
{CLASSIC}
    }
}
"#;

const NUMERIC_TYPES: &[&str] = &["int", "uint", "long", "ulong", "decimal", "double", "float"];

/// `(method, parameters)` of the NUnit classic surface without the message overloads
fn classic_signatures() -> Vec<(String, String)> {
    let mut signatures: Vec<(String, String)> = Vec::new();
    let mut add = |method: &str, parameters: &str| {
        signatures.push((method.to_string(), parameters.to_string()));
    };

    for method in ["True", "IsTrue", "False", "IsFalse"] {
        add(method, "bool? condition");
        add(method, "bool condition");
    }
    for method in ["Null", "IsNull", "NotNull", "IsNotNull"] {
        add(method, "object anObject");
    }
    add("IsNaN", "double aDouble");
    add("IsNaN", "double? aDouble");
    for method in ["IsEmpty", "IsNotEmpty"] {
        add(method, "string aString");
        add(method, "IEnumerable collection");
    }
    add("AreEqual", "double expected, double actual, double delta");
    add("AreEqual", "double expected, double? actual, double delta");
    for method in ["AreEqual", "AreNotEqual", "AreSame", "AreNotSame"] {
        add(method, "object expected, object actual");
    }
    add("Contains", "object expected, ICollection actual");
    for method in ["Zero", "NotZero", "Positive", "Negative"] {
        for ty in NUMERIC_TYPES {
            add(method, &format!("{ty} actual"));
        }
    }
    for method in ["Greater", "GreaterOrEqual", "Less", "LessOrEqual"] {
        for ty in NUMERIC_TYPES.iter().chain(["IComparable"].iter()) {
            add(method, &format!("{ty} arg1, {ty} arg2"));
        }
    }
    for method in [
        "IsInstanceOf",
        "IsNotInstanceOf",
        "IsAssignableFrom",
        "IsNotAssignableFrom",
    ] {
        add(method, "Type expected, object actual");
        add(&format!("{method}<TExpected>"), "object actual");
    }
    signatures
}

fn classic_members() -> String {
    let mut members = String::new();
    for (method, parameters) in classic_signatures() {
        let _ = writeln!(members, "        public static void {method}({parameters});");
        let _ = writeln!(
            members,
            "        public static void {method}({parameters}, string message, params object[] args);"
        );
    }
    members
}

/// The complete prelude source
pub fn prelude_source() -> String {
    let helpers = HELPERS.replace("{CLASSIC}", &classic_members());
    format!("{SYSTEM}\n{CONSTRAINTS}\n{helpers}")
}

static PRELUDE: OnceLock<Declarations> = OnceLock::new();

/// Declarations of the prelude, parsed on first use
pub fn prelude() -> &'static Declarations {
    PRELUDE.get_or_init(|| match parse_source(&prelude_source()) {
        Ok(parsed) => parsed.declarations,
        Err(e) => {
            warn!(error = %e, "Failed to parse the reference prelude");
            Declarations::default()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_declares_assert_holders() {
        let declarations = prelude();
        let names: Vec<(&str, &str)> = declarations
            .types
            .iter()
            .map(|t| (t.namespace.as_str(), t.name.as_str()))
            .collect();
        assert!(names.contains(&("NUnit.Framework", "Assert")));
        assert!(names.contains(&("NUnit.Framework.Legacy", "ClassicAssert")));
        assert!(names.contains(&("NUnit.Framework.Constraints", "Constraint")));
        assert!(names.contains(&("System", "String")));
    }

    #[test]
    fn test_classic_surface_has_message_overloads() {
        let declarations = prelude();
        let classic = declarations
            .types
            .iter()
            .find(|t| t.name == "ClassicAssert")
            .unwrap();
        let are_equal: Vec<_> = classic
            .methods
            .iter()
            .filter(|m| m.name == "AreEqual")
            .collect();
        assert_eq!(are_equal.len(), 6);
        assert!(are_equal
            .iter()
            .any(|m| m.parameters.last().is_some_and(|p| p.is_params && p.name == "args")));
    }

    #[test]
    fn test_span_is_ref_like() {
        let span = prelude()
            .types
            .iter()
            .find(|t| t.name == "Span")
            .unwrap();
        assert!(span.is_ref_like);
        assert_eq!(span.type_parameters, vec!["T".to_string()]);
    }

    #[test]
    fn test_enumerable_contains_is_extension() {
        let enumerable = prelude()
            .types
            .iter()
            .find(|t| t.name == "Enumerable")
            .unwrap();
        let contains = enumerable
            .methods
            .iter()
            .find(|m| m.name == "Contains")
            .unwrap();
        assert!(contains.is_extension());
        assert_eq!(contains.type_parameters, vec!["TSource".to_string()]);
    }
}
