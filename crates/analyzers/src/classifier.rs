//! Recognizes assertion calls and binds their arguments to parameters

use crate::catalog::{holders, parameters};
use nunit_analyzers_core::syntax::SimpleName;
use nunit_analyzers_core::{
    Argument, Expr, MethodSymbol, ParameterSymbol, RootExpression, SemanticModel, Span,
};
use tracing::{debug, trace};

/// An argument bound to the formal parameter it fills
#[derive(Debug, Clone)]
pub struct BoundArgument<'e> {
    pub parameter: ParameterSymbol,
    pub argument: &'e Argument,
}

/// A resolved assertion call site
#[derive(Debug, Clone)]
pub struct InvocationShape<'e> {
    pub invocation: &'e Expr,
    pub span: Span,
    /// The invoked expression, `ClassicAssert.AreEqual` in `ClassicAssert.AreEqual(a, b)`
    pub target: &'e Expr,
    pub method: MethodSymbol,
    arguments: &'e [Argument],
    bound: Vec<BoundArgument<'e>>,
    overflow: Vec<&'e Argument>,
}

/// Classifies `invocation` as an assertion call
///
/// Returns `None` for calls outside method bodies, calls inside statements
/// with parse errors, unresolved calls and calls on any type other than the
/// NUnit assertion holders.
pub fn classify<'e>(
    invocation: &'e Expr,
    root: &RootExpression,
    model: &dyn SemanticModel,
) -> Option<InvocationShape<'e>> {
    let span = invocation.span?;
    if !root.in_method_body || root.has_errors {
        debug!(
            start = span.start,
            in_method_body = root.in_method_body,
            has_errors = root.has_errors,
            "Skipping call outside a well-formed method body"
        );
        return None;
    }
    let method = model.resolve_method(invocation)?;
    let holder = method.containing_type.full_name();
    if !holders::ALL.contains(&holder.as_str()) {
        trace!(method = %method.name, holder = %holder, "Not an assertion holder");
        return None;
    }
    bind(invocation, method)
}

/// Zips the syntactic arguments against the parameters of `method`
///
/// Positional arguments fill parameters in declaration order, named ones
/// fill the parameter they name. Everything landing on the `params`
/// parameter goes to the overflow list.
pub fn bind(invocation: &Expr, method: MethodSymbol) -> Option<InvocationShape<'_>> {
    let span = invocation.span?;
    let (target, list) = invocation.as_invocation()?;
    let params_index = method.parameters.iter().position(is_catch_all);

    let mut bound = Vec::new();
    let mut overflow = Vec::new();
    for (position, argument) in list.arguments.iter().enumerate() {
        let parameter = match &argument.name {
            Some(name) => method.parameter(name)?,
            None => match params_index {
                Some(index) if position >= index => method.parameters.get(index)?,
                _ => method.parameters.get(position)?,
            },
        };
        if is_catch_all(parameter) {
            overflow.push(argument);
        } else {
            bound.push(BoundArgument {
                parameter: parameter.clone(),
                argument,
            });
        }
    }

    Some(InvocationShape {
        invocation,
        span,
        target,
        method,
        arguments: &list.arguments,
        bound,
        overflow,
    })
}

fn is_catch_all(parameter: &ParameterSymbol) -> bool {
    parameter.is_params || parameter.name == parameters::ARGS
}

impl<'e> InvocationShape<'e> {
    pub fn method_name(&self) -> &str {
        &self.method.name
    }

    /// The syntactic arguments in source order
    pub fn arguments(&self) -> &'e [Argument] {
        self.arguments
    }

    /// Arguments bound to named parameters, in source order, without the overflow
    pub fn bound(&self) -> &[BoundArgument<'e>] {
        &self.bound
    }

    pub fn binding(&self, parameter: &str) -> Option<&BoundArgument<'e>> {
        self.bound.iter().find(|b| b.parameter.name == parameter)
    }

    pub fn argument(&self, parameter: &str) -> Option<&'e Argument> {
        self.binding(parameter).map(|b| b.argument)
    }

    /// The first of `parameters` that has an argument
    pub fn first_argument(&self, parameters: &[&str]) -> Option<&BoundArgument<'e>> {
        parameters.iter().find_map(|name| self.binding(name))
    }

    pub fn message(&self) -> Option<&'e Argument> {
        self.argument(parameters::MESSAGE)
    }

    /// Arguments passed to the `params` parameter
    pub fn overflow(&self) -> &[&'e Argument] {
        &self.overflow
    }

    /// The `params` parameter, whether or not any argument landed on it
    pub fn catch_all(&self) -> Option<&ParameterSymbol> {
        self.method.parameters.iter().find(|p| is_catch_all(p))
    }

    /// The invoked member name, including explicit type arguments
    pub fn member_name(&self) -> Option<&'e SimpleName> {
        self.target.trailing_name()
    }

    pub fn is_generic(&self) -> bool {
        self.method.is_generic()
            || self
                .member_name()
                .is_some_and(|name| name.type_arguments.is_some())
    }

    pub fn is_on_classic_holder(&self) -> bool {
        self.method.containing_type.full_name() == holders::CLASSIC_ASSERT
    }

    /// Trailing trivia of the last syntactic argument
    pub fn closing_trivia(&self) -> &'e str {
        self.arguments
            .last()
            .map_or("", |argument| argument.trailing_trivia.as_str())
    }

    /// Leading trivia of the first syntactic argument
    pub fn opening_trivia(&self) -> &'e str {
        self.arguments
            .first()
            .map_or("", |argument| argument.leading_trivia.as_str())
    }
}
