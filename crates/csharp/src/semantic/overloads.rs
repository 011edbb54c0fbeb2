//! Overload resolution, including generic inference and `params` expansion

use super::binder::{Candidate, MethodGroup};
use super::conversions::{is_signed_integral, is_unsigned_integral};
use super::table::{substitute, Substitution};
use super::SourceSemanticModel;
use crate::declarations::ParameterDecl;
use nunit_analyzers_core::syntax::{Argument, Expr};
use nunit_analyzers_core::{Conversion, MethodSymbol, ParameterSymbol, TypeKind, TypeSymbol};
use tracing::trace;

/// One argument position; the receiver of a reduced extension call has no expression
struct Slot<'e> {
    name: Option<&'e str>,
    expr: Option<&'e Expr>,
    /// `None` when the argument's type is unknown
    ty: Option<TypeSymbol>,
}

struct Applicable {
    parameters: Vec<ParameterSymbol>,
    /// The type each slot converts to
    targets: Vec<TypeSymbol>,
    return_type: TypeSymbol,
    type_arguments: Vec<TypeSymbol>,
    expanded: bool,
    is_generic: bool,
    used_defaults: bool,
}

/// Assigns slots to parameters; returns the target per slot and whether a
/// default value fills any parameter
fn map_arguments(
    parameters: &[ParameterDecl],
    declared: &[TypeSymbol],
    slots: &[Slot],
    expanded: bool,
) -> Option<(Vec<TypeSymbol>, bool)> {
    let params_index = parameters.iter().position(|p| p.is_params);
    let expanded_index = if expanded { params_index } else { None };
    let mut assigned = vec![false; parameters.len()];
    let mut targets = Vec::with_capacity(slots.len());

    for (position, slot) in slots.iter().enumerate() {
        let index = match slot.name {
            Some(name) => parameters.iter().position(|p| p.name == name)?,
            None => match expanded_index {
                Some(index) if position >= index => index,
                _ if position < parameters.len() => position,
                _ => return None,
            },
        };
        let declared_type = declared.get(index)?;
        if Some(index) == expanded_index {
            targets.push(
                declared_type
                    .element_type
                    .as_deref()
                    .cloned()
                    .unwrap_or_else(TypeSymbol::error),
            );
        } else {
            if assigned[index] {
                return None;
            }
            targets.push(declared_type.clone());
        }
        assigned[index] = true;
    }

    let mut used_defaults = false;
    for (index, parameter) in parameters.iter().enumerate() {
        if assigned[index] || Some(index) == expanded_index {
            continue;
        }
        if !parameter.is_optional {
            return None;
        }
        used_defaults = true;
    }
    Some((targets, used_defaults))
}

fn same_signature(a: &Applicable, b: &Applicable) -> bool {
    a.parameters.len() == b.parameters.len()
        && a.parameters
            .iter()
            .zip(b.parameters.iter())
            .all(|(x, y)| x.ty == y.ty && x.is_params == y.is_params)
}

impl SourceSemanticModel {
    pub(crate) fn resolve_overload(
        &self,
        group: &MethodGroup,
        arguments: &[Argument],
    ) -> Option<MethodSymbol> {
        let mut slots: Vec<Slot> = arguments
            .iter()
            .map(|argument| Slot {
                name: argument.name.as_deref(),
                expr: Some(&argument.expression),
                ty: self.bound_type(&argument.expression),
            })
            .collect();
        if let Some(method) = self.best(&group.candidates, &slots, &group.type_arguments) {
            return Some(method);
        }
        let receiver = group.receiver.as_ref()?;
        if group.extensions.is_empty() {
            return None;
        }
        slots.insert(
            0,
            Slot {
                name: None,
                expr: None,
                ty: Some(receiver.clone()),
            },
        );
        self.best(&group.extensions, &slots, &group.type_arguments)
    }

    pub(crate) fn resolve_operator(
        &self,
        candidates: &[Candidate],
        operands: &[&Expr],
    ) -> Option<MethodSymbol> {
        let slots: Vec<Slot> = operands
            .iter()
            .map(|operand| Slot {
                name: None,
                expr: Some(*operand),
                ty: self.bound_type(operand),
            })
            .collect();
        self.best(candidates, &slots, &[])
    }

    fn best(
        &self,
        candidates: &[Candidate],
        slots: &[Slot],
        explicit: &[TypeSymbol],
    ) -> Option<MethodSymbol> {
        let mut applicable: Vec<(usize, Applicable)> = Vec::new();
        for (index, candidate) in candidates.iter().enumerate() {
            let Some(found) = self.applicable(candidate, slots, explicit) else {
                continue;
            };
            // An override or interface re-declaration of a method already found
            if !applicable.iter().any(|(_, existing)| same_signature(existing, &found)) {
                applicable.push((index, found));
            }
        }

        let count = applicable.len();
        let position = (0..count).find(|&i| {
            (0..count).all(|j| i == j || self.is_better(&applicable[i].1, &applicable[j].1, slots))
        });
        let Some(position) = position else {
            if count > 1 {
                trace!(candidates = count, "Ambiguous overload");
            }
            return None;
        };
        let (index, chosen) = applicable.into_iter().nth(position)?;
        let candidate = candidates.get(index)?;
        let method = self.table.decl(candidate.id)?.methods.get(candidate.method)?;

        let mut parameters = chosen.parameters;
        if candidate.reduced && !parameters.is_empty() {
            parameters.remove(0);
        }
        Some(MethodSymbol {
            name: method.name.clone(),
            containing_type: candidate.owner.clone(),
            parameters,
            return_type: chosen.return_type,
            type_arguments: chosen.type_arguments,
            is_static: method.is_static,
            is_extension: method.is_extension(),
            is_reduced_extension: candidate.reduced,
        })
    }

    fn applicable(
        &self,
        candidate: &Candidate,
        slots: &[Slot],
        explicit: &[TypeSymbol],
    ) -> Option<Applicable> {
        let method = self.table.decl(candidate.id)?.methods.get(candidate.method)?;
        if !explicit.is_empty() && explicit.len() != method.type_parameters.len() {
            return None;
        }
        let mut scope = self.table.decl_scope(candidate.id);
        scope.type_parameters.extend(method.type_parameters.iter().cloned());
        let owner_map = self.table.substitution(candidate.id, &candidate.owner);
        let declared: Vec<TypeSymbol> = method
            .parameters
            .iter()
            .map(|parameter| {
                parameter.ty.as_ref().map_or_else(TypeSymbol::error, |ty| {
                    substitute(&self.table.resolve(ty, &scope), &owner_map)
                })
            })
            .collect();
        let return_type = substitute(&self.table.resolve(&method.return_type, &scope), &owner_map);

        for expanded in [false, true] {
            if expanded && method.params_index().is_none() {
                break;
            }
            let Some((targets, used_defaults)) =
                map_arguments(&method.parameters, &declared, slots, expanded)
            else {
                continue;
            };

            let mut inferred: Substitution = method
                .type_parameters
                .iter()
                .cloned()
                .zip(explicit.iter().cloned())
                .collect();
            if explicit.is_empty() {
                for (slot, target) in slots.iter().zip(&targets) {
                    if let Some(ty) = &slot.ty {
                        self.unify(target, ty, &method.type_parameters, &mut inferred);
                    }
                }
            }
            let any_unknown = slots.iter().any(|slot| slot.ty.is_none());
            let mut complete = true;
            for parameter in &method.type_parameters {
                if !inferred.contains_key(parameter) {
                    if any_unknown {
                        inferred.insert(parameter.clone(), TypeSymbol::error());
                    } else {
                        complete = false;
                    }
                }
            }
            if !complete {
                continue;
            }

            let targets: Vec<TypeSymbol> = targets.iter().map(|t| substitute(t, &inferred)).collect();
            let convertible = slots.iter().zip(&targets).enumerate().all(|(i, (slot, target))| {
                self.slot_converts(slot, target, candidate.reduced && i == 0)
            });
            if !convertible {
                continue;
            }

            let parameters = method
                .parameters
                .iter()
                .zip(&declared)
                .map(|(parameter, ty)| ParameterSymbol {
                    name: parameter.name.clone(),
                    ty: substitute(ty, &inferred),
                    is_params: parameter.is_params,
                    is_optional: parameter.is_optional,
                })
                .collect();
            return Some(Applicable {
                parameters,
                targets,
                return_type: substitute(&return_type, &inferred),
                type_arguments: method
                    .type_parameters
                    .iter()
                    .map(|p| inferred.get(p).cloned().unwrap_or_else(TypeSymbol::error))
                    .collect(),
                expanded,
                is_generic: !method.type_parameters.is_empty(),
                used_defaults,
            });
        }
        None
    }

    fn slot_converts(&self, slot: &Slot, target: &TypeSymbol, is_receiver: bool) -> bool {
        let Some(ty) = &slot.ty else {
            return true;
        };
        if target.is_error() {
            return true;
        }
        match slot.expr {
            Some(expr) if !is_receiver => self.classify(expr, target).exists(),
            _ => matches!(
                self.table.standard_conversion(ty, target),
                Conversion::Identity | Conversion::ImplicitReference | Conversion::Boxing
            ),
        }
    }

    /// Infers method type parameters by matching `parameter` against `argument`
    fn unify(
        &self,
        parameter: &TypeSymbol,
        argument: &TypeSymbol,
        type_parameters: &[String],
        inferred: &mut Substitution,
    ) {
        if argument.is_error() || argument.kind == TypeKind::Null {
            return;
        }
        if parameter.kind == TypeKind::TypeParameter {
            if type_parameters.contains(&parameter.name) {
                inferred
                    .entry(parameter.name.clone())
                    .or_insert_with(|| argument.clone());
            }
            return;
        }
        if let (Some(p), Some(a)) = (&parameter.element_type, &argument.element_type) {
            self.unify(p, a, type_parameters, inferred);
            return;
        }
        if parameter.type_arguments.is_empty() {
            return;
        }
        if parameter.is_nullable_value_type() && !argument.is_nullable_value_type() {
            if let Some(inner) = parameter.type_arguments.first() {
                self.unify(inner, argument, type_parameters, inferred);
            }
            return;
        }
        let matching = self
            .table
            .supertypes(argument)
            .into_iter()
            .find(|supertype| supertype.same_definition(parameter));
        if let Some(matching) = matching {
            for (p, a) in parameter.type_arguments.iter().zip(matching.type_arguments.iter()) {
                self.unify(p, a, type_parameters, inferred);
            }
        }
    }

    fn is_better(&self, a: &Applicable, b: &Applicable, slots: &[Slot]) -> bool {
        let mut a_better = false;
        let mut b_better = false;
        for (i, slot) in slots.iter().enumerate() {
            let (Some(t1), Some(t2)) = (a.targets.get(i), b.targets.get(i)) else {
                continue;
            };
            match self.better_conversion(slot.ty.as_ref(), t1, t2) {
                Some(true) => a_better = true,
                Some(false) => b_better = true,
                None => {}
            }
        }
        if a_better || b_better {
            return a_better && !b_better;
        }
        if a.expanded != b.expanded {
            return !a.expanded;
        }
        if a.is_generic != b.is_generic {
            return !a.is_generic;
        }
        if a.used_defaults != b.used_defaults {
            return !a.used_defaults;
        }
        false
    }

    /// `Some(true)` when converting to `first` is better than to `second`
    fn better_conversion(
        &self,
        source: Option<&TypeSymbol>,
        first: &TypeSymbol,
        second: &TypeSymbol,
    ) -> Option<bool> {
        if first == second {
            return None;
        }
        let source = source?;
        if source == first {
            return Some(true);
        }
        if source == second {
            return Some(false);
        }
        let first_to_second = self.table.standard_conversion(first, second).exists();
        let second_to_first = self.table.standard_conversion(second, first).exists();
        if first_to_second != second_to_first {
            return Some(first_to_second);
        }
        if is_signed_integral(first.special) && is_unsigned_integral(second.special) {
            return Some(true);
        }
        if is_unsigned_integral(first.special) && is_signed_integral(second.special) {
            return Some(false);
        }
        None
    }
}
