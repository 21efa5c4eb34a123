//! # Compiled Program — The Executable Validator
//!
//! [`Validator`] owns the immutable node table produced by compilation
//! plus the entrypoint metadata. Validation walks the table: each node
//! dispatches on the value's primitive type, runs its combining checks,
//! its arm checks, and (arrays/objects) its member fold. A keyword
//! mismatch is thrown as an `Err(Box<Mismatch>)` and unwinds to the
//! public entrypoint, pausing only at combinator catch sites and at
//! `$ref` boundaries where the referring pointer is recorded.
//!
//! Validators hold no mutable state: any number of threads may validate
//! independent values against the same `Validator` without locking.

use std::collections::HashSet;

use serde_json::{Map, Value};

use schemac_core::{json_equal, num_cmp, FailureKind, Mismatch, SchemaPointer};

use crate::node::{
    AdditionalMembers, ArrayFold, Check, DependencyKind, DispatchNode, Fold, Node, ObjectFold,
    RestItems, TypeArm, UnevaluatedCheck, ValidatorId,
};

/// Checks "throw" by returning a boxed mismatch.
pub(crate) type Outcome = Result<(), Box<Mismatch>>;

/// One step of an instance path, linked back toward the root so pushing
/// a segment allocates nothing.
#[derive(Clone, Copy)]
enum Segment<'a> {
    Key(&'a str),
    Index(usize),
}

#[derive(Clone, Copy)]
struct InstanceLocation<'a> {
    parent: Option<&'a InstanceLocation<'a>>,
    segment: Option<Segment<'a>>,
}

impl<'a> InstanceLocation<'a> {
    fn root() -> Self {
        Self {
            parent: None,
            segment: None,
        }
    }

    fn push(&'a self, segment: Segment<'a>) -> InstanceLocation<'a> {
        Self {
            parent: Some(self),
            segment: Some(segment),
        }
    }

    /// Raw RFC 6901 rendering; the root renders as `/`. Only the failure
    /// path pays for this.
    fn render(&self) -> String {
        let mut segments: Vec<String> = Vec::new();
        let mut cursor = Some(self);
        while let Some(loc) = cursor {
            if let Some(segment) = &loc.segment {
                segments.push(match segment {
                    Segment::Key(key) => (*key).to_string(),
                    Segment::Index(index) => index.to_string(),
                });
            }
            cursor = loc.parent;
        }
        segments.reverse();
        SchemaPointer::from_segments(segments).to_json_ptr()
    }
}

/// Entrypoint metadata extracted at compile time.
#[derive(Debug, Clone, Default)]
pub(crate) struct Metadata {
    pub id: Option<Value>,
    pub schema: Option<Value>,
    pub title: Option<Value>,
    pub description: Option<Value>,
    pub default: Option<Value>,
    pub examples: Option<Value>,
}

/// An executable validator compiled from one schema document.
///
/// Immutable and `Send + Sync`: compiled validators may be shared across
/// threads and reused for any number of validations.
#[derive(Debug)]
pub struct Validator {
    pub(crate) name: String,
    pub(crate) authority: String,
    pub(crate) entry: ValidatorId,
    pub(crate) nodes: Vec<Node>,
    pub(crate) metadata: Metadata,
}

impl Validator {
    /// The name this validator was compiled under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The authority scoping every generated identifier.
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Validate a decoded JSON value. The first mismatch stops
    /// validation and is returned as the failure value.
    pub fn validate(&self, value: &Value) -> Result<(), Mismatch> {
        let root = InstanceLocation::root();
        match self.check_node(self.entry, value, &root) {
            Ok(()) => Ok(()),
            Err(mismatch) => Err(*mismatch),
        }
    }

    /// Validity without the failure record.
    pub fn is_valid(&self, value: &Value) -> bool {
        self.validate(value).is_ok()
    }

    /// `$id` of the entrypoint schema, if declared.
    pub fn id(&self) -> Option<&Value> {
        self.metadata.id.as_ref()
    }

    /// `$schema` of the entrypoint schema, if declared.
    pub fn schema_uri(&self) -> Option<&Value> {
        self.metadata.schema.as_ref()
    }

    /// `title` of the entrypoint schema, if declared.
    pub fn title(&self) -> Option<&Value> {
        self.metadata.title.as_ref()
    }

    /// `description` of the entrypoint schema, if declared.
    pub fn description(&self) -> Option<&Value> {
        self.metadata.description.as_ref()
    }

    /// `default` of the entrypoint schema, if declared.
    pub fn default_value(&self) -> Option<&Value> {
        self.metadata.default.as_ref()
    }

    /// `examples` of the entrypoint schema, if declared.
    pub fn examples(&self) -> Option<&Value> {
        self.metadata.examples.as_ref()
    }

    // ---- node execution ----

    fn check_node(&self, id: ValidatorId, value: &Value, loc: &InstanceLocation<'_>) -> Outcome {
        match &self.nodes[id.0] {
            Node::AcceptAll => Ok(()),
            Node::RejectAll { schema_pointer } => Err(Box::new(
                Mismatch::new(
                    FailureKind::TypeMismatch,
                    schema_pointer.clone(),
                    value.clone(),
                    loc.render(),
                )
                .with_reason("false schema accepts nothing"),
            )),
            Node::Dispatch(node) => self.run_dispatch(node, value, loc),
        }
    }

    fn node_is_valid(&self, id: ValidatorId, value: &Value) -> bool {
        let root = InstanceLocation::root();
        self.check_node(id, value, &root).is_ok()
    }

    fn run_dispatch(
        &self,
        node: &DispatchNode,
        value: &Value,
        loc: &InstanceLocation<'_>,
    ) -> Outcome {
        let Some(arm) = node.arms.iter().find(|arm| arm.primitive.matches(value)) else {
            // Catch-all clause: no guard admitted the value.
            return Err(Box::new(Mismatch::new(
                FailureKind::TypeMismatch,
                node.type_pointer.clone(),
                value.clone(),
                loc.render(),
            )));
        };
        for check in &node.combining {
            self.run_check(check, value, loc)?;
        }
        self.run_arm(node, arm, value, loc)
    }

    fn run_arm(
        &self,
        node: &DispatchNode,
        arm: &TypeArm,
        value: &Value,
        loc: &InstanceLocation<'_>,
    ) -> Outcome {
        for check in &arm.checks {
            self.run_check(check, value, loc)?;
        }
        match (&arm.fold, value) {
            (Some(Fold::Array(fold)), Value::Array(items)) => {
                self.run_array_fold(node, fold, items, value, loc)
            }
            (Some(Fold::Object(fold)), Value::Object(map)) => {
                self.run_object_fold(node, fold, map, value, loc)
            }
            _ => Ok(()),
        }
    }

    fn run_check(&self, check: &Check, value: &Value, loc: &InstanceLocation<'_>) -> Outcome {
        match check {
            Check::Enum { values, pointer } => {
                if values.iter().any(|candidate| json_equal(candidate, value)) {
                    Ok(())
                } else {
                    Err(Box::new(Mismatch::new(
                        FailureKind::EnumMismatch,
                        pointer.clone(),
                        value.clone(),
                        loc.render(),
                    )))
                }
            }
            Check::Const {
                value: constant,
                pointer,
            } => {
                if json_equal(constant, value) {
                    Ok(())
                } else {
                    Err(Box::new(Mismatch::new(
                        FailureKind::ConstMismatch,
                        pointer.clone(),
                        value.clone(),
                        loc.render(),
                    )))
                }
            }
            Check::Ref { target, pointer } => match self.check_node(*target, value, loc) {
                Ok(()) => Ok(()),
                Err(mut mismatch) => {
                    mismatch.push_ref(pointer.clone());
                    Err(mismatch)
                }
            },
            Check::AllOf { branches, .. } => {
                // Not a catch site: the first branch mismatch propagates
                // with its own schema pointer.
                for branch in branches {
                    self.check_node(*branch, value, loc)?;
                }
                Ok(())
            }
            Check::AnyOf { branches, pointer } => {
                let mut failures = Vec::with_capacity(branches.len());
                for branch in branches {
                    match self.check_node(*branch, value, loc) {
                        Ok(()) => return Ok(()),
                        Err(mismatch) => failures.push(*mismatch),
                    }
                }
                Err(Box::new(
                    Mismatch::new(
                        FailureKind::CombinatorMismatch,
                        pointer.clone(),
                        value.clone(),
                        loc.render(),
                    )
                    .with_reason("no anyOf branch matched")
                    .with_failures(failures),
                ))
            }
            Check::OneOf { branches, pointer } => {
                let mut matches = Vec::new();
                let mut failures = Vec::new();
                for (branch, branch_pointer) in branches {
                    match self.check_node(*branch, value, loc) {
                        Ok(()) => matches.push(branch_pointer.clone()),
                        Err(mismatch) => failures.push(*mismatch),
                    }
                }
                match matches.len() {
                    1 => Ok(()),
                    0 => Err(Box::new(
                        Mismatch::new(
                            FailureKind::CombinatorMismatch,
                            pointer.clone(),
                            value.clone(),
                            loc.render(),
                        )
                        .with_reason("no oneOf branch matched")
                        .with_failures(failures),
                    )),
                    _ => {
                        let mut mismatch = Mismatch::new(
                            FailureKind::CombinatorMismatch,
                            pointer.clone(),
                            value.clone(),
                            loc.render(),
                        )
                        .with_reason("multiple oneOf branches matched");
                        mismatch.matches = matches;
                        Err(Box::new(mismatch))
                    }
                }
            }
            Check::Not { branch, pointer } => match self.check_node(*branch, value, loc) {
                // Inversion: success becomes mismatch with the original
                // value, mismatch becomes success.
                Ok(()) => Err(Box::new(
                    Mismatch::new(
                        FailureKind::CombinatorMismatch,
                        pointer.clone(),
                        value.clone(),
                        loc.render(),
                    )
                    .with_reason("schema under not matched"),
                )),
                Err(_) => Ok(()),
            },
            Check::IfThenElse {
                condition,
                then_branch,
                else_branch,
            } => {
                // The condition's mismatch is swallowed either way.
                if self.node_is_valid(*condition, value) {
                    match then_branch {
                        Some(branch) => self.check_node(*branch, value, loc),
                        None => Ok(()),
                    }
                } else {
                    match else_branch {
                        Some(branch) => self.check_node(*branch, value, loc),
                        None => Ok(()),
                    }
                }
            }
            Check::Minimum {
                bound,
                exclusive,
                pointer,
            } => {
                let Some(number) = value.as_number() else {
                    return Ok(());
                };
                let ordering = num_cmp(number, bound);
                let violated = ordering == std::cmp::Ordering::Less
                    || (*exclusive && ordering == std::cmp::Ordering::Equal);
                if violated {
                    let relation = if *exclusive { ">" } else { ">=" };
                    Err(Box::new(
                        Mismatch::new(
                            FailureKind::RangeViolation,
                            pointer.clone(),
                            value.clone(),
                            loc.render(),
                        )
                        .with_reason(format!("must be {relation} {bound}")),
                    ))
                } else {
                    Ok(())
                }
            }
            Check::Maximum {
                bound,
                exclusive,
                pointer,
            } => {
                let Some(number) = value.as_number() else {
                    return Ok(());
                };
                let ordering = num_cmp(number, bound);
                let violated = ordering == std::cmp::Ordering::Greater
                    || (*exclusive && ordering == std::cmp::Ordering::Equal);
                if violated {
                    let relation = if *exclusive { "<" } else { "<=" };
                    Err(Box::new(
                        Mismatch::new(
                            FailureKind::RangeViolation,
                            pointer.clone(),
                            value.clone(),
                            loc.render(),
                        )
                        .with_reason(format!("must be {relation} {bound}")),
                    ))
                } else {
                    Ok(())
                }
            }
            Check::MultipleOf { divisor, pointer } => {
                // Only integer-represented values are judged; the float
                // case is a documented non-goal.
                let integer = value
                    .as_i64()
                    .map(i128::from)
                    .or_else(|| value.as_u64().map(i128::from));
                match integer {
                    Some(n) if n % i128::from(*divisor) != 0 => Err(Box::new(
                        Mismatch::new(
                            FailureKind::RangeViolation,
                            pointer.clone(),
                            value.clone(),
                            loc.render(),
                        )
                        .with_reason(format!("must be a multiple of {divisor}")),
                    )),
                    _ => Ok(()),
                }
            }
            Check::MinLength { limit, pointer } => {
                let Some(text) = value.as_str() else {
                    return Ok(());
                };
                if text.chars().count() < *limit {
                    Err(Box::new(
                        Mismatch::new(
                            FailureKind::LengthViolation,
                            pointer.clone(),
                            value.clone(),
                            loc.render(),
                        )
                        .with_reason(format!("length must be >= {limit}")),
                    ))
                } else {
                    Ok(())
                }
            }
            Check::MaxLength { limit, pointer } => {
                let Some(text) = value.as_str() else {
                    return Ok(());
                };
                if text.chars().count() > *limit {
                    Err(Box::new(
                        Mismatch::new(
                            FailureKind::LengthViolation,
                            pointer.clone(),
                            value.clone(),
                            loc.render(),
                        )
                        .with_reason(format!("length must be <= {limit}")),
                    ))
                } else {
                    Ok(())
                }
            }
            Check::Pattern { pattern, pointer } => {
                let Some(text) = value.as_str() else {
                    return Ok(());
                };
                if pattern.regex.is_match(text) {
                    Ok(())
                } else {
                    Err(Box::new(
                        Mismatch::new(
                            FailureKind::PatternMismatch,
                            pointer.clone(),
                            value.clone(),
                            loc.render(),
                        )
                        .with_reason(format!("does not match pattern {:?}", pattern.source)),
                    ))
                }
            }
            Check::Format {
                name,
                check,
                pointer,
            } => {
                let Some(text) = value.as_str() else {
                    return Ok(());
                };
                if check.check(text) {
                    Ok(())
                } else {
                    Err(Box::new(
                        Mismatch::new(
                            FailureKind::FormatMismatch,
                            pointer.clone(),
                            value.clone(),
                            loc.render(),
                        )
                        .with_reason(format!("is not a valid {name}")),
                    ))
                }
            }
        }
    }

    // ---- array fold ----

    fn run_array_fold(
        &self,
        node: &DispatchNode,
        fold: &ArrayFold,
        items: &[Value],
        whole: &Value,
        loc: &InstanceLocation<'_>,
    ) -> Outcome {
        let mut contains_count = 0usize;
        let mut seen: Vec<&Value> = Vec::new();

        for (index, element) in items.iter().enumerate() {
            let element_loc = loc.push(Segment::Index(index));
            if let Some(positional) = fold.prefix.get(index) {
                self.check_node(*positional, element, &element_loc)?;
            } else if let Some(rest) = &fold.rest {
                match rest {
                    RestItems::Schema(id) => self.check_node(*id, element, &element_loc)?,
                    RestItems::Deny { pointer } => {
                        return Err(Box::new(
                            Mismatch::new(
                                FailureKind::AdditionalRejected,
                                pointer.clone(),
                                element.clone(),
                                element_loc.render(),
                            )
                            .with_reason(format!("item {index} is not allowed")),
                        ));
                    }
                }
            }
            if let Some(contains) = &fold.contains {
                if self.node_is_valid(contains.target, element) {
                    contains_count += 1;
                }
            }
            if let Some(unique) = &fold.unique {
                if let Some(first) = seen.iter().position(|prev| json_equal(prev, element)) {
                    return Err(Box::new(
                        Mismatch::new(
                            FailureKind::UniqueViolation,
                            unique.pointer.clone(),
                            element.clone(),
                            element_loc.render(),
                        )
                        .with_reason(format!("duplicate of item {first}")),
                    ));
                }
                seen.push(element);
            }
        }

        if let Some(bound) = &fold.min_items {
            if items.len() < bound.limit {
                return Err(Box::new(
                    Mismatch::new(
                        FailureKind::LengthViolation,
                        bound.pointer.clone(),
                        whole.clone(),
                        loc.render(),
                    )
                    .with_reason(format!("must have at least {} items", bound.limit)),
                ));
            }
        }
        if let Some(bound) = &fold.max_items {
            if items.len() > bound.limit {
                return Err(Box::new(
                    Mismatch::new(
                        FailureKind::LengthViolation,
                        bound.pointer.clone(),
                        whole.clone(),
                        loc.render(),
                    )
                    .with_reason(format!("must have at most {} items", bound.limit)),
                ));
            }
        }
        if let Some(contains) = &fold.contains {
            if contains_count < contains.min {
                return Err(Box::new(
                    Mismatch::new(
                        FailureKind::ContainsUnsatisfied,
                        contains.min_pointer.clone(),
                        whole.clone(),
                        loc.render(),
                    )
                    .with_reason(format!(
                        "{contains_count} items match contains, at least {} required",
                        contains.min
                    )),
                ));
            }
            if let Some(max) = contains.max {
                if contains_count > max {
                    return Err(Box::new(
                        Mismatch::new(
                            FailureKind::ContainsUnsatisfied,
                            contains.max_pointer.clone(),
                            whole.clone(),
                            loc.render(),
                        )
                        .with_reason(format!(
                            "{contains_count} items match contains, at most {max} allowed"
                        )),
                    ));
                }
            }
        }

        if let Some(check) = &fold.unevaluated {
            let mut eval = ItemEvaluation::default();
            self.note_array_fold(fold, items, &mut eval, false);
            for combining in &node.combining {
                self.collect_items_from_check(combining, whole, items, &mut eval);
            }
            if !eval.all {
                for (index, element) in items.iter().enumerate() {
                    if eval.covers(index) {
                        continue;
                    }
                    let element_loc = loc.push(Segment::Index(index));
                    match check {
                        UnevaluatedCheck::Deny { pointer } => {
                            return Err(Box::new(
                                Mismatch::new(
                                    FailureKind::UnevaluatedRejected,
                                    pointer.clone(),
                                    element.clone(),
                                    element_loc.render(),
                                )
                                .with_reason(format!("item {index} was not evaluated")),
                            ));
                        }
                        UnevaluatedCheck::Schema { target } => {
                            self.check_node(*target, element, &element_loc)?;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    // ---- object fold ----

    fn run_object_fold(
        &self,
        node: &DispatchNode,
        fold: &ObjectFold,
        map: &Map<String, Value>,
        whole: &Value,
        loc: &InstanceLocation<'_>,
    ) -> Outcome {
        if let Some(required) = &fold.required {
            for (index, key) in required.keys.iter().enumerate() {
                if !map.contains_key(key) {
                    return Err(Box::new(
                        Mismatch::new(
                            FailureKind::RequiredMissing,
                            format!("{}/{index}", required.pointer),
                            whole.clone(),
                            loc.render(),
                        )
                        .with_reason(format!("missing required property {key:?}")),
                    ));
                }
            }
        }

        for (key, member) in map {
            let member_loc = loc.push(Segment::Key(key));
            if let Some(names) = fold.property_names {
                let key_value = Value::String(key.clone());
                if let Err(mut mismatch) = self.check_node(names, &key_value, &member_loc) {
                    // The offending value is the key itself.
                    mismatch.kind = FailureKind::PropertyNameMismatch;
                    return Err(mismatch);
                }
            }

            let mut matched = false;
            // `properties` entries are inserted in key order, so the
            // lookup can bisect.
            if let Ok(slot) = fold
                .properties
                .binary_search_by(|(name, _)| name.as_str().cmp(key))
            {
                matched = true;
                self.check_node(fold.properties[slot].1, member, &member_loc)?;
            }
            for (pattern, id) in &fold.patterns {
                if pattern.regex.is_match(key) {
                    matched = true;
                    self.check_node(*id, member, &member_loc)?;
                }
            }
            if !matched {
                match &fold.additional {
                    Some(AdditionalMembers::Schema(id)) => {
                        self.check_node(*id, member, &member_loc)?;
                    }
                    Some(AdditionalMembers::Deny { pointer }) => {
                        return Err(Box::new(
                            Mismatch::new(
                                FailureKind::AdditionalRejected,
                                pointer.clone(),
                                member.clone(),
                                member_loc.render(),
                            )
                            .with_reason(format!("property {key:?} is not allowed")),
                        ));
                    }
                    None => {}
                }
            }
        }

        for dependency in &fold.dependencies {
            if !map.contains_key(&dependency.key) {
                continue;
            }
            match &dependency.kind {
                DependencyKind::Keys(keys) => {
                    for (index, needed) in keys.iter().enumerate() {
                        if !map.contains_key(needed) {
                            return Err(Box::new(
                                Mismatch::new(
                                    FailureKind::DependencyUnsatisfied,
                                    format!("{}/{index}", dependency.pointer),
                                    whole.clone(),
                                    loc.render(),
                                )
                                .with_reason(format!(
                                    "property {needed:?} is required when {:?} is present",
                                    dependency.key
                                )),
                            ));
                        }
                    }
                }
                DependencyKind::Schema(id) => {
                    self.check_node(*id, whole, loc)?;
                }
            }
        }

        if let Some(bound) = &fold.min_properties {
            if map.len() < bound.limit {
                return Err(Box::new(
                    Mismatch::new(
                        FailureKind::LengthViolation,
                        bound.pointer.clone(),
                        whole.clone(),
                        loc.render(),
                    )
                    .with_reason(format!("must have at least {} properties", bound.limit)),
                ));
            }
        }
        if let Some(bound) = &fold.max_properties {
            if map.len() > bound.limit {
                return Err(Box::new(
                    Mismatch::new(
                        FailureKind::LengthViolation,
                        bound.pointer.clone(),
                        whole.clone(),
                        loc.render(),
                    )
                    .with_reason(format!("must have at most {} properties", bound.limit)),
                ));
            }
        }

        if let Some(check) = &fold.unevaluated {
            let mut eval = KeyEvaluation::default();
            self.note_object_fold(fold, map, whole, &mut eval, false);
            for combining in &node.combining {
                self.collect_keys_from_check(combining, whole, &mut eval);
            }
            if !eval.all {
                for (key, member) in map {
                    if eval.covers(key) {
                        continue;
                    }
                    let member_loc = loc.push(Segment::Key(key));
                    match check {
                        UnevaluatedCheck::Deny { pointer } => {
                            return Err(Box::new(
                                Mismatch::new(
                                    FailureKind::UnevaluatedRejected,
                                    pointer.clone(),
                                    member.clone(),
                                    member_loc.render(),
                                )
                                .with_reason(format!("property {key:?} was not evaluated")),
                            ));
                        }
                        UnevaluatedCheck::Schema { target } => {
                            self.check_node(*target, member, &member_loc)?;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    // ---- evaluated-member computation for unevaluated* ----

    fn note_object_fold(
        &self,
        fold: &ObjectFold,
        map: &Map<String, Value>,
        whole: &Value,
        eval: &mut KeyEvaluation,
        include_unevaluated: bool,
    ) {
        if include_unevaluated && fold.unevaluated.is_some() {
            eval.all = true;
        }
        if fold.additional.is_some() {
            // Every key is matched by a name, a pattern, or additional.
            eval.all = true;
        }
        if eval.all {
            return;
        }
        for (name, _) in &fold.properties {
            if map.contains_key(name) {
                eval.keys.insert(name.clone());
            }
        }
        for (pattern, _) in &fold.patterns {
            for key in map.keys() {
                if pattern.regex.is_match(key) {
                    eval.keys.insert(key.clone());
                }
            }
        }
        for dependency in &fold.dependencies {
            if let DependencyKind::Schema(id) = &dependency.kind {
                if map.contains_key(&dependency.key) {
                    self.collect_object_coverage(*id, whole, eval);
                }
            }
        }
    }

    /// Keys evaluated by the (already validated) subschema at `id`.
    fn collect_object_coverage(&self, id: ValidatorId, whole: &Value, eval: &mut KeyEvaluation) {
        if eval.all {
            return;
        }
        let Node::Dispatch(node) = &self.nodes[id.0] else {
            // Boolean schemas evaluate nothing.
            return;
        };
        let Some(map) = whole.as_object() else {
            return;
        };
        if let Some(arm) = node.arms.iter().find(|arm| arm.primitive.matches(whole)) {
            if let Some(Fold::Object(fold)) = &arm.fold {
                self.note_object_fold(fold, map, whole, eval, true);
            }
        }
        for check in &node.combining {
            self.collect_keys_from_check(check, whole, eval);
        }
    }

    fn collect_keys_from_check(&self, check: &Check, whole: &Value, eval: &mut KeyEvaluation) {
        if eval.all {
            return;
        }
        match check {
            Check::Ref { target, .. } => self.collect_object_coverage(*target, whole, eval),
            Check::AllOf { branches, .. } => {
                for branch in branches {
                    self.collect_object_coverage(*branch, whole, eval);
                }
            }
            Check::AnyOf { branches, .. } => {
                for branch in branches {
                    if self.node_is_valid(*branch, whole) {
                        self.collect_object_coverage(*branch, whole, eval);
                    }
                }
            }
            Check::OneOf { branches, .. } => {
                for (branch, _) in branches {
                    if self.node_is_valid(*branch, whole) {
                        self.collect_object_coverage(*branch, whole, eval);
                    }
                }
            }
            Check::IfThenElse {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.node_is_valid(*condition, whole) {
                    self.collect_object_coverage(*condition, whole, eval);
                    if let Some(branch) = then_branch {
                        self.collect_object_coverage(*branch, whole, eval);
                    }
                } else if let Some(branch) = else_branch {
                    self.collect_object_coverage(*branch, whole, eval);
                }
            }
            _ => {}
        }
    }

    fn note_array_fold(
        &self,
        fold: &ArrayFold,
        items: &[Value],
        eval: &mut ItemEvaluation,
        include_unevaluated: bool,
    ) {
        if include_unevaluated && fold.unevaluated.is_some() {
            eval.all = true;
        }
        if fold.rest.is_some() {
            // A rest schema (or an exhausted deny) covers everything
            // beyond the prefix.
            eval.all = true;
        }
        if eval.all {
            return;
        }
        eval.prefix = eval.prefix.max(fold.prefix.len());
        if let Some(contains) = &fold.contains {
            for (index, element) in items.iter().enumerate() {
                if self.node_is_valid(contains.target, element) {
                    eval.indices.insert(index);
                }
            }
        }
    }

    /// Indices evaluated by the (already validated) subschema at `id`.
    fn collect_array_coverage(
        &self,
        id: ValidatorId,
        whole: &Value,
        items: &[Value],
        eval: &mut ItemEvaluation,
    ) {
        if eval.all {
            return;
        }
        let Node::Dispatch(node) = &self.nodes[id.0] else {
            return;
        };
        if let Some(arm) = node.arms.iter().find(|arm| arm.primitive.matches(whole)) {
            if let Some(Fold::Array(fold)) = &arm.fold {
                self.note_array_fold(fold, items, eval, true);
            }
        }
        for check in &node.combining {
            self.collect_items_from_check(check, whole, items, eval);
        }
    }

    fn collect_items_from_check(
        &self,
        check: &Check,
        whole: &Value,
        items: &[Value],
        eval: &mut ItemEvaluation,
    ) {
        if eval.all {
            return;
        }
        match check {
            Check::Ref { target, .. } => self.collect_array_coverage(*target, whole, items, eval),
            Check::AllOf { branches, .. } => {
                for branch in branches {
                    self.collect_array_coverage(*branch, whole, items, eval);
                }
            }
            Check::AnyOf { branches, .. } => {
                for branch in branches {
                    if self.node_is_valid(*branch, whole) {
                        self.collect_array_coverage(*branch, whole, items, eval);
                    }
                }
            }
            Check::OneOf { branches, .. } => {
                for (branch, _) in branches {
                    if self.node_is_valid(*branch, whole) {
                        self.collect_array_coverage(*branch, whole, items, eval);
                    }
                }
            }
            Check::IfThenElse {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.node_is_valid(*condition, whole) {
                    self.collect_array_coverage(*condition, whole, items, eval);
                    if let Some(branch) = then_branch {
                        self.collect_array_coverage(*branch, whole, items, eval);
                    }
                } else if let Some(branch) = else_branch {
                    self.collect_array_coverage(*branch, whole, items, eval);
                }
            }
            _ => {}
        }
    }
}

/// Which keys of an object the surrounding schema evaluated.
#[derive(Default)]
struct KeyEvaluation {
    all: bool,
    keys: HashSet<String>,
}

impl KeyEvaluation {
    fn covers(&self, key: &str) -> bool {
        self.all || self.keys.contains(key)
    }
}

/// Which indices of an array the surrounding schema evaluated.
#[derive(Default)]
struct ItemEvaluation {
    all: bool,
    prefix: usize,
    indices: HashSet<usize>,
}

impl ItemEvaluation {
    fn covers(&self, index: usize) -> bool {
        self.all || index < self.prefix || self.indices.contains(&index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_location_renders_root_as_slash() {
        assert_eq!(InstanceLocation::root().render(), "/");
    }

    #[test]
    fn test_instance_location_renders_nested_path() {
        let root = InstanceLocation::root();
        let outer = root.push(Segment::Key("items"));
        let inner = outer.push(Segment::Index(3));
        assert_eq!(inner.render(), "/items/3");
    }

    #[test]
    fn test_instance_location_escapes_separator_keys() {
        let root = InstanceLocation::root();
        let child = root.push(Segment::Key("a/b"));
        assert_eq!(child.render(), "/a~1b");
    }

    #[test]
    fn test_key_evaluation_covers() {
        let mut eval = KeyEvaluation::default();
        eval.keys.insert("name".to_string());
        assert!(eval.covers("name"));
        assert!(!eval.covers("other"));
        eval.all = true;
        assert!(eval.covers("other"));
    }

    #[test]
    fn test_item_evaluation_covers() {
        let mut eval = ItemEvaluation {
            all: false,
            prefix: 2,
            indices: HashSet::from([5]),
        };
        assert!(eval.covers(0));
        assert!(eval.covers(1));
        assert!(!eval.covers(2));
        assert!(eval.covers(5));
        eval.all = true;
        assert!(eval.covers(100));
    }
}
