//! Lookup and mutation of nested step trees.
//!
//! Every traversal is pre-order and depth-first: a step is visited before its
//! branches, branches are visited in `one_of` order, and each branch's nested
//! `steps` are recursed into before moving on to the step's next sibling. When a
//! tree accidentally holds the same identifier twice, the first step met in this
//! order is the one that gets found, replaced or deleted.
//!
//! Two flavours of mutation are provided:
//!
//! * in-place functions ([`replace_step`], [`delete_step`]) operating on a tree the
//!   caller exclusively owns, reporting whether a match was found;
//! * copy-on-write functions ([`replaced`], [`deleted`]) which leave the input tree
//!   untouched and hand back a fresh one, or [`MutationError::StepNotFound`].

pub mod path;

pub use path::*;

use crate::error::MutationError;
use crate::model::{Step, StepUid};
use ahash::AHashSet;
use itertools::Itertools;

/// Visits every step of the tree in pre-order together with its tree address.
pub fn walk<'a, F>(steps: &'a [Step], visit: &mut F)
where
    F: FnMut(&StepPath, &'a Step),
{
    walk_list(steps, None, visit);
}

fn walk_list<'a, F>(steps: &'a [Step], parent: Option<(&StepPath, usize)>, visit: &mut F)
where
    F: FnMut(&StepPath, &'a Step),
{
    for (index, step) in steps.iter().enumerate() {
        let path = match parent {
            Some((parent_path, branch)) => parent_path.child(branch, index),
            None => StepPath::root(index),
        };
        visit(&path, step);
        for (branch_index, branch) in step.branches().iter().enumerate() {
            walk_list(branch.steps(), Some((&path, branch_index)), visit);
        }
    }
}

/// Applies `f` to every step of the tree in pre-order.
pub fn for_each_step_mut<F>(steps: &mut [Step], f: &mut F)
where
    F: FnMut(&mut Step),
{
    for step in steps.iter_mut() {
        f(step);
        if let Some(branches) = step.one_of.as_mut() {
            for branch in branches.iter_mut() {
                if let Some(nested) = branch.steps.as_mut() {
                    for_each_step_mut(nested, f);
                }
            }
        }
    }
}

/// Total number of steps at every depth.
pub fn count_steps(steps: &[Step]) -> usize {
    steps
        .iter()
        .map(|step| {
            1 + step
                .branches()
                .iter()
                .map(|b| count_steps(b.steps()))
                .sum::<usize>()
        })
        .sum()
}

pub fn find_step<'a>(steps: &'a [Step], uid: &StepUid) -> Option<&'a Step> {
    for step in steps {
        if step.uid.as_ref() == Some(uid) {
            return Some(step);
        }
        if let Some(found) = step
            .branches()
            .iter()
            .find_map(|branch| find_step(branch.steps(), uid))
        {
            return Some(found);
        }
    }
    None
}

pub fn find_step_mut<'a>(steps: &'a mut [Step], uid: &StepUid) -> Option<&'a mut Step> {
    for step in steps.iter_mut() {
        if step.uid.as_ref() == Some(uid) {
            return Some(step);
        }
        if let Some(branches) = step.one_of.as_mut() {
            for branch in branches.iter_mut() {
                if let Some(nested) = branch.steps.as_mut() {
                    if let Some(found) = find_step_mut(nested, uid) {
                        return Some(found);
                    }
                }
            }
        }
    }
    None
}

/// Replaces the first step carrying `uid` with `replacement`. Returns `false`
/// and leaves the tree alone when no step matches.
///
/// The replacement is stored as given; it should keep the same `uid` if the
/// caller wants to find it again.
pub fn replace_step(steps: &mut [Step], uid: &StepUid, replacement: Step) -> bool {
    match find_step_mut(steps, uid) {
        Some(slot) => {
            *slot = replacement;
            true
        }
        None => false,
    }
}

/// Removes the first step carrying `uid` from whichever list holds it.
pub fn delete_step(steps: &mut Vec<Step>, uid: &StepUid) -> bool {
    remove_step(steps, uid).is_some()
}

/// Like [`delete_step`], but hands the removed step (with its subtree) back.
pub fn remove_step(steps: &mut Vec<Step>, uid: &StepUid) -> Option<Step> {
    for index in 0..steps.len() {
        if steps[index].uid.as_ref() == Some(uid) {
            return Some(steps.remove(index));
        }
        if let Some(branches) = steps[index].one_of.as_mut() {
            for branch in branches.iter_mut() {
                if let Some(nested) = branch.steps.as_mut() {
                    if let Some(removed) = remove_step(nested, uid) {
                        return Some(removed);
                    }
                }
            }
        }
    }
    None
}

/// Copy-on-write replace: the input tree is never modified.
pub fn replaced(
    steps: &[Step],
    uid: &StepUid,
    replacement: Step,
) -> Result<Vec<Step>, MutationError> {
    if find_step(steps, uid).is_none() {
        return Err(MutationError::StepNotFound(uid.clone()));
    }
    let mut next = steps.to_vec();
    replace_step(&mut next, uid, replacement);
    Ok(next)
}

/// Copy-on-write delete: the input tree is never modified.
pub fn deleted(steps: &[Step], uid: &StepUid) -> Result<Vec<Step>, MutationError> {
    if find_step(steps, uid).is_none() {
        return Err(MutationError::StepNotFound(uid.clone()));
    }
    let mut next = steps.to_vec();
    delete_step(&mut next, uid);
    Ok(next)
}

/// Resolves a tree address to the step it points at.
pub fn step_at<'a>(steps: &'a [Step], path: &StepPath) -> Option<&'a Step> {
    let mut step = steps.get(path.top_index())?;
    for (branch, index) in path.descent() {
        step = step.branches().get(branch)?.steps().get(index)?;
    }
    Some(step)
}

pub fn step_at_mut<'a>(steps: &'a mut [Step], path: &StepPath) -> Option<&'a mut Step> {
    let mut step = steps.get_mut(path.top_index())?;
    for (branch, index) in path.descent() {
        step = step
            .one_of
            .as_mut()?
            .get_mut(branch)?
            .steps
            .as_mut()?
            .get_mut(index)?;
    }
    Some(step)
}

/// Points the step at `source` to the step at `target` through `target_step`.
///
/// The jump is recorded by the target's addressable name (`id`, else `name`), so
/// a target without either cannot be jumped to.
pub fn assign_jump_target(
    steps: &mut [Step],
    source: &StepPath,
    target: &StepPath,
) -> Result<(), MutationError> {
    let target_name = step_at(steps, target)
        .ok_or_else(|| MutationError::NodeNotFound(target.node_id()))?
        .addressable_name()
        .ok_or_else(|| MutationError::UnaddressableTarget(target.node_id()))?
        .to_string();

    let source_step =
        step_at_mut(steps, source).ok_or_else(|| MutationError::NodeNotFound(source.node_id()))?;
    source_step.target_step = Some(target_name);
    Ok(())
}

/// Every internal identifier in the tree.
pub fn collect_uids(steps: &[Step]) -> AHashSet<StepUid> {
    let mut uids = AHashSet::new();
    walk(steps, &mut |_, step: &Step| {
        if let Some(uid) = &step.uid {
            uids.insert(uid.clone());
        }
    });
    uids
}

/// Identifiers carried by more than one step, in order of first repetition.
pub fn duplicate_uids(steps: &[Step]) -> Vec<StepUid> {
    let mut all = Vec::new();
    walk(steps, &mut |_, step: &Step| {
        if let Some(uid) = &step.uid {
            all.push(uid.clone());
        }
    });
    all.into_iter().duplicates().collect()
}

/// Addressable names (`id`, else `name`) of every step, in pre-order.
pub fn addressable_names(steps: &[Step]) -> Vec<&str> {
    let mut names = Vec::new();
    push_names(steps, &mut names);
    names
}

fn push_names<'a>(steps: &'a [Step], names: &mut Vec<&'a str>) {
    for step in steps {
        names.extend(step.addressable_name());
        for branch in step.branches() {
            push_names(branch.steps(), names);
        }
    }
}

/// Addressable names used by more than one step. Jumps to such a name resolve to
/// the first of them.
pub fn duplicate_names(steps: &[Step]) -> Vec<String> {
    addressable_names(steps)
        .into_iter()
        .duplicates()
        .map(str::to_string)
        .collect()
}
