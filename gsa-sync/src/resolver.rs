//! Type dependency resolution.
//!
//! Partitions a set of types into generations such that every type a member
//! of generation `k` references lives in a generation before `k`. Layered
//! Kahn: generation 0 is every type with no edges into the tracked set, and
//! each later generation is what its predecessors release.
//!
//! When the frontier empties with types still unplaced, the remaining types
//! sit on or behind a cycle. One type is forced out: the one with the largest
//! share of already-placed references, placed directly after the latest of
//! those references. If that happens before anything at all was placed the
//! graph has no acyclic root and resolution fails.

use crate::error::ResolveError;
use gsa_gwa::{GwaRegistry, Keyword};
use gsa_model::TypeCatalog;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::hash::Hash;
use tracing::{debug, warn};

/// Builds dependency generations over `types`.
///
/// `edge_fn(t)` lists the types `t` references. Edges to types outside
/// `types` and self-edges are ignored. Duplicate input types are placed once.
/// Within a generation, types keep their input order.
pub fn build_generations<T, F, I>(types: &[T], mut edge_fn: F) -> Result<Vec<Vec<T>>, ResolveError>
where
    T: Clone + Eq + Hash + fmt::Display,
    F: FnMut(&T) -> I,
    I: IntoIterator<Item = T>,
{
    let mut nodes: Vec<T> = Vec::with_capacity(types.len());
    let mut position: HashMap<T, usize> = HashMap::new();
    for t in types {
        if !position.contains_key(t) {
            position.insert(t.clone(), nodes.len());
            nodes.push(t.clone());
        }
    }
    let n = nodes.len();

    let deps: Vec<BTreeSet<usize>> = nodes
        .iter()
        .enumerate()
        .map(|(i, t)| {
            edge_fn(t)
                .into_iter()
                .filter_map(|d| position.get(&d).copied())
                .filter(|&j| j != i)
                .collect()
        })
        .collect();

    let mut reverse: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (i, d) in deps.iter().enumerate() {
        for &j in d {
            reverse[j].push(i);
        }
    }

    let mut in_degree: Vec<usize> = deps.iter().map(BTreeSet::len).collect();
    let mut generation_of: Vec<Option<usize>> = vec![None; n];
    let mut generations: Vec<Vec<usize>> = Vec::new();
    let mut frontier: BTreeSet<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
    let mut placed = 0;

    while placed < n {
        let released: Vec<usize> = if frontier.is_empty() {
            if generations.is_empty() {
                let types = nodes.iter().map(ToString::to_string).collect();
                return Err(ResolveError::Cyclic { types });
            }
            let pick = pick_cycle_breaker(&deps, &generation_of);
            let generation = deps[pick]
                .iter()
                .filter_map(|&j| generation_of[j])
                .max()
                .map_or(0, |g| g + 1);
            let resolved = deps[pick]
                .iter()
                .filter(|&&j| generation_of[j].is_some())
                .count();
            warn!(
                "Dependency cycle through {}: placing it in generation {} ({} of {} references resolved)",
                nodes[pick],
                generation,
                resolved,
                deps[pick].len()
            );
            generation_of[pick] = Some(generation);
            if generation == generations.len() {
                generations.push(vec![pick]);
            } else {
                generations[generation].push(pick);
            }
            vec![pick]
        } else {
            let layer: Vec<usize> = std::mem::take(&mut frontier).into_iter().collect();
            let generation = generations.len();
            for &i in &layer {
                generation_of[i] = Some(generation);
            }
            generations.push(layer.clone());
            layer
        };

        placed += released.len();
        for i in released {
            for &r in &reverse[i] {
                in_degree[r] = in_degree[r].saturating_sub(1);
                if in_degree[r] == 0 && generation_of[r].is_none() {
                    frontier.insert(r);
                }
            }
        }
    }

    debug!("Resolved {} types into {} generations", n, generations.len());
    Ok(generations
        .into_iter()
        .map(|mut generation| {
            generation.sort_unstable();
            generation.into_iter().map(|i| nodes[i].clone()).collect()
        })
        .collect())
}

/// The unplaced node with the largest share of placed references; ties go to
/// more placed references, then to input order.
fn pick_cycle_breaker(deps: &[BTreeSet<usize>], generation_of: &[Option<usize>]) -> usize {
    let mut best: Option<(usize, usize, usize)> = None;
    for (i, d) in deps.iter().enumerate() {
        if generation_of[i].is_some() {
            continue;
        }
        let resolved = d.iter().filter(|&&j| generation_of[j].is_some()).count();
        let total = d.len().max(1);
        let better = match best {
            None => true,
            Some((_, best_resolved, best_total)) => {
                match (resolved * best_total).cmp(&(best_resolved * total)) {
                    Ordering::Greater => true,
                    Ordering::Equal => resolved > best_resolved,
                    Ordering::Less => false,
                }
            }
        };
        if better {
            best = Some((i, resolved, total));
        }
    }
    best.map_or(0, |(i, _, _)| i)
}

/// Generations over the generic types of a catalog, following the
/// reference properties each schema declares.
pub fn type_generations(catalog: &TypeCatalog) -> Result<Vec<Vec<String>>, ResolveError> {
    build_generations(&catalog.type_names(), |t| catalog.edges(t))
}

/// Dependency ordering of native keywords from registry hints.
pub trait KeywordOrdering {
    fn keyword_generations(&self) -> Result<Vec<Vec<Keyword>>, ResolveError>;
}

impl KeywordOrdering for GwaRegistry {
    fn keyword_generations(&self) -> Result<Vec<Vec<Keyword>>, ResolveError> {
        build_generations(&self.list_keywords(), |k| self.related(*k))
    }
}
