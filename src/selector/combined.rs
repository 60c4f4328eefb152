//! Selector algebra: lazy combination and deduplicating merge.

use std::collections::HashSet;
use std::fmt;
use std::ops::ControlFlow;

use tracing::trace;

use crate::ast::Expression;

use super::{LabelSelector, LabelSelectorExt, Selector};

/// A read-only view concatenating the expressions of several selectors
///
/// Nothing is copied: every traversal walks the sources again, so a source
/// behind interior mutability (`RefCell`, `RwLock`, ...) that changes is
/// reflected on the next traversal.
#[derive(Clone, Default)]
pub struct Combined<'a> {
    sources: Vec<&'a dyn LabelSelector>,
}

impl<'a> Combined<'a> {
    /// View over `sources`, visited in order
    pub fn new(sources: impl IntoIterator<Item = &'a dyn LabelSelector>) -> Self {
        Self {
            sources: sources.into_iter().collect(),
        }
    }

    /// Number of source selectors
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }
}

impl LabelSelector for Combined<'_> {
    fn try_visit(
        &self,
        visit: &mut dyn FnMut(&Expression) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        for source in &self.sources {
            source.try_visit(visit)?;
        }
        ControlFlow::Continue(())
    }
}

impl fmt::Debug for Combined<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Combined")
            .field("sources", &self.sources.len())
            .field("selector", &self.render())
            .finish()
    }
}

impl fmt::Display for Combined<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// AND several selectors without materializing them
///
/// An empty slice yields an empty view, which matches everything.
///
/// # Examples
///
/// ```
/// use rusty_label_selector::{combine, LabelSelectorExt, Selector};
///
/// let mut a = Selector::new();
/// a.matching("env").exact("prod")?;
/// let mut b = Selector::new();
/// b.matching("tier").exists()?;
///
/// let both = combine(&[&a, &b]);
/// assert_eq!(both.render(), "env = prod, tier");
/// # Ok::<(), rusty_label_selector::ExpressionError>(())
/// ```
pub fn combine<'a>(selectors: &[&'a dyn LabelSelector]) -> Combined<'a> {
    Combined::new(selectors.iter().copied())
}

/// AND several selectors into a new selector without duplicate expressions
///
/// Expressions keep source order; the first occurrence of each structurally
/// equal expression wins.
///
/// # Examples
///
/// ```
/// use rusty_label_selector::{merge, Selector};
///
/// let mut a = Selector::new();
/// a.matching("env").exact("prod")?.matching("tier").exists()?;
/// let mut b = Selector::new();
/// b.matching("tier").exists()?.matching("team").not_exists()?;
///
/// let merged = merge(&[&a, &b]);
/// assert_eq!(merged.to_string(), "env = prod, tier, !team");
/// # Ok::<(), rusty_label_selector::ExpressionError>(())
/// ```
pub fn merge(selectors: &[&dyn LabelSelector]) -> Selector {
    let mut seen = HashSet::new();
    let mut expressions = Vec::new();
    let mut total = 0usize;

    for selector in selectors {
        selector.for_each_expression(|e| {
            total += 1;
            if !seen.contains(e) {
                seen.insert(e.clone());
                expressions.push(e.clone());
            }
        });
    }

    trace!(
        selectors = selectors.len(),
        expressions = total,
        distinct = expressions.len(),
        "merged selectors"
    );
    Selector::from_expressions(expressions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn selector(f: impl FnOnce(&mut Selector)) -> Selector {
        let mut s = Selector::new();
        f(&mut s);
        s
    }

    #[test]
    fn test_combine_concatenates_in_source_order() {
        let a = selector(|s| {
            s.matching("a").exact("1").unwrap().matching("b").exists().unwrap();
        });
        let b = selector(|s| {
            s.matching("c").not_exists().unwrap();
        });
        let combined = combine(&[&a, &b]);
        assert_eq!(combined.source_count(), 2);
        assert_eq!(combined.expression_count(), 3);
        assert_eq!(combined.to_string(), "a = 1, b, !c");
    }

    #[test]
    fn test_combine_empty() {
        let combined = combine(&[]);
        assert_eq!(combined.expression_count(), 0);
        assert_eq!(combined.to_selector(), Selector::new());
    }

    #[test]
    fn test_combine_keeps_duplicates() {
        let a = selector(|s| {
            s.matching("a").exists().unwrap();
        });
        let combined = combine(&[&a, &a]);
        assert_eq!(combined.to_string(), "a, a");
    }

    #[test]
    fn test_combine_is_live() {
        let a = RefCell::new(selector(|s| {
            s.matching("a").exists().unwrap();
        }));
        let b = selector(|s| {
            s.matching("b").exists().unwrap();
        });
        let combined = combine(&[&a, &b]);
        assert_eq!(combined.to_string(), "a, b");

        a.borrow_mut().matching("x").exact("y").unwrap();
        assert_eq!(combined.to_string(), "a, x = y, b");
    }

    #[test]
    fn test_combine_nested() {
        let a = selector(|s| {
            s.matching("a").exists().unwrap();
        });
        let b = selector(|s| {
            s.matching("b").exists().unwrap();
        });
        let inner = combine(&[&a, &b]);
        let outer = combine(&[&inner, &a]);
        assert_eq!(outer.to_string(), "a, b, a");
    }

    #[test]
    fn test_merge_dedups_first_seen() {
        let a = selector(|s| {
            s.matching("a")
                .exact("1")
                .unwrap()
                .matching("b")
                .exists()
                .unwrap()
                .matching("a")
                .exact("1")
                .unwrap();
        });
        let merged = merge(&[&a, &a]);
        assert_eq!(merged.to_string(), "a = 1, b");
    }

    #[test]
    fn test_merge_value_order_matters() {
        let a = selector(|s| {
            s.matching("a").is_in(["1", "2"]).unwrap();
        });
        let b = selector(|s| {
            s.matching("a").is_in(["2", "1"]).unwrap();
        });
        assert_eq!(merge(&[&a, &b]).len(), 2);
    }

    #[test]
    fn test_merge_empty() {
        assert!(merge(&[]).is_empty());
    }

    #[test]
    fn test_pairwise_helpers() {
        let a = selector(|s| {
            s.matching("a").exists().unwrap();
        });
        let b = selector(|s| {
            s.matching("a").exists().unwrap().matching("b").exists().unwrap();
        });
        assert_eq!(a.combine(&b).to_string(), "a, a, b");
        assert_eq!(a.merge(&b).to_string(), "a, b");
    }
}
