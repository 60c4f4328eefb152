//! Filtering collections of labelled entities with a compiled selector
//!
//! # Examples
//!
//! ```rust
//! use rusty_label_selector::parse;
//! use rusty_label_selector::predicate::{Backend, CollectionBackend};
//! use rusty_label_selector::query::{LabelledEntity, MatchLabels};
//!
//! struct Pod {
//!     name: &'static str,
//!     labels: Vec<String>,
//! }
//!
//! impl LabelledEntity for Pod {
//!     type Labels = [String];
//!
//!     fn labels(&self) -> &[String] {
//!         &self.labels
//!     }
//! }
//!
//! let pods = vec![
//!     Pod { name: "web-1", labels: vec!["app:web".into(), "env:prod".into()] },
//!     Pod { name: "db-1", labels: vec!["app:db".into(), "env:prod".into()] },
//! ];
//!
//! let filter = CollectionBackend::default().compile(&parse("env = prod, app != db").unwrap());
//! let names: Vec<_> = pods.iter().match_labels(&filter).map(|p| p.name).collect();
//! assert_eq!(names, vec!["web-1"]);
//! ```

use crate::predicate::{Backend, Filter};

/// An entity carrying a label set
pub trait LabelledEntity {
    type Labels: ?Sized;

    fn labels(&self) -> &Self::Labels;
}

impl<T: LabelledEntity + ?Sized> LabelledEntity for &T {
    type Labels = T::Labels;

    fn labels(&self) -> &T::Labels {
        (**self).labels()
    }
}

/// Selector filtering for any iterator
pub trait MatchLabels: Iterator + Sized {
    /// Keep the items whose labels pass `filter`
    fn match_labels<'f, B>(self, filter: &'f Filter<B>) -> impl Iterator<Item = Self::Item> + 'f
    where
        B: Backend,
        Self::Item: LabelledEntity<Labels = B::Labels>,
        Self: 'f,
    {
        self.filter(move |item| filter.matches(item.labels()))
    }

    /// Keep the items whose labels, as picked by `labels`, pass `filter`
    fn match_labels_by<'f, B, F>(
        self,
        filter: &'f Filter<B>,
        mut labels: F,
    ) -> impl Iterator<Item = Self::Item> + 'f
    where
        B: Backend,
        F: FnMut(&Self::Item) -> &B::Labels + 'f,
        Self: 'f,
    {
        self.filter(move |item| filter.matches(labels(item)))
    }

    /// Like [`MatchLabels::match_labels`], keeping everything without a filter
    fn match_labels_opt<'f, B>(
        self,
        filter: Option<&'f Filter<B>>,
    ) -> impl Iterator<Item = Self::Item> + 'f
    where
        B: Backend,
        Self::Item: LabelledEntity<Labels = B::Labels>,
        Self: 'f,
    {
        self.filter(move |item| filter.is_none_or(|f| f.matches(item.labels())))
    }
}

impl<I: Iterator> MatchLabels for I {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::{CollectionBackend, JsonBackend};
    use crate::selector::Selector;
    use serde_json::{Value, json};

    struct Document {
        id: u32,
        tags: Vec<String>,
        meta: Value,
    }

    impl LabelledEntity for Document {
        type Labels = Value;

        fn labels(&self) -> &Value {
            &self.meta
        }
    }

    fn documents() -> Vec<Document> {
        vec![
            Document {
                id: 1,
                tags: vec!["env:prod".into(), "team:a".into()],
                meta: json!({"env": "prod", "team": "a"}),
            },
            Document {
                id: 2,
                tags: vec!["env:dev".into()],
                meta: json!({"env": "dev"}),
            },
            Document {
                id: 3,
                tags: vec!["env:prod".into()],
                meta: json!({"env": "prod"}),
            },
        ]
    }

    fn selector(text: &str) -> Selector {
        text.parse().unwrap()
    }

    #[test]
    fn test_match_labels() {
        let filter = JsonBackend::postgres().compile(&selector("env = prod, !team"));
        let ids: Vec<_> = documents()
            .iter()
            .match_labels(&filter)
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn test_match_labels_owned_items() {
        let filter = JsonBackend::mysql().compile(&selector("env in (prod, dev)"));
        assert_eq!(documents().into_iter().match_labels(&filter).count(), 3);
    }

    #[test]
    fn test_match_labels_by() {
        let filter = CollectionBackend::default().compile(&selector("env = prod"));
        let ids: Vec<_> = documents()
            .iter()
            .match_labels_by(&filter, |d| d.tags.as_slice())
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_match_labels_opt() {
        let filter = JsonBackend::postgres().compile(&selector("team"));
        assert_eq!(documents().iter().match_labels_opt(Some(&filter)).count(), 1);
        assert_eq!(
            documents()
                .iter()
                .match_labels_opt::<JsonBackend>(None)
                .count(),
            3
        );
    }
}
