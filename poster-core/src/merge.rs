//! Typed deep merge of configuration fragments.
//!
//! Merging is asymmetric: the override wins at every leaf it sets, and
//! anything it leaves unset falls through to the base. Maps recurse per key,
//! so overriding `title.fontSize` keeps `title.top`.

use std::collections::BTreeMap;

use crate::config::{ConfigDocument, ElementConfig};

/// Deep merge where `other` takes precedence over `self`.
pub trait Merge {
    /// Merge `other` into `self` in place.
    fn merge_from(&mut self, other: &Self);

    /// Return a merged copy, leaving `self` untouched.
    #[must_use]
    fn merged(&self, other: &Self) -> Self
    where
        Self: Clone,
    {
        let mut out = self.clone();
        out.merge_from(other);
        out
    }
}

macro_rules! merge_fields {
    ($base:ident, $other:ident; $($field:ident),+ $(,)?) => {
        $(
            if $other.$field.is_some() {
                $base.$field = $other.$field;
            }
        )+
    };
}

impl Merge for ElementConfig {
    fn merge_from(&mut self, other: &Self) {
        merge_fields!(self, other;
            top, left, right, bottom,
            width, height,
            font_size, letter_spacing,
            padding, padding_bottom, margin_bottom,
            opacity, size,
        );
        if other.font_weight.is_some() {
            self.font_weight.clone_from(&other.font_weight);
        }
    }
}

impl<K, V> Merge for BTreeMap<K, V>
where
    K: Ord + Clone,
    V: Merge + Clone,
{
    fn merge_from(&mut self, other: &Self) {
        for (key, value) in other {
            match self.get_mut(key) {
                Some(existing) => existing.merge_from(value),
                None => {
                    self.insert(key.clone(), value.clone());
                }
            }
        }
    }
}

impl Merge for ConfigDocument {
    fn merge_from(&mut self, other: &Self) {
        self.visuals.merge_from(&other.visuals);
        self.variants.merge_from(&other.variants);
    }
}
