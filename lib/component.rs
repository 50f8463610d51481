//! Typed spin components and component selection.
//!
//! Each spin multiplicity is a closed set of components, represented by an
//! enum implementing [`Component`]. Operations that act on a subset of
//! components (noise injection, phase imprinting) take a [`Select`], which can
//! be built directly or parsed from text, e.g. `"all"`, `"outer"`, `"plus"`, or
//! `"plus, minus"`.

use std::{ fmt, hash::Hash, str::FromStr };
use crate::error::FieldError;

/// A single spin component of a multi-component wavefunction.
pub trait Component
where Self: Copy + fmt::Debug + PartialEq + Eq + Hash + 'static
{
    /// Named subsets of components specific to the multiplicity.
    ///
    /// Multiplicities without named subsets use [`NoGroup`].
    type Group: Copy + fmt::Debug + PartialEq + Eq + 'static;

    /// All components, in storage order.
    const ALL: &'static [Self];

    /// Position of the component in storage order.
    fn index(self) -> usize;

    /// Short lowercase name of the component.
    fn label(self) -> &'static str;

    /// Magnetic quantum number.
    fn m(self) -> f64;

    /// Components belonging to a named group, in storage order.
    fn members(group: Self::Group) -> &'static [Self];

    /// Look up a named group.
    fn parse_group(s: &str) -> Option<Self::Group>;

    /// Look up a component by its label.
    fn from_label(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.label() == s)
    }
}

/// Uninhabited group type for multiplicities with no named subsets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NoGroup { }

/// A set of components.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Select<C: Component> {
    /// Every component.
    All,
    /// A single component.
    One(C),
    /// An arbitrary list of components; duplicates are ignored.
    Many(Vec<C>),
    /// A named group of components.
    Group(C::Group),
}

impl<C: Component> Default for Select<C> {
    fn default() -> Self { Self::All }
}

impl<C: Component> From<C> for Select<C> {
    fn from(c: C) -> Self { Self::One(c) }
}

impl<C: Component> From<Vec<C>> for Select<C> {
    fn from(cs: Vec<C>) -> Self { Self::Many(cs) }
}

impl<C: Component> Select<C> {
    /// Resolve to a de-duplicated list of components in storage order.
    pub fn components(&self) -> Vec<C> {
        let mut selected: Vec<C>
            = match self {
                Self::All => C::ALL.to_vec(),
                Self::One(c) => vec![*c],
                Self::Many(cs) => cs.clone(),
                Self::Group(g) => C::members(*g).to_vec(),
            };
        selected.sort_by_key(|c| c.index());
        selected.dedup();
        selected
    }

    /// Return `true` if `c` is selected.
    pub fn contains(&self, c: C) -> bool {
        match self {
            Self::All => true,
            Self::One(s) => *s == c,
            Self::Many(cs) => cs.contains(&c),
            Self::Group(g) => C::members(*g).contains(&c),
        }
    }
}

impl<C: Component> FromStr for Select<C> {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        if s == "all" {
            return Ok(Self::All);
        }
        if let Some(g) = C::parse_group(&s) {
            return Ok(Self::Group(g));
        }
        if s.contains(',') {
            return s.split(',')
                .map(|name| {
                    let name = name.trim();
                    C::from_label(name)
                        .ok_or_else(|| FieldError::UnknownComponent(name.to_string()))
                })
                .collect::<Result<Vec<C>, FieldError>>()
                .map(Self::Many);
        }
        C::from_label(&s)
            .map(Self::One)
            .ok_or(FieldError::UnknownSelector(s))
    }
}

// implements `FromStr` for a component enum via its labels
macro_rules! component_from_str {
    ( $comp:ty ) => {
        impl std::str::FromStr for $comp {
            type Err = $crate::error::FieldError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim().to_lowercase();
                <$comp as $crate::component::Component>::from_label(&s)
                    .ok_or($crate::error::FieldError::UnknownComponent(s))
            }
        }

        impl std::fmt::Display for $comp {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let label = <$comp as $crate::component::Component>::label(*self);
                f.write_str(label)
            }
        }
    }
}
pub(crate) use component_from_str;
