//! Filters and mutations over user documents
//!
//! A small, typed subset of document-store update language: set a text
//! field, push onto or pull from a relationship list, increment a counter
//! (optionally floored). The in-memory collection applies these directly;
//! the PostgreSQL collection renders them into SQL.

use crate::shared::User;

/// Which documents an operation targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// `id == value`
    ById(String),
    /// `id ∈ values`
    IdIn(Vec<String>),
    /// Every document
    All,
}

impl Filter {
    pub fn by_id(id: impl Into<String>) -> Self {
        Filter::ById(id.into())
    }

    pub fn id_in(ids: &[String]) -> Self {
        Filter::IdIn(ids.to_vec())
    }

    pub fn matches(&self, user: &User) -> bool {
        match self {
            Filter::ById(id) => user.id == *id,
            Filter::IdIn(ids) => ids.iter().any(|id| *id == user.id),
            Filter::All => true,
        }
    }
}

/// Profile fields that can be overwritten
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Name,
    ContactNo,
    Email,
}

impl TextField {
    pub fn column(self) -> &'static str {
        match self {
            TextField::Name => "name",
            TextField::ContactNo => "contact_no",
            TextField::Email => "email",
        }
    }

    fn slot(self, user: &mut User) -> &mut String {
        match self {
            TextField::Name => &mut user.name,
            TextField::ContactNo => &mut user.contact_no,
            TextField::Email => &mut user.email,
        }
    }
}

/// Embedded relationship lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListField {
    Following,
    Followers,
}

impl ListField {
    pub fn column(self) -> &'static str {
        match self {
            ListField::Following => "following",
            ListField::Followers => "followers",
        }
    }

    fn slot(self, user: &mut User) -> &mut Vec<String> {
        match self {
            ListField::Following => &mut user.following,
            ListField::Followers => &mut user.followers,
        }
    }
}

/// Relationship counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterField {
    FollowingCount,
    FollowersCount,
}

impl CounterField {
    pub fn column(self) -> &'static str {
        match self {
            CounterField::FollowingCount => "following_count",
            CounterField::FollowersCount => "followers_count",
        }
    }

    fn slot(self, user: &mut User) -> &mut i64 {
        match self {
            CounterField::FollowingCount => &mut user.following_count,
            CounterField::FollowersCount => &mut user.followers_count,
        }
    }
}

/// One update operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Set(TextField, String),
    /// Overwrite a counter (used by reconcile only)
    SetCount(CounterField, i64),
    /// Append every value, keeping duplicates
    Push(ListField, Vec<String>),
    /// Remove every occurrence of every value
    Pull(ListField, Vec<String>),
    /// Add `delta`; with `floor`, the result never drops below it
    Inc {
        field: CounterField,
        delta: i64,
        floor: Option<i64>,
    },
}

/// An ordered list of operations applied as one update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mutation {
    operations: Vec<Operation>,
}

impl Mutation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: TextField, value: impl Into<String>) -> Self {
        self.operations.push(Operation::Set(field, value.into()));
        self
    }

    pub fn set_count(mut self, field: CounterField, value: i64) -> Self {
        self.operations.push(Operation::SetCount(field, value));
        self
    }

    pub fn push(mut self, field: ListField, values: Vec<String>) -> Self {
        self.operations.push(Operation::Push(field, values));
        self
    }

    pub fn pull(mut self, field: ListField, values: Vec<String>) -> Self {
        self.operations.push(Operation::Pull(field, values));
        self
    }

    pub fn inc(mut self, field: CounterField, delta: i64) -> Self {
        self.operations.push(Operation::Inc {
            field,
            delta,
            floor: None,
        });
        self
    }

    pub fn inc_floored(mut self, field: CounterField, delta: i64, floor: i64) -> Self {
        self.operations.push(Operation::Inc {
            field,
            delta,
            floor: Some(floor),
        });
        self
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Apply every operation in order to `user`
    pub fn apply(&self, user: &mut User) {
        for operation in &self.operations {
            match operation {
                Operation::Set(field, value) => *field.slot(user) = value.clone(),
                Operation::SetCount(field, value) => *field.slot(user) = *value,
                Operation::Push(field, values) => field.slot(user).extend(values.iter().cloned()),
                Operation::Pull(field, values) => {
                    field.slot(user).retain(|existing| !values.contains(existing))
                }
                Operation::Inc {
                    field,
                    delta,
                    floor,
                } => {
                    let slot = field.slot(user);
                    let next = slot.saturating_add(*delta);
                    *slot = match floor {
                        Some(floor) => next.max(*floor),
                        None => next,
                    };
                }
            }
        }
    }
}

/// A filter and the mutation to apply to whatever it matches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseUpdate {
    pub filter: Filter,
    pub mutation: Mutation,
}

impl PhaseUpdate {
    pub fn new(filter: Filter, mutation: Mutation) -> Self {
        Self { filter, mutation }
    }
}

/// Result of running a source update followed by a targets update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwoPhaseOutcome {
    /// Phase 1 matched nothing; Phase 2 did not run
    SourceMissing,
    Applied {
        source_matched: u64,
        targets_matched: u64,
    },
}
