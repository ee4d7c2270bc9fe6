//! Unique-vs-multi insertion policy, the other axis of variation spec.md §6
//! names alongside indexed/plain. Modeled the same way: a zero-sized marker
//! type rather than a runtime flag, so the policy check optimizes away.

pub trait DupPolicy: Copy + Default + std::fmt::Debug {
    /// If `false`, inserting a key already present overwrites the existing
    /// element's value in place and reports `inserted = false` (spec.md
    /// §4.2, "Duplicate in unique mode"). If `true`, duplicates are always
    /// inserted (spec.md §4.2, "Multi mode").
    const ALLOW_DUPLICATES: bool;
}

#[derive(Debug, Copy, Clone, Default)]
pub struct Unique;
impl DupPolicy for Unique {
    const ALLOW_DUPLICATES: bool = false;
}

#[derive(Debug, Copy, Clone, Default)]
pub struct Multi;
impl DupPolicy for Multi {
    const ALLOW_DUPLICATES: bool = true;
}
