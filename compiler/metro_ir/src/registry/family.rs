//! Family bookkeeping.
//!
//! A family is a set of measures that share a dimension and convert into one
//! another. Each family has one representative (its `prime` is `None`); every
//! other member points straight at it. Merging two families re-points all
//! members of the absorbed family, so lookups never chase chains.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use super::{FamilyId, MeasureId, Registry};

impl Registry {
    /// Representative of `id`'s family (`id` itself for singletons).
    #[inline]
    pub fn representative(&self, id: MeasureId) -> MeasureId {
        self.measure(id).prime.unwrap_or(id)
    }

    #[inline]
    pub fn prime(&self, id: MeasureId) -> Option<MeasureId> {
        self.measure(id).prime
    }

    #[inline]
    pub fn family(&self, id: MeasureId) -> Option<FamilyId> {
        self.measure(id).family
    }

    #[inline]
    pub fn same_family(&self, a: MeasureId, b: MeasureId) -> bool {
        self.representative(a) == self.representative(b)
    }

    /// Every member of `id`'s family, `id` included, in joining order.
    pub fn family_members(&self, id: MeasureId) -> &[MeasureId] {
        self.families
            .get(&self.representative(id))
            .map_or(&[][..], SmallVec::as_slice)
    }

    /// Other members of `id`'s family.
    pub fn relatives(&self, id: MeasureId) -> impl Iterator<Item = MeasureId> + '_ {
        self.family_members(id)
            .iter()
            .copied()
            .filter(move |&member| member != id)
    }

    /// Merge `other`'s family into `this` one.
    ///
    /// Returns `false` (and changes nothing) when both are already related.
    pub fn add_relative(&mut self, this: MeasureId, other: MeasureId) -> bool {
        let keep = self.representative(this);
        let absorb = self.representative(other);
        if keep == absorb {
            return false;
        }
        let moved = self.families.remove(&absorb).unwrap_or_default();
        let family = self.measures[keep.index()].family;
        for &member in &moved {
            let measure = &mut self.measures[member.index()];
            measure.prime = Some(keep);
            if family.is_some() {
                measure.family = family;
            }
        }
        tracing::trace!(
            keep = self.name(keep),
            absorbed = self.name(absorb),
            members = moved.len(),
            "merged families"
        );
        self.families.entry(keep).or_default().extend(moved);
        true
    }

    /// Give `id` its family number: a fresh one for a representative,
    /// otherwise the representative's.
    pub fn assign_family_to(&mut self, id: MeasureId) -> FamilyId {
        let family = match self.measure(id).prime {
            None => {
                let fresh = FamilyId(self.next_family);
                self.next_family += 1;
                fresh
            }
            Some(prime) => match self.measure(prime).family {
                Some(family) => family,
                None => self.assign_family_to(prime),
            },
        };
        self.measures[id.index()].family = Some(family);
        family
    }

    /// Re-apply a family number from an earlier compilation.
    ///
    /// Later assignments continue past the largest restored number.
    pub fn restore_family_for(&mut self, id: MeasureId, former: FamilyId) {
        self.measures[id.index()].family = Some(former);
        if former.0 >= self.next_family {
            self.next_family = former.0 + 1;
        }
    }

    /// Number of distinct families among `ids`.
    pub fn family_count(&self, ids: impl IntoIterator<Item = MeasureId>) -> usize {
        ids.into_iter()
            .filter_map(|id| self.family(id))
            .collect::<FxHashSet<_>>()
            .len()
    }
}
