use crate::model::{Step, StepUid};
use crate::tree::{collect_uids, for_each_step_mut};
use ahash::AHashSet;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TOKEN_LEN: usize = 9;
const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Hands out internal step identifiers for one editing session.
///
/// Identifiers are short random base-36 tokens. Before a token is handed out it is
/// checked against every identifier already present in the tree it is going into,
/// so two steps of the same tree never share one.
pub struct IdentityAssigner {
    rng: StdRng,
}

impl IdentityAssigner {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// A reproducible sequence of identifiers, for tests and snapshots.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draws a token not contained in `taken`.
    pub fn next_uid(&mut self, taken: &AHashSet<StepUid>) -> StepUid {
        loop {
            let token: String = (0..TOKEN_LEN)
                .map(|_| ALPHABET[self.rng.random_range(0..ALPHABET.len())] as char)
                .collect();
            let uid = StepUid::new(token);
            if !taken.contains(&uid) {
                return uid;
            }
        }
    }

    /// Gives an identifier to every step of `steps` that lacks one. Existing
    /// identifiers are kept as they are.
    ///
    /// Returns how many identifiers were assigned.
    pub fn assign_missing(&mut self, steps: &mut [Step]) -> usize {
        self.assign_missing_avoiding(steps, &AHashSet::new())
    }

    /// Like [`assign_missing`](Self::assign_missing), for a subtree about to be
    /// placed into a tree already holding the identifiers in `existing`.
    pub fn assign_missing_avoiding(
        &mut self,
        steps: &mut [Step],
        existing: &AHashSet<StepUid>,
    ) -> usize {
        let mut taken = collect_uids(steps);
        taken.extend(existing.iter().cloned());
        let mut assigned = 0;
        for_each_step_mut(steps, &mut |step: &mut Step| {
            if step.uid.is_none() {
                let uid = self.next_uid(&taken);
                taken.insert(uid.clone());
                step.uid = Some(uid);
                assigned += 1;
            }
        });
        assigned
    }

    /// Replaces every identifier of `steps` with a fresh one that collides neither
    /// with `existing` nor with any other identifier handed out in this call.
    pub fn refresh(&mut self, steps: &mut [Step], existing: &AHashSet<StepUid>) {
        let mut taken = existing.clone();
        for_each_step_mut(steps, &mut |step: &mut Step| {
            let uid = self.next_uid(&taken);
            taken.insert(uid.clone());
            step.uid = Some(uid);
        });
    }
}

impl Default for IdentityAssigner {
    fn default() -> Self {
        Self::new()
    }
}
