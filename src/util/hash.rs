use std::fmt::Write as _;

use glam::Vec3;
use sha2::{Digest, Sha256};

use crate::structure::Atom;

/// Feed a single [`Vec3`] into the digest by converting each component to
/// its bit pattern.
fn update_vec3(v: Vec3, hasher: &mut Sha256) {
    hasher.update(v.x.to_bits().to_le_bytes());
    hasher.update(v.y.to_bits().to_le_bytes());
    hasher.update(v.z.to_bits().to_le_bytes());
}

/// Length-prefixed string, so `("AB", "C")` and `("A", "BC")` differ.
fn update_str(s: &str, hasher: &mut Sha256) {
    hasher.update((s.len() as u64).to_le_bytes());
    hasher.update(s.as_bytes());
}

/// SHA-256 over every atom's identity and coordinates, as lowercase hex.
///
/// Two structures with the same atoms in the same order hash identically
/// regardless of where they were loaded from; any moved, renamed or
/// reordered atom changes the digest.
#[must_use]
pub fn structure_digest(atoms: &[Atom]) -> String {
    let mut hasher = Sha256::new();
    hasher.update((atoms.len() as u64).to_le_bytes());
    for atom in atoms {
        hasher.update((atom.index as u64).to_le_bytes());
        update_str(&atom.element, &mut hasher);
        update_str(&atom.name, &mut hasher);
        update_str(&atom.res_name, &mut hasher);
        update_str(&atom.chain_id, &mut hasher);
        hasher.update(atom.res_seq.to_le_bytes());
        update_vec3(atom.position(), &mut hasher);
    }
    hasher.finalize().iter().fold(String::with_capacity(64), |mut out, b| {
        let _ = write!(out, "{b:02x}");
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{atom_at, carbon_chain};

    #[test]
    fn digest_is_stable_hex() {
        let atoms = carbon_chain(4);
        let a = structure_digest(&atoms);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(a, structure_digest(&atoms.clone()));
    }

    #[test]
    fn moving_an_atom_changes_the_digest() {
        let mut atoms = carbon_chain(4);
        let before = structure_digest(&atoms);
        atoms[2] = atom_at(2, "C", [2.0, 0.001, 0.0]);
        assert_ne!(before, structure_digest(&atoms));
    }

    #[test]
    fn empty_structure_has_a_digest() {
        assert_eq!(structure_digest(&[]).len(), 64);
    }
}
