//! Fixtures shared by unit tests.

use crate::structure::{
    Atom, Bond, BondType, Interaction, InteractionKind, InteractionSet,
    StructureData,
};

pub(crate) fn atom_at(index: usize, element: &str, pos: [f32; 3]) -> Atom {
    Atom {
        index,
        serial: index as i64 + 1,
        name: element.to_owned(),
        alt_loc: String::new(),
        res_name: "GLY".to_owned(),
        chain_id: "A".to_owned(),
        res_seq: index as i64 + 1,
        i_code: String::new(),
        x: pos[0],
        y: pos[1],
        z: pos[2],
        occupancy: 1.0,
        temp_factor: 0.0,
        element: element.to_owned(),
        charge: 0.0,
    }
}

pub(crate) fn atom(index: usize, element: &str) -> Atom {
    atom_at(index, element, [0.0; 3])
}

/// `n` carbon atoms spaced one angstrom apart along x.
pub(crate) fn carbon_chain(n: usize) -> Vec<Atom> {
    (0..n).map(|i| atom_at(i, "C", [i as f32, 0.0, 0.0])).collect()
}

pub(crate) fn interaction(
    kind: InteractionKind,
    atom1_index: usize,
    atom2_index: usize,
) -> Interaction {
    Interaction {
        interaction_type: kind,
        atom1_index,
        atom2_index,
        distance: 2.0,
        angle: None,
        atom1_residue: "GLY".to_owned(),
        atom1_residue_seq: atom1_index as i64 + 1,
        atom2_residue: "GLY".to_owned(),
        atom2_residue_seq: atom2_index as i64 + 1,
        confidence: 1.0,
        is_predicted: false,
    }
}

pub(crate) fn bond(atom1_index: usize, atom2_index: usize) -> Bond {
    Bond {
        atom1_index,
        atom2_index,
        bond_type: BondType::Single,
        order: 1,
        distance: 1.5,
    }
}

pub(crate) fn interaction_set(
    groups: &[(InteractionKind, Vec<Interaction>)],
) -> InteractionSet {
    groups
        .iter()
        .filter_map(|(kind, list)| Some((kind.key()?.to_owned(), list.clone())))
        .collect()
}

pub(crate) fn structure(id: &str, atoms: Vec<Atom>) -> StructureData {
    StructureData {
        id: id.to_owned(),
        atoms,
        ..StructureData::default()
    }
}
