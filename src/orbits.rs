//! Orbit maps: lines of `A)B` meaning "B orbits A", forming a tree under a root object.

use bitvec::prelude::*;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{Error, Result};

/// Objects the orbit puzzles are asked about, by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrbitOptions {
    pub root: String,
    pub from: String,
    pub to: String,
}

impl Default for OrbitOptions {
    fn default() -> Self {
        OrbitOptions { root: "COM".into(), from: "YOU".into(), to: "SAN".into() }
    }
}

/// An immutable orbit tree borrowing its object names from the parsed input.
#[derive(Debug, Default, Clone)]
pub struct OrbitMap<'a> {
    names: Vec<&'a str>,
    ids: FxHashMap<&'a str, usize>,
    parents: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
}

impl<'a> OrbitMap<'a> {
    /// Blank lines are skipped and a repeated line counts once. Fails with
    /// `InvariantViolation` if an object is given two centers or the orbits form a cycle.
    pub fn parse(input: &'a str) -> Result<Self> {
        let mut map = OrbitMap::default();
        for (ix, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {continue};
            let Some((center, orbiter)) = line.split_once(')') else {
                return Err(Error::parse(ix + 1, format!("expected `CENTER)ORBITER`, found {line:?}")));
            };
            for id in [center, orbiter] {
                if id.is_empty() || !id.bytes().all(|b| b.is_ascii_alphanumeric()) {
                    return Err(Error::parse(ix + 1, format!("invalid object name {id:?}")));
                }
            }

            let center = map.intern(center);
            let orbiter = map.intern(orbiter);
            match map.parents[orbiter] {
                None => {
                    map.parents[orbiter] = Some(center);
                    map.children[center].push(orbiter);
                },
                Some(known) if known == center => (),
                Some(known) => return Err(Error::InvariantViolation(format!(
                    "{} orbits both {} and {}", map.names[orbiter], map.names[known], map.names[center]
                ))),
            }
        }
        map.check_acyclic()?;
        debug!(objects = map.len(), "parsed orbit map");
        Ok(map)
    }

    fn intern(&mut self, name: &'a str) -> usize {
        if let Some(&ix) = self.ids.get(name) {return ix};
        let ix = self.names.len();
        self.ids.insert(name, ix);
        self.names.push(name);
        self.parents.push(None);
        self.children.push(vec![]);
        ix
    }

    fn check_acyclic(&self) -> Result<()> {
        let mut settled = bitvec![0; self.len()];
        let mut on_path = bitvec![0; self.len()];
        let mut path = Vec::new();
        for start in 0 .. self.len() {
            let mut node = Some(start);
            while let Some(ix) = node {
                if settled[ix] {break};
                if on_path[ix] {
                    return Err(Error::InvariantViolation(format!("orbit cycle through {}", self.names[ix])));
                }
                on_path.set(ix, true);
                path.push(ix);
                node = self.parents[ix];
            }
            for ix in path.drain(..) {
                on_path.set(ix, false);
                settled.set(ix, true);
            }
        }
        Ok(())
    }

    fn id(&self, name: &str) -> Result<usize> {
        self.ids.get(name).copied().ok_or_else(|| Error::NotFound(format!("object {name:?}")))
    }

    /// Root-to-parent chain, excluding `ix` itself.
    fn ancestor_ids(&self, ix: usize) -> Vec<usize> {
        let mut chain = vec![];
        let mut node = self.parents[ix];
        while let Some(parent) = node {
            chain.push(parent);
            node = self.parents[parent];
        }
        chain.reverse();
        chain
    }

    /// Ancestor chains of both objects and the length of their shared prefix.
    fn chains(&self, a: &str, b: &str) -> Result<(Vec<usize>, Vec<usize>, usize)> {
        let a_chain = self.ancestor_ids(self.id(a)?);
        let b_chain = self.ancestor_ids(self.id(b)?);
        let shared = a_chain.iter().zip(&b_chain).take_while(|(x, y)| x == y).count();
        if shared == 0 {
            return Err(Error::NotFound(format!("common ancestor of {a:?} and {b:?}")));
        }
        Ok((a_chain, b_chain, shared))
    }

    /// Number of distinct objects.
    pub fn len(&self) -> usize {self.names.len()}

    pub fn is_empty(&self) -> bool {self.names.is_empty()}

    pub fn contains(&self, name: &str) -> bool {self.ids.contains_key(name)}

    pub fn parent(&self, name: &str) -> Result<Option<&'a str>> {
        Ok(self.parents[self.id(name)?].map(|ix| self.names[ix]))
    }

    /// Direct orbiters in input order.
    pub fn children(&self, name: &str) -> Result<Vec<&'a str>> {
        Ok(self.children[self.id(name)?].iter().map(|&ix| self.names[ix]).collect())
    }

    /// Direct and indirect orbits of one object.
    pub fn depth(&self, name: &str) -> Result<usize> {
        let mut depth = 0;
        let mut node = self.parents[self.id(name)?];
        while let Some(parent) = node {
            depth += 1;
            node = self.parents[parent];
        }
        Ok(depth)
    }

    pub fn ancestors(&self, name: &str) -> Result<Vec<&'a str>> {
        Ok(self.ancestor_ids(self.id(name)?).into_iter().map(|ix| self.names[ix]).collect())
    }

    /// Deepest object that both `a` and `b` orbit, directly or indirectly.
    pub fn common_ancestor(&self, a: &str, b: &str) -> Result<&'a str> {
        let (a_chain, _, shared) = self.chains(a, b)?;
        Ok(self.names[a_chain[shared - 1]])
    }

    /// Sum of every object's depth below `root`. An empty map has no orbits.
    pub fn orbit_count(&self, root: &str) -> Result<usize> {
        if self.is_empty() {return Ok(0)};
        let mut total = 0;
        let mut stack = vec![(self.id(root)?, 0)];
        while let Some((ix, depth)) = stack.pop() {
            total += depth;
            stack.extend(self.children[ix].iter().map(|&child| (child, depth + 1)));
        }
        debug!(root, total, "counted orbits");
        Ok(total)
    }

    /// Orbital transfers needed to move the object `from` orbits to the object `to` orbits.
    pub fn transfer_distance(&self, from: &str, to: &str) -> Result<usize> {
        let (from_chain, to_chain, shared) = self.chains(from, to)?;
        let distance = from_chain.len() + to_chain.len() - 2 * shared;
        debug!(from, to, distance, "computed transfer distance");
        Ok(distance)
    }
}

pub fn day6(part: u8, input: &str, options: &OrbitOptions) -> Result<String> {
    let map = OrbitMap::parse(input)?;
    let answer = if part == 1 {
        map.orbit_count(&options.root)?
    } else {
        map.transfer_distance(&options.from, &options.to)?
    };
    Ok(answer.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EXAMPLE: &str = "COM)B\nB)C\nC)D\nD)E\nE)F\nB)G\nG)H\nD)I\nE)J\nJ)K\nK)L\n";

    fn with_travellers() -> String {
        format!("{EXAMPLE}K)YOU\nI)SAN\n")
    }

    #[test]
    fn counts_example_orbits() {
        let map = OrbitMap::parse(EXAMPLE).unwrap();
        assert_eq!(map.len(), 12);
        assert_eq!(map.orbit_count("COM"), Ok(42));
    }

    #[test]
    fn depth_matches_orbit_definition() {
        let map = OrbitMap::parse(EXAMPLE).unwrap();
        assert_eq!(map.depth("COM"), Ok(0));
        assert_eq!(map.depth("D"), Ok(3));
        assert_eq!(map.depth("L"), Ok(7));
    }

    #[test]
    fn transfers_between_travellers() {
        let input = with_travellers();
        let map = OrbitMap::parse(&input).unwrap();
        assert_eq!(map.transfer_distance("YOU", "SAN"), Ok(4));
        assert_eq!(map.transfer_distance("SAN", "YOU"), Ok(4));
        assert_eq!(map.common_ancestor("YOU", "SAN"), Ok("D"));
    }

    #[test]
    fn transfers_between_arbitrary_objects() {
        let map = OrbitMap::parse(EXAMPLE).unwrap();
        assert_eq!(map.transfer_distance("L", "H"), Ok(6));
        assert_eq!(map.transfer_distance("F", "J"), Ok(0));
        assert_eq!(map.transfer_distance("D", "I"), Ok(1));
    }

    #[test]
    fn exposes_tree_structure() {
        let map = OrbitMap::parse(EXAMPLE).unwrap();
        assert_eq!(map.parent("COM"), Ok(None));
        assert_eq!(map.parent("G"), Ok(Some("B")));
        assert_eq!(map.children("B"), Ok(vec!["C", "G"]));
        assert_eq!(map.children("L"), Ok(vec![]));
        assert_eq!(map.ancestors("I"), Ok(vec!["COM", "B", "C", "D"]));
        assert!(map.contains("K"));
        assert!(!map.contains("YOU"));
    }

    #[test]
    fn solves_both_parts() {
        let options = OrbitOptions::default();
        assert_eq!(day6(1, EXAMPLE, &options).unwrap(), "42");
        assert_eq!(day6(2, &with_travellers(), &options).unwrap(), "4");
        let custom = OrbitOptions { root: "B".into(), from: "L".into(), to: "H".into() };
        assert_eq!(day6(2, EXAMPLE, &custom).unwrap(), "6");
    }

    #[test]
    fn empty_and_repeated_input() {
        let map = OrbitMap::parse("\n\n").unwrap();
        assert!(map.is_empty());
        assert_eq!(map.orbit_count("COM"), Ok(0));

        let map = OrbitMap::parse("COM)A\nCOM)A\nA)B\n").unwrap();
        assert_eq!(map.orbit_count("COM"), Ok(3));
    }

    #[test]
    fn missing_objects_are_not_found() {
        let map = OrbitMap::parse(EXAMPLE).unwrap();
        assert!(matches!(map.orbit_count("ROOT"), Err(Error::NotFound(_))));
        assert!(matches!(map.transfer_distance("YOU", "SAN"), Err(Error::NotFound(_))));
        assert!(matches!(map.depth("nope"), Err(Error::NotFound(_))));
        // the root orbits nothing, so it shares no ancestor with anyone
        assert!(matches!(map.transfer_distance("COM", "L"), Err(Error::NotFound(_))));

        let forest = OrbitMap::parse("COM)A\nCOM)B\nX)Y\nX)Z\n").unwrap();
        assert_eq!(forest.transfer_distance("A", "B"), Ok(0));
        assert!(matches!(forest.common_ancestor("A", "Y"), Err(Error::NotFound(_))));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert_eq!(OrbitMap::parse("COM)A\nA-B\n").unwrap_err(), Error::Parse {
            line: 2,
            reason: "expected `CENTER)ORBITER`, found \"A-B\"".into(),
        });
        assert!(matches!(OrbitMap::parse("COM)"), Err(Error::Parse { line: 1, .. })));
        assert!(matches!(OrbitMap::parse("COM)A)B"), Err(Error::Parse { line: 1, .. })));
        assert!(matches!(OrbitMap::parse("COM)A B"), Err(Error::Parse { line: 1, .. })));
    }

    #[test]
    fn rejects_second_center() {
        let err = OrbitMap::parse("COM)A\nCOM)B\nA)C\nB)C\n").unwrap_err();
        assert_eq!(err, Error::InvariantViolation("C orbits both A and B".into()));
    }

    #[test]
    fn rejects_cycles() {
        assert!(matches!(OrbitMap::parse("A)A"), Err(Error::InvariantViolation(_))));
        assert!(matches!(OrbitMap::parse("COM)X\nA)B\nB)C\nC)A\n"), Err(Error::InvariantViolation(_))));
    }

    proptest! {
        #[test]
        fn chain_orbits_are_triangular(len in 1usize .. 200) {
            let input = (0 .. len).map(|i| format!("N{i})N{}\n", i + 1)).collect::<String>();
            let map = OrbitMap::parse(&input).unwrap();
            prop_assert_eq!(map.orbit_count("N0").unwrap(), len * (len + 1) / 2);
            prop_assert_eq!(map.depth(&format!("N{len}")).unwrap(), len);
        }
    }
}
