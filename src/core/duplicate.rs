// Greedy seed-based grouping of perceptually similar images.
//
// Each unprocessed image seeds a group and pulls in every later unprocessed
// image within `max_distance` of the seed. Matching is always against the
// seed, never against other members, so grouping is not transitive.

use crate::core::image::ImageRecord;

/// Two or more images judged visually identical, largest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    members: Vec<ImageRecord>,
}

impl DuplicateGroup {
    /// Orders `members` by area, descending and stable. Returns `None` for
    /// fewer than two members.
    fn from_members(mut members: Vec<ImageRecord>) -> Option<Self> {
        if members.len() < 2 {
            return None;
        }
        members.sort_by(|a, b| b.area().cmp(&a.area()));
        Some(Self { members })
    }

    /// The recommended copy to retain.
    pub fn keep(&self) -> &ImageRecord {
        &self.members[0]
    }

    /// The recommended copies to remove.
    pub fn delete(&self) -> &[ImageRecord] {
        &self.members[1..]
    }

    pub fn members(&self) -> &[ImageRecord] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Partition `images` into duplicate groups.
///
/// Input order matters: earlier images seed groups and claim matches
/// before later ones get the chance.
pub fn cluster(images: &[ImageRecord], max_distance: u32) -> Vec<DuplicateGroup> {
    let mut processed = vec![false; images.len()];
    let mut groups = Vec::new();

    for (i, seed) in images.iter().enumerate() {
        if processed[i] {
            continue;
        }
        processed[i] = true;
        let mut members = vec![seed.clone()];

        for (j, candidate) in images.iter().enumerate().skip(i + 1) {
            if processed[j] {
                continue;
            }
            if seed.fingerprint.distance(candidate.fingerprint) <= max_distance {
                processed[j] = true;
                members.push(candidate.clone());
            }
        }

        if let Some(group) = DuplicateGroup::from_members(members) {
            groups.push(group);
        }
    }

    groups
}
