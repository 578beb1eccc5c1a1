//! Member draft collector for the administrators step.
//!
//! Holds no list of its own: every operation takes the current list and
//! returns the full new list for the wizard to store.

use crate::entity::{MemberDraft, MemberRef, Role};

/// The logged-in person completing the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    /// Id of the viewer's own collective profile.
    pub collective_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct MemberCollector {
    viewer: Option<Viewer>,
}

impl MemberCollector {
    pub fn new(viewer: Option<Viewer>) -> Self {
        Self { viewer }
    }

    /// Initial list: the viewer as the first admin, if known.
    pub fn seed(&self) -> Vec<MemberDraft> {
        self.viewer
            .iter()
            .map(|v| MemberDraft::admin(v.collective_id, v.name.clone()))
            .collect()
    }

    fn is_viewer(&self, member: &MemberRef) -> bool {
        match (&self.viewer, member.id) {
            (Some(v), Some(id)) => v.collective_id == id,
            _ => false,
        }
    }

    /// Append a candidate. Rejects an account that is already listed.
    pub fn add(&self, current: &[MemberDraft], candidate: MemberDraft) -> Option<Vec<MemberDraft>> {
        let duplicate = candidate.member.id.is_some()
            && current.iter().any(|m| m.member.id == candidate.member.id);
        if duplicate {
            return None;
        }
        let mut members = current.to_vec();
        members.push(candidate);
        Some(members)
    }

    /// Remove the entry at `index`. The viewer's own entry stays.
    pub fn remove(&self, current: &[MemberDraft], index: usize) -> Option<Vec<MemberDraft>> {
        let target = current.get(index)?;
        if self.is_viewer(&target.member) {
            return None;
        }
        let mut members = current.to_vec();
        members.remove(index);
        Some(members)
    }

    pub fn set_role(
        &self,
        current: &[MemberDraft],
        index: usize,
        role: Role,
    ) -> Option<Vec<MemberDraft>> {
        current.get(index)?;
        let mut members = current.to_vec();
        members[index].role = Some(role);
        Some(members)
    }
}
