//! Default contact list for a fresh install.

use crate::storage::models::Profile;

/// Demo contacts persisted the first time the contact list is requested.
pub fn default_contacts() -> Vec<Profile> {
    vec![
        Profile::new("contact_1", "Maya Tran", "maya.tran@example.com"),
        Profile::new("contact_2", "Jonas Weber", "jonas.weber@example.com"),
        Profile::new("contact_3", "Priya Nair", "priya.nair@example.com"),
        Profile::new("contact_4", "Sam Okafor", "sam.okafor@example.com"),
        Profile::new("contact_5", "Lena Fischer", "lena.fischer@example.com"),
        Profile::new("contact_6", "Diego Morales", "diego.morales@example.com"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn contact_ids_are_unique() {
        let contacts = default_contacts();
        let ids: HashSet<&str> = contacts.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), contacts.len());
    }
}
