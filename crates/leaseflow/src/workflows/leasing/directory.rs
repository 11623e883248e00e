use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::{TenantId, TenantRecord};

/// Which server-side collection a tenant record was cached from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Prospects,
    AwaitingRent,
    Tenants,
}

/// Local projection of the backend's three tenant collections.
///
/// Each map is a cache of the last known-good server response; callers patch
/// it only after a remote transition reports success, so the projection never
/// invents an intermediate state the server has not confirmed.
#[derive(Debug, Default)]
pub struct TenantDirectory {
    prospects: BTreeMap<TenantId, TenantRecord>,
    awaiting_rent: BTreeMap<TenantId, TenantRecord>,
    tenants: BTreeMap<TenantId, TenantRecord>,
}

impl TenantDirectory {
    pub fn insert(&mut self, collection: Collection, record: TenantRecord) {
        self.bucket_mut(collection).insert(record.id.clone(), record);
    }

    /// Removes the record from whichever collection currently holds it.
    pub fn remove(&mut self, id: &TenantId) -> Option<(Collection, TenantRecord)> {
        for collection in [
            Collection::Prospects,
            Collection::AwaitingRent,
            Collection::Tenants,
        ] {
            if let Some(record) = self.bucket_mut(collection).remove(id) {
                return Some((collection, record));
            }
        }
        None
    }

    /// Moves a record between collections, applying `patch` to the detached
    /// record before reinsertion.
    pub fn relocate(
        &mut self,
        id: &TenantId,
        from: Collection,
        to: Collection,
        patch: impl FnOnce(&mut TenantRecord),
    ) -> Option<&TenantRecord> {
        let mut record = self.bucket_mut(from).remove(id)?;
        patch(&mut record);
        let bucket = self.bucket_mut(to);
        bucket.insert(id.clone(), record);
        bucket.get(id)
    }

    pub fn patch(
        &mut self,
        id: &TenantId,
        collection: Collection,
        patch: impl FnOnce(&mut TenantRecord),
    ) -> Option<&TenantRecord> {
        let record = self.bucket_mut(collection).get_mut(id)?;
        patch(record);
        Some(&*record)
    }

    pub fn locate(&self, id: &TenantId) -> Option<(Collection, &TenantRecord)> {
        if let Some(record) = self.prospects.get(id) {
            return Some((Collection::Prospects, record));
        }
        if let Some(record) = self.awaiting_rent.get(id) {
            return Some((Collection::AwaitingRent, record));
        }
        self.tenants
            .get(id)
            .map(|record| (Collection::Tenants, record))
    }

    pub fn list(&self, collection: Collection) -> Vec<&TenantRecord> {
        self.bucket(collection).values().collect()
    }

    /// Replaces one cached collection with a fresh server snapshot.
    pub fn hydrate(&mut self, collection: Collection, records: Vec<TenantRecord>) {
        let bucket = self.bucket_mut(collection);
        bucket.clear();
        for record in records {
            bucket.insert(record.id.clone(), record);
        }
    }

    fn bucket(&self, collection: Collection) -> &BTreeMap<TenantId, TenantRecord> {
        match collection {
            Collection::Prospects => &self.prospects,
            Collection::AwaitingRent => &self.awaiting_rent,
            Collection::Tenants => &self.tenants,
        }
    }

    fn bucket_mut(&mut self, collection: Collection) -> &mut BTreeMap<TenantId, TenantRecord> {
        match collection {
            Collection::Prospects => &mut self.prospects,
            Collection::AwaitingRent => &mut self.awaiting_rent,
            Collection::Tenants => &mut self.tenants,
        }
    }
}
