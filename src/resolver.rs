// Route-to-entity resolution for the detail overlay.

use crate::types::{Entity, EntityId, ListResult};

/// Find the entity addressed by the route in the cached list.
///
/// `None` when either input is missing or the list does not (yet) hold the id.
/// Lists are a single API page, so a linear scan is enough.
pub fn resolve(route_id: Option<EntityId>, cached: Option<&ListResult>) -> Option<&Entity> {
    let id = route_id?;
    cached?.items.iter().find(|entity| entity.id == id)
}
